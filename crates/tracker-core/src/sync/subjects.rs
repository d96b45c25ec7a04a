//! Subject board
//!
//! Subject list plus the two-step delete used by the confirmation modal.

use super::confirm::DeleteGate;
use super::entity_list::EntityList;
use super::Notifier;
use crate::domain::{NewSubject, RowId, Subject};
use crate::error::TrackerResult;
use crate::repository::SharedStore;

pub struct SubjectBoard {
    list: EntityList<Subject>,
    gate: DeleteGate<Subject>,
}

impl SubjectBoard {
    pub fn new(store: SharedStore, notifier: Notifier) -> Self {
        Self {
            list: EntityList::new(store, notifier),
            gate: DeleteGate::default(),
        }
    }

    pub fn list(&self) -> &EntityList<Subject> {
        &self.list
    }

    pub fn subjects(&self) -> Vec<Subject> {
        self.list.items()
    }

    pub async fn refresh(&self) -> TrackerResult<()> {
        self.list.refresh().await
    }

    pub async fn add(&self, name: &str) -> TrackerResult<()> {
        self.list.create(NewSubject::new(name)).await
    }

    /// Opens the confirmation for `id`
    pub fn request_delete(&self, id: RowId) {
        self.gate.request(id);
    }

    pub fn pending_delete(&self) -> Option<Subject> {
        self.gate.pending().and_then(|id| self.list.get(id))
    }

    pub fn cancel_delete(&self) {
        self.gate.cancel();
    }

    /// Deletes the pending subject; does nothing when none is pending
    pub async fn confirm_delete(&self) -> TrackerResult<()> {
        match self.gate.confirm() {
            Some(ticket) => self.list.delete(ticket).await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Collection, NoticeLevel};
    use crate::repository::MemoryStore;
    use crate::testing::{NoticeLog, RecordingStore, StoreOp};
    use std::rc::Rc;

    fn board() -> (Rc<RecordingStore>, SubjectBoard, NoticeLog) {
        let store = Rc::new(RecordingStore::new(MemoryStore::new()));
        let notices = NoticeLog::default();
        let board = SubjectBoard::new(store.clone(), notices.notifier());
        (store, board, notices)
    }

    #[tokio::test]
    async fn test_new_subject_is_listed_first() {
        let (_, board, notices) = board();
        board.add("Physics").await.unwrap();
        board.add("  Math ").await.unwrap();

        let names: Vec<String> = board.subjects().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Math", "Physics"]);
        let notice = notices.last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, "Subject added successfully.");
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_locally() {
        let (store, board, notices) = board();
        assert!(board.add("   ").await.is_err());
        assert_eq!(store.calls(StoreOp::Insert), 0);
        let notice = notices.last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "Subject name cannot be empty.");
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (store, board, notices) = board();
        board.add("Math").await.unwrap();
        let id = board.subjects()[0].id;

        board.request_delete(id);
        assert_eq!(board.pending_delete().map(|s| s.name), Some("Math".to_string()));
        board.cancel_delete();
        board.confirm_delete().await.unwrap();
        assert_eq!(store.calls(StoreOp::Delete), 0);

        board.request_delete(id);
        board.confirm_delete().await.unwrap();
        assert_eq!(store.calls(StoreOp::Delete), 1);
        assert!(board.subjects().is_empty());
        assert_eq!(store.inner().row_count(Collection::Subjects), 0);
        assert_eq!(notices.last().unwrap().message, "Subject deleted successfully.");
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_list() {
        let (store, board, notices) = board();
        board.add("Math").await.unwrap();
        store.fail_next(StoreOp::Select);
        assert!(board.refresh().await.is_err());
        assert_eq!(board.subjects().len(), 1);
        assert_eq!(notices.last().unwrap().message, "Failed to load subjects.");
    }
}
