//! Delete confirmation
//!
//! A [`DeleteTicket`] is the only way to reach a remote delete, and only a
//! confirmation step can mint one.

use std::cell::Cell;
use std::marker::PhantomData;

use crate::domain::{Record, RowId};

/// Proof that the user confirmed deleting one row of `T`
#[derive(Debug)]
pub struct DeleteTicket<T> {
    id: RowId,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> DeleteTicket<T> {
    fn issue(id: RowId) -> Self {
        Self {
            id,
            _record: PhantomData,
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Synchronous prompt; `confirm` receives the question to show
    pub fn prompt(id: RowId, confirm: impl FnOnce(&str) -> bool) -> Option<Self> {
        let question = format!("Are you sure you want to delete this {}?", T::NOUN);
        confirm(&question).then(|| Self::issue(id))
    }
}

/// Two-phase confirmation: request, then confirm or cancel
pub struct DeleteGate<T> {
    pending: Cell<Option<RowId>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Default for DeleteGate<T> {
    fn default() -> Self {
        Self {
            pending: Cell::new(None),
            _record: PhantomData,
        }
    }
}

impl<T: Record> DeleteGate<T> {
    pub fn request(&self, id: RowId) {
        self.pending.set(Some(id));
    }

    pub fn pending(&self) -> Option<RowId> {
        self.pending.get()
    }

    pub fn cancel(&self) {
        self.pending.set(None);
    }

    /// Consumes the pending request
    pub fn confirm(&self) -> Option<DeleteTicket<T>> {
        self.pending.take().map(DeleteTicket::issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Subject, Topic};

    #[test]
    fn test_gate_issues_one_ticket_per_request() {
        let gate = DeleteGate::<Subject>::default();
        assert!(gate.confirm().is_none());

        gate.request(5);
        assert_eq!(gate.pending(), Some(5));
        assert_eq!(gate.confirm().map(|t| t.id()), Some(5));
        assert!(gate.confirm().is_none());

        gate.request(6);
        gate.cancel();
        assert!(gate.confirm().is_none());
    }

    #[test]
    fn test_prompt_uses_record_noun() {
        let mut asked = String::new();
        let ticket = DeleteTicket::<Topic>::prompt(3, |q| {
            asked = q.to_string();
            false
        });
        assert!(ticket.is_none());
        assert_eq!(asked, "Are you sure you want to delete this topic?");
        assert!(DeleteTicket::<Topic>::prompt(3, |_| true).is_some());
    }
}
