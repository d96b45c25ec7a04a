//! Per-subject completion statistics

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::motivation::Tier;
use crate::domain::{RowId, Subject, Topic};

/// Card accent colors, assigned by subject position
pub const PALETTE: [&str; 6] = ["#28a745", "#ffc107", "#007bff", "#dc3545", "#17a2b8", "#6610f2"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub id: RowId,
    pub name: String,
    pub completed: usize,
    pub pending: usize,
    pub total: usize,
    /// Percent, one decimal
    pub completion_rate: f64,
    pub color: String,
    pub message: String,
}

impl SubjectSummary {
    pub fn tier(&self) -> Tier {
        Tier::for_rate(self.completion_rate)
    }

    /// Completed fraction of all topics, 0 for an empty subject
    pub fn completed_share(&self) -> f64 {
        share(self.completed, self.total)
    }

    pub fn pending_share(&self) -> f64 {
        share(self.pending, self.total)
    }
}

fn share(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

pub fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (completed as f64 / total as f64 * 1000.0).round() / 10.0
}

/// One summary per subject, in subject order
pub fn summarize<R: Rng + ?Sized>(subjects: &[Subject], topics: &[Topic], rng: &mut R) -> Vec<SubjectSummary> {
    let mut counts: HashMap<RowId, (usize, usize)> = HashMap::new();
    for topic in topics {
        let entry = counts.entry(topic.subject_id).or_default();
        entry.1 += 1;
        if topic.completed {
            entry.0 += 1;
        }
    }

    subjects
        .iter()
        .enumerate()
        .map(|(index, subject)| {
            let (completed, total) = counts.get(&subject.id).copied().unwrap_or_default();
            let completion_rate = completion_rate(completed, total);
            SubjectSummary {
                id: subject.id,
                name: subject.name.clone(),
                completed,
                pending: total - completed,
                total,
                completion_rate,
                color: PALETTE[index % PALETTE.len()].to_string(),
                message: Tier::for_rate(completion_rate).pick(rng).to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn subject(id: RowId, name: &str) -> Subject {
        Subject {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    fn topic(id: RowId, subject_id: RowId, name: &str, completed: bool) -> Topic {
        Topic {
            id,
            name: name.to_string(),
            description: String::new(),
            subject_id,
            completed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_algebra_half_done() {
        let subjects = vec![subject(1, "Algebra")];
        let topics = vec![
            topic(1, 1, "Linear Equations", false),
            topic(2, 1, "Matrices", true),
        ];
        let summary = &summarize(&subjects, &topics, &mut StdRng::seed_from_u64(1))[0];

        assert_eq!(summary.completed, 1);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.completion_rate, 50.0);
        assert_eq!(summary.tier(), Tier::Medium);
        assert!(Tier::Medium.messages().contains(&summary.message.as_str()));
    }

    #[test]
    fn test_empty_subject_has_zero_rate() {
        let subjects = vec![subject(1, "Algebra"), subject(2, "History")];
        let topics = vec![topic(1, 1, "Matrices", true)];
        let summaries = summarize(&subjects, &topics, &mut StdRng::seed_from_u64(1));

        let history = &summaries[1];
        assert_eq!(history.total, 0);
        assert_eq!(history.completion_rate, 0.0);
        assert_eq!(history.completed_share(), 0.0);
        assert_eq!(history.tier(), Tier::Low);
        assert_eq!(history.color, PALETTE[1]);
    }

    #[test]
    fn test_rate_rounds_to_one_decimal() {
        assert_eq!(completion_rate(1, 3), 33.3);
        assert_eq!(completion_rate(2, 3), 66.7);
        assert_eq!(completion_rate(3, 3), 100.0);
    }

    #[test]
    fn test_colors_wrap_around_palette() {
        let subjects: Vec<Subject> = (1..=7).map(|id| subject(id, "s")).collect();
        let summaries = summarize(&subjects, &[], &mut StdRng::seed_from_u64(1));
        assert_eq!(summaries[6].color, PALETTE[0]);
    }
}
