//! Remote Collections

use serde::{Deserialize, Serialize};

/// The named tables the app reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Subjects,
    Topics,
    Products,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Subjects, Collection::Topics, Collection::Products];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Subjects => "subjects",
            Collection::Topics => "topics",
            Collection::Products => "products",
        }
    }

    pub fn from_table(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Whether rows carry a server-assigned `created_at`
    pub fn has_timestamps(&self) -> bool {
        !matches!(self, Collection::Products)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
