//! Transient user-facing messages

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, TrackerError};

/// Message shown for transport failures, whatever the operation
pub const GENERIC_FAILURE: &str = "Something went wrong!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Danger, message)
    }

    /// Danger notice for a failed remote call. Network failures collapse to
    /// the generic message.
    pub fn store_failure(err: &StoreError, message: impl Into<String>) -> Self {
        if err.is_unexpected() {
            Self::danger(GENERIC_FAILURE)
        } else {
            Self::danger(message)
        }
    }

    /// Notice for any view-model failure; `None` for a declined confirmation.
    pub fn from_error(err: &TrackerError, message: impl Into<String>) -> Option<Self> {
        match err {
            TrackerError::Validation(v) => Some(Self::warning(v.message.clone())),
            TrackerError::Store(s) => Some(Self::store_failure(s, message)),
            TrackerError::Cancelled => None,
        }
    }
}

/// "topic" -> "Topic"
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
