use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-visible message, e.g. why a form action was refused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoticeEntry {
    /// "HH:MM:SS"
    pub timestamp: String,
    pub notice: Notice,
}

/// Notices collected over a session, newest last.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NoticeLog {
    pub entries: Vec<NoticeEntry>,
    pub visible: bool,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        self.push_at(Utc::now(), notice);
    }

    pub fn push_at(&mut self, at: DateTime<Utc>, notice: Notice) {
        self.entries.push(NoticeEntry {
            timestamp: at.format("%H:%M:%S").to_string(),
            notice,
        });
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.entries.last().map(|e| &e.notice)
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
