//! User-visible notices raised while serving a request.

use std::cell::RefCell;

use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }
}

/// Sink for notices. Delivery is fire-and-forget.
#[cfg_attr(feature = "test-mocks", mockall::automock)]
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Collects the notices of a single request.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: RefCell<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains the collected notices in the order they were raised.
    pub fn take(&self) -> Vec<Notice> {
        self.notices.take()
    }

    pub fn len(&self) -> usize {
        self.notices.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.borrow().is_empty()
    }

    /// Messages of the error notices collected so far.
    pub fn errors(&self) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn log_keeps_order_and_drains() {
        let log = NoticeLog::new();
        log.notify(Notice::error("Title: is required"));
        log.notify(Notice::success("Deal created successfully"));

        assert_eq!(log.errors(), vec!["Title: is required".to_string()]);
        assert_eq!(log.len(), 2);

        let drained = log.take();
        assert_eq!(drained[1], Notice::success("Deal created successfully"));
        assert!(log.is_empty());
    }

    #[test]
    fn notices_serialize_with_lowercase_level() {
        assert_eq!(
            serde_json::to_value(Notice::error("boom")).unwrap(),
            json!({"level": "error", "message": "boom"})
        );
    }
}
