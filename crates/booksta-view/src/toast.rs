//! Toast notifications queued by view-models for the front-end to show.

/// Type of toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            toast_type: ToastType::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            toast_type: ToastType::Warning,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            toast_type: ToastType::Error,
        }
    }
}

/// Pending toasts, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    pending: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, toast: Toast) {
        tracing::debug!(kind = ?toast.toast_type, "toast: {}", toast.message);
        self.pending.push(toast);
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.pending.last()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Hands every pending toast to the caller.
    pub fn take(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.pending)
    }
}
