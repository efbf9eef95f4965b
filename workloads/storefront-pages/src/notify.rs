//! Toast notifications.
//!
//! Controllers queue toasts here; drawing them is up to the shell.

/// Toast flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Pending toasts, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    queue: Vec<Toast>,
}

impl Notifications {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a success toast.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    /// Queue an error toast.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        self.queue.push(Toast { kind, message });
    }

    /// Most recent toast.
    pub fn last(&self) -> Option<&Toast> {
        self.queue.last()
    }

    /// Take all pending toasts.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.queue)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_and_drain() {
        let mut toasts = Notifications::new();
        toasts.success("Saved");
        toasts.error("Oops");

        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts.last().map(|t| t.kind), Some(ToastKind::Error));

        let drained = toasts.drain();
        assert_eq!(drained[0].message, "Saved");
        assert!(toasts.is_empty());
    }
}
