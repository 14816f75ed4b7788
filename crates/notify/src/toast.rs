//! In-memory toast queue for the hub UI.

/// Default toast display duration in milliseconds.
const DEFAULT_DURATION_MS: u64 = 4000;

/// Error toasts stay longer so the retry advice is readable.
const ERROR_DURATION_MS: u64 = 6000;

/// The visual category of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Error,
    Info,
}

/// A toast notification for the hub UI.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub toast_type: ToastType,
    pub title: String,
    pub body: Option<String>,
    pub duration_ms: u64,
}

/// In-memory toast queue with monotonic ID assignment.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    /// Creates an empty toast queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a toast and returns its assigned ID.
    pub fn push(
        &mut self,
        toast_type: ToastType,
        title: impl Into<String>,
        body: Option<String>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let duration_ms = match toast_type {
            ToastType::Error => ERROR_DURATION_MS,
            _ => DEFAULT_DURATION_MS,
        };
        self.toasts.push(Toast {
            id,
            toast_type,
            title: title.into(),
            body,
            duration_ms,
        });
        id
    }

    /// Pushes a success toast with body text.
    pub fn success_with(&mut self, title: impl Into<String>, body: impl Into<String>) -> u64 {
        self.push(ToastType::Success, title, Some(body.into()))
    }

    /// Pushes an error toast with body text.
    pub fn error_with(&mut self, title: impl Into<String>, body: impl Into<String>) -> u64 {
        self.push(ToastType::Error, title, Some(body.into()))
    }

    /// Pushes an info toast with body text.
    pub fn info_with(&mut self, title: impl Into<String>, body: impl Into<String>) -> u64 {
        self.push(ToastType::Info, title, Some(body.into()))
    }

    /// Removes a toast by ID. Unknown IDs are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Currently queued toasts, oldest first.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Takes all queued toasts, leaving the queue empty. For pull-based
    /// UIs that render and expire toasts themselves.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }
}
