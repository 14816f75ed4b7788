//! User-facing outcome notification for the Calibra hub.
//!
//! The flow crate stays silent towards the user; this crate turns terminal
//! upload outcomes into toasts the UI renders. Timer-based dismissal is a
//! UI concern — the queue only stores entries and hands them out.

pub mod reporter;
pub mod toast;

pub use reporter::report_outcome;
pub use toast::{Toast, ToastQueue, ToastType};
