//! Native device collaborator traits
//!
//! The barcode scanner and the toast surface are platform plugins in the
//! real client. The core only sees these traits; the default notifier
//! logs to the console, matching the plugin's behavior when no native
//! toast is available.

use crate::error::Result;

/// Outcome of a barcode scan. A user backing out of the scanner is a
/// cancellation, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub text: String,
    pub cancelled: bool,
}

impl Scan {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cancelled: false,
        }
    }

    pub fn cancelled() -> Self {
        Self {
            text: String::new(),
            cancelled: true,
        }
    }
}

/// Barcode scanner collaborator.
pub trait BarcodeScanner: Send + Sync {
    fn scan(&self) -> Result<Scan>;
}

/// Short-lived user notification surface (a toast on device).
pub trait Notify: Send + Sync {
    fn show(&self, message: &str);
}

/// Fallback notifier that logs the message to the console.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notify for LogNotifier {
    fn show(&self, message: &str) {
        tracing::info!(target: "stockpile::notify", "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_constructors() {
        let scan = Scan::text("9000001");
        assert_eq!(scan.text, "9000001");
        assert!(!scan.cancelled);

        let cancelled = Scan::cancelled();
        assert!(cancelled.cancelled);
        assert!(cancelled.text.is_empty());
    }

    #[test]
    fn test_log_notifier_does_not_panic() {
        LogNotifier.show("Item successfully added");
    }
}
