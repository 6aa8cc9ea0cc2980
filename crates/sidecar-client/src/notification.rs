//! User-facing notification sink
//!
//! Operation outcomes are reported through [`Notifier`] so an embedding UI
//! can surface toasts. Headless consumers can use [`LogNotifier`], which
//! routes everything to `tracing`.

#[cfg(test)]
use mockall::automock;
use tracing::{error, info};

/// Sink for user-visible operation outcomes
#[cfg_attr(test, automock)]
pub trait Notifier: Send + Sync {
    /// Report a successful operation
    fn success(&self, message: &str);

    /// Report a failed operation with a short title
    fn error(&self, message: &str, title: &str);
}

/// Notifier that writes to the log instead of a UI
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!("{}", message);
    }

    fn error(&self, message: &str, title: &str) {
        error!("{}: {}", title, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_notifier_accepts_messages() {
        let notifier = LogNotifier;
        notifier.success("Configuration variable \"x\" successfully created");
        notifier.error("it broke", "Could not save variable");
    }
}
