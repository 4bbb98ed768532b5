use crate::core::NotificationSink;

/// Prints failure messages to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn error(&self, message: &str) {
        tracing::warn!("Notifying user: {}", message);
        eprintln!("❌ {}", message);
    }
}
