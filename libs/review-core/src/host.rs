//! Display-side collaborators driven by the review session.

use crate::types::TextDirection;

/// Renders card content into a display surface.
pub trait ContentRenderer {
    fn render(&mut self, text: &str, direction: TextDirection);
}

/// One-shot informational messages.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}
