use chrono::{DateTime, Utc};

/// A module-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - published only **after** the originating aggregate was saved
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "courses.course.published").
    fn event_type(&self) -> &'static str;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
