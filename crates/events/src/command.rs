use blueprint_core::DomainResult;

/// An immutable request to change state (command abstraction).
///
/// Commands represent **intent**. They are **transient**: never persisted, they live
/// for the duration of one handler invocation and are validated before any domain
/// logic runs.
///
/// ## Command vs Integration Event
///
/// - **Command**: intent (e.g. "publish course X")
/// - **Integration event**: fact published after the change was saved
///   (e.g. `CoursePublished { course_id }`)
///
/// ## Design Constraints
///
/// Commands must be:
/// - **Cloneable**: commands may be copied for logging and retries by callers
/// - **Send + Sync + 'static**: commands cross thread boundaries and own their data
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable name used in logs (e.g. "courses.publish").
    fn command_type(&self) -> &'static str;

    /// Field-level constraint checks.
    ///
    /// Implementations collect every failing field with
    /// [`blueprint_core::Violations`] so the caller sees them all at once.
    fn validate(&self) -> DomainResult<()> {
        Ok(())
    }
}
