//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. They are never
/// persisted on their own; they are always embedded in an aggregate (a rating, a
/// comment, a location). To "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Comment(String);
///
/// impl ValueObject for Comment {}
///
/// assert_eq!(Comment("ok".into()), Comment("ok".into()));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
