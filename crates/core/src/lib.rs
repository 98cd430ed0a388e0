//! `blueprint-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! aggregate/entity/value-object traits, identifiers, the repository port,
//! field validation and the shared error model.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod in_memory;
pub mod repository;
pub mod validation;
pub mod value_object;

pub use aggregate::AggregateRoot;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::SurrogateId;
pub use in_memory::InMemoryRepository;
pub use repository::Repository;
pub use validation::{FieldViolation, Violations};
pub use value_object::ValueObject;
