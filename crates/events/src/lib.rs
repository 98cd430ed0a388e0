//! Commands, handlers and integration events.
//!
//! - `command` / `handler`: the command-handler contract every module implements
//! - `integration`: facts published between modules after a successful save
//! - `bus` / `in_memory_bus`: transport for those facts

pub mod bus;
pub mod command;
pub mod envelope;
pub mod event;
pub mod handler;
pub mod in_memory_bus;
pub mod integration;

pub use bus::{EventBus, Subscription, publish_or_warn};
pub use command::Command;
pub use envelope::EventEnvelope;
pub use event::Event;
pub use handler::{CommandHandler, QueryHandler, execute, query};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use integration::{IntegrationEnvelope, IntegrationEvent};
