use tracing::{info, info_span, warn};

use blueprint_auth::Principal;
use blueprint_core::DomainResult;

use crate::Command;

/// Executes one command against one aggregate (command handler abstraction).
///
/// Every implementation follows the same straight-line shape:
///
/// 1. **Authorize**: call [`blueprint_auth::authorize`] with the allowed roles
/// 2. **Validate**: call `command.validate()` (all failing fields reported together)
/// 3. **Load or create**: find by external id (`NotFound`), or build through a
///    factory that resolves references (`RelatedResourceUnresolved`)
/// 4. **Mutate**: invoke exactly one mutation on the aggregate
/// 5. **Save**: persist unconditionally on success
/// 6. **Publish** (optional): emit an integration event
///
/// There are no retries and no coordination between handlers.
pub trait CommandHandler<C: Command> {
    type Output;

    fn handle(&self, principal: &Principal, command: C) -> DomainResult<Self::Output>;
}

/// Read-only counterpart of [`CommandHandler`].
///
/// Queries never mutate state; identical stored state yields identical results.
pub trait QueryHandler<Q> {
    type Output;

    fn handle(&self, principal: &Principal, query: Q) -> DomainResult<Self::Output>;
}

/// Run a command handler inside a tracing span and log the outcome.
///
/// This is the entry point HTTP routes and integration workers use; handlers stay
/// free of logging boilerplate.
pub fn execute<C, H>(handler: &H, principal: &Principal, command: C) -> DomainResult<H::Output>
where
    C: Command,
    H: CommandHandler<C> + ?Sized,
{
    let command_type = command.command_type();
    let span = info_span!("command", command = command_type, username = %principal.username());
    let _guard = span.enter();

    match handler.handle(principal, command) {
        Ok(output) => {
            info!(command = command_type, "command handled");
            Ok(output)
        }
        Err(err) => {
            warn!(command = command_type, error = %err, kind = err.code(), "command rejected");
            Err(err)
        }
    }
}

/// Run a query handler (no logging on success; queries are frequent and side-effect free).
pub fn query<Q, H>(handler: &H, principal: &Principal, query: Q) -> DomainResult<H::Output>
where
    H: QueryHandler<Q> + ?Sized,
{
    handler.handle(principal, query).inspect_err(|err| {
        warn!(error = %err, kind = err.code(), "query failed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_auth::{Role, authorize};
    use blueprint_core::{DomainError, Violations};
    use std::cell::Cell;

    #[derive(Debug, Clone)]
    struct Rename {
        name: String,
    }

    impl Command for Rename {
        fn command_type(&self) -> &'static str {
            "test.rename"
        }

        fn validate(&self) -> DomainResult<()> {
            let mut v = Violations::new();
            v.not_blank("name", &self.name);
            v.finish()
        }
    }

    #[derive(Default)]
    struct RenameHandler {
        calls: Cell<u32>,
    }

    impl CommandHandler<Rename> for RenameHandler {
        type Output = String;

        fn handle(&self, principal: &Principal, command: Rename) -> DomainResult<String> {
            authorize(principal, &[Role::Teacher])?;
            command.validate()?;
            self.calls.set(self.calls.get() + 1);
            Ok(command.name.to_uppercase())
        }
    }

    #[test]
    fn execute_returns_handler_output() {
        let handler = RenameHandler::default();
        let out = execute(
            &handler,
            &Principal::new("t", Role::Teacher),
            Rename { name: "cs101".into() },
        )
        .unwrap();
        assert_eq!(out, "CS101");
        assert_eq!(handler.calls.get(), 1);
    }

    #[test]
    fn authorization_runs_before_validation() {
        let handler = RenameHandler::default();
        let err = execute(
            &handler,
            &Principal::new("s", Role::Student),
            Rename { name: "".into() },
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::AccessDenied(_)));
        assert_eq!(handler.calls.get(), 0);
    }

    #[test]
    fn validation_failure_names_the_field() {
        let handler = RenameHandler::default();
        let err = execute(
            &handler,
            &Principal::new("t", Role::Teacher),
            Rename { name: " ".into() },
        )
        .unwrap_err();
        assert_eq!(err.violations()[0].field, "name");
    }
}
