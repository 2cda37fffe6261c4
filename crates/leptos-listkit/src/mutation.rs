//! Mutation Dispatcher
//!
//! Validate locally, send, then refetch the whole list on success. Invalid
//! payloads never reach the network.

use std::future::Future;

use thiserror::Error;

/// Message shown when the server gives no usable error text
pub const FALLBACK_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0}")]
    Invalid(String),
}

/// Local checks run before a payload is sent
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Fail on the first blank field, in the order given
pub fn require(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((label, _)) => Err(ValidationError::Missing(*label)),
        None => Ok(()),
    }
}

/// Errors that may carry a message written by the server
pub trait ServerMessage {
    fn server_message(&self) -> Option<String>;
}

impl ServerMessage for String {
    fn server_message(&self) -> Option<String> {
        (!self.trim().is_empty()).then(|| self.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T> {
    /// Sent and accepted; the list has been asked to refetch
    Done { value: T, message: String },
    /// Rejected locally, nothing was sent
    Invalid(ValidationError),
    /// Sent and rejected or lost; carries the text to show
    Failed(String),
}

impl<T> MutationOutcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, MutationOutcome::Done { .. })
    }

    /// The line to show in a notification
    pub fn notice(&self) -> String {
        match self {
            MutationOutcome::Done { message, .. } => message.clone(),
            MutationOutcome::Invalid(err) => err.to_string(),
            MutationOutcome::Failed(msg) => msg.clone(),
        }
    }
}

/// Submit-and-refresh for one kind of mutation on one screen
#[derive(Debug, Clone)]
pub struct MutationDispatcher {
    success: String,
    fallback: String,
}

impl MutationDispatcher {
    pub fn new(success: impl Into<String>) -> Self {
        Self {
            success: success.into(),
            fallback: FALLBACK_ERROR.to_string(),
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Validate `payload`, send it, and call `refetch` once it is accepted
    pub async fn submit<P, T, E, Fut>(
        &self,
        payload: P,
        send: impl FnOnce(P) -> Fut,
        refetch: impl FnOnce(),
    ) -> MutationOutcome<T>
    where
        P: Validate,
        E: ServerMessage + std::fmt::Display,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Err(err) = payload.validate() {
            log::debug!("[mutation] rejected locally: {}", err);
            return MutationOutcome::Invalid(err);
        }
        self.send(payload, send, refetch).await
    }

    /// Send without local validation (status flips and other fixed payloads)
    pub async fn send<P, T, E, Fut>(
        &self,
        payload: P,
        send: impl FnOnce(P) -> Fut,
        refetch: impl FnOnce(),
    ) -> MutationOutcome<T>
    where
        E: ServerMessage + std::fmt::Display,
        Fut: Future<Output = Result<T, E>>,
    {
        match send(payload).await {
            Ok(value) => {
                refetch();
                MutationOutcome::Done {
                    value,
                    message: self.success.clone(),
                }
            }
            Err(err) => {
                log::warn!("[mutation] failed: {}", err);
                MutationOutcome::Failed(err.server_message().unwrap_or_else(|| self.fallback.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::tests::{FakeSource, NameFilter};
    use crate::fetcher::{fetch_into, ListQuery};
    use crate::list_state::ListState;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    struct NewType {
        name: String,
    }

    impl Validate for NewType {
        fn validate(&self) -> Result<(), ValidationError> {
            require(&[("Type name", self.name.as_str())])
        }
    }

    #[test]
    fn test_require_reports_first_blank() {
        assert_eq!(require(&[("A", "x"), ("B", "  "), ("C", "")]), Err(ValidationError::Missing("B")));
        assert!(require(&[("A", "x")]).is_ok());
        assert_eq!(ValidationError::Missing("Course").to_string(), "Course is required");
    }

    #[test]
    fn test_invalid_payload_is_never_sent() {
        let sent = Cell::new(false);
        let refetched = Cell::new(false);
        let dispatcher = MutationDispatcher::new("Created");

        let outcome: MutationOutcome<()> = block_on(dispatcher.submit(
            NewType { name: " ".into() },
            |_| {
                sent.set(true);
                async { Ok::<(), String>(()) }
            },
            || refetched.set(true),
        ));

        assert_eq!(outcome, MutationOutcome::Invalid(ValidationError::Missing("Type name")));
        assert!(!sent.get());
        assert!(!refetched.get());
    }

    #[test]
    fn test_server_message_shown_verbatim() {
        let dispatcher = MutationDispatcher::new("Created");
        let outcome: MutationOutcome<()> = block_on(dispatcher.submit(
            NewType { name: "Notes".into() },
            |_| async { Err::<(), String>("Type already exists".into()) },
            || {},
        ));
        assert_eq!(outcome.notice(), "Type already exists");
    }

    #[test]
    fn test_fallback_when_server_silent() {
        let dispatcher = MutationDispatcher::new("Created").with_fallback("Could not save");
        let outcome: MutationOutcome<()> = block_on(dispatcher.submit(
            NewType { name: "Notes".into() },
            |_| async { Err::<(), String>(String::new()) },
            || {},
        ));
        assert_eq!(outcome, MutationOutcome::Failed("Could not save".into()));
    }

    #[test]
    fn test_successful_mutation_shows_up_after_refetch() {
        let source = FakeSource::new(&["Notes"]);
        let cell = RefCell::new(ListState::new(10));
        let query = ListQuery::new(NameFilter::default(), 10);
        block_on(fetch_into(&source, &query, &cell));
        assert_eq!(cell.borrow().items.len(), 1);

        let refetch_requested = Cell::new(false);
        let dispatcher = MutationDispatcher::new("Material type created");
        let outcome = block_on(dispatcher.submit(
            NewType { name: "Slides".into() },
            |p| {
                source.rows.borrow_mut().push(p.name.clone());
                async { Ok::<u32, String>(7) }
            },
            || refetch_requested.set(true),
        ));

        assert!(outcome.is_done());
        assert_eq!(outcome.notice(), "Material type created");
        assert!(refetch_requested.get());

        block_on(fetch_into(&source, &query, &cell));
        assert_eq!(cell.borrow().items, vec!["Notes".to_string(), "Slides".to_string()]);
    }
}
