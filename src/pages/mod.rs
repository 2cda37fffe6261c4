//! Portal Pages
//!
//! One module per screen. Every list screen follows the same shape: filter
//! signals → `use_debounced` → `use_paginated_list`, with mutations going
//! through a `MutationDispatcher` that refetches on success.

pub mod admin;
pub mod public;
pub mod student;

use std::future::Future;

use leptos::task::spawn_local;
use leptos_listkit::{
    Changes, EditBuffer, Editable, FetchOutcome, FieldValue, ListController, MutationDispatcher,
    MutationOutcome, NoChanges,
};

use crate::api::ApiMessage;
use crate::context::AppContext;
use crate::error::AppResult;

/// Surfaces failed list fetches as toasts
pub(crate) fn fetch_reporter(ctx: AppContext) -> impl Fn(FetchOutcome) + Clone + 'static {
    move |outcome| {
        if let FetchOutcome::Failed(message) = outcome {
            ctx.toaster.error(message);
        }
    }
}

/// Text for a finished mutation, preferring the server's own success message
pub(crate) fn outcome_notice(outcome: &MutationOutcome<ApiMessage>) -> String {
    match outcome {
        MutationOutcome::Done { value, message } => value
            .message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| message.clone()),
        other => other.notice(),
    }
}

/// Toast a finished mutation; true when it went through
pub(crate) fn announce(ctx: AppContext, outcome: &MutationOutcome<ApiMessage>) -> bool {
    let text = outcome_notice(outcome);
    if outcome.is_done() {
        ctx.toaster.success(text);
        true
    } else {
        ctx.toaster.error(text);
        false
    }
}

/// Apply form values to a snapshot of `original` and keep what changed
pub(crate) fn edited_fields<E: Editable>(
    original: &E,
    edits: Vec<(&'static str, FieldValue)>,
) -> Result<Changes, NoChanges> {
    let mut buffer = EditBuffer::new(original);
    for (field, value) in edits {
        buffer.set(field, value);
    }
    buffer.diff()
}

/// Flip a record's active flag and refresh the list
pub(crate) fn flip_status<F, R, Fut>(
    ctx: AppContext,
    list: ListController<F, R>,
    send: impl FnOnce() -> Fut + 'static,
) where
    F: Clone + PartialEq + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    Fut: Future<Output = AppResult<ApiMessage>> + 'static,
{
    spawn_local(async move {
        let outcome = MutationDispatcher::new("Status updated")
            .send((), |_| send(), || list.refetch())
            .await;
        announce(ctx, &outcome);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Course;

    fn course() -> Course {
        Course {
            id: "c1".into(),
            course_name: "B.Sc".into(),
            is_active: true,
        }
    }

    #[test]
    fn test_unchanged_form_has_nothing_to_send() {
        let edits = vec![("courseName", FieldValue::text("B.Sc"))];
        assert_eq!(edited_fields(&course(), edits), Err(NoChanges));
    }

    #[test]
    fn test_changed_field_is_sent() {
        let edits = vec![("courseName", FieldValue::text("B.Sc (Hons)"))];
        let changes = edited_fields(&course(), edits).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get("courseName"), Some(&FieldValue::text("B.Sc (Hons)")));
    }

    #[test]
    fn test_server_success_message_preferred() {
        let outcome = MutationOutcome::Done {
            value: ApiMessage {
                message: Some("Course updated".into()),
            },
            message: "Saved".into(),
        };
        assert_eq!(outcome_notice(&outcome), "Course updated");

        let silent = MutationOutcome::Done {
            value: ApiMessage::default(),
            message: "Saved".into(),
        };
        assert_eq!(outcome_notice(&silent), "Saved");
    }
}
