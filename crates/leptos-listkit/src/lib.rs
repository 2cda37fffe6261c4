//! Leptos List Kit
//!
//! The workflow behind every list screen:
//! filter → debounce → paginate → fetch → mutate → refresh.
//!
//! The pure pieces (`DebounceGate`, `Pagination`, `ListState`, `EditBuffer`,
//! `MutationDispatcher`) carry the rules; `use_debounced` and
//! `use_paginated_list` wire them into Leptos signals.

mod controller;
mod debounce;
mod fetcher;
mod form_diff;
mod list_state;
mod mutation;
mod pagination;

pub use controller::{use_paginated_list, ListController};
pub use debounce::{use_debounced, DebounceGate, Ticket};
pub use fetcher::{fetch_into, query_pairs, ListQuery, ListSource, QueryParams, StateCell};
pub use form_diff::{Changes, EditBuffer, Editable, FieldValue, FileUpload, NoChanges};
pub use list_state::{FetchOutcome, FetchTicket, ListState};
pub use mutation::{require, MutationDispatcher, MutationOutcome, ServerMessage, Validate, ValidationError, FALLBACK_ERROR};
pub use pagination::{Page, Pagination, PAGE_SIZES};
