//! Flashcards Page (student)
//!
//! Question/answer cards written in markdown. Answers stay hidden until the
//! card is flipped.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listkit::{use_debounced, use_paginated_list, FieldValue, ListController, MutationDispatcher};

use crate::api::{FlashcardFilter, NewFlashcard, StatusFilter};
use crate::components::{
    OptionSelect, PaginationBar, ResetButton, StatusSelect, StatusToggleButton, TextArea, TextField,
};
use crate::context::use_app;
use crate::markdown::{render_inline, render_notes};
use crate::models::Flashcard;
use crate::pages::{announce, edited_fields, fetch_reporter, flip_status};
use crate::store::{subject_options, use_catalog};

/// Form values as diff entries; a blank subject clears it
fn flashcard_edits(question: &str, answer: &str, subject: &str) -> Vec<(&'static str, FieldValue)> {
    let subject = match subject.trim() {
        "" => FieldValue::Empty,
        id => FieldValue::text(id),
    };
    vec![
        ("question", FieldValue::text(question.trim())),
        ("answer", FieldValue::text(answer)),
        ("subject", subject),
    ]
}

#[component]
fn FlashcardTile(
    card: Flashcard,
    list: ListController<FlashcardFilter, Flashcard>,
    on_edit: Callback<Flashcard>,
) -> impl IntoView {
    let ctx = use_app();
    let revealed = RwSignal::new(false);
    let question_html = render_inline(&card.question);
    let answer_html = render_notes(&card.answer);
    let subject = card.subject.as_ref().map(|s| s.subject_name.clone());
    let id = card.id.clone();
    let active = card.is_active;

    view! {
        <article class="flashcard" class:revealed=move || revealed.get()>
            <div class="flashcard-question" inner_html=question_html></div>
            {subject.map(|name| view! { <span class="chip">{name}</span> })}
            <Show
                when=move || revealed.get()
                fallback=move || view! {
                    <button class="secondary" on:click=move |_| revealed.set(true)>"Show answer"</button>
                }
            >
                <div class="flashcard-answer notes" inner_html=answer_html.clone()></div>
                <button class="secondary" on:click=move |_| revealed.set(false)>"Hide"</button>
            </Show>
            <div class="flashcard-actions">
                <StatusToggleButton
                    active=active
                    on_confirm=move |_| {
                        let id = id.clone();
                        let api = ctx.api();
                        flip_status(ctx, list, move || async move {
                            api.set_flashcard_status(&id, !active).await
                        });
                    }
                />
                <button class="edit-btn" on:click=move |_| on_edit.run(card.clone())>"Edit"</button>
            </div>
        </article>
    }
}

#[component]
pub fn FlashcardsPage() -> impl IntoView {
    let ctx = use_app();
    let catalog = use_catalog();
    let config = ctx.config();
    let subjects = subject_options(catalog, Signal::stored(String::new()));

    let question_filter = RwSignal::new(String::new());
    let subject_filter = RwSignal::new(String::new());
    let status_filter = RwSignal::new(StatusFilter::All);
    let raw = Signal::derive(move || FlashcardFilter {
        question: question_filter.get(),
        subject: subject_filter.get(),
        status: status_filter.get(),
    });
    let settled = use_debounced(raw, config.filter_debounce);
    let list = use_paginated_list(
        ctx.api().flashcards(),
        settled.into(),
        config.default_page_size,
        fetch_reporter(ctx),
    );

    let editing = RwSignal::new(None::<Flashcard>);
    let question = RwSignal::new(String::new());
    let answer = RwSignal::new(String::new());
    let subject = RwSignal::new(String::new());
    let reset_form = move || {
        editing.set(None);
        question.set(String::new());
        answer.set(String::new());
        subject.set(String::new());
    };
    let start_edit = Callback::new(move |card: Flashcard| {
        question.set(card.question.clone());
        answer.set(card.answer.clone());
        subject.set(card.subject.as_ref().map(|s| s.id.clone()).unwrap_or_default());
        editing.set(Some(card));
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = ctx.api();
        let (q, a, s) = (question.get_untracked(), answer.get_untracked(), subject.get_untracked());
        let original = editing.get_untracked();
        spawn_local(async move {
            let outcome = match original {
                None => {
                    let card = NewFlashcard {
                        question: q.trim().to_string(),
                        answer: a,
                        subject: Some(s).filter(|s| !s.is_empty()),
                    };
                    MutationDispatcher::new("Flashcard created")
                        .submit(
                            card,
                            |c| async move { api.create_flashcard(c).await },
                            || list.refetch(),
                        )
                        .await
                }
                Some(original) => {
                    if q.trim().is_empty() || a.trim().is_empty() {
                        return ctx.toaster.error("Question and answer are required");
                    }
                    let changes = match edited_fields(&original, flashcard_edits(&q, &a, &s)) {
                        Ok(changes) => changes,
                        Err(none) => return ctx.toaster.info(none.to_string()),
                    };
                    MutationDispatcher::new("Flashcard updated")
                        .send(
                            changes,
                            |c| async move { api.update_flashcard(&original.id, c).await },
                            || list.refetch(),
                        )
                        .await
                }
            };
            if announce(ctx, &outcome) {
                reset_form();
            }
        });
    };

    view! {
        <section class="page flashcards-page">
            <h2>"Flashcards"</h2>

            <div class="filter-bar">
                <TextField value=question_filter placeholder="Search questions..." />
                <OptionSelect value=subject_filter options=subjects placeholder="All subjects" />
                <StatusSelect value=status_filter />
                <ResetButton on_reset=move |_| {
                    question_filter.set(String::new());
                    subject_filter.set(String::new());
                    status_filter.set(StatusFilter::All);
                } />
            </div>

            <form class="entity-form flashcard-form" on:submit=submit>
                <TextField value=question placeholder="Question" />
                <TextArea value=answer placeholder="Answer (markdown, code blocks welcome)" />
                <OptionSelect value=subject options=subjects placeholder="No subject" />
                <button type="submit" class="primary">
                    {move || if editing.with(|e| e.is_some()) { "Save" } else { "Add card" }}
                </button>
                <Show when=move || editing.with(|e| e.is_some())>
                    <button type="button" class="cancel-btn" on:click=move |_| reset_form()>
                        "Cancel"
                    </button>
                </Show>
            </form>

            <div class="flashcard-grid">
                {move || {
                    list.items()
                        .into_iter()
                        .map(|card| view! { <FlashcardTile card=card list=list on_edit=start_edit /> })
                        .collect_view()
                }}
            </div>
            <Show when=move || list.state.with(|s| s.is_settled_empty())>
                <p class="empty">{move || list.state.with(|s| s.notice_or("No flashcards yet."))}</p>
            </Show>

            <PaginationBar controller=list />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubjectRef;
    use leptos_listkit::NoChanges;

    fn card() -> Flashcard {
        Flashcard {
            id: "f1".into(),
            question: "Define entropy".into(),
            answer: "A measure of disorder".into(),
            subject: Some(SubjectRef { id: "s1".into(), subject_name: "Physics".into() }),
            is_active: true,
        }
    }

    #[test]
    fn test_untouched_card_sends_nothing() {
        let edits = flashcard_edits(" Define entropy ", "A measure of disorder", "s1");
        assert_eq!(edited_fields(&card(), edits), Err(NoChanges));
    }

    #[test]
    fn test_clearing_subject_is_a_change() {
        let changes = edited_fields(&card(), flashcard_edits("Define entropy", "A measure of disorder", "")).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get("subject"), Some(&FieldValue::Empty));
    }
}
