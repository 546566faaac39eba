use leptos::prelude::*;

use crate::components::difficulty_badge::DifficultyBadge;
use crate::session::{QuestionEntry, Session};

/// One question row: problem link plus completion checkbox.
///
/// The checkbox reflects the session, so clearing progress unchecks it.
#[component]
pub fn QuestionItem(
    entry: QuestionEntry,
    session: RwSignal<Session>,
    /// Invoked with the question id when the checkbox changes.
    on_toggle: Callback<i64>,
) -> impl IntoView {
    let id = entry.id;
    let tags = (!entry.tags.is_empty()).then(|| entry.tags.join(", "));

    view! {
        <div class="question-item">
            <a href=entry.href target="_blank" rel="noopener noreferrer">{entry.name}</a>
            {entry.difficulty.map(|d| view! { <DifficultyBadge difficulty=d /> })}
            {tags.map(|t| view! { <span class="question-tags">{t}</span> })}
            <input
                type="checkbox"
                class="checkbox"
                data-id=id.to_string()
                prop:checked=move || session.with(|s| s.is_completed(id))
                on:change=move |_| on_toggle.run(id)
            />
        </div>
    }
}
