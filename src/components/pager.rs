use leptos::prelude::*;

#[component]
pub fn Pager(
    /// 1-based page currently shown.
    current: u32,
    /// Total number of pages.
    total: u32,
    /// Invoked with the page the user wants to see.
    on_page: Callback<u32>,
) -> impl IntoView {
    let previous = current.saturating_sub(1).max(1);
    let next = current.saturating_add(1).min(total);
    let at_first = current <= 1;
    let at_last = current >= total;

    view! {
        <div class="pager">
            <button
                class="btn btn-small btn-secondary"
                disabled=at_first
                on:click=move |_| on_page.run(previous)
            >
                "Previous"
            </button>
            <span class="pager-status">{format!("Page {} of {}", current, total)}</span>
            <button
                class="btn btn-small btn-secondary"
                disabled=at_last
                on:click=move |_| on_page.run(next)
            >
                "Next"
            </button>
        </div>
    }
}
