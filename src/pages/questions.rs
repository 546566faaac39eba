use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::app::BrowserContext;
use crate::components::pager::Pager;
use crate::components::question_item::QuestionItem;
use crate::config::Config;
use crate::session::ListFilters;

/// Pause after the last keystroke before filters are sent to the server.
const FILTER_DEBOUNCE_MS: i32 = 300;

const DIFFICULTIES: [&str; 3] = ["Easy", "Medium", "Hard"];

/// Show `message` in a blocking browser alert.
fn notify(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(message) {
            warn!("Failed to show notification: {:?}", e);
        }
    }
}

#[component]
pub fn QuestionsPage() -> impl IntoView {
    let config = expect_context::<Config>();
    let ctx = expect_context::<BrowserContext>();
    let browser = ctx.browser;
    let session = ctx.session();

    let (loading, set_loading) = signal(false);
    let (recommending, set_recommending) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);

    let params = use_params_map();
    let default_company = config.default_company.clone();
    let company = Memo::new(move |_| {
        params
            .with(|p| p.get("company"))
            .unwrap_or_else(|| default_company.clone())
    });

    // Narrow views of the session so a checkbox toggle only re-renders what reads progress
    let visible = Memo::new(move |_| session.with(|s| s.visible_entries()));
    let is_loaded = Memo::new(move |_| session.with(|s| s.is_loaded()));
    let page_info = Memo::new(move |_| session.with(|s| s.page_info()));
    let filters = Memo::new(move |_| session.with(|s| s.filters().clone()));
    let completed_count = Memo::new(move |_| session.with(|s| s.completed().len()));
    let list_source = Memo::new(move |_| {
        session.with(|s| {
            s.company()
                .map(|c| format!("Showing {} questions from {}", s.entries().len(), c))
        })
    });

    let load = move |company: String, page: Option<u32>| {
        set_loading.set(true);
        set_error.set(None);
        let browser = browser.get_value();
        spawn_local(async move {
            let loaded = match page {
                Some(page) => browser.load_page(&company, Some(page)).await,
                None => browser.load_questions(&company).await,
            };
            if let Err(e) = loaded {
                set_error.set(Some(format!(
                    "Could not load questions for {}: {}",
                    company, e
                )));
            }
            set_loading.set(false);
        });
    };

    // Reload whenever the selected company changes
    Effect::new(move |_| {
        load(company.get(), None);
    });

    let on_page = Callback::new(move |page: u32| {
        load(company.get_untracked(), Some(page));
    });

    let apply_filters = move || {
        let company = company.get_untracked();
        let filters = session.with_untracked(|s| s.filters().clone());
        set_loading.set(true);
        set_error.set(None);
        let browser = browser.get_value();
        spawn_local(async move {
            if let Err(e) = browser.apply_filters(&company, filters).await {
                set_error.set(Some(format!(
                    "Could not filter questions for {}: {}",
                    company, e
                )));
            }
            set_loading.set(false);
        });
    };

    // Debounced server-side filtering; the loaded page is filtered locally meanwhile
    let filter_timeout = StoredValue::new(None::<i32>);

    let schedule_filter_reload = move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(id) = filter_timeout.get_value() {
            window.clear_timeout_with_handle(id);
        }

        let callback = wasm_bindgen::closure::Closure::once(move || {
            filter_timeout.set_value(None);
            apply_filters();
        });
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            FILTER_DEBOUNCE_MS,
        ) {
            Ok(id) => filter_timeout.set_value(Some(id)),
            Err(e) => warn!("Failed to schedule filter reload: {:?}", e),
        }
        callback.forget();
    };

    let update_filters = move |next: ListFilters| {
        session.update(|s| s.set_filters(next));
        schedule_filter_reload();
    };

    let on_search = move |ev: leptos::ev::Event| {
        let query = event_target_value(&ev);
        session.update(|s| s.set_filter(&query));
        schedule_filter_reload();
    };

    let on_tag = move |ev: leptos::ev::Event| {
        let mut next = filters.get_untracked();
        next.tag = event_target_value(&ev);
        update_filters(next);
    };

    let on_difficulty = move |ev: leptos::ev::Event| {
        let mut next = filters.get_untracked();
        next.difficulty = event_target_value(&ev);
        update_filters(next);
    };

    let on_toggle = Callback::new(move |id: i64| {
        browser.with_value(|b| {
            if let Err(e) = b.toggle_completion(id) {
                set_error.set(Some(e.to_string()));
            }
        });
    });

    let get_random_question = move |_| {
        set_recommending.set(true);
        set_error.set(None);
        let browser = browser.get_value();
        spawn_local(async move {
            match browser.get_random_question().await {
                Ok(recommendation) => {
                    let text = recommendation.notification_text();
                    notify(&text);
                    set_notice.set(Some(text));
                }
                Err(e) => {
                    set_error.set(Some(format!("Could not get a recommendation: {}", e)));
                }
            }
            set_recommending.set(false);
        });
    };

    let reset_progress = move |_| {
        browser.with_value(|b| match b.reset_progress() {
            Ok(()) => set_notice.set(None),
            Err(e) => set_error.set(Some(e.to_string())),
        });
    };

    view! {
        <div class="page questions-page">
            <h2>{move || company.get()}</h2>
            <p class="page-description">
                "Mark the questions you have solved, then ask for the next one to try."
            </p>

            <div class="toolbar">
                <input
                    type="search"
                    class="input question-filter"
                    placeholder="Filter by name or number..."
                    prop:value=move || filters.get().search
                    on:input=on_search
                />
                <input
                    type="text"
                    class="input tag-filter"
                    placeholder="Tags, comma separated"
                    prop:value=move || filters.get().tag
                    on:input=on_tag
                />
                <select
                    class="input difficulty-filter"
                    prop:value=move || filters.get().difficulty
                    on:change=on_difficulty
                >
                    <option value="">"Any difficulty"</option>
                    {DIFFICULTIES
                        .iter()
                        .map(|d| view! { <option value=*d>{*d}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </div>

            <div class="toolbar">
                <button
                    class="btn btn-primary"
                    on:click=get_random_question
                    disabled=move || recommending.get()
                >
                    {move || if recommending.get() { "Asking..." } else { "Recommend Next Question" }}
                </button>
                <button class="btn btn-secondary" on:click=reset_progress>
                    "Reset Progress"
                </button>
            </div>

            <p class="progress-summary">
                {move || match completed_count.get() {
                    0 => "Nothing completed yet this session".to_string(),
                    n => format!("{} completed this session", n),
                }}
            </p>

            {move || {
                error.get().map(|e| {
                    view! {
                        <div class="question-error">
                            <span class="status-text status-error">{e}</span>
                        </div>
                    }
                })
            }}

            {move || {
                notice.get().map(|n| {
                    view! { <div class="question-notice">{n}</div> }
                })
            }}

            <div id="question-list" class="question-list">
                {move || {
                    if loading.get() && !is_loaded.get() {
                        return view! { <p class="question-loading">"Loading questions..."</p> }.into_any();
                    }
                    let entries = visible.get();
                    if entries.is_empty() {
                        let text = if is_loaded.get() {
                            "No questions to show."
                        } else {
                            "No questions loaded yet."
                        };
                        view! { <p class="question-empty">{text}</p> }.into_any()
                    } else {
                        view! {
                            <div class="question-rows">
                                {entries
                                    .into_iter()
                                    .map(|entry| view! { <QuestionItem entry=entry session=session on_toggle=on_toggle /> })
                                    .collect::<Vec<_>>()}
                            </div>
                        }
                        .into_any()
                    }
                }}
            </div>

            {move || {
                page_info
                    .get()
                    .filter(|&(_, total)| total > 1)
                    .map(|(current, total)| view! { <Pager current=current total=total on_page=on_page /> })
            }}

            {move || list_source.get().map(|text| view! { <p class="list-source">{text}</p> })}
        </div>
    }
}
