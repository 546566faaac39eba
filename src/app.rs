use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos_router::components::*;
use leptos_router::path;
use tracing::info;

use crate::api::HttpQuestionApi;
use crate::browser::QuestionBrowser;
use crate::components::company_nav::CompanyNav;
use crate::config::Config;
use crate::pages::questions::QuestionsPage;
use crate::session::Session;

pub type PageBrowser = QuestionBrowser<HttpQuestionApi, RwSignal<Session>>;

/// The browser shared by every route, so progress survives navigation.
#[derive(Clone, Copy)]
pub struct BrowserContext {
    pub browser: StoredValue<PageBrowser, LocalStorage>,
}

impl BrowserContext {
    pub fn session(&self) -> RwSignal<Session> {
        self.browser.with_value(|b| *b.session())
    }
}

#[component]
pub fn App(config: Config) -> impl IntoView {
    let api = HttpQuestionApi::new(&config.api_base);
    info!("Question server: {}", api.base_url());

    let session = RwSignal::new(Session::new());
    let browser = StoredValue::new_local(QuestionBrowser::new(
        api,
        session,
        config.problem_base.clone(),
    ));
    provide_context(BrowserContext { browser });

    let companies = config.companies.clone();
    provide_context(config);

    view! {
        <Router>
            <div class="app-layout">
                <style>{include_str!("app.css")}</style>
                <CompanyNav companies=companies />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=QuestionsPage />
                        <Route path=path!("/company/:company") view=QuestionsPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
