use leptos::prelude::*;

/// Route for a company's question list.
pub fn company_path(company: &str) -> String {
    format!("/company/{}", company)
}

#[component]
pub fn CompanyNav(
    /// Companies offered in the navigation, in display order.
    companies: Vec<String>,
) -> impl IntoView {
    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <h1 class="sidebar-title">"Question Browser"</h1>
                <p class="sidebar-subtitle">"Interview practice by company"</p>
            </div>
            <ul class="nav-list">
                {companies
                    .into_iter()
                    .map(|company| {
                        let href = company_path(&company);
                        view! {
                            <li class="nav-item">
                                <a href=href class="nav-link">{company}</a>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()}
            </ul>
        </nav>
    }
}
