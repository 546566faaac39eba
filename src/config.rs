use serde::Deserialize;

use crate::error::BrowserError;

/// Id of the `<script type="application/json">` element holding the config.
pub const CONFIG_ELEMENT_ID: &str = "question-browser-config";

pub const DEFAULT_PROBLEM_BASE: &str = "https://leetcode.com/problems";
pub const DEFAULT_COMPANY: &str = "All";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Page-level settings, embedded in `index.html`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin of the question server. Empty means the page's own origin.
    pub api_base: String,
    /// Prefix for external problem links.
    pub problem_base: String,
    pub companies: Vec<String>,
    pub default_company: String,
    /// `tracing_subscriber::EnvFilter` directives.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            problem_base: DEFAULT_PROBLEM_BASE.to_string(),
            companies: vec![DEFAULT_COMPANY.to_string()],
            default_company: DEFAULT_COMPANY.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self, BrowserError> {
        let mut config: Config = serde_json::from_str(raw)
            .map_err(|e| BrowserError::Config(format!("Invalid config JSON: {}", e)))?;
        config.normalize();
        Ok(config)
    }

    /// Read the config embedded in the current page and resolve the API origin.
    ///
    /// A page without a config element gets the defaults.
    pub fn load() -> Result<Self, BrowserError> {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        let config = match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw)?,
            _ => Self::default(),
        };
        Ok(config.with_origin(page_origin()))
    }

    /// Fill an empty `api_base` from the page origin.
    pub fn with_origin(mut self, origin: Option<String>) -> Self {
        if self.api_base.is_empty() {
            if let Some(origin) = origin {
                self.api_base = origin.trim_end_matches('/').to_string();
            }
        }
        self
    }

    fn normalize(&mut self) {
        self.api_base = self.api_base.trim().trim_end_matches('/').to_string();
        self.problem_base = self.problem_base.trim().trim_end_matches('/').to_string();
        if self.problem_base.is_empty() {
            self.problem_base = DEFAULT_PROBLEM_BASE.to_string();
        }
        self.companies.retain(|c| !c.trim().is_empty());
        if self.default_company.trim().is_empty() {
            self.default_company = DEFAULT_COMPANY.to_string();
        }
        if !self.companies.contains(&self.default_company) {
            self.companies.insert(0, self.default_company.clone());
        }
    }
}

/// The page's `location.origin`, e.g. `https://example.com`.
pub fn page_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}
