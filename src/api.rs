use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::BrowserError;

// -- Wire records matching the question server --

/// A question as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Body of `GET /questions/{company}`.
///
/// Servers either send a bare array or a paged object; both decode here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QuestionListing {
    Paged {
        questions: Vec<Question>,
        total_pages: u32,
        current_page: u32,
    },
    Plain(Vec<Question>),
}

/// One page of questions, normalized from either listing shape.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl QuestionListing {
    pub fn into_page(self) -> QuestionPage {
        match self {
            QuestionListing::Plain(questions) => QuestionPage {
                questions,
                current_page: 1,
                total_pages: 1,
            },
            QuestionListing::Paged {
                questions,
                total_pages,
                current_page,
            } => QuestionPage {
                questions,
                current_page: current_page.max(1),
                total_pages: total_pages.max(1),
            },
        }
    }
}

/// Query string for the listing endpoint. Empty filters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    /// Comma-separated; the server keeps questions carrying every tag.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,
    /// Comma-separated; the server keeps questions matching any of them.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendRequest {
    pub completed_ids: Vec<i64>,
}

/// Body of `POST /recommend`. Either `message` or `name` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RecommendationResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

// -- Transport seam --

/// The question server as seen by the browser.
///
/// Futures are not `Send`; everything runs on the browser's event loop.
#[async_trait(?Send)]
pub trait QuestionApi {
    /// Fetch the questions for `company` matching `query`.
    async fn list_questions(
        &self,
        company: &str,
        query: &ListQuery,
    ) -> Result<QuestionListing, BrowserError>;

    /// Ask for the next question given the ids already completed.
    async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<RecommendationResult, BrowserError>;
}

// -- HTTP implementation --

#[derive(Debug, Clone)]
pub struct HttpQuestionApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpQuestionApi {
    /// `base_url` must be absolute, e.g. `https://example.com` (no trailing slash needed).
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn questions_url(&self, company: &str) -> String {
        format!("{}/questions/{}", self.base_url, company)
    }

    fn recommend_url(&self) -> String {
        format!("{}/recommend", self.base_url)
    }
}

#[async_trait(?Send)]
impl QuestionApi for HttpQuestionApi {
    async fn list_questions(
        &self,
        company: &str,
        query: &ListQuery,
    ) -> Result<QuestionListing, BrowserError> {
        let url = self.questions_url(company);
        debug!("Fetching questions: {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| {
                warn!("Question listing failed for {}: {}", company, e);
                BrowserError::from(e)
            })?;

        Ok(response.json::<QuestionListing>().await?)
    }

    async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<RecommendationResult, BrowserError> {
        let url = self.recommend_url();
        debug!(
            "Requesting recommendation with {} completed ids",
            request.completed_ids.len()
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| {
                warn!("Recommendation request failed: {}", e);
                BrowserError::from(e)
            })?;

        Ok(response.json::<RecommendationResult>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_plain_listing_is_single_page() {
        let listing: QuestionListing =
            serde_json::from_str(r#"[{"id": 1, "name": "Two Sum"}]"#).unwrap();
        let page = listing.into_page();
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.questions.len(), 1);
        assert_eq!(page.questions[0].name, "Two Sum");
        assert!(page.questions[0].difficulty.is_none());
        assert!(page.questions[0].tags.is_empty());
    }

    #[test]
    fn test_paged_listing_keeps_page_info() {
        let raw = r#"{
            "questions": [
                {"id": 7, "name": "Reverse Integer", "difficulty": "Medium", "tags": ["Math"], "url": "ignored"}
            ],
            "total_pages": 3,
            "current_page": 2
        }"#;
        let page = serde_json::from_str::<QuestionListing>(raw)
            .unwrap()
            .into_page();
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.questions[0].difficulty.as_deref(), Some("Medium"));
        assert_eq!(page.questions[0].tags, vec!["Math".to_string()]);
    }

    #[test]
    fn test_paged_listing_with_zero_pages_clamps_to_one() {
        let raw = r#"{"questions": [], "total_pages": 0, "current_page": 1}"#;
        let page = serde_json::from_str::<QuestionListing>(raw)
            .unwrap()
            .into_page();
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_recommend_request_wire_shape() {
        let body = serde_json::to_value(RecommendRequest {
            completed_ids: vec![1, 2],
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"completed_ids": [1, 2]}));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpQuestionApi::new("http://localhost:5000/");
        assert_eq!(api.base_url(), "http://localhost:5000");
        assert_eq!(api.recommend_url(), "http://localhost:5000/recommend");
        assert_eq!(
            api.questions_url("acme"),
            "http://localhost:5000/questions/acme"
        );
    }

    #[tokio::test]
    async fn test_list_questions_over_http() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/questions/acme"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"id": 1, "name": "Two Sum"}])),
            )
            .mount(&server)
            .await;

        let api = HttpQuestionApi::new(&server.uri());
        let listing = api.list_questions("acme", &ListQuery::default()).await.unwrap();
        assert_eq!(
            listing,
            QuestionListing::Plain(vec![Question {
                id: 1,
                name: "Two Sum".to_string(),
                difficulty: None,
                tags: vec![],
            }])
        );
    }

    #[tokio::test]
    async fn test_list_questions_sends_page_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/questions/acme"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "questions": [{"id": 21, "name": "Merge Intervals"}],
                "total_pages": 2,
                "current_page": 2
            })))
            .mount(&server)
            .await;

        let api = HttpQuestionApi::new(&server.uri());
        let page = api
            .list_questions(
                "acme",
                &ListQuery {
                    page: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .into_page();
        assert_eq!(page.current_page, 2);
        assert_eq!(page.questions[0].id, 21);
    }

    #[tokio::test]
    async fn test_list_questions_sends_filter_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/questions/acme"))
            .and(query_param("search", "sum"))
            .and(query_param("tag", "Array,Hash Table"))
            .and(query_param("difficulty", "Easy"))
            .and(query_param_is_missing("page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "questions": [{"id": 1, "name": "Two Sum", "difficulty": "Easy", "tags": ["Array", "Hash Table"]}],
                "total_pages": 1,
                "current_page": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpQuestionApi::new(&server.uri());
        let query = ListQuery {
            page: None,
            search: "sum".to_string(),
            tag: "Array,Hash Table".to_string(),
            difficulty: "Easy".to_string(),
        };
        let page = api.list_questions("acme", &query).await.unwrap().into_page();
        assert_eq!(page.questions.len(), 1);
        assert_eq!(page.questions[0].id, 1);
    }

    #[tokio::test]
    async fn test_list_questions_omits_empty_filters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/questions/acme"))
            .and(query_param_is_missing("search"))
            .and(query_param_is_missing("tag"))
            .and(query_param_is_missing("difficulty"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpQuestionApi::new(&server.uri());
        let page = api
            .list_questions("acme", &ListQuery::default())
            .await
            .unwrap()
            .into_page();
        assert!(page.questions.is_empty());
    }

    #[tokio::test]
    async fn test_list_questions_server_error_is_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/questions/acme"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = HttpQuestionApi::new(&server.uri());
        let err = api.list_questions("acme", &ListQuery::default()).await.unwrap_err();
        match err {
            BrowserError::Status { status, url } => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/questions/acme"), "unexpected url: {}", url);
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_questions_bad_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/questions/acme"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let api = HttpQuestionApi::new(&server.uri());
        let err = api.list_questions("acme", &ListQuery::default()).await.unwrap_err();
        assert!(
            matches!(err, BrowserError::Decode(_)),
            "Expected Decode error, got {:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_recommend_posts_completed_ids() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/recommend"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"completed_ids": [1, 2]})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"name": "Binary Search"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpQuestionApi::new(&server.uri());
        let result = api
            .recommend(&RecommendRequest {
                completed_ids: vec![1, 2],
            })
            .await
            .unwrap();
        assert_eq!(result.name.as_deref(), Some("Binary Search"));
        assert!(result.message.is_none());
    }

    #[tokio::test]
    async fn test_recommend_unreachable_server_is_network_error() {
        let api = HttpQuestionApi::new("http://127.0.0.1:9");
        let err = api
            .recommend(&RecommendRequest {
                completed_ids: vec![],
            })
            .await
            .unwrap_err();
        assert!(
            matches!(err, BrowserError::Network(_)),
            "Expected Network error, got {:?}",
            err
        );
    }
}
