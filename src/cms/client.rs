//! Content service REST client.
//!
//! Sync HTTP client for the hosted content service. The two read
//! operations are behind the [`DocumentService`] trait so the generator,
//! listing session and dev server can be driven by a fake in tests.

use std::time::Duration;

use ureq::Agent;

use super::error::CmsError;
use super::types::{QueryResponse, RawDocument};

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Read operations offered by the content service.
pub trait DocumentService: Send + Sync {
    /// Query documents of a type, restricted to the given data fields.
    ///
    /// When `cursor` is present it is an opaque next-page URL from a
    /// previous response and is fetched verbatim; the type and field
    /// arguments are ignored in that case because the cursor already
    /// encodes the query.
    fn query_by_type(
        &self,
        doc_type: &str,
        fields: &[&str],
        cursor: Option<&str>,
    ) -> Result<QueryResponse, CmsError>;

    /// Fetch a single document by its unique identifier.
    fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<RawDocument, CmsError>;
}

/// HTTP implementation of [`DocumentService`].
pub struct HttpDocumentService {
    agent: Agent,
    api_url: String,
    page_size: usize,
}

impl HttpDocumentService {
    /// Create a client for the given search endpoint.
    pub fn new(api_url: &str, page_size: usize) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            api_url: api_url.trim_end_matches('/').to_owned(),
            page_size,
        }
    }

    /// Run a GET request and decode the JSON body, mapping error statuses.
    fn fetch_json(
        &self,
        builder: ureq::RequestBuilder<ureq::typestate::WithoutBody>,
    ) -> Result<QueryResponse, CmsError> {
        let response = builder.header("Accept", "application/json").call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(CmsError::HttpResponse {
                status,
                body: error_body,
            });
        }

        Ok(body_reader.read_json()?)
    }
}

impl DocumentService for HttpDocumentService {
    fn query_by_type(
        &self,
        doc_type: &str,
        fields: &[&str],
        cursor: Option<&str>,
    ) -> Result<QueryResponse, CmsError> {
        let builder = match cursor {
            // The cursor is a complete URL handed back by the service.
            Some(url) => {
                tracing::debug!("Fetching next page: {}", url);
                self.agent.get(url)
            }
            None => {
                let predicate = format!(r#"[[at(document.type,"{}")]]"#, doc_type);
                tracing::debug!("Querying documents of type {}", doc_type);
                self.agent
                    .get(&self.api_url)
                    .query("q", &predicate)
                    .query("fetch", &fields.join(","))
                    .query("pageSize", &self.page_size.to_string())
            }
        };

        self.fetch_json(builder)
    }

    fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<RawDocument, CmsError> {
        let predicate = format!(r#"[[at(my.{}.uid,"{}")]]"#, doc_type, uid);
        tracing::debug!("Fetching document {} by uid {}", doc_type, uid);

        let builder = self
            .agent
            .get(&self.api_url)
            .query("q", &predicate)
            .query("pageSize", "1");

        let page = self.fetch_json(builder)?;
        page.results
            .into_iter()
            .next()
            .ok_or_else(|| CmsError::NotFound {
                uid: uid.to_owned(),
            })
    }
}
