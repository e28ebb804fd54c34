//! `PubMed` search through the NCBI E-utilities `esearch` endpoint.
//!
//! Every request carries the contact email and `tool` name; the API key is
//! added only when the configuration enables it. A single page of up to
//! [`MAX_IDS_PER_PAGE`] identifiers is requested. Larger result sets keep
//! the true total in `count` but return a truncated identifier list.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::EntrezConfig;
use crate::user_agent::{TOOL_NAME, default_search_user_agent};

use super::http_client::build_search_http_client;
use super::{JournalSearch, SearchError, SearchQuery, SearchResult};

/// Default E-utilities base URL.
pub const DEFAULT_EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Largest identifier page `esearch` returns in one request.
pub const MAX_IDS_PER_PAGE: u32 = 100_000;

// ==================== esearch Response Types ====================

/// Top-level `esearch` JSON response.
#[derive(Debug, Deserialize)]
pub(crate) struct EsearchResponse {
    pub esearchresult: Option<EsearchResult>,
    /// Set instead of `esearchresult` for request-level failures (rate limit, bad key).
    pub error: Option<String>,
}

/// The `esearchresult` object.
#[derive(Debug, Deserialize)]
pub(crate) struct EsearchResult {
    pub count: Option<String>,
    #[serde(default)]
    pub idlist: Vec<String>,
    pub querytranslation: Option<String>,
    pub warninglist: Option<WarningList>,
    #[serde(rename = "ERROR")]
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WarningList {
    #[serde(default)]
    pub quotedphrasesnotfound: Vec<String>,
    #[serde(default)]
    pub phrasesignored: Vec<String>,
}

impl EsearchResult {
    /// False when the service flagged the quoted phrase as not found.
    fn quoted_phrase_found(&self) -> bool {
        self.warninglist
            .as_ref()
            .is_none_or(|warnings| warnings.quotedphrasesnotfound.is_empty())
    }
}

/// Converts a decoded response into a [`SearchResult`].
pub(crate) fn into_search_result(
    term: &str,
    response: EsearchResponse,
) -> Result<SearchResult, SearchError> {
    if let Some(message) = response.error {
        return Err(SearchError::Service {
            term: term.to_string(),
            message,
        });
    }
    let Some(result) = response.esearchresult else {
        return Err(SearchError::malformed(term, "missing `esearchresult` object"));
    };
    if let Some(message) = result.error.clone() {
        return Err(SearchError::Service {
            term: term.to_string(),
            message,
        });
    }

    let Some(raw_count) = result.count.as_deref() else {
        return Err(SearchError::malformed(term, "missing `count` field"));
    };
    let count = raw_count
        .trim()
        .parse::<u64>()
        .map_err(|_| SearchError::malformed(term, format!("non-integer count '{raw_count}'")))?;

    let quoted_phrase_found = result.quoted_phrase_found();
    if let Some(warnings) = &result.warninglist
        && !warnings.phrasesignored.is_empty()
    {
        debug!(ignored = ?warnings.phrasesignored, "Service ignored phrases");
    }

    Ok(SearchResult::new(
        term,
        count,
        result.idlist,
        quoted_phrase_found,
        result.querytranslation,
    ))
}

// ==================== EntrezClient ====================

/// `PubMed` search client bound to one contact email and optional API key.
#[derive(Clone)]
pub struct EntrezClient {
    client: Client,
    endpoint: Url,
    email: String,
    api_key: Option<String>,
}

impl EntrezClient {
    /// Creates a client for the public E-utilities service.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if HTTP client construction fails.
    pub fn new(config: &EntrezConfig) -> Result<Self, SearchError> {
        Self::with_base_url(config, DEFAULT_EUTILS_BASE_URL)
    }

    /// Creates a client against a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the base URL is invalid or HTTP client
    /// construction fails.
    pub fn with_base_url(config: &EntrezConfig, base_url: &str) -> Result<Self, SearchError> {
        let endpoint = format!("{}/esearch.fcgi", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint).map_err(|err| SearchError::Client {
            reason: format!("invalid E-utilities base URL '{base_url}': {err}"),
        })?;

        Ok(Self {
            client: build_search_http_client(default_search_user_agent())?,
            endpoint,
            email: config.email.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn request_url(&self, term: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("db", "pubmed")
                .append_pair("term", term)
                .append_pair("retmax", &MAX_IDS_PER_PAGE.to_string())
                .append_pair("retstart", "0")
                .append_pair("sort", "relevance")
                .append_pair("retmode", "json")
                .append_pair("tool", TOOL_NAME)
                .append_pair("email", &self.email);
            if let Some(api_key) = &self.api_key {
                pairs.append_pair("api_key", api_key);
            }
        }
        url
    }
}

impl std::fmt::Debug for EntrezClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntrezClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("email", &self.email)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl JournalSearch for EntrezClient {
    #[tracing::instrument(skip(self), fields(journal = %query.journal, year = query.year))]
    async fn search(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        let term = query.term();
        debug!(%term, "Retrieving PMIDs");

        let response = self
            .client
            .get(self.request_url(&term))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            debug!(status = status.as_u16(), "esearch returned an error status");
            return Err(SearchError::status(&term, status.as_u16(), &body));
        }

        let decoded: EsearchResponse = serde_json::from_str(&body)
            .map_err(|err| SearchError::malformed(&term, format!("invalid JSON: {err}")))?;
        let result = into_search_result(&term, decoded)?;

        if !result.quoted_phrase_found {
            warn!(
                %term,
                count = result.count,
                "The quoted phrase wasn't found; identifiers discarded"
            );
        }
        debug!(count = result.count, ids = result.ids.len(), "Search done");
        Ok(result)
    }
}
