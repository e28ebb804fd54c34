//! Shared User-Agent and E-utilities `tool` identification.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/journal-counts";

/// Tool name sent as the E-utilities `tool` parameter.
pub(crate) const TOOL_NAME: &str = "journal-counts";

/// Default User-Agent for E-utilities requests.
#[must_use]
pub(crate) fn default_search_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{TOOL_NAME}/{version} (research-tool; +{PROJECT_UA_URL})")
}
