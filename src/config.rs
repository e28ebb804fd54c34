//! Entrez contact/auth configuration loaded from an INI-style file.
//!
//! Only the `[Entrez]` section is read:
//!
//! ```ini
//! [Entrez]
//! email = someone@example.com
//! api_key = 0123456789abcdef
//! use_api_key = true
//! ```
//!
//! Key names are matched case-insensitively; section names are not.
//! Configuration errors are not recoverable: callers are expected to stop
//! before any remote work begins.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use thiserror::Error;

/// Section holding the E-utilities identification settings.
pub const ENTREZ_SECTION: &str = "Entrez";

/// Errors raised while reading the configuration file.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error(
        "cannot read config file '{path}': {message}\n  Suggestion: Create the file or pass --config <path>"
    )]
    Read {
        /// Path that was attempted
        path: String,
        /// Underlying IO error text
        message: String,
    },

    /// A line is neither a section header, a comment nor a `key = value` pair
    #[error("invalid config syntax on line {line}: {reason}")]
    Syntax {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// The required section is absent
    #[error("config section [{section}] not found\n  Suggestion: Add a [{section}] section")]
    MissingSection {
        /// Section name
        section: String,
    },

    /// A required key is absent from the section
    #[error("config key '{key}' missing from section [{section}]\n  Suggestion: {suggestion}")]
    MissingKey {
        /// Section name
        section: String,
        /// Missing key
        key: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// A boolean key holds something other than a recognised boolean
    #[error(
        "invalid boolean '{value}' for config key '{key}'\n  Suggestion: Use one of: true, false, yes, no, on, off, 1, 0"
    )]
    InvalidBoolean {
        /// Key being parsed
        key: String,
        /// Raw value
        value: String,
    },

    /// The contact email cannot be sent as a request parameter
    #[error("invalid contact email '{email}': {reason}")]
    InvalidEmail {
        /// Raw value
        email: String,
        /// Why it was rejected
        reason: String,
    },
}

impl ConfigError {
    fn missing_key(key: &str, suggestion: &str) -> Self {
        Self::MissingKey {
            section: ENTREZ_SECTION.to_string(),
            key: key.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    fn syntax(line: usize, reason: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            reason: reason.into(),
        }
    }
}

/// Identification settings sent with every remote request.
#[derive(Clone, PartialEq, Eq)]
pub struct EntrezConfig {
    /// Contact address sent with every request.
    pub email: String,
    /// API key; always `None` when `use_api_key` is false.
    pub api_key: Option<String>,
    /// Whether the stored API key should be sent at all.
    pub use_api_key: bool,
}

impl EntrezConfig {
    /// Builds a config, dropping the key unless `use_api_key` is set.
    #[must_use]
    pub fn new(email: impl Into<String>, api_key: Option<String>, use_api_key: bool) -> Self {
        Self {
            email: email.into(),
            api_key: if use_api_key { api_key } else { None },
            use_api_key,
        }
    }
}

impl fmt::Debug for EntrezConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntrezConfig")
            .field("email", &self.email)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("use_api_key", &self.use_api_key)
            .finish()
    }
}

/// Loads the `[Entrez]` section from the file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read, is malformed, or
/// lacks a required key.
pub fn load_entrez_config(path: &Path) -> Result<EntrezConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|err| ConfigError::Read {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    parse_entrez_config(&raw)
}

/// Parses configuration text and extracts the `[Entrez]` settings.
///
/// # Errors
///
/// Returns [`ConfigError`] when the text is malformed or lacks a required key.
pub fn parse_entrez_config(raw: &str) -> Result<EntrezConfig, ConfigError> {
    let sections = parse_sections(raw)?;
    let Some(entrez) = sections.get(ENTREZ_SECTION) else {
        return Err(ConfigError::MissingSection {
            section: ENTREZ_SECTION.to_string(),
        });
    };

    let email = entrez
        .get("email")
        .ok_or_else(|| ConfigError::missing_key("email", "Add `email = you@example.org`"))?;
    validate_email(email)?;

    let raw_use_api_key = entrez.get("use_api_key").ok_or_else(|| {
        ConfigError::missing_key("use_api_key", "Add `use_api_key = false` or `use_api_key = true`")
    })?;
    let use_api_key = parse_boolean("use_api_key", raw_use_api_key)?;

    let api_key = entrez
        .get("api_key")
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    if use_api_key && api_key.is_none() {
        return Err(ConfigError::missing_key(
            "api_key",
            "Set `api_key` or change `use_api_key` to false",
        ));
    }

    Ok(EntrezConfig::new(email.clone(), api_key, use_api_key))
}

fn parse_sections(raw: &str) -> Result<HashMap<String, HashMap<String, String>>, ConfigError> {
    let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut current: Option<String> = None;

    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_number = line_index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let Some(name) = header.strip_suffix(']') else {
                return Err(ConfigError::syntax(line_number, "unterminated section header"));
            };
            let name = name.trim().to_string();
            if sections.contains_key(&name) {
                return Err(ConfigError::syntax(
                    line_number,
                    format!("duplicate section [{name}]"),
                ));
            }
            sections.insert(name.clone(), HashMap::new());
            current = Some(name);
            continue;
        }

        let Some(section) = current.as_ref() else {
            return Err(ConfigError::syntax(
                line_number,
                "key/value pair appears before any [section] header",
            ));
        };

        let Some((raw_key, raw_value)) = split_key_value(line) else {
            return Err(ConfigError::syntax(line_number, "expected key = value"));
        };
        let key = raw_key.trim().to_ascii_lowercase();
        if key.is_empty() {
            return Err(ConfigError::syntax(line_number, "empty key"));
        }

        let entries = sections.entry(section.clone()).or_default();
        if entries.contains_key(&key) {
            return Err(ConfigError::syntax(
                line_number,
                format!("duplicate key '{key}' in [{section}]"),
            ));
        }
        entries.insert(key, raw_value.trim().to_string());
    }

    Ok(sections)
}

/// Splits on the first `=` or `:`, whichever comes first.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let index = line.find(['=', ':'])?;
    Some((&line[..index], &line[index + 1..]))
}

fn parse_boolean(key: &str, raw_value: &str) -> Result<bool, ConfigError> {
    match raw_value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(true),
        "0" | "no" | "false" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBoolean {
            key: key.to_string(),
            value: raw_value.to_string(),
        }),
    }
}

fn validate_email(email: &str) -> Result<(), ConfigError> {
    let reason = if email.is_empty() {
        "value is empty"
    } else if email.chars().any(char::is_control) {
        "value contains control characters"
    } else {
        return Ok(());
    };
    Err(ConfigError::InvalidEmail {
        email: email.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_with_api_key_enabled() {
        let cfg = parse_entrez_config(
            "[Entrez]\nemail = someone@example.org\napi_key = abc123\nuse_api_key = true\n",
        )
        .unwrap();
        assert_eq!(cfg.email, "someone@example.org");
        assert_eq!(cfg.api_key.as_deref(), Some("abc123"));
        assert!(cfg.use_api_key);
    }

    #[test]
    fn test_parse_config_drops_key_when_disabled() {
        let cfg = parse_entrez_config(
            "[Entrez]\nemail = someone@example.org\napi_key = abc123\nuse_api_key = no\n",
        )
        .unwrap();
        assert!(cfg.api_key.is_none(), "unused key must never be kept");
        assert!(!cfg.use_api_key);
    }

    #[test]
    fn test_parse_config_api_key_optional_when_disabled() {
        let cfg =
            parse_entrez_config("[Entrez]\nemail = someone@example.org\nuse_api_key = false\n")
                .unwrap();
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn test_parse_config_requires_api_key_when_enabled() {
        let err = parse_entrez_config(
            "[Entrez]\nemail = someone@example.org\napi_key =\nuse_api_key = true\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("api_key"), "got: {err}");
    }

    #[test]
    fn test_parse_config_accepts_colon_comments_and_mixed_case_keys() {
        let cfg = parse_entrez_config(
            "# contact settings\n[Other]\nfoo = bar\n\n[Entrez]\n; the address\nEmail: someone@example.org\nUSE_API_KEY: Off\n",
        )
        .unwrap();
        assert_eq!(cfg.email, "someone@example.org");
        assert!(!cfg.use_api_key);
    }

    #[test]
    fn test_parse_config_missing_section() {
        let err = parse_entrez_config("[Other]\nemail = a@b.c\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection { .. }));
    }

    #[test]
    fn test_parse_config_missing_email() {
        let err = parse_entrez_config("[Entrez]\nuse_api_key = false\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { ref key, .. } if key == "email"));
    }

    #[test]
    fn test_parse_config_missing_use_api_key() {
        let err = parse_entrez_config("[Entrez]\nemail = a@b.c\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { ref key, .. } if key == "use_api_key"));
    }

    #[test]
    fn test_parse_config_rejects_invalid_boolean() {
        let err =
            parse_entrez_config("[Entrez]\nemail = a@b.c\nuse_api_key = maybe\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBoolean { .. }));
        assert!(err.to_string().contains("use_api_key"));
    }

    #[test]
    fn test_parse_config_rejects_empty_email() {
        let err = parse_entrez_config("[Entrez]\nemail =\nuse_api_key = false\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEmail { .. }));
    }

    #[test]
    fn test_parse_config_rejects_pair_before_section() {
        let err = parse_entrez_config("email = a@b.c\n[Entrez]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_parse_config_rejects_duplicate_key() {
        let err = parse_entrez_config("[Entrez]\nemail = a@b.c\nEMAIL = d@e.f\nuse_api_key = 0\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { line: 3, .. }));
    }

    #[test]
    fn test_parse_config_rejects_line_without_separator() {
        let err = parse_entrez_config("[Entrez]\njust words\n").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { line: 2, .. }));
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let cfg = EntrezConfig::new("a@b.c", Some("secret-key".to_string()), true);
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_entrez_config(Path::new("/nonexistent/dir/config.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/dir/config.ini"));
    }
}
