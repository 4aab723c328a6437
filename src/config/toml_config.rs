use crate::utils::error::{ProbeError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Optional probe configuration file. Every key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub target: Option<TargetConfig>,
    pub request: Option<RequestConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestConfig {
    pub query: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub query_id: Option<String>,
    pub cancel_after_ms: Option<u64>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading probe config from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(ProbeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProbeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProbeError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[target]
endpoint = "http://db-gateway:8000/query"
timeout_seconds = 30
headers = { "X-Client" = "probe" }

[request]
query = "SELECT * FROM ipl_matches"
limit = 25
offset = 50
cancel_after_ms = 750
"#,
        )
        .unwrap();

        let target = config.target.unwrap();
        assert_eq!(target.endpoint.as_deref(), Some("http://db-gateway:8000/query"));
        assert_eq!(target.timeout_seconds, Some(30));
        assert_eq!(target.headers.unwrap().get("X-Client").map(String::as_str), Some("probe"));

        let request = config.request.unwrap();
        assert_eq!(request.query.as_deref(), Some("SELECT * FROM ipl_matches"));
        assert_eq!(request.limit, Some(25));
        assert_eq!(request.offset, Some(50));
        assert_eq!(request.query_id, None);
        assert_eq!(request.cancel_after_ms, Some(750));
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.target.is_none());
        assert!(config.request.is_none());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = TomlConfig::from_toml_str("[target]\nendpiont = \"http://x\"\n").unwrap_err();
        assert!(matches!(err, ProbeError::ConfigError { .. }));
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("STREAM_PROBE_TEST_HOST", "db.internal");
        let config = TomlConfig::from_toml_str(
            r#"
[target]
endpoint = "http://${STREAM_PROBE_TEST_HOST}:8000/query"

[request]
query_id = "${STREAM_PROBE_TEST_UNSET_VAR}"
"#,
        )
        .unwrap();

        assert_eq!(
            config.target.unwrap().endpoint.as_deref(),
            Some("http://db.internal:8000/query")
        );
        assert_eq!(
            config.request.unwrap().query_id.as_deref(),
            Some("${STREAM_PROBE_TEST_UNSET_VAR}")
        );
    }
}
