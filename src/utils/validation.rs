use crate::utils::error::{ProbeError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ProbeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Splits a `Name: value` header argument.
pub fn parse_header_arg(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| ProbeError::InvalidHeaderError {
            name: raw.to_string(),
            reason: "expected `Name: value`".to_string(),
        })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ProbeError::InvalidHeaderError {
            name: raw.to_string(),
            reason: "header name cannot be empty".to_string(),
        });
    }

    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("target.endpoint", "http://localhost:8000/query").is_ok());
        assert!(validate_url("target.endpoint", "https://example.com").is_ok());
        assert!(validate_url("target.endpoint", "").is_err());
        assert!(validate_url("target.endpoint", "localhost:8000").is_err());
        assert!(validate_url("target.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("request.limit", 10, 1).is_ok());
        assert!(validate_positive_number("request.limit", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("target.timeout_seconds", 30, 1, 3600).is_ok());
        assert!(validate_range("target.timeout_seconds", 0, 1, 3600).is_err());
        assert!(validate_range("target.timeout_seconds", 3601, 1, 3600).is_err());
    }

    #[test]
    fn test_parse_header_arg() {
        let (name, value) = parse_header_arg("X-Trace-Id: abc:123").unwrap();
        assert_eq!(name, "X-Trace-Id");
        assert_eq!(value, "abc:123");

        assert!(parse_header_arg("no-colon").is_err());
        assert!(parse_header_arg(" : value").is_err());
    }
}
