use crate::utils::error::{NetboxError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// NetBox slug 的合法格式
pub const SLUG_PATTERN: &str = "^[-a-zA-Z0-9_]{1,50}$";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn slug_regex() -> &'static Regex {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| Regex::new(SLUG_PATTERN).expect("slug pattern is a valid regex"))
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(NetboxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(NetboxError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(NetboxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| NetboxError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NetboxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_pattern(field_name: &str, value: &str, pattern: &Regex) -> Result<()> {
    if !pattern.is_match(value) {
        return Err(NetboxError::validation(
            field_name,
            format!("Must be like {}", pattern.as_str()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate_slug(value: &str) -> Result<()> {
        validate_pattern("slug", value, slug_regex())
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("netbox.url", "https://netbox.example.com").is_ok());
        assert!(validate_url("netbox.url", "http://127.0.0.1:8000/").is_ok());
        assert!(validate_url("netbox.url", "").is_err());
        assert!(validate_url("netbox.url", "netbox.example.com").is_err());
        assert!(validate_url("netbox.url", "ftp://netbox.example.com").is_err());
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("dc1").is_ok());
        assert!(validate_slug("eu-west_1").is_ok());
        assert!(validate_slug(&"a".repeat(50)).is_ok());

        assert!(validate_slug("").is_err());
        assert!(validate_slug(&"a".repeat(51)).is_err());
        assert!(validate_slug("bad slug!").is_err());
        assert!(validate_slug("dc.1").is_err());
    }

    #[test]
    fn test_slug_error_message() {
        let err = validate_slug("bad slug!").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error in 'slug': Must be like ^[-a-zA-Z0-9_]{1,50}$"
        );
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("token".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("token", &present).unwrap(), "token");
        assert!(matches!(
            validate_required_field("token", &missing),
            Err(NetboxError::MissingConfigError { .. })
        ));
    }
}
