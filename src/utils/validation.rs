use crate::utils::error::{MarketError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl Into<String>, reason: impl Into<String>) -> MarketError {
    MarketError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.into(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value.to_string(),
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(extension) => {}
            Some(extension) => {
                return Err(invalid(
                    field_name,
                    file.clone(),
                    format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                ));
            }
            None => {
                return Err(invalid(
                    field_name,
                    file.clone(),
                    "File has no extension or invalid filename",
                ));
            }
        }
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| MarketError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("registries.book_endpoint", "https://example.com").is_ok());
        assert!(validate_url("registries.book_endpoint", "http://example.com").is_ok());
        assert!(validate_url("registries.book_endpoint", "").is_err());
        assert!(validate_url("registries.book_endpoint", "invalid-url").is_err());
        assert!(validate_url("registries.book_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("registries.timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("registries.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["books.csv".to_string(), "users.tsv".to_string()];
        assert!(validate_file_extensions("seed", &files, &["csv", "tsv"]).is_ok());

        let invalid_files = vec!["listings.txt".to_string()];
        assert!(validate_file_extensions("seed", &invalid_files, &["csv", "tsv"]).is_err());

        let no_extension = vec!["listings".to_string()];
        assert!(validate_file_extensions("seed", &no_extension, &["csv", "tsv"]).is_err());
    }

    #[test]
    fn test_validate_required_and_non_empty() {
        let present = Some("http://registry".to_string());
        assert!(validate_required_field("registries.user_endpoint", &present).is_ok());
        let absent: Option<String> = None;
        assert!(matches!(
            validate_required_field("registries.user_endpoint", &absent),
            Err(MarketError::MissingConfigError { .. })
        ));
        assert!(validate_non_empty_string("condition", "  ").is_err());
        assert!(validate_non_empty_string("condition", "good").is_ok());
    }
}
