//! Supabase connection settings.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::bus_repo::SupabaseBusRepository;
use crate::error::SupabaseError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for the Supabase storage adapter.
///
/// Passed in explicitly; this crate never reads the process environment.
#[derive(Debug, Clone, Default)]
pub struct SupabaseConfig {
    /// Project base URL (e.g. `https://xyz.supabase.co`).
    pub url: String,
    /// Service-role key; bypasses row-level security.
    pub service_role_key: String,
}

impl SupabaseConfig {
    /// Build a [`SupabaseBusRepository`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError`] when the URL or key is empty or malformed,
    /// or when the HTTP client cannot be constructed.
    pub fn build(self) -> Result<SupabaseBusRepository, SupabaseError> {
        if self.url.trim().is_empty() {
            return Err(SupabaseError::MissingUrl);
        }
        if self.service_role_key.trim().is_empty() {
            return Err(SupabaseError::MissingKey);
        }

        let rest_url = self.rest_url();
        if reqwest::Url::parse(&rest_url).is_err() {
            return Err(SupabaseError::InvalidUrl { url: self.url });
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(self.auth_headers()?)
            .build()?;

        Ok(SupabaseBusRepository::new(client, rest_url))
    }

    /// Base URL of the REST API, without a trailing slash.
    fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url.trim().trim_end_matches('/'))
    }

    fn auth_headers(&self) -> Result<HeaderMap, SupabaseError> {
        let mut apikey = HeaderValue::from_str(&self.service_role_key)?;
        apikey.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", self.service_role_key))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, key: &str) -> SupabaseConfig {
        SupabaseConfig {
            url: url.to_string(),
            service_role_key: key.to_string(),
        }
    }

    #[test]
    fn should_reject_empty_url() {
        let result = config("", "secret").build();
        assert!(matches!(result, Err(SupabaseError::MissingUrl)));
    }

    #[test]
    fn should_reject_empty_key() {
        let result = config("https://example.supabase.co", "  ").build();
        assert!(matches!(result, Err(SupabaseError::MissingKey)));
    }

    #[test]
    fn should_reject_unparseable_url() {
        let result = config("not a url", "secret").build();
        assert!(matches!(result, Err(SupabaseError::InvalidUrl { .. })));
    }

    #[test]
    fn should_reject_key_with_newline() {
        let result = config("https://example.supabase.co", "sec\nret").build();
        assert!(matches!(result, Err(SupabaseError::InvalidKey(_))));
    }

    #[test]
    fn should_strip_trailing_slash_from_rest_url() {
        let cfg = config("https://example.supabase.co/", "secret");
        assert_eq!(cfg.rest_url(), "https://example.supabase.co/rest/v1");
    }

    #[test]
    fn should_build_repository_when_valid() {
        let result = config("https://example.supabase.co", "secret").build();
        assert!(result.is_ok());
    }
}
