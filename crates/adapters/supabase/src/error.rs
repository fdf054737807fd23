//! Supabase-specific error type.

use bustrack_domain::error::BusTrackError;

/// Errors originating from the Supabase adapter.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    /// `url` was empty.
    #[error("Supabase URL is not configured")]
    MissingUrl,

    /// `service_role_key` was empty.
    #[error("Supabase service role key is not configured")]
    MissingKey,

    /// `url` could not be parsed.
    #[error("invalid Supabase URL {url:?}")]
    InvalidUrl { url: String },

    /// The key contains bytes that cannot go into an HTTP header.
    #[error("invalid Supabase service role key")]
    InvalidKey(#[from] reqwest::header::InvalidHeaderValue),

    /// Building the HTTP client or sending a request failed.
    #[error("request to Supabase failed")]
    Transport(#[from] reqwest::Error),

    /// `PostgREST` answered with a non-success status.
    #[error("Supabase responded with status {status}")]
    Status { status: u16, code: Option<String> },
}

impl From<SupabaseError> for BusTrackError {
    fn from(err: SupabaseError) -> Self {
        Self::Storage(Box::new(err))
    }
}
