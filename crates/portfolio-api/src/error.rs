//! Error types for the portfolio-api crate.

use std::fmt;

/// Result type for portfolio-api operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the portfolio API.
#[derive(Debug)]
pub enum Error {
    /// HTTP request failed.
    Http {
        /// The URL that failed.
        url: String,
        /// The error message.
        message: String,
    },
    /// HTTP response had a non-success status code.
    HttpStatus {
        /// The URL that returned the error.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
    /// The response body was not the expected JSON.
    Json {
        /// The URL whose body failed to decode.
        url: String,
        /// The error message.
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http { url, message } => {
                write!(f, "http request to {url} failed: {message}")
            }
            Error::HttpStatus { url, status } => {
                write!(f, "http request to {url} returned status {status}")
            }
            Error::Json { url, message } => {
                write!(f, "failed to decode response from {url}: {message}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_url_and_status() {
        let err = Error::HttpStatus {
            url: "http://localhost:3000/api/locations".into(),
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "http request to http://localhost:3000/api/locations returned status 500"
        );
    }
}
