//! Async client for the portfolio site's location and media API.
//!
//! # Design principles
//!
//! - **Web-compatible**: Works on desktop and WASM via reqwest
//! - **Runtime-agnostic**: Returns `impl Future`, works with any executor
//! - **Lenient decoding**: Coordinates may arrive as numbers or decimal strings
//!
//! # Example
//!
//! ```ignore
//! use portfolio_api::{Client, into_markers};
//!
//! let client = Client::new("http://localhost:3000");
//! let markers = into_markers(client.fetch_locations().await?);
//! ```

mod client;
mod error;
pub mod types;

pub use client::{Client, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use types::{Decimal, LocationMedia, LocationRecord, into_markers};
