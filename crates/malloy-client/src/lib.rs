//! HTTP client SDK for the Malloy Publisher.
//!
//! This crate provides a typed, blocking client for the Publisher's
//! `/api/v0` REST surface.
//!
//! # Example
//!
//! ```no_run
//! use malloy_client::{MalloyClient, QueryParams, Result};
//!
//! # fn example() -> Result<()> {
//! let client = MalloyClient::builder()
//!     .base_url("http://localhost:4000")
//!     .api_key("secret")
//!     .build()?;
//!
//! for package in client.list_packages("home")? {
//!     println!("{}: {}", package.name, package.description);
//! }
//!
//! let result = client.execute_query(
//!     &QueryParams::new("home", "faa", "flights.malloy")
//!         .with_source("flights")
//!         .with_query_name("top_carriers"),
//! )?;
//! println!("{}", result.query_result);
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Failures fall into four kinds, all variants of [`Error`]:
//!
//! - [`Error::InvalidInput`]: the parameters were rejected locally; no
//!   request was sent.
//! - [`Error::Api`]: the server answered with a status of 400 or above.
//! - [`Error::Http`]: the request did not complete (connection, DNS, timeout).
//! - [`Error::Schema`]: a successful response did not match the expected
//!   record shape, usually a client/server version skew.

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::QueryParams;
pub use client::{ClientBuilder, MalloyClient};
pub use error::{Error, ErrorResponse, Result};
pub use types::*;
