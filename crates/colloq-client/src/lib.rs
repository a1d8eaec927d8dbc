//! Client
//!
//! Typed access to the review-platform chat API. The crate separates the
//! pure parts (endpoint paths, envelope decoding, error taxonomy) from the
//! actual HTTP transport so the interesting logic is testable without a
//! network.
//!
//! # Components
//!
//! - [`endpoint`]: path construction for the three chat endpoints
//! - [`response`]: `{ success, ... }` envelope decoding into `Result`s
//! - [`ClientError`]: transport and server-rejection failures
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides
//! [`ApiClient`], an HTTP client over reqwest carrying ambient cookie
//! credentials.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod endpoint;
mod error;
pub mod response;

#[cfg(feature = "transport")]
mod transport;

pub use error::ClientError;
#[cfg(feature = "transport")]
pub use transport::ApiClient;
