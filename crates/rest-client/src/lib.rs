//! Generic REST transport infrastructure.
//!
//! This crate provides a thin wrapper around `reqwest` with:
//!
//! - An `HttpTransport` seam so callers can swap in other transports
//! - Consistent error handling via `RestError`
//! - Base URL normalization (trailing slashes stripped)
//!
//! The transport never inspects status codes; that is left to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::{HttpTransport, Method, RestClient, TransportRequest};
//! use rest_client::header::HeaderMap;
//!
//! let client = RestClient::with_default_timeout("https://api.example.com/")?;
//! let response = client
//!     .send(TransportRequest::new(Method::GET, "/api/widgets", HeaderMap::new()))
//!     .await?;
//! println!("{} {}", response.status, response.body_text());
//! ```

mod client;
mod error;
mod transport;

pub use client::{RestClient, DEFAULT_TIMEOUT};
pub use error::RestError;
pub use reqwest::{header, Method, StatusCode};
pub use transport::{HttpTransport, TransportRequest, TransportResponse};
