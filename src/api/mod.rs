//! Backend API interaction module
//!
//! This module provides the plumbing for talking to the library REST
//! backend: the raw HTTP wrapper and the client that knows how to build
//! collection and record URLs.
//!
//! # Module Structure
//!
//! - [`client`] - Main API client, owns the base URL
//! - [`http`] - HTTP utilities for REST calls
//!
//! # Example
//!
//! ```ignore
//! use crate::api::client::ApiClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ApiClient::new("http://localhost:3000")?;
//!     let books = client.get(&client.collection_url("livros")).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
