//! Resource abstraction layer
//!
//! This module provides a data-driven approach to the backend's resource
//! collections. Resource definitions are loaded from JSON files at compile
//! time, so a new collection is a new definition file, not new code: the
//! same CRUD client and view binding serve every collection.
//!
//! # Architecture
//!
//! - [`registry`] - Loads and caches resource definitions from embedded JSON
//! - [`client`] - Generic CRUD operations against one collection endpoint
//!
//! # Resource Definitions
//!
//! Resources are defined in JSON files under `src/resources/`:
//! - `categorias.json` - Category records (name, description)
//! - `livros.json` - Book records (title, year, pages, category)
//!
//! # Example
//!
//! ```ignore
//! use crate::resource::{get_resource, client::list_records};
//! use crate::api::client::ApiClient;
//!
//! async fn list_books(api: &ApiClient) -> anyhow::Result<Vec<serde_json::Value>> {
//!     let resource = get_resource("livros").unwrap();
//!     list_records(api, resource).await
//! }
//! ```

pub mod client;
mod registry;

pub use client::{extract_json_value, SelectOption};
pub use registry::*;
