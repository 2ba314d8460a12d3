//! tbib - terminal admin client for a library REST backend
//!
//! Manages the backend's `categorias` and `livros` collections through a
//! table-and-form terminal interface. The CRUD client is generic over a
//! data-driven resource definition; adding a collection means adding a
//! JSON definition under `src/resources/`.

pub mod api;
pub mod app;
pub mod config;
pub mod event;
pub mod notification;
pub mod resource;
pub mod ui;

/// Version injected at compile time via TBIB_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("TBIB_VERSION") {
    Some(v) => v,
    None => "dev",
};
