//! Translit QA report server
//!
//! Serves the static test cases as downloadable PDF and Excel previews.

pub mod server;

pub use server::{serve, WebServer, WebServerConfig};
