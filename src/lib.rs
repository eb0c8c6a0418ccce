//! shelf application library
//!
//! Domain modules (book catalogue, room temperatures) and the bootstrap that
//! wires them to the database and the HTTP server.

pub mod bootstrap;
pub mod modules;
pub mod utils;

pub use bootstrap::{app, migrate, serve};
