//! Auth Service Library
//!
//! Hosts a [`token_authority::TokenAuthority`] behind an HTTP surface:
//! registration and login, a bearer gate in front of protected resources,
//! and in-memory user and message stores.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `crypto` - Password hashing (bcrypt)
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `middleware` - Bearer gate
//! - `models` - Data models
//! - `repositories` - Storage traits and in-memory stores
//! - `routes` - Router assembly and application state
//! - `services` - Business logic layer

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
