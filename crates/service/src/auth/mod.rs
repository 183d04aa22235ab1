//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Login verification lives here; passwords are stored and compared only as
//! salted argon2 hashes.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::{hash_password, AuthService, PASSWORD_ALGORITHM};
