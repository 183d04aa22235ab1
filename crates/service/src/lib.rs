//! Service layer providing the business rules on top of the `models` crate.
//! - Validates inputs before any store access.
//! - Enforces per-user ownership of appointments.
//! - Maps every failure to a classified `ServiceError` kind.

pub mod appointment;
pub mod auth;
pub mod errors;
pub mod seed;
