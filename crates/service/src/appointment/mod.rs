//! Appointment module: domain types, repository abstraction, and the
//! validation + ownership rules of the booking service.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::AppointmentService;
