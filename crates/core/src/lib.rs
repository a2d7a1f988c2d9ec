//! Core business logic for the student council site.

pub mod services;

pub use services::*;
