//! Core business logic for forkful.

pub mod services;

pub use services::*;
