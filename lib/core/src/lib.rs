//! Core types and utilities for the MediCare portal.
//!
//! This crate provides the identifier types and the error-handling
//! foundation shared by the admin access library and the web server.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{AttemptId, ParseIdError, SessionId};
