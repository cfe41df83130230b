//! # Fleet API
//!
//! HTTP handlers, middleware, DTOs, and shared state.

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod state;
pub mod error;
