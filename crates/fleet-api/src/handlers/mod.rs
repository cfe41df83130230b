//! HTTP handlers

pub mod health;
pub mod driver;
pub mod session;
pub mod customers;
