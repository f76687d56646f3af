//! API endpoint handlers, one module per collection.

pub mod auth;
pub mod critical;
pub mod health;
pub mod patients;
pub mod readings;
pub mod treatments;
