//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. CORS (tower-http)
//! 2. Request logger

pub mod audit;
