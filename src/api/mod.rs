//! REST API for patient records.
//!
//! Routes are mounted at the root and wrapped by a small middleware stack:
//! CORS → request logger → handler. Handlers validate input, touch the
//! store through `ApiContext`, and map failures to `ApiError`.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::{api_router, ENDPOINTS};
pub use server::{start_server, ApiServer, ServerError, ServerSession};
pub use types::ApiContext;
