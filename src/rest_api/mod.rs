//! # REST API Module
//!
//! CRUD endpoints over the user store, with request validation at the
//! boundary and uniform JSON envelopes for results and errors.

pub mod errors;
pub mod extract;
pub mod parser;
pub mod response;
pub mod user_routes;
pub mod validation;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use extract::{JsonBody, UserId};
pub use parser::ListQuery;
pub use response::{format_timestamp, Envelope, Pagination};
pub use user_routes::{route_not_found, user_routes};
