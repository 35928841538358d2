//! userdesk - an in-memory user directory behind a small JSON REST API

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod store;
