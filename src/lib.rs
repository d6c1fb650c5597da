//! Blocking HTTP request helper and `Authorization` credential encoding.

pub mod auth;
pub mod config;
pub mod error;
pub mod request;

pub use auth::{encode_bearer_token, make_basic_auth_header};
pub use error::{ConstructionError, Error, Status};
pub use request::{build_url, make_request, ResponseBody};
