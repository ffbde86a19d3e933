pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod response;
pub mod sql;
pub mod validate;

pub use parameter_error_handler::{json_error_handler, path_error_handler, query_error_handler};
pub use response::{error_response, error_response_with};
pub use sql::escape_like_pattern;
