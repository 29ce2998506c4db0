//! HTTP protocol layer module
//!
//! Response builders and JSON body encoding, decoupled from the echo logic.

pub mod json;
pub mod response;

// Re-export commonly used types
pub use response::{build_501_response, build_json_response};
