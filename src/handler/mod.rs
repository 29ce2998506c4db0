//! Request handler module
//!
//! Responsible for method dispatch and building the echo response.

pub mod echo;

// Re-export main entry point
pub use echo::handle_request;
