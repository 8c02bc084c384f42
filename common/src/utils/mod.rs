//! Common utilities
pub mod measure;
pub mod pem;
