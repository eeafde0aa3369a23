pub mod common;
pub mod validation_patterns;
