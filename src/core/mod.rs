// src/core/mod.rs

pub mod sanitize;

pub use sanitize::{is_forbidden_control, strip_control_chars};
