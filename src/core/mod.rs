// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod error;
pub mod register;

// Re-export public types for convenient access via `qrl::core::TypeName`
pub use error::QrlError;
pub use register::RegisterState;
