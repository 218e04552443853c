//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Secure randomness and URL-safe secret generation
//! - Constant-time comparison for secret material

pub mod crypto;
