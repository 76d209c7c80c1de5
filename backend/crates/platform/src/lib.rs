//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the domain crates:
//! - Secure random bytes for generated secrets
//! - Session cookie building and parsing
//! - Password hashing (Argon2id with a per-install work factor)

pub mod cookie;
pub mod crypto;
pub mod password;
