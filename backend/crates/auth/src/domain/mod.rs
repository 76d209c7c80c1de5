//! Domain Layer
//!
//! Entities, value objects, and the credential store trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    identity::{Caller, Identity},
    user::User,
};
pub use repository::UserRepository;
