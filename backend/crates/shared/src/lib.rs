//! Shared Kernel
//!
//! Vocabulary shared by every domain crate of the lodging API:
//! - Unified error type ([`error::app_error::AppError`]) and its HTTP mapping
//! - Typed identifiers for users, places and bookings
//!
//! Only things whose meaning is identical across domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
