//! User identifier
//!
//! Account ids are shared with the lodging crate, so the type lives in the
//! kernel and is re-exported here.

pub use kernel::id::UserId;
