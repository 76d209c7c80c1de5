//! Infrastructure Layer
//!
//! Place and booking store implementations.

pub mod memory;
pub mod postgres;

pub use memory::MemoryLodgingRepository;
pub use postgres::PgLodgingRepository;
