//! In-memory persistence adapters.
//!
//! [`MemoryStore`] implements every repository port. It is built once at
//! startup, optionally seeded, and shared by `Arc` with the domain services.
//!
//! # Architecture
//!
//! - **Thin adapters**: each `memory_*_repository` module only translates
//!   port calls into table reads and writes. No business logic resides here.
//! - **One lock**: tables live behind a single `RwLock`, so a sale commit is
//!   observed atomically.
//! - **Strongly typed errors**: failures are reported through the port error
//!   enums.

mod memory_catalogue_repository;
mod memory_license_repository;
mod memory_order_repository;
mod memory_store;
mod memory_user_repository;
mod seed;

pub use memory_store::{MemoryStore, SequenceExhausted};
pub use seed::SeedError;
