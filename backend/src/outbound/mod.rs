//! Outbound adapters implementing domain ports for storage.
//!
//! - **persistence**: the process-lifetime in-memory store
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.

pub mod persistence;
