//! Process-lifetime store holding every storefront table.
//!
//! All tables sit behind one `parking_lot::RwLock`. Reads share the lock;
//! every write, including the multi-table sale commit, takes it exclusively,
//! so readers never observe a half-written sale. Guards are never held
//! across an `.await`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use parking_lot::RwLock;

use crate::domain::{
    Category, License, LicenseId, LicenseType, LicenseTypeId, Order, OrderId, OrderItem,
    OrderItemId, Product, ProductId, User, UserId,
};

use super::seed::{SeedError, seed_tables};

/// Raised when a table has handed out every id its key type can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{table} id sequence exhausted")]
pub struct SequenceExhausted {
    table: &'static str,
}

/// Monotonic id source for one table. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Copy)]
pub(super) struct IdSequence {
    table: &'static str,
    last: u32,
}

impl IdSequence {
    const fn new(table: &'static str) -> Self {
        Self { table, last: 0 }
    }

    pub(super) fn advance(&mut self) -> Result<u32, SequenceExhausted> {
        let next = self
            .last
            .checked_add(1)
            .ok_or(SequenceExhausted { table: self.table })?;
        self.last = next;
        Ok(next)
    }
}

/// Id sequences for every table. `Copy` so a commit can allocate from a
/// scratch copy and publish it only once every record is built.
#[derive(Debug, Clone, Copy)]
pub(super) struct Sequences {
    pub(super) users: IdSequence,
    pub(super) products: IdSequence,
    pub(super) license_types: IdSequence,
    pub(super) licenses: IdSequence,
    pub(super) orders: IdSequence,
    pub(super) order_items: IdSequence,
}

impl Default for Sequences {
    fn default() -> Self {
        Self {
            users: IdSequence::new("user"),
            products: IdSequence::new("product"),
            license_types: IdSequence::new("license type"),
            licenses: IdSequence::new("license"),
            orders: IdSequence::new("order"),
            order_items: IdSequence::new("order item"),
        }
    }
}

/// Table contents. `BTreeMap` keys keep iteration in id order.
#[derive(Debug, Default)]
pub(super) struct Tables {
    pub(super) users: BTreeMap<UserId, User>,
    pub(super) products: BTreeMap<ProductId, Product>,
    pub(super) license_types: BTreeMap<LicenseTypeId, LicenseType>,
    pub(super) licenses: BTreeMap<LicenseId, License>,
    pub(super) orders: BTreeMap<OrderId, Order>,
    pub(super) order_items: BTreeMap<OrderItemId, OrderItem>,
    pub(super) categories: BTreeSet<Category>,
    pub(super) sequences: Sequences,
}

/// In-memory implementation of every repository port.
///
/// Construct one per process and share it by `Arc`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use mockable::DefaultClock;
/// use storefront::outbound::persistence::MemoryStore;
///
/// let store = MemoryStore::seeded(Arc::new(DefaultClock)).expect("seed data is valid");
/// # let _ = store;
/// ```
pub struct MemoryStore {
    tables: RwLock<Tables>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            clock,
        }
    }

    /// Create a store pre-loaded with the demonstration catalogue, users, and
    /// categories.
    pub fn seeded(clock: Arc<dyn Clock>) -> Result<Self, SeedError> {
        let mut tables = Tables::default();
        seed_tables(&mut tables, clock.utc())?;
        Ok(Self {
            tables: RwLock::new(tables),
            clock,
        })
    }

    pub(super) fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    pub(super) fn tables(&self) -> &RwLock<Tables> {
        &self.tables
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn sequences_start_at_one_and_never_repeat() {
        let mut sequence = IdSequence::new("widget");
        assert_eq!(sequence.advance(), Ok(1));
        assert_eq!(sequence.advance(), Ok(2));
    }

    #[rstest]
    fn exhausted_sequences_report_their_table() {
        let mut sequence = IdSequence {
            table: "widget",
            last: u32::MAX,
        };
        let err = sequence.advance().expect_err("no ids left");
        assert_eq!(err.to_string(), "widget id sequence exhausted");
    }

    #[rstest]
    fn seeded_store_loads_fixed_dataset() {
        let store = test_support::seeded_store();
        let tables = store.tables().read();
        assert_eq!(tables.users.len(), 2);
        assert_eq!(tables.products.len(), 3);
        assert_eq!(tables.license_types.len(), 6);
        assert_eq!(tables.categories.len(), 5);
        assert!(tables.licenses.is_empty());
        assert!(tables.orders.is_empty());
    }
}
