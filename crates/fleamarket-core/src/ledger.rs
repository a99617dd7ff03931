//! # Remote-Id Reconciliation Ledger
//!
//! Maps the structural identity of a listing to the identifier the remote
//! store assigned to it.
//!
//! ## Why a Ledger?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Local Index vs Remote Identifier                        │
//! │                                                                         │
//! │  The shell addresses listings by display index (0, 1, 2, ...).          │
//! │  The remote store addresses them by its own assigned id.                │
//! │                                                                         │
//! │  fetch  ──► record(id, item)    one entry per fetched/created listing  │
//! │  edit   ──► find(item)          resolve the id to address the update   │
//! │  delete ──► forget(item)        resolve and drop the entry             │
//! │  logout ──► clear()             the id space dies with the session     │
//! │                                                                         │
//! │  Identity is the (name, brand) pair. A lookup miss is a hard error:    │
//! │  a mutation that cannot be addressed must never be dropped silently.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{DomainError, DomainResult};
use crate::fields::{Brand, Name};
use crate::item::Item;

/// Identifier assigned by the remote store.
pub type RemoteId = i64;

/// One (remote id, name, brand) association.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LedgerEntry {
    id: RemoteId,
    name: Name,
    brand: Brand,
}

impl LedgerEntry {
    fn matches(&self, item: &Item) -> bool {
        self.name == item.name && self.brand == item.brand
    }
}

/// Session-scoped table reconciling local listings with remote ids.
///
/// Entries are appended on fetch and create, removed on delete, and looked
/// up by a linear scan over the (name, brand) identity. Duplicate
/// identities are representable; lookups resolve to the first match.
/// Linear scan is fine at session-listing sizes; a keyed map would replace
/// it if listings grew large.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteLedger {
    entries: Vec<LedgerEntry>,
}

impl RemoteLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked associations.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an association for `item` under the remote `id`.
    pub fn record(&mut self, id: RemoteId, item: &Item) {
        self.entries.push(LedgerEntry {
            id,
            name: item.name.clone(),
            brand: item.brand.clone(),
        });
    }

    /// Resolves the remote id for `item`.
    ///
    /// Scans for the first entry matching the item's (name, brand). Absence
    /// is a hard `NotTracked` error, never an empty result.
    pub fn find(&self, item: &Item) -> DomainResult<RemoteId> {
        self.entries
            .iter()
            .find(|entry| entry.matches(item))
            .map(|entry| entry.id)
            .ok_or_else(|| self.miss(item))
    }

    /// Removes the first entry matching `item`, returning its id.
    pub fn forget(&mut self, item: &Item) -> DomainResult<RemoteId> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.matches(item))
            .ok_or_else(|| self.miss(item))?;

        Ok(self.entries.remove(position).id)
    }

    /// True when some entry carries this (name, brand) identity.
    pub fn is_tracked(&self, name: &Name, brand: &Brand) -> bool {
        self.entries
            .iter()
            .any(|entry| &entry.name == name && &entry.brand == brand)
    }

    /// Empties the ledger (used before a fresh fetch and on logout).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn miss(&self, item: &Item) -> DomainError {
        DomainError::NotTracked {
            name: item.name.to_string(),
            brand: item.brand.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Category, Condition, Description};
    use crate::price::Price;

    fn item(name: &str, brand: &str) -> Item {
        Item::new(
            Name::parse(name).unwrap(),
            Description::empty(),
            Condition::AsNew,
            Brand::parse(brand).unwrap(),
            Price::new(2, 0).unwrap(),
            Category::parse("Scarpe").unwrap(),
        )
    }

    #[test]
    fn test_record_then_find() {
        let mut ledger = RemoteLedger::new();
        ledger.record(6, &item("davide", "nike"));
        ledger.record(9, &item("marco", "adidas"));

        assert_eq!(ledger.find(&item("davide", "nike")).unwrap(), 6);
        assert_eq!(ledger.find(&item("marco", "adidas")).unwrap(), 9);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_find_miss_is_a_hard_error() {
        let ledger = RemoteLedger::new();
        let err = ledger.find(&item("davide", "nike")).unwrap_err();
        assert!(matches!(err, DomainError::NotTracked { .. }));
    }

    #[test]
    fn test_forget_removes_exactly_one_entry() {
        let mut ledger = RemoteLedger::new();
        ledger.record(6, &item("davide", "nike"));
        ledger.record(7, &item("davide", "nike"));

        assert_eq!(ledger.forget(&item("davide", "nike")).unwrap(), 6);
        assert_eq!(ledger.len(), 1);
        // The later duplicate is now the first match.
        assert_eq!(ledger.find(&item("davide", "nike")).unwrap(), 7);

        ledger.forget(&item("davide", "nike")).unwrap();
        assert!(ledger.forget(&item("davide", "nike")).is_err());
    }

    #[test]
    fn test_identity_is_name_and_brand_only() {
        let mut ledger = RemoteLedger::new();
        ledger.record(6, &item("davide", "nike"));

        // A different price or condition does not change identity.
        let mut richer = item("davide", "nike");
        richer.price = Price::new(999, 99).unwrap();
        richer.condition = Condition::AcceptableCondition;
        assert_eq!(ledger.find(&richer).unwrap(), 6);

        assert!(ledger.find(&item("davide", "adidas")).is_err());
    }

    #[test]
    fn test_is_tracked_and_clear() {
        let mut ledger = RemoteLedger::new();
        let tracked = item("davide", "nike");
        ledger.record(6, &tracked);

        assert!(ledger.is_tracked(&tracked.name, &tracked.brand));
        ledger.clear();
        assert!(ledger.is_empty());
        assert!(!ledger.is_tracked(&tracked.name, &tracked.brand));
    }
}
