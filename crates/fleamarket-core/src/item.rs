//! # Item
//!
//! The immutable composite a single listing is made of.

use std::fmt;

use crate::fields::{Brand, Category, Condition, Description, Name};
use crate::price::Price;

/// One marketplace listing.
///
/// An `Item` is a plain aggregate of six already-validated fields; there is
/// nothing left to check at this level, so construction cannot fail.
///
/// Equality and ordering are derived component-wise in declaration order
/// (name, description, condition, brand, price, category). The listing's
/// sorts use single fields as keys; this full ordering is what breaks ties
/// deterministically when two items share a key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub name: Name,
    pub description: Description,
    pub condition: Condition,
    pub brand: Brand,
    pub price: Price,
    pub category: Category,
}

impl Item {
    /// Assembles an item from its validated fields.
    pub fn new(
        name: Name,
        description: Description,
        condition: Condition,
        brand: Brand,
        price: Price,
        category: Category,
    ) -> Self {
        Item {
            name,
            description,
            condition,
            brand,
            price,
            category,
        }
    }

    /// True when `other` has the same structural identity, i.e. the same
    /// (name, brand) pair the reconciliation ledger keys on.
    pub fn same_identity(&self, other: &Item) -> bool {
        self.name == other.name && self.brand == other.brand
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} - {} - {}",
            self.name,
            self.brand,
            self.condition.label(),
            self.price,
            self.category
        )
    }
}
