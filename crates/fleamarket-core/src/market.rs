//! # Listing Collection
//!
//! The ordered, index-addressable container of listings one session works
//! on.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    FleaMarket Operations                                │
//! │                                                                         │
//! │  Shell Action             Collection Call         State Change          │
//! │  ────────────             ───────────────         ────────────          │
//! │                                                                         │
//! │  Add listing ───────────► add_item(item) ───────► items.push(item)     │
//! │                                                                         │
//! │  Remove listing ────────► remove_item(i) ───────► items.remove(i)      │
//! │                                                                         │
//! │  Edit listing ──────────► replace_item(i, new) ─► items[i] = new       │
//! │                                                                         │
//! │  Sort ──────────────────► sort_by_*() ──────────► stable reorder       │
//! │                                                                         │
//! │  View ──────────────────► item(i) / iter() ─────► (read only)          │
//! │                                                                         │
//! │  NOTE: every index is bounds-checked first; out-of-range access is a   │
//! │        validation error, never a clamp and never a panic.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::item::Item;

/// The in-memory listing collection for one authenticated session.
///
/// ## Invariants
/// - Insertion order is the display/iteration order
/// - Valid indices are exactly `[0, len)`; anything else fails
/// - Structural duplicates are allowed here (the session layer decides
///   whether to reject them; the collection itself never does)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleaMarket {
    items: Vec<Item>,
}

impl FleaMarket {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listings currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no listings are held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bounds check shared by every index-addressed operation.
    fn check_index(&self, index: usize) -> ValidationResult<()> {
        if index >= self.items.len() {
            return Err(ValidationError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }

        Ok(())
    }

    /// Returns the listing at `index`.
    pub fn item(&self, index: usize) -> ValidationResult<&Item> {
        self.check_index(index)?;
        Ok(&self.items[index])
    }

    /// Appends a listing at the end. O(1); duplicates are not rejected.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Removes and returns the listing at `index`, shifting later listings
    /// down by one.
    pub fn remove_item(&mut self, index: usize) -> ValidationResult<Item> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Substitutes the listing at `index` in place, returning the one it
    /// displaced. Used by the edit operation.
    pub fn replace_item(&mut self, index: usize, item: Item) -> ValidationResult<Item> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.items[index], item))
    }

    /// Drops every listing.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates listings in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    // =========================================================================
    // Sort Orders
    // =========================================================================
    // All three sorts are stable: listings with equal keys keep their
    // relative input order. `Vec::sort_by` guarantees this.

    /// Sorts listings by ascending price.
    pub fn sort_by_price(&mut self) {
        self.items.sort_by(|a, b| a.price.cmp(&b.price));
    }

    /// Sorts listings by condition code (best condition first).
    pub fn sort_by_condition(&mut self) {
        self.items.sort_by(|a, b| a.condition.cmp(&b.condition));
    }

    /// Sorts listings alphabetically by brand.
    pub fn sort_by_brand(&mut self) {
        self.items.sort_by(|a, b| a.brand.cmp(&b.brand));
    }
}

impl<'a> IntoIterator for &'a FleaMarket {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Brand, Category, Condition, Description, Name};
    use crate::price::Price;

    fn fixture() -> Vec<Item> {
        [
            ("Airforce", "", "2", "Nike", 111_00, "Scarpe"),
            ("ChronoTrigger", "", "1", "SquareSoft", 6666_00, "Videogiochi"),
            ("Snes", "Prodotto vintage", "2", "Nintendo", 3333_00, "Console"),
            ("Scopa", "", "0", "Mastrolindo", 363636_00, "Casa e Pulizia"),
            ("thinkpad", "stolen from the Defcon", "2", "Lenovo", 636363_00, "Computer"),
        ]
        .into_iter()
        .map(|(name, description, condition, brand, total_cents, category)| {
            Item::new(
                Name::parse(name).unwrap(),
                Description::parse(description).unwrap(),
                Condition::parse(condition).unwrap(),
                Brand::parse(brand).unwrap(),
                Price::new(total_cents / 100, total_cents % 100).unwrap(),
                Category::parse(category).unwrap(),
            )
        })
        .collect()
    }

    #[test]
    fn test_add_items_preserves_order_and_count() {
        let mut market = FleaMarket::new();
        for (i, item) in fixture().into_iter().enumerate() {
            market.add_item(item.clone());
            assert_eq!(market.len(), i + 1);
            assert_eq!(market.item(i).unwrap(), &item);
        }
    }

    #[test]
    fn test_remove_item_shifts_later_items_down() {
        let items = fixture();
        let mut market = FleaMarket::new();
        for item in &items {
            market.add_item(item.clone());
        }

        let removed = market.remove_item(0).unwrap();
        assert_eq!(removed, items[0]);
        assert_eq!(market.len(), items.len() - 1);
        market.remove_item(0).unwrap();
        market.remove_item(0).unwrap();
        assert_eq!(market.item(0).unwrap(), &items[3]);

        while !market.is_empty() {
            market.remove_item(0).unwrap();
        }
        assert_eq!(market.len(), 0);
    }

    #[test]
    fn test_out_of_range_indices_fail() {
        let mut market = FleaMarket::new();

        // Everything fails on an empty collection.
        assert!(market.item(0).is_err());
        assert!(market.remove_item(0).is_err());
        assert!(market.replace_item(0, fixture().remove(0)).is_err());

        market.add_item(fixture().remove(0));
        assert!(market.item(1).is_err());
        assert!(market.remove_item(1).is_err());
        assert!(matches!(
            market.item(7),
            Err(ValidationError::IndexOutOfBounds { index: 7, len: 1 })
        ));
    }

    #[test]
    fn test_replace_item_substitutes_in_place() {
        let items = fixture();
        let mut market = FleaMarket::new();
        market.add_item(items[0].clone());
        market.add_item(items[1].clone());

        let displaced = market.replace_item(0, items[2].clone()).unwrap();
        assert_eq!(displaced, items[0]);
        assert_eq!(market.item(0).unwrap(), &items[2]);
        assert_eq!(market.item(1).unwrap(), &items[1]);
        assert_eq!(market.len(), 2);
    }

    #[test]
    fn test_sort_by_price() {
        let items = fixture();
        let mut market = FleaMarket::new();
        market.add_item(items[0].clone()); // 111
        market.add_item(items[1].clone()); // 6666
        market.add_item(items[2].clone()); // 3333

        market.sort_by_price();
        assert_eq!(market.item(0).unwrap(), &items[0]);
        assert_eq!(market.item(1).unwrap(), &items[2]);
        assert_eq!(market.item(2).unwrap(), &items[1]);
    }

    #[test]
    fn test_sort_by_condition() {
        let items = fixture();
        let mut market = FleaMarket::new();
        market.add_item(items[0].clone()); // condition 2
        market.add_item(items[1].clone()); // condition 1

        market.sort_by_condition();
        assert_eq!(market.item(0).unwrap(), &items[1]);
        assert_eq!(market.item(1).unwrap(), &items[0]);
    }

    #[test]
    fn test_sort_by_brand() {
        let items = fixture();
        let mut market = FleaMarket::new();
        market.add_item(items[0].clone()); // Nike
        market.add_item(items[1].clone()); // SquareSoft

        market.sort_by_brand();
        assert_eq!(market.item(0).unwrap(), &items[0]);
        assert_eq!(market.item(1).unwrap(), &items[1]);
    }

    #[test]
    fn test_sorts_are_stable() {
        // Three items share condition 2; sorting by condition must keep
        // their input order, with the single condition-1 item in front.
        let items = fixture();
        let mut market = FleaMarket::new();
        for item in &items {
            market.add_item(item.clone());
        }

        market.sort_by_condition();
        assert_eq!(market.item(0).unwrap(), &items[3]); // 0
        assert_eq!(market.item(1).unwrap(), &items[1]); // 1
        assert_eq!(market.item(2).unwrap(), &items[0]); // 2, first in
        assert_eq!(market.item(3).unwrap(), &items[2]); // 2, second in
        assert_eq!(market.item(4).unwrap(), &items[4]); // 2, third in
    }
}
