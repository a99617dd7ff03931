//! # fleamarket-core: Pure Domain Logic for the FleaMarket Client
//!
//! This crate is the **heart** of the FleaMarket client. It contains the
//! validated domain model as pure types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     FleaMarket Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Shell (text menu)                            │   │
//! │  │    Sign-in screen ──► Market screen ──► forms & prompts         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              fleamarket-client (session, HTTP)                  │   │
//! │  │    login, fetch_all, add, remove, edit, sort, register          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ fleamarket-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  fields   │  │   price   │  │  market   │  │  ledger   │  │   │
//! │  │   │ Name,...  │  │   Price   │  │FleaMarket │  │ RemoteLedger │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`fields`] - Validated value types (Name, Brand, Condition, ...)
//! - [`price`] - Price type with exact integer arithmetic (no floating point!)
//! - [`item`] - The listing composite
//! - [`market`] - The ordered listing collection
//! - [`ledger`] - Local-to-remote identifier reconciliation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Self-validating values**: a constructed field always satisfies its
//!    rule; invalid instances cannot exist
//! 2. **No I/O**: network and file system access is FORBIDDEN here
//! 3. **Integer money**: prices are exact counts of minor units (i64)
//! 4. **Explicit errors**: all failures are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use fleamarket_core::{Brand, Category, Condition, Description, FleaMarket, Item, Name, Price};
//!
//! let item = Item::new(
//!     Name::parse("Airforce").unwrap(),
//!     Description::empty(),
//!     Condition::parse("2").unwrap(),
//!     Brand::parse("Nike").unwrap(),
//!     Price::parse("111.00").unwrap(),
//!     Category::parse("Scarpe").unwrap(),
//! );
//!
//! let mut market = FleaMarket::new();
//! market.add_item(item);
//! assert_eq!(market.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fields;
pub mod item;
pub mod ledger;
pub mod market;
pub mod price;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use fleamarket_core::Price` instead of
// `use fleamarket_core::price::Price`

pub use error::{DomainError, DomainResult, ValidationError, ValidationResult};
pub use fields::{Brand, Category, Condition, Description, Email, Name, Password, Username};
pub use item::Item;
pub use ledger::{RemoteId, RemoteLedger};
pub use market::FleaMarket;
pub use price::{Price, MAX_PRICE_CENTS, MAX_PRICE_UNITS};
