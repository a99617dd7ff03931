//! # fleamarket-client: Remote Store Contract and Session Layer
//!
//! Connects the pure domain model in `fleamarket-core` to the marketplace
//! service.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    fleamarket-client (THIS CRATE)                       │
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────────────┐ │
//! │  │  Session    │  │ RemoteStore │  │  HttpStore                      │ │
//! │  │ (session.rs)│  │ (store.rs)  │  │  (http.rs)                      │ │
//! │  │             │  │             │  │                                 │ │
//! │  │ Owns listing│◄─│ Abstract    │◄─│ REST + token auth over          │ │
//! │  │ + id ledger │  │ capability  │  │ reqwest                         │ │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────────────┐ │
//! │  │  Records    │  │  Config     │  │  Errors                         │ │
//! │  │ (records.rs)│  │ (config.rs) │  │  (error.rs)                     │ │
//! │  │             │  │             │  │                                 │ │
//! │  │ Wire shapes │  │ env + URL   │  │ Connection / Rejected /         │ │
//! │  │ + decoding  │  │ defaults    │  │ Contract / Duplicate            │ │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Guarantees
//! - **Session-scoped state**: the listing and the reconciliation ledger
//!   live on the [`Session`], never in process-wide globals
//! - **Remote-first mutations**: local state changes only after the
//!   corresponding remote call succeeded, so a failure can never leave the
//!   listing and the ledger out of sync
//! - **Distrustful decoding**: every fetched record re-runs the domain
//!   validation rules before it becomes an `Item`

pub mod config;
pub mod error;
pub mod http;
pub mod records;
pub mod session;
pub mod store;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, FieldErrors};
pub use http::HttpStore;
pub use records::{ItemFields, ItemRecord};
pub use session::{register, Session};
pub use store::{AuthToken, Credentials, Registration, RemoteStore};
