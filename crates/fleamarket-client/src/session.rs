//! # Session Orchestration
//!
//! One authenticated session over the marketplace: the listing collection,
//! the reconciliation ledger and the auth token live here, scoped to the
//! session object rather than to the process.
//!
//! ## Mutation Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Remote-First Mutations                                │
//! │                                                                         │
//! │  add(item)                                                             │
//! │       │ 1. duplicate check against the ledger                          │
//! │       │ 2. remote create ──► assigned id                               │
//! │       │ 3. ledger.record(id) + market.add_item                         │
//! │                                                                         │
//! │  remove(index)                                                         │
//! │       │ 1. bounds check, ledger.find ──► id                            │
//! │       │ 2. remote delete(id)                                           │
//! │       │ 3. ledger.forget + market.remove_item                          │
//! │                                                                         │
//! │  edit(index, new_item)                                                 │
//! │       │ 1. bounds check, ledger.find(old) ──► id                       │
//! │       │ 2. remote update(id, new fields)                               │
//! │       │ 3. market.replace_item + ledger rewrite (forget old,           │
//! │       │    record new) so later calls address the right resource       │
//! │                                                                         │
//! │  A failed remote call aborts BEFORE any local change, so the listing   │
//! │  and the ledger can never silently drift apart.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use fleamarket_core::{FleaMarket, Item, RemoteLedger};

use crate::error::{ClientError, ClientResult};
use crate::records::ItemFields;
use crate::store::{AuthToken, Credentials, Registration, RemoteStore};

/// Creates a new account on the remote store.
///
/// Free function: registration happens before any session exists. A refusal
/// carries the server's per-field message map.
pub async fn register<S: RemoteStore>(store: &S, registration: &Registration) -> ClientResult<()> {
    store.register(registration).await
}

/// One authenticated marketplace session.
///
/// Owns the listing collection and the reconciliation ledger for its whole
/// lifetime; both start empty, are populated by [`Session::fetch_all`], and
/// die with the session on logout.
#[derive(Debug)]
pub struct Session<S: RemoteStore> {
    store: S,
    token: AuthToken,
    market: FleaMarket,
    ledger: RemoteLedger,
}

impl<S: RemoteStore> Session<S> {
    /// Logs in and opens a session with empty local state.
    pub async fn login(store: S, credentials: &Credentials) -> ClientResult<Self> {
        let token = store.login(credentials).await?;
        info!(username = %credentials.username, "session opened");

        Ok(Session {
            store,
            token,
            market: FleaMarket::new(),
            ledger: RemoteLedger::new(),
        })
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Number of listings currently held.
    pub fn len(&self) -> usize {
        self.market.len()
    }

    /// True when no listings are held.
    pub fn is_empty(&self) -> bool {
        self.market.is_empty()
    }

    /// Returns the listing at `index` (bounds-checked).
    pub fn item(&self, index: usize) -> ClientResult<&Item> {
        Ok(self.market.item(index)?)
    }

    /// Iterates listings in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.market.iter()
    }

    // =========================================================================
    // Remote-Synchronized Operations
    // =========================================================================

    /// Replaces the local listing and ledger with the remote store's current
    /// item list, returning the number of listings fetched.
    ///
    /// Every record is decoded *before* local state is touched: a
    /// connectivity failure or a malformed record leaves the existing
    /// (possibly stale) listing exactly as it was.
    pub async fn fetch_all(&mut self) -> ClientResult<usize> {
        let records = self.store.list_items(&self.token).await?;

        let mut decoded = Vec::with_capacity(records.len());
        for record in &records {
            decoded.push(record.decode()?);
        }

        self.market.clear();
        self.ledger.clear();
        for (id, item) in decoded {
            self.ledger.record(id, &item);
            self.market.add_item(item);
        }

        debug!(count = self.market.len(), "listing refreshed from the server");
        Ok(self.market.len())
    }

    /// Creates `item` remotely, then inserts it locally under the assigned
    /// id.
    ///
    /// A second item with the same (name, brand) identity is refused up
    /// front: the ledger keys on that pair, and a duplicate would make later
    /// edits and deletes ambiguous.
    pub async fn add(&mut self, item: Item) -> ClientResult<()> {
        if self.ledger.is_tracked(&item.name, &item.brand) {
            return Err(ClientError::Duplicate {
                name: item.name.to_string(),
                brand: item.brand.to_string(),
            });
        }

        let record = self
            .store
            .create_item(&self.token, &ItemFields::from_item(&item))
            .await?;

        self.ledger.record(record.id, &item);
        self.market.add_item(item);
        info!(id = record.id, "listing added");
        Ok(())
    }

    /// Deletes the listing at `index` remotely, then removes it locally.
    pub async fn remove(&mut self, index: usize) -> ClientResult<Item> {
        let item = self.market.item(index)?.clone();
        let id = self.ledger.find(&item)?;

        self.store.delete_item(&self.token, id).await?;

        self.ledger.forget(&item)?;
        let removed = self.market.remove_item(index)?;
        info!(id, "listing removed");
        Ok(removed)
    }

    /// Updates the listing at `index` remotely, then substitutes it locally.
    ///
    /// The remote id is resolved from the *old* item; the ledger entry is
    /// rewritten under the new identity so the id keeps following the
    /// listing through renames.
    pub async fn edit(&mut self, index: usize, new_item: Item) -> ClientResult<()> {
        let old_item = self.market.item(index)?.clone();

        // A rename onto another tracked identity would leave two ledger
        // entries answering for one (name, brand) pair.
        if !new_item.same_identity(&old_item)
            && self.ledger.is_tracked(&new_item.name, &new_item.brand)
        {
            return Err(ClientError::Duplicate {
                name: new_item.name.to_string(),
                brand: new_item.brand.to_string(),
            });
        }

        let id = self.ledger.find(&old_item)?;

        self.store
            .update_item(&self.token, id, &ItemFields::from_item(&new_item))
            .await?;

        self.ledger.forget(&old_item)?;
        self.ledger.record(id, &new_item);
        self.market.replace_item(index, new_item)?;
        info!(id, "listing edited");
        Ok(())
    }

    // =========================================================================
    // Local-Only Operations
    // =========================================================================

    /// Sorts listings by ascending price.
    pub fn sort_by_price(&mut self) {
        self.market.sort_by_price();
    }

    /// Sorts listings by condition code (best condition first).
    pub fn sort_by_condition(&mut self) {
        self.market.sort_by_condition();
    }

    /// Sorts listings alphabetically by brand.
    pub fn sort_by_brand(&mut self) {
        self.market.sort_by_brand();
    }

    /// Ends the session, dropping the token and all local state.
    pub fn logout(self) {
        info!("session closed");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use fleamarket_core::{
        Brand, Category, Condition, Description, DomainError, Name, Price, RemoteId,
        ValidationError,
    };

    use crate::records::ItemRecord;

    /// In-memory remote store: a vector of records plus switches that make
    /// individual calls fail like an unreachable server.
    #[derive(Debug)]
    struct MemoryStore {
        records: Mutex<Vec<ItemRecord>>,
        next_id: Mutex<RemoteId>,
        fail_list: AtomicBool,
        fail_mutations: AtomicBool,
        deleted: Mutex<Vec<RemoteId>>,
        updated: Mutex<Vec<RemoteId>>,
    }

    impl MemoryStore {
        fn with_records(records: Vec<ItemRecord>) -> Self {
            let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            MemoryStore {
                records: Mutex::new(records),
                next_id: Mutex::new(next_id),
                fail_list: AtomicBool::new(false),
                fail_mutations: AtomicBool::new(false),
                deleted: Mutex::new(Vec::new()),
                updated: Mutex::new(Vec::new()),
            }
        }

        fn down(&self) -> ClientError {
            ClientError::Connection("connection refused".to_string())
        }
    }

    impl Default for MemoryStore {
        fn default() -> Self {
            Self::with_records(Vec::new())
        }
    }

    #[async_trait]
    impl RemoteStore for MemoryStore {
        async fn login(&self, credentials: &Credentials) -> ClientResult<AuthToken> {
            if credentials.password.as_str() == "sbagliata1" {
                return Err(ClientError::InvalidCredentials);
            }
            Ok(AuthToken::new("test-key"))
        }

        async fn register(&self, _registration: &Registration) -> ClientResult<()> {
            Ok(())
        }

        async fn list_items(&self, _auth: &AuthToken) -> ClientResult<Vec<ItemRecord>> {
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(self.down());
            }
            Ok(self.records.lock().unwrap().clone())
        }

        async fn create_item(
            &self,
            _auth: &AuthToken,
            fields: &ItemFields,
        ) -> ClientResult<ItemRecord> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(self.down());
            }

            let mut next_id = self.next_id.lock().unwrap();
            let record = ItemRecord {
                id: *next_id,
                name: fields.name.clone(),
                description: fields.description.clone(),
                condition: fields.condition,
                brand: fields.brand.clone(),
                price: fields.price,
                category: fields.category.clone(),
            };
            *next_id += 1;
            self.records.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn update_item(
            &self,
            _auth: &AuthToken,
            id: RemoteId,
            _fields: &ItemFields,
        ) -> ClientResult<()> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(self.down());
            }
            self.updated.lock().unwrap().push(id);
            Ok(())
        }

        async fn delete_item(&self, _auth: &AuthToken, id: RemoteId) -> ClientResult<()> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(self.down());
            }
            self.deleted.lock().unwrap().push(id);
            Ok(())
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            username: "udonto".parse().unwrap(),
            password: "fazio9898".parse().unwrap(),
        }
    }

    fn record(id: RemoteId, name: &str, brand: &str, price: i64) -> ItemRecord {
        ItemRecord {
            id,
            name: name.to_string(),
            description: String::new(),
            condition: 0,
            brand: brand.to_string(),
            price,
            category: "Scarpe".to_string(),
        }
    }

    fn item(name: &str, brand: &str, units: i64) -> Item {
        Item::new(
            Name::parse(name).unwrap(),
            Description::empty(),
            Condition::GoodCondition,
            Brand::parse(brand).unwrap(),
            Price::new(units, 0).unwrap(),
            Category::parse("Scarpe").unwrap(),
        )
    }

    async fn session(store: MemoryStore) -> Session<MemoryStore> {
        Session::login(store, &credentials()).await.unwrap()
    }

    #[tokio::test]
    async fn test_login_refusal_propagates() {
        let bad = Credentials {
            username: "udonto".parse().unwrap(),
            password: "sbagliata1".parse().unwrap(),
        };
        let err = Session::login(MemoryStore::default(), &bad).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_fetch_all_populates_listing_and_ledger() {
        let store = MemoryStore::with_records(vec![
            record(6, "davide", "nike", 200),
            record(9, "marco", "adidas", 90_000),
        ]);
        let mut session = session(store).await;

        assert_eq!(session.fetch_all().await.unwrap(), 2);
        assert_eq!(session.len(), 2);
        assert_eq!(session.item(0).unwrap().name.as_str(), "davide");
        assert_eq!(session.item(1).unwrap().price.units(), 900);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_the_stale_listing() {
        let store = MemoryStore::with_records(vec![record(6, "davide", "nike", 200)]);
        let mut session = session(store).await;
        session.fetch_all().await.unwrap();

        session.store.fail_list.store(true, Ordering::SeqCst);
        let err = session.fetch_all().await.unwrap_err();
        assert!(err.is_connectivity());
        assert_eq!(session.len(), 1, "stale listing must survive a failed fetch");
        assert_eq!(session.item(0).unwrap().name.as_str(), "davide");
    }

    #[tokio::test]
    async fn test_fetch_with_malformed_record_keeps_the_stale_listing() {
        let store = MemoryStore::with_records(vec![record(6, "davide", "nike", 200)]);
        let mut session = session(store).await;
        session.fetch_all().await.unwrap();

        session
            .store
            .records
            .lock()
            .unwrap()
            .push(record(7, "<script>", "nike", 100));

        let err = session.fetch_all().await.unwrap_err();
        assert!(matches!(err, ClientError::Contract(_)));
        assert_eq!(session.len(), 1);
    }

    #[tokio::test]
    async fn test_add_records_the_assigned_id() {
        let mut session = session(MemoryStore::default()).await;
        session.add(item("Airforce", "Nike", 111)).await.unwrap();

        assert_eq!(session.len(), 1);
        // Removing immediately must address the id the store assigned (1).
        session.remove(0).await.unwrap();
        assert_eq!(*session.store.deleted.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_add_failure_leaves_local_state_untouched() {
        let mut session = session(MemoryStore::default()).await;
        session.store.fail_mutations.store(true, Ordering::SeqCst);

        let err = session.add(item("Airforce", "Nike", 111)).await.unwrap_err();
        assert!(err.is_connectivity());
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_structural_duplicates() {
        let mut session = session(MemoryStore::default()).await;
        session.add(item("Airforce", "Nike", 111)).await.unwrap();

        // Same (name, brand), different price: still a duplicate.
        let err = session.add(item("Airforce", "Nike", 999)).await.unwrap_err();
        assert!(matches!(err, ClientError::Duplicate { .. }));
        assert_eq!(session.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_addresses_the_fetched_remote_id() {
        let store = MemoryStore::with_records(vec![record(6, "davide", "nike", 200)]);
        let mut session = session(store).await;
        session.fetch_all().await.unwrap();

        let removed = session.remove(0).await.unwrap();
        assert_eq!(removed.name.as_str(), "davide");
        assert_eq!(*session.store.deleted.lock().unwrap(), vec![6]);
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn test_remove_failure_leaves_local_state_untouched() {
        let store = MemoryStore::with_records(vec![record(6, "davide", "nike", 200)]);
        let mut session = session(store).await;
        session.fetch_all().await.unwrap();

        session.store.fail_mutations.store(true, Ordering::SeqCst);
        assert!(session.remove(0).await.is_err());
        assert_eq!(session.len(), 1);
        // The entry is still addressable once the server is back.
        session.store.fail_mutations.store(false, Ordering::SeqCst);
        session.remove(0).await.unwrap();
        assert_eq!(*session.store.deleted.lock().unwrap(), vec![6]);
    }

    #[tokio::test]
    async fn test_remove_rejects_out_of_range_indices() {
        let mut session = session(MemoryStore::default()).await;
        let err = session.remove(0).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Domain(DomainError::Validation(
                ValidationError::IndexOutOfBounds { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_edit_updates_the_old_items_remote_id() {
        let store = MemoryStore::with_records(vec![record(6, "davide", "nike", 200)]);
        let mut session = session(store).await;
        session.fetch_all().await.unwrap();

        session.edit(0, item("Airforce", "Nike", 111)).await.unwrap();
        assert_eq!(*session.store.updated.lock().unwrap(), vec![6]);
        assert_eq!(session.item(0).unwrap().name.as_str(), "Airforce");

        // The ledger followed the rename: deleting now addresses id 6 again.
        session.remove(0).await.unwrap();
        assert_eq!(*session.store.deleted.lock().unwrap(), vec![6]);
    }

    #[tokio::test]
    async fn test_edit_rejects_renaming_onto_a_tracked_identity() {
        let store = MemoryStore::with_records(vec![
            record(6, "davide", "nike", 200),
            record(9, "marco", "adidas", 300),
        ]);
        let mut session = session(store).await;
        session.fetch_all().await.unwrap();

        let err = session.edit(1, item("davide", "nike", 5)).await.unwrap_err();
        assert!(matches!(err, ClientError::Duplicate { .. }));
        assert_eq!(session.item(1).unwrap().name.as_str(), "marco");
    }

    #[tokio::test]
    async fn test_edit_failure_leaves_local_state_untouched() {
        let store = MemoryStore::with_records(vec![record(6, "davide", "nike", 200)]);
        let mut session = session(store).await;
        session.fetch_all().await.unwrap();

        session.store.fail_mutations.store(true, Ordering::SeqCst);
        assert!(session.edit(0, item("Airforce", "Nike", 111)).await.is_err());
        assert_eq!(session.item(0).unwrap().name.as_str(), "davide");
    }

    #[tokio::test]
    async fn test_sorts_reorder_the_listing() {
        let store = MemoryStore::with_records(vec![
            record(1, "MiAir", "Xiaomi", 40_000),
            record(2, "Mac", "Apple", 1),
        ]);
        let mut session = session(store).await;
        session.fetch_all().await.unwrap();

        session.sort_by_price();
        assert_eq!(session.item(0).unwrap().name.as_str(), "Mac");

        session.sort_by_brand();
        assert_eq!(session.item(0).unwrap().brand.as_str(), "Apple");
    }
}
