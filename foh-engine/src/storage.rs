//! redb-based storage layer for the front-of-house collections
//!
//! One table maps a logical collection name to the JSON serialization of
//! the full collection array:
//!
//! | Key | Value |
//! |-----|-------|
//! | `tables` | `Vec<Table>` |
//! | `vip_cabins` | `Vec<VipCabin>` |
//! | `categories` | `Vec<Category>` |
//! | `dishes` | `Vec<Dish>` |
//! | `orders` | `Vec<Order>` |
//! | `reservations` | `Vec<Reservation>` |
//!
//! Every write replaces the whole array for a key, so a collection update
//! is a single atomic commit. Multi-collection mutations (e.g. an order
//! reaching a terminal status while its table is freed) go through the
//! `_txn` variants against one [`WriteTransaction`].
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`, leaving the file consistent
//! across power loss. There is no schema version field; upgrading an
//! entity shape requires a compatible superset of fields.
//!
//! # Failure semantics
//!
//! A value that fails to deserialize (corrupt JSON, incompatible shape)
//! degrades to an empty collection with a logged warning. Reads never fail
//! on bad data, only on database-level errors.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for all collections: key = collection name, value = JSON array
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

/// Logical collection keys
pub mod collections {
    pub const TABLES: &str = "tables";
    pub const VIP_CABINS: &str = "vip_cabins";
    pub const CATEGORIES: &str = "categories";
    pub const DISHES: &str = "dishes";
    pub const ORDERS: &str = "orders";
    pub const RESERVATIONS: &str = "reservations";

    pub const ALL: [&str; 6] = [TABLES, VIP_CABINS, CATEGORIES, DISHES, ORDERS, RESERVATIONS];
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Collection storage backed by redb
#[derive(Clone)]
pub struct FloorStorage {
    db: Arc<Database>,
}

impl FloorStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests, demos)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction spanning multiple collections
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    /// Read a full collection. Missing key or undecodable value yields an
    /// empty vec; the latter is logged.
    pub fn read_collection<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;
        match table.get(key)? {
            Some(value) => Ok(decode_or_default(key, value.value())),
            None => Ok(Vec::new()),
        }
    }

    /// Read a collection inside an open write transaction
    pub fn read_collection_txn<T: DeserializeOwned>(
        &self,
        txn: &WriteTransaction,
        key: &str,
    ) -> StorageResult<Vec<T>> {
        let table = txn.open_table(COLLECTIONS_TABLE)?;
        match table.get(key)? {
            Some(value) => Ok(decode_or_default(key, value.value())),
            None => Ok(Vec::new()),
        }
    }

    /// Replace a full collection in its own transaction
    pub fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> StorageResult<()> {
        let txn = self.begin_write()?;
        self.write_collection_txn(&txn, key, items)?;
        txn.commit()?;
        Ok(())
    }

    /// Replace a collection inside an open write transaction
    pub fn write_collection_txn<T: Serialize>(
        &self,
        txn: &WriteTransaction,
        key: &str,
        items: &[T],
    ) -> StorageResult<()> {
        let mut table = txn.open_table(COLLECTIONS_TABLE)?;
        let value = serde_json::to_vec(items)?;
        table.insert(key, value.as_slice())?;
        Ok(())
    }

    /// Remove every collection (factory reset)
    pub fn clear_all(&self) -> StorageResult<()> {
        let txn = self.begin_write()?;
        {
            let mut table = txn.open_table(COLLECTIONS_TABLE)?;
            for key in collections::ALL {
                table.remove(key)?;
            }
        }
        txn.commit()?;
        Ok(())
    }
}

fn decode_or_default<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Vec<T> {
    match serde_json::from_slice(bytes) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(collection = key, error = %e, "Undecodable collection, using empty");
            Vec::new()
        }
    }
}
