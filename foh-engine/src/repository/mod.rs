//! Repository Module
//!
//! One repository per entity collection, all sharing the uniform contract:
//! `get_all` / `save_all` / `add` / `update` / `delete` / `find_by_id`.
//! Storage faults never surface from plain reads and writes — reads degrade
//! to an empty collection, writes log and drop (the UI re-reads on its next
//! refresh). Domain-rule violations come back as typed [`RepoError`] values.

// Menu
pub mod category;
pub mod dish;

// Floor plan
pub mod table;
pub mod vip_cabin;

// Workflow
pub mod order;
pub mod reservation;

// Re-exports
pub use category::CategoryRepository;
pub use dish::DishRepository;
pub use order::{ItemChanges, OrderRepository};
pub use reservation::ReservationRepository;
pub use table::TableRepository;
pub use vip_cabin::VipCabinRepository;

use crate::storage::{FloorStorage, StorageError, collections};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{
    Category, Dish, Order, OrderStatus, Reservation, Table, VipCabin,
};
use shared::util::now_millis;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Location occupied: {0}")]
    Occupied(String),

    #[error("Category {id} still has {dish_count} dish(es)")]
    CategoryInUse { id: String, dish_count: usize },

    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// A persisted entity: knows its collection key, its id, and how to stamp
/// its modification time.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
    fn touch(&mut self, now: i64);
}

macro_rules! impl_entity {
    ($ty:ty, $key:expr) => {
        impl Entity for $ty {
            const COLLECTION: &'static str = $key;

            fn id(&self) -> &str {
                &self.id
            }

            fn touch(&mut self, now: i64) {
                self.updated_at = now;
            }
        }
    };
}

impl_entity!(Table, collections::TABLES);
impl_entity!(VipCabin, collections::VIP_CABINS);
impl_entity!(Category, collections::CATEGORIES);
impl_entity!(Dish, collections::DISHES);
impl_entity!(Order, collections::ORDERS);
impl_entity!(Reservation, collections::RESERVATIONS);

/// Base repository with the shared storage handle
#[derive(Clone)]
pub struct BaseRepository {
    storage: FloorStorage,
}

impl BaseRepository {
    pub fn new(storage: FloorStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &FloorStorage {
        &self.storage
    }

    /// Load a full collection; a storage fault degrades to empty.
    pub(crate) fn load<T: Entity>(&self) -> Vec<T> {
        match self.storage.read_collection(T::COLLECTION) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(collection = T::COLLECTION, error = %e, "Load failed, using empty collection");
                Vec::new()
            }
        }
    }

    /// Persist a full collection; a storage fault is logged and dropped.
    pub(crate) fn store<T: Entity>(&self, items: &[T]) {
        if let Err(e) = self.storage.write_collection(T::COLLECTION, items) {
            tracing::error!(collection = T::COLLECTION, error = %e, "Persist failed");
        }
    }

    /// Load a collection, writing the seed set first whenever it is empty.
    pub(crate) fn load_or_seed<T: Entity>(&self, seed: impl FnOnce() -> Vec<T>) -> Vec<T> {
        let items = self.load::<T>();
        if !items.is_empty() {
            return items;
        }
        let seeded = seed();
        if !seeded.is_empty() {
            tracing::info!(
                collection = T::COLLECTION,
                count = seeded.len(),
                "Seeding empty collection"
            );
            self.store(&seeded);
        }
        seeded
    }

    /// Replace the item with a matching id, stamping its updated time.
    /// Silent no-op when the id is unknown.
    pub(crate) fn update_in<T: Entity>(&self, mut items: Vec<T>, item: T) {
        if let Some(slot) = items.iter_mut().find(|existing| existing.id() == item.id()) {
            let mut updated = item;
            updated.touch(now_millis());
            *slot = updated;
            self.store(&items);
        }
    }

    /// Remove the item with a matching id. Silent no-op when unknown.
    pub(crate) fn delete_from<T: Entity>(&self, mut items: Vec<T>, id: &str) {
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() != before {
            self.store(&items);
        }
    }
}
