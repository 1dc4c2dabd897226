//! Front-of-house engine: floor plan, menu, orders and reservations over
//! an embedded redb database.

pub mod config;
pub mod floor;
pub mod logger;
pub mod repository;
pub mod seed;
pub mod storage;

pub use config::Config;
pub use floor::{FloorService, OrderDraft};
pub use storage::{FloorStorage, StorageError};
