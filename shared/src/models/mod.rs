//! Domain models
//!
//! One module per entity, each with its status enum and create payload.
//! All entities serialize with camelCase field names to match the
//! persisted JSON collections.

// Floor plan
pub mod table;
pub mod vip_cabin;

// Menu
pub mod category;
pub mod dish;

// Workflow
pub mod order;
pub mod reservation;

// Re-exports
pub use category::{Category, CategoryCreate};
pub use dish::{Dish, DishCreate};
pub use order::{Order, OrderItem, OrderItemInput, OrderLocation, OrderStatus};
pub use reservation::{Reservation, ReservationCreate, ReservationStatus, ReservationType};
pub use table::{Table, TableCreate, TableStatus};
pub use vip_cabin::{VipCabin, VipCabinCreate, VipCabinStatus};
