//! Floor Service
//!
//! Cross-entity workflows that must keep orders, reservations and the
//! floor plan consistent: seating a new order, booking a table/cabin,
//! and closing a reservation out. Every workflow runs in one write
//! transaction so a failure can never leave a table pointing at an
//! order that was never stored.

use crate::repository::{
    OrderRepository, RepoError, RepoResult, ReservationRepository, TableRepository,
    VipCabinRepository,
};
use crate::storage::{FloorStorage, StorageError, collections};
use shared::models::{
    Order, OrderItem, OrderItemInput, OrderLocation, Reservation, ReservationCreate,
    ReservationStatus, ReservationType, Table, TableStatus, VipCabin, VipCabinStatus,
};
use shared::util::now_millis;

/// Everything needed to seat a new order
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub location: OrderLocation,
    pub items: Vec<OrderItemInput>,
    pub waiter_name: Option<String>,
    pub notes: Option<String>,
}

pub struct FloorService {
    storage: FloorStorage,
    tables: TableRepository,
    vip_cabins: VipCabinRepository,
    orders: OrderRepository,
    reservations: ReservationRepository,
}

impl FloorService {
    pub fn new(storage: FloorStorage) -> Self {
        Self {
            tables: TableRepository::new(storage.clone()),
            vip_cabins: VipCabinRepository::new(storage.clone()),
            orders: OrderRepository::new(storage.clone()),
            reservations: ReservationRepository::new(storage.clone()),
            storage,
        }
    }

    pub fn tables(&self) -> &TableRepository {
        &self.tables
    }

    pub fn vip_cabins(&self) -> &VipCabinRepository {
        &self.vip_cabins
    }

    pub fn orders(&self) -> &OrderRepository {
        &self.orders
    }

    pub fn reservations(&self) -> &ReservationRepository {
        &self.reservations
    }

    /// Seat a new order: the location must exist and carry no active
    /// order. Marks it occupied and stores the order atomically.
    pub fn open_order(&self, draft: OrderDraft) -> RepoResult<Order> {
        let OrderDraft {
            location,
            items,
            waiter_name,
            notes,
        } = draft;

        if items.is_empty() {
            return Err(RepoError::Validation(
                "order needs at least one item".to_string(),
            ));
        }
        if items.iter().any(|i| i.quantity <= 0) {
            return Err(RepoError::Validation(
                "item quantity must be positive".to_string(),
            ));
        }

        self.ensure_seeded();
        let items: Vec<OrderItem> = items.into_iter().map(OrderItem::create).collect();
        let now = now_millis();
        let txn = self.storage.begin_write()?;

        let order = match &location {
            OrderLocation::Table(id) => {
                let mut tables: Vec<Table> =
                    self.storage.read_collection_txn(&txn, collections::TABLES)?;
                let table = tables
                    .iter_mut()
                    .find(|t| &t.id == id)
                    .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;
                if table.current_order_id.is_some() {
                    return Err(RepoError::Occupied(format!(
                        "Table {} already has an active order",
                        table.name
                    )));
                }
                let order = Order::create(&location, &table.name, items, waiter_name, notes);
                table.status = TableStatus::Occupied;
                table.current_order_id = Some(order.id.clone());
                table.updated_at = now;
                self.storage
                    .write_collection_txn(&txn, collections::TABLES, &tables)?;
                order
            }
            OrderLocation::VipCabin(id) => {
                let mut cabins: Vec<VipCabin> = self
                    .storage
                    .read_collection_txn(&txn, collections::VIP_CABINS)?;
                let cabin = cabins
                    .iter_mut()
                    .find(|c| &c.id == id)
                    .ok_or_else(|| RepoError::NotFound(format!("VIP cabin {} not found", id)))?;
                if cabin.current_order_id.is_some() {
                    return Err(RepoError::Occupied(format!(
                        "Cabin {} already has an active order",
                        cabin.name
                    )));
                }
                if cabin.status == VipCabinStatus::Maintenance {
                    return Err(RepoError::Validation(format!(
                        "Cabin {} is under maintenance",
                        cabin.name
                    )));
                }
                let order = Order::create(&location, &cabin.name, items, waiter_name, notes);
                cabin.status = VipCabinStatus::Occupied;
                cabin.current_order_id = Some(order.id.clone());
                cabin.updated_at = now;
                self.storage
                    .write_collection_txn(&txn, collections::VIP_CABINS, &cabins)?;
                order
            }
        };

        let mut orders: Vec<Order> =
            self.storage.read_collection_txn(&txn, collections::ORDERS)?;
        orders.push(order.clone());
        self.storage
            .write_collection_txn(&txn, collections::ORDERS, &orders)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(order_id = %order.id, total = order.total_amount, "Order opened");
        Ok(order)
    }

    /// Book a table/cabin. The location must be fully free: no active
    /// order and no live reservation.
    pub fn reserve(&self, data: ReservationCreate) -> RepoResult<Reservation> {
        self.ensure_seeded();
        let reservation = Reservation::create(data);
        let now = now_millis();
        let txn = self.storage.begin_write()?;

        match reservation.kind {
            ReservationType::Table => {
                let mut tables: Vec<Table> =
                    self.storage.read_collection_txn(&txn, collections::TABLES)?;
                let table = tables
                    .iter_mut()
                    .find(|t| t.id == reservation.location_id())
                    .ok_or_else(|| {
                        RepoError::NotFound(format!("Table {} not found", reservation.location_id()))
                    })?;
                if table.current_order_id.is_some() || table.current_reservation_id.is_some() {
                    return Err(RepoError::Occupied(format!(
                        "Table {} is not free",
                        table.name
                    )));
                }
                table.status = TableStatus::Reserved;
                table.current_reservation_id = Some(reservation.id.clone());
                table.updated_at = now;
                self.storage
                    .write_collection_txn(&txn, collections::TABLES, &tables)?;
            }
            ReservationType::VipCabin => {
                let mut cabins: Vec<VipCabin> = self
                    .storage
                    .read_collection_txn(&txn, collections::VIP_CABINS)?;
                let cabin = cabins
                    .iter_mut()
                    .find(|c| c.id == reservation.location_id())
                    .ok_or_else(|| {
                        RepoError::NotFound(format!(
                            "VIP cabin {} not found",
                            reservation.location_id()
                        ))
                    })?;
                if cabin.current_order_id.is_some() || cabin.current_reservation_id.is_some() {
                    return Err(RepoError::Occupied(format!(
                        "Cabin {} is not free",
                        cabin.name
                    )));
                }
                if cabin.status == VipCabinStatus::Maintenance {
                    return Err(RepoError::Validation(format!(
                        "Cabin {} is under maintenance",
                        cabin.name
                    )));
                }
                cabin.status = VipCabinStatus::Reserved;
                cabin.current_reservation_id = Some(reservation.id.clone());
                cabin.updated_at = now;
                self.storage
                    .write_collection_txn(&txn, collections::VIP_CABINS, &cabins)?;
            }
        }

        let mut reservations: Vec<Reservation> = self
            .storage
            .read_collection_txn(&txn, collections::RESERVATIONS)?;
        reservations.push(reservation.clone());
        self.storage
            .write_collection_txn(&txn, collections::RESERVATIONS, &reservations)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            reservation_id = %reservation.id,
            slot = %reservation.display_time(),
            "Reservation booked"
        );
        Ok(reservation)
    }

    /// Mark the guest as arrived. The seat keeps its reserved hold until
    /// an order is opened or the reservation is closed out.
    pub fn check_in(&self, id: &str) -> RepoResult<Reservation> {
        let txn = self.storage.begin_write()?;
        let mut reservations: Vec<Reservation> = self
            .storage
            .read_collection_txn(&txn, collections::RESERVATIONS)?;
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))?;
        if !reservation.status.is_current() {
            return Err(RepoError::Validation(
                "reservation is already closed".to_string(),
            ));
        }
        reservation.status = ReservationStatus::CheckedIn;
        reservation.updated_at = now_millis();
        let updated = reservation.clone();
        self.storage
            .write_collection_txn(&txn, collections::RESERVATIONS, &reservations)?;
        txn.commit().map_err(StorageError::from)?;
        Ok(updated)
    }

    pub fn cancel_reservation(&self, id: &str) -> RepoResult<Reservation> {
        self.close_reservation(id, ReservationStatus::Cancelled)
    }

    pub fn complete_reservation(&self, id: &str) -> RepoResult<Reservation> {
        self.close_reservation(id, ReservationStatus::Completed)
    }

    /// The live reservation holding this seat, if any
    pub fn current_reservation_for(&self, location: &OrderLocation) -> Option<Reservation> {
        let (kind, id) = match location {
            OrderLocation::Table(id) => (ReservationType::Table, id.as_str()),
            OrderLocation::VipCabin(id) => (ReservationType::VipCabin, id.as_str()),
        };
        self.reservations.find_active_by_location(kind, id)
    }

    /// Close a reservation into a terminal status and drop its hold on
    /// the seat. A seat with an active order stays occupied.
    fn close_reservation(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> RepoResult<Reservation> {
        let now = now_millis();
        let txn = self.storage.begin_write()?;
        let mut reservations: Vec<Reservation> = self
            .storage
            .read_collection_txn(&txn, collections::RESERVATIONS)?;
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))?;
        if !reservation.status.is_current() {
            return Err(RepoError::Validation(
                "reservation is already closed".to_string(),
            ));
        }
        reservation.status = status;
        reservation.updated_at = now;
        let closed = reservation.clone();
        self.storage
            .write_collection_txn(&txn, collections::RESERVATIONS, &reservations)?;

        match closed.kind {
            ReservationType::Table => {
                let mut tables: Vec<Table> =
                    self.storage.read_collection_txn(&txn, collections::TABLES)?;
                if let Some(table) = tables.iter_mut().find(|t| t.id == closed.location_id())
                    && table.current_reservation_id.as_deref() == Some(closed.id.as_str())
                {
                    table.current_reservation_id = None;
                    if table.current_order_id.is_none() {
                        table.status = TableStatus::Free;
                    }
                    table.updated_at = now;
                    self.storage
                        .write_collection_txn(&txn, collections::TABLES, &tables)?;
                }
            }
            ReservationType::VipCabin => {
                let mut cabins: Vec<VipCabin> = self
                    .storage
                    .read_collection_txn(&txn, collections::VIP_CABINS)?;
                if let Some(cabin) = cabins.iter_mut().find(|c| c.id == closed.location_id())
                    && cabin.current_reservation_id.as_deref() == Some(closed.id.as_str())
                {
                    cabin.current_reservation_id = None;
                    if cabin.current_order_id.is_none() {
                        cabin.status = VipCabinStatus::Free;
                    }
                    cabin.updated_at = now;
                    self.storage
                        .write_collection_txn(&txn, collections::VIP_CABINS, &cabins)?;
                }
            }
        }

        txn.commit().map_err(StorageError::from)?;
        tracing::info!(reservation_id = %closed.id, status = ?status, "Reservation closed");
        Ok(closed)
    }

    /// Seed data must exist before transactional reads look entities up
    /// by id, so trigger the seeding reads first.
    fn ensure_seeded(&self) {
        self.tables.get_all();
        self.vip_cabins.get_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::OrderStatus;

    fn service() -> FloorService {
        FloorService::new(FloorStorage::open_in_memory().unwrap())
    }

    fn item(dish_id: &str, price: f64, quantity: i32) -> OrderItemInput {
        OrderItemInput {
            dish_id: dish_id.to_string(),
            dish_name: format!("dish {}", dish_id),
            price,
            quantity,
            notes: None,
        }
    }

    fn booking(kind: ReservationType, location_id: &str) -> ReservationCreate {
        ReservationCreate {
            kind,
            location_id: location_id.to_string(),
            guest_name: "Анна".to_string(),
            guest_phone: "+7 900 000-00-00".to_string(),
            guest_email: None,
            number_of_guests: 2,
            reservation_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            reservation_time: "19:00".to_string(),
            duration: None,
            special_requests: None,
            notes: None,
        }
    }

    #[test]
    fn test_open_order_marks_table_occupied() {
        let service = service();
        let order = service
            .open_order(OrderDraft {
                location: OrderLocation::Table("table-01".to_string()),
                items: vec![item("dish-01", 450.0, 2)],
                waiter_name: Some("Олег".to_string()),
                notes: None,
            })
            .unwrap();
        assert_eq!(order.total_amount, 900.0);
        assert_eq!(order.table_name.as_deref(), Some("Стол 1"));

        let table = service.tables().find_by_id("table-01").unwrap();
        assert_eq!(table.status, TableStatus::Occupied);
        assert_eq!(table.current_order_id.as_deref(), Some(order.id.as_str()));
    }

    #[test]
    fn test_open_order_rejects_occupied_location() {
        let service = service();
        let draft = || OrderDraft {
            location: OrderLocation::Table("table-02".to_string()),
            items: vec![item("dish-03", 320.0, 1)],
            waiter_name: None,
            notes: None,
        };
        service.open_order(draft()).unwrap();
        let err = service.open_order(draft()).unwrap_err();
        assert!(matches!(err, RepoError::Occupied(_)));
    }

    #[test]
    fn test_open_order_rejects_empty_and_invalid_items() {
        let service = service();
        let err = service
            .open_order(OrderDraft {
                location: OrderLocation::Table("table-01".to_string()),
                items: vec![],
                waiter_name: None,
                notes: None,
            })
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        let err = service
            .open_order(OrderDraft {
                location: OrderLocation::Table("table-01".to_string()),
                items: vec![item("dish-01", 450.0, 0)],
                waiter_name: None,
                notes: None,
            })
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[test]
    fn test_open_order_unknown_location() {
        let service = service();
        let err = service
            .open_order(OrderDraft {
                location: OrderLocation::VipCabin("vip-99".to_string()),
                items: vec![item("dish-01", 450.0, 1)],
                waiter_name: None,
                notes: None,
            })
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[test]
    fn test_reserve_and_cancel_round_trip() {
        let service = service();
        let reservation = service
            .reserve(booking(ReservationType::Table, "table-03"))
            .unwrap();
        assert_eq!(reservation.display_time(), "2024-06-01 19:00");

        let table = service.tables().find_by_id("table-03").unwrap();
        assert_eq!(table.status, TableStatus::Reserved);
        assert_eq!(
            table.current_reservation_id.as_deref(),
            Some(reservation.id.as_str())
        );
        assert!(
            service
                .current_reservation_for(&OrderLocation::Table("table-03".to_string()))
                .is_some()
        );

        let cancelled = service.cancel_reservation(&reservation.id).unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);

        let table = service.tables().find_by_id("table-03").unwrap();
        assert_eq!(table.status, TableStatus::Free);
        assert!(table.current_reservation_id.is_none());
        assert!(
            service
                .current_reservation_for(&OrderLocation::Table("table-03".to_string()))
                .is_none()
        );
    }

    #[test]
    fn test_reserve_rejects_held_location() {
        let service = service();
        service
            .reserve(booking(ReservationType::VipCabin, "vip-01"))
            .unwrap();
        let err = service
            .reserve(booking(ReservationType::VipCabin, "vip-01"))
            .unwrap_err();
        assert!(matches!(err, RepoError::Occupied(_)));
    }

    #[test]
    fn test_check_in_keeps_hold() {
        let service = service();
        let reservation = service
            .reserve(booking(ReservationType::Table, "table-04"))
            .unwrap();
        let checked_in = service.check_in(&reservation.id).unwrap();
        assert_eq!(checked_in.status, ReservationStatus::CheckedIn);

        let table = service.tables().find_by_id("table-04").unwrap();
        assert_eq!(table.status, TableStatus::Reserved);
    }

    #[test]
    fn test_closing_reservation_twice_fails() {
        let service = service();
        let reservation = service
            .reserve(booking(ReservationType::Table, "table-05"))
            .unwrap();
        service.complete_reservation(&reservation.id).unwrap();
        let err = service.cancel_reservation(&reservation.id).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[test]
    fn test_paid_order_reverts_to_reserved_when_booked() {
        let service = service();
        let reservation = service
            .reserve(booking(ReservationType::Table, "table-06"))
            .unwrap();
        // guest arrived, order opened on the reserved table
        let order = service
            .open_order(OrderDraft {
                location: OrderLocation::Table("table-06".to_string()),
                items: vec![item("dish-04", 1200.0, 1)],
                waiter_name: None,
                notes: None,
            })
            .unwrap();
        service
            .orders()
            .update_status(&order.id, OrderStatus::Paid)
            .unwrap();

        // the reservation still holds the table
        let table = service.tables().find_by_id("table-06").unwrap();
        assert_eq!(table.status, TableStatus::Reserved);
        assert!(table.current_order_id.is_none());
        assert_eq!(
            table.current_reservation_id.as_deref(),
            Some(reservation.id.as_str())
        );
    }
}
