//! Order Repository
//!
//! Beyond the uniform CRUD contract this repository owns the order status
//! machine: `new → in_progress → ready → served → paid`, with `cancelled`
//! reachable from any non-terminal state. `paid` and `cancelled` are
//! terminal. A transition into a terminal state releases the referencing
//! table/cabin in the same write transaction, so occupancy can never
//! outlive the order that caused it.

use redb::WriteTransaction;
use super::{BaseRepository, RepoError, RepoResult};
use crate::storage::{FloorStorage, StorageError, StorageResult, collections};
use shared::models::{Order, OrderItem, OrderItemInput, OrderStatus, Table, TableStatus, VipCabin, VipCabinStatus};
use shared::util::now_millis;

/// Partial item update; `quantity` of zero or less removes the line
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub quantity: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(storage: FloorStorage) -> Self {
        Self {
            base: BaseRepository::new(storage),
        }
    }

    /// All orders in storage order (no seed data)
    pub fn get_all(&self) -> Vec<Order> {
        self.base.load()
    }

    pub fn save_all(&self, orders: &[Order]) {
        self.base.store(orders);
    }

    pub fn add(&self, order: Order) {
        let mut orders = self.get_all();
        orders.push(order);
        self.save_all(&orders);
    }

    pub fn update(&self, order: Order) {
        self.base.update_in(self.get_all(), order);
    }

    /// Delete an order. When the order was still active, its table/cabin
    /// is released in the same transaction. Unknown id is a silent no-op.
    pub fn delete(&self, id: &str) -> RepoResult<()> {
        let storage = self.base.storage();
        let txn = storage.begin_write()?;
        let mut orders: Vec<Order> = storage.read_collection_txn(&txn, collections::ORDERS)?;
        let Some(pos) = orders.iter().position(|o| o.id == id) else {
            return Ok(());
        };
        let removed = orders.remove(pos);
        storage.write_collection_txn(&txn, collections::ORDERS, &orders)?;
        if removed.status.is_active() {
            release_order_location(storage, &txn, &removed)?;
        }
        txn.commit().map_err(StorageError::from)?;
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> Option<Order> {
        self.get_all().into_iter().find(|o| o.id == id)
    }

    pub fn find_by_table_id(&self, table_id: &str) -> Vec<Order> {
        self.get_all()
            .into_iter()
            .filter(|o| o.table_id.as_deref() == Some(table_id))
            .collect()
    }

    pub fn find_by_vip_cabin_id(&self, vip_cabin_id: &str) -> Vec<Order> {
        self.get_all()
            .into_iter()
            .filter(|o| o.vip_cabin_id.as_deref() == Some(vip_cabin_id))
            .collect()
    }

    /// Orders that are neither paid nor cancelled
    pub fn get_active_orders(&self) -> Vec<Order> {
        self.get_all()
            .into_iter()
            .filter(|o| o.status.is_active())
            .collect()
    }

    pub fn get_active_order_by_table_id(&self, table_id: &str) -> Option<Order> {
        self.get_all()
            .into_iter()
            .find(|o| o.status.is_active() && o.table_id.as_deref() == Some(table_id))
    }

    pub fn get_active_order_by_vip_cabin_id(&self, vip_cabin_id: &str) -> Option<Order> {
        self.get_all()
            .into_iter()
            .find(|o| o.status.is_active() && o.vip_cabin_id.as_deref() == Some(vip_cabin_id))
    }

    /// Move an order through its workflow. Entering `served` stamps
    /// `served_at`, entering `paid` stamps `paid_at`. Terminal orders
    /// reject any further transition. A terminal transition also frees
    /// the referencing table/cabin, all in one transaction.
    pub fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let storage = self.base.storage();
        let txn = storage.begin_write()?;
        let mut orders: Vec<Order> = storage.read_collection_txn(&txn, collections::ORDERS)?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        if order.status.is_terminal() {
            return Err(RepoError::InvalidTransition {
                from: order.status,
                to: status,
            });
        }

        let now = now_millis();
        order.status = status;
        order.updated_at = now;
        match status {
            OrderStatus::Served if order.served_at.is_none() => order.served_at = Some(now),
            OrderStatus::Paid if order.paid_at.is_none() => order.paid_at = Some(now),
            _ => {}
        }
        let updated = order.clone();

        storage.write_collection_txn(&txn, collections::ORDERS, &orders)?;
        if status.is_terminal() {
            release_order_location(storage, &txn, &updated)?;
        }
        txn.commit().map_err(StorageError::from)?;

        tracing::debug!(order_id = %updated.id, status = ?status, "Order status updated");
        Ok(updated)
    }

    /// Append a dish line and re-derive the total
    pub fn add_item(&self, order_id: &str, input: OrderItemInput) -> RepoResult<Order> {
        if input.quantity <= 0 {
            return Err(RepoError::Validation(
                "item quantity must be positive".to_string(),
            ));
        }
        self.mutate_items(order_id, move |items| {
            items.push(OrderItem::create(input));
            Ok(())
        })
    }

    /// Change a line's quantity/notes. Quantity of zero or less removes
    /// the line instead of storing a non-positive value.
    pub fn update_item(
        &self,
        order_id: &str,
        item_id: &str,
        changes: ItemChanges,
    ) -> RepoResult<Order> {
        self.mutate_items(order_id, move |items| {
            let idx = items
                .iter()
                .position(|i| i.id == item_id)
                .ok_or_else(|| RepoError::NotFound(format!("Order item {} not found", item_id)))?;
            if let Some(quantity) = changes.quantity {
                if quantity <= 0 {
                    items.remove(idx);
                    return Ok(());
                }
                items[idx].quantity = quantity;
            }
            if let Some(notes) = changes.notes {
                items[idx].notes = Some(notes);
            }
            Ok(())
        })
    }

    /// Remove a dish line and re-derive the total
    pub fn remove_item(&self, order_id: &str, item_id: &str) -> RepoResult<Order> {
        self.mutate_items(order_id, move |items| {
            let before = items.len();
            items.retain(|i| i.id != item_id);
            if items.len() == before {
                return Err(RepoError::NotFound(format!(
                    "Order item {} not found",
                    item_id
                )));
            }
            Ok(())
        })
    }

    /// Read-modify-write an order's items, always recomputing the total
    fn mutate_items(
        &self,
        order_id: &str,
        mutate: impl FnOnce(&mut Vec<OrderItem>) -> RepoResult<()>,
    ) -> RepoResult<Order> {
        let storage = self.base.storage();
        let txn = storage.begin_write()?;
        let mut orders: Vec<Order> = storage.read_collection_txn(&txn, collections::ORDERS)?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", order_id)))?;
        if order.status.is_terminal() {
            return Err(RepoError::Validation(
                "cannot modify items of a paid or cancelled order".to_string(),
            ));
        }

        mutate(&mut order.items)?;
        order.recompute_total();
        order.updated_at = now_millis();
        let updated = order.clone();

        storage.write_collection_txn(&txn, collections::ORDERS, &orders)?;
        txn.commit().map_err(StorageError::from)?;
        Ok(updated)
    }
}

/// Clear the table/cabin occupancy held by `order`, inside an open write
/// transaction. The back-reference is only cleared when it still points at
/// this order. A location holding a live reservation reverts to `reserved`
/// rather than `free`.
pub(crate) fn release_order_location(
    storage: &FloorStorage,
    txn: &WriteTransaction,
    order: &Order,
) -> StorageResult<()> {
    let now = now_millis();
    if let Some(ref table_id) = order.table_id {
        let mut tables: Vec<Table> = storage.read_collection_txn(txn, collections::TABLES)?;
        if let Some(table) = tables.iter_mut().find(|t| &t.id == table_id)
            && table.current_order_id.as_deref() == Some(order.id.as_str())
        {
            table.current_order_id = None;
            table.status = if table.current_reservation_id.is_some() {
                TableStatus::Reserved
            } else {
                TableStatus::Free
            };
            table.updated_at = now;
            storage.write_collection_txn(txn, collections::TABLES, &tables)?;
        }
    }
    if let Some(ref vip_cabin_id) = order.vip_cabin_id {
        let mut cabins: Vec<VipCabin> =
            storage.read_collection_txn(txn, collections::VIP_CABINS)?;
        if let Some(cabin) = cabins.iter_mut().find(|c| &c.id == vip_cabin_id)
            && cabin.current_order_id.as_deref() == Some(order.id.as_str())
        {
            cabin.current_order_id = None;
            cabin.status = if cabin.current_reservation_id.is_some() {
                VipCabinStatus::Reserved
            } else {
                VipCabinStatus::Free
            };
            cabin.updated_at = now;
            storage.write_collection_txn(txn, collections::VIP_CABINS, &cabins)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::TableRepository;
    use shared::models::{OrderLocation, Table, TableCreate};

    fn storage() -> FloorStorage {
        FloorStorage::open_in_memory().unwrap()
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

    fn seated_order(tables: &TableRepository, orders: &OrderRepository) -> (Table, Order) {
        let mut table = Table::create(TableCreate {
            name: "Стол 1".to_string(),
            capacity: 4,
            location: Some("Зал".to_string()),
            notes: None,
        });
        let order = Order::create(
            &OrderLocation::Table(table.id.clone()),
            &table.name,
            vec![OrderItem::create(item("d1", 300.0, 2))],
            None,
            None,
        );
        table.status = TableStatus::Occupied;
        table.current_order_id = Some(order.id.clone());
        tables.add(table.clone());
        orders.add(order.clone());
        (table, order)
    }

    #[test]
    fn test_active_order_queries() {
        let storage = storage();
        let tables = TableRepository::new(storage.clone());
        let orders = OrderRepository::new(storage);
        let (table, order) = seated_order(&tables, &orders);

        assert_eq!(orders.get_active_orders().len(), 1);
        let found = orders.get_active_order_by_table_id(&table.id).unwrap();
        assert_eq!(found.id, order.id);
        assert!(orders.get_active_order_by_vip_cabin_id("vip-x").is_none());

        orders.update_status(&order.id, OrderStatus::Cancelled).unwrap();
        assert!(orders.get_active_orders().is_empty());
        assert!(orders.get_active_order_by_table_id(&table.id).is_none());
    }

    #[test]
    fn test_paid_stamps_paid_at_and_frees_table() {
        let storage = storage();
        let tables = TableRepository::new(storage.clone());
        let orders = OrderRepository::new(storage);
        let (table, order) = seated_order(&tables, &orders);

        let paid = orders.update_status(&order.id, OrderStatus::Paid).unwrap();
        assert_eq!(paid.status, OrderStatus::Paid);
        let paid_at = paid.paid_at.expect("paid_at must be stamped");
        assert!(paid_at >= paid.created_at);

        // table released in the same transaction
        let freed = tables.find_by_id(&table.id).unwrap();
        assert_eq!(freed.status, TableStatus::Free);
        assert!(freed.current_order_id.is_none());
    }

    #[test]
    fn test_served_stamps_served_at() {
        let storage = storage();
        let tables = TableRepository::new(storage.clone());
        let orders = OrderRepository::new(storage);
        let (_, order) = seated_order(&tables, &orders);

        let served = orders.update_status(&order.id, OrderStatus::Served).unwrap();
        assert!(served.served_at.is_some());
        assert!(served.paid_at.is_none());
    }

    #[test]
    fn test_terminal_status_rejects_transition() {
        let storage = storage();
        let tables = TableRepository::new(storage.clone());
        let orders = OrderRepository::new(storage);
        let (_, order) = seated_order(&tables, &orders);

        orders.update_status(&order.id, OrderStatus::Paid).unwrap();
        let err = orders
            .update_status(&order.id, OrderStatus::New)
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::InvalidTransition {
                from: OrderStatus::Paid,
                to: OrderStatus::New
            }
        ));
    }

    #[test]
    fn test_update_status_unknown_order() {
        let orders = OrderRepository::new(storage());
        let err = orders
            .update_status("order-missing", OrderStatus::Ready)
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[test]
    fn test_item_mutations_rederive_total() {
        let storage = storage();
        let tables = TableRepository::new(storage.clone());
        let orders = OrderRepository::new(storage);
        let (_, order) = seated_order(&tables, &orders);
        assert_eq!(order.total_amount, 600.0);

        let with_tea = orders.add_item(&order.id, item("d2", 120.0, 1)).unwrap();
        assert_eq!(with_tea.total_amount, 720.0);

        let item_id = with_tea.items[0].id.clone();
        let fewer = orders
            .update_item(
                &order.id,
                &item_id,
                ItemChanges {
                    quantity: Some(1),
                    notes: None,
                },
            )
            .unwrap();
        assert_eq!(fewer.total_amount, 420.0);

        let removed = orders.remove_item(&order.id, &item_id).unwrap();
        assert_eq!(removed.total_amount, 120.0);
        assert_eq!(removed.items.len(), 1);
    }

    #[test]
    fn test_zero_quantity_removes_item() {
        let storage = storage();
        let tables = TableRepository::new(storage.clone());
        let orders = OrderRepository::new(storage);
        let (_, order) = seated_order(&tables, &orders);

        let item_id = order.items[0].id.clone();
        let updated = orders
            .update_item(
                &order.id,
                &item_id,
                ItemChanges {
                    quantity: Some(0),
                    notes: None,
                },
            )
            .unwrap();
        assert!(updated.items.is_empty());
        assert_eq!(updated.total_amount, 0.0);
        assert!(updated.items.iter().all(|i| i.quantity > 0));
    }

    #[test]
    fn test_add_item_rejects_non_positive_quantity() {
        let storage = storage();
        let tables = TableRepository::new(storage.clone());
        let orders = OrderRepository::new(storage);
        let (_, order) = seated_order(&tables, &orders);

        let err = orders.add_item(&order.id, item("d9", 100.0, 0)).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[test]
    fn test_delete_active_order_frees_table() {
        let storage = storage();
        let tables = TableRepository::new(storage.clone());
        let orders = OrderRepository::new(storage);
        let (table, order) = seated_order(&tables, &orders);

        orders.delete(&order.id).unwrap();
        assert!(orders.find_by_id(&order.id).is_none());
        let freed = tables.find_by_id(&table.id).unwrap();
        assert_eq!(freed.status, TableStatus::Free);
        assert!(freed.current_order_id.is_none());
    }
}
