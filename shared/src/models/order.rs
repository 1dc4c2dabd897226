//! Order Model
//!
//! An order is a set of dish line-items bound to exactly one table or VIP
//! cabin. Line items carry name/price snapshots taken when the item was
//! added, so historical orders stay intact if the menu changes later.

use crate::util::{entity_id, now_millis};
use serde::{Deserialize, Serialize};

/// Order workflow status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    New,
    InProgress,
    Ready,
    Served,
    Paid,
    Cancelled,
}

impl OrderStatus {
    /// Terminal statuses admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }

    /// An active order keeps its table/cabin occupied
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

/// Where an order is seated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderLocation {
    Table(String),
    VipCabin(String),
}

impl OrderLocation {
    pub fn id(&self) -> &str {
        match self {
            OrderLocation::Table(id) | OrderLocation::VipCabin(id) => id,
        }
    }
}

/// One dish line in an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub dish_id: String,
    /// Dish name snapshot at add-time
    pub dish_name: String,
    /// Unit price snapshot at add-time, not the live dish price
    pub price: f64,
    pub quantity: i32,
    /// Без лука, острое, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Add-item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub dish_id: String,
    pub dish_name: String,
    pub price: f64,
    pub quantity: i32,
    pub notes: Option<String>,
}

impl OrderItem {
    pub fn create(data: OrderItemInput) -> Self {
        Self {
            id: entity_id("item"),
            dish_id: data.dish_id,
            dish_name: data.dish_name,
            price: data.price,
            quantity: data.quantity,
            notes: data.notes,
            created_at: now_millis(),
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_cabin_id: Option<String>,
    /// Table name snapshot for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Cabin name snapshot for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_cabin_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiter_name: Option<String>,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Always recomputed from items, never trusted as stored
    pub total_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub served_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<i64>,
}

impl Order {
    /// Build a new order seated at `location`. `location_name` is the
    /// table/cabin display name captured as a snapshot.
    pub fn create(
        location: &OrderLocation,
        location_name: &str,
        items: Vec<OrderItem>,
        waiter_name: Option<String>,
        notes: Option<String>,
    ) -> Self {
        let now = now_millis();
        let mut order = Self {
            id: entity_id("order"),
            table_id: None,
            vip_cabin_id: None,
            table_name: None,
            vip_cabin_name: None,
            waiter_name,
            items,
            status: OrderStatus::New,
            total_amount: 0.0,
            notes,
            created_at: now,
            updated_at: now,
            served_at: None,
            paid_at: None,
        };
        match location {
            OrderLocation::Table(id) => {
                order.table_id = Some(id.clone());
                order.table_name = Some(location_name.to_string());
            }
            OrderLocation::VipCabin(id) => {
                order.vip_cabin_id = Some(id.clone());
                order.vip_cabin_name = Some(location_name.to_string());
            }
        }
        order.recompute_total();
        order
    }

    /// Re-derive `total_amount` from the current items
    pub fn recompute_total(&mut self) {
        self.total_amount = self.items.iter().map(OrderItem::line_total).sum();
    }

    /// The table/cabin this order is seated at, if any
    pub fn location(&self) -> Option<OrderLocation> {
        if let Some(ref id) = self.table_id {
            Some(OrderLocation::Table(id.clone()))
        } else {
            self.vip_cabin_id
                .as_ref()
                .map(|id| OrderLocation::VipCabin(id.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(dish_id: &str, price: f64, quantity: i32) -> OrderItem {
        OrderItem::create(OrderItemInput {
            dish_id: dish_id.to_string(),
            dish_name: format!("dish {}", dish_id),
            price,
            quantity,
            notes: None,
        })
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let order = Order::create(
            &OrderLocation::Table("t1".to_string()),
            "Стол 1",
            vec![item("d1", 300.0, 2), item("d2", 150.0, 1)],
            None,
            None,
        );
        assert_eq!(order.total_amount, 750.0);
        assert_eq!(order.table_name.as_deref(), Some("Стол 1"));
        assert!(order.vip_cabin_id.is_none());
    }

    #[test]
    fn test_recompute_after_mutation() {
        let mut order = Order::create(
            &OrderLocation::VipCabin("v1".to_string()),
            "Кабина 1",
            vec![item("d1", 300.0, 2)],
            None,
            None,
        );
        order.items[0].quantity = 3;
        order.recompute_total();
        assert_eq!(order.total_amount, 900.0);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Paid.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Served.is_active());
        assert!(OrderStatus::New.is_active());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        let status: OrderStatus = serde_json::from_str("\"paid\"").unwrap();
        assert_eq!(status, OrderStatus::Paid);
    }

    #[test]
    fn test_location_round_trip() {
        let order = Order::create(
            &OrderLocation::Table("t9".to_string()),
            "Стол 9",
            vec![],
            None,
            None,
        );
        assert_eq!(order.location(), Some(OrderLocation::Table("t9".to_string())));
    }
}
