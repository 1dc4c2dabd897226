//! Table Model

use crate::util::{entity_id, now_millis};
use serde::{Deserialize, Serialize};

/// Table status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
    Reserved,
    WaitingPayment,
    Closed,
}

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    /// Display name, e.g. "Стол 5"
    pub name: String,
    pub status: TableStatus,
    pub capacity: i32,
    /// Free-text area label (зал, терраса, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Active order occupying this table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_order_id: Option<String>,
    /// Live reservation holding this table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_reservation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCreate {
    pub name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl Table {
    pub fn create(data: TableCreate) -> Self {
        let now = now_millis();
        Self {
            id: entity_id("table"),
            name: data.name,
            status: TableStatus::Free,
            capacity: data.capacity,
            location: data.location,
            current_order_id: None,
            current_reservation_id: None,
            notes: data.notes,
            created_at: now,
            updated_at: now,
        }
    }
}
