//! VIP Cabin Model

use crate::util::{entity_id, now_millis};
use serde::{Deserialize, Serialize};

/// VIP cabin status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VipCabinStatus {
    #[default]
    Free,
    Occupied,
    Reserved,
    Maintenance,
}

/// VIP cabin entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VipCabin {
    pub id: String,
    /// Display name, e.g. "Кабина 1" or "Президентская"
    pub name: String,
    pub status: VipCabinStatus,
    pub capacity: i32,
    /// Hourly rental rate, if charged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_hour: Option<f64>,
    /// Караоке, проектор, кондиционер, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_reservation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create VIP cabin payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VipCabinCreate {
    pub name: String,
    pub capacity: i32,
    pub price_per_hour: Option<f64>,
    pub amenities: Option<Vec<String>>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl VipCabin {
    pub fn create(data: VipCabinCreate) -> Self {
        let now = now_millis();
        Self {
            id: entity_id("vip"),
            name: data.name,
            status: VipCabinStatus::Free,
            capacity: data.capacity,
            price_per_hour: data.price_per_hour,
            amenities: data.amenities,
            location: data.location,
            current_order_id: None,
            current_reservation_id: None,
            notes: data.notes,
            created_at: now,
            updated_at: now,
        }
    }
}
