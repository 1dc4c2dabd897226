//! Dish Model

use crate::util::{entity_id, now_millis};
use serde::{Deserialize, Serialize};

/// Menu dish entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in currency unit
    pub price: f64,
    /// Must reference a live category
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_available: bool,
    /// Preparation time in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_time: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergens: Option<Vec<String>>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create dish payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: String,
    pub image_url: Option<String>,
    pub preparation_time: Option<i32>,
    pub allergens: Option<Vec<String>>,
}

impl Dish {
    pub fn create(data: DishCreate) -> Self {
        let now = now_millis();
        Self {
            id: entity_id("dish"),
            name: data.name,
            description: data.description,
            price: data.price,
            category_id: data.category_id,
            image_url: data.image_url,
            is_available: true,
            preparation_time: data.preparation_time,
            allergens: data.allergens,
            created_at: now,
            updated_at: now,
        }
    }
}
