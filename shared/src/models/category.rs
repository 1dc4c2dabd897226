//! Category Model

use crate::util::{entity_id, now_millis};
use serde::{Deserialize, Serialize};

/// Menu category entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Emoji or image path shown next to the name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Ascending display order
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
}

impl Category {
    pub fn create(data: CategoryCreate) -> Self {
        let now = now_millis();
        Self {
            id: entity_id("cat"),
            name: data.name,
            description: data.description,
            icon: data.icon,
            sort_order: data.sort_order,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
