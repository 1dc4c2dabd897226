//! Reservation Model

use crate::util::{entity_id, now_millis};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reservation status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    #[default]
    Confirmed,
    CheckedIn,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    /// Current reservations hold their table/cabin
    pub fn is_current(&self) -> bool {
        !matches!(self, ReservationStatus::Completed | ReservationStatus::Cancelled)
    }
}

/// What kind of seating is reserved
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReservationType {
    Table,
    VipCabin,
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ReservationType,
    /// Set when kind == table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    /// Set when kind == vip_cabin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_cabin_id: Option<String>,
    pub guest_name: String,
    pub guest_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    pub number_of_guests: i32,
    pub reservation_date: NaiveDate,
    /// Time of day, "HH:MM"
    pub reservation_time: String,
    /// Duration in minutes (VIP cabins)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    pub status: ReservationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub kind: ReservationType,
    /// Table or cabin id, matching `kind`
    pub location_id: String,
    pub guest_name: String,
    pub guest_phone: String,
    pub guest_email: Option<String>,
    pub number_of_guests: i32,
    pub reservation_date: NaiveDate,
    pub reservation_time: String,
    pub duration: Option<i32>,
    pub special_requests: Option<String>,
    pub notes: Option<String>,
}

impl Reservation {
    pub fn create(data: ReservationCreate) -> Self {
        let now = now_millis();
        let (table_id, vip_cabin_id) = match data.kind {
            ReservationType::Table => (Some(data.location_id), None),
            ReservationType::VipCabin => (None, Some(data.location_id)),
        };
        Self {
            id: entity_id("res"),
            kind: data.kind,
            table_id,
            vip_cabin_id,
            guest_name: data.guest_name,
            guest_phone: data.guest_phone,
            guest_email: data.guest_email,
            number_of_guests: data.number_of_guests,
            reservation_date: data.reservation_date,
            reservation_time: data.reservation_time,
            duration: data.duration,
            status: ReservationStatus::Confirmed,
            special_requests: data.special_requests,
            notes: data.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// "YYYY-MM-DD HH:MM", the displayed slot
    pub fn display_time(&self) -> String {
        format!("{} {}", self.reservation_date, self.reservation_time)
    }

    /// The reserved table or cabin id
    pub fn location_id(&self) -> &str {
        match self.kind {
            ReservationType::Table => self.table_id.as_deref().unwrap_or_default(),
            ReservationType::VipCabin => self.vip_cabin_id.as_deref().unwrap_or_default(),
        }
    }
}
