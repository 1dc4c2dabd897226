//! Reservation Repository
//!
//! Plain CRUD over the reservations collection. Unlike the floor-plan
//! repositories there is no seed data: a fresh database starts with no
//! reservations. Status changes that must stay consistent with the
//! table/cabin back-references live in [`crate::floor::FloorService`].

use super::BaseRepository;
use crate::storage::FloorStorage;
use shared::models::{Reservation, ReservationType};

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(storage: FloorStorage) -> Self {
        Self {
            base: BaseRepository::new(storage),
        }
    }

    pub fn get_all(&self) -> Vec<Reservation> {
        self.base.load()
    }

    pub fn save_all(&self, reservations: &[Reservation]) {
        self.base.store(reservations);
    }

    pub fn add(&self, reservation: Reservation) {
        let mut reservations = self.get_all();
        reservations.push(reservation);
        self.save_all(&reservations);
    }

    pub fn update(&self, reservation: Reservation) {
        self.base.update_in(self.get_all(), reservation);
    }

    pub fn delete(&self, id: &str) {
        self.base.delete_from(self.get_all(), id);
    }

    pub fn find_by_id(&self, id: &str) -> Option<Reservation> {
        self.get_all().into_iter().find(|r| r.id == id)
    }

    /// Reservations holding their seat (neither completed nor cancelled)
    pub fn get_current(&self) -> Vec<Reservation> {
        self.get_all()
            .into_iter()
            .filter(|r| r.status.is_current())
            .collect()
    }

    /// The live reservation on a given table/cabin, if any
    pub fn find_active_by_location(
        &self,
        kind: ReservationType,
        location_id: &str,
    ) -> Option<Reservation> {
        self.get_all()
            .into_iter()
            .find(|r| r.status.is_current() && r.kind == kind && r.location_id() == location_id)
    }
}
