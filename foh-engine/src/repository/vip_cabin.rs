//! VIP Cabin Repository

use super::BaseRepository;
use crate::seed;
use crate::storage::FloorStorage;
use shared::models::VipCabin;

#[derive(Clone)]
pub struct VipCabinRepository {
    base: BaseRepository,
}

impl VipCabinRepository {
    pub fn new(storage: FloorStorage) -> Self {
        Self {
            base: BaseRepository::new(storage),
        }
    }

    /// All cabins, seeding the sample set when the collection is empty
    pub fn get_all(&self) -> Vec<VipCabin> {
        self.base.load_or_seed(seed::default_vip_cabins)
    }

    pub fn save_all(&self, cabins: &[VipCabin]) {
        self.base.store(cabins);
    }

    pub fn add(&self, cabin: VipCabin) {
        let mut cabins = self.get_all();
        cabins.push(cabin);
        self.save_all(&cabins);
    }

    pub fn update(&self, cabin: VipCabin) {
        self.base.update_in(self.get_all(), cabin);
    }

    pub fn delete(&self, id: &str) {
        self.base.delete_from(self.get_all(), id);
    }

    pub fn find_by_id(&self, id: &str) -> Option<VipCabin> {
        self.get_all().into_iter().find(|c| c.id == id)
    }
}
