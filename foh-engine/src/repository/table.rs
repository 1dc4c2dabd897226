//! Table Repository

use super::BaseRepository;
use crate::seed;
use crate::storage::FloorStorage;
use shared::models::Table;

#[derive(Clone)]
pub struct TableRepository {
    base: BaseRepository,
}

impl TableRepository {
    pub fn new(storage: FloorStorage) -> Self {
        Self {
            base: BaseRepository::new(storage),
        }
    }

    /// All tables in storage order, seeding the sample floor plan when the
    /// collection is empty.
    pub fn get_all(&self) -> Vec<Table> {
        self.base.load_or_seed(seed::default_tables)
    }

    /// Replace the whole collection
    pub fn save_all(&self, tables: &[Table]) {
        self.base.store(tables);
    }

    pub fn add(&self, table: Table) {
        let mut tables = self.get_all();
        tables.push(table);
        self.save_all(&tables);
    }

    pub fn update(&self, table: Table) {
        self.base.update_in(self.get_all(), table);
    }

    pub fn delete(&self, id: &str) {
        self.base.delete_from(self.get_all(), id);
    }

    pub fn find_by_id(&self, id: &str) -> Option<Table> {
        self.get_all().into_iter().find(|t| t.id == id)
    }
}
