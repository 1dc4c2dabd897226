//! Category Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::seed;
use crate::storage::FloorStorage;
use shared::models::{Category, Dish};

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(storage: FloorStorage) -> Self {
        Self {
            base: BaseRepository::new(storage),
        }
    }

    /// All categories in storage order, seeding the sample menu sections
    /// when the collection is empty
    pub fn get_all(&self) -> Vec<Category> {
        self.base.load_or_seed(seed::default_categories)
    }

    /// Categories by ascending sort order (the display order)
    pub fn get_all_sorted(&self) -> Vec<Category> {
        let mut categories = self.get_all();
        categories.sort_by_key(|c| c.sort_order);
        categories
    }

    pub fn save_all(&self, categories: &[Category]) {
        self.base.store(categories);
    }

    pub fn add(&self, category: Category) {
        let mut categories = self.get_all();
        categories.push(category);
        self.save_all(&categories);
    }

    pub fn update(&self, category: Category) {
        self.base.update_in(self.get_all(), category);
    }

    /// Delete a category. Rejected while any dish still references it;
    /// move or delete the dishes first. Unknown id is a silent no-op.
    pub fn delete(&self, id: &str) -> RepoResult<()> {
        let dish_count = self
            .base
            .load::<Dish>()
            .iter()
            .filter(|d| d.category_id == id)
            .count();
        if dish_count > 0 {
            return Err(RepoError::CategoryInUse {
                id: id.to_string(),
                dish_count,
            });
        }
        self.base.delete_from(self.get_all(), id);
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> Option<Category> {
        self.get_all().into_iter().find(|c| c.id == id)
    }
}
