//! Dish Repository

use super::BaseRepository;
use crate::seed;
use crate::storage::FloorStorage;
use shared::models::Dish;

#[derive(Clone)]
pub struct DishRepository {
    base: BaseRepository,
}

impl DishRepository {
    pub fn new(storage: FloorStorage) -> Self {
        Self {
            base: BaseRepository::new(storage),
        }
    }

    /// All dishes, seeding the sample menu when the collection is empty
    pub fn get_all(&self) -> Vec<Dish> {
        self.base.load_or_seed(seed::default_dishes)
    }

    /// Dishes currently offered to guests
    pub fn get_available(&self) -> Vec<Dish> {
        self.get_all().into_iter().filter(|d| d.is_available).collect()
    }

    pub fn find_by_category(&self, category_id: &str) -> Vec<Dish> {
        self.get_all()
            .into_iter()
            .filter(|d| d.category_id == category_id)
            .collect()
    }

    pub fn save_all(&self, dishes: &[Dish]) {
        self.base.store(dishes);
    }

    pub fn add(&self, dish: Dish) {
        let mut dishes = self.get_all();
        dishes.push(dish);
        self.save_all(&dishes);
    }

    pub fn update(&self, dish: Dish) {
        self.base.update_in(self.get_all(), dish);
    }

    pub fn delete(&self, id: &str) {
        self.base.delete_from(self.get_all(), id);
    }

    pub fn find_by_id(&self, id: &str) -> Option<Dish> {
        self.get_all().into_iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> DishRepository {
        DishRepository::new(FloorStorage::open_in_memory().unwrap())
    }

    #[test]
    fn test_seeds_exactly_once() {
        let repo = repo();
        let first = repo.get_all();
        assert!(!first.is_empty());
        let second = repo.get_all();
        assert_eq!(second.len(), first.len());
    }

    #[test]
    fn test_available_filter() {
        let repo = repo();
        let mut dish = repo.get_all().remove(0);
        dish.is_available = false;
        let id = dish.id.clone();
        repo.update(dish);

        assert!(repo.get_available().iter().all(|d| d.id != id));
        assert!(repo.find_by_id(&id).is_some());
    }

    #[test]
    fn test_find_by_category() {
        let repo = repo();
        let dish = &repo.get_all()[0];
        let peers = repo.find_by_category(&dish.category_id);
        assert!(peers.iter().any(|d| d.id == dish.id));
        assert!(peers.iter().all(|d| d.category_id == dish.category_id));
    }
}
