//! Seed Data
//!
//! Default floor plan and menu written into any empty collection on first
//! read. Ids are fixed rather than generated so the dish -> category
//! references stay valid across databases and re-seeds.

use shared::models::{Category, Dish, Table, TableStatus, VipCabin, VipCabinStatus};
use shared::util::now_millis;

pub const CAT_SALADS: &str = "cat-salads";
pub const CAT_HOT: &str = "cat-hot";
pub const CAT_DRINKS: &str = "cat-drinks";
pub const CAT_DESSERTS: &str = "cat-desserts";

fn table(id: &str, name: &str, capacity: i32, location: &str) -> Table {
    let now = now_millis();
    Table {
        id: id.to_string(),
        name: name.to_string(),
        status: TableStatus::Free,
        capacity,
        location: Some(location.to_string()),
        current_order_id: None,
        current_reservation_id: None,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_tables() -> Vec<Table> {
    vec![
        table("table-01", "Стол 1", 2, "Зал"),
        table("table-02", "Стол 2", 2, "Зал"),
        table("table-03", "Стол 3", 4, "Зал"),
        table("table-04", "Стол 4", 4, "Зал"),
        table("table-05", "Стол 5", 6, "Зал"),
        table("table-06", "Стол 6", 4, "Терраса"),
        table("table-07", "Стол 7", 4, "Терраса"),
        table("table-08", "Стол 8", 8, "Терраса"),
    ]
}

fn cabin(
    id: &str,
    name: &str,
    capacity: i32,
    price_per_hour: f64,
    amenities: &[&str],
) -> VipCabin {
    let now = now_millis();
    VipCabin {
        id: id.to_string(),
        name: name.to_string(),
        status: VipCabinStatus::Free,
        capacity,
        price_per_hour: Some(price_per_hour),
        amenities: Some(amenities.iter().map(|a| a.to_string()).collect()),
        location: Some("Второй этаж".to_string()),
        current_order_id: None,
        current_reservation_id: None,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_vip_cabins() -> Vec<VipCabin> {
    vec![
        cabin(
            "vip-01",
            "Кабина 1",
            6,
            1500.0,
            &["Караоке", "Кондиционер"],
        ),
        cabin(
            "vip-02",
            "Кабина 2",
            8,
            2000.0,
            &["Караоке", "Проектор", "Кондиционер"],
        ),
        cabin(
            "vip-03",
            "Президентская",
            12,
            5000.0,
            &["Караоке", "Проектор", "Кондиционер", "Отдельный вход"],
        ),
    ]
}

fn category(id: &str, name: &str, icon: &str, sort_order: i32) -> Category {
    let now = now_millis();
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        icon: Some(icon.to_string()),
        sort_order,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        category(CAT_SALADS, "Салаты", "🥗", 1),
        category(CAT_HOT, "Горячие блюда", "🍲", 2),
        category(CAT_DRINKS, "Напитки", "🥤", 3),
        category(CAT_DESSERTS, "Десерты", "🍰", 4),
    ]
}

fn dish(
    id: &str,
    name: &str,
    price: f64,
    category_id: &str,
    preparation_time: i32,
) -> Dish {
    let now = now_millis();
    Dish {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        price,
        category_id: category_id.to_string(),
        image_url: None,
        is_available: true,
        preparation_time: Some(preparation_time),
        allergens: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_dishes() -> Vec<Dish> {
    vec![
        dish("dish-01", "Цезарь с курицей", 450.0, CAT_SALADS, 15),
        dish("dish-02", "Греческий салат", 380.0, CAT_SALADS, 10),
        dish("dish-03", "Борщ", 320.0, CAT_HOT, 20),
        dish("dish-04", "Стейк из говядины", 1200.0, CAT_HOT, 30),
        dish("dish-05", "Паста Карбонара", 520.0, CAT_HOT, 20),
        dish("dish-06", "Морс клюквенный", 150.0, CAT_DRINKS, 5),
        dish("dish-07", "Чай с облепихой", 250.0, CAT_DRINKS, 10),
        dish("dish-08", "Тирамису", 350.0, CAT_DESSERTS, 10),
        dish("dish-09", "Чизкейк", 320.0, CAT_DESSERTS, 10),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_unique() {
        let tables: HashSet<String> = default_tables().into_iter().map(|t| t.id).collect();
        assert_eq!(tables.len(), default_tables().len());
        let dishes: HashSet<String> = default_dishes().into_iter().map(|d| d.id).collect();
        assert_eq!(dishes.len(), default_dishes().len());
    }

    #[test]
    fn test_dishes_reference_seed_categories() {
        let category_ids: HashSet<String> =
            default_categories().into_iter().map(|c| c.id).collect();
        for dish in default_dishes() {
            assert!(
                category_ids.contains(&dish.category_id),
                "dish {} references unknown category {}",
                dish.id,
                dish.category_id
            );
        }
    }

    #[test]
    fn test_everything_starts_free_and_available() {
        assert!(default_tables().iter().all(|t| t.status == TableStatus::Free));
        assert!(
            default_vip_cabins()
                .iter()
                .all(|c| c.status == VipCabinStatus::Free && c.price_per_hour.is_some())
        );
        assert!(default_dishes().iter().all(|d| d.is_available));
    }

    #[test]
    fn test_category_sort_orders_ascending() {
        let orders: Vec<i32> = default_categories().iter().map(|c| c.sort_order).collect();
        let mut sorted = orders.clone();
        sorted.sort_unstable();
        assert_eq!(orders, sorted);
    }
}
