use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_TIP_PERCENTAGE: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CaffeineLevel {
    Low,
    Medium,
    High
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoffeeItem {
    pub id: i64,
    pub name: &'static str,
    pub price: f64,
    pub caffeine_level: CaffeineLevel
}

// the menu never changes while the process is running
static MENU: [CoffeeItem; 5] = [
    CoffeeItem { id: 1, name: "Espresso", price: 2.50, caffeine_level: CaffeineLevel::High },
    CoffeeItem { id: 2, name: "Cappuccino", price: 4.00, caffeine_level: CaffeineLevel::Medium },
    CoffeeItem { id: 3, name: "Latte", price: 4.50, caffeine_level: CaffeineLevel::Medium },
    CoffeeItem { id: 4, name: "Americano", price: 3.00, caffeine_level: CaffeineLevel::High },
    CoffeeItem { id: 5, name: "Frappuccino", price: 5.50, caffeine_level: CaffeineLevel::Low },
];

#[derive(Debug, Error, PartialEq)]
pub enum MenuError {
    #[error("Sorry, we don't have that coffee on our menu!")]
    NotFound(i64),

    #[error("Coffee can't be free! (Though we wish it could be)")]
    InvalidInput(f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Satisfied,
    Neutral
}

impl Mood {

    pub fn from_tip(tip_percentage: i32) -> Self {

        if tip_percentage >= DEFAULT_TIP_PERCENTAGE {
            Mood::Satisfied
        } else {
            Mood::Neutral
        }

    }

    pub fn emoji(self) -> &'static str {

        match self {
            Mood::Satisfied => "😊",
            Mood::Neutral => "😐"
        }

    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub price: f64,
    pub tip_percentage: i32,
    pub tip_amount: f64,
    pub total: f64,
    pub mood: Mood
}

pub fn menu() -> &'static [CoffeeItem] {

    &MENU

}

pub fn get_by_id(id: i64) -> Result<&'static CoffeeItem, MenuError> {

    MENU.iter()
        .find(|item| item.id == id)
        .ok_or(MenuError::NotFound(id))

}

pub fn compute_total(price: f64, tip_percentage: i32) -> Result<Totals, MenuError> {

    // NaN and infinity arrive through the path parser as valid floats
    if !price.is_finite() || price <= 0.0 {
        return Err(MenuError::InvalidInput(price));
    }

    let tip_amount = price * (tip_percentage as f64 / 100.0);
    let total = price + tip_amount;

    Ok(Totals {
        price,
        tip_percentage,
        tip_amount: round_cents(tip_amount),
        total: round_cents(total),
        mood: Mood::from_tip(tip_percentage)
    })

}

// rounds the exact binary value, ties to even, the same digits the
// formatter prints
fn round_cents(value: f64) -> f64 {

    format!("{:.2}", value).parse().unwrap_or(value)

}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_known_ids_return_fixed_items() {

        let expected = [
            (1, "Espresso", 2.50, CaffeineLevel::High),
            (2, "Cappuccino", 4.00, CaffeineLevel::Medium),
            (3, "Latte", 4.50, CaffeineLevel::Medium),
            (4, "Americano", 3.00, CaffeineLevel::High),
            (5, "Frappuccino", 5.50, CaffeineLevel::Low)
        ];

        for (id, name, price, level) in expected {
            let item = get_by_id(id).expect("id should be on the menu");
            assert_eq!(item.name, name);
            assert_eq!(item.price, price);
            assert_eq!(item.caffeine_level, level);
        }

    }

    #[test]
    fn test_unknown_ids_are_not_found() {

        for id in [0, 6, -1, 42, i64::MAX] {
            assert_eq!(get_by_id(id), Err(MenuError::NotFound(id)));
        }

    }

    #[test]
    fn test_default_tip_total() {

        let totals = compute_total(10.00, DEFAULT_TIP_PERCENTAGE).unwrap();
        assert_eq!(totals.tip_amount, 1.50);
        assert_eq!(totals.total, 11.50);
        assert_eq!(totals.mood, Mood::Satisfied);

    }

    #[test]
    fn test_non_positive_price_is_invalid() {

        assert!(matches!(compute_total(0.0, 15), Err(MenuError::InvalidInput(_))));
        assert!(matches!(compute_total(-5.0, 20), Err(MenuError::InvalidInput(_))));
        assert!(matches!(compute_total(f64::NAN, 15), Err(MenuError::InvalidInput(_))));
        assert!(matches!(compute_total(f64::INFINITY, 15), Err(MenuError::InvalidInput(_))));

    }

    #[test]
    fn test_mood_follows_tip() {

        assert_eq!(compute_total(20.00, 20).unwrap().mood, Mood::Satisfied);
        assert_eq!(compute_total(20.00, 10).unwrap().mood, Mood::Neutral);
        assert_eq!(compute_total(20.00, 15).unwrap().mood, Mood::Satisfied);

    }

    #[test]
    fn test_cent_ties_round_on_exact_value() {

        // 2.50 at 25% is exactly 0.625 tip and 3.125 total
        let totals = compute_total(2.50, 25).unwrap();
        assert_eq!(totals.tip_amount, 0.62);
        assert_eq!(totals.total, 3.12);

        // 2.15 * 0.10 lands just below 0.215
        assert_eq!(compute_total(2.15, 10).unwrap().tip_amount, 0.21);

    }

    #[test]
    fn test_amounts_are_rounded_to_cents() {

        let totals = compute_total(4.50, 18).unwrap();
        assert_eq!(totals.tip_amount, 0.81);
        assert_eq!(totals.total, 5.31);

    }

}
