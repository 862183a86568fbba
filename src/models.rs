use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::menu::{CaffeineLevel, CoffeeItem, Mood, Totals};

// ---- coffee shop payloads ----

#[derive(Debug, Serialize)]
pub struct CoffeeWelcome {
    pub message: &'static str,
    pub description: &'static str,
    pub todays_special: &'static str,
    pub wifi_password: &'static str,
    pub available_coffees: &'static [CoffeeItem]
}

#[derive(Debug, Serialize)]
pub struct CoffeeDetails {
    pub coffee_id: i64,
    pub name: &'static str,
    pub price: f64,
    pub caffeine_level: CaffeineLevel
}

impl From<&CoffeeItem> for CoffeeDetails {

    fn from(item: &CoffeeItem) -> Self {

        CoffeeDetails {
            coffee_id: item.id,
            name: item.name,
            price: item.price,
            caffeine_level: item.caffeine_level
        }

    }
}

#[derive(Debug, Deserialize)]
pub struct TipQuery {
    pub tip_percentage: Option<i32>
}

#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub coffee_price: f64,
    pub tip_percentage: String,
    pub tip_amount: f64,
    pub total_cost: f64,
    pub barista_happiness: &'static str,
    pub mood: Mood
}

impl From<Totals> for TotalsResponse {

    fn from(totals: Totals) -> Self {

        TotalsResponse {
            coffee_price: totals.price,
            tip_percentage: format!("{}%", totals.tip_percentage),
            tip_amount: totals.tip_amount,
            total_cost: totals.total,
            barista_happiness: totals.mood.emoji(),
            mood: totals.mood
        }

    }
}

// soft failures are answered with a normal 200 body
#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub error: String
}

// ---- recipe payloads ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert
}

impl Difficulty {

    pub const TAGS: &'static [&'static str] = &["beginner", "intermediate", "advanced", "expert"];

    pub fn parse(tag: &str) -> Option<Self> {

        match tag.trim().to_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            "expert" => Some(Difficulty::Expert),
            _ => None
        }

    }

    pub fn as_str(self) -> &'static str {

        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Expert => "expert"
        }

    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CuisineType {
    Italian,
    Mexican,
    Asian,
    French,
    American
}

impl CuisineType {

    pub const TAGS: &'static [&'static str] = &["italian", "mexican", "asian", "french", "american"];

    pub fn parse(tag: &str) -> Option<Self> {

        match tag.trim().to_lowercase().as_str() {
            "italian" => Some(CuisineType::Italian),
            "mexican" => Some(CuisineType::Mexican),
            "asian" => Some(CuisineType::Asian),
            "french" => Some(CuisineType::French),
            "american" => Some(CuisineType::American),
            _ => None
        }

    }
}

/// Untrusted ingredient as it arrives on the wire.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IngredientSubmission {
    pub name: Option<Value>,
    pub quantity: Option<Value>,
    pub unit: Option<Value>
}

/// Untrusted recipe as it arrives on the wire. Fields stay raw JSON so that
/// absent or wrongly typed fields surface as validation failures at their own
/// path rather than as one decode error for the whole body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecipeSubmission {
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub difficulty: Option<Value>,
    pub prep_time_minutes: Option<Value>,
    pub cook_time_minutes: Option<Value>,
    pub ingredients: Option<Value>,
    pub cuisine_type: Option<Value>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub ingredients: Vec<Ingredient>,
    pub cuisine_type: CuisineType
}

impl Recipe {

    pub fn total_time_minutes(&self) -> u32 {

        self.prep_time_minutes + self.cook_time_minutes

    }
}

#[derive(Debug, Serialize)]
pub struct RecipeWelcome {
    pub message: &'static str
}

#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub message: &'static str,
    pub name: String,
    pub difficulty: Difficulty,
    pub total_ingredients: usize,
    pub total_time_minutes: u32
}

impl From<Recipe> for RecipeSummary {

    fn from(recipe: Recipe) -> Self {

        RecipeSummary {
            message: "Recipe received and validated!",
            total_ingredients: recipe.ingredients.len(),
            total_time_minutes: recipe.total_time_minutes(),
            difficulty: recipe.difficulty,
            name: recipe.name
        }

    }
}

#[derive(Debug, Serialize)]
pub struct AdvancedRecipeSummary {
    pub message: &'static str,
    pub recipe_name: String,
    pub total_time_minutes: u32,
    pub total_preparation_and_cooking_time: String,
    pub validation_status: &'static str
}

impl From<Recipe> for AdvancedRecipeSummary {

    fn from(recipe: Recipe) -> Self {

        let total_time = recipe.total_time_minutes();

        AdvancedRecipeSummary {
            message: "Advanced validation successful!",
            recipe_name: recipe.name,
            total_time_minutes: total_time,
            total_preparation_and_cooking_time: format!("{} minutes", total_time),
            validation_status: "All validation rules passed!"
        }

    }
}
