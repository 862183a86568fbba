//! Recipe validation.
//!
//! Constraints are plain data: each [`FieldRule`] names a field, a [`Check`]
//! and an optional message override, and one evaluator applies any rule table
//! to anything exposing a [`Fields`] view. Validation runs in two phases:
//!
//! 1. every field rule over the recipe and every ingredient, collecting all
//!    violations together
//! 2. cross-field rules over the typed [`Recipe`], only if phase one passed

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{
    CuisineType, Difficulty, Ingredient, IngredientSubmission, Recipe, RecipeSubmission
};

pub const MAX_TOTAL_TIME_MINUTES: u32 = 720;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    Missing,
    Type,
    Length,
    Range,
    Enum,
    Empty
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub constraint: ConstraintKind,
    pub message: String
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{} field constraint(s) violated", .0.len())]
    FieldConstraints(Vec<FieldViolation>),

    #[error("{message}")]
    BusinessRule { rule: &'static str, message: &'static str }
}

/// A borrowed view of one field of a candidate value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    Integer(i64),
    Number(f64),
    Count(usize),
    /// Present but of the wrong JSON type, with the message to report.
    Invalid(&'static str)
}

#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// Character count, both bounds inclusive.
    Length { min: usize, max: usize },
    /// Exclusive lower bound.
    Above(f64),
    /// Inclusive upper bound.
    AtMost(f64),
    OneOf(&'static [&'static str]),
    NonEmpty
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub check: Check,
    pub message: Option<&'static str>
}

pub struct CrossFieldRule {
    pub name: &'static str,
    pub message: &'static str,
    pub holds: fn(&Recipe) -> bool
}

pub trait Fields {
    fn field(&self, name: &str) -> FieldValue<'_>;
}

pub const RECIPE_RULES: &[FieldRule] = &[
    FieldRule { field: "name", check: Check::Length { min: 3, max: 100 }, message: None },
    FieldRule { field: "description", check: Check::Length { min: 20, max: 500 }, message: None },
    FieldRule { field: "difficulty", check: Check::OneOf(Difficulty::TAGS), message: None },
    FieldRule { field: "prep_time_minutes", check: Check::Above(0.0), message: None },
    FieldRule { field: "prep_time_minutes", check: Check::AtMost(300.0), message: None },
    FieldRule { field: "cook_time_minutes", check: Check::Above(0.0), message: None },
    FieldRule { field: "cook_time_minutes", check: Check::AtMost(600.0), message: None },
    FieldRule {
        field: "ingredients",
        check: Check::NonEmpty,
        message: Some("A recipe needs at least one ingredient!")
    },
    FieldRule { field: "cuisine_type", check: Check::OneOf(CuisineType::TAGS), message: None },
];

pub const INGREDIENT_RULES: &[FieldRule] = &[
    FieldRule { field: "name", check: Check::Length { min: 1, max: 50 }, message: None },
    FieldRule { field: "quantity", check: Check::Above(0.0), message: None },
    FieldRule {
        field: "quantity",
        check: Check::AtMost(100.0),
        message: Some("Quantity seems very high! Double-check measurements.")
    },
    FieldRule { field: "unit", check: Check::Length { min: 1, max: 20 }, message: None },
];

pub const RECIPE_CROSS_RULES: &[CrossFieldRule] = &[
    CrossFieldRule {
        name: "total_time",
        message: "Total time exceeds 12 hours. Consider simplifying the recipe.",
        holds: total_time_within_limit
    },
];

fn total_time_within_limit(recipe: &Recipe) -> bool {

    recipe.total_time_minutes() <= MAX_TOTAL_TIME_MINUTES

}

impl Fields for RecipeSubmission {

    fn field(&self, name: &str) -> FieldValue<'_> {

        match name {
            "name" => text_view(self.name.as_ref()),
            "description" => text_view(self.description.as_ref()),
            "difficulty" => text_view(self.difficulty.as_ref()),
            "prep_time_minutes" => integer_view(self.prep_time_minutes.as_ref()),
            "cook_time_minutes" => integer_view(self.cook_time_minutes.as_ref()),
            "ingredients" => list_view(self.ingredients.as_ref()),
            "cuisine_type" => text_view(self.cuisine_type.as_ref()),
            _ => FieldValue::Missing
        }

    }
}

impl Fields for IngredientSubmission {

    fn field(&self, name: &str) -> FieldValue<'_> {

        match name {
            "name" => text_view(self.name.as_ref()),
            "quantity" => number_view(self.quantity.as_ref()),
            "unit" => text_view(self.unit.as_ref()),
            _ => FieldValue::Missing
        }

    }
}

// null counts as absent
fn text_view(value: Option<&Value>) -> FieldValue<'_> {

    match value {
        None | Some(Value::Null) => FieldValue::Missing,
        Some(Value::String(text)) => FieldValue::Text(text),
        Some(_) => FieldValue::Invalid("Input should be a valid string")
    }

}

// integral floats and numeric strings are accepted, "20.0" -> 20
fn integer_view(value: Option<&Value>) -> FieldValue<'_> {

    match value {
        None | Some(Value::Null) => FieldValue::Missing,
        Some(Value::Number(number)) => match number.as_i64() {
            Some(n) => FieldValue::Integer(n),
            None => match number.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 => FieldValue::Integer(f as i64),
                _ => FieldValue::Invalid("Input should be a valid integer, got a number with a fractional part")
            }
        },
        Some(Value::String(text)) => match text.trim().parse::<i64>() {
            Ok(n) => FieldValue::Integer(n),
            Err(_) => FieldValue::Invalid("Input should be a valid integer, unable to parse string as an integer")
        },
        Some(_) => FieldValue::Invalid("Input should be a valid integer")
    }

}

fn number_view(value: Option<&Value>) -> FieldValue<'_> {

    match value {
        None | Some(Value::Null) => FieldValue::Missing,
        Some(Value::Number(number)) => match number.as_f64() {
            Some(n) => FieldValue::Number(n),
            None => FieldValue::Invalid("Input should be a valid number")
        },
        Some(Value::String(text)) => match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => FieldValue::Number(n),
            _ => FieldValue::Invalid("Input should be a valid number, unable to parse string as a number")
        },
        Some(_) => FieldValue::Invalid("Input should be a valid number")
    }

}

fn list_view(value: Option<&Value>) -> FieldValue<'_> {

    match value {
        None | Some(Value::Null) => FieldValue::Missing,
        Some(Value::Array(items)) => FieldValue::Count(items.len()),
        Some(_) => FieldValue::Invalid("Input should be a valid list")
    }

}

impl Check {

    fn apply(&self, value: FieldValue<'_>) -> Result<(), (ConstraintKind, String)> {

        match (*self, value) {
            (_, FieldValue::Missing) => Err((ConstraintKind::Missing, "Field required".to_string())),
            (_, FieldValue::Invalid(message)) => Err((ConstraintKind::Type, message.to_string())),

            (Check::Length { min, max }, FieldValue::Text(text)) => {
                let length = text.chars().count();
                if length < min {
                    Err((ConstraintKind::Length, format!("String should have at least {} characters", min)))
                } else if length > max {
                    Err((ConstraintKind::Length, format!("String should have at most {} characters", max)))
                } else {
                    Ok(())
                }
            }

            (Check::Above(bound), FieldValue::Integer(n)) => check_above(n as f64, bound),
            (Check::Above(bound), FieldValue::Number(n)) => check_above(n, bound),
            (Check::AtMost(bound), FieldValue::Integer(n)) => check_at_most(n as f64, bound),
            (Check::AtMost(bound), FieldValue::Number(n)) => check_at_most(n, bound),

            (Check::OneOf(tags), FieldValue::Text(text)) => {
                let normalized = text.trim().to_lowercase();
                if tags.contains(&normalized.as_str()) {
                    Ok(())
                } else {
                    Err((ConstraintKind::Enum, format!("Input should be one of: {}", tags.join(", "))))
                }
            }

            (Check::NonEmpty, FieldValue::Count(0)) => {
                Err((ConstraintKind::Empty, "List should have at least 1 item".to_string()))
            }
            (Check::NonEmpty, FieldValue::Count(_)) => Ok(()),

            // a rule table pairing a check with a field of another shape
            _ => Err((ConstraintKind::Type, "Input has the wrong type".to_string()))
        }

    }
}

fn check_above(value: f64, bound: f64) -> Result<(), (ConstraintKind, String)> {

    if value > bound {
        Ok(())
    } else {
        Err((ConstraintKind::Range, format!("Input should be greater than {}", bound)))
    }

}

fn check_at_most(value: f64, bound: f64) -> Result<(), (ConstraintKind, String)> {

    if value <= bound {
        Ok(())
    } else {
        Err((ConstraintKind::Range, format!("Input should be less than or equal to {}", bound)))
    }

}

/// Apply a rule table to one candidate, pushing a violation per failed rule.
/// Only the first failing rule of a field is reported. `prefix` is prepended
/// to field names, e.g. `ingredients[2]`.
pub fn check_fields<T: Fields>(
    prefix: &str,
    candidate: &T,
    rules: &[FieldRule],
    violations: &mut Vec<FieldViolation>
) {

    let mut failed: Vec<&str> = Vec::new();

    for rule in rules {
        if failed.contains(&rule.field) {
            continue;
        }

        if let Err((constraint, default_message)) = rule.check.apply(candidate.field(rule.field)) {
            // overrides only replace the message of the check itself, never "Field required"
            let message = match (constraint, rule.message) {
                (ConstraintKind::Missing | ConstraintKind::Type, _) | (_, None) => default_message,
                (_, Some(message)) => message.to_string()
            };

            failed.push(rule.field);
            violations.push(FieldViolation {
                field: field_path(prefix, rule.field),
                constraint,
                message
            });
        }
    }

}

fn field_path(prefix: &str, field: &str) -> String {

    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }

}

fn ingredient_prefix(index: usize) -> String {

    format!("ingredients[{}]", index)

}

// every list element has to be an object, anything else is a type violation;
// each parsed ingredient keeps its position in the submitted list
fn ingredient_submissions(
    submission: &RecipeSubmission,
    violations: &mut Vec<FieldViolation>
) -> Vec<(usize, IngredientSubmission)> {

    let Some(Value::Array(items)) = &submission.ingredients else {
        return Vec::new();
    };

    let mut ingredients = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let parsed = match item {
            Value::Object(_) => serde_json::from_value::<IngredientSubmission>(item.clone()).ok(),
            _ => None
        };

        match parsed {
            Some(ingredient) => ingredients.push((index, ingredient)),
            None => violations.push(FieldViolation {
                field: ingredient_prefix(index),
                constraint: ConstraintKind::Type,
                message: "Input should be a valid object".to_string()
            })
        }
    }

    ingredients

}

pub fn validate_recipe(submission: &RecipeSubmission) -> Result<Recipe, ValidationError> {

    // phase one: every field of the recipe and of every ingredient
    let mut violations = Vec::new();
    check_fields("", submission, RECIPE_RULES, &mut violations);

    let ingredients = ingredient_submissions(submission, &mut violations);
    for (index, ingredient) in &ingredients {
        check_fields(&ingredient_prefix(*index), ingredient, INGREDIENT_RULES, &mut violations);
    }

    if !violations.is_empty() {
        return Err(ValidationError::FieldConstraints(violations));
    }

    let recipe = build_recipe(submission, &ingredients)?;

    // phase two: rules over the whole recipe
    for rule in RECIPE_CROSS_RULES {
        if !(rule.holds)(&recipe) {
            return Err(ValidationError::BusinessRule { rule: rule.name, message: rule.message });
        }
    }

    Ok(recipe)

}

fn build_recipe(
    submission: &RecipeSubmission,
    ingredients: &[(usize, IngredientSubmission)]
) -> Result<Recipe, ValidationError> {

    let ingredients = ingredients
        .iter()
        .map(|(index, ingredient)| -> Result<Ingredient, ValidationError> {
            let prefix = ingredient_prefix(*index);
            Ok(Ingredient {
                name: take_text(ingredient, &prefix, "name")?.to_string(),
                quantity: take_number(ingredient, &prefix, "quantity")?,
                unit: take_text(ingredient, &prefix, "unit")?.to_string()
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let difficulty = Difficulty::parse(take_text(submission, "", "difficulty")?);
    let cuisine_type = CuisineType::parse(take_text(submission, "", "cuisine_type")?);

    // phase one already bounded both times to 1..=600
    let prep_time_minutes = take_integer(submission, "", "prep_time_minutes")? as u32;
    let cook_time_minutes = take_integer(submission, "", "cook_time_minutes")? as u32;

    Ok(Recipe {
        name: take_text(submission, "", "name")?.to_string(),
        description: take_text(submission, "", "description")?.to_string(),
        difficulty: difficulty.ok_or_else(|| missing_field("", "difficulty"))?,
        prep_time_minutes,
        cook_time_minutes,
        ingredients,
        cuisine_type: cuisine_type.ok_or_else(|| missing_field("", "cuisine_type"))?
    })

}

fn take_text<'a, T: Fields>(candidate: &'a T, prefix: &str, field: &str) -> Result<&'a str, ValidationError> {

    match candidate.field(field) {
        FieldValue::Text(text) => Ok(text),
        _ => Err(missing_field(prefix, field))
    }

}

fn take_integer<T: Fields>(candidate: &T, prefix: &str, field: &str) -> Result<i64, ValidationError> {

    match candidate.field(field) {
        FieldValue::Integer(n) => Ok(n),
        _ => Err(missing_field(prefix, field))
    }

}

fn take_number<T: Fields>(candidate: &T, prefix: &str, field: &str) -> Result<f64, ValidationError> {

    match candidate.field(field) {
        FieldValue::Number(n) => Ok(n),
        _ => Err(missing_field(prefix, field))
    }

}

fn missing_field(prefix: &str, field: &str) -> ValidationError {

    ValidationError::FieldConstraints(vec![FieldViolation {
        field: field_path(prefix, field),
        constraint: ConstraintKind::Missing,
        message: "Field required".to_string()
    }])

}
