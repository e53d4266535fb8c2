//! User model for storage and API.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Biological sex used by the nutrition calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// User row: demographic attributes plus the derived nutrition fields
/// cached from the nutrition calculator API.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub gender: Gender,
    /// Age in years
    pub age: i64,
    /// Height in centimeters
    pub height: i64,
    /// Weight in kilograms
    pub weight: i64,
    pub bmi: String,
    pub calories: String,
    pub carbs: String,
    pub fiber: String,
    pub protein: String,
    pub fat: String,
}

/// Mutable demographic attributes, set via `/user/set-attr`.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct UserAttributes {
    pub gender: Gender,
    #[validate(range(min = 1, max = 100, message = "Age must be between 1 and 100."))]
    pub age: i64,
    #[validate(range(
        min = 120,
        max = 250,
        message = "Height must be between 120 and 250 cm."
    ))]
    pub height: i64,
    #[validate(range(min = 30, max = 300, message = "Weight must be between 30 and 300 kg."))]
    pub weight: i64,
}

impl UserAttributes {
    /// Attributes every fresh registration starts with.
    pub fn registration_default() -> Self {
        Self {
            gender: Gender::Male,
            age: 30,
            height: 170,
            weight: 70,
        }
    }
}

/// Derived nutrition fields computed by the external API from attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionFacts {
    pub bmi: String,
    pub calories: String,
    pub carbs: String,
    pub fiber: String,
    pub protein: String,
    pub fat: String,
}

impl NutritionFacts {
    /// Placeholder facts stored at registration, before the user has ever
    /// hit the nutrition calculator. BMI is the only field we can derive
    /// locally; the rest are the calculator's numbers for the default
    /// attributes.
    pub fn registration_default(attrs: &UserAttributes) -> Self {
        let meters = attrs.height as f64 / 100.0;
        let bmi = attrs.weight as f64 / (meters * meters);
        Self {
            bmi: format!("{bmi:.1}"),
            calories: "2,500 kcal/day".to_string(),
            carbs: "281 - 406 grams".to_string(),
            fiber: "34 grams".to_string(),
            protein: "56 grams".to_string(),
            fat: "56 - 97 grams".to_string(),
        }
    }
}

/// Full profile returned by `/user/profile`: the user row plus the
/// exercise and food entries they logged.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub exercises: Vec<super::ExerciseEntry>,
    pub foods: Vec<super::FoodEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_default_bmi() {
        let facts = NutritionFacts::registration_default(&UserAttributes::registration_default());
        // 70 kg at 170 cm
        assert_eq!(facts.bmi, "24.2");
    }

    #[test]
    fn test_attribute_bounds() {
        use validator::Validate;

        let valid = UserAttributes {
            gender: Gender::Female,
            age: 31,
            height: 175,
            weight: 77,
        };
        assert!(valid.validate().is_ok());

        let too_short = UserAttributes { height: 119, ..valid };
        assert!(too_short.validate().is_err());
    }
}
