// SPDX-License-Identifier: MIT

//! Plain data records shared between the database layer and the API.

pub mod credential;
pub mod exercise;
pub mod food;
pub mod user;

pub use credential::Credential;
pub use exercise::{ExerciseApiItem, ExerciseEntry, NewExercise};
pub use food::{FoodApiItem, FoodEntry, NewFood};
pub use user::{Gender, NutritionFacts, User, UserAttributes, UserProfile};
