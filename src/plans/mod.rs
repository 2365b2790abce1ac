//! Derived artifacts: workout plans and diet plans, the generators that
//! build them from a profile, and the static tables they draw on.

pub mod diet;
pub mod model;
pub mod nutrition;
pub mod templates;
pub mod workout;

pub use model::{DietPlan, Exercise, Food, MacroTargets, Meal, Plans, Workout};
