//! Workout and diet plan data model, plus the `Plans` container with the
//! hand-edit API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PlanError;

/// One exercise line in a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    /// Free text: "8-12", "30s", "12 cada", "5 min".
    pub reps: String,
    /// Free text: "90s", "resto do min".
    pub rest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Exercise {
    pub fn new(
        name: impl Into<String>,
        sets: u32,
        reps: impl Into<String>,
        rest: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sets,
            reps: reps.into(),
            rest: rest.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A single training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    /// Weekday label ("Segunda", "Quarta", ...).
    pub weekday: String,
    pub exercises: Vec<Exercise>,
}

impl Workout {
    pub fn new(name: impl Into<String>, weekday: impl Into<String>, exercises: Vec<Exercise>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            weekday: weekday.into(),
            exercises,
        }
    }
}

/// A food entry with optional per-portion macros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub name: String,
    pub grams: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
}

impl Food {
    /// A food without macro annotations.
    pub fn plain(name: impl Into<String>, grams: u32) -> Self {
        Self {
            name: name.into(),
            grams,
            protein_g: None,
            carbs_g: None,
            fat_g: None,
            calories: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    /// "07:00"
    pub time: String,
    pub foods: Vec<Food>,
}

impl Meal {
    pub fn total_calories(&self) -> u32 {
        self.foods.iter().filter_map(|f| f.calories).sum()
    }
}

/// Daily calorie and macro targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub calories: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    pub calories: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
    pub meals: Vec<Meal>,
}

impl DietPlan {
    pub fn new(targets: MacroTargets, meals: Vec<Meal>) -> Self {
        Self {
            calories: targets.calories,
            protein_g: targets.protein_g,
            carbs_g: targets.carbs_g,
            fat_g: targets.fat_g,
            meals,
        }
    }

    pub fn targets(&self) -> MacroTargets {
        MacroTargets {
            calories: self.calories,
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fat_g: self.fat_g,
        }
    }
}

/// The derived artifacts of a session: the workout list and the diet plan.
///
/// Regeneration replaces a whole collection; the edit methods below are how
/// the user changes individual entries by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plans {
    pub workouts: Vec<Workout>,
    pub diet: Option<DietPlan>,
}

fn out_of_range(kind: &'static str, index: usize) -> PlanError {
    PlanError::IndexOutOfRange { kind, index }
}

impl Plans {
    pub fn clear(&mut self) {
        self.workouts.clear();
        self.diet = None;
    }

    // ── Workouts ─────────────────────────────────────────────────────────

    pub fn workout(&self, id: Uuid) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    fn workout_mut(&mut self, id: Uuid) -> Result<&mut Workout, PlanError> {
        self.workouts
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(PlanError::WorkoutNotFound(id))
    }

    pub fn add_workout(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    /// Replace the workout with the same id.
    pub fn update_workout(&mut self, workout: Workout) -> Result<(), PlanError> {
        let id = workout.id;
        *self.workout_mut(id)? = workout;
        Ok(())
    }

    pub fn remove_workout(&mut self, id: Uuid) -> Result<Workout, PlanError> {
        let pos = self
            .workouts
            .iter()
            .position(|w| w.id == id)
            .ok_or(PlanError::WorkoutNotFound(id))?;
        Ok(self.workouts.remove(pos))
    }

    pub fn rename_workout(&mut self, id: Uuid, name: impl Into<String>) -> Result<(), PlanError> {
        self.workout_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_weekday(&mut self, id: Uuid, weekday: impl Into<String>) -> Result<(), PlanError> {
        self.workout_mut(id)?.weekday = weekday.into();
        Ok(())
    }

    pub fn add_exercise(&mut self, id: Uuid, exercise: Exercise) -> Result<(), PlanError> {
        self.workout_mut(id)?.exercises.push(exercise);
        Ok(())
    }

    pub fn update_exercise(
        &mut self,
        id: Uuid,
        index: usize,
        exercise: Exercise,
    ) -> Result<(), PlanError> {
        let slot = self
            .workout_mut(id)?
            .exercises
            .get_mut(index)
            .ok_or(out_of_range("exercise", index))?;
        *slot = exercise;
        Ok(())
    }

    pub fn remove_exercise(&mut self, id: Uuid, index: usize) -> Result<Exercise, PlanError> {
        let workout = self.workout_mut(id)?;
        if index >= workout.exercises.len() {
            return Err(out_of_range("exercise", index));
        }
        Ok(workout.exercises.remove(index))
    }

    // ── Diet ─────────────────────────────────────────────────────────────

    fn diet_mut(&mut self) -> Result<&mut DietPlan, PlanError> {
        self.diet.as_mut().ok_or(PlanError::NoDiet)
    }

    fn meal_mut(&mut self, meal: usize) -> Result<&mut Meal, PlanError> {
        self.diet_mut()?
            .meals
            .get_mut(meal)
            .ok_or(out_of_range("meal", meal))
    }

    pub fn set_diet(&mut self, diet: DietPlan) {
        self.diet = Some(diet);
    }

    pub fn update_macros(&mut self, targets: MacroTargets) -> Result<(), PlanError> {
        let diet = self.diet_mut()?;
        diet.calories = targets.calories;
        diet.protein_g = targets.protein_g;
        diet.carbs_g = targets.carbs_g;
        diet.fat_g = targets.fat_g;
        Ok(())
    }

    pub fn add_meal(&mut self, meal: Meal) -> Result<(), PlanError> {
        self.diet_mut()?.meals.push(meal);
        Ok(())
    }

    pub fn update_meal(&mut self, index: usize, meal: Meal) -> Result<(), PlanError> {
        *self.meal_mut(index)? = meal;
        Ok(())
    }

    pub fn remove_meal(&mut self, index: usize) -> Result<Meal, PlanError> {
        let diet = self.diet_mut()?;
        if index >= diet.meals.len() {
            return Err(out_of_range("meal", index));
        }
        Ok(diet.meals.remove(index))
    }

    pub fn add_food(&mut self, meal: usize, food: Food) -> Result<(), PlanError> {
        self.meal_mut(meal)?.foods.push(food);
        Ok(())
    }

    pub fn update_food(&mut self, meal: usize, index: usize, food: Food) -> Result<(), PlanError> {
        let slot = self
            .meal_mut(meal)?
            .foods
            .get_mut(index)
            .ok_or(out_of_range("food", index))?;
        *slot = food;
        Ok(())
    }

    pub fn remove_food(&mut self, meal: usize, index: usize) -> Result<Food, PlanError> {
        let meal = self.meal_mut(meal)?;
        if index >= meal.foods.len() {
            return Err(out_of_range("food", index));
        }
        Ok(meal.foods.remove(index))
    }
}
