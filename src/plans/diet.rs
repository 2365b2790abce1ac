//! DietGenerator: macro targets plus a fixed meal layout sized by meals per
//! day and training time, adapted to dietary restrictions and avoided foods.

use tracing::debug;

use crate::profile::{TimeOfDay, UserProfile};
use crate::text::fold;

use super::model::{DietPlan, Food, Meal};
use super::nutrition::{annotate_food, macro_targets};

#[derive(Debug, Clone, Copy)]
struct MealTemplate {
    name: &'static str,
    time: &'static str,
    foods: &'static [(&'static str, u32)],
}

const fn meal(
    name: &'static str,
    time: &'static str,
    foods: &'static [(&'static str, u32)],
) -> MealTemplate {
    MealTemplate { name, time, foods }
}

// ── Foods per meal ──────────────────────────────────────────────────────

const BREAKFAST: &[(&str, u32)] = &[
    ("ovos mexidos", 100),
    ("pao integral", 50),
    ("banana", 120),
    ("cafe", 100),
];
const MORNING_SNACK: &[(&str, u32)] = &[
    ("iogurte natural", 170),
    ("granola", 40),
    ("frutas vermelhas", 100),
];
const LUNCH: &[(&str, u32)] = &[
    ("frango grelhado", 150),
    ("arroz integral", 150),
    ("feijao", 100),
    ("salada verde", 100),
    ("azeite", 10),
];
const AFTERNOON_SNACK: &[(&str, u32)] = &[("whey protein", 30), ("banana", 120), ("amendoim", 30)];
const DINNER: &[(&str, u32)] = &[
    ("peixe assado", 150),
    ("batata doce", 200),
    ("legumes", 150),
    ("salada", 100),
];
const SUPPER: &[(&str, u32)] = &[("iogurte grego", 170), ("castanhas", 30)];
const PRE_WORKOUT_BREAKFAST: &[(&str, u32)] = &[("banana", 120), ("aveia", 40), ("cafe", 100)];
const POST_WORKOUT: &[(&str, u32)] = &[("whey protein", 30), ("banana", 120), ("aveia", 40)];
const PRE_WORKOUT: &[(&str, u32)] = &[
    ("batata doce", 150),
    ("frango grelhado", 100),
    ("salada", 80),
];
const POST_WORKOUT_DINNER: &[(&str, u32)] = &[
    ("frango grelhado", 150),
    ("arroz integral", 150),
    ("legumes", 150),
    ("salada", 100),
];

// ── Layouts by meals per day ────────────────────────────────────────────

static THREE_MEALS: &[MealTemplate] = &[
    meal("Cafe da Manha", "07:00", BREAKFAST),
    meal("Almoco", "12:30", LUNCH),
    meal("Jantar", "19:30", DINNER),
];

static FOUR_MEALS: &[MealTemplate] = &[
    meal("Cafe da Manha", "07:00", BREAKFAST),
    meal("Almoco", "12:30", LUNCH),
    meal("Lanche da Tarde", "16:00", AFTERNOON_SNACK),
    meal("Jantar", "19:30", DINNER),
];

static FIVE_MEALS: &[MealTemplate] = &[
    meal("Cafe da Manha", "07:00", BREAKFAST),
    meal("Lanche da Manha", "10:00", MORNING_SNACK),
    meal("Almoco", "12:30", LUNCH),
    meal("Lanche da Tarde", "16:00", AFTERNOON_SNACK),
    meal("Jantar", "19:30", DINNER),
];

static SIX_MEALS: &[MealTemplate] = &[
    meal("Cafe da Manha", "07:00", BREAKFAST),
    meal("Lanche da Manha", "10:00", MORNING_SNACK),
    meal("Almoco", "12:30", LUNCH),
    meal("Lanche da Tarde", "16:00", AFTERNOON_SNACK),
    meal("Jantar", "19:30", DINNER),
    meal("Ceia", "21:30", SUPPER),
];

/// The day's meals: 3 to 6 of them (5 otherwise), with pre and post
/// workout meals around a morning or evening session. Every layout has at
/// least three meals.
fn meal_layout(meals_per_day: u8, workout_time: TimeOfDay) -> Vec<MealTemplate> {
    let mut layout = match meals_per_day {
        3 => THREE_MEALS,
        4 => FOUR_MEALS,
        6 => SIX_MEALS,
        _ => FIVE_MEALS,
    }
    .to_vec();

    match workout_time {
        TimeOfDay::Morning => {
            layout[0] = meal("Cafe da Manha", "06:00", PRE_WORKOUT_BREAKFAST);
            layout[1] = meal("Pos-Treino", "09:00", POST_WORKOUT);
        }
        TimeOfDay::Evening => {
            let last = layout.len() - 1;
            layout[last - 1] = meal("Pre-Treino", "18:00", PRE_WORKOUT);
            layout[last] = meal("Pos-Treino / Jantar", "21:00", POST_WORKOUT_DINNER);
        }
        TimeOfDay::Afternoon | TimeOfDay::Unset => {}
    }
    layout
}

/// A substitution: any food whose name contains one of `matches` becomes
/// `replacement`.
struct Substitution {
    matches: &'static [&'static str],
    replacement: &'static str,
}

const MEAT: &[&str] = &["frango", "carne", "peixe", "atum"];

static LACTOSE: &[Substitution] = &[
    Substitution { matches: &["leite", "iogurte"], replacement: "leite de amendoas" },
    Substitution { matches: &["queijo"], replacement: "queijo vegano" },
    Substitution { matches: &["whey"], replacement: "proteina vegetal (ervilha)" },
];

static GLUTEN: &[Substitution] = &[
    Substitution { matches: &["pao"], replacement: "pao sem gluten" },
    Substitution { matches: &["macarrao", "massa"], replacement: "macarrao de arroz" },
    Substitution { matches: &["aveia"], replacement: "aveia sem gluten" },
];

static VEGETARIAN: &[Substitution] = &[
    Substitution { matches: MEAT, replacement: "tofu grelhado" },
];

static VEGAN: &[Substitution] = &[
    Substitution { matches: MEAT, replacement: "tofu grelhado" },
    Substitution { matches: &["ovo", "ovos"], replacement: "tofu mexido" },
    Substitution { matches: &["leite", "iogurte"], replacement: "leite de amendoas" },
    Substitution { matches: &["queijo"], replacement: "queijo vegano" },
    Substitution { matches: &["whey"], replacement: "proteina vegetal (ervilha)" },
];

fn substitutions_for(restriction: &str) -> &'static [Substitution] {
    match fold(restriction).as_str() {
        "lactose" => LACTOSE,
        "gluten" => GLUTEN,
        "vegetariano" => VEGETARIAN,
        "vegano" => VEGAN,
        _ => &[],
    }
}

/// The food to serve instead of `name` under `restrictions`. Restrictions
/// apply in order; within one restriction the first matching entry wins.
pub fn substitute(name: &str, restrictions: &[String]) -> String {
    let mut current = fold(name);
    for restriction in restrictions {
        if let Some(sub) = substitutions_for(restriction)
            .iter()
            .find(|sub| sub.matches.iter().any(|m| current.contains(m)))
        {
            current = sub.replacement.to_string();
        }
    }
    current
}

/// Whether the (already substituted) food is on the avoid list.
pub fn is_avoided(name: &str, avoided: &[String]) -> bool {
    let name = fold(name);
    avoided
        .iter()
        .map(|a| fold(a))
        .any(|a| !a.is_empty() && name.contains(&a))
}

fn build_meal(template: &MealTemplate, profile: &UserProfile) -> Meal {
    let foods: Vec<Food> = template
        .foods
        .iter()
        .filter_map(|(name, grams)| {
            let served = substitute(name, &profile.dietary_restrictions);
            if is_avoided(&served, &profile.avoided_foods) {
                debug!(food = %served, meal = template.name, "Dropping avoided food");
                return None;
            }
            Some(annotate_food(&served, *grams))
        })
        .collect();

    Meal {
        name: template.name.to_string(),
        time: template.time.to_string(),
        foods,
    }
}

/// Build the diet plan for `profile`.
pub fn generate(profile: &UserProfile) -> DietPlan {
    let targets = macro_targets(profile);
    let meals: Vec<Meal> = meal_layout(profile.meals_per_day, profile.workout_time)
        .iter()
        .map(|t| build_meal(t, profile))
        .collect();
    debug!(
        calories = targets.calories,
        protein = targets.protein_g,
        meals = meals.len(),
        "Generated diet plan"
    );
    DietPlan::new(targets, meals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plans::nutrition::FALLBACK_TARGETS;
    use crate::profile::{ActivityLevel, BiologicalSex};

    fn food_names(plan: &DietPlan) -> Vec<String> {
        plan.meals
            .iter()
            .flat_map(|m| m.foods.iter().map(|f| f.name.clone()))
            .collect()
    }

    #[test]
    fn default_plan_has_five_annotated_meals() {
        let plan = generate(&UserProfile::default());
        assert_eq!(plan.meals.len(), 5);
        assert_eq!(plan.targets(), FALLBACK_TARGETS);
        assert_eq!(plan.meals[0].name, "Cafe da Manha");
        assert_eq!(plan.meals[4].time, "19:30");
        assert!(plan.meals.iter().flat_map(|m| &m.foods).all(|f| f.calories.is_some()));
    }

    #[test]
    fn targets_follow_profile() {
        let profile = UserProfile {
            sex: BiologicalSex::Male,
            age: 30,
            weight_kg: 70.0,
            height_cm: 175,
            activity_level: ActivityLevel::Moderate,
            objective: "perder gordura".into(),
            meals_per_day: 5,
            ..Default::default()
        };
        let plan = generate(&profile);
        assert_eq!(plan.calories, 2235);
        assert_eq!(plan.protein_g, 140);
    }

    #[test]
    fn lactose_substitutions() {
        let profile = UserProfile {
            dietary_restrictions: vec!["lactose".into()],
            ..Default::default()
        };
        let names = food_names(&generate(&profile));
        assert!(names.contains(&"leite de amendoas".to_string()));
        assert!(names.contains(&"proteina vegetal (ervilha)".to_string()));
        assert!(!names.iter().any(|n| n.contains("iogurte") || n.contains("whey")));
    }

    #[test]
    fn vegan_replaces_animal_foods() {
        let restrictions = vec!["vegano".to_string()];
        assert_eq!(substitute("frango grelhado", &restrictions), "tofu grelhado");
        assert_eq!(substitute("ovos mexidos", &restrictions), "tofu mexido");
        assert_eq!(substitute("banana", &restrictions), "banana");
    }

    #[test]
    fn vegetarian_keeps_eggs() {
        let restrictions = vec!["vegetariano".to_string()];
        assert_eq!(substitute("ovos mexidos", &restrictions), "ovos mexidos");
        assert_eq!(substitute("peixe assado", &restrictions), "tofu grelhado");
    }

    #[test]
    fn restrictions_chain_in_order() {
        let restrictions = vec!["gluten".to_string(), "lactose".to_string()];
        assert_eq!(substitute("pao integral", &restrictions), "pao sem gluten");
        assert_eq!(substitute("iogurte natural", &restrictions), "leite de amendoas");
    }

    #[test]
    fn unknown_restriction_is_ignored() {
        assert_eq!(substitute("banana", &["diabetes".to_string()]), "banana");
    }

    #[test]
    fn avoided_foods_are_removed() {
        let profile = UserProfile {
            avoided_foods: vec!["peixe".into(), "Banana".into()],
            ..Default::default()
        };
        let plan = generate(&profile);
        let names = food_names(&plan);
        assert!(!names.iter().any(|n| n.contains("peixe") || n.contains("banana")));
        assert_eq!(plan.meals[4].foods.len(), 3);
    }

    #[test]
    fn avoid_checks_the_substituted_food() {
        let profile = UserProfile {
            dietary_restrictions: vec!["vegetariano".into()],
            avoided_foods: vec!["tofu".into()],
            ..Default::default()
        };
        let names = food_names(&generate(&profile));
        assert!(!names.iter().any(|n| n.contains("tofu")));
        assert!(!names.iter().any(|n| n.contains("frango")));
    }

    fn meal_names(plan: &DietPlan) -> Vec<&str> {
        plan.meals.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn meals_per_day_picks_the_layout() {
        let with_meals = |n: u8| generate(&UserProfile { meals_per_day: n, ..Default::default() });

        assert_eq!(meal_names(&with_meals(3)), vec!["Cafe da Manha", "Almoco", "Jantar"]);
        assert_eq!(with_meals(4).meals[2].name, "Lanche da Tarde");
        assert_eq!(with_meals(6).meals.len(), 6);
        assert_eq!(with_meals(6).meals[5].name, "Ceia");
        assert_eq!(with_meals(0).meals, with_meals(5).meals);
    }

    #[test]
    fn morning_training_adds_pre_and_post_workout() {
        let profile = UserProfile {
            workout_time: TimeOfDay::Morning,
            ..Default::default()
        };
        let plan = generate(&profile);
        assert_eq!(plan.meals.len(), 5);
        assert_eq!(plan.meals[0].time, "06:00");
        assert!(plan.meals[0].foods.iter().any(|f| f.name == "aveia"));
        assert_eq!(plan.meals[1].name, "Pos-Treino");
        assert_eq!(plan.meals[1].time, "09:00");
    }

    #[test]
    fn evening_training_moves_the_last_two_meals() {
        let profile = UserProfile {
            meals_per_day: 6,
            workout_time: TimeOfDay::Evening,
            ..Default::default()
        };
        let plan = generate(&profile);
        let names = meal_names(&plan);
        assert_eq!(names[4], "Pre-Treino");
        assert_eq!(names[5], "Pos-Treino / Jantar");
        assert_eq!(plan.meals[5].time, "21:00");
    }

    #[test]
    fn afternoon_training_keeps_the_default_layout() {
        let afternoon = UserProfile {
            workout_time: TimeOfDay::Afternoon,
            ..Default::default()
        };
        assert_eq!(generate(&afternoon).meals, generate(&UserProfile::default()).meals);
    }

    #[test]
    fn restrictions_apply_to_workout_meals() {
        let profile = UserProfile {
            workout_time: TimeOfDay::Morning,
            dietary_restrictions: vec!["lactose".into()],
            ..Default::default()
        };
        let plan = generate(&profile);
        assert!(plan.meals[1].foods.iter().any(|f| f.name == "proteina vegetal (ervilha)"));
    }
}
