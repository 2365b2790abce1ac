//! Nutrition math (BMI, Harris-Benedict BMR, TDEE, macro split) and the
//! per-100g food table used to annotate diet plans.

use crate::profile::{ActivityLevel, BiologicalSex, UserProfile};
use crate::text::{contains_any, fold};

use super::model::{Food, MacroTargets};

/// Targets used when weight, height or age is missing.
pub const FALLBACK_TARGETS: MacroTargets = MacroTargets {
    calories: 2000,
    protein_g: 150,
    carbs_g: 200,
    fat_g: 67,
};

const LOSS_KEYWORDS: &[&str] = &["perder", "emagrecer"];
const GAIN_KEYWORDS: &[&str] = &["ganhar", "massa"];

/// Body mass index, when weight and height are known.
pub fn bmi(profile: &UserProfile) -> Option<f64> {
    if !profile.has_measurements() {
        return None;
    }
    let metres = f64::from(profile.height_cm) / 100.0;
    Some(profile.weight_kg / (metres * metres))
}

pub fn bmi_class(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Abaixo do peso"
    } else if bmi < 25.0 {
        "Peso normal"
    } else if bmi < 30.0 {
        "Sobrepeso"
    } else {
        "Obesidade"
    }
}

/// Harris-Benedict basal metabolic rate. Only the female formula differs;
/// every other sex value uses the male one.
pub fn bmr(profile: &UserProfile) -> Option<f64> {
    if profile.weight_kg <= 0.0 || profile.height_cm == 0 || profile.age == 0 {
        return None;
    }
    let w = profile.weight_kg;
    let h = f64::from(profile.height_cm);
    let a = f64::from(profile.age);

    Some(match profile.sex {
        BiologicalSex::Female => 655.0 + 9.6 * w + 1.8 * h - 4.7 * a,
        _ => 66.0 + 13.7 * w + 5.0 * h - 6.8 * a,
    })
}

pub fn tdee(bmr: f64, level: ActivityLevel) -> u32 {
    (bmr * level.factor()).round().max(0.0) as u32
}

/// Apply the objective: loss keywords take -15%, gain keywords +15%.
/// Loss is checked first.
pub fn adjust_for_goal(calories: u32, objective: &str) -> u32 {
    let objective = fold(objective);
    let factor = if contains_any(&objective, LOSS_KEYWORDS) {
        0.85
    } else if contains_any(&objective, GAIN_KEYWORDS) {
        1.15
    } else {
        1.0
    };
    (f64::from(calories) * factor).round() as u32
}

/// Protein grams per kg of body weight. Gain is checked first.
pub fn protein_per_kg(objective: &str) -> f64 {
    let objective = fold(objective);
    if contains_any(&objective, GAIN_KEYWORDS) {
        2.2
    } else if contains_any(&objective, LOSS_KEYWORDS) {
        2.0
    } else {
        1.8
    }
}

/// Split `calories` into macro grams. Fat is 25% of calories, protein comes
/// from body weight, carbs take the rest and never go negative.
pub fn split_macros(calories: u32, weight_kg: f64, objective: &str) -> MacroTargets {
    let protein = (weight_kg * protein_per_kg(objective)).round();
    let fat = (f64::from(calories) * 0.25 / 9.0).round();
    let carbs = ((f64::from(calories) - protein * 4.0 - fat * 9.0) / 4.0)
        .round()
        .max(0.0);

    MacroTargets {
        calories,
        protein_g: protein as u32,
        carbs_g: carbs as u32,
        fat_g: fat as u32,
    }
}

/// Daily targets for a profile, or [`FALLBACK_TARGETS`] without enough data.
pub fn macro_targets(profile: &UserProfile) -> MacroTargets {
    let Some(bmr) = bmr(profile) else {
        return FALLBACK_TARGETS;
    };
    let calories = adjust_for_goal(tdee(bmr, profile.activity_level), &profile.objective);
    split_macros(calories, profile.weight_kg, &profile.objective)
}

// =============================================================================
// FOOD TABLE
// =============================================================================

/// Nutrients per 100 g and a typical portion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodInfo {
    pub name: &'static str,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub calories: f64,
    pub portion_g: u32,
}

const fn food(
    name: &'static str,
    protein: f64,
    carbs: f64,
    fat: f64,
    calories: f64,
    portion_g: u32,
) -> FoodInfo {
    FoodInfo {
        name,
        protein,
        carbs,
        fat,
        calories,
        portion_g,
    }
}

pub static FOOD_TABLE: &[FoodInfo] = &[
    // Proteins
    food("frango grelhado", 31.0, 0.0, 3.6, 165.0, 150),
    food("frango desfiado", 31.0, 0.0, 3.6, 165.0, 150),
    food("peito de frango", 31.0, 0.0, 3.6, 165.0, 150),
    food("carne moida", 26.0, 0.0, 15.0, 250.0, 150),
    food("carne vermelha", 26.0, 0.0, 15.0, 250.0, 150),
    food("peixe assado", 26.0, 0.0, 5.0, 150.0, 150),
    food("peixe", 26.0, 0.0, 5.0, 150.0, 150),
    food("tilapia", 26.0, 0.0, 2.7, 128.0, 150),
    food("salmao", 25.0, 0.0, 13.0, 208.0, 150),
    food("atum", 30.0, 0.0, 1.0, 130.0, 100),
    food("ovo", 13.0, 1.0, 11.0, 155.0, 50),
    food("ovos", 13.0, 1.0, 11.0, 155.0, 50),
    food("ovos mexidos", 13.0, 1.0, 11.0, 155.0, 100),
    food("clara de ovo", 11.0, 0.7, 0.2, 52.0, 100),
    food("tofu", 8.0, 2.0, 4.0, 76.0, 150),
    food("tofu grelhado", 8.0, 2.0, 4.0, 76.0, 150),
    food("tofu mexido", 8.0, 2.0, 4.0, 76.0, 150),
    // Carbohydrates
    food("arroz", 2.7, 28.0, 0.3, 130.0, 150),
    food("arroz branco", 2.7, 28.0, 0.3, 130.0, 150),
    food("arroz integral", 2.6, 23.0, 0.9, 111.0, 150),
    food("batata doce", 1.6, 20.0, 0.1, 86.0, 200),
    food("batata", 2.0, 17.0, 0.1, 77.0, 200),
    food("macarrao", 5.0, 25.0, 1.0, 131.0, 100),
    food("macarrao de arroz", 3.0, 24.0, 0.4, 109.0, 100),
    food("pao integral", 9.0, 41.0, 3.4, 247.0, 50),
    food("pao", 9.0, 49.0, 3.2, 265.0, 50),
    food("pao sem gluten", 4.0, 45.0, 5.0, 240.0, 50),
    food("aveia", 17.0, 66.0, 7.0, 389.0, 40),
    food("aveia sem gluten", 17.0, 66.0, 7.0, 389.0, 40),
    food("feijao", 9.0, 24.0, 0.5, 127.0, 100),
    food("granola", 10.0, 64.0, 15.0, 450.0, 40),
    food("tapioca", 0.5, 22.0, 0.0, 90.0, 30),
    // Fats
    food("azeite", 0.0, 0.0, 100.0, 884.0, 10),
    food("amendoim", 26.0, 16.0, 49.0, 567.0, 30),
    food("castanhas", 14.0, 30.0, 44.0, 553.0, 30),
    food("pasta de amendoim", 25.0, 20.0, 50.0, 588.0, 20),
    food("abacate", 2.0, 9.0, 15.0, 160.0, 100),
    // Fruits
    food("banana", 1.1, 23.0, 0.3, 89.0, 120),
    food("maca", 0.3, 14.0, 0.2, 52.0, 180),
    food("morango", 0.7, 8.0, 0.3, 32.0, 150),
    food("frutas vermelhas", 1.0, 12.0, 0.5, 50.0, 100),
    food("laranja", 0.9, 12.0, 0.1, 47.0, 180),
    food("mamao", 0.5, 11.0, 0.3, 43.0, 150),
    food("melancia", 0.6, 8.0, 0.2, 30.0, 200),
    // Vegetables
    food("salada verde", 1.5, 3.0, 0.2, 15.0, 100),
    food("salada", 1.5, 3.0, 0.2, 15.0, 100),
    food("legumes", 2.0, 10.0, 0.3, 40.0, 150),
    food("brocolis", 2.8, 7.0, 0.4, 34.0, 100),
    food("espinafre", 2.9, 3.6, 0.4, 23.0, 100),
    food("cenoura", 0.9, 10.0, 0.2, 41.0, 100),
    // Dairy and alternatives
    food("leite", 3.4, 5.0, 3.3, 64.0, 200),
    food("leite de amendoas", 1.0, 1.5, 2.5, 30.0, 200),
    food("iogurte natural", 10.0, 3.6, 0.7, 59.0, 170),
    food("iogurte grego", 10.0, 4.0, 5.0, 100.0, 170),
    food("queijo", 25.0, 1.3, 33.0, 402.0, 30),
    food("queijo cottage", 11.0, 3.4, 4.3, 98.0, 100),
    food("queijo vegano", 2.0, 5.0, 7.0, 90.0, 30),
    // Supplements
    food("whey protein", 80.0, 10.0, 3.0, 387.0, 30),
    food("whey", 80.0, 10.0, 3.0, 387.0, 30),
    food("proteina vegetal", 75.0, 8.0, 5.0, 380.0, 30),
    food("proteina vegetal (ervilha)", 75.0, 8.0, 5.0, 380.0, 30),
    // Others
    food("mel", 0.3, 82.0, 0.0, 304.0, 15),
    food("cafe", 0.0, 0.0, 0.0, 2.0, 100),
    food("cha", 0.0, 0.0, 0.0, 1.0, 200),
    food("cha de camomila", 0.0, 0.0, 0.0, 1.0, 200),
];

/// Find a food by name: exact match first, then the first entry where
/// either name contains the other.
pub fn lookup_food(name: &str) -> Option<&'static FoodInfo> {
    let name = fold(name);
    if name.is_empty() {
        return None;
    }
    FOOD_TABLE.iter().find(|f| f.name == name).or_else(|| {
        FOOD_TABLE
            .iter()
            .find(|f| name.contains(f.name) || f.name.contains(name.as_str()))
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A `Food` entry for `grams` of `name`, with macros when the food is known.
pub fn annotate_food(name: &str, grams: u32) -> Food {
    let Some(info) = lookup_food(name) else {
        return Food::plain(name, grams);
    };
    let scale = f64::from(grams) / 100.0;
    Food {
        name: name.to_string(),
        grams,
        protein_g: Some(round1(info.protein * scale)),
        carbs_g: Some(round1(info.carbs * scale)),
        fat_g: Some(round1(info.fat * scale)),
        calories: Some((info.calories * scale).round() as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(sex: BiologicalSex, weight: f64, height: u32, age: u32) -> UserProfile {
        UserProfile {
            sex,
            weight_kg: weight,
            height_cm: height,
            age,
            ..Default::default()
        }
    }

    #[test]
    fn male_bmr_reference_value() {
        let p = profile(BiologicalSex::Male, 70.0, 175, 30);
        assert_eq!(bmr(&p).unwrap().round(), 1696.0);
    }

    #[test]
    fn female_bmr_uses_female_formula() {
        let p = profile(BiologicalSex::Female, 60.0, 165, 30);
        // 655 + 576 + 297 - 141
        assert_eq!(bmr(&p).unwrap().round(), 1387.0);
    }

    #[test]
    fn undeclared_sex_uses_male_formula() {
        let male = profile(BiologicalSex::Male, 70.0, 175, 30);
        let other = profile(BiologicalSex::PreferNotToSay, 70.0, 175, 30);
        assert_eq!(bmr(&male), bmr(&other));
    }

    #[test]
    fn bmr_requires_all_measurements() {
        assert!(bmr(&profile(BiologicalSex::Male, 70.0, 175, 0)).is_none());
        assert!(bmr(&profile(BiologicalSex::Male, 0.0, 175, 30)).is_none());
    }

    #[test]
    fn goal_adjustment() {
        assert_eq!(adjust_for_goal(2000, "perder peso"), 1700);
        assert_eq!(adjust_for_goal(2000, "Emagrecer"), 1700);
        assert_eq!(adjust_for_goal(2000, "ganhar massa"), 2300);
        assert_eq!(adjust_for_goal(2000, "manter a forma"), 2000);
        // loss wins when both appear
        assert_eq!(adjust_for_goal(2000, "perder gordura e ganhar massa"), 1700);
    }

    #[test]
    fn protein_multiplier_prefers_gain() {
        assert_eq!(protein_per_kg("perder gordura e ganhar massa"), 2.2);
        assert_eq!(protein_per_kg("perder gordura"), 2.0);
        assert_eq!(protein_per_kg("saude"), 1.8);
    }

    #[test]
    fn macro_split() {
        let m = split_macros(2000, 70.0, "perder");
        assert_eq!(m.protein_g, 140);
        assert_eq!(m.fat_g, 56);
        // (2000 - 560 - 504) / 4
        assert_eq!(m.carbs_g, 234);
    }

    #[test]
    fn carbs_never_negative() {
        let m = split_macros(1000, 200.0, "ganhar massa");
        assert_eq!(m.carbs_g, 0);
    }

    #[test]
    fn full_targets_and_fallback() {
        let mut p = profile(BiologicalSex::Male, 70.0, 175, 30);
        p.activity_level = ActivityLevel::Moderate;
        p.objective = "perder gordura".into();
        let t = macro_targets(&p);
        // round(1696 * 1.55) = 2629, * 0.85 = 2235
        assert_eq!(t.calories, 2235);

        assert_eq!(macro_targets(&UserProfile::default()), FALLBACK_TARGETS);
    }

    #[test]
    fn bmi_and_classes() {
        let p = profile(BiologicalSex::Male, 70.0, 175, 30);
        let value = bmi(&p).unwrap();
        assert!((value - 22.857).abs() < 0.01);
        assert_eq!(bmi_class(value), "Peso normal");
        assert_eq!(bmi_class(17.0), "Abaixo do peso");
        assert_eq!(bmi_class(27.0), "Sobrepeso");
        assert_eq!(bmi_class(31.0), "Obesidade");
        assert!(bmi(&UserProfile::default()).is_none());
    }

    #[test]
    fn food_lookup_exact_then_partial() {
        assert_eq!(lookup_food("Arroz Integral").unwrap().name, "arroz integral");
        assert_eq!(lookup_food("filé de frango grelhado").unwrap().name, "frango grelhado");
        assert!(lookup_food("chocolate").is_none());
    }

    #[test]
    fn annotate_scales_per_portion() {
        let f = annotate_food("frango grelhado", 150);
        assert_eq!(f.protein_g, Some(46.5));
        assert_eq!(f.fat_g, Some(5.4));
        assert_eq!(f.calories, Some(248));

        let unknown = annotate_food("chocolate", 30);
        assert!(unknown.calories.is_none());
    }
}
