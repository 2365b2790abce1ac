//! Field extractors: one pure function per intake step.
//!
//! Each extractor turns a raw chat message into a `ProfileUpdate`, or `None`
//! when the answer is unusable for that step. Matching runs on folded text
//! (see [`crate::text::fold`]) so accents and case never matter.
//!
//! The linear steps are strict. The preference sub-steps are best-effort:
//! every sub-field has its own rule and a missing match just leaves that
//! field out.

use std::sync::LazyLock;

use regex::Regex;

use crate::profile::{
    ActivityLevel, BiologicalSex, ExperienceLevel, GenderIdentity, Modality, ProfileUpdate,
    TimeOfDay, TrainingLocation,
};
use crate::text::{contains_any, fold};

use super::state::IntakeStep;

// =============================================================================
// KEYWORDS
// =============================================================================

/// Items containing any of these are injuries; everything else is a medical
/// restriction.
pub const INJURY_KEYWORDS: &[&str] = &[
    "lesao", "dor", "joelho", "ombro", "costas", "coluna", "hernia", "tendin", "lombar",
    "cervical", "tornozelo", "punho", "cotovelo", "quadril",
];

/// Whole-message answers meaning "nothing to report".
pub const NEGATIVE_RESPONSES: &[&str] = &["nenhuma", "nenhum", "nao", "n", "nada"];

const MALE_KEYWORDS: &[&str] = &["masculino", "masc", "sexo masculino", "nascimento masculino"];
const FEMALE_KEYWORDS: &[&str] = &["feminino", "fem", "sexo feminino", "nascimento feminino"];

/// Gender keyword lists, checked in order. Trans variants come first so
/// "mulher transgenero" is never read as something shorter.
const GENDER_KEYWORDS: &[(GenderIdentity, &[&str])] = &[
    (GenderIdentity::TransWoman, &["mulher trans", "trans mulher"]),
    (GenderIdentity::TransMan, &["homem trans", "trans homem"]),
    (GenderIdentity::CisWoman, &["mulher cis", "cis mulher"]),
    (GenderIdentity::CisMan, &["homem cis", "cis homem"]),
];

/// Canonical dietary restriction keys and the words that trigger them.
pub const DIETARY_RESTRICTIONS: &[(&str, &[&str])] = &[
    ("lactose", &["lactose"]),
    ("gluten", &["gluten", "celiac"]),
    ("vegetariano", &["vegetarian"]),
    ("vegano", &["vegan"]),
    ("diabetes", &["diabet"]),
];

const AVOID_MARKERS: &[&str] = &[
    "nao gosto de", "nao gosto", "nao como", "evitar", "evito", "odeio", "sem ",
];
const FAVORITE_MARKERS: &[&str] = &[
    "gosto muito de", "gosto de", "adoro", "amo ", "favorita", "favorito", "incluir",
];

// =============================================================================
// PATTERNS
// =============================================================================

static AGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*(?:anos?)?").unwrap());

static DECLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"nao\s+(?:quero\s+)?declarar").unwrap());

static SEX_LETTER_M_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bm\b").unwrap());
static SEX_LETTER_F_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bf\b").unwrap());

static GENDER_OTHER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:outro|outra|outros)\b[\s:(\-]*([^,;)]*)").unwrap());

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?").unwrap());

static DAYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([1-7])\s*(?:x|vezes|dias?)\b").unwrap());

static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})\s*(?:horas?|hrs?|h)(?:\s*(?:e\s*)?(\d{1,2}))?([a-z]*)").unwrap()
});

static MINUTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,3})\s*(?:minutos|min)\b").unwrap());

static MEALS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d)\s*refeic").unwrap());

static ITEM_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+e\s+|/|\s+ou\s+").unwrap());

// =============================================================================
// LINEAR STEPS
// =============================================================================

/// Run the extractor for `step`. `Complete` never parses anything.
pub fn extract(step: IntakeStep, input: &str) -> Option<ProfileUpdate> {
    match step {
        IntakeStep::BasicInfo => parse_basic_info(input),
        IntakeStep::Measurements => parse_measurements(input),
        IntakeStep::Objective => parse_objective(input),
        IntakeStep::Activity => parse_activity_level(input),
        IntakeStep::Health => parse_health_info(input),
        IntakeStep::TrainingPreferences => Some(parse_training_preferences(input)),
        IntakeStep::DietPreferences => Some(parse_diet_preferences(input)),
        IntakeStep::Complete => None,
    }
}

/// Age, sex and gender. Fails only when no valid age is present.
///
/// ```
/// use fitness_intake::intake::extract::parse_basic_info;
/// use fitness_intake::profile::{BiologicalSex, GenderIdentity};
///
/// let update = parse_basic_info("28 anos, masculino, homem cis").unwrap();
/// assert_eq!(update.age, Some(28));
/// assert_eq!(update.sex, Some(BiologicalSex::Male));
/// assert_eq!(update.gender, Some(GenderIdentity::CisMan));
/// ```
pub fn parse_basic_info(input: &str) -> Option<ProfileUpdate> {
    let text = fold(input);

    let age = AGE_RE
        .captures(&text)
        .and_then(|c| c[1].parse::<u32>().ok())
        .filter(|age| *age > 0 && *age < 120)?;

    let declines = DECLINE_RE.find_iter(&text).count();

    let sex = if contains_any(&text, MALE_KEYWORDS) || SEX_LETTER_M_RE.is_match(&text) {
        Some(BiologicalSex::Male)
    } else if contains_any(&text, FEMALE_KEYWORDS) || SEX_LETTER_F_RE.is_match(&text) {
        Some(BiologicalSex::Female)
    } else if declines > 0 {
        Some(BiologicalSex::PreferNotToSay)
    } else {
        None
    };

    let mut gender = GENDER_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&text, keywords))
        .map(|(gender, _)| *gender);

    // "prefiro nao declarar" answers the sex question first; it only counts
    // for gender when sex was given explicitly or the phrase appears twice.
    let sex_explicit = matches!(sex, Some(BiologicalSex::Male | BiologicalSex::Female));
    if gender.is_none() && (declines >= 2 || (declines == 1 && sex_explicit)) {
        gender = Some(GenderIdentity::PreferNotToSay);
    }

    let mut gender_other = None;
    if gender.is_none() {
        if let Some(caps) = GENDER_OTHER_RE.captures(&text) {
            gender = Some(GenderIdentity::Other);
            let detail = caps[1].trim().trim_end_matches(['.', '!']).trim();
            if !detail.is_empty() {
                gender_other = Some(detail.to_string());
            }
        }
    }

    Some(ProfileUpdate {
        age: Some(age),
        sex,
        gender,
        gender_other,
        ..Default::default()
    })
}

/// Weight and height, all-or-nothing.
///
/// Every number is classified in order: [20, 300] is weight, [1, 3) is
/// height in metres, [100, 250] is height in centimetres. The first
/// candidate of each kind wins.
pub fn parse_measurements(input: &str) -> Option<ProfileUpdate> {
    let mut weight: Option<f64> = None;
    let mut height: Option<u32> = None;

    for token in NUMBER_RE.find_iter(input) {
        let Ok(value) = token.as_str().replace(',', ".").parse::<f64>() else {
            continue;
        };

        if weight.is_none() && (20.0..=300.0).contains(&value) {
            weight = Some(value);
        } else if height.is_none() && (1.0..3.0).contains(&value) {
            height = Some((value * 100.0).round() as u32);
        } else if height.is_none() && (100.0..=250.0).contains(&value) {
            height = Some(value.round() as u32);
        }
    }

    Some(ProfileUpdate {
        weight_kg: Some(weight?),
        height_cm: Some(height?),
        ..Default::default()
    })
}

/// Free-text objective, stored verbatim (trimmed).
pub fn parse_objective(input: &str) -> Option<ProfileUpdate> {
    let trimmed = input.trim();
    if trimmed.chars().count() <= 2 {
        return None;
    }
    Some(ProfileUpdate {
        objective: Some(trimmed.to_string()),
        ..Default::default()
    })
}

/// Activity level by keyword or by the menu digit 1-4.
pub fn parse_activity_level(input: &str) -> Option<ProfileUpdate> {
    let text = fold(input);

    let level = if let Ok(choice) = text.parse::<u8>() {
        ActivityLevel::from_choice(choice)?
    } else if text.contains("sedentari") {
        ActivityLevel::Sedentary
    } else if text.contains("leve") {
        ActivityLevel::Light
    } else if text.contains("moderad") {
        ActivityLevel::Moderate
    } else if text.contains("intens") || text.contains("muito") {
        ActivityLevel::Intense
    } else {
        return None;
    };

    Some(ProfileUpdate {
        activity_level: Some(level),
        ..Default::default()
    })
}

/// Medical restrictions and injuries from a comma-separated list.
///
/// A negative answer ("nenhuma", "nao", ...) yields two empty lists.
pub fn parse_health_info(input: &str) -> Option<ProfileUpdate> {
    let text = fold(input);
    let text = text.trim_end_matches(['.', '!']);

    let mut restrictions = Vec::new();
    let mut injuries = Vec::new();

    if !NEGATIVE_RESPONSES.contains(&text) {
        for item in input.split(',').map(str::trim).filter(|i| !i.is_empty()) {
            if contains_any(&fold(item), INJURY_KEYWORDS) {
                injuries.push(item.to_string());
            } else {
                restrictions.push(item.to_string());
            }
        }
    }

    Some(ProfileUpdate {
        medical_restrictions: Some(restrictions),
        injuries: Some(injuries),
        ..Default::default()
    })
}

// =============================================================================
// PREFERENCE SUB-STEPS
// =============================================================================

/// Days per week, session length, experience, location and modality.
pub fn parse_training_preferences(input: &str) -> ProfileUpdate {
    let text = fold(input);

    ProfileUpdate {
        training_days_per_week: parse_days(&text),
        session_minutes: parse_session_minutes(&text),
        experience: parse_experience(&text),
        training_location: parse_location(&text),
        modality: parse_modality(&text),
        ..Default::default()
    }
}

/// Dietary restrictions, favourite and avoided foods, meals per day and
/// preferred training time.
pub fn parse_diet_preferences(input: &str) -> ProfileUpdate {
    let text = fold(input);
    let clauses: Vec<&str> = text
        .split([',', ';', '\n'])
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();

    let restrictions: Vec<String> = DIETARY_RESTRICTIONS
        .iter()
        .filter(|(_, words)| contains_any(&text, words))
        .map(|(key, _)| key.to_string())
        .collect();

    let mut favorites = Vec::new();
    let mut avoided = Vec::new();
    for clause in &clauses {
        if let Some(rest) = after_marker(clause, AVOID_MARKERS) {
            push_food_items(&mut avoided, rest);
        } else if let Some(rest) = after_marker(clause, FAVORITE_MARKERS) {
            push_food_items(&mut favorites, rest);
        }
    }

    let meals = MEALS_RE
        .captures(&text)
        .and_then(|c| c[1].parse::<u8>().ok())
        .filter(|n| (3..=6).contains(n));

    let time_clause = clauses
        .iter()
        .find(|c| c.contains("trein") || c.contains("horario"))
        .copied()
        .unwrap_or(text.as_str());

    ProfileUpdate {
        dietary_restrictions: (!restrictions.is_empty()).then_some(restrictions),
        favorite_foods: (!favorites.is_empty()).then_some(favorites),
        avoided_foods: (!avoided.is_empty()).then_some(avoided),
        meals_per_day: meals,
        workout_time: parse_time_of_day(time_clause),
        ..Default::default()
    }
}

fn parse_days(text: &str) -> Option<u8> {
    DAYS_RE.captures(text).and_then(|c| c[1].parse().ok())
}

fn parse_session_minutes(text: &str) -> Option<u32> {
    let from_hours = HOURS_RE.captures_iter(text).find_map(|caps| {
        // letters glued to the unit: "2 halteres" is not a duration
        let trailing = caps.get(3).map_or("", |m| m.as_str());
        if !trailing.is_empty() && !trailing.starts_with("min") {
            return None;
        }
        let hours: u32 = caps[1].parse().ok()?;
        let minutes: u32 = caps.get(2).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
        Some(hours * 60 + minutes)
    });

    let minutes = from_hours.or_else(|| {
        MINUTES_RE
            .captures(text)
            .and_then(|c| c[1].parse::<u32>().ok())
    })?;

    (10..=300).contains(&minutes).then_some(minutes)
}

fn parse_experience(text: &str) -> Option<ExperienceLevel> {
    if contains_any(text, &["iniciante", "comecando", "nunca treinei"]) {
        Some(ExperienceLevel::Beginner)
    } else if text.contains("intermediari") {
        Some(ExperienceLevel::Intermediate)
    } else if text.contains("avancad") {
        Some(ExperienceLevel::Advanced)
    } else {
        None
    }
}

fn parse_location(text: &str) -> Option<TrainingLocation> {
    if text.contains("academia") {
        Some(TrainingLocation::Gym)
    } else if text.contains("casa") {
        Some(TrainingLocation::Home)
    } else {
        None
    }
}

/// Modality from free text. "academia" alone implies strength training.
pub fn parse_modality(text: &str) -> Option<Modality> {
    let text = fold(text);
    let rules: &[(Modality, &[&str])] = &[
        (Modality::Strength, &["muscula"]),
        (Modality::Calisthenics, &["calistenia", "calisthenic", "peso corporal"]),
        (Modality::Running, &["corr", "running"]),
        (Modality::Crossfit, &["crossfit", "cross fit"]),
        (Modality::Walking, &["caminh", "walk"]),
        (Modality::Functional, &["funcional", "functional"]),
        (Modality::Strength, &["peso", "academia"]),
    ];
    rules
        .iter()
        .find(|(_, words)| contains_any(&text, words))
        .map(|(modality, _)| *modality)
}

fn parse_time_of_day(text: &str) -> Option<TimeOfDay> {
    if text.contains("manha") {
        Some(TimeOfDay::Morning)
    } else if text.contains("tarde") {
        Some(TimeOfDay::Afternoon)
    } else if text.contains("noite") {
        Some(TimeOfDay::Evening)
    } else {
        None
    }
}

/// Text following the earliest marker found in `clause`.
fn after_marker<'a>(clause: &'a str, markers: &[&str]) -> Option<&'a str> {
    markers
        .iter()
        .filter_map(|m| clause.find(m).map(|pos| (pos, m.len())))
        .min_by_key(|(pos, _)| *pos)
        .map(|(pos, len)| clause[pos + len..].trim_start_matches([' ', ':']))
}

fn push_food_items(target: &mut Vec<String>, rest: &str) {
    let restriction_words: Vec<&str> = DIETARY_RESTRICTIONS
        .iter()
        .flat_map(|(_, words)| words.iter().copied())
        .collect();

    for item in ITEM_SEPARATOR_RE.split(rest) {
        let item = item
            .trim()
            .trim_start_matches("de ")
            .trim_end_matches(['.', '!'])
            .trim();
        if item.is_empty()
            || item.chars().any(|c| c.is_ascii_digit())
            || contains_any(item, &restriction_words)
        {
            continue;
        }
        if !target.iter().any(|existing| existing == item) {
            target.push(item.to_string());
        }
    }
}
