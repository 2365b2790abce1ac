//! User profile data model and partial updates.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Sex assigned at birth. Drives the metabolic formula only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiologicalSex {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "masculino")]
    Male,
    #[serde(rename = "feminino")]
    Female,
    #[serde(rename = "prefiro-nao-declarar")]
    PreferNotToSay,
}

impl BiologicalSex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Male => "masculino",
            Self::Female => "feminino",
            Self::PreferNotToSay => "prefiro-nao-declarar",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unset => "Nao informado",
            Self::Male => "Masculino",
            Self::Female => "Feminino",
            Self::PreferNotToSay => "Prefiro nao declarar",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

/// Gender identity. Free text for `Other` lives in `UserProfile::gender_other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenderIdentity {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "mulher-cis")]
    CisWoman,
    #[serde(rename = "mulher-trans")]
    TransWoman,
    #[serde(rename = "homem-cis")]
    CisMan,
    #[serde(rename = "homem-trans")]
    TransMan,
    #[serde(rename = "outro")]
    Other,
    #[serde(rename = "prefiro-nao-declarar")]
    PreferNotToSay,
}

impl GenderIdentity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::CisWoman => "mulher-cis",
            Self::TransWoman => "mulher-trans",
            Self::CisMan => "homem-cis",
            Self::TransMan => "homem-trans",
            Self::Other => "outro",
            Self::PreferNotToSay => "prefiro-nao-declarar",
        }
    }
}

/// Self-reported activity level with its Harris-Benedict multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "sedentario")]
    Sedentary,
    #[serde(rename = "leve")]
    Light,
    #[serde(rename = "moderado")]
    Moderate,
    #[serde(rename = "intenso")]
    Intense,
}

impl ActivityLevel {
    /// Factor applied to BMR. Unknown levels use 1.4.
    pub fn factor(&self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Intense => 1.725,
            Self::Unset => 1.4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Sedentary => "sedentario",
            Self::Light => "leve",
            Self::Moderate => "moderado",
            Self::Intense => "intenso",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unset => "Nao informado",
            Self::Sedentary => "Sedentario",
            Self::Light => "Levemente ativo",
            Self::Moderate => "Moderadamente ativo",
            Self::Intense => "Muito ativo",
        }
    }

    /// Map the numbered menu choice (1-4) to a level.
    pub fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Self::Sedentary),
            2 => Some(Self::Light),
            3 => Some(Self::Moderate),
            4 => Some(Self::Intense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "iniciante")]
    Beginner,
    #[serde(rename = "intermediario")]
    Intermediate,
    #[serde(rename = "avancado")]
    Advanced,
}

impl ExperienceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Beginner => "Iniciante (foco em tecnica)",
            Self::Intermediate => "Intermediario (carga moderada)",
            Self::Advanced => "Avancado (maior intensidade)",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingLocation {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "academia")]
    Gym,
    #[serde(rename = "casa")]
    Home,
}

/// Training modality. Each one has its own template catalog and split table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "musculacao")]
    Strength,
    #[serde(rename = "corrida")]
    Running,
    #[serde(rename = "crossfit")]
    Crossfit,
    #[serde(rename = "caminhada")]
    Walking,
    #[serde(rename = "funcional")]
    Functional,
    #[serde(rename = "calistenia")]
    Calisthenics,
}

impl Modality {
    /// The modality actually used for generation. Unset means strength training.
    pub fn effective(&self) -> Modality {
        match self {
            Self::Unset => Self::Strength,
            other => *other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.effective() {
            Self::Strength | Self::Unset => "Musculação",
            Self::Running => "Corrida",
            Self::Crossfit => "CrossFit",
            Self::Walking => "Caminhada",
            Self::Functional => "Funcional",
            Self::Calisthenics => "Calistenia",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "manha")]
    Morning,
    #[serde(rename = "tarde")]
    Afternoon,
    #[serde(rename = "noite")]
    Evening,
}

impl TimeOfDay {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Morning => "manha",
            Self::Afternoon => "tarde",
            Self::Evening => "noite",
        }
    }
}

/// The canonical user profile.
///
/// Numeric fields use `0` for "not provided", which is also how the
/// persisted form stores them. Weight and height are always set together
/// by the intake flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub sex: BiologicalSex,
    pub gender: GenderIdentity,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub gender_other: String,
    pub weight_kg: f64,
    pub height_cm: u32,
    pub objective: String,
    pub activity_level: ActivityLevel,
    pub medical_restrictions: Vec<String>,
    pub injuries: Vec<String>,

    // Training preferences
    pub training_days_per_week: u8,
    pub session_minutes: u32,
    pub experience: ExperienceLevel,
    pub training_location: TrainingLocation,
    pub modality: Modality,

    // Diet preferences
    pub dietary_restrictions: Vec<String>,
    pub favorite_foods: Vec<String>,
    pub avoided_foods: Vec<String>,
    pub meals_per_day: u8,
    pub workout_time: TimeOfDay,
}

impl UserProfile {
    /// A fresh profile seeded with an external display name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn has_measurements(&self) -> bool {
        self.weight_kg > 0.0 && self.height_cm > 0
    }
}

/// A partial profile produced by one extraction step or an edit.
///
/// Only `Some` fields are applied; everything else is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<BiologicalSex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<GenderIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_other: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_restrictions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injuries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_days_per_week: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_location: Option<TrainingLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modality: Option<Modality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_foods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoided_foods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meals_per_day: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_time: Option<TimeOfDay>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the set fields into `profile`.
    pub fn apply(&self, profile: &mut UserProfile) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }

        set(&mut profile.name, &self.name);
        set(&mut profile.age, &self.age);
        set(&mut profile.sex, &self.sex);
        set(&mut profile.gender, &self.gender);
        set(&mut profile.gender_other, &self.gender_other);
        set(&mut profile.weight_kg, &self.weight_kg);
        set(&mut profile.height_cm, &self.height_cm);
        set(&mut profile.objective, &self.objective);
        set(&mut profile.activity_level, &self.activity_level);
        set(&mut profile.medical_restrictions, &self.medical_restrictions);
        set(&mut profile.injuries, &self.injuries);
        set(&mut profile.training_days_per_week, &self.training_days_per_week);
        set(&mut profile.session_minutes, &self.session_minutes);
        set(&mut profile.experience, &self.experience);
        set(&mut profile.training_location, &self.training_location);
        set(&mut profile.modality, &self.modality);
        set(&mut profile.dietary_restrictions, &self.dietary_restrictions);
        set(&mut profile.favorite_foods, &self.favorite_foods);
        set(&mut profile.avoided_foods, &self.avoided_foods);
        set(&mut profile.meals_per_day, &self.meals_per_day);
        set(&mut profile.workout_time, &self.workout_time);
    }

    /// Check the set fields against the profile's ranges, and that merging
    /// into `current` leaves weight and height either both set or both
    /// unset.
    pub fn validate(&self, current: &UserProfile) -> Result<(), ProfileError> {
        if let Some(age) = self.age.filter(|a| !(1..120).contains(a)) {
            return Err(ProfileError::Age(age));
        }
        if let Some(weight) = self.weight_kg.filter(|w| !(20.0..=300.0).contains(w)) {
            return Err(ProfileError::Weight(weight));
        }
        if let Some(height) = self.height_cm.filter(|h| !(100..=250).contains(h)) {
            return Err(ProfileError::Height(height));
        }
        if let Some(days) = self.training_days_per_week.filter(|d| !(1..=7).contains(d)) {
            return Err(ProfileError::TrainingDays(days));
        }
        if let Some(minutes) = self.session_minutes.filter(|m| !(10..=300).contains(m)) {
            return Err(ProfileError::SessionMinutes(minutes));
        }
        if let Some(meals) = self.meals_per_day.filter(|m| !(3..=6).contains(m)) {
            return Err(ProfileError::MealsPerDay(meals));
        }

        let weight = self.weight_kg.unwrap_or(current.weight_kg);
        let height = self.height_cm.unwrap_or(current.height_cm);
        if (weight > 0.0) != (height > 0) {
            return Err(ProfileError::MeasurementsIncomplete);
        }
        Ok(())
    }

    /// Return a copy of `profile` with this update applied.
    pub fn applied_to(&self, profile: &UserProfile) -> UserProfile {
        let mut merged = profile.clone();
        self.apply(&mut merged);
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_empty() {
        let p = UserProfile::default();
        assert!(p.name.is_empty());
        assert_eq!(p.age, 0);
        assert_eq!(p.sex, BiologicalSex::Unset);
        assert!(!p.has_measurements());
        assert!(p.injuries.is_empty());
    }

    #[test]
    fn with_name_seeds_only_the_name() {
        let p = UserProfile::with_name("Ana");
        assert_eq!(p.name, "Ana");
        assert_eq!(p, UserProfile { name: "Ana".into(), ..Default::default() });
    }

    #[test]
    fn update_applies_only_set_fields() {
        let mut p = UserProfile::with_name("Ana");
        p.objective = "manter a forma".into();

        let update = ProfileUpdate {
            age: Some(31),
            sex: Some(BiologicalSex::Female),
            ..Default::default()
        };
        update.apply(&mut p);

        assert_eq!(p.name, "Ana");
        assert_eq!(p.age, 31);
        assert_eq!(p.sex, BiologicalSex::Female);
        assert_eq!(p.objective, "manter a forma");
    }

    #[test]
    fn update_can_clear_lists() {
        let mut p = UserProfile::default();
        p.injuries = vec!["joelho".into()];
        ProfileUpdate {
            injuries: Some(vec![]),
            ..Default::default()
        }
        .apply(&mut p);
        assert!(p.injuries.is_empty());
    }

    #[test]
    fn empty_update_detection() {
        assert!(ProfileUpdate::default().is_empty());
        assert!(!ProfileUpdate { meals_per_day: Some(4), ..Default::default() }.is_empty());
    }

    #[test]
    fn enums_serialize_to_wire_ids() {
        assert_eq!(serde_json::to_string(&BiologicalSex::PreferNotToSay).unwrap(), "\"prefiro-nao-declarar\"");
        assert_eq!(serde_json::to_string(&GenderIdentity::CisMan).unwrap(), "\"homem-cis\"");
        assert_eq!(serde_json::to_string(&ActivityLevel::Unset).unwrap(), "\"\"");
        assert_eq!(serde_json::to_string(&Modality::Walking).unwrap(), "\"caminhada\"");
        assert_eq!(serde_json::to_string(&TimeOfDay::Evening).unwrap(), "\"noite\"");
    }

    #[test]
    fn activity_factors() {
        assert_eq!(ActivityLevel::Sedentary.factor(), 1.2);
        assert_eq!(ActivityLevel::Light.factor(), 1.375);
        assert_eq!(ActivityLevel::Moderate.factor(), 1.55);
        assert_eq!(ActivityLevel::Intense.factor(), 1.725);
        assert_eq!(ActivityLevel::Unset.factor(), 1.4);
    }

    #[test]
    fn unset_modality_means_strength() {
        assert_eq!(Modality::Unset.effective(), Modality::Strength);
        assert_eq!(Modality::Running.effective(), Modality::Running);
    }

    #[test]
    fn profile_deserializes_with_missing_fields() {
        let p: UserProfile = serde_json::from_str(r#"{"name":"Bia","age":27,"sex":"feminino"}"#).unwrap();
        assert_eq!(p.name, "Bia");
        assert_eq!(p.sex, BiologicalSex::Female);
        assert_eq!(p.meals_per_day, 0);
        assert_eq!(p.workout_time, TimeOfDay::Unset);
    }

    // ── Validation ───────────────────────────────────────────────────────

    fn measured() -> UserProfile {
        UserProfile {
            weight_kg: 70.0,
            height_cm: 175,
            ..Default::default()
        }
    }

    #[test]
    fn validate_accepts_values_in_range() {
        let update = ProfileUpdate {
            age: Some(119),
            weight_kg: Some(20.0),
            height_cm: Some(250),
            training_days_per_week: Some(7),
            session_minutes: Some(10),
            meals_per_day: Some(3),
            ..Default::default()
        };
        assert_eq!(update.validate(&UserProfile::default()), Ok(()));
    }

    #[test]
    fn validate_rejects_out_of_range_fields() {
        let profile = measured();
        let cases = [
            (ProfileUpdate { age: Some(0), ..Default::default() }, ProfileError::Age(0)),
            (ProfileUpdate { age: Some(120), ..Default::default() }, ProfileError::Age(120)),
            (ProfileUpdate { weight_kg: Some(19.9), ..Default::default() }, ProfileError::Weight(19.9)),
            (ProfileUpdate { weight_kg: Some(300.5), ..Default::default() }, ProfileError::Weight(300.5)),
            (ProfileUpdate { height_cm: Some(99), ..Default::default() }, ProfileError::Height(99)),
            (ProfileUpdate { height_cm: Some(251), ..Default::default() }, ProfileError::Height(251)),
            (
                ProfileUpdate { training_days_per_week: Some(0), ..Default::default() },
                ProfileError::TrainingDays(0),
            ),
            (
                ProfileUpdate { training_days_per_week: Some(200), ..Default::default() },
                ProfileError::TrainingDays(200),
            ),
            (
                ProfileUpdate { session_minutes: Some(5), ..Default::default() },
                ProfileError::SessionMinutes(5),
            ),
            (ProfileUpdate { meals_per_day: Some(8), ..Default::default() }, ProfileError::MealsPerDay(8)),
        ];
        for (update, expected) in cases {
            assert_eq!(update.validate(&profile), Err(expected));
        }
    }

    #[test]
    fn validate_rejects_nan_weight() {
        let update = ProfileUpdate { weight_kg: Some(f64::NAN), ..Default::default() };
        assert!(matches!(update.validate(&measured()), Err(ProfileError::Weight(_))));
    }

    #[test]
    fn weight_alone_needs_a_stored_height() {
        let weight_only = ProfileUpdate { weight_kg: Some(80.0), ..Default::default() };
        assert_eq!(
            weight_only.validate(&UserProfile::default()),
            Err(ProfileError::MeasurementsIncomplete)
        );
        assert_eq!(weight_only.validate(&measured()), Ok(()));

        let height_only = ProfileUpdate { height_cm: Some(180), ..Default::default() };
        assert_eq!(
            height_only.validate(&UserProfile::default()),
            Err(ProfileError::MeasurementsIncomplete)
        );
    }
}
