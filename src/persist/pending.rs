//! Dirty flags per persisted category.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PersonalInfo,
    Workouts,
    Diet,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "personal_info",
            Self::Workouts => "workouts",
            Self::Diet => "diet",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PendingChanges {
    pub personal_info: bool,
    pub workouts: bool,
    pub diet: bool,
}

impl PendingChanges {
    /// Every category, with diet only when a plan exists.
    pub fn all(include_diet: bool) -> Self {
        Self {
            personal_info: true,
            workouts: true,
            diet: include_diet,
        }
    }

    pub fn mark(&mut self, category: Category) {
        match category {
            Category::PersonalInfo => self.personal_info = true,
            Category::Workouts => self.workouts = true,
            Category::Diet => self.diet = true,
        }
    }

    pub fn is_marked(&self, category: Category) -> bool {
        match category {
            Category::PersonalInfo => self.personal_info,
            Category::Workouts => self.workouts,
            Category::Diet => self.diet,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.personal_info || self.workouts || self.diet)
    }

    /// Return the current flags and clear them.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Union with `other`.
    pub fn merge(&mut self, other: PendingChanges) {
        self.personal_info |= other.personal_info;
        self.workouts |= other.workouts;
        self.diet |= other.diet;
    }
}
