//! Static workout catalogs, weekly split tables and the injury table.

use crate::profile::Modality;

use super::model::Exercise;

/// Weekday labels used by the split tables.
pub const WEEKDAYS: [&str; 6] = ["Segunda", "Terca", "Quarta", "Quinta", "Sexta", "Sabado"];

const SEG: &str = WEEKDAYS[0];
const TER: &str = WEEKDAYS[1];
const QUA: &str = WEEKDAYS[2];
const QUI: &str = WEEKDAYS[3];
const SEX: &str = WEEKDAYS[4];
const SAB: &str = WEEKDAYS[5];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseDef {
    pub name: &'static str,
    pub sets: u32,
    pub reps: &'static str,
    pub rest: &'static str,
    pub note: Option<&'static str>,
}

const fn ex(name: &'static str, sets: u32, reps: &'static str, rest: &'static str) -> ExerciseDef {
    ExerciseDef {
        name,
        sets,
        reps,
        rest,
        note: None,
    }
}

const fn exn(
    name: &'static str,
    sets: u32,
    reps: &'static str,
    rest: &'static str,
    note: &'static str,
) -> ExerciseDef {
    ExerciseDef {
        name,
        sets,
        reps,
        rest,
        note: Some(note),
    }
}

/// A single timed block ("Aquecimento 5 min").
const fn block(name: &'static str, duration: &'static str) -> ExerciseDef {
    ex(name, 1, duration, "0s")
}

const fn blockn(name: &'static str, duration: &'static str, note: &'static str) -> ExerciseDef {
    exn(name, 1, duration, "0s", note)
}

impl ExerciseDef {
    pub fn instantiate(&self) -> Exercise {
        Exercise {
            name: self.name.to_string(),
            sets: self.sets,
            reps: self.reps.to_string(),
            rest: self.rest.to_string(),
            note: self.note.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateDef {
    pub key: &'static str,
    pub name: &'static str,
    pub exercises: &'static [ExerciseDef],
}

impl TemplateDef {
    pub fn instantiate(&self) -> Vec<Exercise> {
        self.exercises.iter().map(ExerciseDef::instantiate).collect()
    }
}

// =============================================================================
// MUSCULACAO
// =============================================================================

static STRENGTH: &[TemplateDef] = &[
    TemplateDef {
        key: "peito_triceps",
        name: "Treino A - Peito/Tríceps",
        exercises: &[
            ex("Supino Reto", 4, "8-12", "90s"),
            ex("Supino Inclinado", 3, "10-12", "90s"),
            ex("Crucifixo com Halteres", 3, "12-15", "60s"),
            ex("Tríceps Pulley (Corda)", 3, "12-15", "60s"),
            ex("Tríceps Francês", 3, "10-12", "60s"),
        ],
    },
    TemplateDef {
        key: "costas_biceps",
        name: "Treino B - Costas/Bíceps",
        exercises: &[
            ex("Puxada Frontal", 4, "8-12", "90s"),
            ex("Remada Curvada com Barra", 3, "10-12", "90s"),
            ex("Remada Baixa no Cabo", 3, "12-15", "60s"),
            ex("Rosca Direta com Barra", 3, "10-12", "60s"),
            ex("Rosca Martelo", 3, "10-12", "60s"),
        ],
    },
    TemplateDef {
        key: "pernas",
        name: "Treino C - Pernas",
        exercises: &[
            ex("Agachamento Livre", 4, "8-12", "120s"),
            ex("Leg Press 45°", 3, "10-12", "90s"),
            ex("Cadeira Extensora", 3, "12-15", "60s"),
            ex("Cadeira Flexora", 3, "12-15", "60s"),
            ex("Elevação de Panturrilha em Pé", 4, "15-20", "45s"),
        ],
    },
    TemplateDef {
        key: "push_day",
        name: "Push - Peito/Ombros/Tríceps",
        exercises: &[
            ex("Supino Reto", 4, "8-12", "90s"),
            ex("Supino Inclinado", 3, "10-12", "90s"),
            ex("Desenvolvimento com Barra", 3, "10-12", "90s"),
            ex("Elevação Lateral", 3, "12-15", "60s"),
            ex("Tríceps Pulley (Corda)", 3, "12-15", "60s"),
            ex("Tríceps Francês", 3, "10-12", "60s"),
        ],
    },
    TemplateDef {
        key: "pull_day",
        name: "Pull - Costas/Bíceps",
        exercises: &[
            ex("Puxada Frontal", 4, "8-12", "90s"),
            ex("Remada Curvada com Barra", 3, "10-12", "90s"),
            ex("Remada Baixa no Cabo", 3, "10-12", "90s"),
            ex("Face Pull", 3, "15-20", "60s"),
            ex("Rosca Direta com Barra", 3, "10-12", "60s"),
            ex("Rosca Martelo", 3, "10-12", "60s"),
        ],
    },
    TemplateDef {
        key: "legs_day",
        name: "Legs - Pernas Completo",
        exercises: &[
            ex("Agachamento Livre", 4, "8-12", "120s"),
            ex("Leg Press 45°", 3, "10-12", "90s"),
            ex("Stiff (Levantamento Terra Romeno)", 3, "10-12", "90s"),
            ex("Cadeira Extensora", 3, "12-15", "60s"),
            ex("Cadeira Flexora", 3, "12-15", "60s"),
            ex("Elevação de Panturrilha em Pé", 4, "15-20", "45s"),
        ],
    },
    TemplateDef {
        key: "upper_body",
        name: "Upper Body - Superior",
        exercises: &[
            ex("Supino Reto", 4, "8-12", "90s"),
            ex("Puxada Frontal", 4, "8-12", "90s"),
            ex("Desenvolvimento com Barra", 3, "10-12", "90s"),
            ex("Remada Baixa no Cabo", 3, "10-12", "90s"),
            ex("Rosca Direta com Barra", 3, "10-12", "60s"),
            ex("Tríceps Pulley (Corda)", 3, "12-15", "60s"),
        ],
    },
    TemplateDef {
        key: "lower_body",
        name: "Lower Body - Inferior",
        exercises: &[
            ex("Agachamento Livre", 4, "8-12", "120s"),
            ex("Stiff (Levantamento Terra Romeno)", 3, "10-12", "90s"),
            ex("Leg Press 45°", 3, "10-12", "90s"),
            ex("Cadeira Extensora", 3, "12-15", "60s"),
            ex("Cadeira Flexora", 3, "12-15", "60s"),
            ex("Elevação Pélvica", 3, "12-15", "60s"),
            ex("Elevação de Panturrilha em Pé", 4, "15-20", "45s"),
        ],
    },
    TemplateDef {
        key: "full_body_a",
        name: "Full Body A",
        exercises: &[
            ex("Agachamento Livre", 3, "8-12", "120s"),
            ex("Supino Reto", 3, "8-12", "90s"),
            ex("Puxada Frontal", 3, "8-12", "90s"),
            ex("Desenvolvimento com Barra", 3, "10-12", "90s"),
            ex("Rosca Direta com Barra", 2, "10-12", "60s"),
            ex("Tríceps Pulley", 2, "12-15", "60s"),
        ],
    },
    TemplateDef {
        key: "full_body_b",
        name: "Full Body B",
        exercises: &[
            ex("Stiff (Levantamento Terra Romeno)", 3, "10-12", "90s"),
            ex("Supino Inclinado", 3, "10-12", "90s"),
            ex("Remada Curvada com Barra", 3, "10-12", "90s"),
            ex("Elevação Lateral", 3, "12-15", "60s"),
            ex("Leg Press 45°", 3, "10-12", "90s"),
            ex("Elevação de Panturrilha em Pé", 3, "15-20", "45s"),
        ],
    },
];

// =============================================================================
// CORRIDA
// =============================================================================

static RUNNING: &[TemplateDef] = &[
    TemplateDef {
        key: "intervalado",
        name: "Treino Intervalado (HIIT)",
        exercises: &[
            blockn("Aquecimento - Caminhada", "5 min", "Ritmo leve"),
            exn("Sprint", 8, "30s", "60s", "Velocidade máxima"),
            blockn("Desaquecimento - Caminhada", "5 min", "Ritmo leve"),
        ],
    },
    TemplateDef {
        key: "longo",
        name: "Corrida Longa",
        exercises: &[
            blockn("Aquecimento", "5 min", "Caminhada ou trote leve"),
            blockn("Corrida Contínua", "30-45 min", "Ritmo conversacional"),
            blockn("Desaquecimento", "5 min", "Caminhada"),
        ],
    },
    TemplateDef {
        key: "recuperacao",
        name: "Corrida de Recuperação",
        exercises: &[
            block("Caminhada", "5 min"),
            blockn("Trote Leve", "20-30 min", "Zona 2, ritmo fácil"),
            block("Alongamento", "10 min"),
        ],
    },
    TemplateDef {
        key: "tempo",
        name: "Corrida Tempo",
        exercises: &[
            blockn("Aquecimento", "10 min", "Trote leve"),
            blockn("Corrida Tempo", "20 min", "Ritmo desconfortavelmente rápido"),
            block("Desaquecimento", "5 min"),
        ],
    },
];

// =============================================================================
// CROSSFIT
// =============================================================================

static CROSSFIT: &[TemplateDef] = &[
    TemplateDef {
        key: "wod_amrap",
        name: "AMRAP 20min",
        exercises: &[
            block("Aquecimento Dinâmico", "5 min"),
            exn("Pull-ups", 1, "5", "0s", "AMRAP 20min - parte do circuito"),
            exn("Push-ups", 1, "10", "0s", "AMRAP 20min - parte do circuito"),
            exn("Air Squats", 1, "15", "0s", "AMRAP 20min - parte do circuito"),
            block("Alongamento", "5 min"),
        ],
    },
    TemplateDef {
        key: "wod_emom",
        name: "EMOM 15min",
        exercises: &[
            block("Aquecimento", "5 min"),
            exn("Burpee", 15, "5", "resto do min", "Every Minute On the Minute"),
            exn("Kettlebell Swings", 15, "10", "resto do min", "Minutos alternados"),
            block("Alongamento", "5 min"),
        ],
    },
    TemplateDef {
        key: "wod_fortime",
        name: "For Time",
        exercises: &[
            block("Aquecimento", "5 min"),
            exn("Wall Balls", 1, "50", "quando precisar", "Completar o mais rápido possível"),
            ex("Box Jumps", 1, "40", "quando precisar"),
            ex("Kettlebell Swings", 1, "30", "quando precisar"),
            ex("Toes to Bar", 1, "20", "quando precisar"),
            ex("Thrusters", 1, "10", "quando precisar"),
            block("Alongamento", "5 min"),
        ],
    },
];

// =============================================================================
// CAMINHADA
// =============================================================================

static WALKING: &[TemplateDef] = &[
    TemplateDef {
        key: "leve",
        name: "Caminhada Leve",
        exercises: &[
            block("Alongamento Inicial", "5 min"),
            blockn("Caminhada", "30 min", "Ritmo leve, confortável"),
            block("Alongamento Final", "5 min"),
        ],
    },
    TemplateDef {
        key: "moderada",
        name: "Caminhada Moderada",
        exercises: &[
            block("Alongamento", "5 min"),
            blockn("Caminhada Rápida", "40 min", "Ritmo acelerado, consegue conversar"),
            blockn("Desaquecimento", "5 min", "Ritmo leve"),
        ],
    },
    TemplateDef {
        key: "intensa",
        name: "Caminhada Intensa com Intervalos",
        exercises: &[
            block("Aquecimento", "5 min"),
            exn("Caminhada Rápida", 5, "3 min", "1 min", "Intervalos de alta intensidade"),
            exn("Caminhada Normal", 5, "2 min", "0s", "Recuperação ativa entre intervalos"),
            block("Desaquecimento", "5 min"),
        ],
    },
];

// =============================================================================
// FUNCIONAL
// =============================================================================

static FUNCTIONAL: &[TemplateDef] = &[
    TemplateDef {
        key: "circuito_a",
        name: "Circuito Funcional A - Full Body",
        exercises: &[
            block("Aquecimento - Polichinelos", "2 min"),
            ex("Agachamento com Salto", 4, "12", "30s"),
            ex("Flexão de Braço", 4, "10-15", "30s"),
            ex("Afundo Alternado", 4, "12 cada", "30s"),
            ex("Prancha", 4, "30-45s", "30s"),
            ex("Mountain Climber", 4, "20", "30s"),
            ex("Burpee", 3, "8-10", "45s"),
            block("Alongamento", "5 min"),
        ],
    },
    TemplateDef {
        key: "circuito_b",
        name: "Circuito Funcional B - Core e Cardio",
        exercises: &[
            block("Aquecimento - Corrida no lugar", "3 min"),
            ex("Escalador (Mountain Climber)", 4, "30s", "20s"),
            ex("Prancha Lateral", 3, "30s cada lado", "20s"),
            ex("Jumping Jack", 4, "30s", "20s"),
            ex("Abdominal Bicicleta", 3, "20", "30s"),
            ex("Skater Jump", 4, "12 cada", "30s"),
            ex("Prancha com Toque no Ombro", 3, "16", "30s"),
            block("Alongamento", "5 min"),
        ],
    },
    TemplateDef {
        key: "circuito_c",
        name: "Circuito Funcional C - Força",
        exercises: &[
            block("Aquecimento Dinâmico", "5 min"),
            ex("Agachamento Búlgaro", 4, "10 cada", "45s"),
            ex("Flexão Diamante", 3, "8-12", "45s"),
            ex("Stiff com Peso Corporal", 4, "12", "30s"),
            ex("Pike Push-up", 3, "8-10", "45s"),
            ex("Elevação Pélvica", 4, "15", "30s"),
            block("Alongamento", "5 min"),
        ],
    },
];

// =============================================================================
// CALISTENIA
// =============================================================================

static CALISTHENICS: &[TemplateDef] = &[
    TemplateDef {
        key: "upper",
        name: "Calistenia - Membros Superiores",
        exercises: &[
            block("Aquecimento - Rotação de Ombros", "2 min"),
            ex("Flexão de Braço", 4, "10-15", "60s"),
            ex("Barra Fixa (Pull-up)", 4, "8-12", "90s"),
            ex("Pike Push-up", 3, "8-10", "60s"),
            ex("Dips nas Paralelas", 4, "8-12", "90s"),
            ex("Flexão Diamante", 3, "8-10", "60s"),
            ex("Chin-up (Barra Supinada)", 3, "6-10", "90s"),
            block("Alongamento", "5 min"),
        ],
    },
    TemplateDef {
        key: "lower",
        name: "Calistenia - Membros Inferiores",
        exercises: &[
            block("Aquecimento - Agachamento livre", "2 min"),
            ex("Pistol Squat", 4, "6-8 cada", "90s"),
            ex("Agachamento Búlgaro", 4, "10 cada", "60s"),
            ex("Agachamento com Salto", 4, "10-12", "60s"),
            ex("Nordic Curl", 3, "5-8", "90s"),
            ex("Elevação de Panturrilha em Pé", 4, "15-20", "45s"),
            ex("Glute Bridge Unilateral", 3, "12 cada", "45s"),
            block("Alongamento", "5 min"),
        ],
    },
    TemplateDef {
        key: "full",
        name: "Calistenia - Full Body",
        exercises: &[
            block("Aquecimento Dinâmico", "5 min"),
            ex("Burpee", 4, "8-10", "60s"),
            ex("Barra Fixa (Pull-up)", 4, "6-10", "90s"),
            ex("Pistol Squat", 3, "6 cada", "90s"),
            ex("Flexão Archer", 3, "6 cada", "60s"),
            ex("L-Sit", 4, "10-20s", "60s"),
            ex("Muscle Up", 3, "3-5", "120s"),
            ex("Parada de Mãos", 3, "20-30s", "60s"),
            block("Alongamento", "5 min"),
        ],
    },
];

/// All templates for a modality. Unset means strength training.
pub fn catalog(modality: Modality) -> &'static [TemplateDef] {
    match modality.effective() {
        Modality::Strength | Modality::Unset => STRENGTH,
        Modality::Running => RUNNING,
        Modality::Crossfit => CROSSFIT,
        Modality::Walking => WALKING,
        Modality::Functional => FUNCTIONAL,
        Modality::Calisthenics => CALISTHENICS,
    }
}

pub fn template(modality: Modality, key: &str) -> Option<&'static TemplateDef> {
    catalog(modality).iter().find(|t| t.key == key)
}

// =============================================================================
// SPLITS
// =============================================================================

/// One session of a weekly split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitEntry {
    pub template: &'static str,
    pub weekday: &'static str,
}

// A macro rather than a const fn so the split arrays stay promotable to
// `&'static`.
macro_rules! day {
    ($template:literal, $weekday:expr) => {
        SplitEntry {
            template: $template,
            weekday: $weekday,
        }
    };
}

/// Days per week used when the profile has none.
pub const DEFAULT_DAYS: u8 = 3;

/// The weekly split for `modality` and `days` per week. `0` means the
/// default; anything above 7 is clamped.
pub fn split(modality: Modality, days: u8) -> &'static [SplitEntry] {
    let days = if days == 0 { DEFAULT_DAYS } else { days.clamp(1, 7) };

    match (modality.effective(), days) {
        (Modality::Running, 1) => &[day!("recuperacao", SEG)],
        (Modality::Running, 2) => &[day!("intervalado", SEG), day!("longo", SAB)],
        (Modality::Running, 3) => &[
            day!("intervalado", SEG),
            day!("recuperacao", QUA),
            day!("longo", SAB),
        ],
        (Modality::Running, 4) => &[
            day!("intervalado", SEG),
            day!("recuperacao", TER),
            day!("tempo", QUI),
            day!("longo", SAB),
        ],
        (Modality::Running, _) => &[
            day!("intervalado", SEG),
            day!("recuperacao", TER),
            day!("tempo", QUA),
            day!("intervalado", QUI),
            day!("longo", SAB),
        ],

        (Modality::Crossfit, 1) => &[day!("wod_amrap", SEG)],
        (Modality::Crossfit, 2) => &[day!("wod_amrap", SEG), day!("wod_fortime", QUI)],
        (Modality::Crossfit, 3) => &[
            day!("wod_amrap", SEG),
            day!("wod_emom", QUA),
            day!("wod_fortime", SEX),
        ],
        (Modality::Crossfit, _) => &[
            day!("wod_amrap", SEG),
            day!("wod_emom", TER),
            day!("wod_fortime", QUA),
            day!("wod_amrap", SEX),
        ],

        (Modality::Walking, 1) => &[day!("leve", SEG)],
        (Modality::Walking, 2) => &[day!("leve", SEG), day!("moderada", QUI)],
        (Modality::Walking, 3) => &[day!("leve", SEG), day!("moderada", QUA), day!("intensa", SAB)],
        (Modality::Walking, 4 | 5) => &[
            day!("leve", SEG),
            day!("moderada", TER),
            day!("leve", QUI),
            day!("intensa", SAB),
        ],
        (Modality::Walking, _) => &[
            day!("leve", SEG),
            day!("moderada", TER),
            day!("leve", QUA),
            day!("moderada", QUI),
            day!("leve", SEX),
            day!("intensa", SAB),
        ],

        (Modality::Functional, 1) => &[day!("circuito_a", SEG)],
        (Modality::Functional, 2) => &[day!("circuito_a", SEG), day!("circuito_b", QUI)],
        (Modality::Functional, 3) => &[
            day!("circuito_a", SEG),
            day!("circuito_b", QUA),
            day!("circuito_c", SEX),
        ],
        (Modality::Functional, 4) => &[
            day!("circuito_a", SEG),
            day!("circuito_b", TER),
            day!("circuito_c", QUI),
            day!("circuito_a", SEX),
        ],
        (Modality::Functional, _) => &[
            day!("circuito_a", SEG),
            day!("circuito_b", TER),
            day!("circuito_c", QUA),
            day!("circuito_a", QUI),
            day!("circuito_b", SEX),
        ],

        (Modality::Calisthenics, 1) => &[day!("full", SEG)],
        (Modality::Calisthenics, 2) => &[day!("upper", SEG), day!("lower", QUI)],
        (Modality::Calisthenics, 3) => &[day!("upper", SEG), day!("lower", QUA), day!("full", SEX)],
        (Modality::Calisthenics, 4) => &[
            day!("upper", SEG),
            day!("lower", TER),
            day!("full", QUI),
            day!("upper", SEX),
        ],
        (Modality::Calisthenics, _) => &[
            day!("upper", SEG),
            day!("lower", TER),
            day!("full", QUA),
            day!("upper", QUI),
            day!("lower", SEX),
        ],

        (_, 1) => &[day!("full_body_a", SEG)],
        (_, 2) => &[day!("full_body_a", SEG), day!("full_body_b", QUI)],
        (_, 3) => &[day!("push_day", SEG), day!("pull_day", QUA), day!("legs_day", SEX)],
        (_, 4) => &[
            day!("upper_body", SEG),
            day!("lower_body", TER),
            day!("upper_body", QUI),
            day!("lower_body", SEX),
        ],
        (_, 5) => &[
            day!("push_day", SEG),
            day!("pull_day", TER),
            day!("legs_day", QUA),
            day!("upper_body", QUI),
            day!("lower_body", SEX),
        ],
        (_, _) => &[
            day!("push_day", SEG),
            day!("pull_day", TER),
            day!("legs_day", QUA),
            day!("push_day", QUI),
            day!("pull_day", SEX),
            day!("legs_day", SAB),
        ],
    }
}

// =============================================================================
// INJURIES
// =============================================================================

/// Exercises to avoid for an injured body part, with safer alternatives.
/// Keys and avoid keywords are folded (lowercase, no accents).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjuryRule {
    pub key: &'static str,
    pub avoid: &'static [&'static str],
    pub alternatives: &'static [&'static str],
}

pub static INJURY_RULES: &[InjuryRule] = &[
    InjuryRule {
        key: "ombro",
        avoid: &["supino", "desenvolvimento"],
        alternatives: &["Peck Deck", "Crossover"],
    },
    InjuryRule {
        key: "joelho",
        avoid: &["agachamento", "leg press", "extensora"],
        alternatives: &["Cadeira Flexora", "Stiff", "Elevação Pélvica", "Glúteo no cabo"],
    },
    InjuryRule {
        key: "costas",
        avoid: &["remada", "levantamento"],
        alternatives: &["Puxada no Pulley", "Pulldown"],
    },
    InjuryRule {
        key: "lombar",
        avoid: &["agachamento", "stiff", "remada curvada"],
        alternatives: &["Leg Press 45", "Hack Machine"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODALITIES: [Modality; 6] = [
        Modality::Strength,
        Modality::Running,
        Modality::Crossfit,
        Modality::Walking,
        Modality::Functional,
        Modality::Calisthenics,
    ];

    #[test]
    fn every_split_entry_resolves_to_a_template() {
        for modality in ALL_MODALITIES {
            for days in 0..=8 {
                for entry in split(modality, days) {
                    assert!(
                        template(modality, entry.template).is_some(),
                        "{modality:?} / {days} days: missing template {}",
                        entry.template
                    );
                    assert!(WEEKDAYS.contains(&entry.weekday));
                }
            }
        }
    }

    #[test]
    fn zero_days_means_default_split() {
        for modality in ALL_MODALITIES {
            assert_eq!(split(modality, 0), split(modality, DEFAULT_DAYS));
        }
        assert_eq!(split(Modality::Strength, 9), split(Modality::Strength, 7));
    }

    #[test]
    fn split_sizes_for_strength() {
        let sizes: Vec<usize> = (1..=7).map(|d| split(Modality::Strength, d).len()).collect();
        assert_eq!(sizes, vec![1, 2, 3, 4, 5, 6, 6]);
    }

    #[test]
    fn unset_modality_uses_strength_catalog() {
        assert_eq!(catalog(Modality::Unset).len(), 10);
        assert!(template(Modality::Unset, "push_day").is_some());
        assert!(template(Modality::Running, "push_day").is_none());
    }

    #[test]
    fn catalog_sizes() {
        assert_eq!(catalog(Modality::Running).len(), 4);
        assert_eq!(catalog(Modality::Crossfit).len(), 3);
        assert_eq!(catalog(Modality::Walking).len(), 3);
        assert_eq!(catalog(Modality::Functional).len(), 3);
        assert_eq!(catalog(Modality::Calisthenics).len(), 3);
    }

    #[test]
    fn instantiate_copies_fields() {
        let sprint = template(Modality::Running, "intervalado").unwrap().instantiate();
        assert_eq!(sprint[1].name, "Sprint");
        assert_eq!(sprint[1].sets, 8);
        assert_eq!(sprint[1].note.as_deref(), Some("Velocidade máxima"));
        assert_eq!(sprint[0].rest, "0s");
    }

    #[test]
    fn knee_rule_alternatives() {
        let knee = INJURY_RULES.iter().find(|r| r.key == "joelho").unwrap();
        assert_eq!(knee.alternatives[0], "Cadeira Flexora");
    }
}
