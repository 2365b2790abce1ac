//! Canned questions, error hints and reply builders for the intake chat.

use crate::plans::nutrition::{bmi, bmi_class};
use crate::plans::{DietPlan, Workout};
use crate::profile::{ProfileUpdate, TrainingLocation, UserProfile};

use super::state::IntakeStep;

const BASIC_INFO_FIELDS: &str = "\
• Sua idade
• Sexo atribuído no nascimento: masculino, feminino ou prefiro não declarar
• Gênero: mulher cis, mulher trans, homem cis, homem trans, outro (especifique) ou prefiro não declarar";

/// The question asked when entering `step`. `name` may be empty.
pub fn question(step: IntakeStep, name: &str) -> String {
    let greeting_name = if name.is_empty() {
        String::new()
    } else {
        format!(", {name}")
    };

    match step {
        IntakeStep::BasicInfo => format!(
            "Olá{greeting_name}! Sou seu assistente de fitness. Vou te ajudar a criar treinos e \
             dietas personalizados.\n\nPara começar, me conte:\n{BASIC_INFO_FIELDS}\n\n\
             (Ex: \"28 anos, masculino, homem cis\" ou \"25, feminino, mulher trans\")\n\n\
             Nota: O sexo biológico é importante para cálculos metabólicos. Seu gênero será \
             respeitado em toda comunicação."
        ),
        IntakeStep::Measurements => format!(
            "Ótimo{greeting_name}! Agora me diga seu peso e altura.\n\n\
             (Ex: \"75kg e 175cm\" ou \"75kg, 1.75m\")"
        ),
        IntakeStep::Objective => "Ótimo! Qual é o seu principal objetivo?\n\nExemplos: perder \
             gordura, ganhar massa muscular, manter a forma, melhorar condicionamento..."
            .to_string(),
        IntakeStep::Activity => "Qual seu nível de atividade física atual?\n\n\
             1. Sedentário (pouco ou nenhum exercício)\n\
             2. Leve (exercício 1-3 dias/semana)\n\
             3. Moderado (exercício 3-5 dias/semana)\n\
             4. Intenso (exercício 6-7 dias/semana)"
            .to_string(),
        IntakeStep::Health => "Quase lá! Você tem alguma restrição médica ou lesão que eu deva \
             considerar?\n\n(Ex: \"diabetes, lesão no joelho\" ou \"nenhuma\")"
            .to_string(),
        IntakeStep::TrainingPreferences => "Agora vamos personalizar seu treino! Me conte:\n\n\
             • Quantos dias por semana? (1-6)\n\
             • Quanto tempo por sessão? (30min, 45min, 1h, 1h30)\n\
             • Seu nível: iniciante, intermediário ou avançado\n\
             • Onde treina: academia ou casa\n\
             • Tipo de treino preferido? (musculação, funcional, corrida, crossfit, caminhada, \
             calistenia)\n\n\
             (Ex: \"4 dias, 1h, intermediário, academia, musculação\")"
            .to_string(),
        IntakeStep::DietPreferences => "Excelente! Agora sobre sua alimentação:\n\n\
             • Tem alguma restrição alimentar? (lactose, glúten, vegetariano, vegano, etc)\n\
             • Alguma comida favorita que quer incluir na dieta?\n\
             • Alguma comida que você NÃO gosta ou quer evitar?\n\
             • Quantas refeições prefere fazer por dia? (3-6)\n\
             • Em que horário costuma treinar? (manhã, tarde, noite)\n\n\
             (Ex: \"intolerante a lactose, gosto de frango e arroz, não gosto de peixe, \
             5 refeições, treino à noite\")"
            .to_string(),
        IntakeStep::Complete => String::new(),
    }
}

/// The hint shown when an answer for `step` could not be parsed.
pub fn error_message(step: IntakeStep) -> &'static str {
    match step {
        IntakeStep::BasicInfo => {
            "Não consegui entender. Por favor, informe:\n• Idade\n\
             • Sexo: masculino, feminino ou prefiro não declarar\n\
             • Gênero: mulher cis, mulher trans, homem cis, homem trans, outro ou prefiro não \
             declarar\n\n(Ex: \"25 anos, feminino, mulher cis\")"
        }
        IntakeStep::Measurements => {
            "Não consegui entender. Por favor, informe seu peso e altura.\n\n(Ex: \"70kg e 165cm\")"
        }
        IntakeStep::Objective => "Por favor, me conte qual é seu objetivo principal.",
        IntakeStep::Activity => {
            "Por favor, escolha uma opção de 1 a 4, ou digite o nível de atividade."
        }
        IntakeStep::Health => {
            "Por favor, liste suas restrições/lesões separadas por vírgula, ou digite \"nenhuma\"."
        }
        IntakeStep::TrainingPreferences => {
            "Por favor, informe: dias por semana, tempo, nível, local (academia/casa) e tipo de \
             treino.\n\n(Ex: \"4 dias, 1h, intermediário, academia, musculação\")"
        }
        IntakeStep::DietPreferences => {
            "Por favor, me conte sobre suas preferências alimentares.\n\n(Ex: \"sem lactose, \
             gosto de frango, não gosto de peixe, 5 refeições, treino à noite\")"
        }
        IntakeStep::Complete => "",
    }
}

/// Summary shown when the linear intake reaches `Complete`.
pub fn completion_summary(profile: &UserProfile) -> String {
    let mut out = if profile.name.is_empty() {
        "✅ Perfeito! Anamnese completa!\n\n".to_string()
    } else {
        format!("✅ Perfeito, {}! Anamnese completa!\n\n", profile.name)
    };

    out.push_str("📋 **Resumo dos seus dados:**\n");
    out.push_str(&format!("• Idade: {} anos\n", profile.age));
    if profile.sex.is_set() {
        out.push_str(&format!("• Sexo: {}\n", profile.sex.label()));
    }
    out.push_str(&format!("• Peso: {} kg\n", profile.weight_kg));
    out.push_str(&format!("• Altura: {} cm\n", profile.height_cm));
    if let Some(value) = bmi(profile) {
        out.push_str(&format!("• IMC: {value:.1} ({})\n", bmi_class(value)));
    }
    out.push_str(&format!("• Objetivo: {}\n", profile.objective));
    out.push_str(&format!(
        "• Nivel de atividade: {}\n",
        profile.activity_level.label()
    ));
    if !profile.medical_restrictions.is_empty() {
        out.push_str(&format!(
            "• Restricoes: {}\n",
            profile.medical_restrictions.join(", ")
        ));
    }
    if !profile.injuries.is_empty() {
        out.push_str(&format!("• Lesoes: {}\n", profile.injuries.join(", ")));
    }

    out.push_str(
        "\nAgora posso criar treinos e dietas personalizados para voce! O que gostaria de fazer?\n\n",
    );
    out.push_str("• Diga \"treino\" para criar uma planilha de treino\n");
    out.push_str("• Diga \"dieta\" para criar um plano alimentar\n");
    out.push_str("• Diga \"personalizar treino\" ou \"personalizar dieta\" para ajustar preferencias");
    out
}

/// One-line-per-field view of what is stored, used by the status command.
pub fn user_context(profile: &UserProfile, workouts_count: usize, has_diet: bool) -> Vec<String> {
    let mut parts = Vec::new();

    if !profile.name.is_empty() {
        parts.push(format!("Nome: {}", profile.name));
    }
    if profile.age > 0 {
        parts.push(format!("Idade: {} anos", profile.age));
    }
    if profile.sex.is_set() {
        parts.push(format!("Sexo: {}", profile.sex.as_str()));
    }
    if profile.weight_kg > 0.0 {
        parts.push(format!("Peso: {}kg", profile.weight_kg));
    }
    if profile.height_cm > 0 {
        parts.push(format!("Altura: {}cm", profile.height_cm));
        if let Some(value) = bmi(profile) {
            parts.push(format!("IMC: {value:.1}"));
        }
    }
    if !profile.objective.is_empty() {
        parts.push(format!("Objetivo: {}", profile.objective));
    }
    if !profile.activity_level.as_str().is_empty() {
        parts.push(format!(
            "Nivel de atividade: {}",
            profile.activity_level.as_str()
        ));
    }
    if !profile.medical_restrictions.is_empty() {
        parts.push(format!(
            "Restricoes medicas: {}",
            profile.medical_restrictions.join(", ")
        ));
    }
    if !profile.injuries.is_empty() {
        parts.push(format!("Lesoes: {}", profile.injuries.join(", ")));
    }
    if workouts_count > 0 {
        parts.push(format!("Treinos configurados: {workouts_count}"));
    }
    if has_diet {
        parts.push("Dieta configurada: sim".to_string());
    }

    parts
}

pub fn status_message(profile: &UserProfile, workouts_count: usize, has_diet: bool) -> String {
    let parts = user_context(profile, workouts_count, has_diet);
    let mut out = "📋 **Seus dados atuais:**\n\n".to_string();
    if parts.is_empty() {
        out.push_str("Nenhum dado preenchido ainda.");
    } else {
        out.push_str("• ");
        out.push_str(&parts.join("\n• "));
    }
    out
}

pub fn help_message(profile: &UserProfile) -> String {
    let opener = if profile.name.is_empty() {
        "Posso te ajudar com:".to_string()
    } else {
        format!("{}, posso te ajudar com:", profile.name)
    };
    format!(
        "{opener}\n\n\
         • Criar planilhas de treino (diga \"quero um treino\")\n\
         • Montar plano alimentar (diga \"monte minha dieta\")\n\
         • Personalizar preferencias (diga \"personalizar treino\" ou \"personalizar dieta\")\n\
         • Ver seus dados atuais (diga \"meus dados\")\n\
         • Recomecar do zero (diga \"reiniciar\")\n\n\
         O que gostaria de fazer?"
    )
}

/// "1h 30min", "1h", "45min".
pub fn format_minutes(minutes: u32) -> String {
    if minutes >= 60 {
        let rest = minutes % 60;
        if rest > 0 {
            format!("{}h {rest}min", minutes / 60)
        } else {
            format!("{}h", minutes / 60)
        }
    } else {
        format!("{minutes}min")
    }
}

/// Reply after a workout plan was generated.
pub fn workout_plan_message(profile: &UserProfile, workouts: &[Workout]) -> String {
    let mut out = "Criei um plano de treino PERSONALIZADO para voce!\n\n".to_string();

    out.push_str("**Personalizacoes aplicadas:**\n");
    out.push_str(&format!("• Modalidade: {}\n", profile.modality.label()));
    if profile.training_days_per_week > 0 {
        out.push_str(&format!(
            "• {} treino(s) para {} dias por semana\n",
            workouts.len(),
            profile.training_days_per_week
        ));
    }
    if profile.session_minutes > 0 {
        out.push_str(&format!(
            "• Exercicios ajustados para sessoes de ~{}\n",
            format_minutes(profile.session_minutes)
        ));
    }
    if profile.experience.is_set() {
        out.push_str(&format!(
            "• Intensidade para nivel {}\n",
            profile.experience.label()
        ));
    }
    if !profile.injuries.is_empty() {
        out.push_str(&format!(
            "• Exercicios adaptados para suas lesoes ({})\n",
            profile.injuries.join(", ")
        ));
    }
    if !profile.objective.is_empty() {
        out.push_str(&format!("• Focado no objetivo: \"{}\"\n", profile.objective));
    }

    out.push_str("\n**Seus treinos:**\n");
    for workout in workouts {
        out.push_str(&format!(
            "• {} - {} ({} exercicios)\n",
            workout.name,
            workout.weekday,
            workout.exercises.len()
        ));
    }

    out.push_str("\nVoce pode editar qualquer exercicio!\n\n");
    out.push_str("Quer que eu crie uma dieta personalizada tambem?");
    out
}

/// Reply after a diet plan was generated.
pub fn diet_plan_message(profile: &UserProfile, diet: &DietPlan) -> String {
    let mut out = if profile.name.is_empty() {
        "Criei um plano alimentar PERSONALIZADO para voce!\n\n".to_string()
    } else {
        format!(
            "Criei um plano alimentar PERSONALIZADO para voce, {}!\n\n",
            profile.name
        )
    };

    out.push_str("**Seus macros diarios (calculados para seu perfil):**\n");
    out.push_str(&format!("- {} kcal\n", diet.calories));
    out.push_str(&format!("- {}g proteinas\n", diet.protein_g));
    out.push_str(&format!("- {}g carboidratos\n", diet.carbs_g));
    out.push_str(&format!("- {}g gorduras\n\n", diet.fat_g));

    out.push_str("**Como calculei:**\n");
    if profile.weight_kg > 0.0 && profile.height_cm > 0 && profile.age > 0 {
        let sex = if profile.sex.is_set() {
            profile.sex.as_str()
        } else {
            "masculino"
        };
        out.push_str(&format!(
            "- TMB baseada em: {}kg, {}cm, {} anos, {sex}\n",
            profile.weight_kg, profile.height_cm, profile.age
        ));
    } else {
        out.push_str("- Valores padrao (faltam peso, altura ou idade)\n");
    }
    if !profile.activity_level.as_str().is_empty() {
        out.push_str(&format!(
            "- Nivel de atividade: {}\n",
            profile.activity_level.as_str()
        ));
    }
    if !profile.objective.is_empty() {
        out.push_str(&format!(
            "- Calorias ajustadas para: \"{}\"\n",
            profile.objective
        ));
    }

    out.push_str("\n**Personalizacoes aplicadas:**\n");
    out.push_str(&format!(
        "- {} refeicoes com quantidades calculadas\n",
        diet.meals.len()
    ));
    if !profile.dietary_restrictions.is_empty() {
        out.push_str(&format!(
            "- Substituicoes para: {}\n",
            profile.dietary_restrictions.join(", ")
        ));
    }
    if !profile.favorite_foods.is_empty() {
        out.push_str("- Inclui suas comidas favoritas quando possivel\n");
    }
    if !profile.avoided_foods.is_empty() {
        out.push_str(&format!(
            "- Removidos: {}\n",
            profile.avoided_foods.join(", ")
        ));
    }
    if !profile.workout_time.label().is_empty() {
        out.push_str(&format!(
            "- Refeicoes pre/pos treino ajustadas para treino pela {}\n",
            profile.workout_time.label()
        ));
    }

    out.push_str("\n**Suas refeicoes (com quantidades em gramas):**\n");
    for meal in &diet.meals {
        out.push_str(&format!(
            "\n**{}** ({}) - ~{} kcal\n",
            meal.name,
            meal.time,
            meal.total_calories()
        ));
        for food in &meal.foods {
            out.push_str(&format!("  - {}: {}g", food.name, food.grams));
            if food.protein_g.is_some() || food.carbs_g.is_some() {
                out.push_str(&format!(
                    " (P:{}g C:{}g G:{}g)",
                    food.protein_g.unwrap_or(0.0),
                    food.carbs_g.unwrap_or(0.0),
                    food.fat_g.unwrap_or(0.0)
                ));
            }
            out.push('\n');
        }
    }

    if !profile.medical_restrictions.is_empty() {
        out.push_str(&format!(
            "\n⚠️ Lembre-se de suas restricoes medicas: {}. Consulte um nutricionista para \
             ajustes especificos.\n",
            profile.medical_restrictions.join(", ")
        ));
    }

    out.push_str("\nVoce pode editar os alimentos, quantidades e horarios!");
    out
}

/// Acknowledge a preference sub-step answer, listing what was captured.
pub fn preferences_ack(step: IntakeStep, update: &ProfileUpdate) -> String {
    let mut captured = Vec::new();

    if let Some(days) = update.training_days_per_week {
        captured.push(format!("Dias por semana: {days}"));
    }
    if let Some(minutes) = update.session_minutes {
        captured.push(format!("Tempo por sessao: {}", format_minutes(minutes)));
    }
    if let Some(level) = update.experience {
        captured.push(format!("Nivel: {}", level.label()));
    }
    if let Some(location) = update.training_location {
        let label = match location {
            TrainingLocation::Gym => "academia",
            TrainingLocation::Home => "casa",
            TrainingLocation::Unset => "",
        };
        captured.push(format!("Local: {label}"));
    }
    if let Some(modality) = update.modality {
        captured.push(format!("Modalidade: {}", modality.label()));
    }
    if let Some(restrictions) = &update.dietary_restrictions {
        captured.push(format!("Restricoes alimentares: {}", restrictions.join(", ")));
    }
    if let Some(favorites) = &update.favorite_foods {
        captured.push(format!("Comidas favoritas: {}", favorites.join(", ")));
    }
    if let Some(avoided) = &update.avoided_foods {
        captured.push(format!("Evitar: {}", avoided.join(", ")));
    }
    if let Some(meals) = update.meals_per_day {
        captured.push(format!("Refeicoes por dia: {meals}"));
    }
    if let Some(time) = update.workout_time {
        captured.push(format!("Horario de treino: {}", time.label()));
    }

    let (title, next) = match step {
        IntakeStep::DietPreferences => (
            "Preferencias alimentares salvas!",
            "Diga \"dieta\" para gerar seu plano alimentar com essas preferencias.",
        ),
        _ => (
            "Preferencias de treino salvas!",
            "Diga \"treino\" para gerar seu plano de treino com essas preferencias.",
        ),
    };

    format!("✅ {title}\n\n• {}\n\n{next}", captured.join("\n• "))
}

/// Note appended to a reply when a profile change regenerated artifacts.
pub fn regeneration_notice(workouts: bool, diet: bool) -> Option<&'static str> {
    match (workouts, diet) {
        (true, true) => Some("🔄 Atualizei seus treinos e sua dieta com base nos novos dados."),
        (true, false) => Some("🔄 Atualizei seus treinos com base nos novos dados."),
        (false, true) => Some("🔄 Atualizei sua dieta com base nos novos dados."),
        (false, false) => None,
    }
}
