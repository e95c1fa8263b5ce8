//! Prompt sent to the external generator for a coaching question.

use health_coach_shared::{display_number, Profile};

pub fn coaching_prompt(profile: &Profile, bmi: Option<f64>, question: &str) -> String {
    let name = if profile.name.is_empty() {
        "User"
    } else {
        profile.name.as_str()
    };
    let bmi = bmi.map(display_number).unwrap_or_else(|| "unknown".to_string());

    format!(
        "You are a helpful, accurate assistant.\n\
         User name: {name}\n\
         Age: {age}, Weight: {weight} kg, Height: {height} cm, BMI: {bmi}\n\
         Question: {question}\n\
         Give a concise, practical answer. If giving a meal plan, include portion sizes.",
        name = name,
        age = profile.age,
        weight = display_number(profile.weight_kg),
        height = display_number(profile.height_cm),
        bmi = bmi,
        question = question,
    )
}
