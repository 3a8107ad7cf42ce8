/// Shortcuts offered by `/symptoms` and `/quick N`.
pub const QUICK_SYMPTOMS: [&str; 6] = [
    "Headache",
    "Fever",
    "Cough",
    "Sore throat",
    "Stomach pain",
    "Fatigue",
];

/// The message submitted for quick symptom `number` (1-based).
pub fn quick_symptom_text(number: usize) -> Option<String> {
    let symptom = QUICK_SYMPTOMS.get(number.checked_sub(1)?)?;
    Some(format!("I have {}", symptom.to_lowercase()))
}

pub fn symptom_menu() -> String {
    QUICK_SYMPTOMS
        .iter()
        .enumerate()
        .map(|(index, symptom)| format!("  {}. {}", index + 1, symptom))
        .collect::<Vec<_>>()
        .join("\n")
}
