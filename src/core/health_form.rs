//! Editable state of the health data form and its conversion into a
//! [`HealthSubmission`].
//!
//! Numeric fields follow a parse-or-null policy: anything empty, malformed or
//! non-finite becomes `None` instead of failing the whole submission.

use crate::api::HealthSubmission;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthField {
    BloodGlucose,
    SystolicBp,
    DiastolicBp,
    HeartRate,
    Age,
    Bmi,
    MedicalHistory,
}

impl HealthField {
    pub const ALL: [HealthField; 7] = [
        HealthField::BloodGlucose,
        HealthField::SystolicBp,
        HealthField::DiastolicBp,
        HealthField::HeartRate,
        HealthField::Age,
        HealthField::Bmi,
        HealthField::MedicalHistory,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HealthField::BloodGlucose => "Blood glucose",
            HealthField::SystolicBp => "Systolic BP",
            HealthField::DiastolicBp => "Diastolic BP",
            HealthField::HeartRate => "Heart rate",
            HealthField::Age => "Age",
            HealthField::Bmi => "BMI",
            HealthField::MedicalHistory => "Medical history",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            HealthField::BloodGlucose => "mg/dL",
            HealthField::SystolicBp | HealthField::DiastolicBp => "mmHg",
            HealthField::HeartRate => "bpm",
            HealthField::Age => "years",
            HealthField::Bmi => "kg/m²",
            HealthField::MedicalHistory => "comma-separated",
        }
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct HealthForm {
    values: [String; 7],
    focused: HealthField,
}

impl Default for HealthForm {
    fn default() -> Self {
        Self {
            values: Default::default(),
            focused: HealthField::BloodGlucose,
        }
    }
}

impl HealthForm {
    pub fn value(&self, field: HealthField) -> &str {
        &self.values[field.index()]
    }

    pub fn set_value(&mut self, field: HealthField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    pub fn focused(&self) -> HealthField {
        self.focused
    }

    pub fn focus(&mut self, field: HealthField) {
        self.focused = field;
    }

    pub fn focus_next(&mut self) {
        let next = (self.focused.index() + 1) % HealthField::ALL.len();
        self.focused = HealthField::ALL[next];
    }

    pub fn focus_previous(&mut self) {
        let len = HealthField::ALL.len();
        let previous = (self.focused.index() + len - 1) % len;
        self.focused = HealthField::ALL[previous];
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.values[self.focused.index()].push(ch);
    }

    pub fn backspace(&mut self) {
        self.values[self.focused.index()].pop();
    }

    pub fn clear_focused(&mut self) {
        self.values[self.focused.index()].clear();
    }

    /// Snapshot the current field values into a fresh submission.
    pub fn to_submission(&self) -> HealthSubmission {
        HealthSubmission {
            blood_glucose: parse_float_field(self.value(HealthField::BloodGlucose)),
            systolic_bp: parse_float_field(self.value(HealthField::SystolicBp)),
            diastolic_bp: parse_float_field(self.value(HealthField::DiastolicBp)),
            heart_rate: parse_float_field(self.value(HealthField::HeartRate)),
            age: parse_int_field(self.value(HealthField::Age)),
            bmi: parse_float_field(self.value(HealthField::Bmi)),
            medical_history: parse_history(self.value(HealthField::MedicalHistory)),
        }
    }
}

pub fn parse_float_field(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn parse_int_field(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_history(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
