//! Symptom form state and its coercion into a request payload.
//!
//! A numeric field counts as supplied only when it is present and not blank;
//! unsupplied fields take their documented default. A literal `"0"` is
//! supplied and coerces to 0. Text fields pass through untouched.

use std::collections::HashMap;

use crate::models::{DEFAULT_AGE, DEFAULT_GENDER, SymptomFeatures, SymptomFlag};

pub const PATIENT_NAME: &str = "patient_name";
pub const AGE: &str = "age";
pub const GENDER: &str = "gender";
pub const OTHER_SYMPTOMS: &str = "other_symptoms";

/// Every form field read on submit.
#[must_use]
pub fn field_names() -> Vec<&'static str> {
    let mut names = vec![PATIENT_NAME, AGE, GENDER, OTHER_SYMPTOMS];
    names.extend(SymptomFlag::ALL.iter().map(|flag| flag.field_name()));
    names
}

/// Raw values read from the form, keyed by field name.
///
/// Unchecked checkboxes and missing inputs are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: HashMap<String, String>,
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for tests and fixtures.
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Record a field value. The first value for a name wins, matching
    /// `FormData.get`.
    pub fn set(&mut self, name: &str, value: &str) {
        self.values
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// The field's value when it is present and non-empty.
    fn supplied(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.trim().is_empty())
    }

    fn text(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    fn integer(&self, name: &str, default: i32) -> i32 {
        self.supplied(name)
            .and_then(parse_leading_int)
            .unwrap_or(default)
    }

    /// Checked checkboxes without a numeric `value` attribute submit `"on"`;
    /// those count as set.
    fn flag(&self, name: &str) -> i32 {
        self.supplied(name)
            .map_or(0, |raw| parse_leading_int(raw).unwrap_or(1))
    }

    /// Coerce the form into the request payload.
    #[must_use]
    pub fn to_features(&self) -> SymptomFeatures {
        let mut features = SymptomFeatures {
            patient_name: self.text(PATIENT_NAME),
            age: self.integer(AGE, DEFAULT_AGE),
            gender: self.integer(GENDER, DEFAULT_GENDER),
            other_symptoms: self.text(OTHER_SYMPTOMS),
            ..SymptomFeatures::default()
        };
        for flag in SymptomFlag::ALL {
            features.set_flag(flag, self.flag(flag.field_name()));
        }
        features
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for FormState {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut state = Self::new();
        for (name, value) in iter {
            state.set(name, value);
        }
        state
    }
}

/// Parse the leading integer of `raw` the way form inputs are read:
/// leading whitespace and an optional sign are accepted, parsing stops at the
/// first non-digit (`"12.7"` is 12), and no digits at all means no value.
#[must_use]
pub fn parse_leading_int(raw: &str) -> Option<i32> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_form_yields_defaults() {
        let features = FormState::new().to_features();
        assert_eq!(features, SymptomFeatures::default());
        assert_eq!(features.age, 30);
        assert_eq!(features.gender, 0);
        for flag in SymptomFlag::ALL {
            assert_eq!(features.flag(flag), 0);
        }
    }

    #[test]
    fn empty_age_field_falls_back() {
        let features = FormState::new().with("age", "").with("gender", " ").to_features();
        assert_eq!(features.age, 30);
        assert_eq!(features.gender, 0);
    }

    #[test]
    fn literal_zero_is_supplied() {
        let features = FormState::new().with("age", "0").with("gender", "1").to_features();
        assert_eq!(features.age, 0);
        assert_eq!(features.gender, 1);
    }

    #[test]
    fn checked_flags_coerce_to_integers() {
        let features: SymptomFeatures = [("fever", "1"), ("rash", "1"), ("bleeding", "on")]
            .into_iter()
            .collect::<FormState>()
            .to_features();
        assert_eq!(features.fever, 1);
        assert_eq!(features.rash, 1);
        assert_eq!(features.bleeding, 1);
        assert_eq!(features.headache, 0);
    }

    #[test]
    fn unparseable_age_uses_default() {
        let features = FormState::new().with("age", "abc").to_features();
        assert_eq!(features.age, 30);
    }

    #[test]
    fn text_fields_pass_through() {
        let features = FormState::new()
            .with("patient_name", "أحمد")
            .with("other_symptoms", "  chills ")
            .to_features();
        assert_eq!(features.patient_name, "أحمد");
        assert_eq!(features.other_symptoms, "  chills ");
    }

    #[test]
    fn first_value_wins() {
        let state = FormState::new().with("age", "41").with("age", "12");
        assert_eq!(state.get("age"), Some("41"));
    }

    #[test]
    fn leading_int_parsing() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7 years"), Some(7));
        assert_eq!(parse_leading_int("12.7"), Some(12));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+5"), Some(5));
        assert_eq!(parse_leading_int("x1"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999"), None);
    }

    #[test]
    fn field_names_cover_payload() {
        let names = field_names();
        assert_eq!(names.len(), 11);
        assert!(names.contains(&"nausea_vomiting"));
    }
}
