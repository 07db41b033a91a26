//! Wire models exchanged with the prediction backend.
//!
//! Field names match the backend's JSON contract exactly.

use serde::{Deserialize, Serialize};

// =============================================================================
// Request
// =============================================================================

/// Request payload for `POST /api/predict`.
///
/// Built once per submit from the form and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomFeatures {
    pub patient_name: String,
    pub age: i32,
    /// 0: male, 1: female
    pub gender: i32,
    pub other_symptoms: String,
    pub fever: i32,
    pub headache: i32,
    pub eye_pain: i32,
    pub joint_muscle_pain: i32,
    pub nausea_vomiting: i32,
    pub rash: i32,
    pub bleeding: i32,
}

pub const DEFAULT_AGE: i32 = 30;
pub const DEFAULT_GENDER: i32 = 0;

impl Default for SymptomFeatures {
    fn default() -> Self {
        Self {
            patient_name: String::new(),
            age: DEFAULT_AGE,
            gender: DEFAULT_GENDER,
            other_symptoms: String::new(),
            fever: 0,
            headache: 0,
            eye_pain: 0,
            joint_muscle_pain: 0,
            nausea_vomiting: 0,
            rash: 0,
            bleeding: 0,
        }
    }
}

/// The binary symptom flags carried by [`SymptomFeatures`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymptomFlag {
    Fever,
    Headache,
    EyePain,
    JointMusclePain,
    NauseaVomiting,
    Rash,
    Bleeding,
}

impl SymptomFlag {
    pub const ALL: [Self; 7] = [
        Self::Fever,
        Self::Headache,
        Self::EyePain,
        Self::JointMusclePain,
        Self::NauseaVomiting,
        Self::Rash,
        Self::Bleeding,
    ];

    /// Form field and JSON key for this flag.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Fever => "fever",
            Self::Headache => "headache",
            Self::EyePain => "eye_pain",
            Self::JointMusclePain => "joint_muscle_pain",
            Self::NauseaVomiting => "nausea_vomiting",
            Self::Rash => "rash",
            Self::Bleeding => "bleeding",
        }
    }
}

impl SymptomFeatures {
    #[must_use]
    pub const fn flag(&self, flag: SymptomFlag) -> i32 {
        match flag {
            SymptomFlag::Fever => self.fever,
            SymptomFlag::Headache => self.headache,
            SymptomFlag::EyePain => self.eye_pain,
            SymptomFlag::JointMusclePain => self.joint_muscle_pain,
            SymptomFlag::NauseaVomiting => self.nausea_vomiting,
            SymptomFlag::Rash => self.rash,
            SymptomFlag::Bleeding => self.bleeding,
        }
    }

    pub const fn set_flag(&mut self, flag: SymptomFlag, value: i32) {
        match flag {
            SymptomFlag::Fever => self.fever = value,
            SymptomFlag::Headache => self.headache = value,
            SymptomFlag::EyePain => self.eye_pain = value,
            SymptomFlag::JointMusclePain => self.joint_muscle_pain = value,
            SymptomFlag::NauseaVomiting => self.nausea_vomiting = value,
            SymptomFlag::Rash => self.rash = value,
            SymptomFlag::Bleeding => self.bleeding = value,
        }
    }
}

// =============================================================================
// Response
// =============================================================================

/// Successful response of `POST /api/predict`.
///
/// # Constraints
/// - `severity_level` is matched case-sensitively; a missing label renders
///   like any unrecognized one.
/// - `probability` is a percentage, expected in 0–100 but never clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Classifier output, kept as received. Part of the contract but not
    /// used for tiering, so any JSON value is accepted.
    #[serde(default)]
    pub prediction: serde_json::Value,
    #[serde(default)]
    pub severity_level: Option<String>,
    pub probability: f64,
    pub message: String,
    pub medical_advice: String,
    #[serde(default)]
    pub disease_breakdown: Option<DiseaseBreakdown>,
    /// Echo of the submitted name.
    #[serde(default)]
    pub patient_name: Option<String>,
}

/// Per-condition probability split, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiseaseBreakdown {
    pub dengue: f64,
    pub malaria: f64,
    pub normal: f64,
}

/// Response of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

impl ServiceStatus {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == "online" && self.model_loaded
    }
}
