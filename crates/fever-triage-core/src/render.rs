//! Result rendering.
//!
//! [`ResultView::from_result`] is a pure function of the prediction: it
//! decides every text, class, and color the result page shows. The browser
//! layer only copies the view onto the DOM, always overwriting what was
//! there.
//!
//! Two independent axes drive the styling and may disagree:
//! - the severity *label* picks the title, icon, and title color;
//! - the *probability* picks the bar fill color.

use serde::Serialize;

use crate::models::{DiseaseBreakdown, PredictionResult};
use crate::text;

/// Semantic color, mapped to the page's CSS custom properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Danger,
    Warning,
    Success,
}

impl Tone {
    /// CSS value, e.g. `var(--danger)`.
    #[must_use]
    pub const fn css_var(self) -> &'static str {
        match self {
            Self::Danger => "var(--danger)",
            Self::Warning => "var(--warning)",
            Self::Success => "var(--success)",
        }
    }
}

/// Severity tier selected by the backend's `severity_level` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeverityTier {
    High,
    Medium,
    /// `"Low"`, a missing label, and any unrecognized label.
    Low,
}

impl SeverityTier {
    /// Case-sensitive match; anything other than `High`/`Medium` is `Low`.
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("High") => Self::High,
            Some("Medium") => Self::Medium,
            _ => Self::Low,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::High => text::TITLE_HIGH,
            Self::Medium => text::TITLE_MEDIUM,
            Self::Low => text::TITLE_LOW,
        }
    }

    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::High => Tone::Danger,
            Self::Medium => Tone::Warning,
            Self::Low => Tone::Success,
        }
    }

    /// Modifier class added to the result icon container.
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Full class list of the inner icon glyph.
    #[must_use]
    pub const fn icon_class(self) -> &'static str {
        match self {
            Self::High => "ph-bold ph-warning-octagon",
            Self::Medium => "ph-bold ph-warning",
            Self::Low => "ph-bold ph-check-circle",
        }
    }
}

/// Bar fill color from the raw probability: above 75 danger, above 40
/// warning, otherwise success.
#[must_use]
pub fn fill_tone(probability: f64) -> Tone {
    if probability > 75.0 {
        Tone::Danger
    } else if probability > 40.0 {
        Tone::Warning
    } else {
        Tone::Success
    }
}

/// Print a number the way the page shows it: integral values without a
/// decimal point, everything else in shortest form. Magnitudes at or above
/// 1e21 or below 1e-6 switch to exponent form (`1e+21`, `1.5e-7`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        exponent_form(value)
    } else {
        value.to_string()
    }
}

/// Shortest mantissa with an explicitly signed exponent.
fn exponent_form(value: f64) -> String {
    let raw = format!("{value:e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
        None => raw,
    }
}

/// `value` followed by `%`.
#[must_use]
pub fn percent(value: f64) -> String {
    format!("{}%", format_number(value))
}

/// A bold lead-in followed by plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledText {
    pub label: String,
    pub text: String,
}

/// Probability bar state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    /// Label shown immediately, e.g. `82%`.
    pub label: String,
    /// CSS width applied after `delay_ms`.
    pub width: String,
    pub tone: Tone,
    pub delay_ms: u32,
}

/// One row of the disease breakdown card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownRow {
    pub label: &'static str,
    /// Value as received, followed by `%`; doubles as the bar width.
    pub value: String,
    pub tone: Tone,
}

/// Everything the result and advice pages display for one prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub tier: SeverityTier,
    pub title: &'static str,
    pub title_tone: Tone,
    pub badge_class: &'static str,
    pub icon_class: &'static str,
    pub progress: ProgressView,
    pub message: LabeledText,
    /// `None` hides the breakdown card and drops any earlier rows.
    pub breakdown: Option<Vec<BreakdownRow>>,
    pub advice: LabeledText,
}

impl ResultView {
    #[must_use]
    pub fn from_result(result: &PredictionResult, fill_delay_ms: u32) -> Self {
        let tier = SeverityTier::from_label(result.severity_level.as_deref());
        let probability = percent(result.probability);

        Self {
            tier,
            title: tier.title(),
            title_tone: tier.tone(),
            badge_class: tier.badge_class(),
            icon_class: tier.icon_class(),
            progress: ProgressView {
                label: probability.clone(),
                width: probability,
                tone: fill_tone(result.probability),
                delay_ms: fill_delay_ms,
            },
            message: LabeledText {
                label: text::MESSAGE_LABEL.to_string(),
                text: result.message.clone(),
            },
            breakdown: result.disease_breakdown.as_ref().map(breakdown_rows),
            advice: LabeledText {
                label: text::advice_label(&format_number(result.probability)),
                text: result.medical_advice.clone(),
            },
        }
    }
}

fn breakdown_rows(breakdown: &DiseaseBreakdown) -> Vec<BreakdownRow> {
    vec![
        BreakdownRow {
            label: text::BREAKDOWN_DENGUE,
            value: percent(breakdown.dengue),
            tone: Tone::Danger,
        },
        BreakdownRow {
            label: text::BREAKDOWN_MALARIA,
            value: percent(breakdown.malaria),
            tone: Tone::Warning,
        },
        BreakdownRow {
            label: text::BREAKDOWN_NORMAL,
            value: percent(breakdown.normal),
            tone: Tone::Success,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(severity: Option<&str>, probability: f64) -> PredictionResult {
        PredictionResult {
            prediction: serde_json::json!(1),
            severity_level: severity.map(str::to_string),
            probability,
            message: "m".into(),
            medical_advice: "a".into(),
            disease_breakdown: None,
            patient_name: None,
        }
    }

    #[test]
    fn tier_follows_label_not_probability() {
        let view = ResultView::from_result(&result(Some("High"), 5.0), 300);
        assert_eq!(view.tier, SeverityTier::High);
        assert_eq!(view.title, text::TITLE_HIGH);
        assert_eq!(view.icon_class, "ph-bold ph-warning-octagon");
        assert_eq!(view.progress.tone, Tone::Success);
    }

    #[test]
    fn tier_labels_are_case_sensitive() {
        assert_eq!(SeverityTier::from_label(Some("high")), SeverityTier::Low);
        assert_eq!(SeverityTier::from_label(Some("Medium")), SeverityTier::Medium);
        assert_eq!(SeverityTier::from_label(Some("Critical")), SeverityTier::Low);
        assert_eq!(SeverityTier::from_label(None), SeverityTier::Low);
    }

    #[test]
    fn fill_thresholds_are_exclusive_lower_bounds() {
        assert_eq!(fill_tone(75.0), Tone::Warning);
        assert_eq!(fill_tone(75.01), Tone::Danger);
        assert_eq!(fill_tone(40.0), Tone::Success);
        assert_eq!(fill_tone(40.5), Tone::Warning);
        assert_eq!(fill_tone(-3.0), Tone::Success);
        assert_eq!(fill_tone(140.0), Tone::Danger);
    }

    #[test]
    fn numbers_print_like_the_page() {
        assert_eq!(format_number(82.0), "82");
        assert_eq!(format_number(33.33), "33.33");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(percent(0.5), "0.5%");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(0.000_001), "0.000001");
        assert_eq!(percent(1e21), "1e+21%");
    }

    #[test]
    fn breakdown_rows_keep_received_values() {
        let mut r = result(Some("Low"), 10.0);
        r.disease_breakdown = Some(DiseaseBreakdown {
            dengue: 60.0,
            malaria: 10.0,
            normal: 30.0,
        });
        let rows = ResultView::from_result(&r, 300).breakdown.unwrap();
        let values: Vec<_> = rows.iter().map(|row| row.value.as_str()).collect();
        assert_eq!(values, ["60%", "10%", "30%"]);
        let tones: Vec<_> = rows.iter().map(|row| row.tone).collect();
        assert_eq!(tones, [Tone::Danger, Tone::Warning, Tone::Success]);
    }

    #[test]
    fn breakdown_is_not_renormalized() {
        let mut r = result(None, 10.0);
        r.disease_breakdown = Some(DiseaseBreakdown {
            dengue: 50.0,
            malaria: 50.0,
            normal: 50.0,
        });
        let rows = ResultView::from_result(&r, 0).breakdown.unwrap();
        assert!(rows.iter().all(|row| row.value == "50%"));
    }

    #[test]
    fn advice_embeds_probability() {
        let view = ResultView::from_result(&result(Some("Medium"), 55.5), 300);
        assert!(view.advice.label.contains("55.5%"));
        assert_eq!(view.advice.text, "a");
        assert_eq!(view.message.label, text::MESSAGE_LABEL);
        assert_eq!(view.progress.delay_ms, 300);
        assert_eq!(view.title_tone, Tone::Warning);
    }
}
