//! Fixed user-facing strings.
//!
//! The client ships a single Arabic locale; these are reproduced exactly.

/// Submit button caption while a prediction is in flight.
pub const SUBMIT_LOADING: &str = "جاري التحليل...";

/// Submit button caption at rest.
pub const SUBMIT_IDLE: &str = "تحليل النتيجة";

/// Shown for every transport-level failure.
pub const CONNECTIVITY_ERROR: &str =
    "تعذر الاتصال بخادم الذكاء الاصطناعي. يرجى التأكد من تشغيل الخادم (Backend).";

pub const TITLE_HIGH: &str = "احتمالية عالية للإصابة";
pub const TITLE_MEDIUM: &str = "اشتباه متوسط للإصابة";
pub const TITLE_LOW: &str = "احتمالية ضعيفة للإصابة";

/// Bold lead-in before the backend's rationale.
pub const MESSAGE_LABEL: &str = "التحليل الآلي:";

pub const BREAKDOWN_DENGUE: &str = "حمى الضنك";
pub const BREAKDOWN_MALARIA: &str = "الملاريا";
pub const BREAKDOWN_NORMAL: &str = "أعراض طبيعية / أخرى";

/// Bold lead-in of the personal advice panel, embedding the probability.
#[must_use]
pub fn advice_label(probability: &str) -> String {
    format!("بناءً على نتيجتك ({probability}%):")
}
