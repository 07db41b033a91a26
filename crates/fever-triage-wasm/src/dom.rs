//! DOM contract between the host page and the WASM frontend.
//!
//! The page must provide these ids and classes; everything else about its
//! markup is free.

/// Symptom form.
pub const FORM_ID: &str = "diagnosisForm";
pub const SUBMIT_BUTTON_ID: &str = "submitBtn";
/// Caption element inside the submit button.
pub const SUBMIT_LABEL_SELECTOR: &str = "span";
/// Icon element inside the submit button.
pub const SUBMIT_ICON_SELECTOR: &str = "i";
pub const SPINNER_SELECTOR: &str = ".loader-spinner";
pub const ERROR_ID: &str = "error-message";

pub const RESULT_CARD_ID: &str = "resultCard";
pub const RESULT_ICON_ID: &str = "resultIcon";
pub const RESULT_TITLE_ID: &str = "resultTitle";
pub const PROBABILITY_FILL_ID: &str = "probabilityFill";
pub const PROBABILITY_TEXT_ID: &str = "probabilityText";
pub const RESULT_MESSAGE_ID: &str = "resultMessage";
pub const RESULT_ACTIONS_ID: &str = "resultActions";
pub const BREAKDOWN_CARD_ID: &str = "multiDiseaseCard";
pub const BREAKDOWN_LIST_ID: &str = "diseaseBreakdown";
pub const ADVICE_CONTAINER_ID: &str = "personalAdviceContainer";
pub const ADVICE_TEXT_ID: &str = "personalAdviceText";

pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const PAGE_SECTION_SELECTOR: &str = ".page-section";
pub const MOBILE_MENU_BUTTON_SELECTOR: &str = ".mobile-menu-btn";
pub const NAV_LINKS_CONTAINER_SELECTOR: &str = ".nav-links";

/// Attribute on nav controls naming their target page.
pub const NAV_TARGET_ATTR: &str = "data-page";

/// Entrance animation class on the visible section.
pub const ACTIVE_PAGE_CLASS: &str = "active-page";
/// Marker class on the highlighted nav control.
pub const ACTIVE_LINK_CLASS: &str = "active";
/// Base class list of the result icon container, before the tier modifier.
pub const RESULT_ICON_BASE_CLASS: &str = "result-icon pulse-animation";

/// Selector for the nav control(s) targeting `page`.
#[must_use]
pub fn nav_link_for(page: &str) -> String {
    format!(
        "{NAV_LINK_SELECTOR}[{NAV_TARGET_ATTR}=\"{}\"]",
        page.replace('\\', "\\\\").replace('"', "\\\"")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_link_selector_quotes_target() {
        assert_eq!(nav_link_for("result"), r#".nav-link[data-page="result"]"#);
        assert_eq!(nav_link_for(r#"a"b"#), r#".nav-link[data-page="a\"b"]"#);
    }

    #[test]
    fn element_ids_are_unique() {
        let ids = [
            FORM_ID,
            SUBMIT_BUTTON_ID,
            ERROR_ID,
            RESULT_CARD_ID,
            RESULT_ICON_ID,
            RESULT_TITLE_ID,
            PROBABILITY_FILL_ID,
            PROBABILITY_TEXT_ID,
            RESULT_MESSAGE_ID,
            RESULT_ACTIONS_ID,
            BREAKDOWN_CARD_ID,
            BREAKDOWN_LIST_ID,
            ADVICE_CONTAINER_ID,
            ADVICE_TEXT_ID,
        ];
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }
}
