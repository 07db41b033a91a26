//! Mobile navigation toggle.
//!
//! The open/closed state is never stored; it is read back from the nav-links
//! container's current `display` value on every toggle.

/// Presentation of the nav-links container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuLayout {
    Hidden,
    /// Vertical overlay hanging under the header.
    Overlay,
}

const HIDDEN_STYLES: &[(&str, &str)] = &[("display", "none")];

const OVERLAY_STYLES: &[(&str, &str)] = &[
    ("display", "flex"),
    ("flex-direction", "column"),
    ("position", "absolute"),
    ("top", "100%"),
    ("left", "0"),
    ("width", "100%"),
    ("background", "white"),
    ("padding", "1rem"),
    ("box-shadow", "0 10px 15px rgba(0,0,0,0.05)"),
];

impl MenuLayout {
    /// Infer the current layout from the container's inline `display`.
    #[must_use]
    pub fn from_display(display: &str) -> Self {
        if display.trim() == "flex" {
            Self::Overlay
        } else {
            Self::Hidden
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Overlay,
            Self::Overlay => Self::Hidden,
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Overlay)
    }

    /// Inline style properties to apply for this layout.
    #[must_use]
    pub const fn styles(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Hidden => HIDDEN_STYLES,
            Self::Overlay => OVERLAY_STYLES,
        }
    }
}

/// Layout to apply when the toggle is pressed while the container shows
/// `current_display`.
#[must_use]
pub fn toggle(current_display: &str) -> MenuLayout {
    let next = MenuLayout::from_display(current_display).toggled();
    tracing::debug!(open = next.is_open(), "mobile menu toggled");
    next
}
