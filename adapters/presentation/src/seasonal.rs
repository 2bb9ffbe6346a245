//! Seasonal cosmetic themes keyed by calendar date.
//!
//! Purely decorative: the selected theme only changes adapter chrome and
//! never touches session state.

/// Cosmetic theme applied on top of the widget during a seasonal window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeasonalTheme {
    /// Late-October haunt decorations.
    Hauntwave,
    /// December frost-and-lights decorations.
    Frostfall,
}

impl SeasonalTheme {
    /// Banner line adapters print while the theme is active.
    #[must_use]
    pub const fn banner(self) -> &'static str {
        match self {
            Self::Hauntwave => "~ the speakers crackle with haunt static ~",
            Self::Frostfall => "~ frost creeps across the roll board ~",
        }
    }
}

/// Selects the theme active on the provided calendar day, if any.
#[must_use]
pub fn seasonal_theme(month: u32, day: u32) -> Option<SeasonalTheme> {
    match (month, day) {
        (10, 24..=31) => Some(SeasonalTheme::Hauntwave),
        (12, 1..=31) => Some(SeasonalTheme::Frostfall),
        _ => None,
    }
}
