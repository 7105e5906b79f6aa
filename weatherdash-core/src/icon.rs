//! Glyphs for OpenWeather condition codes.

/// Used for any code missing from [`ICONS`].
pub const DEFAULT_ICON: &str = "🌤️";

/// Every condition code the provider documents, day and night variants.
pub const ICONS: [(&str, &str); 18] = [
    ("01d", "☀️"),
    ("01n", "🌙"),
    ("02d", "🌤️"),
    ("02n", "☁️"),
    ("03d", "☁️"),
    ("03n", "☁️"),
    ("04d", "☁️"),
    ("04n", "☁️"),
    ("09d", "🌧️"),
    ("09n", "🌧️"),
    ("10d", "🌦️"),
    ("10n", "🌧️"),
    ("11d", "⛈️"),
    ("11n", "⛈️"),
    ("13d", "❄️"),
    ("13n", "❄️"),
    ("50d", "🌫️"),
    ("50n", "🌫️"),
];

/// Resolve a condition code to its glyph, falling back to [`DEFAULT_ICON`].
pub fn icon_for(code: &str) -> &'static str {
    ICONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, glyph)| *glyph)
        .unwrap_or(DEFAULT_ICON)
}

pub fn is_known_code(code: &str) -> bool {
    ICONS.iter().any(|(c, _)| *c == code)
}
