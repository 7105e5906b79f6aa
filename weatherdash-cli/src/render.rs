use std::fmt::Write;

use weatherdash_core::{DisplayWeather, FavoriteReport};

/// Visual mode picked from the current condition glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Day,
    /// Muted mode for rain, thunderstorms and overcast skies.
    Night,
}

const MUTED_ICONS: [&str; 3] = ["🌧️", "⛈️", "☁️"];

impl Theme {
    pub fn for_icon(icon: &str) -> Self {
        if MUTED_ICONS.contains(&icon) {
            Theme::Night
        } else {
            Theme::Day
        }
    }

    fn label(self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }
}

pub fn weather(data: &DisplayWeather) -> String {
    let theme = Theme::for_icon(data.current.icon);
    let current = &data.current;
    let mut out = String::new();

    let _ = writeln!(out, "{}  {}  [{}]", current.icon, data.location, theme.label());
    let _ = writeln!(out, "{}°C  {}", current.temp, current.description);
    let _ = writeln!(out);

    let visibility = current
        .visibility
        .map(|km| format!("{km} km"))
        .unwrap_or_else(|| "n/a".to_string());
    let details = [
        ("Feels Like", format!("{}°", current.feels_like)),
        ("Humidity", format!("{}%", current.humidity)),
        ("Wind Speed", format!("{} km/h", current.wind_speed)),
        ("Pressure", format!("{} hPa", current.pressure)),
        ("Visibility", visibility),
        ("UV Index", current.uv_index.to_string()),
    ];
    for (label, value) in details {
        let _ = writeln!(out, "  {label:<12}{value}");
    }

    if !data.hourly.is_empty() {
        let _ = writeln!(out, "\nNext hours");
        for hour in &data.hourly {
            let _ = writeln!(out, "  {}  {}  {}°", hour.time, hour.icon, hour.temp);
        }
    }

    if !data.daily.is_empty() {
        let _ = writeln!(out, "\nForecast");
        for day in &data.daily {
            let _ = writeln!(
                out,
                "  {:<10} {}  {:<20} {}° / {}°",
                day.day, day.icon, day.desc, day.high, day.low
            );
        }
    }

    out
}

pub fn favorites(reports: &[FavoriteReport]) -> String {
    if reports.is_empty() {
        return "No saved cities\n".to_string();
    }

    let mut out = String::new();
    for report in reports {
        match &report.outcome {
            Ok(data) => {
                let _ = writeln!(
                    out,
                    "  {:<20} {:<20} {}°",
                    data.city(),
                    data.current.description,
                    data.current.temp
                );
            }
            Err(_) => {
                let _ = writeln!(out, "  {:<20} Unable to load", report.favorite.label());
            }
        }
    }
    out
}
