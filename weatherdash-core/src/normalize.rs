//! Reshape raw provider payloads into a [`DisplayWeather`].
//!
//! Everything here is pure: the only environmental input is the time zone used to
//! bucket forecast steps into calendar days and to format time labels.
//! [`normalize`] uses the machine's local zone; tests pin one via [`normalize_in`].

use chrono::{Local, NaiveDate, TimeZone};
use std::fmt::Display;

use crate::{
    icon::icon_for,
    model::{
        CurrentDisplay, DailyEntry, DisplayWeather, HourlyEntry, RawCondition,
        RawCurrentConditions, RawForecastEntry,
    },
};

pub const HOURLY_LIMIT: usize = 5;
pub const DAILY_LIMIT: usize = 7;

const MS_TO_KMH: f64 = 3.6;

pub fn normalize(current: &RawCurrentConditions, forecast: &[RawForecastEntry]) -> DisplayWeather {
    normalize_in(current, forecast, &Local)
}

pub fn normalize_in<Tz>(
    current: &RawCurrentConditions,
    forecast: &[RawForecastEntry],
    tz: &Tz,
) -> DisplayWeather
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DisplayWeather {
        location: format!("{}, {}", current.name, current.sys.country),
        current: current_display(current),
        hourly: hourly(forecast, tz),
        daily: daily(forecast, tz),
    }
}

/// Round half up, so `-2.5` becomes `-2` and `2.5` becomes `3`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn current_display(current: &RawCurrentConditions) -> CurrentDisplay {
    let condition = current.condition().cloned().unwrap_or_default();

    CurrentDisplay {
        temp: round_half_up(current.main.temp),
        description: condition.description,
        icon: icon_for(&condition.icon),
        humidity: current.main.humidity,
        wind_speed: round_half_up(current.wind.speed * MS_TO_KMH),
        pressure: current.main.pressure,
        feels_like: round_half_up(current.main.feels_like),
        visibility: current.visibility.map(|m| round_half_up(m / 1000.0)),
        // The /weather endpoint carries no UV index.
        uv_index: 0,
    }
}

fn hourly<Tz>(forecast: &[RawForecastEntry], tz: &Tz) -> Vec<HourlyEntry>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    forecast
        .iter()
        .take(HOURLY_LIMIT)
        .map(|entry| HourlyEntry {
            time: entry.dt.with_timezone(tz).format("%I:%M %p").to_string(),
            temp: round_half_up(entry.main.temp),
            icon: icon_for(condition_code(entry.condition())),
        })
        .collect()
}

struct DayBucket<'a> {
    date: NaiveDate,
    high: f64,
    low: f64,
    representative: Option<&'a RawCondition>,
}

fn daily<Tz: TimeZone>(forecast: &[RawForecastEntry], tz: &Tz) -> Vec<DailyEntry> {
    // Buckets keep first-seen order.
    let mut buckets: Vec<DayBucket<'_>> = Vec::new();

    for entry in forecast {
        let date = entry.dt.with_timezone(tz).date_naive();
        let temp = entry.main.temp;

        match buckets.iter_mut().find(|b| b.date == date) {
            Some(bucket) => {
                bucket.high = bucket.high.max(temp);
                bucket.low = bucket.low.min(temp);
            }
            None => buckets.push(DayBucket {
                date,
                high: temp,
                low: temp,
                representative: entry.condition(),
            }),
        }
    }

    buckets
        .into_iter()
        .take(DAILY_LIMIT)
        .enumerate()
        .map(|(index, bucket)| DailyEntry {
            day: day_label(index, bucket.date),
            high: round_half_up(bucket.high),
            low: round_half_up(bucket.low),
            icon: icon_for(condition_code(bucket.representative)),
            desc: bucket
                .representative
                .map(|c| c.description.clone())
                .unwrap_or_default(),
        })
        .collect()
}

fn day_label(index: usize, date: NaiveDate) -> String {
    match index {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%A").to_string(),
    }
}

fn condition_code(condition: Option<&RawCondition>) -> &str {
    condition.map(|c| c.icon.as_str()).unwrap_or_default()
}
