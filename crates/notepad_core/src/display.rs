//! Relative-time labels for note cards, in Brazilian Portuguese.
//!
//! Buckets follow the distance-in-words rules the widget used ("há 5
//! minutos", "cerca de 2 horas", ...). Up to two months the distance is
//! measured in 30-day blocks; beyond that, month and year counts are
//! calendar months.

use chrono::{DateTime, Datelike, Months, Utc};

const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

/// Describes the distance between `at` and `now`, with a `há`/`em` suffix.
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if at <= now {
        format!("há {}", distance_in_words(at, now))
    } else {
        format!("em {}", distance_in_words(now, at))
    }
}

/// Convenience wrapper over [`relative_time`] using the wall clock.
pub fn relative_time_from_now(at: DateTime<Utc>) -> String {
    relative_time(at, Utc::now())
}

fn distance_in_words(earlier: DateTime<Utc>, later: DateTime<Utc>) -> String {
    let minutes = round_div((later - earlier).num_seconds(), 60);

    if minutes < 1 {
        return "menos de um minuto".to_string();
    }
    if minutes < 45 {
        return plural(minutes, "1 minuto", "minutos");
    }
    if minutes < 90 {
        return "cerca de 1 hora".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = round_div(minutes, 60);
        return format!("cerca de {}", plural(hours, "1 hora", "horas"));
    }
    if minutes < 2_520 {
        return "1 dia".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = round_div(minutes, MINUTES_IN_DAY);
        return plural(days, "1 dia", "dias");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        let months = round_div(minutes, MINUTES_IN_MONTH);
        return format!("cerca de {}", plural(months, "1 mês", "meses"));
    }

    let months = calendar_months_between(earlier, later);
    if months < 12 {
        let nearest = round_div(minutes, MINUTES_IN_MONTH);
        return plural(nearest, "1 mês", "meses");
    }

    let years = months / 12;
    match months % 12 {
        0..=2 => format!("cerca de {}", plural(years, "1 ano", "anos")),
        3..=8 => format!("mais de {}", plural(years, "1 ano", "anos")),
        _ => format!("quase {}", plural(years + 1, "1 ano", "anos")),
    }
}

/// Whole calendar months from `earlier` to `later`; a month only counts once
/// its day and time of day have been reached.
fn calendar_months_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let months = i64::from(later.year() - earlier.year()) * 12 + i64::from(later.month())
        - i64::from(earlier.month());
    let reached = u32::try_from(months)
        .ok()
        .and_then(|count| earlier.checked_add_months(Months::new(count)))
        .is_some_and(|shifted| shifted <= later);
    if reached {
        months
    } else {
        (months - 1).max(0)
    }
}

fn plural(count: i64, one: &str, many: &str) -> String {
    if count == 1 {
        one.to_string()
    } else {
        format!("{count} {many}")
    }
}

/// Integer division rounding half away from zero (inputs are non-negative).
fn round_div(value: i64, divisor: i64) -> i64 {
    (value + divisor / 2) / divisor
}
