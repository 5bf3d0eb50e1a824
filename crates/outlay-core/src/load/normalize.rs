use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedAmount {
    pub magnitude: f64,
    /// The raw value carried a leading minus sign.
    pub outgoing: bool,
}

/// Parses a bank-formatted amount such as `-1.234,56 €` into its magnitude
/// and sign. Returns `None` when nothing numeric remains.
pub fn normalize_amount(raw: &str, currency_symbol: &str) -> Option<NormalizedAmount> {
    let mut candidate = raw
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>();
    if !currency_symbol.is_empty() {
        candidate = candidate.replace(currency_symbol, "");
    }

    let (outgoing, unsigned) = match candidate.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, candidate.strip_prefix('+').unwrap_or(&candidate)),
    };
    let starts_numeric = unsigned
        .chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_digit() || ch == ',' || ch == '.');
    if !starts_numeric {
        return None;
    }

    let canonical = canonical_decimal(unsigned);
    let magnitude = canonical.parse::<f64>().ok()?;
    if !magnitude.is_finite() || magnitude < 0.0 {
        return None;
    }

    Some(NormalizedAmount {
        magnitude,
        outgoing,
    })
}

fn canonical_decimal(value: &str) -> String {
    let last_comma = value.rfind(',');
    let last_dot = value.rfind('.');

    match (last_comma, last_dot) {
        (Some(comma), Some(dot)) if comma > dot => value.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => value.replace(',', ""),
        (Some(_), None) => value.replace(',', "."),
        _ => value.to_string(),
    }
}

/// Parses a day-first date (`DD/MM/YYYY`, `DD-MM-YYYY`, `DD.MM.YYYY`) or an
/// ISO `YYYY-MM-DD` date. A trailing time component is ignored.
pub fn parse_day_first_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split_whitespace().next()?;
    let parts = date_part.split(['/', '-', '.']).collect::<Vec<&str>>();
    if parts.len() != 3 || parts.iter().any(|part| !is_all_digits(part)) {
        return None;
    }

    let (year, month, day) = if parts[0].len() == 4 {
        (parts[0], parts[1], parts[2])
    } else if parts[2].len() == 4 {
        (parts[2], parts[1], parts[0])
    } else {
        return None;
    };
    if month.len() > 2 || day.len() > 2 {
        return None;
    }

    NaiveDate::from_ymd_opt(
        year.parse::<i32>().ok()?,
        month.parse::<u32>().ok()?,
        day.parse::<u32>().ok()?,
    )
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit())
}
