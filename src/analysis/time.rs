use crate::error::TimeFormatError;

/// Working-calendar conversion used across every chart: 1 week = 5
/// working days = 40 hours, 1 day = 8 hours.
const HOURS_PER_WEEK: f64 = 40.0;
const HOURS_PER_DAY: f64 = 8.0;

/// Parse a duration token like "2w 4d 6h 45m" into total hours.
///
/// The grammar is a whitespace-separated sequence of magnitude-unit
/// pairs. Each of `w`, `d`, `h`, `m` may appear at most once and only in
/// that order; any subset may be omitted. A blank token is valid and
/// means zero. Everything else is rejected so the caller can surface the
/// error and leave the field at its previous value.
pub fn parse_duration(token: &str) -> Result<f64, TimeFormatError> {
    // Unit index into [w, d, h, m]; pairs must arrive in strictly
    // increasing unit order.
    const UNITS: [char; 4] = ['w', 'd', 'h', 'm'];
    const WEIGHTS: [f64; 4] = [HOURS_PER_WEEK, HOURS_PER_DAY, 1.0, 1.0 / 60.0];

    let invalid = || TimeFormatError {
        token: token.to_string(),
    };

    let mut hours = 0.0;
    let mut next_unit = 0;
    let mut rest = token.trim();

    while !rest.is_empty() {
        let digits_end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        if digits_end == 0 {
            return Err(invalid());
        }

        let magnitude: u64 = rest[..digits_end].parse().map_err(|_| invalid())?;
        let mut chars = rest[digits_end..].chars();
        let unit = chars.next().ok_or_else(invalid)?;

        let unit_index = UNITS[next_unit..]
            .iter()
            .position(|&u| u == unit)
            .map(|offset| next_unit + offset)
            .ok_or_else(invalid)?;

        hours += magnitude as f64 * WEIGHTS[unit_index];
        next_unit = unit_index + 1;
        rest = chars.as_str().trim_start();
    }

    Ok(hours)
}

/// Lenient variant used by the chart paths: unparseable or blank tokens
/// contribute zero instead of failing the whole series.
pub fn hours_or_zero(token: &str) -> f64 {
    parse_duration(token).unwrap_or(0.0)
}
