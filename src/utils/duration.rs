//! Duration parsing utilities.
//!
//! The simulator measures time in picoseconds; configuration files use
//! human-friendly strings such as "6s" or "500ms".

const PS_PER_NS: u64 = 1_000;
const PS_PER_US: u64 = 1_000_000;
const PS_PER_MS: u64 = 1_000_000_000;
const PS_PER_S: u64 = 1_000_000_000_000;

/// Parse a duration string to picoseconds
///
/// Supports:
/// - Raw picoseconds: "6000000000000"
/// - Picoseconds: "10ps"
/// - Nanoseconds: "10ns"
/// - Microseconds: "10us"
/// - Milliseconds: "10ms"
/// - Seconds: "6s", "6sec"
/// - Minutes: "2m", "2min"
/// - Hours: "1h", "1hr"
///
/// # Examples
/// ```
/// use qnetgen::utils::duration::parse_duration_to_picoseconds;
///
/// assert_eq!(parse_duration_to_picoseconds("6s"), Ok(6_000_000_000_000));
/// assert_eq!(parse_duration_to_picoseconds("250ms"), Ok(250_000_000_000));
/// assert!(parse_duration_to_picoseconds("soon").is_err());
/// ```
pub fn parse_duration_to_picoseconds(duration: &str) -> Result<u64, String> {
    let duration = duration.trim();
    let (number, unit) = split_number(duration);

    if number.is_empty() {
        return Err(format!("Invalid duration format: {}", duration));
    }
    let value = number
        .parse::<u64>()
        .map_err(|_| format!("Invalid duration format: {}", duration))?;

    let multiplier = match unit {
        "" | "ps" => 1,
        "ns" => PS_PER_NS,
        "us" => PS_PER_US,
        "ms" => PS_PER_MS,
        "s" | "sec" | "secs" => PS_PER_S,
        "m" | "min" | "mins" => 60 * PS_PER_S,
        "h" | "hr" | "hrs" => 3600 * PS_PER_S,
        _ => return Err(format!("Invalid duration unit '{}' in: {}", unit, duration)),
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("Duration overflows picoseconds: {}", duration))
}

/// Split a duration string at the first non-digit character
fn split_number(duration: &str) -> (&str, &str) {
    let idx = duration
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(duration.len());
    (&duration[..idx], duration[idx..].trim())
}
