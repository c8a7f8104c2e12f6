use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+)d)?(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s)?$")
        .expect("hard-coded pattern is valid")
});

const MAX_DAYS: u64 = 90;

/// Parse a compact duration like "10m", "2h30m" or "1d". Units must appear in
/// d/h/m/s order and at least one must be present.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    let captures = DURATION_PATTERN
        .captures(input)
        .filter(|_| !input.is_empty())
        .ok_or_else(|| format!("`{input}` is not a duration. Try something like `10m` or `2h30m`."))?;

    let part = |index: usize| -> Result<u64, String> {
        match captures.get(index) {
            Some(m) => m
                .as_str()
                .parse::<u64>()
                .map_err(|_| format!("`{input}` has a number too large to schedule.")),
            None => Ok(0),
        }
    };

    let days = part(1)?;
    let hours = part(2)?;
    let minutes = part(3)?;
    let seconds = part(4)?;

    let total = total_seconds(days, hours, minutes, seconds)
        .ok_or_else(|| format!("`{input}` has a number too large to schedule."))?;
    if total == 0 {
        return Err("The duration has to be longer than zero seconds.".to_string());
    }
    if total > MAX_DAYS * 86_400 {
        return Err(format!("Reminders can be at most {MAX_DAYS} days out."));
    }

    Ok(Duration::from_secs(total))
}

/// Sum the parts without overflowing; day counts parse as u64 long before
/// they fit into seconds.
fn total_seconds(days: u64, hours: u64, minutes: u64, seconds: u64) -> Option<u64> {
    days.checked_mul(86_400)?
        .checked_add(hours.checked_mul(3_600)?)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_unit() {
        assert_eq!(parse_duration("10m").unwrap(), Duration::from_secs(600));
        assert_eq!(parse_duration("45s").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_duration("1d").unwrap(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_parse_combined_units() {
        assert_eq!(
            parse_duration("2h30m").unwrap(),
            Duration::from_secs(2 * 3_600 + 30 * 60)
        );
        assert_eq!(
            parse_duration("1d2h3m4s").unwrap(),
            Duration::from_secs(86_400 + 2 * 3_600 + 3 * 60 + 4)
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_duration("tomorrow").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("m10").is_err());
    }

    #[test]
    fn test_rejects_zero_and_excessive_durations() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("9999d").is_err());
    }

    #[test]
    fn test_rejects_day_counts_that_overflow_seconds() {
        // Parses fine as u64 but cannot be multiplied into seconds.
        assert!(parse_duration("300000000000000000d").is_err());
        assert!(parse_duration(&format!("{}h", u64::MAX)).is_err());
        // Individual parts fit, the sum does not.
        assert!(parse_duration(&format!("{}d23h", u64::MAX / 86_400)).is_err());
    }
}
