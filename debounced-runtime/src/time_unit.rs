use std::time::Duration;

/// Time unit applied to bare numeric delays such as `"250"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeUnit {
    #[default]
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    /// Accepts the names used by `debounce.time_unit`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_ascii_lowercase().as_str() {
            "milliseconds" => TimeUnit::Milliseconds,
            "seconds" => TimeUnit::Seconds,
            "minutes" => TimeUnit::Minutes,
            "hours" => TimeUnit::Hours,
            "days" => TimeUnit::Days,
            other => return Err(format!("unknown debounce time unit '{}'", other)),
        };
        Ok(unit)
    }
}

impl TimeUnit {
    pub fn to_millis(&self, value: u64) -> u64 {
        match self {
            TimeUnit::Milliseconds => value,
            TimeUnit::Seconds => value.saturating_mul(1000),
            TimeUnit::Minutes => value.saturating_mul(60_000),
            TimeUnit::Hours => value.saturating_mul(3_600_000),
            TimeUnit::Days => value.saturating_mul(86_400_000),
        }
    }

    pub fn to_duration(&self, value: u64) -> Duration {
        Duration::from_millis(self.to_millis(value))
    }

    /// Parse a duration string like "5s", "10m", "2h", "500ms"
    /// Returns (value, TimeUnit) if successful
    ///
    /// Strict rules:
    /// - Only lowercase suffixes are accepted: "ms", "s", "m", "h", "d"
    /// - Format must be: <number><suffix> (e.g., "5s", "100ms")
    /// - No spaces allowed between number and suffix
    pub fn parse_duration(s: &str) -> Option<(u64, TimeUnit)> {
        let s = s.trim();

        let split_pos = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(0);
        if split_pos == 0 {
            return None;
        }

        let (num_str, unit_str) = s.split_at(split_pos);
        let value = num_str.parse::<u64>().ok()?;

        let time_unit = match unit_str {
            "ms" => TimeUnit::Milliseconds,
            "s" => TimeUnit::Seconds,
            "m" => TimeUnit::Minutes,
            "h" => TimeUnit::Hours,
            "d" => TimeUnit::Days,
            _ => return None,
        };

        Some((value, time_unit))
    }

    /// Resolve a delay string to a `Duration`.
    ///
    /// Shorthand values carry their own unit; bare numbers are interpreted in `self`.
    pub fn resolve_delay(&self, s: &str) -> Option<Duration> {
        if let Some((value, unit)) = Self::parse_duration(s) {
            return Some(unit.to_duration(value));
        }
        s.trim().parse::<u64>().ok().map(|value| self.to_duration(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_unit_names() {
        assert_eq!("seconds".parse::<TimeUnit>(), Ok(TimeUnit::Seconds));
        assert_eq!("Minutes".parse::<TimeUnit>(), Ok(TimeUnit::Minutes));
        assert!("fortnights".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn parses_shorthand_durations() {
        assert_eq!(
            TimeUnit::parse_duration("500ms"),
            Some((500, TimeUnit::Milliseconds))
        );
        assert_eq!(TimeUnit::parse_duration(" 2s "), Some((2, TimeUnit::Seconds)));
        assert_eq!(TimeUnit::parse_duration("1d"), Some((1, TimeUnit::Days)));
    }

    #[test]
    fn rejects_malformed_shorthand() {
        assert_eq!(TimeUnit::parse_duration("250"), None);
        assert_eq!(TimeUnit::parse_duration("ms"), None);
        assert_eq!(TimeUnit::parse_duration("5S"), None);
        assert_eq!(TimeUnit::parse_duration("5 s"), None);
    }

    #[test]
    fn bare_numbers_use_the_default_unit() {
        assert_eq!(
            TimeUnit::Milliseconds.resolve_delay("250"),
            Some(Duration::from_millis(250))
        );
        assert_eq!(
            TimeUnit::Seconds.resolve_delay("3"),
            Some(Duration::from_secs(3))
        );
        assert_eq!(
            TimeUnit::Seconds.resolve_delay("100ms"),
            Some(Duration::from_millis(100))
        );
        assert_eq!(TimeUnit::Seconds.resolve_delay("soon"), None);
    }
}
