use std::time::Duration;

/// Shown wherever a value is missing.
pub const NOT_AVAILABLE: &str = "N/A";

const CHEQUERED_FLAG: &str = "🏁";

/// Format a duration as `M:SS.mmm`, or `N/A` when absent.
///
/// Minutes are not padded and may exceed 59, so session timestamps such as
/// pit times render as e.g. `62:03.456`.
pub fn format_duration(duration: Option<Duration>) -> String {
    let Some(duration) = duration else {
        return NOT_AVAILABLE.to_string();
    };

    // round to the nearest millisecond so 83.456s doesn't show as 83.455
    let total_ms = (duration.as_nanos() + 500_000) / 1_000_000;
    let minutes = total_ms / 60_000;
    let seconds = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;
    format!("{}:{:02}.{:03}", minutes, seconds, millis)
}

/// Flag emoji for a host country, or a chequered flag for unknown countries.
pub fn country_flag(country: &str) -> String {
    match iso_country_code(country) {
        Some(code) => code
            .chars()
            .filter_map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
            .collect(),
        None => CHEQUERED_FLAG.to_string(),
    }
}

fn iso_country_code(country: &str) -> Option<&'static str> {
    let code = match country.trim().to_lowercase().as_str() {
        "abu dhabi" | "united arab emirates" | "uae" => "AE",
        "argentina" => "AR",
        "australia" => "AU",
        "austria" => "AT",
        "azerbaijan" => "AZ",
        "bahrain" => "BH",
        "belgium" => "BE",
        "brazil" => "BR",
        "canada" => "CA",
        "china" => "CN",
        "france" => "FR",
        "germany" => "DE",
        "great britain" | "united kingdom" | "uk" => "GB",
        "hungary" => "HU",
        "india" => "IN",
        "italy" => "IT",
        "japan" => "JP",
        "korea" | "south korea" => "KR",
        "malaysia" => "MY",
        "mexico" => "MX",
        "monaco" => "MC",
        "netherlands" => "NL",
        "portugal" => "PT",
        "qatar" => "QA",
        "russia" => "RU",
        "saudi arabia" => "SA",
        "singapore" => "SG",
        "spain" => "ES",
        "turkey" => "TR",
        "united states" | "usa" => "US",
        "vietnam" => "VN",
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_absent_duration_is_not_available() {
        assert_eq!(format_duration(None), "N/A");
    }

    #[test]
    fn test_lap_time_formatting() {
        assert_eq!(format_duration(Some(Duration::from_secs_f64(83.456))), "1:23.456");
        assert_eq!(format_duration(Some(Duration::from_millis(59_001))), "0:59.001");
        assert_eq!(format_duration(Some(Duration::ZERO)), "0:00.000");
        assert_eq!(format_duration(Some(Duration::from_millis(3_723_456))), "62:03.456");
    }

    #[test]
    fn test_rounding_never_shows_sixty_seconds() {
        assert_eq!(
            format_duration(Some(Duration::from_nanos(119_999_700_000))),
            "2:00.000"
        );
    }

    #[test]
    fn test_country_flags() {
        assert_eq!(country_flag("Monaco"), "🇲🇨");
        assert_eq!(country_flag("Great Britain"), "🇬🇧");
        assert_eq!(country_flag(" united states "), "🇺🇸");
        assert_eq!(country_flag("Atlantis"), "🏁");
        assert_eq!(country_flag(""), "🏁");
    }

    fn parse_display(display: &str) -> Option<u64> {
        let (minutes, rest) = display.split_once(':')?;
        let (seconds, millis) = rest.split_once('.')?;
        if minutes.is_empty()
            || seconds.len() != 2
            || millis.len() != 3
            || !display.chars().all(|c| c.is_ascii_digit() || c == ':' || c == '.')
        {
            return None;
        }
        Some(
            minutes.parse::<u64>().ok()? * 60_000
                + seconds.parse::<u64>().ok()? * 1_000
                + millis.parse::<u64>().ok()?,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn prop_formatted_duration_recovers_millis(total_ms in 0u64..36_000_000u64) {
            let formatted = format_duration(Some(Duration::from_millis(total_ms)));
            let parsed = parse_display(&formatted);
            prop_assert_eq!(parsed, Some(total_ms), "unexpected display {}", formatted);
        }

        #[test]
        fn prop_sub_millisecond_noise_is_rounded(total_ms in 0u64..36_000_000u64, noise in 0u64..400_000u64) {
            let duration = Duration::from_millis(total_ms) + Duration::from_nanos(noise);
            prop_assert_eq!(parse_display(&format_duration(Some(duration))), Some(total_ms));
        }
    }
}
