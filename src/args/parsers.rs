use std::time::Duration;

use reqwest::Url;

use super::types::PositiveUsize;
use crate::error::ValidationError;

pub(super) fn parse_positive_usize(s: &str) -> Result<PositiveUsize, ValidationError> {
    s.parse::<PositiveUsize>()
}

/// Parses `host[:port]` into the `http://` base every method path is joined
/// onto. Schemes, paths and queries are rejected.
pub(crate) fn parse_host(s: &str) -> Result<Url, ValidationError> {
    let value = s.trim();
    if value.contains(['/', '?', '#', '@']) {
        return Err(ValidationError::HostHasPath {
            value: value.to_owned(),
        });
    }
    let url = Url::parse(&format!("http://{}", value)).map_err(|err| {
        ValidationError::InvalidHost {
            value: value.to_owned(),
            source: err,
        }
    })?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::InvalidHost {
            value: value.to_owned(),
            source: url::ParseError::EmptyHost,
        });
    }
    Ok(url)
}

/// Parses `<number>[ms|s|m|h]`; a bare number is seconds.
pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let digits_len = value
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|minutes| minutes.checked_mul(60))
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }

    Ok(duration)
}
