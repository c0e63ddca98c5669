//! TimeSpan text handling
//!
//! Work item timeouts travel as .NET TimeSpan strings: the constant form
//! `[d.]hh:mm[:ss[.fffffff]]`, the general long form `d:h:mm:ss[.fffffff]`,
//! or a bare number of days. Parsing is strict
//! about ranges (hours < 24, minutes and seconds < 60) and rejects negative
//! values since `Duration` is unsigned.

use std::time::Duration;

use crate::error::TimeSpanParseError;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;
const NANOS_PER_TICK: u32 = 100;
const FRACTION_DIGITS: usize = 7;

/// Parses TimeSpan text into a `Duration`
pub fn parse(input: &str) -> Result<Duration, TimeSpanParseError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(TimeSpanParseError::Empty);
    }
    if text.starts_with('-') {
        return Err(TimeSpanParseError::Negative(text.to_string()));
    }

    let invalid = || TimeSpanParseError::InvalidFormat(text.to_string());
    let overflow = || TimeSpanParseError::Overflow(text.to_string());

    // Bare integer means whole days
    if !text.contains(':') {
        let days = parse_number(text, usize::MAX).ok_or_else(invalid)?;
        let secs = days.checked_mul(SECS_PER_DAY).ok_or_else(overflow)?;
        return Ok(Duration::from_secs(secs));
    }

    let parts: Vec<&str> = text.split(':').collect();
    let (days, hours, minutes, seconds) = match parts.as_slice() {
        [head, minutes] => {
            let (days, hours) = split_days(head).ok_or_else(invalid)?;
            (days, hours, *minutes, None)
        }
        [head, minutes, seconds] => {
            let (days, hours) = split_days(head).ok_or_else(invalid)?;
            (days, hours, *minutes, Some(*seconds))
        }
        // General long form d:h:mm:ss
        [days, hours, minutes, seconds] => (
            parse_number(days, usize::MAX).ok_or_else(invalid)?,
            *hours,
            *minutes,
            Some(*seconds),
        ),
        _ => return Err(invalid()),
    };

    let hours = parse_number(hours, 2).ok_or_else(invalid)?;
    let minutes = parse_number(minutes, 2).ok_or_else(invalid)?;
    let (seconds, nanos) = match seconds {
        Some(seconds) => parse_seconds(seconds).ok_or_else(invalid)?,
        None => (0, 0),
    };

    check_range("hours", hours, 24)?;
    check_range("minutes", minutes, 60)?;
    check_range("seconds", seconds, 60)?;

    let secs = days
        .checked_mul(SECS_PER_DAY)
        .and_then(|d| d.checked_add(hours * SECS_PER_HOUR + minutes * SECS_PER_MINUTE + seconds))
        .ok_or_else(overflow)?;

    Ok(Duration::new(secs, nanos))
}

/// Formats a `Duration` in TimeSpan constant format
///
/// Sub-tick precision is dropped; the fraction is only written when non-zero.
pub fn format(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / SECS_PER_DAY;
    let hours = (total % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total % SECS_PER_MINUTE;
    let ticks = duration.subsec_nanos() / NANOS_PER_TICK;

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{}.", days));
    }
    out.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
    if ticks > 0 {
        out.push_str(&format!(".{:07}", ticks));
    }
    out
}

/// Splits `d.hh` into days and the hour text
fn split_days(head: &str) -> Option<(u64, &str)> {
    match head.split_once('.') {
        Some((days, hours)) => Some((parse_number(days, usize::MAX)?, hours)),
        None => Some((0, head)),
    }
}

/// Parses `ss` or `ss.fffffff` into whole seconds and nanoseconds
fn parse_seconds(text: &str) -> Option<(u64, u32)> {
    match text.split_once('.') {
        Some((seconds, fraction)) => {
            let seconds = parse_number(seconds, 2)?;
            if fraction.is_empty()
                || fraction.len() > FRACTION_DIGITS
                || !fraction.bytes().all(|b| b.is_ascii_digit())
            {
                return None;
            }
            let padded = format!("{:0<width$}", fraction, width = FRACTION_DIGITS);
            let ticks: u32 = padded.parse().ok()?;
            Some((seconds, ticks * NANOS_PER_TICK))
        }
        None => Some((parse_number(text, 2)?, 0)),
    }
}

/// Parses an unsigned decimal of at most `max_digits` digits
fn parse_number(text: &str, max_digits: usize) -> Option<u64> {
    if text.is_empty() || text.len() > max_digits || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn check_range(component: &'static str, value: u64, limit: u64) -> Result<(), TimeSpanParseError> {
    if value >= limit {
        return Err(TimeSpanParseError::OutOfRange { component, value });
    }
    Ok(())
}
