use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;

use crate::commands::CommandError;
use crate::service::timezone::TimezoneService;
use crate::util::escape_backticks;

lazy_static! {
    static ref SWITCH_FRIEND_CODE: Regex = Regex::new(r"^SW-[0-9]{4}-[0-9]{4}-[0-9]{4}$").unwrap();
}

pub fn validate_friend_code(code: &str) -> Result<(), CommandError> {
    if SWITCH_FRIEND_CODE.is_match(code) {
        Ok(())
    } else {
        Err(CommandError::Validation(
            "Invalid Switch friend code, it should look like ``SW-1234-5678-9012``.".into(),
        ))
    }
}

/// Timeouts are whole seconds, zero turns the timeout off.
pub fn parse_timeout(input: &str) -> Result<u64, CommandError> {
    input.parse::<u64>().map_err(|_| {
        CommandError::Validation(format!(
            "``{}`` is not a valid number.",
            escape_backticks(input)
        ))
    })
}

pub async fn validate_timezone(service: &TimezoneService, name: &str) -> Result<Tz, CommandError> {
    service
        .resolve(name)
        .await
        .ok_or_else(|| CommandError::Validation("Invalid timezone.".into()))
}

/// Storing the value that is already stored is reported back instead of silently succeeding.
pub fn ensure_changed(current: &str, new: &str, message: String) -> Result<(), CommandError> {
    if current == new {
        Err(CommandError::DuplicateValue(message))
    } else {
        Ok(())
    }
}
