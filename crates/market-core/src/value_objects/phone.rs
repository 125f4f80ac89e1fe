//! Phone number value object
//!
//! A phone number is entered as a country dialling code (`+92`) and a local
//! number (`343 225 2006`). Both are normalized before they are compared or
//! stored; the full number is their concatenation (`+923432252006`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized phone number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    country_code: String,
    local_number: String,
}

/// Phone number validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhoneNumberError {
    #[error("Phone number is required")]
    Empty,

    #[error("Invalid country code: {0}")]
    InvalidCountryCode(String),

    #[error("Invalid phone number: {0}")]
    InvalidNumber(String),
}

impl PhoneNumber {
    const MIN_LOCAL_DIGITS: usize = 4;
    const MAX_LOCAL_DIGITS: usize = 14;

    /// Parse and normalize a country code and local number
    pub fn parse(country_code: &str, local_number: &str) -> Result<Self, PhoneNumberError> {
        let local: String = local_number
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
            .collect();
        if local.is_empty() {
            return Err(PhoneNumberError::Empty);
        }
        if !local.chars().all(|c| c.is_ascii_digit())
            || !(Self::MIN_LOCAL_DIGITS..=Self::MAX_LOCAL_DIGITS).contains(&local.len())
        {
            return Err(PhoneNumberError::InvalidNumber(local_number.to_string()));
        }

        let code = country_code.trim();
        let digits = code.strip_prefix('+').unwrap_or(code);
        if digits.is_empty()
            || digits.len() > 3
            || !digits.chars().all(|c| c.is_ascii_digit())
            || digits.starts_with('0')
        {
            return Err(PhoneNumberError::InvalidCountryCode(country_code.to_string()));
        }

        Ok(Self {
            country_code: format!("+{digits}"),
            local_number: local,
        })
    }

    /// Country dialling code including the leading `+`
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn local_number(&self) -> &str {
        &self.local_number
    }

    /// Full number: country code followed by the local number
    pub fn full(&self) -> String {
        format!("{}{}", self.country_code, self.local_number)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.country_code, self.local_number)
    }
}
