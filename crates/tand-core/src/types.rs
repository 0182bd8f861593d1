//! Identifier types shared across the workspace.

use std::fmt;

use thiserror::Error;

/// Row identifier used across the Solteq Tand schema.
pub type Id = i64;

/// Error produced when parsing a CPR number.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CprError {
    #[error("CPR must contain 10 digits, got {0}")]
    WrongLength(usize),

    #[error("CPR may contain only digits besides an optional hyphen")]
    NonDigit,
}

/// Danish civil registration number, the patient key of the schema.
///
/// Stored in the normalized 10-digit form the PATIENT table uses. Input is
/// accepted with or without the conventional hyphen (`DDMMYY-XXXX`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpr(String);

impl Cpr {
    /// Parse and normalize a CPR number.
    pub fn parse(input: &str) -> Result<Self, CprError> {
        let digits: String = input.chars().filter(|c| *c != '-').collect();
        if digits.chars().any(|c| !c.is_ascii_digit()) {
            return Err(CprError::NonDigit);
        }
        if digits.len() != 10 {
            return Err(CprError::WrongLength(digits.len()));
        }
        Ok(Self(digits))
    }

    /// The normalized 10-digit form, as stored in the database.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The human-readable `DDMMYY-XXXX` form.
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..6], &self.0[6..])
    }
}

impl fmt::Display for Cpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let cpr = Cpr::parse("0101901234").unwrap();
        assert_eq!(cpr.as_str(), "0101901234");
    }

    #[test]
    fn test_parse_hyphenated() {
        let cpr = Cpr::parse("010190-1234").unwrap();
        assert_eq!(cpr.as_str(), "0101901234");
        assert_eq!(cpr.formatted(), "010190-1234");
    }

    #[test]
    fn test_parse_rejects_short_input() {
        assert_eq!(Cpr::parse("010190"), Err(CprError::WrongLength(6)));
    }

    #[test]
    fn test_parse_rejects_letters() {
        assert_eq!(Cpr::parse("010190-12a4"), Err(CprError::NonDigit));
    }

    #[test]
    fn test_display_is_normalized() {
        let cpr = Cpr::parse("010190-1234").unwrap();
        assert_eq!(cpr.to_string(), "0101901234");
    }
}
