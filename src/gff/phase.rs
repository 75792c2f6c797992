//! The reading frame phase of a coding feature.

use std::num::ParseIntError;
use std::str::FromStr;

/// The number of bases in a codon.
pub const CODON_LENGTH: u64 = 3;

/// An error related to the parsing of a phase.
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The phase was not an integer.
    InvalidInteger(ParseIntError),

    /// The phase was an integer outside of `0..=2`.
    OutOfRange(u64),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidInteger(err) => write!(f, "invalid integer: {err}"),
            ParseError::OutOfRange(value) => {
                write!(f, "expected a phase of 0, 1, or 2, found {value}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// The phase of a coding feature: the number of bases that must be removed
/// from the 5' end of the feature to reach the first complete codon.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Phase(u8);

impl Phase {
    /// Attempts to create a new [`Phase`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pancontig::gff::Phase;
    ///
    /// assert_eq!(Phase::try_new(2)?.get(), 2);
    /// assert!(Phase::try_new(3).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(value: u64) -> Result<Self, ParseError> {
        match value < CODON_LENGTH {
            true => Ok(Self(value as u8)),
            false => Err(ParseError::OutOfRange(value)),
        }
    }

    /// Gets the inner value.
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Returns the phase shifted by `distance` bases.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancontig::gff::Phase;
    ///
    /// let phase = Phase::try_new(0)?;
    /// assert_eq!(phase.shift(601).get(), 1);
    ///
    /// let phase = Phase::try_new(2)?;
    /// assert_eq!(phase.shift(4).get(), 0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn shift(self, distance: u64) -> Self {
        Self(((u64::from(self.0) + distance % CODON_LENGTH) % CODON_LENGTH) as u8)
    }
}

impl FromStr for Phase {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<u64>().map_err(ParseError::InvalidInteger)?;
        Self::try_new(value)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_from_str() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("0".parse::<Phase>()?.get(), 0);
        assert_eq!("2".parse::<Phase>()?.get(), 2);

        let err = "3".parse::<Phase>().unwrap_err();
        assert_eq!(err.to_string(), "expected a phase of 0, 1, or 2, found 3");

        let err = "one".parse::<Phase>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidInteger(_)));

        Ok(())
    }

    #[test]
    fn test_shift_wraps_around_codons() -> Result<(), Box<dyn std::error::Error>> {
        let phase = Phase::try_new(1)?;
        assert_eq!(phase.shift(0), phase);
        assert_eq!(phase.shift(3), phase);
        assert_eq!(phase.shift(2).get(), 0);
        assert_eq!(phase.shift(u64::MAX).get(), 1);
        Ok(())
    }
}
