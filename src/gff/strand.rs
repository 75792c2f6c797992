//! The strand upon which a feature is located.

use std::str::FromStr;

/// An error related to the parsing of a strand.
#[derive(Debug, Eq, PartialEq)]
pub struct ParseError(String);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not a valid strand", self.0)
    }
}

impl std::error::Error for ParseError {}

/// The strand of a feature record.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Strand {
    /// The positive strand (`+`).
    Positive,

    /// The negative strand (`-`).
    Negative,

    /// The feature is not stranded (`.`).
    Unstranded,

    /// The feature is stranded, but the strand is not known (`?`).
    Unknown,
}

impl Strand {
    /// Returns the strand as seen from the opposite orientation.
    ///
    /// Strands that carry no direction are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancontig::gff::Strand;
    ///
    /// assert_eq!(Strand::Positive.complement(), Strand::Negative);
    /// assert_eq!(Strand::Negative.complement(), Strand::Positive);
    /// assert_eq!(Strand::Unstranded.complement(), Strand::Unstranded);
    /// ```
    pub fn complement(self) -> Self {
        match self {
            Strand::Positive => Strand::Negative,
            Strand::Negative => Strand::Positive,
            other => other,
        }
    }

    /// Returns whether the feature reads against increasing genomic
    /// coordinates.
    pub fn is_reverse(self) -> bool {
        matches!(self, Strand::Negative)
    }
}

impl FromStr for Strand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Positive),
            "-" => Ok(Self::Negative),
            "." => Ok(Self::Unstranded),
            "?" => Ok(Self::Unknown),
            c => Err(ParseError(c.into())),
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strand::Positive => write!(f, "+"),
            Strand::Negative => write!(f, "-"),
            Strand::Unstranded => write!(f, "."),
            Strand::Unknown => write!(f, "?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strand_from_str() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("+".parse::<Strand>()?, Strand::Positive);
        assert_eq!("-".parse::<Strand>()?, Strand::Negative);
        assert_eq!(".".parse::<Strand>()?, Strand::Unstranded);
        assert_eq!("?".parse::<Strand>()?, Strand::Unknown);

        let err = "x".parse::<Strand>().unwrap_err();
        assert_eq!(err.to_string(), "x is not a valid strand");

        Ok(())
    }

    #[test]
    fn test_strand_display() {
        assert_eq!(Strand::Positive.to_string(), "+");
        assert_eq!(Strand::Negative.to_string(), "-");
        assert_eq!(Strand::Unstranded.to_string(), ".");
        assert_eq!(Strand::Unknown.to_string(), "?");
    }

    #[test]
    fn test_strand_direction() {
        assert!(Strand::Negative.is_reverse());
        assert!(!Strand::Positive.is_reverse());
        assert!(!Strand::Unknown.is_reverse());
        assert_eq!(Strand::Unknown.complement(), Strand::Unknown);
    }
}
