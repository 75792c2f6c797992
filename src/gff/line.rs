//! A line within an annotation file.

use std::str::FromStr;

use crate::gff::record;
use crate::gff::Record;

/// The prefix for comment and directive lines.
pub const COMMENT_PREFIX: &str = "#";

/// The directive marking the start of embedded sequences. Nothing after it is
/// a feature record.
pub const FASTA_DIRECTIVE: &str = "##FASTA";

/// An error associated with parsing a line.
#[derive(Debug)]
pub struct ParseError(record::ParseError, String);

impl ParseError {
    /// Gets the underlying record error.
    pub fn record_error(&self) -> &record::ParseError {
        &self.0
    }

    /// Gets the offending line.
    pub fn line(&self) -> &str {
        &self.1
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid record: {}\n\nline: {}", self.0, self.1)
    }
}

impl std::error::Error for ParseError {}

/// A line within an annotation file.
#[derive(Clone, Debug, PartialEq)]
pub enum Line {
    /// An empty line.
    Empty,

    /// A comment or directive line, kept verbatim.
    Comment(String),

    /// The start of the embedded sequence section.
    Fasta,

    /// A feature record.
    Record(Record),
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Empty => write!(f, ""),
            Line::Comment(comment) => write!(f, "{comment}"),
            Line::Fasta => write!(f, "{FASTA_DIRECTIVE}"),
            Line::Record(record) => write!(f, "{record}"),
        }
    }
}

impl FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            Ok(Self::Empty)
        } else if s.starts_with(FASTA_DIRECTIVE) {
            Ok(Self::Fasta)
        } else if s.starts_with(COMMENT_PREFIX) {
            Ok(Self::Comment(s.into()))
        } else {
            s.parse::<Record>()
                .map(Line::Record)
                .map_err(|e| ParseError(e, s.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_kinds() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("".parse::<Line>()?, Line::Empty);
        assert_eq!("##FASTA".parse::<Line>()?, Line::Fasta);
        assert_eq!(
            "##gff-version 3".parse::<Line>()?,
            Line::Comment(String::from("##gff-version 3"))
        );

        let line = "G1\t.\tgene\t1\t10\t.\t+\t.\tID=g1".parse::<Line>()?;
        assert!(matches!(line, Line::Record(_)));

        Ok(())
    }

    #[test]
    fn test_invalid_record_line() {
        let err = "G1\t.\tgene\t1".parse::<Line>().unwrap_err();
        assert_eq!(
            err.record_error(),
            &record::ParseError::IncorrectNumberOfFields(4)
        );
        assert_eq!(
            err.to_string(),
            "invalid record: invalid number of fields in record: expected 9 fields, found 4 \
             fields\n\nline: G1\t.\tgene\t1"
        );
    }
}
