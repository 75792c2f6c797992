//! A feature record.

use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::gff::attributes;
use crate::gff::phase;
use crate::gff::strand;
use crate::gff::Attributes;
use crate::gff::Phase;
use crate::gff::Strand;
use crate::gff::MISSING_FIELD;
use crate::span;
use crate::span::Span;

/// The delimiter between fields of a record.
pub const DELIMITER: char = '\t';

/// The number of expected fields in a record.
pub const NUM_FIELDS: usize = 9;

/// Matches an identifier ending in an underscore and a number, as written by
/// gene callers that name features `<contig>_<n>`.
static NUMBERED_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^.*_(\d+)$").unwrap());

/// An error associated with parsing a record.
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An incorrect number of fields in the line.
    IncorrectNumberOfFields(usize),

    /// An invalid start position.
    InvalidStart(ParseIntError),

    /// An invalid end position.
    InvalidEnd(ParseIntError),

    /// The start and end do not form a valid span.
    InvalidSpan(span::Error),

    /// An invalid score.
    InvalidScore(String),

    /// An invalid strand.
    InvalidStrand(strand::ParseError),

    /// An invalid phase.
    InvalidPhase(phase::ParseError),

    /// Invalid attributes.
    InvalidAttributes(attributes::ParseError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in record: expected {NUM_FIELDS} fields, found {n} fields"
            ),
            ParseError::InvalidStart(err) => write!(f, "invalid start: {err}"),
            ParseError::InvalidEnd(err) => write!(f, "invalid end: {err}"),
            ParseError::InvalidSpan(err) => write!(f, "invalid span: {err}"),
            ParseError::InvalidScore(s) => write!(f, "invalid score: {s}"),
            ParseError::InvalidStrand(err) => write!(f, "invalid strand: {err}"),
            ParseError::InvalidPhase(err) => write!(f, "invalid phase: {err}"),
            ParseError::InvalidAttributes(err) => write!(f, "invalid attributes: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A feature record.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// The name of the sequence (genome) the feature is located on.
    seqid: String,

    /// The source of the feature.
    source: String,

    /// The type of the feature.
    ty: String,

    /// The positions covered by the feature.
    span: Span,

    /// The score, kept verbatim.
    score: Option<String>,

    /// The strand.
    strand: Strand,

    /// The phase.
    phase: Option<Phase>,

    /// The attributes.
    attributes: Attributes,
}

impl Record {
    /// Creates a new record with no score, no phase, and no attributes.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancontig::gff::Record;
    /// use pancontig::gff::Strand;
    /// use pancontig::span::Span;
    ///
    /// let record = Record::new("G1", "prokka", "CDS", Span::try_new(600, 1300)?, Strand::Positive);
    /// assert_eq!(record.to_string(), "G1\tprokka\tCDS\t600\t1300\t.\t+\t.\t.");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(
        seqid: impl Into<String>,
        source: impl Into<String>,
        ty: impl Into<String>,
        span: Span,
        strand: Strand,
    ) -> Self {
        Self {
            seqid: seqid.into(),
            source: source.into(),
            ty: ty.into(),
            span,
            score: None,
            strand,
            phase: None,
            attributes: Attributes::default(),
        }
    }

    /// Sets the score.
    pub fn with_score(mut self, score: Option<String>) -> Self {
        self.score = score;
        self
    }

    /// Sets the phase.
    pub fn with_phase(mut self, phase: Option<Phase>) -> Self {
        self.phase = phase;
        self
    }

    /// Sets the attributes.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Gets the name of the sequence the feature is located on.
    pub fn seqid(&self) -> &str {
        &self.seqid
    }

    /// Gets the source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Gets the feature type.
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// Gets the span of positions covered by the feature.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Gets the first position of the feature.
    pub fn start(&self) -> u64 {
        self.span.start()
    }

    /// Gets the last position of the feature.
    pub fn end(&self) -> u64 {
        self.span.end()
    }

    /// Gets the score, if any.
    pub fn score(&self) -> Option<&str> {
        self.score.as_deref()
    }

    /// Gets the strand.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Gets the phase, if any.
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Gets the attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Gets the attributes mutably.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Rewrites an `ID` of the form `<prefix>_<n>` to `<seqid>_<n>`.
    ///
    /// Returns whether the identifier was changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancontig::gff::Record;
    ///
    /// let mut record = "G1\t.\tCDS\t1\t90\t.\t+\t0\tID=contig_7_12;Name=x".parse::<Record>()?;
    /// assert!(record.rename_id());
    /// assert_eq!(record.attributes().id(), Some("G1_12"));
    ///
    /// let mut record = "G1\t.\tCDS\t1\t90\t.\t+\t0\tID=dnaA".parse::<Record>()?;
    /// assert!(!record.rename_id());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn rename_id(&mut self) -> bool {
        let renamed = self
            .attributes
            .id()
            .and_then(|id| NUMBERED_ID.captures(id))
            .and_then(|captures| captures.get(1))
            .map(|n| format!("{}_{}", self.seqid, n.as_str()));

        match renamed {
            Some(id) => {
                self.attributes.insert(attributes::ID, id);
                true
            }
            None => false,
        }
    }
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split(DELIMITER).collect::<Vec<_>>();
        if parts.len() != NUM_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(parts.len()));
        }

        let start = parts[3].parse().map_err(ParseError::InvalidStart)?;
        let end = parts[4].parse().map_err(ParseError::InvalidEnd)?;
        let span = Span::try_new(start, end).map_err(ParseError::InvalidSpan)?;

        let score = match parts[5] {
            MISSING_FIELD => None,
            s => match s.parse::<f64>() {
                Ok(_) => Some(s.to_string()),
                Err(_) => return Err(ParseError::InvalidScore(s.into())),
            },
        };

        let strand = parts[6].parse().map_err(ParseError::InvalidStrand)?;

        let phase = match parts[7] {
            MISSING_FIELD => None,
            s => Some(s.parse().map_err(ParseError::InvalidPhase)?),
        };

        let attributes = parts[8].parse().map_err(ParseError::InvalidAttributes)?;

        Ok(Self {
            seqid: parts[0].into(),
            source: parts[1].into(),
            ty: parts[2].into(),
            span,
            score,
            strand,
            phase,
            attributes,
        })
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = DELIMITER;

        write!(
            f,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}",
            self.seqid,
            self.source,
            self.ty,
            self.span.start(),
            self.span.end(),
            self.score.as_deref().unwrap_or(MISSING_FIELD),
            self.strand,
        )?;

        match self.phase {
            Some(phase) => write!(f, "{phase}")?,
            None => write!(f, "{MISSING_FIELD}")?,
        }

        write!(f, "{d}{}", self.attributes)
    }
}
