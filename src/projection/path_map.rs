//! An interval index over the block occurrences of a single genome.

use std::collections::HashMap;

use nonempty::NonEmpty;
use rust_lapper as lapper;

use crate::graph::Occurrence;
use crate::graph::Path;
use crate::span;
use crate::span::Span;

/// An error related to querying a [`PathMap`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The queried interval is not a valid span.
    InvalidInterval(span::Error),

    /// The queried interval extends past the end of the path.
    OutOfBounds {
        /// The queried interval.
        interval: Span,

        /// The length of the path.
        length: u64,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidInterval(err) => write!(f, "invalid interval: {err}"),
            Error::OutOfBounds { interval, length } => write!(
                f,
                "interval {interval} extends past the end of the path (length {length})"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// An error related to building a [`PathMap`].
#[derive(Debug, Eq, PartialEq)]
pub enum BuildError {
    /// There are no occurrences.
    Empty,

    /// The first occurrence does not start at position one.
    DoesNotStartAtOne(u64),

    /// An occurrence does not begin immediately after the previous one ends.
    Discontiguous {
        /// The index of the offending occurrence.
        index: usize,

        /// The start position that was expected.
        expected: u64,

        /// The start position that was found.
        found: u64,
    },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::Empty => write!(f, "no occurrences"),
            BuildError::DoesNotStartAtOne(start) => {
                write!(f, "the first occurrence starts at {start} rather than 1")
            }
            BuildError::Discontiguous {
                index,
                expected,
                found,
            } => write!(
                f,
                "occurrence {index} starts at {found}, but {expected} was expected"
            ),
        }
    }
}

impl std::error::Error for BuildError {}

/// A block occurrence together with the part of a queried interval that
/// falls inside it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Overlap<'a> {
    /// The overlapped occurrence.
    occurrence: &'a Occurrence,

    /// The queried interval clipped to the occurrence.
    span: Span,
}

impl<'a> Overlap<'a> {
    /// Gets the overlapped occurrence.
    pub fn occurrence(&self) -> &'a Occurrence {
        self.occurrence
    }

    /// Gets the clipped genomic span.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

/// An ordered index of one genome's block occurrences that answers interval
/// overlap queries.
///
/// Occurrences are contiguous and sorted, so a query binary searches for the
/// first occurrence reaching the interval and then walks forward.
#[derive(Clone, Debug)]
pub struct PathMap {
    /// The genome name.
    name: String,

    /// Whether the genome is circular.
    circular: bool,

    /// The occurrences in genomic order.
    occurrences: Vec<Occurrence>,

    /// The interval index over the occurrences. Each value is an index into
    /// `occurrences`.
    index: lapper::Lapper<u64, usize>,

    /// The position of each occurrence keyed by block id and occurrence number.
    by_number: HashMap<(String, usize), usize>,
}

impl PathMap {
    /// Attempts to build a [`PathMap`] from a genome's occurrences in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use omics::coordinate::Strand;
    /// use pancontig::graph::Occurrence;
    /// use pancontig::projection::PathMap;
    /// use pancontig::span::Span;
    ///
    /// let map = PathMap::try_new(
    ///     "G1",
    ///     false,
    ///     vec![
    ///         Occurrence::new("B1", Strand::Positive, Span::try_new(1, 500)?, 1),
    ///         Occurrence::new("B2", Strand::Positive, Span::try_new(501, 1200)?, 1),
    ///     ],
    /// )?;
    ///
    /// assert_eq!(map.length(), 1200);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        name: impl Into<String>,
        circular: bool,
        occurrences: Vec<Occurrence>,
    ) -> Result<Self, BuildError> {
        let first = occurrences.first().ok_or(BuildError::Empty)?;

        if first.start() != 1 {
            return Err(BuildError::DoesNotStartAtOne(first.start()));
        }

        for (index, pair) in occurrences.windows(2).enumerate() {
            let expected = pair[0].end() + 1;

            if pair[1].start() != expected {
                return Err(BuildError::Discontiguous {
                    index: index + 1,
                    expected,
                    found: pair[1].start(),
                });
            }
        }

        let intervals = occurrences
            .iter()
            .enumerate()
            .map(|(i, occurrence)| lapper::Interval {
                start: occurrence.start(),
                stop: occurrence.end() + 1,
                val: i,
            })
            .collect::<Vec<_>>();

        let by_number = occurrences
            .iter()
            .enumerate()
            .map(|(i, occurrence)| ((occurrence.block_id().to_string(), occurrence.number()), i))
            .collect();

        Ok(Self {
            name: name.into(),
            circular,
            occurrences,
            index: lapper::Lapper::new(intervals),
            by_number,
        })
    }

    /// Attempts to build a [`PathMap`] from a [`Path`].
    pub fn try_from_path(path: &Path) -> Result<Self, BuildError> {
        Self::try_new(path.name(), path.is_circular(), path.occurrences().to_vec())
    }

    /// Gets the genome name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the genome is circular.
    pub fn is_circular(&self) -> bool {
        self.circular
    }

    /// Gets the occurrences in genomic order.
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// Gets the last position covered by the path.
    pub fn length(&self) -> u64 {
        // The constructor rejects empty paths.
        self.occurrences.last().map(|o| o.end()).unwrap_or_default()
    }

    /// Gets an occurrence by block identifier and occurrence number.
    ///
    /// This disambiguates blocks that appear more than once along the path.
    pub fn occurrence(&self, block_id: &str, number: usize) -> Option<&Occurrence> {
        self.by_number
            .get(&(block_id.to_string(), number))
            .map(|&i| &self.occurrences[i])
    }

    /// Maps a position within a block occurrence back to the genome.
    pub fn to_genomic(&self, block_id: &str, number: usize, local: u64) -> Option<u64> {
        self.occurrence(block_id, number)?.to_genomic(local)
    }

    /// Finds the occurrences overlapping the one-based, fully-closed interval
    /// `[start, end]`, in genomic order, each with the interval clipped to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use omics::coordinate::Strand;
    /// use pancontig::graph::Occurrence;
    /// use pancontig::projection::PathMap;
    /// use pancontig::span::Span;
    ///
    /// let map = PathMap::try_new(
    ///     "G1",
    ///     false,
    ///     vec![
    ///         Occurrence::new("B1", Strand::Positive, Span::try_new(1, 500)?, 1),
    ///         Occurrence::new("B2", Strand::Positive, Span::try_new(501, 1200)?, 1),
    ///         Occurrence::new("B1", Strand::Positive, Span::try_new(1201, 1500)?, 2),
    ///     ],
    /// )?;
    ///
    /// let overlaps = map.interval_to_occurrences(600, 1300)?;
    /// assert_eq!(overlaps.len(), 2);
    /// assert_eq!(overlaps.head.occurrence().block_id(), "B2");
    /// assert_eq!(overlaps.head.span(), &Span::try_new(600, 1200)?);
    /// assert_eq!(overlaps.last().occurrence().number(), 2);
    /// assert_eq!(overlaps.last().span(), &Span::try_new(1201, 1300)?);
    ///
    /// assert!(map.interval_to_occurrences(1400, 1501).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn interval_to_occurrences(
        &self,
        start: u64,
        end: u64,
    ) -> Result<NonEmpty<Overlap<'_>>, Error> {
        let interval = Span::try_new(start, end).map_err(Error::InvalidInterval)?;
        let length = self.length();

        if interval.end() > length {
            return Err(Error::OutOfBounds { interval, length });
        }

        let overlaps = self
            .index
            .find(interval.start(), interval.end() + 1)
            .filter_map(|iv| {
                let occurrence = &self.occurrences[iv.val];
                occurrence
                    .span()
                    .intersect(&interval)
                    .map(|span| Overlap { occurrence, span })
            })
            .collect::<Vec<_>>();

        // A contiguous path covers every position in bounds, so at least one
        // occurrence always overlaps.
        NonEmpty::from_vec(overlaps).ok_or(Error::OutOfBounds { interval, length })
    }
}

#[cfg(test)]
mod tests {
    use omics::coordinate::Strand;

    use super::*;

    fn duplicated() -> PathMap {
        PathMap::try_new(
            "G1",
            false,
            vec![
                Occurrence::new("B1", Strand::Positive, Span::try_new(1, 500).unwrap(), 1),
                Occurrence::new("B2", Strand::Positive, Span::try_new(501, 1200).unwrap(), 1),
                Occurrence::new("B1", Strand::Negative, Span::try_new(1201, 1500).unwrap(), 2),
            ],
        )
        .unwrap()
    }

    #[test]
    fn single_occurrence_query() -> Result<(), Box<dyn std::error::Error>> {
        let map = duplicated();
        let overlaps = map.interval_to_occurrences(10, 20)?;

        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps.head.occurrence().block_id(), "B1");
        assert_eq!(overlaps.head.span(), &Span::try_new(10, 20)?);

        Ok(())
    }

    #[test]
    fn boundary_positions() -> Result<(), Box<dyn std::error::Error>> {
        let map = duplicated();

        let overlaps = map.interval_to_occurrences(500, 501)?;
        let ids = overlaps
            .iter()
            .map(|o| o.occurrence().block_id())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["B1", "B2"]);

        let overlaps = map.interval_to_occurrences(1500, 1500)?;
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps.head.occurrence().number(), 2);

        Ok(())
    }

    #[test]
    fn whole_path_query() -> Result<(), Box<dyn std::error::Error>> {
        let map = duplicated();
        let overlaps = map.interval_to_occurrences(1, 1500)?;

        assert_eq!(overlaps.len(), 3);

        let spans = overlaps.iter().map(|o| *o.span()).collect::<Vec<_>>();
        assert_eq!(
            spans,
            map.occurrences()
                .iter()
                .map(|o| *o.span())
                .collect::<Vec<_>>()
        );

        Ok(())
    }

    #[test]
    fn invalid_queries() {
        let map = duplicated();

        let err = map.interval_to_occurrences(0, 10).unwrap_err();
        assert_eq!(err, Error::InvalidInterval(span::Error::ZeroStart));

        let err = map.interval_to_occurrences(20, 10).unwrap_err();
        assert_eq!(err, Error::InvalidInterval(span::Error::StartAfterEnd(20, 10)));

        let err = map.interval_to_occurrences(1400, 1600).unwrap_err();
        assert_eq!(
            err.to_string(),
            "interval 1400-1600 extends past the end of the path (length 1500)"
        );
    }

    #[test]
    fn occurrence_lookup_by_number() {
        let map = duplicated();

        let second = map.occurrence("B1", 2).unwrap();
        assert_eq!(second.start(), 1201);
        assert!(map.occurrence("B1", 3).is_none());
        assert!(map.occurrence("B3", 1).is_none());

        assert_eq!(map.to_genomic("B1", 2, 1), Some(1500));
        assert_eq!(map.to_genomic("B1", 1, 1), Some(1));
    }

    #[test]
    fn invalid_construction() {
        let err = PathMap::try_new(
            "G1",
            false,
            vec![
                Occurrence::new("B1", Strand::Positive, Span::try_new(1, 500).unwrap(), 1),
                Occurrence::new("B2", Strand::Positive, Span::try_new(502, 600).unwrap(), 1),
            ],
        )
        .unwrap_err();

        assert_eq!(
            err,
            BuildError::Discontiguous {
                index: 1,
                expected: 501,
                found: 502
            }
        );

        let err = PathMap::try_new(
            "G1",
            true,
            vec![Occurrence::new(
                "B1",
                Strand::Positive,
                Span::try_new(10, 500).unwrap(),
                1,
            )],
        )
        .unwrap_err();
        assert_eq!(err, BuildError::DoesNotStartAtOne(10));

        let err = PathMap::try_new("G1", false, Vec::new()).unwrap_err();
        assert_eq!(err, BuildError::Empty);
    }
}
