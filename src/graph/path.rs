//! Paths: each genome's traversal through the blocks of the graph.

use std::collections::HashMap;

use omics::coordinate::Strand;

use crate::graph::collection::Identified;
use crate::graph::Occurrence;
use crate::span;
use crate::span::Span;

/// An error related to building a [`Path`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The path contains no blocks.
    Empty,

    /// The number of positions does not equal the number of blocks plus one.
    PositionCountMismatch {
        /// The number of positions expected.
        expected: usize,

        /// The number of positions found.
        found: usize,
    },

    /// Two consecutive positions did not increase, so the occurrence
    /// starting at this index would be empty.
    NonIncreasingPosition(usize),

    /// An occurrence span was invalid.
    Span(span::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Empty => write!(f, "path contains no blocks"),
            Error::PositionCountMismatch { expected, found } => write!(
                f,
                "expected {expected} positions (one more than the number of blocks), found \
                 {found}"
            ),
            Error::NonIncreasingPosition(i) => {
                write!(f, "positions do not increase at block index {i}")
            }
            Error::Span(err) => write!(f, "span error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A genome, represented as an ordered traversal of block occurrences.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Path {
    /// The name of the genome.
    name: String,

    /// Whether the genome is circular.
    circular: bool,

    /// The occurrences in genomic order.
    occurrences: Vec<Occurrence>,
}

impl Path {
    /// Attempts to build a [`Path`] from its blocks and their boundaries.
    ///
    /// `blocks` lists each block identifier with its orientation, in path
    /// order. `positions` holds one more entry than `blocks`: entry `i` is the
    /// one-based genomic position where block `i` starts, and the final entry
    /// is one past the last block's right edge.
    ///
    /// Occurrence numbers are assigned here, counting each block identifier
    /// from one in path order.
    ///
    /// # Examples
    ///
    /// ```
    /// use omics::coordinate::Strand;
    /// use pancontig::graph::Path;
    ///
    /// let path = Path::try_new(
    ///     "G1",
    ///     false,
    ///     vec![
    ///         (String::from("B1"), Strand::Positive),
    ///         (String::from("B2"), Strand::Positive),
    ///         (String::from("B1"), Strand::Negative),
    ///     ],
    ///     &[1, 501, 1201, 1501],
    /// )?;
    ///
    /// assert_eq!(path.length(), 1500);
    /// assert_eq!(path.occurrences()[2].number(), 2);
    /// assert_eq!(path.occurrences()[2].start(), 1201);
    /// assert_eq!(path.occurrences()[2].end(), 1500);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        name: impl Into<String>,
        circular: bool,
        blocks: Vec<(String, Strand)>,
        positions: &[u64],
    ) -> Result<Self> {
        if blocks.is_empty() {
            return Err(Error::Empty);
        }

        if positions.len() != blocks.len() + 1 {
            return Err(Error::PositionCountMismatch {
                expected: blocks.len() + 1,
                found: positions.len(),
            });
        }

        let mut seen = HashMap::<String, usize>::new();
        let mut occurrences = Vec::with_capacity(blocks.len());

        for (i, (block_id, orientation)) in blocks.into_iter().enumerate() {
            let (start, next) = (positions[i], positions[i + 1]);

            if next <= start {
                return Err(Error::NonIncreasingPosition(i));
            }

            let span = Span::try_new(start, next - 1).map_err(Error::Span)?;

            let number = seen.entry(block_id.clone()).or_default();
            *number += 1;

            occurrences.push(Occurrence::new(block_id, orientation, span, *number));
        }

        Ok(Self {
            name: name.into(),
            circular,
            occurrences,
        })
    }

    /// Gets the name of the genome.
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

    /// Gets the block identifiers in path order.
    pub fn block_ids(&self) -> impl Iterator<Item = &str> {
        self.occurrences.iter().map(|o| o.block_id())
    }

    /// Gets the last genomic position covered by the path.
    pub fn length(&self) -> u64 {
        // Paths are never empty, so the default is never used.
        self.occurrences.last().map(|o| o.end()).unwrap_or_default()
    }
}

impl Identified for Path {
    fn id(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "path {} ({} blocks, {} bp)",
            self.name,
            self.occurrences.len(),
            self.length()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(ids: &[&str]) -> Vec<(String, Strand)> {
        ids.iter()
            .map(|id| (id.to_string(), Strand::Positive))
            .collect()
    }

    #[test]
    fn occurrence_numbers_count_per_block() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let path = Path::try_new(
            "G1",
            true,
            blocks(&["B1", "B2", "B1", "B3", "B1"]),
            &[1, 11, 21, 31, 41, 51],
        )?;

        let numbers = path
            .occurrences()
            .iter()
            .map(|o| (o.block_id(), o.number()))
            .collect::<Vec<_>>();

        assert_eq!(
            numbers,
            vec![("B1", 1), ("B2", 1), ("B1", 2), ("B3", 1), ("B1", 3)]
        );
        assert!(path.is_circular());
        assert_eq!(path.length(), 50);

        Ok(())
    }

    #[test]
    fn invalid_positions() {
        let err = Path::try_new("G1", false, blocks(&["B1", "B2"]), &[1, 11]).unwrap_err();
        assert_eq!(
            err,
            Error::PositionCountMismatch {
                expected: 3,
                found: 2
            }
        );

        let err = Path::try_new("G1", false, blocks(&["B1", "B2"]), &[1, 11, 11]).unwrap_err();
        assert_eq!(err, Error::NonIncreasingPosition(1));

        let err = Path::try_new("G1", false, blocks(&["B1"]), &[0, 11]).unwrap_err();
        assert_eq!(err, Error::Span(span::Error::ZeroStart));

        let err = Path::try_new("G1", false, Vec::new(), &[1]).unwrap_err();
        assert_eq!(err, Error::Empty);
    }
}
