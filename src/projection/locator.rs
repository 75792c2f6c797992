//! A locator for placing features onto the block occurrences of their genome.

use std::collections::HashMap;

use nonempty::NonEmpty;

use crate::gff::Record;
use crate::graph::Occurrence;
use crate::projection::path_map;
use crate::projection::PathMap;
use crate::span::Span;

pub mod builder;

pub use builder::Builder;

/// An error related to locating a feature.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The feature's genome is not a path in the graph.
    UnknownGenome(String),

    /// The feature's coordinates do not fit within its genome.
    Range(String, path_map::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownGenome(name) => write!(f, "genome {name} is not in the graph"),
            Error::Range(name, err) => write!(f, "range error on genome {name}: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// One block occurrence overlapped by a feature.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Located<'a> {
    /// The overlapped occurrence.
    occurrence: &'a Occurrence,

    /// The part of the feature inside the occurrence, in genomic coordinates.
    genomic: Span,

    /// The same part of the feature in block-local coordinates.
    relative: Span,
}

impl<'a> Located<'a> {
    /// Gets the overlapped occurrence.
    pub fn occurrence(&self) -> &'a Occurrence {
        self.occurrence
    }

    /// Gets the overlapped part of the feature in genomic coordinates.
    pub fn genomic(&self) -> &Span {
        &self.genomic
    }

    /// Gets the overlapped part of the feature in block-local coordinates.
    pub fn relative(&self) -> &Span {
        &self.relative
    }

    /// Gets the block identifier.
    pub fn block_id(&self) -> &'a str {
        self.occurrence.block_id()
    }

    /// Gets the occurrence number of the block within the genome.
    pub fn number(&self) -> usize {
        self.occurrence.number()
    }
}

/// A lookup from genome names to the block occurrences along them.
///
/// Generally, you will want to use a [`builder::Builder`] to construct one of
/// these.
#[derive(Debug)]
pub struct Locator {
    /// The path map for each genome.
    inner: HashMap<String, PathMap>,
}

impl Locator {
    /// Gets the path map for a genome.
    pub fn path_map(&self, genome: &str) -> Option<&PathMap> {
        self.inner.get(genome)
    }

    /// Gets the names of the indexed genomes in no particular order.
    pub fn genomes(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(|name| name.as_str())
    }

    /// Locates the one-based, fully-closed interval `[start, end]` on `genome`.
    ///
    /// The results are in ascending genomic order and their genomic spans tile
    /// the interval exactly.
    pub fn locate_interval(
        &self,
        genome: &str,
        start: u64,
        end: u64,
    ) -> Result<NonEmpty<Located<'_>>> {
        let map = self
            .inner
            .get(genome)
            .ok_or_else(|| Error::UnknownGenome(genome.to_string()))?;

        let overlaps = map
            .interval_to_occurrences(start, end)
            .map_err(|err| Error::Range(genome.to_string(), err))?;

        Ok(overlaps.map(|overlap| {
            let occurrence = overlap.occurrence();
            let genomic = *overlap.span();

            let relative = occurrence
                .to_local_span(&genomic)
                .expect("overlap is clipped to its occurrence");

            Located {
                occurrence,
                genomic,
                relative,
            }
        }))
    }

    /// Locates a feature on its genome.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancontig::gff::Record;
    /// use pancontig::projection::locator;
    ///
    /// let graph = r#"{
    ///     "blocks": [{"id": "B1", "sequence": ""}, {"id": "B2", "sequence": ""}],
    ///     "paths": [{
    ///         "name": "G1",
    ///         "blocks": [
    ///             {"id": "B1", "strand": true},
    ///             {"id": "B2", "strand": false},
    ///             {"id": "B1", "strand": true}
    ///         ],
    ///         "position": [1, 501, 1201, 1501]
    ///     }]
    /// }"#
    /// .parse::<pancontig::graph::Graph>()?;
    ///
    /// let locator = locator::Builder.try_build_from(&graph)?;
    /// let feature = "G1\t.\tCDS\t600\t1300\t.\t+\t0\tID=cds1".parse::<Record>()?;
    ///
    /// let located = locator.locate(&feature)?;
    /// assert_eq!(located.len(), 2);
    ///
    /// assert_eq!(located.head.block_id(), "B2");
    /// assert_eq!(located.head.genomic().to_string(), "600-1200");
    /// assert_eq!(located.head.relative().to_string(), "1-601");
    ///
    /// assert_eq!(located.last().block_id(), "B1");
    /// assert_eq!(located.last().number(), 2);
    /// assert_eq!(located.last().relative().to_string(), "1-100");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn locate(&self, record: &Record) -> Result<NonEmpty<Located<'_>>> {
        self.locate_interval(record.seqid(), record.start(), record.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::projection::locator;

    fn graph() -> Graph {
        r#"{
            "blocks": [{"id": "B1", "sequence": ""}, {"id": "B2", "sequence": ""}],
            "paths": [
                {
                    "name": "G1",
                    "blocks": [
                        {"id": "B1", "strand": true},
                        {"id": "B2", "strand": true},
                        {"id": "B1", "strand": true}
                    ],
                    "position": [1, 501, 1201, 1501]
                },
                {
                    "name": "G2",
                    "blocks": [{"id": "B2", "strand": false}],
                    "position": [1, 701]
                }
            ]
        }"#
        .parse()
        .unwrap()
    }

    #[test]
    fn located_spans_tile_the_feature() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let graph = graph();
        let locator = locator::Builder.try_build_from(&graph)?;

        let located = locator.locate_interval("G1", 450, 1250)?;
        let spans = located
            .iter()
            .map(|l| (l.block_id(), l.number(), l.genomic().to_string()))
            .collect::<Vec<_>>();

        assert_eq!(
            spans,
            vec![
                ("B1", 1, String::from("450-500")),
                ("B2", 1, String::from("501-1200")),
                ("B1", 2, String::from("1201-1250")),
            ]
        );

        let total = located.iter().map(|l| l.genomic().len()).sum::<u64>();
        assert_eq!(total, 1250 - 450 + 1);

        Ok(())
    }

    #[test]
    fn reverse_occurrence_relative_span() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let graph = graph();
        let locator = locator::Builder.try_build_from(&graph)?;

        let located = locator.locate_interval("G2", 1, 100)?;
        assert_eq!(located.len(), 1);
        assert_eq!(located.head.relative().to_string(), "601-700");

        // Mapping the local span back recovers the genomic span.
        let occurrence = located.head.occurrence();
        assert_eq!(
            occurrence.to_genomic_span(located.head.relative()),
            Some(*located.head.genomic())
        );

        Ok(())
    }

    #[test]
    fn relative_spans_map_back() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let graph = graph();
        let locator = locator::Builder.try_build_from(&graph)?;

        for (genome, start, end) in [
            ("G1", 1, 1500),
            ("G1", 500, 501),
            ("G1", 1200, 1201),
            ("G1", 1500, 1500),
            ("G2", 1, 700),
            ("G2", 350, 351),
        ] {
            for located in locator.locate_interval(genome, start, end)? {
                let occurrence = located.occurrence();
                assert!(located.relative().end() <= occurrence.len());
                assert_eq!(
                    occurrence.to_genomic_span(located.relative()),
                    Some(*located.genomic())
                );
            }
        }

        Ok(())
    }

    #[test]
    fn lookup_errors() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let graph = graph();
        let locator = locator::Builder.try_build_from(&graph)?;

        let err = locator.locate_interval("G3", 1, 10).unwrap_err();
        assert_eq!(err, Error::UnknownGenome(String::from("G3")));
        assert_eq!(err.to_string(), "genome G3 is not in the graph");

        let err = locator.locate_interval("G2", 650, 701).unwrap_err();
        assert!(matches!(
            err,
            Error::Range(_, path_map::Error::OutOfBounds { length: 700, .. })
        ));

        let mut genomes = locator.genomes().collect::<Vec<_>>();
        genomes.sort();
        assert_eq!(genomes, vec!["G1", "G2"]);

        Ok(())
    }
}
