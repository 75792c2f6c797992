//! The pangenome graph object model.
//!
//! A [`Graph`] holds a [`Collection`] of [`Block`]s (the pancontigs) and a
//! [`Collection`] of [`Path`]s, one per genome. Each path is an ordered,
//! contiguous run of block [`Occurrence`]s carrying genomic coordinates. All of
//! these are loaded once and never mutated afterward.

use std::collections::HashMap;
use std::collections::HashSet;
use std::io::Read;
use std::str::FromStr;

use omics::coordinate::Strand;
use tracing::debug;

pub mod block;
pub mod collection;
mod json;
pub mod occurrence;
pub mod path;
pub mod stats;

pub use block::Block;
pub use collection::Collection;
pub use occurrence::Occurrence;
pub use path::Path;
pub use stats::BlockStats;

/// An error related to loading a [`Graph`].
#[derive(Debug)]
pub enum Error {
    /// The JSON could not be deserialized.
    Json(serde_json::Error),

    /// The block collection was invalid.
    Blocks(collection::Error),

    /// The path collection was invalid.
    Paths(collection::Error),

    /// A path could not be built.
    Path(String, path::Error),

    /// A path referenced a block that is not in the block collection.
    UnknownBlock {
        /// The path name.
        path: String,

        /// The block identifier.
        block: String,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Json(err) => write!(f, "json error: {err}"),
            Error::Blocks(err) => write!(f, "invalid blocks: {err}"),
            Error::Paths(err) => write!(f, "invalid paths: {err}"),
            Error::Path(name, err) => write!(f, "invalid path {name}: {err}"),
            Error::UnknownBlock { path, block } => {
                write!(f, "path {path} references unknown block {block}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A pangenome graph.
#[derive(Clone, Debug)]
pub struct Graph {
    /// The blocks.
    blocks: Collection<Block>,

    /// The paths, one per genome.
    paths: Collection<Path>,
}

impl Graph {
    /// Attempts to create a graph from its blocks and paths.
    ///
    /// Every block referenced by a path must be present in `blocks`.
    pub fn try_new(blocks: Vec<Block>, paths: Vec<Path>) -> Result<Self> {
        let blocks = Collection::try_from_items(blocks).map_err(Error::Blocks)?;
        let paths = Collection::try_from_items(paths).map_err(Error::Paths)?;

        for path in &paths {
            if let Some(block) = path.block_ids().find(|id| blocks.get(id).is_none()) {
                return Err(Error::UnknownBlock {
                    path: path.name().to_string(),
                    block: block.to_string(),
                });
            }
        }

        Ok(Self { blocks, paths })
    }

    /// Reads a graph from its JSON representation.
    ///
    /// # Examples
    ///
    /// ```
    /// let json = r#"{
    ///     "blocks": [
    ///         {"id": "B1", "sequence": "ACGT"},
    ///         {"id": "B2", "sequence": "GGCC"}
    ///     ],
    ///     "paths": [{
    ///         "name": "G1",
    ///         "circular": false,
    ///         "blocks": [
    ///             {"id": "B1", "strand": true},
    ///             {"id": "B2", "strand": false}
    ///         ],
    ///         "position": [1, 5, 9]
    ///     }]
    /// }"#;
    ///
    /// let graph = pancontig::graph::Graph::from_reader(json.as_bytes())?;
    /// assert_eq!(graph.paths().len(), 1);
    /// assert_eq!(graph.path("G1").map(|p| p.length()), Some(8));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: Read,
    {
        let raw: json::Graph = serde_json::from_reader(reader).map_err(Error::Json)?;
        Self::try_from_raw(raw)
    }

    /// Converts the deserialized representation into a [`Graph`].
    fn try_from_raw(raw: json::Graph) -> Result<Self> {
        let blocks = raw
            .blocks
            .into_iter()
            .map(|block| Block::new(block.id, block.sequence))
            .collect::<Vec<_>>();

        let paths = raw
            .paths
            .into_iter()
            .map(|path| {
                let nodes = path
                    .blocks
                    .into_iter()
                    .map(|node| {
                        let orientation = match node.strand {
                            true => Strand::Positive,
                            false => Strand::Negative,
                        };

                        (String::from(node.id), orientation)
                    })
                    .collect::<Vec<_>>();

                Path::try_new(path.name.clone(), path.circular, nodes, &path.position)
                    .map_err(|err| Error::Path(path.name, err))
            })
            .collect::<Result<Vec<_>>>()?;

        let graph = Self::try_new(blocks, paths)?;

        debug!(
            "loaded graph with {} blocks and {} paths",
            graph.blocks.len(),
            graph.paths.len()
        );

        Ok(graph)
    }

    /// Gets the blocks.
    pub fn blocks(&self) -> &Collection<Block> {
        &self.blocks
    }

    /// Gets the paths.
    pub fn paths(&self) -> &Collection<Path> {
        &self.paths
    }

    /// Gets a block by identifier.
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id)
    }

    /// Gets a path by genome name.
    pub fn path(&self, name: &str) -> Option<&Path> {
        self.paths.get(name)
    }

    /// Gets the genome names in order.
    pub fn strains(&self) -> impl Iterator<Item = &str> {
        self.paths.ids()
    }

    /// Computes distribution statistics for every block, in block order.
    ///
    /// # Examples
    ///
    /// ```
    /// let json = r#"{
    ///     "blocks": [{"id": "B1", "sequence": "ACGT"}, {"id": "B2", "sequence": "GG"}],
    ///     "paths": [
    ///         {"name": "G1", "blocks": [{"id": "B1", "strand": true}, {"id": "B2", "strand": true}], "position": [1, 5, 7]},
    ///         {"name": "G2", "blocks": [{"id": "B1", "strand": true}, {"id": "B1", "strand": false}], "position": [1, 5, 9]}
    ///     ]
    /// }"#;
    ///
    /// let graph = pancontig::graph::Graph::from_reader(json.as_bytes())?;
    /// let stats = graph.block_stats();
    ///
    /// assert_eq!(stats[0].depth(), 3);
    /// assert_eq!(stats[0].frequency(), 2);
    /// assert!(stats[0].is_duplicated());
    /// assert!(!stats[0].is_core());
    ///
    /// assert_eq!(stats[1].depth(), 1);
    /// assert!(!stats[1].is_core());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn block_stats(&self) -> Vec<BlockStats> {
        let mut depth = HashMap::<&str, usize>::new();
        let mut frequency = HashMap::<&str, usize>::new();

        for path in &self.paths {
            let mut seen = HashSet::new();

            for id in path.block_ids() {
                *depth.entry(id).or_default() += 1;

                if seen.insert(id) {
                    *frequency.entry(id).or_default() += 1;
                }
            }
        }

        self.blocks
            .iter()
            .map(|block| {
                let frequency = frequency.get(block.id()).copied().unwrap_or_default();

                BlockStats::new(
                    block.id(),
                    depth.get(block.id()).copied().unwrap_or_default(),
                    frequency,
                    block.len(),
                    frequency == self.paths.len(),
                )
            })
            .collect()
    }
}

impl FromStr for Graph {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_identifiers_are_accepted() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let graph = r#"{
            "blocks": [{"id": 17, "sequence": "ACGT"}],
            "paths": [{"name": "G1", "blocks": [{"id": 17, "strand": false}], "position": [1, 5]}]
        }"#
        .parse::<Graph>()?;

        let path = graph.path("G1").unwrap();
        assert_eq!(path.occurrences()[0].block_id(), "17");
        assert!(!path.occurrences()[0].is_forward());
        assert!(graph.block("17").is_some());

        Ok(())
    }

    #[test]
    fn unknown_block_is_an_error() {
        let err = r#"{
            "blocks": [{"id": "B1", "sequence": "ACGT"}],
            "paths": [{"name": "G1", "blocks": [{"id": "B9", "strand": true}], "position": [1, 5]}]
        }"#
        .parse::<Graph>()
        .unwrap_err();

        assert_eq!(err.to_string(), "path G1 references unknown block B9");
    }

    #[test]
    fn missing_positions_are_an_error() {
        let err = r#"{
            "blocks": [{"id": "B1", "sequence": "ACGT"}],
            "paths": [{"name": "G1", "blocks": [{"id": "B1", "strand": true}]}]
        }"#
        .parse::<Graph>()
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Path(_, path::Error::PositionCountMismatch { expected: 2, found: 0 })
        ));
    }

    #[test]
    fn duplicate_paths_are_an_error() {
        let err = r#"{
            "blocks": [{"id": "B1", "sequence": "ACGT"}],
            "paths": [
                {"name": "G1", "blocks": [{"id": "B1", "strand": true}], "position": [1, 5]},
                {"name": "G1", "blocks": [{"id": "B1", "strand": true}], "position": [1, 5]}
            ]
        }"#
        .parse::<Graph>()
        .unwrap_err();

        assert!(matches!(err, Error::Paths(collection::Error::DuplicateId(_))));
    }
}
