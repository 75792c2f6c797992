//! The on-disk JSON layout of a pangenome graph.
//!
//! Only the fields needed to place blocks along genomes are read; everything
//! else in the file (alignments, gaps, mutations) is ignored.

use serde::Deserialize;

/// A block or node identifier, stored as either a string or an integer
/// depending on the version of the graph builder.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Id {
    /// A textual identifier.
    Text(String),

    /// A numeric identifier.
    Number(u64),
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        match id {
            Id::Text(s) => s,
            Id::Number(n) => n.to_string(),
        }
    }
}

/// The top-level graph object.
#[derive(Debug, Deserialize)]
pub(crate) struct Graph {
    /// The genomes.
    pub(crate) paths: Vec<Path>,

    /// The blocks.
    pub(crate) blocks: Vec<Block>,
}

/// A single genome.
#[derive(Debug, Deserialize)]
pub(crate) struct Path {
    /// The genome name.
    pub(crate) name: String,

    /// Whether the genome is circular.
    #[serde(default)]
    pub(crate) circular: bool,

    /// The block occurrences in path order.
    pub(crate) blocks: Vec<Node>,

    /// The one-based start of each block, followed by one past the last
    /// block's right edge.
    #[serde(default)]
    pub(crate) position: Vec<u64>,
}

/// A block occurrence within a path.
#[derive(Debug, Deserialize)]
pub(crate) struct Node {
    /// The block identifier.
    pub(crate) id: Id,

    /// `true` if the block is read forward along the genome.
    pub(crate) strand: bool,
}

/// A block.
#[derive(Debug, Deserialize)]
pub(crate) struct Block {
    /// The block identifier.
    pub(crate) id: Id,

    /// The consensus sequence.
    #[serde(default)]
    pub(crate) sequence: String,
}
