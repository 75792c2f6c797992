//! Blocks (pancontigs) of a pangenome graph.

use crate::graph::collection::Identified;

/// A reusable segment of sequence shared by one or more genomes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Block {
    /// The identifier of the block, unique across the graph.
    id: String,

    /// The consensus sequence.
    sequence: String,
}

impl Block {
    /// Creates a new [`Block`].
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    /// Gets the block identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gets the consensus sequence.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Gets the length of the consensus sequence.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }
}

impl Identified for Block {
    fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "block {} ({} bp consensus)", self.id, self.len())
    }
}
