//! Summary statistics describing how blocks are distributed across genomes.

/// Distribution statistics for a single block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlockStats {
    /// The block identifier.
    id: String,

    /// The total number of occurrences across every path.
    depth: usize,

    /// The number of distinct genomes containing the block.
    frequency: usize,

    /// The length of the consensus sequence.
    length: usize,

    /// Whether every genome contains the block.
    in_every_genome: bool,
}

impl BlockStats {
    /// Creates a new [`BlockStats`].
    pub(crate) fn new(
        id: impl Into<String>,
        depth: usize,
        frequency: usize,
        length: usize,
        in_every_genome: bool,
    ) -> Self {
        Self {
            id: id.into(),
            depth,
            frequency,
            length,
            in_every_genome,
        }
    }

    /// Gets the block identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gets the total number of occurrences.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Gets the number of distinct genomes containing the block.
    pub fn frequency(&self) -> usize {
        self.frequency
    }

    /// Gets the consensus length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns whether the block occurs more than once in at least one
    /// genome.
    pub fn is_duplicated(&self) -> bool {
        self.depth > self.frequency
    }

    /// Returns whether the block occurs exactly once in every genome.
    pub fn is_core(&self) -> bool {
        self.in_every_genome && !self.is_duplicated()
    }
}
