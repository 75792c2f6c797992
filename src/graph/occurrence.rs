//! A single placement of a block within a path.

use omics::coordinate::Strand;

use crate::span::Span;

/// One placement of a block along a genome's path.
///
/// The span is given in the genome's coordinates; the orientation states
/// whether the block's consensus is read forward or reverse-complemented when
/// walking the genome from its first position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Occurrence {
    /// The identifier of the block.
    block_id: String,

    /// The orientation of the block relative to the genome.
    orientation: Strand,

    /// The genomic positions covered by the occurrence.
    span: Span,

    /// The one-based ordinal of this block id among the occurrences of the
    /// same id seen so far along the path.
    number: usize,
}

impl Occurrence {
    /// Creates a new [`Occurrence`].
    pub fn new(
        block_id: impl Into<String>,
        orientation: Strand,
        span: Span,
        number: usize,
    ) -> Self {
        Self {
            block_id: block_id.into(),
            orientation,
            span,
            number,
        }
    }

    /// Gets the block identifier.
    pub fn block_id(&self) -> &str {
        &self.block_id
    }

    /// Gets the orientation of the block relative to the genome.
    pub fn orientation(&self) -> &Strand {
        &self.orientation
    }

    /// Returns whether the block is read forward along the genome.
    pub fn is_forward(&self) -> bool {
        matches!(self.orientation, Strand::Positive)
    }

    /// Gets the orientation as the symbol used in annotation attributes.
    pub fn orientation_symbol(&self) -> char {
        match self.is_forward() {
            true => '+',
            false => '-',
        }
    }

    /// Gets the genomic span of the occurrence.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Gets the first genomic position of the occurrence.
    pub fn start(&self) -> u64 {
        self.span.start()
    }

    /// Gets the last genomic position of the occurrence.
    pub fn end(&self) -> u64 {
        self.span.end()
    }

    /// Gets the number of bases in the occurrence.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.span.len()
    }

    /// Gets the occurrence number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Converts a genomic position into a one-based position along the block,
    /// read in the occurrence's own orientation.
    ///
    /// Returns [`None`] if the position lies outside of the occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use omics::coordinate::Strand;
    /// use pancontig::graph::Occurrence;
    /// use pancontig::span::Span;
    ///
    /// let forward = Occurrence::new("B2", Strand::Positive, Span::try_new(501, 1200)?, 1);
    /// assert_eq!(forward.to_local(501), Some(1));
    /// assert_eq!(forward.to_local(600), Some(100));
    ///
    /// let reverse = Occurrence::new("B2", Strand::Negative, Span::try_new(501, 1200)?, 1);
    /// assert_eq!(reverse.to_local(501), Some(700));
    /// assert_eq!(reverse.to_local(1200), Some(1));
    ///
    /// assert_eq!(forward.to_local(1201), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_local(&self, position: u64) -> Option<u64> {
        if !self.span.contains(position) {
            return None;
        }

        let offset = position - self.start();

        match self.is_forward() {
            true => Some(offset + 1),
            false => Some(self.len() - offset),
        }
    }

    /// Converts a one-based position along the block back into a genomic
    /// position. This is the inverse of [`Occurrence::to_local()`].
    ///
    /// Returns [`None`] if the position lies outside of the block.
    pub fn to_genomic(&self, local: u64) -> Option<u64> {
        if local == 0 || local > self.len() {
            return None;
        }

        match self.is_forward() {
            true => Some(self.start() + local - 1),
            false => Some(self.start() + self.len() - local),
        }
    }

    /// Converts a genomic span within the occurrence into a block-local span.
    ///
    /// For a reverse occurrence the two ends swap places so that the returned
    /// span still starts at the smaller position.
    pub fn to_local_span(&self, span: &Span) -> Option<Span> {
        let a = self.to_local(span.start())?;
        let b = self.to_local(span.end())?;
        Span::try_new(a.min(b), a.max(b)).ok()
    }

    /// Converts a block-local span back into a genomic span.
    pub fn to_genomic_span(&self, local: &Span) -> Option<Span> {
        let a = self.to_genomic(local.start())?;
        let b = self.to_genomic(local.end())?;
        Span::try_new(a.min(b), a.max(b)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurrence(orientation: Strand) -> Occurrence {
        Occurrence::new("B1", orientation, Span::try_new(1201, 1500).unwrap(), 2)
    }

    #[test]
    fn reverse_span_is_flipped() -> Result<(), Box<dyn std::error::Error>> {
        let occurrence = occurrence(Strand::Negative);
        let local = occurrence.to_local_span(&Span::try_new(1201, 1300)?).unwrap();

        assert_eq!(local, Span::try_new(201, 300)?);
        assert_eq!(occurrence.orientation_symbol(), '-');

        Ok(())
    }

    #[test]
    fn local_positions_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        for orientation in [Strand::Positive, Strand::Negative] {
            let occurrence = occurrence(orientation);

            for position in [1201, 1250, 1499, 1500] {
                let local = occurrence.to_local(position).unwrap();
                assert_eq!(occurrence.to_genomic(local), Some(position));
            }

            let span = Span::try_new(1210, 1333)?;
            let local = occurrence.to_local_span(&span).unwrap();
            assert_eq!(occurrence.to_genomic_span(&local), Some(span));
        }

        Ok(())
    }

    #[test]
    fn out_of_block_positions() {
        let occurrence = occurrence(Strand::Positive);
        assert_eq!(occurrence.to_local(1200), None);
        assert_eq!(occurrence.to_genomic(0), None);
        assert_eq!(occurrence.to_genomic(301), None);
        assert_eq!(occurrence.to_genomic(300), Some(1500));
    }
}
