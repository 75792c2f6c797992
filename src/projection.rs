//! Projecting annotations onto the blocks of a pangenome graph.
//!
//! Projection runs in three steps:
//!
//! 1. A [`PathMap`] is built once for every genome in the graph. It indexes
//!    the genome's block occurrences by their genomic spans.
//! 2. The [`Locator`] resolves each feature to the ordered occurrences it
//!    overlaps, with the overlapped part in both genomic and block-local
//!    coordinates.
//! 3. The [`Fragmenter`] turns the feature and its occurrences into output
//!    records, splitting features that straddle a block boundary.
//!
//! A [`Projector`] drives these steps over a whole annotation.

pub mod fragmenter;
pub mod locator;
pub mod path_map;
pub mod projector;

pub use fragmenter::Fragmenter;
pub use fragmenter::Mode;
pub use fragmenter::TypeNaming;
pub use locator::Located;
pub use locator::Locator;
pub use path_map::PathMap;
pub use projector::Projection;
pub use projector::Projector;
