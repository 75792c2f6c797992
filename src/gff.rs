//! Reading and writing genomic feature annotations.
//!
//! Annotations are exchanged as tab-delimited lines of nine fields (seqid,
//! source, type, start, end, score, strand, phase, and attributes). Each line is
//! parsed once into a [`Record`] whose [`Attributes`] keep their original key
//! order, and serialized once on output through a [`Writer`].

pub mod attributes;
pub mod line;
pub mod phase;
pub mod reader;
pub mod record;
pub mod strand;
pub mod writer;

pub use attributes::Attributes;
pub use line::Line;
pub use phase::Phase;
pub use reader::Annotation;
pub use reader::Reader;
pub use record::Record;
pub use strand::Strand;
pub use writer::Writer;

/// The value used for a missing field.
pub const MISSING_FIELD: &str = ".";
