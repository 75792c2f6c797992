//! `pancontig` is a crate for projecting genomic feature annotations onto the
//! blocks ("pancontigs") of a pangenome graph.
//!
//! A pangenome graph decomposes a set of related genomes into shared blocks.
//! Each genome is a path: an ordered, contiguous run of block occurrences,
//! each read forward or reverse. An annotation describes features on a single
//! genome. This crate relates the two:
//!
//! - A feature that falls inside one block occurrence is annotated with the
//!   block identifier, the orientation of the occurrence, and its occurrence
//!   number (which distinguishes copies of a block within the same genome).
//! - A feature that straddles a block boundary is split into one fragment per
//!   overlapped occurrence. Fragments are numbered in the feature's 5' to 3'
//!   direction and their phases are recomputed so the reading frame carries
//!   across the split.
//!
//! The crate provides three main points of entry:
//!
//! - [`gff`] reads and writes annotation records.
//! - [`graph`] loads a pangenome graph from its JSON representation.
//! - [`projection`] maps the former onto the latter.
//!
//! ## Projecting an annotation
//!
//! A [`projection::Locator`] cannot be instantiated directly. Instead, you
//! should use [`projection::locator::Builder`] and the associated
//! [`projection::locator::Builder::try_build_from()`] method to index every
//! genome of a [`graph::Graph`]. A [`projection::Projector`] then runs each
//! feature through the locator and a [`projection::Fragmenter`].
//!
//! Three output modes are supported (see [`projection::Mode`]):
//!
//! - [`Annotate`](projection::Mode::Annotate) keeps genomic coordinates and
//!   adds block metadata to every record.
//! - [`Project`](projection::Mode::Project) moves each record onto its block,
//!   so the sequence becomes the block identifier and the coordinates become
//!   block-local.
//! - [`Link`](projection::Mode::Link) never splits a feature and instead lists
//!   every overlapped occurrence in a single attribute.
//!
//! Below is a representative example of how one might read a graph and an
//! annotation and then annotate every feature with the blocks it falls on.
//!
//! ```
//! use pancontig::gff;
//! use pancontig::graph::Graph;
//! use pancontig::projection::locator;
//! use pancontig::projection::Mode;
//! use pancontig::projection::Projector;
//!
//! let graph = r#"{
//!     "blocks": [{"id": "B1", "sequence": ""}, {"id": "B2", "sequence": ""}],
//!     "paths": [{
//!         "name": "G1",
//!         "blocks": [
//!             {"id": "B1", "strand": true},
//!             {"id": "B2", "strand": true},
//!             {"id": "B1", "strand": true}
//!         ],
//!         "position": [1, 501, 1201, 1501]
//!     }]
//! }"#
//! .parse::<Graph>()?;
//!
//! let data = b"##gff-version 3\nG1\t.\tCDS\t600\t1300\t.\t+\t0\tID=cds1\n";
//! let annotation = gff::Reader::new(&data[..]).read_annotation()?;
//!
//! let locator = locator::Builder.try_build_from(&graph)?;
//! let projection = Projector::new(&locator, Mode::Annotate).project(annotation.records())?;
//!
//! for record in projection.records() {
//!     println!("{record}");
//! }
//!
//! assert_eq!(projection.records().len(), 2);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod gff;
pub mod graph;
pub mod projection;
pub mod span;
