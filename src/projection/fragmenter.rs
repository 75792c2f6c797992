//! Splitting features into per-occurrence fragments.

use nonempty::NonEmpty;

use crate::gff::Attributes;
use crate::gff::Record;
use crate::gff::attributes::ID;
use crate::projection::Located;

/// The attribute holding the block identifier.
pub const PANCONTIG_ID: &str = "pancontigID";

/// The attribute holding the orientation of the block occurrence.
pub const PANCONTIG_STRAND: &str = "pancontigStrand";

/// The attribute holding the occurrence number of the block.
pub const PANCONTIG_N: &str = "pancontigN";

/// The attribute listing every overlapped occurrence in link mode.
pub const PANCONTIGS: &str = "pancontigs";

/// The attribute linking a fragment to the feature it was cut from.
pub const PARENT: &str = "parent";

/// The output coordinate mode.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    /// Keep genomic coordinates and add block metadata to each record.
    #[default]
    Annotate,

    /// Move each record onto its block: the sequence becomes the block and
    /// the coordinates become block-local.
    Project,

    /// Keep each feature whole and list every overlapped occurrence in a
    /// single attribute.
    Link,
}

impl Mode {
    /// Gets the type naming used by default in this mode.
    pub fn default_type_naming(&self) -> TypeNaming {
        match self {
            Mode::Project => TypeNaming::Preserve,
            Mode::Annotate | Mode::Link => TypeNaming::Tagged,
        }
    }
}

/// How fragment types are named.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeNaming {
    /// Append `-fragment-edge` or `-fragment-middle` to the original type.
    Tagged,

    /// Keep the original type.
    Preserve,
}

/// The position of a fragment within its feature.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Position {
    /// The first or last fragment in genomic order.
    Edge,

    /// Any other fragment.
    Middle,
}

impl Position {
    /// Gets the type suffix for the position.
    fn suffix(&self) -> &'static str {
        match self {
            Position::Edge => "fragment-edge",
            Position::Middle => "fragment-middle",
        }
    }
}

/// Turns a feature and its located occurrences into output records.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fragmenter {
    /// The output coordinate mode.
    mode: Mode,

    /// The fragment type naming.
    type_naming: TypeNaming,
}

impl Fragmenter {
    /// Creates a new fragmenter using the default type naming for `mode`.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            type_naming: mode.default_type_naming(),
        }
    }

    /// Sets the type naming.
    pub fn with_type_naming(mut self, type_naming: TypeNaming) -> Self {
        self.type_naming = type_naming;
        self
    }

    /// Gets the output coordinate mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Gets the type naming.
    pub fn type_naming(&self) -> TypeNaming {
        self.type_naming
    }

    /// Produces the output records for `feature`.
    ///
    /// `located` must be the occurrences overlapping the feature in genomic
    /// order, as returned by the [`Locator`](crate::projection::Locator).
    /// Fragments are returned in genomic order.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancontig::gff::Record;
    /// use pancontig::projection::locator;
    /// use pancontig::projection::Fragmenter;
    /// use pancontig::projection::Mode;
    ///
    /// let graph = r#"{
    ///     "blocks": [{"id": "B1", "sequence": ""}, {"id": "B2", "sequence": ""}],
    ///     "paths": [{
    ///         "name": "G1",
    ///         "blocks": [
    ///             {"id": "B1", "strand": true},
    ///             {"id": "B2", "strand": true},
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
    /// let fragments = Fragmenter::new(Mode::Annotate).fragment(&feature, &locator.locate(&feature)?);
    ///
    /// assert_eq!(fragments.len(), 2);
    /// assert_eq!(
    ///     fragments[0].to_string(),
    ///     "G1\t.\tCDS-fragment-edge\t600\t1200\t.\t+\t0\t\
    ///      ID=cds1-fragment1;parent=cds1;pancontigID=B2;pancontigStrand=+;pancontigN=1"
    /// );
    /// assert_eq!(
    ///     fragments[1].to_string(),
    ///     "G1\t.\tCDS-fragment-edge\t1201\t1300\t.\t+\t1\t\
    ///      ID=cds1-fragment2;parent=cds1;pancontigID=B1;pancontigStrand=+;pancontigN=2"
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn fragment(&self, feature: &Record, located: &NonEmpty<Located<'_>>) -> Vec<Record> {
        if self.mode == Mode::Link {
            return vec![link(feature, located)];
        }

        if located.len() == 1 {
            return vec![self.place(feature.clone(), &located.head)];
        }

        let n = located.len();
        let parent = parent_id(feature);

        located
            .iter()
            .enumerate()
            .map(|(i, loc)| {
                let number = match feature.strand().is_reverse() {
                    true => n - i,
                    false => i + 1,
                };

                let position = match i == 0 || i == n - 1 {
                    true => Position::Edge,
                    false => Position::Middle,
                };

                let ty = match self.type_naming {
                    TypeNaming::Tagged => format!("{}-{}", feature.ty(), position.suffix()),
                    TypeNaming::Preserve => feature.ty().to_string(),
                };

                let span = *loc.genomic();

                let phase = feature.phase().map(|phase| match feature.strand().is_reverse() {
                    true => phase.shift(feature.end() - span.end()),
                    false => phase.shift(span.start() - feature.start()),
                });

                let mut attributes = Attributes::default();
                attributes.insert(ID, format!("{parent}-fragment{number}"));
                attributes.insert(PARENT, parent.as_str());

                for (key, value) in feature
                    .attributes()
                    .iter()
                    .filter(|(key, _)| *key != ID && *key != PARENT)
                {
                    attributes.insert(key, value);
                }

                let fragment = Record::new(
                    feature.seqid(),
                    feature.source(),
                    ty,
                    span,
                    feature.strand(),
                )
                .with_phase(phase)
                .with_attributes(attributes);

                self.place(fragment, loc)
            })
            .collect()
    }

    /// Adds block metadata to `record` and, in project mode, moves it onto
    /// the block.
    fn place(&self, mut record: Record, located: &Located<'_>) -> Record {
        let occurrence = located.occurrence();

        let attributes = record.attributes_mut();
        attributes.insert(PANCONTIG_ID, occurrence.block_id());
        attributes.insert(PANCONTIG_STRAND, occurrence.orientation_symbol().to_string());
        attributes.insert(PANCONTIG_N, occurrence.number().to_string());

        if self.mode != Mode::Project {
            return record;
        }

        let strand = match occurrence.is_forward() {
            true => record.strand(),
            false => record.strand().complement(),
        };

        let score = record.score().map(String::from);
        let phase = record.phase();
        let attributes = record.attributes().clone();

        Record::new(
            located.block_id(),
            record.source(),
            record.ty(),
            *located.relative(),
            strand,
        )
        .with_score(score)
        .with_phase(phase)
        .with_attributes(attributes)
    }
}

/// Gets the identifier of `feature`, falling back to its location when the
/// feature has no `ID`.
pub fn parent_id(feature: &Record) -> String {
    match feature.attributes().id() {
        Some(id) => id.to_string(),
        None => format!("{}:{}", feature.seqid(), feature.span()),
    }
}

/// Builds the link mode record for `feature`.
fn link(feature: &Record, located: &NonEmpty<Located<'_>>) -> Record {
    let links = located
        .iter()
        .map(|loc| {
            let occurrence = loc.occurrence();
            format!(
                "{}{}_{}",
                occurrence.block_id(),
                occurrence.orientation_symbol(),
                occurrence.number()
            )
        })
        .collect::<Vec<_>>()
        .join(",");

    let mut record = feature.clone();
    record.attributes_mut().insert(PANCONTIGS, links);
    record
}
