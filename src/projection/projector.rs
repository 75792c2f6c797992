//! Projecting an entire annotation onto the pangenome graph.

use tracing::debug;
use tracing::trace;

use crate::gff::Record;
use crate::projection::fragmenter;
use crate::projection::locator;
use crate::projection::Fragmenter;
use crate::projection::Locator;
use crate::projection::Mode;
use crate::projection::TypeNaming;

/// An error related to projecting a feature.
#[derive(Debug, Eq, PartialEq)]
pub struct Error {
    /// The identifier of the feature that failed.
    feature: String,

    /// The reason it failed.
    source: locator::Error,
}

impl Error {
    /// Gets the identifier of the feature that failed.
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Gets the reason the feature could not be projected.
    pub fn reason(&self) -> &locator::Error {
        &self.source
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "feature {}: {}", self.feature, self.source)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// The records produced by projecting an annotation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Projection {
    /// The output records in input order.
    records: Vec<Record>,

    /// The number of input features.
    features: usize,

    /// The number of input features that were split.
    fragmented: usize,
}

impl Projection {
    /// Gets the output records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes `self` and returns the output records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Gets the number of input features.
    pub fn features(&self) -> usize {
        self.features
    }

    /// Gets the number of input features that were split into fragments.
    pub fn fragmented(&self) -> usize {
        self.fragmented
    }

    /// Appends the records for one feature.
    fn push(&mut self, records: Vec<Record>) {
        self.features += 1;

        if records.len() > 1 {
            self.fragmented += 1;
        }

        self.records.extend(records);
    }
}

impl FromIterator<Vec<Record>> for Projection {
    fn from_iter<I: IntoIterator<Item = Vec<Record>>>(iter: I) -> Self {
        let mut projection = Projection::default();

        for records in iter {
            projection.push(records);
        }

        projection
    }
}

/// Runs the [`Locator`] and a [`Fragmenter`] over every feature of an
/// annotation.
///
/// Each feature is handled independently, so projecting is a pure function of
/// the feature and its genome.
#[derive(Debug)]
pub struct Projector<'a> {
    /// The locator.
    locator: &'a Locator,

    /// The fragmenter.
    fragmenter: Fragmenter,
}

impl<'a> Projector<'a> {
    /// Creates a new projector.
    pub fn new(locator: &'a Locator, mode: Mode) -> Self {
        Self {
            locator,
            fragmenter: Fragmenter::new(mode),
        }
    }

    /// Sets the fragment type naming.
    pub fn with_type_naming(mut self, type_naming: TypeNaming) -> Self {
        self.fragmenter = self.fragmenter.with_type_naming(type_naming);
        self
    }

    /// Gets the fragmenter.
    pub fn fragmenter(&self) -> &Fragmenter {
        &self.fragmenter
    }

    /// Projects a single feature.
    pub fn project_feature(&self, feature: &Record) -> Result<Vec<Record>> {
        let located = self.locator.locate(feature).map_err(|source| Error {
            feature: fragmenter::parent_id(feature),
            source,
        })?;

        trace!(
            "{} overlaps {} occurrence(s) on {}",
            feature.span(),
            located.len(),
            feature.seqid()
        );

        let records = self.fragmenter.fragment(feature, &located);

        if records.len() > 1 {
            debug!(
                "split {} into {} fragments",
                fragmenter::parent_id(feature),
                records.len()
            );
        }

        Ok(records)
    }

    /// Lazily projects each feature, yielding one result per feature.
    ///
    /// Unlike [`Projector::project()`], this lets callers decide what to do
    /// with features that cannot be projected.
    pub fn projections<'r, I>(
        &'r self,
        features: I,
    ) -> impl Iterator<Item = Result<Vec<Record>>> + 'r
    where
        I: IntoIterator<Item = &'r Record>,
        I::IntoIter: 'r,
    {
        let projector: &'r Projector<'r> = self;

        features
            .into_iter()
            .map(move |feature| projector.project_feature(feature))
    }

    /// Projects every feature in input order, failing on the first feature
    /// that cannot be projected.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancontig::gff::Record;
    /// use pancontig::projection::locator;
    /// use pancontig::projection::Mode;
    /// use pancontig::projection::Projector;
    ///
    /// let graph = r#"{
    ///     "blocks": [{"id": "B1", "sequence": ""}, {"id": "B2", "sequence": ""}],
    ///     "paths": [{
    ///         "name": "G1",
    ///         "blocks": [{"id": "B1", "strand": true}, {"id": "B2", "strand": false}],
    ///         "position": [1, 101, 201]
    ///     }]
    /// }"#
    /// .parse::<pancontig::graph::Graph>()?;
    ///
    /// let locator = locator::Builder.try_build_from(&graph)?;
    /// let features = vec![
    ///     "G1\t.\tgene\t10\t50\t.\t+\t.\tID=a".parse::<Record>()?,
    ///     "G1\t.\tgene\t90\t120\t.\t+\t.\tID=b".parse::<Record>()?,
    /// ];
    ///
    /// let projection = Projector::new(&locator, Mode::Project).project(&features)?;
    ///
    /// assert_eq!(projection.features(), 2);
    /// assert_eq!(projection.fragmented(), 1);
    /// assert_eq!(projection.records().len(), 3);
    /// assert_eq!(projection.records()[2].seqid(), "B2");
    /// assert_eq!(projection.records()[2].span().to_string(), "81-100");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn project(&self, features: &[Record]) -> Result<Projection> {
        self.projections(features).collect()
    }

    /// Projects every feature across the rayon thread pool, keeping the
    /// output in input order.
    #[cfg(feature = "parallel")]
    pub fn par_project(&self, features: &[Record]) -> Result<Projection> {
        use rayon::prelude::*;

        let results = features
            .par_iter()
            .map(|feature| self.project_feature(feature))
            .collect::<Result<Vec<_>>>()?;

        Ok(results.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::projection::path_map;

    fn locator() -> Locator {
        let graph = r#"{
            "blocks": [{"id": "B1", "sequence": ""}, {"id": "B2", "sequence": ""}],
            "paths": [{
                "name": "G1",
                "blocks": [
                    {"id": "B1", "strand": true},
                    {"id": "B2", "strand": true},
                    {"id": "B1", "strand": true}
                ],
                "position": [1, 501, 1201, 1501]
            }]
        }"#
        .parse::<Graph>()
        .unwrap();

        locator::Builder.try_build_from(&graph).unwrap()
    }

    fn features(lines: &[&str]) -> Vec<Record> {
        lines.iter().map(|line| line.parse().unwrap()).collect()
    }

    #[test]
    fn annotate_keeps_input_order() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let locator = locator();
        let features = features(&[
            "G1\t.\tgene\t1250\t1260\t.\t+\t.\tID=late",
            "G1\t.\tCDS\t600\t1300\t.\t-\t0\tID=cds1",
            "G1\t.\tgene\t5\t15\t.\t+\t.\tID=early",
        ]);

        let projection = Projector::new(&locator, Mode::Annotate).project(&features)?;

        let ids = projection
            .records()
            .iter()
            .map(|r| r.attributes().id().unwrap())
            .collect::<Vec<_>>();

        assert_eq!(
            ids,
            vec!["late", "cds1-fragment2", "cds1-fragment1", "early"]
        );
        assert_eq!(projection.features(), 3);
        assert_eq!(projection.fragmented(), 1);

        Ok(())
    }

    #[test]
    fn unknown_genome_fails_the_projection() {
        let locator = locator();
        let features = features(&[
            "G1\t.\tgene\t5\t15\t.\t+\t.\tID=ok",
            "G9\t.\tgene\t5\t15\t.\t+\t.\tID=missing",
        ]);

        let err = Projector::new(&locator, Mode::Annotate)
            .project(&features)
            .unwrap_err();

        assert_eq!(err.feature(), "missing");
        assert_eq!(
            err.reason(),
            &locator::Error::UnknownGenome(String::from("G9"))
        );
        assert_eq!(err.to_string(), "feature missing: genome G9 is not in the graph");
    }

    #[test]
    fn projections_can_skip_failures() {
        let locator = locator();
        let features = features(&[
            "G1\t.\tgene\t1400\t1600\t.\t+\t.\tID=overhang",
            "G1\t.\tgene\t5\t15\t.\t+\t.\tID=ok",
        ]);

        let projector = Projector::new(&locator, Mode::Link);
        let results = projector.projections(&features).collect::<Vec<_>>();

        assert!(matches!(
            results[0].as_ref().unwrap_err().reason(),
            locator::Error::Range(_, path_map::Error::OutOfBounds { .. })
        ));

        let projection = results
            .into_iter()
            .filter_map(|result| result.ok())
            .collect::<Projection>();

        assert_eq!(projection.features(), 1);
        assert_eq!(
            projection.records()[0].attributes().get(fragmenter::PANCONTIGS),
            Some("B1+_1")
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let locator = locator();
        let features = (0..100)
            .map(|i| {
                let start = 1 + i * 13;
                format!("G1\t.\tCDS\t{start}\t{}\t.\t-\t{}\tID=f{i}", start + 200, i % 3)
                    .parse::<Record>()
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let projector = Projector::new(&locator, Mode::Project);
        assert_eq!(projector.project(&features)?, projector.par_project(&features)?);

        Ok(())
    }
}
