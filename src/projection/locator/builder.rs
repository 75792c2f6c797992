//! A builder for a [`Locator`].

use std::collections::HashMap;

use tracing::debug;

use crate::graph::Graph;
use crate::projection::path_map;
use crate::projection::Locator;
use crate::projection::PathMap;

/// An error related to building a [`Locator`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// A genome's path could not be indexed.
    InvalidPath(String, path_map::BuildError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidPath(name, err) => write!(f, "invalid path {name}: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A builder for a [`Locator`].
#[allow(missing_debug_implementations)]
pub struct Builder;

impl Builder {
    /// Builds a [`Locator`] with one [`PathMap`] per path in the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// let graph = r#"{
    ///     "blocks": [{"id": "B1", "sequence": "ACGT"}],
    ///     "paths": [{"name": "G1", "blocks": [{"id": "B1", "strand": true}], "position": [1, 5]}]
    /// }"#
    /// .parse::<pancontig::graph::Graph>()?;
    ///
    /// let locator = pancontig::projection::locator::Builder.try_build_from(&graph)?;
    /// assert!(locator.path_map("G1").is_some());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build_from(&self, graph: &Graph) -> Result<Locator> {
        let mut inner = HashMap::with_capacity(graph.paths().len());

        for path in graph.paths() {
            let map = PathMap::try_from_path(path)
                .map_err(|err| Error::InvalidPath(path.name().to_string(), err))?;

            if map.is_circular() {
                debug!(
                    "genome {} is circular; features wrapping the origin cannot be located",
                    map.name()
                );
            }

            inner.insert(path.name().to_string(), map);
        }

        debug!("indexed {} genomes", inner.len());

        Ok(Locator { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_must_start_at_one() {
        let graph = r#"{
            "blocks": [{"id": "B1", "sequence": "ACGT"}],
            "paths": [{"name": "G1", "blocks": [{"id": "B1", "strand": true}], "position": [3, 7]}]
        }"#
        .parse::<Graph>()
        .unwrap();

        let err = Builder.try_build_from(&graph).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidPath(String::from("G1"), path_map::BuildError::DoesNotStartAtOne(3))
        );
    }
}
