//! Ordered collections of graph items addressable by identifier.

use indexmap::IndexMap;

/// An item that carries a unique identifier.
pub trait Identified {
    /// Gets the identifier.
    fn id(&self) -> &str;
}

/// An error related to a [`Collection`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// Two items shared the same identifier.
    DuplicateId(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DuplicateId(id) => write!(f, "duplicate identifier: {id}"),
        }
    }
}

impl std::error::Error for Error {}

/// An ordered collection of items.
///
/// Items keep the order in which they were provided and can be looked up by
/// identifier, by position, as an ordered batch of identifiers, or through a
/// boolean mask.
#[derive(Clone, Debug)]
pub struct Collection<T>(IndexMap<String, T>);

impl<T> Collection<T>
where
    T: Identified,
{
    /// Attempts to build a collection from items in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancontig::graph::Block;
    /// use pancontig::graph::Collection;
    ///
    /// let blocks = Collection::try_from_items(vec![
    ///     Block::new("B1", "ACGT"),
    ///     Block::new("B2", "GG"),
    /// ])?;
    ///
    /// assert_eq!(blocks.get("B2").map(|b| b.len()), Some(2));
    /// assert_eq!(blocks.get_index(0).map(|b| b.id()), Some("B1"));
    ///
    /// assert!(Collection::try_from_items(vec![
    ///     Block::new("B1", "A"),
    ///     Block::new("B1", "C"),
    /// ])
    /// .is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_items(items: impl IntoIterator<Item = T>) -> Result<Self, Error> {
        let mut inner = IndexMap::new();

        for item in items {
            let id = item.id().to_string();

            if inner.contains_key(&id) {
                return Err(Error::DuplicateId(id));
            }

            inner.insert(id, item);
        }

        Ok(Self(inner))
    }
}

impl<T> Collection<T> {
    /// Gets an item by identifier.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.0.get(id)
    }

    /// Gets an item by its position in the collection.
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.0.get_index(index).map(|(_, item)| item)
    }

    /// Gets the position of an identifier in the collection.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.get_index_of(id)
    }

    /// Gets several items by identifier, in the order requested.
    ///
    /// Returns [`None`] if any of the identifiers is unknown.
    pub fn get_many<'a, I>(&self, ids: I) -> Option<Vec<&T>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter().map(|id| self.get(id)).collect()
    }

    /// Selects the items for which `mask` is `true`.
    ///
    /// Returns [`None`] if the mask length does not match the collection.
    pub fn select(&self, mask: &[bool]) -> Option<Vec<&T>> {
        if mask.len() != self.len() {
            return None;
        }

        Some(
            self.iter()
                .zip(mask)
                .filter_map(|(item, keep)| keep.then_some(item))
                .collect(),
        )
    }

    /// Returns an iterator over the items in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.values()
    }

    /// Returns an iterator over the identifiers in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|id| id.as_str())
    }

    /// Gets the number of items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = indexmap::map::Values<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Block;

    fn blocks() -> Collection<Block> {
        Collection::try_from_items(vec![
            Block::new("B1", "AAAA"),
            Block::new("B2", "CC"),
            Block::new("B3", "GGG"),
        ])
        .unwrap()
    }

    #[test]
    fn batch_lookup() {
        let blocks = blocks();

        let found = blocks.get_many(["B3", "B1"]).unwrap();
        let ids = found.iter().map(|b| b.id()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["B3", "B1"]);

        assert!(blocks.get_many(["B1", "B9"]).is_none());
        assert_eq!(blocks.get_many([]).map(|v| v.len()), Some(0));
    }

    #[test]
    fn mask_lookup() {
        let blocks = blocks();

        let found = blocks.select(&[true, false, true]).unwrap();
        let ids = found.iter().map(|b| b.id()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["B1", "B3"]);

        assert!(blocks.select(&[true]).is_none());
    }

    #[test]
    fn positional_lookup() {
        let blocks = blocks();
        assert_eq!(blocks.position("B2"), Some(1));
        assert_eq!(blocks.get_index(2).map(|b| b.id()), Some("B3"));
        assert!(blocks.get_index(3).is_none());
        assert_eq!(blocks.ids().collect::<Vec<_>>(), vec!["B1", "B2", "B3"]);
    }
}
