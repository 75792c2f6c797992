//! The attributes column of a feature record.

use std::str::FromStr;

use indexmap::IndexMap;

use crate::gff::MISSING_FIELD;

/// The delimiter between attributes.
pub const DELIMITER: char = ';';

/// The separator between an attribute key and its value.
pub const SEPARATOR: char = '=';

/// The key holding a feature's identifier.
pub const ID: &str = "ID";

/// An error associated with parsing attributes.
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An attribute had no `=` separating the key from the value.
    MissingSeparator(String),

    /// An attribute had an empty key.
    EmptyKey(String),

    /// A key appeared more than once.
    DuplicateKey(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingSeparator(s) => {
                write!(f, "attribute \"{s}\" is missing a \"{SEPARATOR}\"")
            }
            ParseError::EmptyKey(s) => write!(f, "attribute \"{s}\" has an empty key"),
            ParseError::DuplicateKey(key) => write!(f, "duplicate attribute key: {key}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// An ordered collection of `key=value` attributes.
///
/// Keys are kept in the order in which they were first inserted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    /// Gets the value for `key`, if it exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancontig::gff::Attributes;
    ///
    /// let attributes = "ID=gene1;Name=dnaA".parse::<Attributes>()?;
    /// assert_eq!(attributes.get("Name"), Some("dnaA"));
    /// assert_eq!(attributes.get("product"), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|value| value.as_str())
    }

    /// Gets the value of the `ID` attribute, if it exists.
    pub fn id(&self) -> Option<&str> {
        self.get(ID)
    }

    /// Sets `key` to `value`.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Removes `key`, preserving the order of the remaining attributes.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    /// Returns an iterator over the attributes in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Gets the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Attributes {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut inner = IndexMap::new();

        if s == MISSING_FIELD {
            return Ok(Self(inner));
        }

        for attribute in s.split(DELIMITER) {
            let attribute = attribute.trim();

            if attribute.is_empty() {
                continue;
            }

            let (key, value) = attribute
                .split_once(SEPARATOR)
                .ok_or_else(|| ParseError::MissingSeparator(attribute.into()))?;

            if key.is_empty() {
                return Err(ParseError::EmptyKey(attribute.into()));
            }

            if inner.insert(key.to_string(), value.to_string()).is_some() {
                return Err(ParseError::DuplicateKey(key.into()));
            }
        }

        Ok(Self(inner))
    }
}

impl std::fmt::Display for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "{MISSING_FIELD}");
        }

        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "{DELIMITER}")?;
            }

            write!(f, "{key}{SEPARATOR}{value}")?;
        }

        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() -> Result<(), Box<dyn std::error::Error>> {
        let attributes = "ID=cds1;product=hypothetical protein;inference=ab initio"
            .parse::<Attributes>()?;

        let keys = attributes.iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(keys, vec!["ID", "product", "inference"]);
        assert_eq!(
            attributes.to_string(),
            "ID=cds1;product=hypothetical protein;inference=ab initio"
        );

        Ok(())
    }

    #[test]
    fn test_missing_and_trailing() -> Result<(), Box<dyn std::error::Error>> {
        let attributes = ".".parse::<Attributes>()?;
        assert!(attributes.is_empty());
        assert_eq!(attributes.to_string(), ".");

        let attributes = "ID=a;Name=b;".parse::<Attributes>()?;
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes.to_string(), "ID=a;Name=b");

        Ok(())
    }

    #[test]
    fn test_remove_keeps_order() -> Result<(), Box<dyn std::error::Error>> {
        let mut attributes = "ID=a;Name=b;locus_tag=c".parse::<Attributes>()?;
        assert_eq!(attributes.remove("ID"), Some(String::from("a")));
        assert_eq!(attributes.to_string(), "Name=b;locus_tag=c");

        attributes.insert("pancontigID", "B1");
        assert_eq!(attributes.to_string(), "Name=b;locus_tag=c;pancontigID=B1");

        Ok(())
    }

    #[test]
    fn test_invalid_attributes() {
        let err = "ID=a;flag".parse::<Attributes>().unwrap_err();
        assert_eq!(err.to_string(), "attribute \"flag\" is missing a \"=\"");

        let err = "ID=a;ID=b".parse::<Attributes>().unwrap_err();
        assert_eq!(err, ParseError::DuplicateKey(String::from("ID")));

        let err = "=a".parse::<Attributes>().unwrap_err();
        assert!(matches!(err, ParseError::EmptyKey(_)));
    }

    #[test]
    fn test_value_may_contain_separator() -> Result<(), Box<dyn std::error::Error>> {
        let attributes = "Note=a=b".parse::<Attributes>()?;
        assert_eq!(attributes.get("Note"), Some("a=b"));
        Ok(())
    }
}
