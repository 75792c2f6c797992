//! An annotation file reader.

use std::io::BufRead;
use std::io::{self};
use std::iter;

use tracing::debug;
use tracing::warn;

use crate::gff::line;
use crate::gff::record;
use crate::gff::Line;
use crate::gff::Record;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A line error.
    Line(line::ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Line(err) => write!(f, "line error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A fully read annotation file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Annotation {
    /// The comment and directive lines preceding the first record.
    header: Vec<String>,

    /// The feature records in file order.
    records: Vec<Record>,
}

impl Annotation {
    /// Gets the header lines.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Gets the records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes `self` and returns the header lines and the records.
    pub fn into_parts(self) -> (Vec<String>, Vec<Record>) {
        (self.header, self.records)
    }
}

/// An annotation file reader.
#[derive(Clone, Debug)]
pub struct Reader<T>(T)
where
    T: BufRead;

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates an annotation file reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"##gff-version 3\nG1\t.\tgene\t1\t10\t.\t+\t.\tID=g1\n";
    /// let reader = pancontig::gff::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Gets a reference to the inner reader.
    pub fn inner(&self) -> &T {
        &self.0
    }

    /// Gets a mutable reference to the inner reader.
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.0
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Reads a raw, textual line from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"##gff-version 3\r\nG1\t.\tgene\t1\t10\t.\t+\t.\tID=g1";
    /// let mut reader = pancontig::gff::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 17);
    /// assert_eq!(buffer, "##gff-version 3");
    ///
    /// reader.read_line_raw(&mut buffer)?;
    /// assert_eq!(buffer, "G1\t.\tgene\t1\t10\t.\t+\t.\tID=g1");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 0);
    ///
    /// # Ok::<(), io::Error>(())
    /// ```
    pub fn read_line_raw(&mut self, buffer: &mut String) -> io::Result<usize> {
        read_line(self.inner_mut(), buffer)
    }

    /// Attempts to read a [`Line`] from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancontig::gff::Line;
    ///
    /// let data = b"##gff-version 3\nG1\t.\tgene\t1\t10\t.\t+\t.\tID=g1\n";
    /// let mut reader = pancontig::gff::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// assert!(matches!(
    ///     reader.read_line(&mut buffer)?,
    ///     Some(Line::Comment(_))
    /// ));
    /// assert!(matches!(
    ///     reader.read_line(&mut buffer)?,
    ///     Some(Line::Record(_))
    /// ));
    /// assert!(matches!(reader.read_line(&mut buffer)?, None));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_line(&mut self, buffer: &mut String) -> Result<Option<Line>, Error> {
        let read = self.read_line_raw(buffer).map_err(Error::Io)?;

        match read {
            0 => Ok(None),
            _ => {
                let line = buffer.parse::<Line>().map_err(Error::Line)?;
                Ok(Some(line))
            }
        }
    }

    /// Returns an iterator over the [`Line`]s in the underlying reader.
    pub fn lines(&mut self) -> impl Iterator<Item = Result<Line, Error>> + '_ {
        let mut buffer = String::new();
        iter::from_fn(move || self.read_line(&mut buffer).transpose())
    }

    /// Returns an iterator over the feature records in the underlying reader.
    ///
    /// Lines with the wrong number of fields are dropped, as are records whose
    /// start is zero or comes after their end. Iteration stops at the
    /// `##FASTA` directive.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"##gff-version 3\n\
    ///     G1\t.\tgene\t1\t10\t.\t+\t.\tID=g1\n\
    ///     truncated\tline\n\
    ///     G1\t.\tgene\t50\t40\t.\t+\t.\tID=backwards\n\
    ///     G1\t.\tgene\t20\t30\t.\t-\t.\tID=g2\n\
    ///     ##FASTA\n\
    ///     >G1\n";
    /// let mut reader = pancontig::gff::Reader::new(&data[..]);
    ///
    /// let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(records.len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn records(&mut self) -> impl Iterator<Item = Result<Record, Error>> + '_ {
        let mut lines = self.lines();
        let mut done = false;

        iter::from_fn(move || {
            while !done {
                match lines.next()? {
                    Ok(Line::Record(record)) => return Some(Ok(record)),
                    Ok(Line::Fasta) => done = true,
                    Ok(Line::Empty) | Ok(Line::Comment(_)) => {}
                    Err(Error::Line(err)) if is_skippable(&err) => skip(&err),
                    Err(err) => return Some(Err(err)),
                }
            }

            None
        })
    }

    /// Reads the whole annotation: the header lines that precede the first
    /// record followed by every record, with the same leniency as
    /// [`Reader::records()`].
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"##gff-version 3\n\
    ///     ###sequence-region G1 1 1500\n\
    ///     G1\t.\tgene\t1\t10\t.\t+\t.\tID=g1\n";
    /// let mut reader = pancontig::gff::Reader::new(&data[..]);
    ///
    /// let annotation = reader.read_annotation()?;
    /// assert_eq!(annotation.header(), ["##gff-version 3", "##sequence-region G1 1 1500"]);
    /// assert_eq!(annotation.records().len(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_annotation(&mut self) -> Result<Annotation, Error> {
        let mut annotation = Annotation::default();
        let mut in_header = true;

        for result in self.lines() {
            let line = match result {
                Ok(line) => line,
                Err(Error::Line(err)) if is_skippable(&err) => {
                    skip(&err);
                    in_header = false;
                    continue;
                }
                Err(err) => return Err(err),
            };

            match line {
                Line::Comment(comment) if in_header => annotation.header.push(comment),
                Line::Comment(_) | Line::Empty => in_header = false,
                Line::Record(record) => {
                    in_header = false;
                    annotation.records.push(record);
                }
                Line::Fasta => break,
            }
        }

        debug!(
            "read {} header lines and {} records",
            annotation.header.len(),
            annotation.records.len()
        );

        Ok(annotation)
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self(inner)
    }
}

/// Returns whether a line failed in a way that only affects that line. Such
/// lines are dropped rather than failing the whole file.
fn is_skippable(err: &line::ParseError) -> bool {
    matches!(
        err.record_error(),
        record::ParseError::IncorrectNumberOfFields(_) | record::ParseError::InvalidSpan(_)
    )
}

/// Logs a dropped line.
fn skip(err: &line::ParseError) {
    match err.record_error() {
        record::ParseError::InvalidSpan(reason) => {
            warn!("dropping feature with an invalid span ({reason}): {}", err.line())
        }
        _ => debug!("dropping malformed line: {}", err.line()),
    }
}

/// Reads a line from a buffered reader.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_read_line() {
        let data = b"hello\r\nworld!";
        let mut cursor = io::Cursor::new(data);

        let mut buffer = String::new();
        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "hello");
        assert_eq!(len, 7);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "world!");
        assert_eq!(len, 6);
    }

    #[test]
    fn test_invalid_record_is_reported() {
        let data = b"G1\t.\tgene\t1\t10\t.\t+\t7\tID=g1\n";
        let mut reader = Reader::new(&data[..]);

        let mut records = reader.records();
        let err = records.next().unwrap().unwrap_err();
        assert!(matches!(err, Error::Line(_)));
    }

    #[test]
    fn test_invalid_span_drops_only_that_feature() -> Result<(), Box<dyn std::error::Error>> {
        let data = b"##gff-version 3\n\
            G1\t.\tgene\t10\t20\t.\t+\t.\tID=ok\n\
            G1\t.\tgene\t50\t40\t.\t+\t.\tID=bad\n\
            G1\t.\tgene\t0\t40\t.\t+\t.\tID=zero\n\
            G1\t.\tgene\t30\t60\t.\t+\t.\tID=ok2\n";

        let annotation = Reader::new(&data[..]).read_annotation()?;
        let ids = annotation
            .records()
            .iter()
            .map(|r| r.attributes().id().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["ok", "ok2"]);

        let records = Reader::new(&data[..])
            .records()
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(records.len(), 2);

        Ok(())
    }

    #[test]
    fn test_header_ends_at_first_non_comment() -> Result<(), Box<dyn std::error::Error>> {
        let data = b"##gff-version 3\n\
            G1\t.\tgene\t1\t10\t.\t+\t.\tID=g1\n\
            # a comment between records\n\
            G1\t.\tgene\t11\t20\t.\t+\t.\tID=g2\n\
            ##FASTA\n\
            G1\t.\tgene\t21\t30\t.\t+\t.\tID=g3\n";
        let mut reader = Reader::new(&data[..]);

        let (header, records) = reader.read_annotation()?.into_parts();
        assert_eq!(header, vec![String::from("##gff-version 3")]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].attributes().id(), Some("g2"));

        Ok(())
    }
}
