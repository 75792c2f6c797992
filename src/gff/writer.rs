//! An annotation file writer.

use std::io::Write;
use std::io::{self};

use crate::gff::Record;

/// The directive announcing the format version.
pub const VERSION_DIRECTIVE: &str = "##gff-version 3";

/// An annotation file writer.
#[derive(Debug)]
pub struct Writer<W>(W)
where
    W: Write;

impl<W> Writer<W>
where
    W: Write,
{
    /// Creates an annotation file writer.
    pub fn new(inner: W) -> Self {
        Self(inner)
    }

    /// Gets a reference to the inner writer.
    pub fn inner(&self) -> &W {
        &self.0
    }

    /// Consumes self and returns the inner writer.
    pub fn into_inner(self) -> W {
        self.0
    }

    /// Writes the header lines.
    ///
    /// If the lines do not start with a version directive, one is written
    /// first.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut writer = pancontig::gff::Writer::new(Vec::new());
    /// writer.write_header(["#!annotated"])?;
    ///
    /// assert_eq!(writer.into_inner(), b"##gff-version 3\n#!annotated\n");
    ///
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_header<I, S>(&mut self, lines: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = lines.into_iter().peekable();

        let has_version = lines
            .peek()
            .map(|line| line.as_ref().starts_with("##gff-version"))
            .unwrap_or(false);

        if !has_version {
            writeln!(self.0, "{VERSION_DIRECTIVE}")?;
        }

        for line in lines {
            writeln!(self.0, "{}", line.as_ref())?;
        }

        Ok(())
    }

    /// Writes a single record.
    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        writeln!(self.0, "{record}")
    }

    /// Writes every record in order.
    pub fn write_records<'r>(
        &mut self,
        records: impl IntoIterator<Item = &'r Record>,
    ) -> io::Result<()> {
        for record in records {
            self.write_record(record)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_keeps_existing_version() -> Result<(), Box<dyn std::error::Error>> {
        let record = "G1\t.\tgene\t1\t10\t.\t+\t.\tID=g1".parse::<Record>()?;

        let mut writer = Writer::new(Vec::new());
        writer.write_header(["##gff-version 3.1.26"])?;
        writer.write_records([&record])?;

        let output = String::from_utf8(writer.into_inner())?;
        assert_eq!(
            output,
            "##gff-version 3.1.26\nG1\t.\tgene\t1\t10\t.\t+\t.\tID=g1\n"
        );

        Ok(())
    }
}
