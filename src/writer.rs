use std::fs;
use std::io::{self, Write as _};
use std::path::Path;

use crate::error::{Error, Result};
use crate::field::ToField;

/// A record terminator to use when writing CSV data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Terminator {
    /// Terminates records with `\r\n`.
    CRLF,
    /// Terminates records with the character given.
    Any(char),
}

impl Default for Terminator {
    fn default() -> Terminator {
        Terminator::Any('\n')
    }
}

/// Builds a CSV writer with various configuration knobs.
///
/// This builder lets you tweak the field delimiter, the quote character and
/// the record terminator. Once a `Writer` is built, its configuration cannot
/// be changed.
#[derive(Clone, Debug)]
pub struct WriterBuilder {
    delimiter: char,
    quote: char,
    term: Terminator,
}

impl Default for WriterBuilder {
    fn default() -> WriterBuilder {
        WriterBuilder {
            delimiter: ',',
            quote: '"',
            term: Terminator::default(),
        }
    }
}

impl WriterBuilder {
    /// Create a new builder with a default configuration.
    pub fn new() -> WriterBuilder {
        WriterBuilder::default()
    }

    /// The field delimiter to use when writing CSV.
    ///
    /// The default is `','`.
    pub fn delimiter(&mut self, delimiter: char) -> &mut WriterBuilder {
        self.delimiter = delimiter;
        self
    }

    /// The quote character to use when writing CSV.
    ///
    /// The default is `'"'`.
    pub fn quote(&mut self, quote: char) -> &mut WriterBuilder {
        self.quote = quote;
        self
    }

    /// The record terminator to use when writing CSV.
    ///
    /// The default is `Terminator::Any('\n')`. Use `Terminator::CRLF` for
    /// `\r\n` line endings.
    pub fn terminator(&mut self, term: Terminator) -> &mut WriterBuilder {
        self.term = term;
        self
    }

    /// Build a CSV writer from this configuration that writes to `wtr`.
    ///
    /// The writer is buffered for you automatically.
    pub fn from_writer<W: io::Write>(&self, wtr: W) -> Writer<W> {
        Writer {
            wtr: io::BufWriter::new(wtr),
            delimiter: self.delimiter,
            quote: self.quote,
            term: self.term,
            row_buf: String::new(),
            field_buf: String::new(),
        }
    }

    /// Build a CSV writer from this configuration that writes to the file
    /// path given.
    ///
    /// The file is created if it does not exist and truncated otherwise.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Writer<fs::File>> {
        Ok(self.from_writer(fs::File::create(path)?))
    }
}

/// A CSV writer.
///
/// This writer escapes fields for you automatically: a field is quoted when
/// (and only when) its text contains the delimiter, the quote character, a
/// line feed or a carriage return, and quote characters inside a quoted
/// field are doubled. Fields needing no quoting are written unchanged.
///
/// A writer has no state across rows beyond its configuration; every row is
/// rendered independently, joined with the delimiter and followed by the
/// record terminator.
///
/// # Example
///
/// ```rust
/// let mut wtr = csvlite::Writer::from_writer(vec![]);
/// wtr.write_row(&["a", "b,c"]).unwrap();
/// let data = wtr.into_inner().unwrap();
/// assert_eq!(String::from_utf8(data).unwrap(), "a,\"b,c\"\n");
/// ```
#[derive(Debug)]
pub struct Writer<W: io::Write> {
    wtr: io::BufWriter<W>,
    delimiter: char,
    quote: char,
    term: Terminator,
    // Reused between calls purely as allocations.
    row_buf: String,
    field_buf: String,
}

impl<W: io::Write> Writer<W> {
    /// Create a new CSV writer with a default configuration that writes to
    /// `wtr`.
    ///
    /// The writer is buffered for you automatically.
    pub fn from_writer(wtr: W) -> Writer<W> {
        WriterBuilder::new().from_writer(wtr)
    }
}

impl Writer<fs::File> {
    /// Create a new CSV writer with a default configuration that writes to
    /// the file path given.
    ///
    /// The file is created if it does not exist and truncated otherwise.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Writer<fs::File>> {
        WriterBuilder::new().from_path(path)
    }
}

impl<W: io::Write> Writer<W> {
    /// Write a single row.
    ///
    /// Each field is rendered with [`ToField`], escaped independently, and
    /// the finished line is written to the underlying writer in one call.
    pub fn write_row<I>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: ToField,
    {
        self.row_buf.clear();
        let mut first = true;
        for value in row {
            if !first {
                self.row_buf.push(self.delimiter);
            }
            first = false;
            self.field_buf.clear();
            value.format_field(&mut self.field_buf);
            push_escaped(
                &mut self.row_buf,
                &self.field_buf,
                self.delimiter,
                self.quote,
            );
        }
        match self.term {
            Terminator::CRLF => self.row_buf.push_str("\r\n"),
            Terminator::Any(c) => self.row_buf.push(c),
        }
        self.wtr.write_all(self.row_buf.as_bytes())?;
        Ok(())
    }

    /// Write many rows, in order.
    ///
    /// This is equivalent to calling [`write_row`](Writer::write_row) once
    /// per row.
    pub fn write_rows<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoIterator,
        <I::Item as IntoIterator>::Item: ToField,
    {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    /// Flush the contents of the internal buffer to the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.wtr.flush()?;
        Ok(())
    }

    /// Flush the internal buffer and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        match self.wtr.into_inner() {
            Ok(wtr) => Ok(wtr),
            Err(err) => Err(Error::Io(err.into_error())),
        }
    }
}

/// Append `field` to `dst`, quoting and escaping it if necessary.
///
/// A field must be quoted when it contains the delimiter, the quote
/// character, `\n` or `\r`. When quoting, every quote character is doubled
/// and the whole field is wrapped in quotes. Nothing else is ever escaped:
/// an embedded delimiter is made safe purely by the surrounding quotes.
fn push_escaped(dst: &mut String, field: &str, delimiter: char, quote: char) {
    let needs_quotes = field
        .chars()
        .any(|c| c == delimiter || c == quote || c == '\n' || c == '\r');
    if !needs_quotes {
        dst.push_str(field);
        return;
    }
    dst.push(quote);
    for c in field.chars() {
        if c == quote {
            dst.push(quote);
        }
        dst.push(c);
    }
    dst.push(quote);
}
