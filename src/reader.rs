use std::fs;
use std::io::{self, Read as _};
use std::mem;
use std::path::Path;
use std::str;

use crate::error::{Error, Result};

/// Builds a CSV reader with various configuration knobs.
///
/// This builder lets you tweak the field delimiter and the quote character.
/// Once a `Reader` is built, its configuration cannot be changed.
#[derive(Clone, Debug)]
pub struct ReaderBuilder {
    delimiter: char,
    quote: char,
}

impl Default for ReaderBuilder {
    fn default() -> ReaderBuilder {
        ReaderBuilder { delimiter: ',', quote: '"' }
    }
}

impl ReaderBuilder {
    /// Create a new builder with a default configuration.
    pub fn new() -> ReaderBuilder {
        ReaderBuilder::default()
    }

    /// The field delimiter to use when parsing CSV.
    ///
    /// The default is `','`.
    pub fn delimiter(&mut self, delimiter: char) -> &mut ReaderBuilder {
        self.delimiter = delimiter;
        self
    }

    /// The quote character to use when parsing CSV.
    ///
    /// The default is `'"'`.
    pub fn quote(&mut self, quote: char) -> &mut ReaderBuilder {
        self.quote = quote;
        self
    }

    /// Build a CSV reader from this configuration that reads from `rdr`.
    ///
    /// The reader is buffered for you automatically.
    pub fn from_reader<R: io::Read>(&self, rdr: R) -> Reader<R> {
        Reader {
            rdr: io::BufReader::new(rdr),
            delimiter: self.delimiter,
            quote: self.quote,
            lookahead: None,
            eof: false,
            line: 1,
        }
    }

    /// Build a CSV reader from this configuration that reads from the file
    /// path given.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Reader<fs::File>> {
        Ok(self.from_reader(fs::File::open(path)?))
    }
}

/// A CSV reader.
///
/// This reader pulls characters from an underlying stream one at a time and
/// produces rows, where a row is a sequence of field strings. Rows are
/// produced lazily: each call to [`read_row`](Reader::read_row) consumes
/// exactly one row's worth of input, and input is never read twice. Rows may
/// have differing numbers of fields; no schema is assumed.
///
/// # Parsing
///
/// Quoted fields may contain the delimiter, the quote character (escaped by
/// doubling it) and raw line breaks. Parsing is deliberately lenient and
/// never fails on strange input: a quote character anywhere other than the
/// start of a field is ordinary data, an unterminated quoted field is closed
/// implicitly at end of stream, and `\n`, `\r\n` and a lone `\r` all
/// terminate a row. The only errors this reader returns come from the
/// underlying stream.
///
/// # Example
///
/// ```rust
/// let data = "\
/// sticker,mortals,7
/// \"bribed,personae\",7
/// wobbling,\"pon\"\"cing\",4
/// ";
///
/// let mut rdr = csvlite::Reader::from_reader(data.as_bytes());
/// for row in rdr.rows() {
///     let row = row.unwrap();
///     println!("{:?}", row);
/// }
/// ```
#[derive(Debug)]
pub struct Reader<R: io::Read> {
    rdr: io::BufReader<R>,
    delimiter: char,
    quote: char,
    /// At most one character pushed back for re-reading, used to
    /// disambiguate escaped quotes and CRLF pairs.
    lookahead: Option<char>,
    /// Set once the stream is exhausted and no further row can be produced.
    eof: bool,
    line: u64,
}

/// The parser's position with respect to quoting, within one field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    InField,
    InQuotedField,
}

impl<R: io::Read> Reader<R> {
    /// Create a new CSV reader with a default configuration that reads from
    /// `rdr`.
    ///
    /// The reader is buffered for you automatically.
    pub fn from_reader(rdr: R) -> Reader<R> {
        ReaderBuilder::new().from_reader(rdr)
    }
}

impl Reader<fs::File> {
    /// Create a new CSV reader with a default configuration that reads from
    /// the file path given.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Reader<fs::File>> {
        ReaderBuilder::new().from_path(path)
    }
}

impl<R: io::Read> Reader<R> {
    /// Parse and return the next row.
    ///
    /// Returns `Ok(None)` once the input is exhausted. Input ending exactly
    /// at a row boundary produces no trailing empty row, while input ending
    /// mid-field (no trailing line terminator) still yields that final row.
    /// A row, once started, is always completed and returned, even if it is
    /// truncated by the end of the stream.
    pub fn read_row(&mut self) -> Result<Option<Vec<String>>> {
        if self.eof {
            return Ok(None);
        }

        let mut row: Vec<String> = Vec::new();
        let mut field = String::new();
        let mut state = State::InField;

        loop {
            let c = match self.read_char()? {
                Some(c) => c,
                None => {
                    // End of stream inside quotes is an implicit close.
                    if !field.is_empty() || !row.is_empty() {
                        row.push(field);
                        return Ok(Some(row));
                    }
                    self.eof = true;
                    return Ok(None);
                }
            };
            match state {
                State::InQuotedField => {
                    if c == self.quote {
                        match self.read_char()? {
                            // A doubled quote is one literal quote.
                            Some(next) if next == self.quote => field.push(c),
                            // Otherwise the quoted region ends. The field
                            // stays open: following characters accumulate
                            // into the same field.
                            Some(next) => {
                                state = State::InField;
                                self.unread(next);
                            }
                            None => state = State::InField,
                        }
                    } else {
                        // Anything else, raw line breaks included, is data.
                        field.push(c);
                    }
                }
                State::InField => {
                    if c == self.delimiter {
                        row.push(mem::take(&mut field));
                    } else if c == '\n' {
                        row.push(field);
                        return Ok(Some(row));
                    } else if c == '\r' {
                        // A CRLF pair terminates the row as a unit; a lone
                        // CR terminates it by itself.
                        match self.read_char()? {
                            Some('\n') | None => {}
                            Some(next) => self.unread(next),
                        }
                        row.push(field);
                        return Ok(Some(row));
                    } else if c == self.quote && field.is_empty() {
                        // A quote opens a quoted region only at the start
                        // of a field. Elsewhere it is ordinary data.
                        state = State::InQuotedField;
                    } else {
                        field.push(c);
                    }
                }
            }
        }
    }

    /// Return a borrowing iterator over the rows of this reader.
    ///
    /// The iterator yields `Result<Vec<String>>` and stops after the final
    /// row. It is single pass: rows it consumes are gone for good.
    pub fn rows(&mut self) -> Rows<'_, R> {
        Rows { rdr: self }
    }

    /// Return an owning iterator over the rows of this reader.
    pub fn into_rows(self) -> RowsIntoIter<R> {
        RowsIntoIter { rdr: self }
    }

    /// Returns `true` once the input has been exhausted.
    ///
    /// When this returns `true`, `read_row` always returns `Ok(None)`.
    pub fn is_done(&self) -> bool {
        self.eof
    }

    /// Return the current line number as measured by the number of
    /// occurrences of `\n`, starting at `1`.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Unwrap this reader, returning the underlying reader.
    ///
    /// Note that buffered and pushed-back data is lost.
    pub fn into_inner(self) -> R {
        self.rdr.into_inner()
    }

    /// Read one character, draining the lookahead slot first.
    ///
    /// Returns `None` at end of stream.
    fn read_char(&mut self) -> Result<Option<char>> {
        if let Some(c) = self.lookahead.take() {
            return Ok(Some(c));
        }
        let first = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };
        let len = match utf8_len(first) {
            Some(len) => len,
            None => return Err(Error::Utf8 { line: self.line }),
        };
        let mut buf = [first, 0, 0, 0];
        for slot in buf[1..len].iter_mut() {
            *slot = match self.read_byte()? {
                Some(b) => b,
                None => return Err(Error::Utf8 { line: self.line }),
            };
        }
        let c = match str::from_utf8(&buf[..len]).ok().and_then(|s| s.chars().next()) {
            Some(c) => c,
            None => return Err(Error::Utf8 { line: self.line }),
        };
        if c == '\n' {
            self.line += 1;
        }
        Ok(Some(c))
    }

    /// Push a character back so that it is read again next time.
    fn unread(&mut self, c: char) {
        debug_assert!(self.lookahead.is_none());
        self.lookahead = Some(c);
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            return match self.rdr.read(&mut buf) {
                Ok(0) => Ok(None),
                Ok(_) => Ok(Some(buf[0])),
                Err(ref err) if err.kind() == io::ErrorKind::Interrupted => {
                    continue
                }
                Err(err) => Err(err),
            };
        }
    }
}

/// The number of bytes in the UTF-8 sequence introduced by `first`, if
/// `first` is a valid leading byte.
fn utf8_len(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// A borrowed iterator over the rows of a CSV reader.
///
/// The lifetime parameter `'r` refers to the lifetime of the underlying
/// reader.
pub struct Rows<'r, R: io::Read> {
    rdr: &'r mut Reader<R>,
}

impl<'r, R: io::Read> Iterator for Rows<'r, R> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Result<Vec<String>>> {
        self.rdr.read_row().transpose()
    }
}

/// An owned iterator over the rows of a CSV reader.
pub struct RowsIntoIter<R: io::Read> {
    rdr: Reader<R>,
}

impl<R: io::Read> Iterator for RowsIntoIter<R> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Result<Vec<String>>> {
        self.rdr.read_row().transpose()
    }
}
