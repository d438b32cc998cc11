/*!
A from-scratch streaming CSV reader and writer.

The reader pulls characters from an underlying stream one at a time and
produces rows lazily, one [`read_row`](Reader::read_row) call (or iterator
step) per row, with a single character of lookahead and no whole-file
buffering. The writer renders one row per [`write_row`](Writer::write_row)
call, quoting fields only when their content requires it and escaping quotes
by doubling them.

Parsing is deliberately lenient: there is no malformed-input error. Stray
quotes are given a deterministic interpretation, an unterminated quoted field
is closed implicitly at end of stream, and `\n`, `\r\n` and a lone `\r` all
terminate a row. The only errors that can occur come from the underlying
stream.

# Example

```rust
use csvlite::{Reader, Writer};

let rows = vec![
    vec!["name", "place"],
    vec!["jordan", "\"whiterun\""],
];

let mut wtr = Writer::from_writer(vec![]);
wtr.write_rows(&rows).unwrap();
let data = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
assert_eq!(data, "name,place\njordan,\"\"\"whiterun\"\"\"\n");

let mut rdr = Reader::from_reader(data.as_bytes());
let got = rdr.rows().collect::<csvlite::Result<Vec<_>>>().unwrap();
assert_eq!(got, rows);
```

Delimiters, quote characters and record terminators are configured at
construction time through [`ReaderBuilder`] and [`WriterBuilder`].
*/

pub use crate::error::{Error, Result};
pub use crate::field::ToField;
pub use crate::reader::{Reader, ReaderBuilder, Rows, RowsIntoIter};
pub use crate::writer::{Terminator, Writer, WriterBuilder};

mod error;
mod field;
mod reader;
mod writer;
