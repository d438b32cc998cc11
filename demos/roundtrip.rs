//! Writes a few awkward rows, prints the CSV text, then parses it back.
//!
//! Run with `cargo run --example roundtrip`.

use csvlite::{Reader, Writer};

fn main() {
    let rows = vec![
        vec!["a", "b", "c"],
        vec!["hello,world", "2", "3"],
        vec!["line1\nline2", "x", "y\"z"],
        vec!["", "", "empty"],
    ];

    let mut wtr = Writer::from_writer(vec![]);
    wtr.write_rows(&rows).unwrap();
    let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

    println!("Written CSV:");
    println!("{}", text);

    println!("Parsed back:");
    let mut rdr = Reader::from_reader(text.as_bytes());
    for row in rdr.rows() {
        println!("{:?}", row.unwrap());
    }
}
