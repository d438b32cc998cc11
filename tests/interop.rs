use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use csvlite::{Reader, ReaderBuilder, Writer, WriterBuilder};

const SEED: u64 = 42;
const NUM_ROWS: usize = 500;
const NUM_COLS: usize = 5;

/// A random field with some chance of embedded commas, quotes, newlines or
/// being empty, matching the shape of the synthetic benchmark data.
fn random_field(rng: &mut SmallRng) -> String {
    let base: String = (0..5)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect();
    match rng.gen_range(0..5) {
        0 => base,
        1 => format!("{},{}", base, base),
        2 => format!("{}\"{}", base, base),
        3 => format!("{}\n{}", base, base),
        _ => String::new(),
    }
}

fn random_rows() -> Vec<Vec<String>> {
    let mut rng = SmallRng::seed_from_u64(SEED);
    (0..NUM_ROWS)
        .map(|_| (0..NUM_COLS).map(|_| random_field(&mut rng)).collect())
        .collect()
}

fn tricky_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec!["a", "b,c", "d\"e", "f\ng"],
        vec!["", "", ""],
        vec!["a\r\nb", "lone\rcr", "\"quoted\""],
        vec!["é", "λ,μ", "∀x"],
        vec!["trailing", ""],
    ]
}

fn write_with_ours(rows: &[Vec<String>]) -> Vec<u8> {
    let mut wtr = Writer::from_writer(vec![]);
    wtr.write_rows(rows).unwrap();
    wtr.into_inner().unwrap()
}

fn read_with_ours(data: &[u8]) -> Vec<Vec<String>> {
    Reader::from_reader(data)
        .rows()
        .collect::<csvlite::Result<Vec<_>>>()
        .unwrap()
}

#[test]
fn roundtrip_tricky_rows() {
    let rows = tricky_rows();
    let mut wtr = Writer::from_writer(vec![]);
    wtr.write_rows(&rows).unwrap();
    let data = wtr.into_inner().unwrap();
    assert_eq!(read_with_ours(&data), rows);
}

#[test]
fn roundtrip_random_rows() {
    let rows = random_rows();
    let data = write_with_ours(&rows);
    assert_eq!(read_with_ours(&data), rows);
}

#[test]
fn roundtrip_semicolon_delimited() {
    let rows = vec![
        vec!["a;b".to_string(), "c,d".to_string()],
        vec!["'".to_string(), "".to_string()],
    ];

    let mut wtr = WriterBuilder::new()
        .delimiter(';')
        .quote('\'')
        .from_writer(vec![]);
    wtr.write_rows(&rows).unwrap();
    let data = wtr.into_inner().unwrap();

    let mut rdr = ReaderBuilder::new()
        .delimiter(';')
        .quote('\'')
        .from_reader(&data[..]);
    let got = rdr.rows().collect::<csvlite::Result<Vec<_>>>().unwrap();
    assert_eq!(got, rows);
}

#[test]
fn roundtrip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.csv");
    let rows = random_rows();

    let mut wtr = Writer::from_path(&path).unwrap();
    wtr.write_rows(&rows).unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut rdr = Reader::from_path(&path).unwrap();
    let got = rdr.rows().collect::<csvlite::Result<Vec<_>>>().unwrap();
    assert_eq!(got, rows);
}

// Output produced by the reference implementation must be valid input to
// this reader. Interoperability, not byte identity, is the contract.
#[test]
fn reads_reference_output() {
    let rows = random_rows();

    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in &rows {
        wtr.write_record(row).unwrap();
    }
    let data = wtr.into_inner().unwrap();

    assert_eq!(read_with_ours(&data), rows);
}

#[test]
fn reference_reads_our_output() {
    let rows = random_rows();
    let data = write_with_ours(&rows);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(&data[..]);
    let got: Vec<Vec<String>> = rdr
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    assert_eq!(got, rows);
}
