use pretty_assertions::assert_eq;
use rstruth::table_io::write_table;
use rstruth::TruthTable;
use std::fs;
use std::path::Path;

fn file_assert_all<P: AsRef<Path>>(file: P, expected: bool) {
    let expression = fs::read_to_string(file).expect("Could not read input file");
    let table = TruthTable::new(&expression).expect("Could not build truth table");

    for row in table.rows() {
        assert_eq!(row.result, Ok(expected), "row {}", row.index);
    }
}

#[test]
fn test_files_true() {
    let files: Vec<_> = glob::glob("tests/data/*_is_true.txt").unwrap().collect();
    assert!(!files.is_empty());

    for file in files {
        let f = file.unwrap();
        println!("testing {}", f.display());
        file_assert_all(f, true);
    }
}

#[test]
fn test_files_false() {
    let files: Vec<_> = glob::glob("tests/data/*_is_false.txt").unwrap().collect();
    assert!(!files.is_empty());

    for file in files {
        let f = file.unwrap();
        println!("testing {}", f.display());
        file_assert_all(f, false);
    }
}

#[test]
fn test_console_output() {
    let table = TruthTable::new("a and (b or not c)").unwrap();
    let mut out: Vec<u8> = Vec::new();
    write_table(&table, table.rows(), &mut out).unwrap();

    let expected = "\
A B C | Result
---------------
0 0 0 | 0
0 0 1 | 0
0 1 0 | 0
0 1 1 | 0
1 0 0 | 1
1 0 1 | 0
1 1 0 | 1
1 1 1 | 1
";

    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn test_console_output_with_failures() {
    // "a and" fails for every row, but every row is still printed
    let table = TruthTable::new("a and").unwrap();
    let mut out: Vec<u8> = Vec::new();
    write_table(&table, table.rows(), &mut out).unwrap();

    let expected = "\
A | Result
-----------
0 | Error: Invalid expression
1 | Error: Invalid expression
";

    assert_eq!(String::from_utf8(out).unwrap(), expected);
}
