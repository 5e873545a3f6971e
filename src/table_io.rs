use std::io;
use std::io::Write;

use itertools::Itertools;

use crate::table::{Row, TruthTable};

const RESULT_HEADER: &str = "Result";

fn bit(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn result_cell(row: &Row) -> String {
    match &row.result {
        Ok(value) => bit(*value).to_string(),
        Err(e) => format!("Error: {e}"),
    }
}

/// Write the table in console layout:
///
/// ```text
/// A B | Result
/// -------------
/// 0 0 | 0
/// ```
pub fn write_table<W: Write, I: IntoIterator<Item = Row>>(
    table: &TruthTable,
    rows: I,
    writer: &mut W,
) -> io::Result<()> {
    for var in table.vars() {
        write!(writer, "{var} ")?;
    }
    writeln!(writer, "| {RESULT_HEADER}")?;
    writeln!(writer, "{}", "-".repeat(table.num_vars() * 2 + 9))?;

    for row in rows {
        for value in &row.assignment {
            write!(writer, "{} ", bit(*value))?;
        }
        writeln!(writer, "| {}", result_cell(&row))?;
    }

    Ok(())
}

/// Write the table as comma separated values with a `Result` column.
pub fn write_csv<W: Write, I: IntoIterator<Item = Row>>(
    table: &TruthTable,
    rows: I,
    writer: &mut W,
) -> io::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    let header = table
        .vars()
        .iter()
        .map(char::to_string)
        .chain([RESULT_HEADER.to_string()])
        .collect_vec();
    csv_writer.write_record(&header)?;

    for row in rows {
        let record = row
            .assignment
            .iter()
            .map(|v| bit(*v).to_string())
            .chain([result_cell(&row)])
            .collect_vec();
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(expr: &str) -> String {
        let table = TruthTable::new(expr).expect("table");
        let mut out: Vec<u8> = Vec::new();
        write_table(&table, table.rows(), &mut out).expect("write");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn test_console_layout() {
        assert_eq!(
            render("a and b"),
            "A B | Result\n\
             -------------\n\
             0 0 | 0\n\
             0 1 | 0\n\
             1 0 | 0\n\
             1 1 | 1\n"
        );
    }

    #[test]
    fn test_constant_layout() {
        assert_eq!(render("not 0"), "| Result\n---------\n| 1\n");
    }

    #[test]
    fn test_error_rows() {
        assert_eq!(
            render("a &"),
            "A | Result\n\
             -----------\n\
             0 | Error: Unknown operator: &\n\
             1 | Error: Unknown operator: &\n"
        );
    }

    #[test]
    fn test_csv() {
        let table = TruthTable::new("x nor y").expect("table");
        let mut out: Vec<u8> = Vec::new();
        write_csv(&table, table.rows(), &mut out).expect("write");

        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "X,Y,Result\n0,0,1\n0,1,0\n1,0,0\n1,1,0\n"
        );
    }
}
