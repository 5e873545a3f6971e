use clap::Parser;
use log::{debug, LevelFilter};
use rstruth::expr_tree::ExprTree;
use rstruth::table::DEFAULT_MAX_VARIABLES;
use rstruth::table_io::{write_csv, write_table};
use rstruth::{join_tokens, ResultFilter, Row, TableOptions, TableSummary, TruthTable};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::fs::File;
use std::io;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(value_parser, value_name = "EXPRESSION")]
    /// The boolean expression, e.g. "a and (b xor not c)"; read from stdin if not provided
    expression: Option<String>,

    #[clap(value_parser, short, long, value_name = "FILE")]
    /// The output filename (or stdout if not provided)
    output: Option<PathBuf>,

    #[clap(long)]
    /// Output the table as comma separated values
    csv: bool,

    #[clap(short, long)]
    /// Evaluate the rows in parallel
    parallel: bool,

    #[clap(long, value_name = "N", env = "RSTRUTH_MAX_VARS", default_value_t = DEFAULT_MAX_VARIABLES)]
    /// Refuse expressions with more than N distinct variables
    max_vars: usize,

    #[clap(short, long, value_name = "FILTER", default_value = "any")]
    /// Only print rows evaluating to true, false or any (failed rows are only shown for any)
    filter: ResultFilter,

    #[clap(long)]
    /// Print the postfix form of the expression before the table
    postfix: bool,

    #[clap(long, value_parser, value_name = "FILE")]
    /// Write the parse tree in dot (GraphViz) format to FILE
    dot: Option<PathBuf>,

    #[clap(short, long)]
    /// Report whether the expression is a tautology, a contradiction or satisfiable
    summary: bool,

    #[clap(short, long, action = clap::ArgAction::Count)]
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    verbose: u8,
}

const fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn prompt_expression() -> io::Result<String> {
    print!("Enter a boolean expression: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(line.trim_end().to_string())
}

fn emit<W: Write, I: IntoIterator<Item = Row>>(
    table: &TruthTable,
    rows: I,
    csv: bool,
    writer: &mut W,
) -> io::Result<()> {
    if csv {
        write_csv(table, rows, writer)
    } else {
        writeln!(writer, "\nTruth Table:")?;
        write_table(table, rows, writer)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse_from(argfile::expand_args_from(
        wild::args_os(),
        argfile::parse_fromfile,
        argfile::PREFIX,
    )?);

    TermLogger::init(
        log_level(args.verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let expression = match args.expression {
        Some(expression) => expression,
        None => prompt_expression()?,
    };
    debug!("expression: {expression:?}");

    let options = TableOptions {
        max_variables: args.max_vars,
        parallel: args.parallel,
        filter: args.filter,
    };

    let table = TruthTable::with_options(&expression, &options)?;

    let mut writer = if let Some(output_file) = args.output {
        let file = File::create(output_file)?;
        Box::new(BufWriter::new(file)) as Box<dyn Write>
    } else {
        Box::new(BufWriter::new(io::stdout())) as Box<dyn Write>
    };

    if args.postfix {
        writeln!(writer, "Postfix: {}", join_tokens(&table.postfix()))?;
    }

    if let Some(dot_file) = args.dot {
        let tree = ExprTree::from_postfix(&table.postfix())
            .map_err(|e| anyhow::anyhow!("cannot build parse tree: {e}"))?;
        let mut dot_writer = BufWriter::new(File::create(dot_file)?);
        tree.render_dot(&mut dot_writer)?;
        dot_writer.flush()?;
    }

    let mut summary = TableSummary::default();
    emit(&table, table.summarized_rows(&mut summary), args.csv, &mut writer)?;

    if args.summary {
        writeln!(writer, "\nThe expression is {}", summary.verdict())?;
    }

    // flush the writer before dropping it
    writer.flush()?;

    Ok(())
}
