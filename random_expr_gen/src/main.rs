use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

const BINARY_OPERATORS: &[&str] = &["and", "or", "xor", "nand", "nor"];

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(value_parser, value_name = "VARIABLES")]
    /// The number of distinct variables (at most 26)
    variables: usize,

    #[clap(value_parser, value_name = "OPERATORS")]
    /// The number of binary operators in each expression
    operators: usize,

    #[clap(value_parser, short, long, value_name = "FILE")]
    /// The output filename (or stdout if not provided)
    output: Option<PathBuf>,

    #[clap(short = 'n', long, default_value_t = 1)]
    /// The number of expressions to generate, one per line
    count: usize,

    #[clap(long, default_value_t = 0.25)]
    /// Probability of negating a sub-expression
    negate: f64,

    #[clap(long)]
    /// Seed for reproducible output
    seed: Option<u64>,
}

fn generate_expression<R: Rng>(
    rng: &mut R,
    vars: &[char],
    operators: usize,
    negate: f64,
) -> anyhow::Result<String> {
    let expr = if operators == 0 {
        vars.choose(rng)
            .map(char::to_string)
            .ok_or_else(|| anyhow::anyhow!("Cannot generate an expression without variables"))?
    } else {
        // distribute the remaining operators over both operands
        let left_ops = rng.gen_range(0..operators);
        let left = generate_expression(rng, vars, left_ops, negate)?;
        let right = generate_expression(rng, vars, operators - 1 - left_ops, negate)?;
        let op = BINARY_OPERATORS
            .choose(rng)
            .ok_or_else(|| anyhow::anyhow!("No binary operators available"))?;

        format!("({left} {op} {right})")
    };

    if rng.gen_bool(negate) {
        Ok(format!("not {expr}"))
    } else {
        Ok(expr)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.variables == 0 || args.variables > 26 {
        Err(anyhow::anyhow!(
            "The number of variables must be between 1 and 26"
        ))?
    }

    if !(0.0..=1.0).contains(&args.negate) {
        Err(anyhow::anyhow!("The negation probability must be in [0, 1]"))?
    }

    let vars: Vec<char> = ('a'..='z').take(args.variables).collect();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut writer = if let Some(output_file) = args.output {
        let file = File::create(output_file)?;
        Box::new(BufWriter::new(file)) as Box<dyn Write>
    } else {
        Box::new(BufWriter::new(io::stdout())) as Box<dyn Write>
    };

    for _ in 0..args.count {
        let expr = generate_expression(&mut rng, &vars, args.operators, args.negate)?;
        writeln!(writer, "{expr}")?;
    }

    // flush the writer before dropping it
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_count() -> anyhow::Result<()> {
        let mut rng = StdRng::seed_from_u64(7);
        let expr = generate_expression(&mut rng, &['a', 'b', 'c'], 5, 0.0)?;

        let ops = expr
            .split_whitespace()
            .map(|w| w.trim_matches(|c| c == '(' || c == ')'))
            .filter(|w| BINARY_OPERATORS.contains(w))
            .count();
        assert_eq!(ops, 5);
        assert_eq!(expr.matches('(').count(), expr.matches(')').count());

        Ok(())
    }

    #[test]
    fn test_single_variable() -> anyhow::Result<()> {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate_expression(&mut rng, &['a'], 0, 0.0)?, "a");
        assert_eq!(generate_expression(&mut rng, &['a'], 0, 1.0)?, "not a");
        assert!(generate_expression(&mut rng, &[], 0, 0.0).is_err());
        Ok(())
    }
}
