use crate::eval::{evaluate_postfix, EvalError};
use crate::postfix::PostfixConverter;
use crate::token::{tokenize, Token};
use itertools::Itertools;
use log::{info, warn};
use rayon::prelude::*;
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Upper bound on the number of variables a table is generated for (2^24 rows).
pub const DEFAULT_MAX_VARIABLES: usize = 24;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("expression contains {found} variables, at most {max} are supported")]
    TooManyVariables { found: usize, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Selection of truth-table rows by their result.
///
/// [`True`] keeps the rows evaluating to 1, [`False`] those evaluating to 0.
/// [`Any`] keeps every row, including the rows that failed to evaluate.
///
/// [`Any`]: ResultFilter::Any
/// [`True`]: ResultFilter::True
/// [`False`]: ResultFilter::False
pub enum ResultFilter {
    True,
    False,
    #[default]
    Any,
}

impl ResultFilter {
    const fn variants<'a>() -> &'a [Self] {
        &[Self::True, Self::False, Self::Any]
    }

    fn matches_str(&self, s: &str) -> bool {
        match self {
            Self::True => matches!(s, "true" | "True" | "t" | "T" | "1"),
            Self::False => matches!(s, "false" | "False" | "f" | "F" | "0"),
            Self::Any => matches!(s, "any" | "Any" | "a" | "A" | "*"),
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Self::True => row.result == Ok(true),
            Self::False => row.result == Ok(false),
            Self::Any => true,
        }
    }
}

impl Display for ResultFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::True => "true",
            Self::False => "false",
            Self::Any => "any",
        })
    }
}

impl FromStr for ResultFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .find(|variant| variant.matches_str(s))
            .ok_or_else(|| anyhow::anyhow!("cannot parse {s} as result filter"))
            .copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub max_variables: usize,
    /// Evaluate rows on the rayon thread pool instead of one by one.
    pub parallel: bool,
    pub filter: ResultFilter,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            max_variables: DEFAULT_MAX_VARIABLES,
            parallel: false,
            filter: ResultFilter::Any,
        }
    }
}

/// One assignment of the table together with the outcome of evaluating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub index: usize,
    /// Values in the order of [`TruthTable::vars`].
    pub assignment: Vec<bool>,
    pub result: Result<bool, EvalError>,
}

/// Row counts of an evaluated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableSummary {
    pub rows: usize,
    pub true_rows: usize,
    pub false_rows: usize,
    pub failed_rows: usize,
}

impl TableSummary {
    pub fn record(&mut self, row: &Row) {
        self.rows += 1;
        match row.result {
            Ok(true) => self.true_rows += 1,
            Ok(false) => self.false_rows += 1,
            Err(_) => self.failed_rows += 1,
        }
    }

    /// Failed rows count as not true.
    pub const fn is_tautology(&self) -> bool {
        self.rows > 0 && self.true_rows == self.rows
    }

    pub const fn is_contradiction(&self) -> bool {
        self.true_rows == 0
    }

    pub const fn is_satisfiable(&self) -> bool {
        self.true_rows > 0
    }

    pub const fn verdict(&self) -> &'static str {
        if self.is_tautology() {
            "a tautology"
        } else if self.is_satisfiable() {
            "satisfiable"
        } else {
            "a contradiction"
        }
    }
}

/// Sorted, distinct variables of a token sequence.
pub fn variables(tokens: &[Token]) -> Vec<char> {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Variable(v) => Some(*v),
            _ => None,
        })
        .sorted()
        .dedup()
        .collect()
}

/// Bits of `row` from the most significant (bit `num_vars - 1`) to the least significant.
pub fn assignment(row: usize, num_vars: usize) -> Vec<bool> {
    (0..num_vars)
        .map(|j| (row >> (num_vars - j - 1)) & 1 == 1)
        .collect()
}

/// Replace every variable by the literal it is bound to.
pub fn substitute(tokens: &[Token], vars: &[char], values: &[bool]) -> Vec<Token> {
    tokens
        .iter()
        .map(|t| match t {
            Token::Variable(v) => vars
                .iter()
                .position(|w| w == v)
                .and_then(|i| values.get(i))
                .map_or_else(|| t.clone(), |value| Token::Literal(*value)),
            other => other.clone(),
        })
        .collect()
}

/// Truth table of a single expression. Rows are evaluated on demand.
#[derive(Debug, Clone)]
pub struct TruthTable {
    tokens: Vec<Token>,
    vars: Vec<char>,
    converter: PostfixConverter,
    options: TableOptions,
}

impl TruthTable {
    pub fn new(expression: &str) -> Result<Self, TableError> {
        Self::with_options(expression, &TableOptions::default())
    }

    pub fn with_options(expression: &str, options: &TableOptions) -> Result<Self, TableError> {
        Self::from_tokens(tokenize(expression), options, PostfixConverter::default())
    }

    pub fn from_tokens(
        tokens: Vec<Token>,
        options: &TableOptions,
        converter: PostfixConverter,
    ) -> Result<Self, TableError> {
        let vars = variables(&tokens);

        // the row index must fit in a usize
        let max = options.max_variables.min(usize::BITS as usize - 1);
        if vars.len() > max {
            return Err(TableError::TooManyVariables {
                found: vars.len(),
                max,
            });
        }

        info!(
            "generating truth table over {} variable(s), {} row(s)",
            vars.len(),
            1usize << vars.len()
        );

        Ok(Self {
            tokens,
            vars,
            converter,
            options: options.clone(),
        })
    }

    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn vars(&self) -> &[char] {
        &self.vars
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Postfix form of the expression before substitution.
    pub fn postfix(&self) -> Vec<Token> {
        self.converter.convert(&self.tokens)
    }

    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    pub fn num_rows(&self) -> usize {
        1 << self.vars.len()
    }

    pub fn row(&self, index: usize) -> Row {
        let values = assignment(index, self.num_vars());
        let substituted = substitute(&self.tokens, &self.vars, &values);
        let result = evaluate_postfix(&self.converter.convert(&substituted));

        if let Err(e) = &result {
            warn!("row {index}: {e}");
        }

        Row {
            index,
            assignment: values,
            result,
        }
    }

    /// Rows in canonical order, evaluated lazily.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        (0..self.num_rows()).map(move |i| self.row(i))
    }

    /// All rows in canonical order, evaluated in parallel.
    pub fn par_rows(&self) -> Vec<Row> {
        (0..self.num_rows())
            .into_par_iter()
            .map(|i| self.row(i))
            .collect()
    }

    /// Every row in canonical order, evaluated in parallel when the options ask for it.
    pub fn evaluated_rows(&self) -> Box<dyn Iterator<Item = Row> + '_> {
        if self.options.parallel {
            Box::new(self.par_rows().into_iter())
        } else {
            Box::new(self.rows())
        }
    }

    /// The rows passing the configured [`ResultFilter`].
    pub fn selected_rows(&self) -> impl Iterator<Item = Row> + '_ {
        let filter = self.options.filter;
        self.evaluated_rows().filter(move |r| filter.matches(r))
    }

    /// Like [`TruthTable::selected_rows`], but every evaluated row, including the ones
    /// filtered out, is recorded in `summary` as the iterator advances.
    pub fn summarized_rows<'a>(
        &'a self,
        summary: &'a mut TableSummary,
    ) -> impl Iterator<Item = Row> + 'a {
        let filter = self.options.filter;
        self.evaluated_rows()
            .inspect(move |r| summary.record(r))
            .filter(move |r| filter.matches(r))
    }

    pub fn summary(&self) -> TableSummary {
        let mut summary = TableSummary::default();
        self.evaluated_rows().for_each(|r| summary.record(&r));
        summary
    }

    pub fn is_tautology(&self) -> bool {
        self.summary().is_tautology()
    }

    pub fn is_contradiction(&self) -> bool {
        self.summary().is_contradiction()
    }

    pub fn is_satisfiable(&self) -> bool {
        self.summary().is_satisfiable()
    }
}
