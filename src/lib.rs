#![warn(clippy::disallowed_types)]

pub use eval::{evaluate_postfix, EvalError};
pub use postfix::{to_postfix, Associativity, OperatorTable, PostfixConverter};
pub use table::{ResultFilter, Row, TableError, TableOptions, TableSummary, TruthTable};
pub use token::{join_tokens, tokenize, OpKind, Token};

pub mod eval;
pub mod expr_tree;
pub mod postfix;
pub mod table;
pub mod table_io;
pub mod token;
