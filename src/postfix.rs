use crate::token::{OpKind, Token};
use log::debug;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Precedence and associativity of every operator.
///
/// Higher precedence binds tighter. The table is built once and only read afterwards.
#[derive(Debug, Clone)]
pub struct OperatorTable {
    entries: FxHashMap<OpKind, (u8, Associativity)>,
}

impl OperatorTable {
    pub fn new<I: IntoIterator<Item = (OpKind, (u8, Associativity))>>(entries: I) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Operators missing from the table have precedence 0.
    pub fn precedence(&self, op: OpKind) -> u8 {
        self.entries.get(&op).map_or(0, |(p, _)| *p)
    }

    pub fn associativity(&self, op: OpKind) -> Associativity {
        self.entries
            .get(&op)
            .map_or(Associativity::Left, |(_, a)| *a)
    }

    fn pops_before(&self, top: OpKind, incoming: OpKind) -> bool {
        let (p_top, p_in) = (self.precedence(top), self.precedence(incoming));

        p_top > p_in || (p_top == p_in && self.associativity(incoming) == Associativity::Left)
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::new([
            (OpKind::Not, (3, Associativity::Right)),
            (OpKind::And, (2, Associativity::Left)),
            (OpKind::Nand, (2, Associativity::Left)),
            (OpKind::Or, (1, Associativity::Left)),
            (OpKind::Nor, (1, Associativity::Left)),
            (OpKind::Xor, (1, Associativity::Left)),
        ])
    }
}

/// Shunting-yard conversion from infix to postfix order.
#[derive(Debug, Clone, Default)]
pub struct PostfixConverter {
    table: OperatorTable,
}

impl PostfixConverter {
    pub const fn new(table: OperatorTable) -> Self {
        Self { table }
    }

    pub const fn table(&self) -> &OperatorTable {
        &self.table
    }

    /// Convert an infix token sequence to postfix.
    ///
    /// Unbalanced parentheses are tolerated: an unmatched `)` is dropped,
    /// and unmatched `(` are discarded when the input is exhausted.
    pub fn convert(&self, tokens: &[Token]) -> Vec<Token> {
        let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
        let mut ops: Vec<Token> = Vec::new();

        for token in tokens {
            match token {
                Token::LeftParen => ops.push(Token::LeftParen),
                Token::RightParen => loop {
                    match ops.pop() {
                        Some(Token::LeftParen) => break,
                        Some(op) => output.push(op),
                        None => {
                            debug!("dropping unmatched closing parenthesis");
                            break;
                        }
                    }
                },
                Token::Operator(incoming) => {
                    while let Some(top) = ops.last().and_then(Token::operator) {
                        if !self.table.pops_before(top, *incoming) {
                            break;
                        }
                        output.push(Token::Operator(top));
                        ops.pop();
                    }
                    ops.push(token.clone());
                }
                other => output.push(other.clone()),
            }
        }

        while let Some(op) = ops.pop() {
            if op == Token::LeftParen {
                debug!("dropping unmatched opening parenthesis");
            } else {
                output.push(op);
            }
        }

        output
    }
}

/// Convert using the default operator table.
pub fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    PostfixConverter::default().convert(tokens)
}
