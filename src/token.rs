use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{self, Display};

lazy_static! {
    // parentheses are always tokens of their own, everything else is split on ASCII whitespace
    static ref TOKENIZER: Regex =
        Regex::new(r"[()]|[^\t\n\v\f\r ()]+").expect("tokenizer pattern is a valid regex");
}

/// The six operators understood by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpKind {
    Not,
    And,
    Or,
    Xor,
    Nand,
    Nor,
}

impl OpKind {
    pub const fn variants<'a>() -> &'a [Self] {
        &[
            Self::Not,
            Self::And,
            Self::Or,
            Self::Xor,
            Self::Nand,
            Self::Nor,
        ]
    }

    /// Look up an operator by its (upper-case) keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "NOT" => Some(Self::Not),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "XOR" => Some(Self::Xor),
            "NAND" => Some(Self::Nand),
            "NOR" => Some(Self::Nor),
            _ => None,
        }
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Nand => "NAND",
            Self::Nor => "NOR",
        }
    }

    pub const fn is_unary(self) -> bool {
        matches!(self, Self::Not)
    }

    /// Apply a binary operator, `a` being the left-hand operand.
    ///
    /// [`OpKind::Not`] ignores `a` and negates `b`.
    pub const fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Self::Not => !b,
            Self::And => a && b,
            Self::Or => a || b,
            Self::Xor => a ^ b,
            Self::Nand => !(a && b),
            Self::Nor => !(a || b),
        }
    }
}

impl Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Variable(char),
    Literal(bool),
    Operator(OpKind),
    LeftParen,
    RightParen,
    /// Text that is neither a keyword, a literal nor a single-letter variable.
    /// It is carried along untouched and rejected during evaluation.
    Word(String),
}

impl Token {
    /// Classify a single lexeme. The lexeme is expected to be upper-cased already.
    pub fn from_word(word: &str) -> Self {
        match word {
            "(" => Self::LeftParen,
            ")" => Self::RightParen,
            "0" => Self::Literal(false),
            "1" => Self::Literal(true),
            _ => {
                if let Some(op) = OpKind::from_keyword(word) {
                    return Self::Operator(op);
                }

                let mut chars = word.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => Self::Variable(c),
                    _ => Self::Word(word.to_string()),
                }
            }
        }
    }

    pub const fn operator(&self) -> Option<OpKind> {
        match self {
            Self::Operator(op) => Some(*op),
            _ => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(c) => write!(f, "{c}"),
            Self::Literal(true) => f.write_str("1"),
            Self::Literal(false) => f.write_str("0"),
            Self::Operator(op) => Display::fmt(op, f),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
            Self::Word(w) => f.write_str(w),
        }
    }
}

/// Split an expression into tokens.
///
/// ASCII letters are upper-cased first, so keywords and variables are case-insensitive.
/// Tokenization never fails: anything unrecognized ends up as a [`Token::Word`].
pub fn tokenize(input: &str) -> Vec<Token> {
    let normalized = input.to_ascii_uppercase();

    TOKENIZER
        .find_iter(&normalized)
        .map(|m| Token::from_word(m.as_str()))
        .collect()
}

/// Space-joined textual form of a token sequence.
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens.iter().join(" ")
}
