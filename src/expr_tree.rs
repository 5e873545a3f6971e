extern crate dot;

use std::io;
use std::io::Write;
use std::mem;

use crate::eval::EvalError;
use crate::token::{OpKind, Token};

/// Expression tree rebuilt from a postfix sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprTree {
    Leaf(Token),
    Unary(OpKind, Box<ExprTree>),
    Binary(OpKind, Box<ExprTree>, Box<ExprTree>),
}

type GraphNode = usize;
type GraphEdge = (usize, String, usize);

impl ExprTree {
    /// Build the tree with the same stack discipline as the evaluator,
    /// except that variables are kept as leaves.
    pub fn from_postfix(postfix: &[Token]) -> Result<Self, EvalError> {
        let mut stack: Vec<Self> = Vec::new();

        for token in postfix {
            match token {
                Token::Literal(_) | Token::Variable(_) => stack.push(Self::Leaf(token.clone())),
                Token::Operator(op) if op.is_unary() => {
                    let a = stack.pop().ok_or(EvalError::InvalidExpression)?;
                    stack.push(Self::Unary(*op, Box::new(a)));
                }
                Token::Operator(op) => {
                    let b = stack.pop().ok_or(EvalError::InvalidExpression)?;
                    let a = stack.pop().ok_or(EvalError::InvalidExpression)?;
                    stack.push(Self::Binary(*op, Box::new(a), Box::new(b)));
                }
                other => return Err(EvalError::UnknownOperator(other.to_string())),
            }
        }

        match (stack.pop(), stack.is_empty()) {
            (Some(root), true) => Ok(root),
            _ => Err(EvalError::MalformedExpression),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Leaf(token) => token.to_string(),
            Self::Unary(op, _) | Self::Binary(op, _, _) => op.to_string(),
        }
    }

    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&Self, usize)> = vec![(self, 1)];

        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            match node {
                Self::Leaf(_) => {}
                Self::Unary(_, a) => pending.push((a.as_ref(), depth + 1)),
                Self::Binary(_, a, b) => {
                    pending.push((a.as_ref(), depth + 1));
                    pending.push((b.as_ref(), depth + 1));
                }
            }
        }

        deepest
    }

    fn take_children(&mut self, into: &mut Vec<Self>) {
        let placeholder = || Self::Leaf(Token::Literal(false));
        match self {
            Self::Leaf(_) => {}
            Self::Unary(_, a) => into.push(mem::replace(a.as_mut(), placeholder())),
            Self::Binary(_, a, b) => {
                into.push(mem::replace(a.as_mut(), placeholder()));
                into.push(mem::replace(b.as_mut(), placeholder()));
            }
        }
    }

    pub fn render_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        dot::render(&ParseTreeGraph::new(self), writer)
    }
}

// deep operator chains would otherwise be dropped recursively
impl Drop for ExprTree {
    fn drop(&mut self) {
        let mut pending: Vec<Self> = Vec::new();
        self.take_children(&mut pending);

        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

/// Flattened view of an [`ExprTree`] for the dot renderer; node 0 is the root.
pub struct ParseTreeGraph {
    labels: Vec<String>,
    edges: Vec<GraphEdge>,
}

impl ParseTreeGraph {
    pub fn new(root: &ExprTree) -> Self {
        let mut labels: Vec<String> = Vec::new();
        let mut edges: Vec<GraphEdge> = Vec::new();

        // pre-order walk: each entry carries the parent id and the edge label
        let mut pending: Vec<(&ExprTree, Option<(usize, &str)>)> = vec![(root, None)];

        while let Some((node, parent)) = pending.pop() {
            let id = labels.len();
            labels.push(node.label());

            if let Some((parent, label)) = parent {
                edges.push((parent, label.to_string(), id));
            }

            match node {
                ExprTree::Leaf(_) => {}
                ExprTree::Unary(_, a) => pending.push((a.as_ref(), Some((id, "")))),
                ExprTree::Binary(_, l, r) => {
                    pending.push((r.as_ref(), Some((id, "R"))));
                    pending.push((l.as_ref(), Some((id, "L"))));
                }
            }
        }

        Self { labels, edges }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<'a> dot::Labeller<'a, GraphNode, GraphEdge> for ParseTreeGraph {
    fn graph_id(&self) -> dot::Id<'a> {
        dot::Id::new("parse_tree").expect("cannot create Id named 'parse_tree'")
    }

    fn node_id(&self, n: &GraphNode) -> dot::Id<'a> {
        dot::Id::new(format!("n_{}", n))
            .unwrap_or_else(|_| panic!("cannot create Id named 'n_{n}'"))
    }

    fn node_label(&self, n: &GraphNode) -> dot::LabelText<'a> {
        dot::LabelText::label(self.labels[*n].clone())
    }

    fn edge_label(&self, e: &GraphEdge) -> dot::LabelText<'a> {
        dot::LabelText::label(e.1.clone())
    }
}

impl<'a> dot::GraphWalk<'a, GraphNode, GraphEdge> for ParseTreeGraph {
    fn nodes(&self) -> dot::Nodes<'a, GraphNode> {
        (0..self.labels.len()).collect()
    }

    fn edges(&self) -> dot::Edges<'a, GraphEdge> {
        self.edges.clone().into()
    }

    fn source(&self, e: &GraphEdge) -> GraphNode {
        e.0
    }

    fn target(&self, e: &GraphEdge) -> GraphNode {
        e.2
    }
}
