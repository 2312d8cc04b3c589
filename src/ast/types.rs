//! Type annotations as written in source.
//!
//! The front end only records annotations (`int`, `string[]`); resolving
//! them to concrete types is left to later passes.

use std::fmt::Display;

use crate::{Position, Span};

use super::ast::Node;

#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotation {
    /// A type referenced by name, e.g. `int`.
    Named { name: String, span: Span },
    /// `T[]`
    Array {
        element: Box<TypeAnnotation>,
        span: Span,
    },
}

impl TypeAnnotation {
    /// The innermost named type, `int` for `int[][]`.
    pub fn base_name(&self) -> &str {
        match self {
            TypeAnnotation::Named { name, .. } => name,
            TypeAnnotation::Array { element, .. } => element.base_name(),
        }
    }

    pub fn span_to(&self, end: Position) -> Span {
        Span::new(Node::span(self).start, end)
    }

    pub fn array_depth(&self) -> usize {
        match self {
            TypeAnnotation::Named { .. } => 0,
            TypeAnnotation::Array { element, .. } => element.array_depth() + 1,
        }
    }
}

impl Node for TypeAnnotation {
    fn token_literal(&self) -> String {
        self.base_name().to_string()
    }

    fn to_string_indent(&self, _level: usize) -> String {
        match self {
            TypeAnnotation::Named { name, .. } => name.clone(),
            TypeAnnotation::Array { element, .. } => format!("{}[]", element.to_string_indent(0)),
        }
    }

    fn span(&self) -> Span {
        match self {
            TypeAnnotation::Named { span, .. } | TypeAnnotation::Array { span, .. } => *span,
        }
    }
}

impl Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_indent(0))
    }
}
