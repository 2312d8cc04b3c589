use std::slice::Iter;

use crate::Span;

use super::{
    ast::{impl_display_via_node, indent, render_body, Expr, Node, Stmt},
    expressions::Identifier,
    types::TypeAnnotation,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl BlockStatement {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.statements.iter()
    }
    pub fn len(&self) -> usize {
        self.statements.len()
    }
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Node for BlockStatement {
    fn token_literal(&self) -> String {
        String::from("{")
    }

    fn to_string_indent(&self, level: usize) -> String {
        if self.statements.is_empty() {
            return String::from("{}");
        }

        format!(
            "{{\n{}{}}}",
            render_body(&self.statements, level + 1),
            indent(level)
        )
    }

    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expr,
    pub span: Span,
}

impl Node for ExpressionStatement {
    fn token_literal(&self) -> String {
        self.expression.token_literal()
    }

    fn to_string_indent(&self, level: usize) -> String {
        format!("{};", self.expression.to_string_indent(level))
    }

    fn span(&self) -> Span {
        self.span
    }
}

/// `let name [(Type)] [= value]`
///
/// Also used for class fields. Outside of a class a binding without a value
/// always carries a type annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub name: Identifier,
    pub type_annotation: Option<TypeAnnotation>,
    pub value: Option<Expr>,
    pub span: Span,
}

impl LetStatement {
    /// The binding without its terminating `;`.
    pub fn render_binding(&self, level: usize) -> String {
        format!("let {}", self.render_field(level))
    }

    /// `name [(Type)] [= value]`, the spelling of a class field.
    pub fn render_field(&self, level: usize) -> String {
        let mut out = self.name.value.clone();

        if let Some(type_annotation) = &self.type_annotation {
            out.push_str(&format!(" ({})", type_annotation));
        }
        if let Some(value) = &self.value {
            out.push_str(&format!(" = {}", value.to_string_indent(level)));
        }

        out
    }
}

impl Node for LetStatement {
    fn token_literal(&self) -> String {
        String::from("let")
    }

    fn to_string_indent(&self, level: usize) -> String {
        format!("{};", self.render_binding(level))
    }

    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expr>,
    pub span: Span,
}

impl Node for ReturnStatement {
    fn token_literal(&self) -> String {
        String::from("return")
    }

    fn to_string_indent(&self, level: usize) -> String {
        match &self.value {
            Some(value) => format!("return {};", value.to_string_indent(level)),
            None => String::from("return;"),
        }
    }

    fn span(&self) -> Span {
        self.span
    }
}

/// `import "path";` or `import name;`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStatement {
    pub path: String,
    pub span: Span,
}

impl Node for ImportStatement {
    fn token_literal(&self) -> String {
        String::from("import")
    }

    fn to_string_indent(&self, _level: usize) -> String {
        format!("import \"{}\";", super::expressions::escape_string(&self.path))
    }

    fn span(&self) -> Span {
        self.span
    }
}

impl_display_via_node!(
    BlockStatement,
    ExpressionStatement,
    LetStatement,
    ReturnStatement,
    ImportStatement,
);
