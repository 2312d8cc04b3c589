use std::fmt::Display;

use crate::Span;

use super::{
    declarations::{ClassDeclaration, DataStructure, FunctionDefinition},
    expressions::{
        ArrayLiteral, AssemblyExpression, AssignmentExpression, CallExpression, DoWhileExpression,
        ForExpression, Identifier, IfStatement, IndexExpression, InfixExpression,
        LambdaExpression, MemberAccessExpression, NumberLiteral, PrefixExpression,
        RangeExpression, StringLiteral, SwitchExpression, SyscallExpression, TernaryExpression,
        WhileExpression,
    },
    statements::{BlockStatement, ExpressionStatement, ImportStatement, LetStatement, ReturnStatement},
};

/// Node Trait
///
/// Defines the behavior shared by every node in the AST.
pub trait Node {
    /// Literal of the first token the node was parsed from.
    fn token_literal(&self) -> String;
    /// Canonical rendering, assuming the node starts at nesting depth `level`.
    ///
    /// The first line is not prefixed; nested lines carry `4 * depth` spaces.
    fn to_string_indent(&self, level: usize) -> String;
    /// Returns the span of the node.
    fn span(&self) -> Span;
}

pub(crate) fn indent(level: usize) -> String {
    " ".repeat(level * 4)
}

/// Implements `Display` through `Node::to_string_indent(0)`.
macro_rules! impl_display_via_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", $crate::ast::ast::Node::to_string_indent(self, 0))
                }
            }
        )*
    };
}
pub(crate) use impl_display_via_node;

/// Statement nodes: found in a block or at top level, produce no value.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
    Import(ImportStatement),
}

impl Node for Stmt {
    fn token_literal(&self) -> String {
        match self {
            Stmt::Let(stmt) => stmt.token_literal(),
            Stmt::Return(stmt) => stmt.token_literal(),
            Stmt::Expression(stmt) => stmt.token_literal(),
            Stmt::Block(stmt) => stmt.token_literal(),
            Stmt::Import(stmt) => stmt.token_literal(),
        }
    }

    fn to_string_indent(&self, level: usize) -> String {
        match self {
            Stmt::Let(stmt) => stmt.to_string_indent(level),
            Stmt::Return(stmt) => stmt.to_string_indent(level),
            Stmt::Expression(stmt) => stmt.to_string_indent(level),
            Stmt::Block(stmt) => stmt.to_string_indent(level),
            Stmt::Import(stmt) => stmt.to_string_indent(level),
        }
    }

    fn span(&self) -> Span {
        match self {
            Stmt::Let(stmt) => stmt.span,
            Stmt::Return(stmt) => stmt.span,
            Stmt::Expression(stmt) => stmt.span,
            Stmt::Block(stmt) => stmt.span,
            Stmt::Import(stmt) => stmt.span,
        }
    }
}

/// Expression nodes.
///
/// The three ternary spellings (`c ? a : b`, `c -> a : b`, `if c then a else b`)
/// share [`TernaryExpression`] and differ only in the variant carrying it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    Number(NumberLiteral),
    String(StringLiteral),
    Array(ArrayLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    Call(CallExpression),
    Index(IndexExpression),
    Member(MemberAccessExpression),
    Assignment(AssignmentExpression),
    Lambda(LambdaExpression),
    If(IfStatement),
    Ternary(TernaryExpression),
    ArrowTernary(TernaryExpression),
    IfThenElse(TernaryExpression),
    Syscall(SyscallExpression),
    Assembly(AssemblyExpression),
    Block(BlockStatement),
    Let(Box<LetStatement>),
    While(WhileExpression),
    DoWhile(DoWhileExpression),
    For(ForExpression),
    Range(RangeExpression),
    Switch(SwitchExpression),
}

impl Expr {
    /// Whether the expression has the shape of an assignment target.
    ///
    /// The parser accepts any expression left of `=`; later passes use this.
    pub fn is_lvalue(&self) -> bool {
        matches!(self, Expr::Identifier(_) | Expr::Index(_) | Expr::Member(_))
    }

    /// The condition/true/false triple of any of the three ternary forms.
    pub fn as_conditional(&self) -> Option<&TernaryExpression> {
        match self {
            Expr::Ternary(ternary) | Expr::ArrowTernary(ternary) | Expr::IfThenElse(ternary) => {
                Some(ternary)
            }
            _ => None,
        }
    }

    fn node(&self) -> &dyn Node {
        match self {
            Expr::Identifier(expr) => expr,
            Expr::Number(expr) => expr,
            Expr::String(expr) => expr,
            Expr::Array(expr) => expr,
            Expr::Prefix(expr) => expr,
            Expr::Infix(expr) => expr,
            Expr::Call(expr) => expr,
            Expr::Index(expr) => expr,
            Expr::Member(expr) => expr,
            Expr::Assignment(expr) => expr,
            Expr::Lambda(expr) => expr,
            Expr::If(expr) => expr,
            Expr::Ternary(expr) | Expr::ArrowTernary(expr) | Expr::IfThenElse(expr) => expr,
            Expr::Syscall(expr) => expr,
            Expr::Assembly(expr) => expr,
            Expr::Block(expr) => expr,
            Expr::Let(expr) => expr.as_ref(),
            Expr::While(expr) => expr,
            Expr::DoWhile(expr) => expr,
            Expr::For(expr) => expr,
            Expr::Range(expr) => expr,
            Expr::Switch(expr) => expr,
        }
    }
}

impl Node for Expr {
    fn token_literal(&self) -> String {
        match self {
            Expr::IfThenElse(_) => String::from("if"),
            _ => self.node().token_literal(),
        }
    }

    fn to_string_indent(&self, level: usize) -> String {
        match self {
            Expr::Ternary(ternary) => ternary.render("?", level),
            Expr::ArrowTernary(ternary) => ternary.render("->", level),
            Expr::IfThenElse(ternary) => format!(
                "(if {} then {} else {})",
                ternary.condition.to_string_indent(level),
                ternary.true_expr.to_string_indent(level),
                ternary.false_expr.to_string_indent(level)
            ),
            // A let in expression position has no terminator
            Expr::Let(stmt) => stmt.render_binding(level),
            _ => self.node().to_string_indent(level),
        }
    }

    fn span(&self) -> Span {
        self.node().span()
    }
}

/// Program root.
///
/// `main_function` holds the function named `main`, which is not repeated
/// in `functions`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub main_function: Option<FunctionDefinition>,
    pub functions: Vec<FunctionDefinition>,
    pub class_declarations: Vec<ClassDeclaration>,
    pub data_structures: Vec<DataStructure>,
    pub import_statements: Vec<ImportStatement>,
}

impl Program {
    /// `main` first (when present), then the other functions in source order.
    pub fn all_functions(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.main_function.iter().chain(self.functions.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.main_function.is_none()
            && self.functions.is_empty()
            && self.class_declarations.is_empty()
            && self.data_structures.is_empty()
            && self.import_statements.is_empty()
    }
}

impl Node for Program {
    fn token_literal(&self) -> String {
        self.import_statements
            .first()
            .map(|import| import.token_literal())
            .or_else(|| self.all_functions().next().map(|f| f.token_literal()))
            .unwrap_or_default()
    }

    fn to_string_indent(&self, level: usize) -> String {
        let mut parts: Vec<String> = vec![];

        parts.extend(self.import_statements.iter().map(|i| i.to_string_indent(level)));
        parts.extend(self.data_structures.iter().map(|d| d.to_string_indent(level)));
        parts.extend(self.class_declarations.iter().map(|c| c.to_string_indent(level)));
        parts.extend(self.all_functions().map(|f| f.to_string_indent(level)));

        parts.join("\n")
    }

    fn span(&self) -> Span {
        let spans = self
            .import_statements
            .iter()
            .map(|i| i.span)
            .chain(self.data_structures.iter().map(|d| d.span))
            .chain(self.class_declarations.iter().map(|c| c.span))
            .chain(self.all_functions().map(|f| f.span));

        spans.reduce(|a, b| a.to(&b)).unwrap_or_default()
    }
}

impl_display_via_node!(Stmt, Expr, Program);

/// Renders a comma separated list of expressions.
pub(crate) fn join_exprs(exprs: &[Expr], level: usize) -> String {
    exprs
        .iter()
        .map(|e| e.to_string_indent(level))
        .collect::<Vec<String>>()
        .join(", ")
}

/// Renders statements one per line at `level`, used for block bodies.
pub(crate) fn render_body(statements: &[Stmt], level: usize) -> String {
    statements
        .iter()
        .map(|s| format!("{}{}\n", indent(level), s.to_string_indent(level)))
        .collect()
}

impl Display for dyn Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_indent(0))
    }
}
