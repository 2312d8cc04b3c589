use crate::{lexer::tokens::Token, Span};

use super::{
    ast::{impl_display_via_node, indent, join_exprs, render_body, Expr, Node, Stmt},
    declarations::{render_parameters, Parameter},
    statements::BlockStatement,
};

/// Re-escapes string content so that the rendered literal lexes back to `value`.
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }

    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub span: Span,
}

impl Node for Identifier {
    fn token_literal(&self) -> String {
        self.value.clone()
    }
    fn to_string_indent(&self, _level: usize) -> String {
        self.value.clone()
    }
    fn span(&self) -> Span {
        self.span
    }
}

/// Number literal. `literal` keeps the source spelling (`1.50` stays `1.50`).
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub literal: String,
    pub value: f64,
    pub span: Span,
}

impl NumberLiteral {
    pub fn is_integer(&self) -> bool {
        !self.literal.contains('.')
    }
}

impl Node for NumberLiteral {
    fn token_literal(&self) -> String {
        self.literal.clone()
    }
    fn to_string_indent(&self, _level: usize) -> String {
        self.literal.clone()
    }
    fn span(&self) -> Span {
        self.span
    }
}

/// String literal with escapes already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub span: Span,
}

impl Node for StringLiteral {
    fn token_literal(&self) -> String {
        self.value.clone()
    }
    fn to_string_indent(&self, _level: usize) -> String {
        format!("\"{}\"", escape_string(&self.value))
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub elements: Vec<Expr>,
    pub span: Span,
}

impl Node for ArrayLiteral {
    fn token_literal(&self) -> String {
        String::from("[")
    }
    fn to_string_indent(&self, level: usize) -> String {
        format!("[{}]", join_exprs(&self.elements, level))
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
}

impl Node for PrefixExpression {
    fn token_literal(&self) -> String {
        self.operator.value.clone()
    }
    fn to_string_indent(&self, level: usize) -> String {
        format!("({}{})", self.operator.value, self.right.to_string_indent(level))
    }
    fn span(&self) -> Span {
        self.span
    }
}

/// Binary operator application, always rendered fully parenthesized.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
}

impl Node for InfixExpression {
    fn token_literal(&self) -> String {
        self.left.token_literal()
    }
    fn to_string_indent(&self, level: usize) -> String {
        format!(
            "({} {} {})",
            self.left.to_string_indent(level),
            self.operator.value,
            self.right.to_string_indent(level)
        )
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

impl Node for CallExpression {
    fn token_literal(&self) -> String {
        self.callee.token_literal()
    }
    fn to_string_indent(&self, level: usize) -> String {
        format!(
            "{}({})",
            self.callee.to_string_indent(level),
            join_exprs(&self.arguments, level)
        )
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub left: Box<Expr>,
    pub index: Box<Expr>,
    pub span: Span,
}

impl Node for IndexExpression {
    fn token_literal(&self) -> String {
        self.left.token_literal()
    }
    fn to_string_indent(&self, level: usize) -> String {
        format!(
            "{}[{}]",
            self.left.to_string_indent(level),
            self.index.to_string_indent(level)
        )
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberAccessExpression {
    pub left: Box<Expr>,
    pub member: Identifier,
    pub span: Span,
}

impl Node for MemberAccessExpression {
    fn token_literal(&self) -> String {
        self.left.token_literal()
    }
    fn to_string_indent(&self, level: usize) -> String {
        format!("{}.{}", self.left.to_string_indent(level), self.member.value)
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
}

impl Node for AssignmentExpression {
    fn token_literal(&self) -> String {
        self.left.token_literal()
    }
    fn to_string_indent(&self, level: usize) -> String {
        format!(
            "({} {} {})",
            self.left.to_string_indent(level),
            self.operator.value,
            self.right.to_string_indent(level)
        )
    }
    fn span(&self) -> Span {
        self.span
    }
}

/// Anonymous function: `(a, b (int)) -> body` or `function (a) -> body`.
///
/// `name` is the `__lambda_<n>` name handed out by the parser that built it.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpression {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Box<Expr>,
    pub uses_keyword: bool,
    pub span: Span,
}

impl Node for LambdaExpression {
    fn token_literal(&self) -> String {
        if self.uses_keyword {
            String::from("function")
        } else {
            String::from("(")
        }
    }
    fn to_string_indent(&self, level: usize) -> String {
        let keyword = if self.uses_keyword { "function " } else { "" };

        format!(
            "({}({}) -> {})",
            keyword,
            render_parameters(&self.parameters),
            self.body.to_string_indent(level)
        )
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    Block(BlockStatement),
    If(Box<IfStatement>),
}

/// Statement-form conditional. `else if` chains nest through [`ElseBranch::If`].
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Box<Expr>,
    pub consequence: BlockStatement,
    pub alternative: Option<ElseBranch>,
    pub span: Span,
}

impl Node for IfStatement {
    fn token_literal(&self) -> String {
        String::from("if")
    }
    fn to_string_indent(&self, level: usize) -> String {
        let mut out = format!(
            "if ({}) {}",
            self.condition.to_string_indent(level),
            self.consequence.to_string_indent(level)
        );

        match &self.alternative {
            Some(ElseBranch::Block(block)) => {
                out.push_str(&format!(" else {}", block.to_string_indent(level)))
            }
            Some(ElseBranch::If(nested)) => {
                out.push_str(&format!(" else {}", nested.to_string_indent(level)))
            }
            None => {}
        }

        out
    }
    fn span(&self) -> Span {
        self.span
    }
}

/// Condition, true branch and false branch of every ternary spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpression {
    pub condition: Box<Expr>,
    pub true_expr: Box<Expr>,
    pub false_expr: Box<Expr>,
    pub span: Span,
}

impl TernaryExpression {
    pub(crate) fn render(&self, separator: &str, level: usize) -> String {
        format!(
            "({} {} {} : {})",
            self.condition.to_string_indent(level),
            separator,
            self.true_expr.to_string_indent(level),
            self.false_expr.to_string_indent(level)
        )
    }
}

impl Node for TernaryExpression {
    fn token_literal(&self) -> String {
        self.condition.token_literal()
    }
    fn to_string_indent(&self, level: usize) -> String {
        self.render("?", level)
    }
    fn span(&self) -> Span {
        self.span
    }
}

/// `syscall(number, args...)`, at most six arguments after the number.
#[derive(Debug, Clone, PartialEq)]
pub struct SyscallExpression {
    pub number: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

impl Node for SyscallExpression {
    fn token_literal(&self) -> String {
        String::from("syscall")
    }
    fn to_string_indent(&self, level: usize) -> String {
        let mut args = vec![self.number.to_string_indent(level)];
        args.extend(self.arguments.iter().map(|a| a.to_string_indent(level)));

        format!("syscall({})", args.join(", "))
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyExpression {
    pub code: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

impl Node for AssemblyExpression {
    fn token_literal(&self) -> String {
        String::from("asm")
    }
    fn to_string_indent(&self, level: usize) -> String {
        let mut args = vec![format!("\"{}\"", escape_string(&self.code))];
        args.extend(self.arguments.iter().map(|a| a.to_string_indent(level)));

        format!("asm({})", args.join(", "))
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileExpression {
    pub condition: Box<Expr>,
    pub body: BlockStatement,
    pub span: Span,
}

impl Node for WhileExpression {
    fn token_literal(&self) -> String {
        String::from("while")
    }
    fn to_string_indent(&self, level: usize) -> String {
        format!(
            "while ({}) {}",
            self.condition.to_string_indent(level),
            self.body.to_string_indent(level)
        )
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileExpression {
    pub body: BlockStatement,
    pub condition: Box<Expr>,
    pub span: Span,
}

impl Node for DoWhileExpression {
    fn token_literal(&self) -> String {
        String::from("do")
    }
    fn to_string_indent(&self, level: usize) -> String {
        format!(
            "do {} while ({})",
            self.body.to_string_indent(level),
            self.condition.to_string_indent(level)
        )
    }
    fn span(&self) -> Span {
        self.span
    }
}

/// `for (x in iterable -> predicate) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForExpression {
    pub variable: Identifier,
    pub iterable: Box<Expr>,
    pub predicate: Option<Box<Expr>>,
    pub body: BlockStatement,
    pub span: Span,
}

impl Node for ForExpression {
    fn token_literal(&self) -> String {
        String::from("for")
    }
    fn to_string_indent(&self, level: usize) -> String {
        let predicate = match &self.predicate {
            Some(predicate) => format!(" -> {}", predicate.to_string_indent(level)),
            None => String::new(),
        };

        format!(
            "for ({} in {}{}) {}",
            self.variable.value,
            self.iterable.to_string_indent(level),
            predicate,
            self.body.to_string_indent(level)
        )
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeExpression {
    pub start: Box<Expr>,
    pub end: Box<Expr>,
    pub step: Option<Box<Expr>>,
    pub span: Span,
}

impl Node for RangeExpression {
    fn token_literal(&self) -> String {
        String::from("range")
    }
    fn to_string_indent(&self, level: usize) -> String {
        let mut args = vec![
            self.start.to_string_indent(level),
            self.end.to_string_indent(level),
        ];
        if let Some(step) = &self.step {
            args.push(step.to_string_indent(level));
        }

        format!("range({})", args.join(", "))
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub value: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchExpression {
    pub subject: Box<Expr>,
    pub cases: Vec<SwitchCase>,
    pub default: Option<Vec<Stmt>>,
    pub span: Span,
}

impl Node for SwitchExpression {
    fn token_literal(&self) -> String {
        String::from("switch")
    }
    fn to_string_indent(&self, level: usize) -> String {
        let mut out = format!("switch ({}) {{\n", self.subject.to_string_indent(level));

        for case in &self.cases {
            out.push_str(&format!(
                "{}case {}:\n",
                indent(level + 1),
                case.value.to_string_indent(level + 1)
            ));
            out.push_str(&render_body(&case.body, level + 2));
        }
        if let Some(default) = &self.default {
            out.push_str(&format!("{}default:\n", indent(level + 1)));
            out.push_str(&render_body(default, level + 2));
        }

        out.push_str(&format!("{}}}", indent(level)));
        out
    }
    fn span(&self) -> Span {
        self.span
    }
}

impl_display_via_node!(
    Identifier,
    NumberLiteral,
    StringLiteral,
    ArrayLiteral,
    PrefixExpression,
    InfixExpression,
    CallExpression,
    IndexExpression,
    MemberAccessExpression,
    AssignmentExpression,
    LambdaExpression,
    IfStatement,
    TernaryExpression,
    SyscallExpression,
    AssemblyExpression,
    WhileExpression,
    DoWhileExpression,
    ForExpression,
    RangeExpression,
    SwitchExpression,
);
