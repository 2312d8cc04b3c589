//! Double-dispatch traversal.
//!
//! A consumer implements [`Visitor`] once, with one method per node kind,
//! and drives the walk by calling `accept` on the root. `accept` only
//! dispatches; descending into children is up to the visitor.

use super::{
    ast::{Expr, Program, Stmt},
    declarations::{ClassDeclaration, DataStructure, FunctionDefinition, Parameter},
    expressions::{
        ArrayLiteral, AssemblyExpression, AssignmentExpression, CallExpression, DoWhileExpression,
        ForExpression, Identifier, IfStatement, IndexExpression, InfixExpression,
        LambdaExpression, MemberAccessExpression, NumberLiteral, PrefixExpression,
        RangeExpression, StringLiteral, SwitchExpression, SyscallExpression, TernaryExpression,
        WhileExpression,
    },
    statements::{BlockStatement, ExpressionStatement, ImportStatement, LetStatement, ReturnStatement},
};

pub trait Visitor {
    type Output;

    fn visit_program(&mut self, node: &Program) -> Self::Output;
    fn visit_function_definition(&mut self, node: &FunctionDefinition) -> Self::Output;
    fn visit_class_declaration(&mut self, node: &ClassDeclaration) -> Self::Output;
    fn visit_data_structure(&mut self, node: &DataStructure) -> Self::Output;
    fn visit_parameter(&mut self, node: &Parameter) -> Self::Output;

    fn visit_let_statement(&mut self, node: &LetStatement) -> Self::Output;
    fn visit_return_statement(&mut self, node: &ReturnStatement) -> Self::Output;
    fn visit_expression_statement(&mut self, node: &ExpressionStatement) -> Self::Output;
    fn visit_block_statement(&mut self, node: &BlockStatement) -> Self::Output;
    fn visit_import_statement(&mut self, node: &ImportStatement) -> Self::Output;

    fn visit_identifier(&mut self, node: &Identifier) -> Self::Output;
    fn visit_number_literal(&mut self, node: &NumberLiteral) -> Self::Output;
    fn visit_string_literal(&mut self, node: &StringLiteral) -> Self::Output;
    fn visit_array_literal(&mut self, node: &ArrayLiteral) -> Self::Output;
    fn visit_prefix_expression(&mut self, node: &PrefixExpression) -> Self::Output;
    fn visit_infix_expression(&mut self, node: &InfixExpression) -> Self::Output;
    fn visit_call_expression(&mut self, node: &CallExpression) -> Self::Output;
    fn visit_index_expression(&mut self, node: &IndexExpression) -> Self::Output;
    fn visit_member_access_expression(&mut self, node: &MemberAccessExpression) -> Self::Output;
    fn visit_assignment_expression(&mut self, node: &AssignmentExpression) -> Self::Output;
    fn visit_lambda_expression(&mut self, node: &LambdaExpression) -> Self::Output;
    fn visit_if_statement(&mut self, node: &IfStatement) -> Self::Output;
    fn visit_ternary_expression(&mut self, node: &TernaryExpression) -> Self::Output;
    fn visit_arrow_ternary_expression(&mut self, node: &TernaryExpression) -> Self::Output;
    fn visit_if_then_else_expression(&mut self, node: &TernaryExpression) -> Self::Output;
    fn visit_syscall_expression(&mut self, node: &SyscallExpression) -> Self::Output;
    fn visit_assembly_expression(&mut self, node: &AssemblyExpression) -> Self::Output;
    fn visit_while_expression(&mut self, node: &WhileExpression) -> Self::Output;
    fn visit_do_while_expression(&mut self, node: &DoWhileExpression) -> Self::Output;
    fn visit_for_expression(&mut self, node: &ForExpression) -> Self::Output;
    fn visit_range_expression(&mut self, node: &RangeExpression) -> Self::Output;
    fn visit_switch_expression(&mut self, node: &SwitchExpression) -> Self::Output;
}

impl Program {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_program(self)
    }
}

impl FunctionDefinition {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_function_definition(self)
    }
}

impl ClassDeclaration {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_class_declaration(self)
    }
}

impl DataStructure {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_data_structure(self)
    }
}

impl Parameter {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_parameter(self)
    }
}

impl Stmt {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Stmt::Let(node) => visitor.visit_let_statement(node),
            Stmt::Return(node) => visitor.visit_return_statement(node),
            Stmt::Expression(node) => visitor.visit_expression_statement(node),
            Stmt::Block(node) => visitor.visit_block_statement(node),
            Stmt::Import(node) => visitor.visit_import_statement(node),
        }
    }
}

impl Expr {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Identifier(node) => visitor.visit_identifier(node),
            Expr::Number(node) => visitor.visit_number_literal(node),
            Expr::String(node) => visitor.visit_string_literal(node),
            Expr::Array(node) => visitor.visit_array_literal(node),
            Expr::Prefix(node) => visitor.visit_prefix_expression(node),
            Expr::Infix(node) => visitor.visit_infix_expression(node),
            Expr::Call(node) => visitor.visit_call_expression(node),
            Expr::Index(node) => visitor.visit_index_expression(node),
            Expr::Member(node) => visitor.visit_member_access_expression(node),
            Expr::Assignment(node) => visitor.visit_assignment_expression(node),
            Expr::Lambda(node) => visitor.visit_lambda_expression(node),
            Expr::If(node) => visitor.visit_if_statement(node),
            Expr::Ternary(node) => visitor.visit_ternary_expression(node),
            Expr::ArrowTernary(node) => visitor.visit_arrow_ternary_expression(node),
            Expr::IfThenElse(node) => visitor.visit_if_then_else_expression(node),
            Expr::Syscall(node) => visitor.visit_syscall_expression(node),
            Expr::Assembly(node) => visitor.visit_assembly_expression(node),
            Expr::Block(node) => visitor.visit_block_statement(node),
            Expr::Let(node) => visitor.visit_let_statement(node),
            Expr::While(node) => visitor.visit_while_expression(node),
            Expr::DoWhile(node) => visitor.visit_do_while_expression(node),
            Expr::For(node) => visitor.visit_for_expression(node),
            Expr::Range(node) => visitor.visit_range_expression(node),
            Expr::Switch(node) => visitor.visit_switch_expression(node),
        }
    }
}
