//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms the token stream into
//! a [`Program`](crate::ast::ast::Program). It uses a Pratt parser for
//! expressions with operator precedence and handles:
//!
//! - Declarations (functions, classes, data structures, imports)
//! - Statements (let, return, expression statements, blocks)
//! - Expressions (operators, three ternary spellings, lambdas, loops, calls)
//! - Type parsing for type annotations
//! - Error recovery and reporting
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod property_tests;
