/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: `Program`, the `Stmt`/`Expr` unions and the `Node` trait
/// - expressions: Definitions for the expression nodes
/// - statements: Definitions for the statement nodes
/// - declarations: Functions, classes, data structures and parameters
/// - types: Type annotations as written in source
/// - visitor: The traversal protocol
pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod statements;
pub mod types;
pub mod visitor;
