//! Error types and error handling for the front end.
//!
//! This module defines the diagnostics produced while tokenizing and
//! parsing. It includes:
//!
//! - Error structures with source position information
//! - Lexical and syntactic error variants
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
