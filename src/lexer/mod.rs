//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for a downstream parser. It handles:
//!
//! - Whitespace elision
//! - Single- and double-character operator disambiguation
//! - Recognition of keywords and identifiers
//! - Integer literal scanning
//! - Illegal characters, reported as tokens rather than failures

pub mod lexer;
pub mod tokens;
