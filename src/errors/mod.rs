//! Error types for the lexer and its command line driver.
//!
//! The lexer itself never fails: illegal characters come back as tokens.
//! Errors only appear where a caller asks for strict tokenization, or when
//! the driver cannot read its input.

pub mod errors;

#[cfg(test)]
mod tests;
