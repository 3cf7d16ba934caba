//! Buffer layout language parser
//!
//! This module transforms layout source text into an AST:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`cursor`]: Token stream with lookahead and transparent comment skipping
//! - [`parser`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Supported language
//!
//! - Struct definitions with ordered fields: `struct Foo { a: u32, b: vec3f }`
//! - Numeric constants with an optional (discarded) type annotation:
//!   `const N: u32 = 4;`
//! - Array types with mandatory, expression-valued lengths: `array<u32, N>`
//! - `//` line comments
//!
//! # Parser implementation
//!
//! Hand-written recursive descent with one token of lookahead. Constant
//! expressions are single tokens — there is no operator syntax in the
//! grammar, although the evaluator folds programmatically built sums and
//! products.

pub mod ast;
pub mod cursor;
pub mod lexer;
pub mod parser;
