//! # Introduction
//!
//! `wgsl-layout` is the language front-end of a GPU buffer memory-layout
//! analysis tool. It parses a small WGSL-subset declaration language —
//! struct definitions with ordered fields, numeric constants, and
//! fixed-size arrays whose lengths are constant expressions — into an AST
//! plus a repository of named types and evaluated constants.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → TokenSource → Parser → Ast + ArtifactRepository
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds the AST, registering
//!    every declaration into the repository as it is parsed.
//! 2. [`repository`] — the shared namespace of built-in and user-defined
//!    types plus evaluated constants; one instance per parse run, threaded
//!    explicitly through every routine.
//! 3. [`eval`] — folds constant expressions to numbers at definition time,
//!    which is what enforces the no-forward-reference rule.
//!
//! The harness that measures layouts empirically (GPU device setup, shader
//! compilation, buffer read-back) consumes this crate's output — typically
//! via [`parser::parser::parse_type_expression`] to resolve a buffer's root
//! type — and is not part of this crate. Byte offsets and padding are never
//! computed here.
//!
//! ## Example
//!
//! ```
//! use wgsl_layout::parser::parser::{parse_type_expression, Parser};
//! use wgsl_layout::repository::ArtifactRepository;
//!
//! let source = "
//!     const num_of_spheres = 15;
//!     struct Sphere { center: vec3f, radius: u32 }
//! ";
//!
//! let mut repository = ArtifactRepository::new();
//! let ast = Parser::new(source)
//!     .and_then(|mut p| p.parse_program(&mut repository))
//!     .unwrap();
//!
//! assert_eq!(ast.structs.len(), 1);
//! assert_eq!(repository.lookup_constant("num_of_spheres").unwrap(), 15);
//!
//! let root = parse_type_expression("array<Sphere, num_of_spheres>", &repository).unwrap();
//! assert_eq!(root.to_string(), "array of Sphere struct");
//! ```

pub mod error;
pub mod eval;
pub mod parser;
pub mod repository;
