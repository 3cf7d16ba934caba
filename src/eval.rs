//! Constant expression evaluation
//!
//! A pure recursive fold from [`Expression`] to a number, resolving
//! identifiers against the constants already registered in an
//! [`ArtifactRepository`]. Identifiers resolve only against earlier
//! registrations, which is what forbids forward references: evaluation
//! happens eagerly at definition time, so a constant mentioned before its
//! own definition simply is not there yet.

use crate::error::ParseError;
use crate::parser::ast::Expression;
use crate::repository::ArtifactRepository;

/// Reduce `expr` to a single number.
///
/// String literals are rejected: only numeric constant folding is supported.
pub fn evaluate(expr: &Expression, repository: &ArtifactRepository) -> Result<i64, ParseError> {
    match expr {
        Expression::Number(value, _) => Ok(*value),
        Expression::Str(_, location) => Err(ParseError::NonNumericConstant {
            location: *location,
        }),
        Expression::Identifier(name, _) => repository.lookup_constant(name),
        Expression::Sum { left, right } => {
            Ok(evaluate(left, repository)? + evaluate(right, repository)?)
        }
        Expression::Product { left, right } => {
            Ok(evaluate(left, repository)? * evaluate(right, repository)?)
        }
    }
}
