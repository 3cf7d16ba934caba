// AST (Abstract Syntax Tree) definitions for the buffer layout language

use std::fmt;
use std::rc::Rc;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Constant expression syntax trees.
///
/// The parser only ever produces the single-token variants (`Number`, `Str`,
/// `Identifier`); no operator syntax exists in the language. `Sum` and
/// `Product` are fully supported by the evaluator for programmatically built
/// expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(i64, SourceLocation),
    Str(String, SourceLocation),
    Identifier(String, SourceLocation),
    Sum {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Product {
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

/// A named, typed struct field. Field order is significant and preserved
/// exactly as declared.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub identifier: String,
    pub ty: Rc<DataType>,
}

/// Data types declarable in layout source.
///
/// Struct fields and array inner types hold [`Rc`] handles to repository
/// entries rather than deep copies, so redefining a name in the repository
/// (last write wins) never invalidates types parsed earlier.
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    /// Built-in scalar/vector type with a known byte size.
    Simple { label: String, bytes: usize },
    /// User-defined struct with ordered fields.
    Struct {
        identifier: String,
        fields: Vec<FieldDefinition>,
    },
    /// Fixed-size array. The length stays an unevaluated expression at parse
    /// time; consumers resolve it against the repository's constants.
    Array {
        inner: Rc<DataType>,
        count: Expression,
    },
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Simple { label, .. } => write!(f, "{}", label),
            DataType::Struct { identifier, .. } => write!(f, "{} struct", identifier),
            DataType::Array { inner, .. } => write!(f, "array of {}", inner),
        }
    }
}

/// A `const` declaration as parsed. The repository stores only the evaluated
/// numeric result; the AST keeps the expression for downstream reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDefinition {
    pub identifier: String,
    pub expr: Expression,
}

/// Parse result: everything declared, in source order.
///
/// Struct entries are the same `Rc` handles registered in the repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ast {
    pub structs: Vec<Rc<DataType>>,
    pub constants: Vec<ConstantDefinition>,
}

impl Ast {
    pub fn new() -> Self {
        Ast::default()
    }
}
