use crate::error::ParseError;
use crate::parser::ast::{
    Ast, ConstantDefinition, DataType, Expression, FieldDefinition, SourceLocation,
};
use crate::parser::cursor::TokenSource;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use crate::repository::ArtifactRepository;
use std::rc::Rc;

/// Recursive descent parser for the buffer layout language.
///
/// Dispatches on one token of lookahead. Every parse failure is fatal to the
/// current call: the first error propagates unchanged to the caller and the
/// token stream is not restartable mid-way.
pub struct Parser {
    source: TokenSource,
}

impl Parser {
    /// Tokenize `source` and set up a parser over the result.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Set up a parser over an already-materialized token sequence.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            source: TokenSource::new(tokens),
        }
    }

    /// Parse the entire program: a sequence of struct and constant
    /// definitions. Structs are registered into `repository` as they are
    /// parsed and constants are evaluated and defined immediately, so later
    /// declarations can reference earlier ones but never the reverse.
    pub fn parse_program(&mut self, repository: &mut ArtifactRepository) -> Result<Ast, ParseError> {
        let mut ast = Ast::new();

        loop {
            let (kind, location) = match self.source.peek() {
                Some(token) => (token.kind.clone(), token.location),
                None => break,
            };

            match kind {
                TokenKind::Struct => {
                    let def = self.parse_struct_def(repository)?;
                    ast.structs.push(def);
                }
                TokenKind::Const => {
                    let def = self.parse_constant_def(repository)?;
                    repository.define_constant(&def)?;
                    ast.constants.push(def);
                }
                other => {
                    return Err(ParseError::Syntax {
                        message: format!("Unsupported token at top level: {}", other),
                        location,
                    });
                }
            }
        }

        Ok(ast)
    }

    /// Parse a struct definition: `struct Name { field: Type, ... }`.
    ///
    /// The struct type is registered into the repository under its identifier
    /// before this returns, so a following declaration can already use it.
    fn parse_struct_def(
        &mut self,
        repository: &mut ArtifactRepository,
    ) -> Result<Rc<DataType>, ParseError> {
        self.source
            .expect(&TokenKind::Struct, "Struct definition has to start with 'struct'")?;
        let (identifier, _) =
            self.expect_identifier("'struct' has to be followed by an identifier")?;
        self.source
            .expect(&TokenKind::BraceOpen, "Struct identifier has to be followed by '{'")?;

        let mut fields = Vec::new();
        while matches!(
            self.source.peek(),
            Some(Token {
                kind: TokenKind::Ident(_),
                ..
            })
        ) {
            fields.push(self.parse_struct_field(repository)?);
        }

        self.source
            .expect(&TokenKind::BraceClose, "Struct definition has to end with '}'")?;

        let def = Rc::new(DataType::Struct {
            identifier: identifier.clone(),
            fields,
        });
        repository.define_type(&identifier, Rc::clone(&def));

        Ok(def)
    }

    /// Parse one struct field: `name: Type` with an optional trailing comma.
    fn parse_struct_field(
        &mut self,
        repository: &ArtifactRepository,
    ) -> Result<FieldDefinition, ParseError> {
        let (identifier, _) =
            self.expect_identifier("Struct field definition has to begin with an identifier")?;
        self.source
            .expect(&TokenKind::Colon, "Expected ':' after struct field identifier")?;
        let ty = self.parse_data_type(repository)?;

        if let Some(Token {
            kind: TokenKind::Comma,
            ..
        }) = self.source.peek()
        {
            self.source.pop();
        }

        Ok(FieldDefinition { identifier, ty })
    }

    /// Parse a constant definition: `const name [: Type] = expr [;]`.
    ///
    /// The type annotation is parsed for syntax validation only and then
    /// discarded; it never affects the stored constant. The definition is
    /// returned unevaluated — the caller defines it into the repository.
    fn parse_constant_def(
        &mut self,
        repository: &mut ArtifactRepository,
    ) -> Result<ConstantDefinition, ParseError> {
        self.source
            .expect(&TokenKind::Const, "Invalid constant definition")?;
        let (identifier, _) = self.expect_identifier("Expected identifier after 'const'")?;

        if let Some(Token {
            kind: TokenKind::Colon,
            ..
        }) = self.source.peek()
        {
            self.source.pop();
            self.parse_data_type(repository)?;
        }

        self.source
            .expect(&TokenKind::Eq, "Expected '=' after const identifier")?;
        let expr = self.parse_expression()?;

        if let Some(Token {
            kind: TokenKind::Semi,
            ..
        }) = self.source.peek()
        {
            self.source.pop();
        }

        Ok(ConstantDefinition { identifier, expr })
    }

    /// Parse a data type reference.
    ///
    /// The identifier `array` introduces `array<Inner, count>`; the count
    /// expression is mandatory and stored unevaluated. Any other identifier
    /// must already be registered in the repository.
    pub fn parse_data_type(
        &mut self,
        repository: &ArtifactRepository,
    ) -> Result<Rc<DataType>, ParseError> {
        let (name, location) = self.expect_identifier("Failed to parse type")?;

        if name == "array" {
            self.source.expect(&TokenKind::Lt, "Expected '<' after 'array'")?;
            let inner = self.parse_data_type(repository)?;
            self.source.expect(&TokenKind::Comma, "Expected size of array")?;
            let count = self.parse_expression()?;
            self.source.expect(&TokenKind::Gt, "Expected '>' after array size")?;

            return Ok(Rc::new(DataType::Array { inner, count }));
        }

        match repository.lookup_type(&name) {
            Some(data_type) => Ok(data_type),
            None => Err(ParseError::UnknownType { name, location }),
        }
    }

    /// Parse a constant expression: exactly one identifier, number, or
    /// string token. No infix operators exist in the grammar.
    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let location = self.source.current_location();

        match self.source.pop() {
            Some(Token {
                kind: TokenKind::Ident(name),
                location,
            }) => Ok(Expression::Identifier(name, location)),
            Some(Token {
                kind: TokenKind::Number(value),
                location,
            }) => Ok(Expression::Number(value, location)),
            Some(Token {
                kind: TokenKind::Str(value),
                location,
            }) => Ok(Expression::Str(value, location)),
            Some(token) => Err(ParseError::Syntax {
                message: format!("Expected expression, found {}", token.kind),
                location: token.location,
            }),
            None => Err(ParseError::Syntax {
                message: "Expected expression, found end of input".to_string(),
                location,
            }),
        }
    }

    /// Consume an identifier token, returning its text and location.
    fn expect_identifier(
        &mut self,
        message: &str,
    ) -> Result<(String, SourceLocation), ParseError> {
        let location = self.source.current_location();

        match self.source.pop() {
            Some(Token {
                kind: TokenKind::Ident(name),
                location,
            }) => Ok((name, location)),
            Some(token) => Err(ParseError::Syntax {
                message: format!("{}, found {}", message, token.kind),
                location: token.location,
            }),
            None => Err(ParseError::Syntax {
                message: format!("{}, found end of input", message),
                location,
            }),
        }
    }
}

/// Parse a standalone type expression (e.g. `array<Sphere, 4>`) against an
/// already-populated repository.
///
/// The analysis harness uses this to resolve the root type of a GPU buffer
/// after parsing the declarations that populate `repository`. Array lengths
/// are required here exactly as inside struct bodies.
pub fn parse_type_expression(
    source: &str,
    repository: &ArtifactRepository,
) -> Result<Rc<DataType>, ParseError> {
    let mut parser = Parser::new(source)?;
    parser.parse_data_type(repository)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> (Ast, ArtifactRepository) {
        let mut repository = ArtifactRepository::new();
        let mut parser = Parser::new(source).unwrap();
        let ast = parser.parse_program(&mut repository).unwrap();
        (ast, repository)
    }

    fn parse_err(source: &str) -> ParseError {
        let mut repository = ArtifactRepository::new();
        let mut parser = Parser::new(source).unwrap();
        parser.parse_program(&mut repository).unwrap_err()
    }

    #[test]
    fn test_parse_struct() {
        let (ast, repository) = parse("struct Foo { a: u32, b: vec3f }");

        assert_eq!(ast.structs.len(), 1);
        match &*ast.structs[0] {
            DataType::Struct { identifier, fields } => {
                assert_eq!(identifier, "Foo");
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].identifier, "a");
                assert_eq!(fields[0].ty, repository.lookup_type("u32").unwrap());
                assert_eq!(fields[1].identifier, "b");
                assert_eq!(fields[1].ty, repository.lookup_type("vec3f").unwrap());
            }
            other => panic!("Expected struct definition, got {:?}", other),
        }

        // Registered under its identifier, sharing the AST's handle
        assert!(Rc::ptr_eq(
            &ast.structs[0],
            &repository.lookup_type("Foo").unwrap()
        ));
    }

    #[test]
    fn test_empty_struct() {
        let (ast, _) = parse("struct Empty {}");

        match &*ast.structs[0] {
            DataType::Struct { fields, .. } => assert!(fields.is_empty()),
            other => panic!("Expected struct definition, got {:?}", other),
        }
    }

    #[test]
    fn test_field_without_trailing_comma() {
        let (ast, _) = parse("struct Foo { a: u32 }");

        match &*ast.structs[0] {
            DataType::Struct { fields, .. } => assert_eq!(fields.len(), 1),
            other => panic!("Expected struct definition, got {:?}", other),
        }
    }

    #[test]
    fn test_struct_referencing_earlier_struct() {
        let (ast, _) = parse("struct Inner { a: u32 } struct Outer { inner: Inner }");

        assert_eq!(ast.structs.len(), 2);
        match &*ast.structs[1] {
            DataType::Struct { fields, .. } => {
                // The field shares the repository's handle for Inner
                assert!(Rc::ptr_eq(&fields[0].ty, &ast.structs[0]));
            }
            other => panic!("Expected struct definition, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_type() {
        let err = parse_err("struct Foo { a: Missing }");
        assert!(matches!(err, ParseError::UnknownType { ref name, .. } if name == "Missing"));
    }

    #[test]
    fn test_array_type() {
        let (ast, repository) = parse("struct Foo { xs: array<u32, 10> }");

        match &*ast.structs[0] {
            DataType::Struct { fields, .. } => match &*fields[0].ty {
                DataType::Array { inner, count } => {
                    assert_eq!(*inner, repository.lookup_type("u32").unwrap());
                    assert!(matches!(count, Expression::Number(10, _)));
                }
                other => panic!("Expected array type, got {:?}", other),
            },
            other => panic!("Expected struct definition, got {:?}", other),
        }
    }

    #[test]
    fn test_array_length_is_not_resolved_at_parse_time() {
        // num_of_spheres is a registered constant, but the count stays an
        // identifier expression in the parsed type.
        let (ast, _) = parse(
            "const num_of_spheres = 15;\n\
             struct World { spheres: array<vec4f, num_of_spheres> }",
        );

        match &*ast.structs[0] {
            DataType::Struct { fields, .. } => match &*fields[0].ty {
                DataType::Array { count, .. } => {
                    assert!(
                        matches!(count, Expression::Identifier(ref name, _) if name == "num_of_spheres")
                    );
                }
                other => panic!("Expected array type, got {:?}", other),
            },
            other => panic!("Expected struct definition, got {:?}", other),
        }
    }

    #[test]
    fn test_array_missing_count() {
        let err = parse_err("struct Foo { xs: array<u32> }");
        match err {
            ParseError::Syntax { message, .. } => {
                assert!(message.contains("Expected size of array"), "{}", message);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_arrays() {
        let (ast, _) = parse("struct Grid { cells: array<array<u32, 4>, 8> }");

        match &*ast.structs[0] {
            DataType::Struct { fields, .. } => match &*fields[0].ty {
                DataType::Array { inner, count } => {
                    assert!(matches!(count, Expression::Number(8, _)));
                    assert!(matches!(&**inner, DataType::Array { .. }));
                }
                other => panic!("Expected array type, got {:?}", other),
            },
            other => panic!("Expected struct definition, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_constants() {
        let (ast, repository) = parse("const X = 5; const Y = X;");

        assert_eq!(ast.constants.len(), 2);
        assert_eq!(ast.constants[0].identifier, "X");
        assert_eq!(ast.constants[1].identifier, "Y");
        assert_eq!(repository.lookup_constant("X").unwrap(), 5);
        assert_eq!(repository.lookup_constant("Y").unwrap(), 5);
    }

    #[test]
    fn test_forward_reference_rejected() {
        let err = parse_err("const Y = X; const X = 5;");
        assert!(matches!(err, ParseError::UnknownConstant { ref name } if name == "X"));
    }

    #[test]
    fn test_string_constant_rejected() {
        let err = parse_err("const Z = \"hello\";");
        assert!(matches!(err, ParseError::NonNumericConstant { .. }));
    }

    #[test]
    fn test_constant_annotation_is_discarded() {
        let (ast, repository) = parse("const n: u32 = 7;");

        assert_eq!(repository.lookup_constant("n").unwrap(), 7);
        assert_eq!(
            ast.constants[0].expr,
            Expression::Number(7, SourceLocation::new(1, 16))
        );
    }

    #[test]
    fn test_constant_annotation_with_unknown_type() {
        let err = parse_err("const n: Missing = 7;");
        assert!(matches!(err, ParseError::UnknownType { ref name, .. } if name == "Missing"));
    }

    #[test]
    fn test_constant_without_semicolon() {
        let (_, repository) = parse("const a = 1 const b = 2");
        assert_eq!(repository.lookup_constant("a").unwrap(), 1);
        assert_eq!(repository.lookup_constant("b").unwrap(), 2);
    }

    #[test]
    fn test_unsupported_top_level_token() {
        let err = parse_err("let x = 5;");
        match err {
            ParseError::Syntax { message, location } => {
                assert!(message.contains("Unsupported token at top level"), "{}", message);
                assert_eq!(location, SourceLocation::new(1, 1));
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        let (ast, _) = parse("");
        assert_eq!(ast, Ast::new());
    }

    #[test]
    fn test_comments_ignored() {
        let (ast, repository) = parse(
            "// world description\n\
             const N = 2; // sphere count\n\
             struct S { a: u32 }",
        );

        assert_eq!(ast.constants.len(), 1);
        assert_eq!(ast.structs.len(), 1);
        assert_eq!(repository.lookup_constant("N").unwrap(), 2);
    }

    #[test]
    fn test_type_expression() {
        let (_, repository) = parse("struct Sphere { center: vec3f, radius: u32 }");

        let ty = parse_type_expression("array<Sphere, 4>", &repository).unwrap();
        match &*ty {
            DataType::Array { inner, count } => {
                assert!(Rc::ptr_eq(inner, &repository.lookup_type("Sphere").unwrap()));
                assert!(matches!(count, Expression::Number(4, _)));
            }
            other => panic!("Expected array type, got {:?}", other),
        }
    }

    #[test]
    fn test_type_expression_requires_array_length() {
        let repository = ArtifactRepository::new();
        let err = parse_type_expression("array<u32>", &repository).unwrap_err();
        match err {
            ParseError::Syntax { message, .. } => {
                assert!(message.contains("Expected size of array"), "{}", message);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }
}
