//! Artifact repository: the shared namespace of types and constants
//!
//! One repository instance is constructed per parse run and threaded through
//! every parsing routine explicitly; there is no process-wide state. It holds
//! two independent namespaces: data types (seeded with the built-in scalar
//! and vector types) and evaluated numeric constants. Within each namespace
//! names are unique and redefinition overwrites the previous entry,
//! built-ins included.

use crate::error::ParseError;
use crate::eval::evaluate;
use crate::parser::ast::{ConstantDefinition, DataType};
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Namespace of declared data types and evaluated constants.
#[derive(Debug)]
pub struct ArtifactRepository {
    types: FxHashMap<String, Rc<DataType>>,
    constants: FxHashMap<String, i64>,
}

impl Default for ArtifactRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactRepository {
    /// Create a repository pre-seeded with the built-in types
    /// `u32` (4 bytes), `vec3f` (12 bytes), and `vec4f` (16 bytes).
    pub fn new() -> Self {
        let built_ins = [
            ("u32", "unsigned 32-bit integer", 4),
            ("vec3f", "vector of three 32-bit floats", 12),
            ("vec4f", "vector of four 32-bit floats", 16),
        ];

        let mut types = FxHashMap::default();
        for (name, label, bytes) in built_ins {
            types.insert(
                name.to_string(),
                Rc::new(DataType::Simple {
                    label: label.to_string(),
                    bytes,
                }),
            );
        }

        Self {
            types,
            constants: FxHashMap::default(),
        }
    }

    /// Look up a type by name. Absence is not an error here; callers decide
    /// whether a missing type is fatal.
    pub fn lookup_type(&self, name: &str) -> Option<Rc<DataType>> {
        self.types.get(name).cloned()
    }

    /// Look up an evaluated constant. Every consumer requires a numeric
    /// value, so absence is always an error.
    pub fn lookup_constant(&self, name: &str) -> Result<i64, ParseError> {
        self.constants
            .get(name)
            .copied()
            .ok_or_else(|| ParseError::UnknownConstant {
                name: name.to_string(),
            })
    }

    /// Register a type under `name`, replacing any previous entry. Existing
    /// holders of the old handle are unaffected.
    pub fn define_type(&mut self, name: &str, data_type: Rc<DataType>) {
        self.types.insert(name.to_string(), data_type);
    }

    /// Evaluate a constant definition immediately and store the numeric
    /// result. On evaluation failure nothing is registered, so the
    /// repository never holds a partial or unevaluated entry.
    pub fn define_constant(&mut self, definition: &ConstantDefinition) -> Result<(), ParseError> {
        let value = evaluate(&definition.expr, self)?;
        self.constants.insert(definition.identifier.clone(), value);
        Ok(())
    }
}
