//! Record shape validation.
//!
//! Insert/write validate the record against a [`Schema`] before
//! applying; a failed check names the offending field and the violated
//! constraint. [`Schema::permissive`] accepts everything, for callers
//! that want an unvalidated store.

use crate::error::{Error, Result};
use crate::store::Record;
use serde_json::Value;

/// Expected JSON type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Bool,
    Array,
    Object,
}

impl FieldKind {
    fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::String, Value::String(_))
                | (Self::Number, Value::Number(_))
                | (Self::Bool, Value::Bool(_))
                | (Self::Array, Value::Array(_))
                | (Self::Object, Value::Object(_))
        )
    }

    fn describe(self) -> &'static str {
        match self {
            Self::String => "must be a string",
            Self::Number => "must be a number",
            Self::Bool => "must be a boolean",
            Self::Array => "must be an array",
            Self::Object => "must be an object",
        }
    }
}

/// A single field requirement.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

/// Record shape: a list of field requirements.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// A schema with no requirements; every record passes.
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            required,
        });
        self
    }

    /// Checks the record, reporting the first violated requirement.
    pub fn validate(&self, record: &Record) -> Result<()> {
        for spec in &self.fields {
            match record.field(&spec.name) {
                None => {
                    if spec.required {
                        return Err(Error::SchemaValidation {
                            field: spec.name.clone(),
                            constraint: "is required".into(),
                        });
                    }
                }
                Some(value) => {
                    if !spec.kind.accepts(&value) {
                        return Err(Error::SchemaValidation {
                            field: spec.name.clone(),
                            constraint: spec.kind.describe().into(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
