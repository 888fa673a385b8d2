// crates/mcs-sql/src/model.rs
// ============================================================================
// Module: SQL Model
// Description: Entity/table mappings and registered accessor database functions.
// Purpose: Build, once at setup, everything query translation needs to know.
// Dependencies: crate::{error, function}, mcs-query, mcs-translate
// ============================================================================

//! ## Overview
//! A [`SqlModel`] maps entities to tables and properties to columns, and
//! holds the accessor functions registered through
//! [`SqlModel::has_mcs_get_string_function`]. Registration classifies the
//! function's signature immediately.

use std::collections::BTreeMap;

use mcs_query::MethodRef;
use mcs_translate::AccessorCatalog;
use mcs_translate::ParamType;
use mcs_translate::Shape;

use crate::error::SqlError;
use crate::function::DbFunction;

/// Default schema of tables and functions.
pub const DEFAULT_SCHEMA: &str = "dbo";

/// Table mapping of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMapping {
    /// Table name.
    pub table: String,
    /// Column names by property name.
    columns: BTreeMap<String, String>,
}

impl EntityMapping {
    /// Maps `property` to `column`.
    pub fn column(&mut self, property: impl Into<String>, column: impl Into<String>) -> &mut Self {
        self.columns.insert(property.into(), column.into());
        self
    }

    /// Returns the column of a property.
    #[must_use]
    pub fn column_of(&self, property: &str) -> Option<&str> {
        self.columns.get(property).map(String::as_str)
    }
}

/// Mapping model of the SQL backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlModel {
    /// Schema of tables and registered functions.
    schema: String,
    /// Entity mappings by entity name.
    entities: BTreeMap<String, EntityMapping>,
    /// Registered accessor functions.
    functions: Vec<DbFunction>,
}

impl Default for SqlModel {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEMA)
    }
}

impl SqlModel {
    /// Creates an empty model for `schema`.
    #[must_use]
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            entities: BTreeMap::new(),
            functions: Vec::new(),
        }
    }

    /// Model with all fourteen accessor overloads registered over raw text
    /// columns.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError`] when an overload fails to register.
    pub fn with_mcs_accessors(schema: impl Into<String>) -> Result<Self, SqlError> {
        let mut model = Self::new(schema);
        for identity in AccessorCatalog::extension(ParamType::Text).identities() {
            let method = MethodRef::extension(identity.name.as_str(), identity.params.clone());
            model.has_mcs_get_string_function(method)?;
        }
        Ok(model)
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Maps an entity to a table and returns the mapping for column setup.
    pub fn entity(&mut self, name: impl Into<String>, table: impl Into<String>) -> &mut EntityMapping {
        let table = table.into();
        let mapping = self.entities.entry(name.into()).or_insert_with(|| EntityMapping {
            table: table.clone(),
            columns: BTreeMap::new(),
        });
        mapping.table = table;
        mapping
    }

    /// Returns an entity mapping.
    #[must_use]
    pub fn mapping(&self, entity: &str) -> Option<&EntityMapping> {
        self.entities.get(entity)
    }

    /// Registers an accessor extension as the `mcs_get_string` database
    /// function and returns its classified shape. Registering the same method
    /// again replaces the earlier registration.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Translate`] with `UnsupportedSignature` when the
    /// signature is not a recognized shape, or [`SqlError::NotAnAccessor`]
    /// when the method is not one of the accessor overloads.
    pub fn has_mcs_get_string_function(&mut self, method: MethodRef) -> Result<Shape, SqlError> {
        let function = DbFunction::register(method, &self.schema)?;
        let shape = function.shape;
        self.functions.retain(|existing| existing.method != function.method);
        self.functions.push(function);
        Ok(shape)
    }

    /// Returns the registered accessor functions.
    #[must_use]
    pub fn functions(&self) -> &[DbFunction] {
        &self.functions
    }
}
