//! Variables map for GraphQL operations.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{Scalar, ScalarError};

/// Named variables for a GraphQL query or mutation.
///
/// Each entry remembers the scalar type it was inserted with, so the
/// operation header (`$id: uuid!, $limit: Int`) can be produced from the same
/// map that is sent as the `variables` object. Serializes as that object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vars {
    values: Map<String, Value>,
    types: BTreeMap<String, String>,
}

impl Vars {
    /// Empty variables map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a non-null variable.
    ///
    /// # Errors
    /// Returns [`ScalarError::Variable`] when the value cannot be serialized.
    pub fn insert<S>(&mut self, name: impl Into<String>, value: S) -> Result<(), ScalarError>
    where
        S: Scalar + Serialize,
    {
        self.insert_typed(name.into(), S::non_null_type(), &value)
    }

    /// Insert a nullable variable; `None` is sent as JSON `null`.
    ///
    /// # Errors
    /// Returns [`ScalarError::Variable`] when the value cannot be serialized.
    pub fn insert_nullable<S>(
        &mut self,
        name: impl Into<String>,
        value: Option<S>,
    ) -> Result<(), ScalarError>
    where
        S: Scalar + Serialize,
    {
        self.insert_typed(name.into(), S::TYPE_NAME.to_owned(), &value)
    }

    /// Builder form of [`Vars::insert`].
    ///
    /// # Errors
    /// Returns [`ScalarError::Variable`] when the value cannot be serialized.
    pub fn with<S>(mut self, name: impl Into<String>, value: S) -> Result<Self, ScalarError>
    where
        S: Scalar + Serialize,
    {
        self.insert(name, value)?;
        Ok(self)
    }

    /// Insert a variable of any serializable shape under an explicit type
    /// reference, e.g. `[uuid!]!` or `todos_insert_input!`.
    ///
    /// # Errors
    /// Returns [`ScalarError::Variable`] when the value cannot be serialized.
    ///
    /// # Examples
    /// ```
    /// use hasura_scalars::{Uuid, Vars};
    ///
    /// let mut vars = Vars::new();
    /// vars.insert_as("ids", "[uuid!]!", &[Uuid::new(""), Uuid::new("")])
    ///     .expect("list serializes");
    /// assert_eq!(vars.declarations(), "$ids: [uuid!]!");
    /// ```
    pub fn insert_as<T>(
        &mut self,
        name: impl Into<String>,
        type_ref: impl Into<String>,
        value: &T,
    ) -> Result<(), ScalarError>
    where
        T: Serialize + ?Sized,
    {
        self.insert_typed(name.into(), type_ref.into(), value)
    }

    /// Builder form of [`Vars::insert_as`].
    ///
    /// # Errors
    /// Returns [`ScalarError::Variable`] when the value cannot be serialized.
    pub fn with_as<T>(
        mut self,
        name: impl Into<String>,
        type_ref: impl Into<String>,
        value: &T,
    ) -> Result<Self, ScalarError>
    where
        T: Serialize + ?Sized,
    {
        self.insert_as(name, type_ref, value)?;
        Ok(self)
    }

    fn insert_typed<T: Serialize + ?Sized>(
        &mut self,
        name: String,
        type_ref: String,
        value: &T,
    ) -> Result<(), ScalarError> {
        let json = serde_json::to_value(value).map_err(|source| ScalarError::Variable {
            name: name.clone(),
            source,
        })?;
        self.types.insert(name.clone(), type_ref);
        self.values.insert(name, json);
        Ok(())
    }

    /// Serialized value of a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variables were inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Variable declarations for an operation header, sorted by name.
    #[must_use]
    pub fn declarations(&self) -> String {
        self.types
            .iter()
            .map(|(name, type_ref)| format!("${name}: {type_ref}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Unwrap into the JSON object sent as `variables`.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

impl Serialize for Vars {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}
