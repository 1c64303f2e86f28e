//! Request payloads for Director object operations.

use director_core::types::{Filter, ObjectDefinition, ObjectKind};
use director_core::{Error, Result};
use serde_json::Value;

/// Definition of an object to create or replace.
///
/// The request body is `attrs` plus `object_name`, `object_type` and
/// `imports`. An explicit name and templates win over same-named keys in
/// `attrs`; `object_type` defaults to the registry kind unless `attrs` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewObject {
    /// Sent as `object_name`
    pub name: Option<String>,
    /// Templates to import, in order
    pub templates: Vec<String>,
    /// Explicit attributes
    pub attrs: ObjectDefinition,
}

impl NewObject {
    /// Create an empty definition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a definition with a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Import one more template.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.templates.push(template.into());
        self
    }

    /// Replace the imported templates.
    #[must_use]
    pub fn with_templates<I, S>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.templates = templates.into_iter().map(Into::into).collect();
        self
    }

    /// Set a single attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Replace all attributes.
    #[must_use]
    pub fn with_attrs(mut self, attrs: ObjectDefinition) -> Self {
        self.attrs = attrs;
        self
    }

    pub(crate) fn to_body(&self, kind: ObjectKind) -> ObjectDefinition {
        let mut body = self.attrs.clone();
        if let Some(name) = &self.name {
            body.insert("object_name".to_string(), Value::from(name.as_str()));
        }
        body.entry("object_type")
            .or_insert_with(|| Value::from(kind.as_str()));
        if !self.templates.is_empty() {
            body.insert("imports".to_string(), Value::from(self.templates.clone()));
        }
        body
    }
}

/// Selection of objects to delete: exactly one of `name` or `filter`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteObjects {
    /// Name of a single object
    pub name: Option<String>,
    /// Filter matching any number of objects
    pub filter: Option<Filter>,
    /// Also delete dependent objects
    pub cascade: bool,
}

impl DeleteObjects {
    /// Delete one object by name.
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Delete every object matching a filter.
    #[must_use]
    pub fn matching(filter: impl Into<Filter>) -> Self {
        Self {
            filter: Some(filter.into()),
            ..Self::default()
        }
    }

    /// Set whether dependent objects are removed as well.
    #[must_use]
    pub const fn cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match (&self.name, &self.filter) {
            (Some(_), Some(_)) => Err(Error::InvalidArguments(
                "delete takes either a name or a filter, not both".to_string(),
            )),
            (None, None) => Err(Error::InvalidArguments(
                "delete requires a name or a filter".to_string(),
            )),
            (Some(name), None) if name.is_empty() => Err(Error::InvalidArguments(
                "delete requires a non-empty name".to_string(),
            )),
            (None, Some(filter)) if filter.expression.trim().is_empty() => Err(
                Error::InvalidArguments("delete requires a non-empty filter".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

impl Default for DeleteObjects {
    fn default() -> Self {
        Self {
            name: None,
            filter: None,
            cascade: true,
        }
    }
}
