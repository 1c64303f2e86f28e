//! CRUD operations on Director objects.
//!
//! Every operation resolves the object type first, so an unknown type fails
//! with [`Error::UnknownObjectType`] before anything is sent. Argument checks
//! follow, then exactly one request is issued.

use crate::client::{DirectorClient, Segment};
use crate::models::{DeleteObjects, NewObject};
use crate::Result;
use director_core::query::QueryParams;
use director_core::types::ObjectDefinition;
use director_core::Error;
use reqwest::Method;
use serde_json::Value;

/// Object operations bound to a [`DirectorClient`].
#[derive(Debug, Clone, Copy)]
pub struct Objects<'a> {
    client: &'a DirectorClient,
}

impl<'a> Objects<'a> {
    pub(crate) fn new(client: &'a DirectorClient) -> Self {
        Self { client }
    }

    /// List every object of a type, in server order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownObjectType`] for unregistered types and
    /// [`Error::Api`] for any rejected request.
    pub async fn list(&self, object_type: impl AsRef<str>) -> Result<Vec<ObjectDefinition>> {
        let descriptor = self.client.resolve(object_type.as_ref())?;
        let value = self
            .client
            .call(
                Method::GET,
                &descriptor,
                Segment::Collection,
                &QueryParams::new(),
                None,
            )
            .await?;
        into_definitions(value)
    }

    /// List objects of a type whose names match a free-text search.
    ///
    /// # Errors
    ///
    /// Same as [`Objects::list`].
    pub async fn search(
        &self,
        object_type: impl AsRef<str>,
        query: &str,
    ) -> Result<Vec<ObjectDefinition>> {
        let descriptor = self.client.resolve(object_type.as_ref())?;
        let mut params = QueryParams::new();
        params.push("q", query);
        let value = self
            .client
            .call(Method::GET, &descriptor, Segment::Collection, &params, None)
            .await?;
        into_definitions(value)
    }

    /// Fetch one object by name.
    ///
    /// Compound names such as `host!service` are sent verbatim. Types keyed
    /// by id (service apply rules) take the id as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] for an empty name and
    /// [`Error::NotFound`] if the Director does not know the object.
    pub async fn get(&self, object_type: impl AsRef<str>, name: &str) -> Result<ObjectDefinition> {
        let descriptor = self.client.resolve(object_type.as_ref())?;
        require_name(name, "get")?;

        let value = self
            .client
            .call(
                Method::GET,
                &descriptor,
                Segment::Resource,
                &QueryParams::keyed(descriptor.key, name),
                None,
            )
            .await?;

        match value {
            Value::Object(definition) => Ok(definition),
            other => Err(unexpected("an object", &other)),
        }
    }

    /// Create a new object. The name travels in the body as `object_name`.
    ///
    /// Returns the created definition, or `None` if the Director answered
    /// without a body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] when the name is taken and [`Error::Api`]
    /// when the Director rejects the definition (e.g. an unknown template).
    pub async fn create(
        &self,
        object_type: impl AsRef<str>,
        object: &NewObject,
    ) -> Result<Option<ObjectDefinition>> {
        let descriptor = self.client.resolve(object_type.as_ref())?;
        let body = Value::Object(object.to_body(descriptor.kind));

        let value = self
            .client
            .call(
                Method::POST,
                &descriptor,
                Segment::Resource,
                &QueryParams::new(),
                Some(&body),
            )
            .await?;
        into_optional_definition(value)
    }

    /// Create an object or replace an existing one with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] if `object` has no name and
    /// [`Error::Api`] when the Director rejects the definition.
    pub async fn upsert(
        &self,
        object_type: impl AsRef<str>,
        object: &NewObject,
    ) -> Result<Option<ObjectDefinition>> {
        let descriptor = self.client.resolve(object_type.as_ref())?;
        let name = object.name.as_deref().unwrap_or_default();
        require_name(name, "upsert")?;
        let body = Value::Object(object.to_body(descriptor.kind));

        let value = self
            .client
            .call(
                Method::PUT,
                &descriptor,
                Segment::Resource,
                &QueryParams::keyed(descriptor.key, name),
                Some(&body),
            )
            .await?;
        into_optional_definition(value)
    }

    /// Change attributes of an existing object.
    ///
    /// Only `attrs` is sent; the Director merges it into the stored object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] for an empty name and
    /// [`Error::NotFound`] if the object does not exist.
    pub async fn modify(
        &self,
        object_type: impl AsRef<str>,
        name: &str,
        attrs: &ObjectDefinition,
    ) -> Result<Option<ObjectDefinition>> {
        let descriptor = self.client.resolve(object_type.as_ref())?;
        require_name(name, "modify")?;
        let body = Value::Object(attrs.clone());

        let value = self
            .client
            .call(
                Method::POST,
                &descriptor,
                Segment::Resource,
                &QueryParams::keyed(descriptor.key, name),
                Some(&body),
            )
            .await?;
        into_optional_definition(value)
    }

    /// Same as [`Objects::modify`].
    ///
    /// # Errors
    ///
    /// Same as [`Objects::modify`].
    pub async fn update(
        &self,
        object_type: impl AsRef<str>,
        name: &str,
        attrs: &ObjectDefinition,
    ) -> Result<Option<ObjectDefinition>> {
        self.modify(object_type, name, attrs).await
    }

    /// Delete one object by name or every object matching a filter.
    ///
    /// Deleting a name that is already gone fails with [`Error::NotFound`];
    /// the Director's answer is passed through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] unless exactly one of name and
    /// filter is set.
    pub async fn delete(
        &self,
        object_type: impl AsRef<str>,
        request: &DeleteObjects,
    ) -> Result<Value> {
        let descriptor = self.client.resolve(object_type.as_ref())?;
        request.validate()?;

        let mut params = QueryParams::new();
        params.push_opt(descriptor.key, request.name.as_deref());
        let segment = match &request.filter {
            Some(filter) => {
                params.push("filter", &filter.expression);
                params.push_opt("filter_vars", filter.encoded_vars());
                Segment::Collection
            }
            None => Segment::Resource,
        };
        params.push("cascade", request.cascade);

        self.client
            .call(Method::DELETE, &descriptor, segment, &params, None)
            .await
    }
}

fn require_name(name: &str, operation: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidArguments(format!(
            "{operation} requires a non-empty object name"
        )));
    }
    Ok(())
}

fn into_definitions(value: Value) -> Result<Vec<ObjectDefinition>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("objects") {
            Some(Value::Array(items)) => items,
            _ => return Err(Error::Decode("expected an `objects` array".to_string())),
        },
        other => return Err(unexpected("a list of objects", &other)),
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(definition) => Ok(definition),
            other => Err(unexpected("an object", &other)),
        })
        .collect()
}

fn into_optional_definition(value: Value) -> Result<Option<ObjectDefinition>> {
    match value {
        Value::Null => Ok(None),
        Value::Object(definition) => Ok(Some(definition)),
        other => Err(unexpected("an object", &other)),
    }
}

fn unexpected(expected: &str, found: &Value) -> Error {
    let kind = match found {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    Error::Decode(format!("expected {expected}, got {kind}"))
}
