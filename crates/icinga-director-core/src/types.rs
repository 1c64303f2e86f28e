//! Director object types and the endpoint registry.
//!
//! Every supported object type maps to a pair of REST path segments: the
//! plural collection used for listing and filtered deletes, and the singular
//! resource addressed with a `name` query parameter. New types are supported
//! by adding a registry entry, never by branching in the request code.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// JSON representation of a Director object's attributes.
pub type ObjectDefinition = Map<String, Value>;

/// Value the Director expects in the `object_type` body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// A concrete object
    Object,
    /// A reusable template
    Template,
    /// An apply rule
    Apply,
}

impl ObjectKind {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Template => "template",
            Self::Apply => "apply",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// REST location of one object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointDescriptor {
    /// Logical type name, e.g. `HostTemplate`
    pub object_type: &'static str,
    /// Collection segment, e.g. `hosts/templates`
    pub collection: &'static str,
    /// Single-object segment, e.g. `host`
    pub resource: &'static str,
    /// Body `object_type` value used on create
    pub kind: ObjectKind,
    /// Query parameter that addresses a single object, `name` unless the
    /// Director keys the type by numeric id
    pub key: &'static str,
}

impl EndpointDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub const fn new(
        object_type: &'static str,
        collection: &'static str,
        resource: &'static str,
        kind: ObjectKind,
    ) -> Self {
        Self {
            object_type,
            collection,
            resource,
            kind,
            key: "name",
        }
    }

    /// Address single objects by another query parameter.
    #[must_use]
    pub const fn with_key(mut self, key: &'static str) -> Self {
        self.key = key;
        self
    }
}

/// Object types known to the Director.
pub const DEFAULT_ENDPOINTS: &[EndpointDescriptor] = &[
    EndpointDescriptor::new("Command", "commands", "command", ObjectKind::Object),
    EndpointDescriptor::new(
        "CommandTemplate",
        "commands/templates",
        "command",
        ObjectKind::Template,
    ),
    EndpointDescriptor::new("Endpoint", "endpoints", "endpoint", ObjectKind::Object),
    EndpointDescriptor::new("Host", "hosts", "host", ObjectKind::Object),
    EndpointDescriptor::new("HostGroup", "hostgroups", "hostgroup", ObjectKind::Object),
    EndpointDescriptor::new("HostTemplate", "hosts/templates", "host", ObjectKind::Template),
    EndpointDescriptor::new(
        "Notification",
        "notifications/applyrules",
        "notification",
        ObjectKind::Apply,
    ),
    EndpointDescriptor::new(
        "NotificationTemplate",
        "notifications/templates",
        "notification",
        ObjectKind::Template,
    ),
    EndpointDescriptor::new("Service", "services", "service", ObjectKind::Object),
    EndpointDescriptor::new(
        "ServiceApplyRule",
        "services/applyrules",
        "service",
        ObjectKind::Apply,
    )
    .with_key("id"),
    EndpointDescriptor::new("ServiceGroup", "servicegroups", "servicegroup", ObjectKind::Object),
    EndpointDescriptor::new(
        "ServiceTemplate",
        "services/templates",
        "service",
        ObjectKind::Template,
    ),
    EndpointDescriptor::new("Timeperiod", "timeperiods", "timeperiod", ObjectKind::Object),
    EndpointDescriptor::new(
        "TimeperiodTemplate",
        "timeperiods/templates",
        "timeperiod",
        ObjectKind::Template,
    ),
    EndpointDescriptor::new("User", "users", "user", ObjectKind::Object),
    EndpointDescriptor::new("UserGroup", "usergroups", "usergroup", ObjectKind::Object),
    EndpointDescriptor::new("UserTemplate", "users/templates", "user", ObjectKind::Template),
    EndpointDescriptor::new("Zone", "zones", "zone", ObjectKind::Object),
];

/// Immutable lookup table from object-type name to [`EndpointDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    entries: BTreeMap<&'static str, EndpointDescriptor>,
}

impl EndpointRegistry {
    /// Build a registry from descriptors. Later entries replace earlier ones
    /// with the same type name.
    #[must_use]
    pub fn from_descriptors<I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = EndpointDescriptor>,
    {
        let entries = descriptors
            .into_iter()
            .map(|descriptor| (descriptor.object_type, descriptor))
            .collect();
        Self { entries }
    }

    /// Return a copy of this registry with an additional entry.
    #[must_use]
    pub fn with_entry(mut self, descriptor: EndpointDescriptor) -> Self {
        self.entries.insert(descriptor.object_type, descriptor);
        self
    }

    /// Resolve an object type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownObjectType`] if the name is not registered.
    pub fn resolve(&self, object_type: &str) -> Result<&EndpointDescriptor> {
        self.entries
            .get(object_type)
            .ok_or_else(|| Error::UnknownObjectType(object_type.to_string()))
    }

    /// Returns true if the object type is registered.
    #[must_use]
    pub fn contains(&self, object_type: &str) -> bool {
        self.entries.contains_key(object_type)
    }

    /// Registered type names in lexical order.
    pub fn object_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::from_descriptors(DEFAULT_ENDPOINTS.iter().copied())
    }
}

/// Typed names for the default object types.
///
/// Operations accept any `&str`; this enum only saves callers from typos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    /// Check, event or notification command
    Command,
    /// Command template
    CommandTemplate,
    /// Icinga 2 endpoint
    Endpoint,
    /// Host object
    Host,
    /// Host group
    HostGroup,
    /// Host template
    HostTemplate,
    /// Notification apply rule
    Notification,
    /// Notification template
    NotificationTemplate,
    /// Service attached to a single host
    Service,
    /// Service apply rule
    ServiceApplyRule,
    /// Service group
    ServiceGroup,
    /// Service template
    ServiceTemplate,
    /// Time period
    Timeperiod,
    /// Time period template
    TimeperiodTemplate,
    /// User
    User,
    /// User group
    UserGroup,
    /// User template
    UserTemplate,
    /// Zone
    Zone,
}

impl ObjectType {
    /// Returns the registry name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Command => "Command",
            Self::CommandTemplate => "CommandTemplate",
            Self::Endpoint => "Endpoint",
            Self::Host => "Host",
            Self::HostGroup => "HostGroup",
            Self::HostTemplate => "HostTemplate",
            Self::Notification => "Notification",
            Self::NotificationTemplate => "NotificationTemplate",
            Self::Service => "Service",
            Self::ServiceApplyRule => "ServiceApplyRule",
            Self::ServiceGroup => "ServiceGroup",
            Self::ServiceTemplate => "ServiceTemplate",
            Self::Timeperiod => "Timeperiod",
            Self::TimeperiodTemplate => "TimeperiodTemplate",
            Self::User => "User",
            Self::UserGroup => "UserGroup",
            Self::UserTemplate => "UserTemplate",
            Self::Zone => "Zone",
        }
    }

    /// Returns all default object types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Command,
            Self::CommandTemplate,
            Self::Endpoint,
            Self::Host,
            Self::HostGroup,
            Self::HostTemplate,
            Self::Notification,
            Self::NotificationTemplate,
            Self::Service,
            Self::ServiceApplyRule,
            Self::ServiceGroup,
            Self::ServiceTemplate,
            Self::Timeperiod,
            Self::TimeperiodTemplate,
            Self::User,
            Self::UserGroup,
            Self::UserTemplate,
            Self::Zone,
        ]
    }
}

impl FromStr for ObjectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .find(|object_type| object_type.name() == s)
            .copied()
            .ok_or_else(|| Error::UnknownObjectType(s.to_string()))
    }
}

impl AsRef<str> for ObjectType {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Director filter expression with optional variable bindings.
///
/// The expression is opaque to the client and evaluated by the Director;
/// bindings are sent JSON-encoded next to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Expression in the Director filter syntax
    pub expression: String,
    /// Variables substituted into the expression server-side
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub vars: Map<String, Value>,
}

impl Filter {
    /// Create a filter without bindings.
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            vars: Map::new(),
        }
    }

    /// Bind a variable.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Replace all bindings.
    #[must_use]
    pub fn with_vars(mut self, vars: Map<String, Value>) -> Self {
        self.vars = vars;
        self
    }

    /// JSON-encoded bindings, or `None` when there are none.
    #[must_use]
    pub fn encoded_vars(&self) -> Option<String> {
        if self.vars.is_empty() {
            None
        } else {
            Some(Value::Object(self.vars.clone()).to_string())
        }
    }
}

impl From<&str> for Filter {
    fn from(expression: &str) -> Self {
        Self::new(expression)
    }
}

impl From<String> for Filter {
    fn from(expression: String) -> Self {
        Self::new(expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_registry_covers_every_object_type() {
        let registry = EndpointRegistry::default();
        assert_eq!(registry.len(), 18);
        for object_type in ObjectType::all() {
            assert!(registry.contains(object_type.name()), "{object_type}");
        }
    }

    #[test]
    fn resolve_known_type() {
        let registry = EndpointRegistry::default();
        let descriptor = registry.resolve("HostTemplate").unwrap();
        assert_eq!(descriptor.collection, "hosts/templates");
        assert_eq!(descriptor.resource, "host");
        assert_eq!(descriptor.kind, ObjectKind::Template);
    }

    #[test]
    fn apply_rules_and_command_templates() {
        let registry = EndpointRegistry::default();

        let rule = registry.resolve("ServiceApplyRule").unwrap();
        assert_eq!(rule.collection, "services/applyrules");
        assert_eq!(rule.resource, "service");
        assert_eq!(rule.key, "id");

        let template = registry.resolve("CommandTemplate").unwrap();
        assert_eq!(template.collection, "commands/templates");
        assert_eq!(template.key, "name");

        let named = registry
            .object_types()
            .filter(|name| registry.resolve(name).unwrap().key == "name")
            .count();
        assert_eq!(named, 17);
    }

    #[test]
    fn resolve_unknown_type() {
        let registry = EndpointRegistry::default();
        let err = registry.resolve("Hostt").unwrap_err();
        assert!(matches!(err, Error::UnknownObjectType(name) if name == "Hostt"));
    }

    #[test]
    fn resolve_is_case_sensitive() {
        let registry = EndpointRegistry::default();
        assert!(registry.resolve("host").is_err());
    }

    #[test]
    fn template_types_use_template_kind() {
        let registry = EndpointRegistry::default();
        for name in registry.object_types() {
            let descriptor = registry.resolve(name).unwrap();
            assert_eq!(
                descriptor.kind == ObjectKind::Template,
                name.ends_with("Template"),
                "{name}"
            );
        }
    }

    #[test]
    fn registry_can_be_extended() {
        let registry = EndpointRegistry::default().with_entry(EndpointDescriptor::new(
            "DataList",
            "data/lists",
            "datalist",
            ObjectKind::Object,
        ));
        assert_eq!(registry.len(), 19);
        assert_eq!(registry.resolve("DataList").unwrap().resource, "datalist");
    }

    #[test]
    fn object_type_round_trips_through_name() {
        for object_type in ObjectType::all() {
            assert_eq!(object_type.name().parse::<ObjectType>().unwrap(), *object_type);
        }
        assert!(matches!(
            "Bogus".parse::<ObjectType>(),
            Err(Error::UnknownObjectType(_))
        ));
    }

    #[test]
    fn object_kind_wire_values() {
        assert_eq!(ObjectKind::Object.as_str(), "object");
        assert_eq!(ObjectKind::Template.to_string(), "template");
        assert_eq!(serde_json::to_value(ObjectKind::Apply).unwrap(), json!("apply"));
    }

    #[test]
    fn filter_encodes_vars_as_json() {
        let filter = Filter::new("host.name=$name$").with_var("name", "web01");
        assert_eq!(filter.encoded_vars().as_deref(), Some(r#"{"name":"web01"}"#));
        assert!(Filter::from("match(\"vhost*\", service.name)")
            .encoded_vars()
            .is_none());
    }
}
