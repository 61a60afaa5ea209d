use serde::Serialize;

/// Metadata reported by one schema source.
///
/// Only some source formats carry metadata, so every field is optional. The
/// owning [`SchemaInstance`](crate::SchemaInstance) keeps models in file
/// processing order.
///
/// # Examples
///
/// ```
/// use config_schema_core::Model;
///
/// let model = Model::new("example-interfaces")
///     .with_organization("Example Networks")
///     .with_version("2024-03-01");
///
/// assert_eq!(model.name(), Some("example-interfaces"));
/// assert_eq!(model.organization(), Some("Example Networks"));
/// assert_eq!(model.version(), Some("2024-03-01"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

impl Model {
    /// Creates a model with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            organization: None,
            version: None,
        }
    }

    /// Sets the publishing organization.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Sets the version, typically a revision date.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Module name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Publishing organization.
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    /// Version string.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}
