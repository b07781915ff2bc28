//! Schema introspection seam.

use serde::{Deserialize, Serialize};

use crate::attribute::RawPropertyType;

/// Read-only view of a schema's attribute table, as exposed by the host.
///
/// Indices run from `0` to `attribute_count() - 1`; out-of-range lookups
/// return `None`.
pub trait SchemaIntrospect {
    fn schema_name(&self) -> &str;
    fn attribute_count(&self) -> usize;
    fn attribute_name(&self, index: usize) -> Option<&str>;
    fn attribute_raw_type(&self, index: usize) -> Option<RawPropertyType>;
}

/// One declared attribute, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub raw_type: RawPropertyType,
}

/// A named schema with its declared attributes in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
}

impl SchemaDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute declaration.
    #[must_use]
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        raw_type: impl Into<RawPropertyType>,
    ) -> Self {
        self.attributes.push(RawAttribute {
            name: name.into(),
            raw_type: raw_type.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl SchemaIntrospect for SchemaDescriptor {
    fn schema_name(&self) -> &str {
        &self.name
    }

    fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    fn attribute_name(&self, index: usize) -> Option<&str> {
        self.attributes.get(index).map(|a| a.name.as_str())
    }

    fn attribute_raw_type(&self, index: usize) -> Option<RawPropertyType> {
        self.attributes.get(index).map(|a| a.raw_type.clone())
    }
}
