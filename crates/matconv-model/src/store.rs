//! Value stores: live, material-like objects holding typed attribute values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, CanonicalType};
use crate::error::{ModelError, Result};
use crate::value::{PropertyValue, Rgba, TextureSlot, Vec2, Vec4};

/// Key/typed-value store the transfer engine reads from and writes to.
///
/// Texture values carry their tiling offset and scale; the engine always
/// reads and writes them together through [`ValueStore::read`] and
/// [`ValueStore::write`].
pub trait ValueStore {
    /// Human-readable name used in reports and logs.
    fn label(&self) -> &str;

    /// Name of the schema the store currently follows, if any.
    fn schema_name(&self) -> Option<&str>;

    /// Kind of the attribute `name`, or `None` if the store lacks it.
    fn attribute_kind(&self, name: &str) -> Option<CanonicalType>;

    fn read(&self, name: &str) -> Option<PropertyValue>;

    /// Writes `value` under `name`.
    ///
    /// # Errors
    ///
    /// Fails if the attribute does not exist or holds a different kind.
    fn write(&mut self, name: &str, value: PropertyValue) -> Result<()>;

    /// Switches the store to another schema.
    fn switch_schema(&mut self, schema_name: &str, attributes: &[Attribute]);

    fn has(&self, name: &str) -> bool {
        self.attribute_kind(name).is_some()
    }

    fn scalar(&self, name: &str) -> Option<f32> {
        match self.read(name)? {
            PropertyValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    fn color(&self, name: &str) -> Option<Rgba> {
        match self.read(name)? {
            PropertyValue::Color(value) => Some(value),
            _ => None,
        }
    }

    fn vector(&self, name: &str) -> Option<Vec4> {
        match self.read(name)? {
            PropertyValue::Vector(value) => Some(value),
            _ => None,
        }
    }

    fn texture(&self, name: &str) -> Option<TextureSlot> {
        match self.read(name)? {
            PropertyValue::Texture(slot) => Some(slot),
            _ => None,
        }
    }

    fn texture_offset(&self, name: &str) -> Option<Vec2> {
        self.texture(name).map(|slot| slot.offset)
    }

    fn texture_scale(&self, name: &str) -> Option<Vec2> {
        self.texture(name).map(|slot| slot.scale)
    }

    /// Writes a scalar through [`ValueStore::write`]; the other typed
    /// setters work the same way.
    ///
    /// # Errors
    ///
    /// Fails if the attribute does not exist or holds a different kind.
    fn set_scalar(&mut self, name: &str, value: f32) -> Result<()> {
        self.write(name, PropertyValue::Scalar(value))
    }

    fn set_color(&mut self, name: &str, value: Rgba) -> Result<()> {
        self.write(name, PropertyValue::Color(value))
    }

    fn set_vector(&mut self, name: &str, value: Vec4) -> Result<()> {
        self.write(name, PropertyValue::Vector(value))
    }

    fn set_texture(&mut self, name: &str, slot: TextureSlot) -> Result<()> {
        self.write(name, PropertyValue::Texture(slot))
    }

    /// Replaces the tiling offset of a texture, keeping its reference and scale.
    fn set_texture_offset(&mut self, name: &str, offset: Vec2) -> Result<()> {
        let slot = texture_for_edit(self, name)?;
        self.set_texture(name, TextureSlot { offset, ..slot })
    }

    /// Replaces the tiling scale of a texture, keeping its reference and offset.
    fn set_texture_scale(&mut self, name: &str, scale: Vec2) -> Result<()> {
        let slot = texture_for_edit(self, name)?;
        self.set_texture(name, TextureSlot { scale, ..slot })
    }
}

/// Current slot of the texture attribute `name`, for partial edits.
fn texture_for_edit<S: ValueStore + ?Sized>(store: &S, name: &str) -> Result<TextureSlot> {
    match store.attribute_kind(name) {
        None => Err(ModelError::UnknownAttribute {
            store: store.label().to_string(),
            name: name.to_string(),
        }),
        Some(CanonicalType::Texture) => Ok(store.texture(name).unwrap_or_default()),
        Some(found) => Err(ModelError::KindMismatch {
            name: name.to_string(),
            expected: CanonicalType::Texture,
            found,
        }),
    }
}

/// In-memory material: a name, the schema it follows, and its values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDocument {
    pub name: String,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl MaterialDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            properties: BTreeMap::new(),
        }
    }

    /// Creates a document following `schema_name` with every attribute at its default.
    pub fn for_schema(
        name: impl Into<String>,
        schema_name: &str,
        attributes: &[Attribute],
    ) -> Self {
        let mut document = Self::new(name);
        document.switch_schema(schema_name, attributes);
        document
    }

    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Checks every stored value against the schema's attribute kinds.
    ///
    /// # Errors
    ///
    /// Returns the first value that is missing from `attributes` or stored
    /// with a different kind.
    pub fn validate(&self, attributes: &[Attribute]) -> Result<()> {
        for (name, value) in &self.properties {
            let Some(attribute) = attributes.iter().find(|a| &a.name == name) else {
                return Err(ModelError::UnknownAttribute {
                    store: self.name.clone(),
                    name: name.clone(),
                });
            };
            if !attribute.kind.is_mappable() {
                return Err(ModelError::UnsupportedAttribute {
                    name: name.clone(),
                    kind: attribute.kind,
                });
            }
            if attribute.kind != value.kind() {
                return Err(ModelError::KindMismatch {
                    name: name.clone(),
                    expected: attribute.kind,
                    found: value.kind(),
                });
            }
        }
        Ok(())
    }
}

impl ValueStore for MaterialDocument {
    fn label(&self) -> &str {
        &self.name
    }

    fn schema_name(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    fn attribute_kind(&self, name: &str) -> Option<CanonicalType> {
        self.properties.get(name).map(PropertyValue::kind)
    }

    fn read(&self, name: &str) -> Option<PropertyValue> {
        self.properties.get(name).cloned()
    }

    fn write(&mut self, name: &str, value: PropertyValue) -> Result<()> {
        let Some(slot) = self.properties.get_mut(name) else {
            return Err(ModelError::UnknownAttribute {
                store: self.name.clone(),
                name: name.to_string(),
            });
        };
        if slot.kind() != value.kind() {
            return Err(ModelError::KindMismatch {
                name: name.to_string(),
                expected: slot.kind(),
                found: value.kind(),
            });
        }
        *slot = value;
        Ok(())
    }

    /// Values whose name and kind survive are kept, new attributes start at
    /// their defaults, attributes the new schema lacks are dropped.
    fn switch_schema(&mut self, schema_name: &str, attributes: &[Attribute]) {
        let mut previous = std::mem::take(&mut self.properties);
        for attribute in attributes {
            let kept = previous
                .remove(&attribute.name)
                .filter(|value| value.kind() == attribute.kind);
            if let Some(value) = kept.or_else(|| PropertyValue::default_for(attribute.kind)) {
                self.properties.insert(attribute.name.clone(), value);
            }
        }
        self.schema = Some(schema_name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::TextureRef;

    fn lit_attributes() -> Vec<Attribute> {
        vec![
            Attribute::new("_BaseColor", CanonicalType::Color),
            Attribute::new("_BaseMap", CanonicalType::Texture),
            Attribute::new("_Smoothness", CanonicalType::Scalar),
        ]
    }

    #[test]
    fn write_rejects_unknown_and_mismatched_attributes() {
        let mut doc = MaterialDocument::for_schema("Rock", "Lit", &lit_attributes());
        assert!(matches!(
            doc.write("_Missing", PropertyValue::Scalar(1.0)),
            Err(ModelError::UnknownAttribute { .. })
        ));
        assert!(matches!(
            doc.write("_BaseColor", PropertyValue::Scalar(1.0)),
            Err(ModelError::KindMismatch { .. })
        ));
        doc.write("_Smoothness", PropertyValue::Scalar(0.7))
            .expect("write scalar");
        assert_eq!(doc.scalar("_Smoothness"), Some(0.7));
    }

    #[test]
    fn typed_setters_write_through_the_store() {
        let mut doc = MaterialDocument::for_schema("Rock", "Lit", &lit_attributes());
        doc.set_color("_BaseColor", Rgba::new(0.1, 0.2, 0.3, 1.0))
            .expect("set color");
        doc.set_texture(
            "_BaseMap",
            TextureSlot::new(
                Some(TextureRef::new("rock_albedo")),
                Vec2::new(0.5, 0.5),
                Vec2::new(2.0, 2.0),
            ),
        )
        .expect("set texture");
        doc.set_texture_offset("_BaseMap", Vec2::new(0.25, 0.0))
            .expect("set offset");
        doc.set_texture_scale("_BaseMap", Vec2::new(4.0, 4.0))
            .expect("set scale");

        assert_eq!(doc.color("_BaseColor"), Some(Rgba::new(0.1, 0.2, 0.3, 1.0)));
        assert_eq!(
            doc.texture("_BaseMap"),
            Some(TextureSlot::new(
                Some(TextureRef::new("rock_albedo")),
                Vec2::new(0.25, 0.0),
                Vec2::new(4.0, 4.0),
            ))
        );
        assert!(matches!(
            doc.set_vector("_BaseColor", Vec4::ZERO),
            Err(ModelError::KindMismatch { .. })
        ));
        assert!(matches!(
            doc.set_texture_scale("_Smoothness", Vec2::new(1.0, 1.0)),
            Err(ModelError::KindMismatch { .. })
        ));
        assert!(matches!(
            doc.set_scalar("_Missing", 1.0),
            Err(ModelError::UnknownAttribute { .. })
        ));
    }

    #[test]
    fn switch_schema_keeps_surviving_values() {
        let mut doc = MaterialDocument::new("Rock")
            .with_value("_BaseColor", PropertyValue::Color(Rgba::new(1.0, 0.0, 0.0, 1.0)))
            .with_value("_Glossiness", PropertyValue::Scalar(0.4))
            .with_value(
                "_BaseMap",
                PropertyValue::Texture(TextureSlot::new(
                    Some(TextureRef::new("rock_albedo")),
                    Vec2::new(0.5, 0.5),
                    Vec2::new(2.0, 2.0),
                )),
            );
        doc.switch_schema("Lit", &lit_attributes());

        assert_eq!(doc.schema_name(), Some("Lit"));
        assert_eq!(doc.color("_BaseColor"), Some(Rgba::new(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(doc.texture_scale("_BaseMap"), Some(Vec2::new(2.0, 2.0)));
        assert_eq!(doc.scalar("_Smoothness"), Some(0.0));
        assert!(!doc.has("_Glossiness"));
    }

    #[test]
    fn validate_reports_kind_mismatch() {
        let doc = MaterialDocument::new("Rock")
            .with_value("_BaseColor", PropertyValue::Vector(Vec4::ZERO));
        assert_eq!(
            doc.validate(&lit_attributes()),
            Err(ModelError::KindMismatch {
                name: "_BaseColor".to_string(),
                expected: CanonicalType::Color,
                found: CanonicalType::Vector,
            })
        );
    }
}
