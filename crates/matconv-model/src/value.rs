//! Concrete attribute values held by a value store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::CanonicalType;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RGBA({:.3}, {:.3}, {:.3}, {:.3})",
            self.r, self.g, self.b, self.a
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);
    pub const ONE: Vec2 = Vec2::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

impl fmt::Display for Vec4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.2}, {:.2}, {:.2}, {:.2})",
            self.x, self.y, self.z, self.w
        )
    }
}

/// Reference to a texture asset, by asset name or path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureRef(pub String);

impl TextureRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Texture attribute value: the reference and its tiling, moved as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSlot {
    #[serde(default)]
    pub texture: Option<TextureRef>,
    #[serde(default)]
    pub offset: Vec2,
    #[serde(default = "default_scale")]
    pub scale: Vec2,
}

fn default_scale() -> Vec2 {
    Vec2::ONE
}

impl Default for TextureSlot {
    fn default() -> Self {
        Self {
            texture: None,
            offset: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}

impl TextureSlot {
    pub fn new(texture: Option<TextureRef>, offset: Vec2, scale: Vec2) -> Self {
        Self {
            texture,
            offset,
            scale,
        }
    }

    /// Name of the referenced texture, or `null` when the slot is empty.
    pub fn texture_name(&self) -> &str {
        self.texture.as_ref().map_or("null", TextureRef::as_str)
    }
}

/// A typed value read from or written to a value store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Scalar(f32),
    Color(Rgba),
    Vector(Vec4),
    Texture(TextureSlot),
}

impl PropertyValue {
    pub fn kind(&self) -> CanonicalType {
        match self {
            PropertyValue::Scalar(_) => CanonicalType::Scalar,
            PropertyValue::Color(_) => CanonicalType::Color,
            PropertyValue::Vector(_) => CanonicalType::Vector,
            PropertyValue::Texture(_) => CanonicalType::Texture,
        }
    }

    /// Value a freshly declared attribute of `kind` starts with.
    ///
    /// Returns `None` for [`CanonicalType::Unsupported`].
    pub fn default_for(kind: CanonicalType) -> Option<PropertyValue> {
        match kind {
            CanonicalType::Scalar => Some(PropertyValue::Scalar(0.0)),
            CanonicalType::Color => Some(PropertyValue::Color(Rgba::WHITE)),
            CanonicalType::Vector => Some(PropertyValue::Vector(Vec4::ZERO)),
            CanonicalType::Texture => Some(PropertyValue::Texture(TextureSlot::default())),
            CanonicalType::Unsupported => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Scalar(value) => write!(f, "{value}"),
            PropertyValue::Color(color) => write!(f, "{color}"),
            PropertyValue::Vector(vector) => write!(f, "{vector}"),
            PropertyValue::Texture(slot) => f.write_str(slot.texture_name()),
        }
    }
}
