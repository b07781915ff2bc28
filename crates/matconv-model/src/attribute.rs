use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind bucket used for compatibility checks between two schemas.
///
/// Two attributes can be mapped onto each other only when their kinds are
/// equal and neither is [`CanonicalType::Unsupported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalType {
    /// Single numeric value (floats and ranges).
    Scalar,
    /// Four-component color.
    Color,
    /// Four-component vector.
    Vector,
    /// Texture reference plus tiling offset and scale.
    Texture,
    /// Anything the engine does not know how to transfer.
    Unsupported,
}

impl CanonicalType {
    pub const ALL: [CanonicalType; 5] = [
        CanonicalType::Scalar,
        CanonicalType::Color,
        CanonicalType::Vector,
        CanonicalType::Texture,
        CanonicalType::Unsupported,
    ];

    /// Returns the kind name. Catalog ordering sorts on this string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalType::Scalar => "Scalar",
            CanonicalType::Color => "Color",
            CanonicalType::Vector => "Vector",
            CanonicalType::Texture => "Texture",
            CanonicalType::Unsupported => "Unsupported",
        }
    }

    /// Returns true if values of this kind can be transferred at all.
    pub fn is_mappable(&self) -> bool {
        !matches!(self, CanonicalType::Unsupported)
    }

    /// Returns true if an attribute of this kind may be mapped onto one of `other`.
    pub fn is_compatible_with(&self, other: CanonicalType) -> bool {
        *self == other && self.is_mappable()
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown attribute kind: {s}"))
    }
}

/// Property-type code as reported by the host's schema introspection.
///
/// Serialized as the bare code string. Codes the engine does not recognise
/// are preserved in [`RawPropertyType::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RawPropertyType {
    Float,
    Range,
    Color,
    Vector,
    TexEnv,
    Int,
    Unknown(String),
}

impl RawPropertyType {
    pub fn as_str(&self) -> &str {
        match self {
            RawPropertyType::Float => "Float",
            RawPropertyType::Range => "Range",
            RawPropertyType::Color => "Color",
            RawPropertyType::Vector => "Vector",
            RawPropertyType::TexEnv => "TexEnv",
            RawPropertyType::Int => "Int",
            RawPropertyType::Unknown(code) => code,
        }
    }
}

impl From<String> for RawPropertyType {
    fn from(code: String) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "float" => RawPropertyType::Float,
            "range" => RawPropertyType::Range,
            "color" => RawPropertyType::Color,
            "vector" => RawPropertyType::Vector,
            "texenv" | "texture" => RawPropertyType::TexEnv,
            "int" | "integer" => RawPropertyType::Int,
            _ => RawPropertyType::Unknown(code),
        }
    }
}

impl From<&str> for RawPropertyType {
    fn from(code: &str) -> Self {
        RawPropertyType::from(code.to_string())
    }
}

impl From<RawPropertyType> for String {
    fn from(raw: RawPropertyType) -> Self {
        raw.as_str().to_string()
    }
}

impl fmt::Display for RawPropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named, typed slot within a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub kind: CanonicalType,
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: CanonicalType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("texture".parse::<CanonicalType>(), Ok(CanonicalType::Texture));
        assert!("Float".parse::<CanonicalType>().is_err());
    }

    #[test]
    fn unsupported_is_never_compatible() {
        assert!(CanonicalType::Color.is_compatible_with(CanonicalType::Color));
        assert!(!CanonicalType::Color.is_compatible_with(CanonicalType::Vector));
        assert!(!CanonicalType::Unsupported.is_compatible_with(CanonicalType::Unsupported));
    }

    #[test]
    fn raw_type_keeps_unknown_codes() {
        let raw: RawPropertyType = serde_json::from_str("\"Matrix\"").expect("parse raw type");
        assert_eq!(raw, RawPropertyType::Unknown("Matrix".to_string()));
        assert_eq!(serde_json::to_string(&raw).expect("serialize"), "\"Matrix\"");

        let tex: RawPropertyType = serde_json::from_str("\"TexEnv\"").expect("parse raw type");
        assert_eq!(tex, RawPropertyType::TexEnv);
    }
}
