//! Raw property-type classification.

use matconv_model::{Attribute, CanonicalType, RawPropertyType, SchemaIntrospect};

/// Maps a host property-type code onto its canonical kind.
///
/// Floats and ranges are scalars; unrecognised codes are unsupported.
pub fn classify(raw: &RawPropertyType) -> CanonicalType {
    match raw {
        RawPropertyType::Float | RawPropertyType::Range => CanonicalType::Scalar,
        RawPropertyType::Color => CanonicalType::Color,
        RawPropertyType::Vector => CanonicalType::Vector,
        RawPropertyType::TexEnv => CanonicalType::Texture,
        RawPropertyType::Int | RawPropertyType::Unknown(_) => CanonicalType::Unsupported,
    }
}

/// Reads every attribute of `schema` once, classifying its raw type.
pub fn read_attributes<S: SchemaIntrospect + ?Sized>(schema: &S) -> Vec<Attribute> {
    (0..schema.attribute_count())
        .filter_map(|index| {
            let name = schema.attribute_name(index)?;
            let raw = schema.attribute_raw_type(index)?;
            Some(Attribute::new(name, classify(&raw)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use matconv_model::SchemaDescriptor;

    use super::*;

    #[test]
    fn classification_is_total() {
        assert_eq!(classify(&RawPropertyType::Range), CanonicalType::Scalar);
        assert_eq!(classify(&RawPropertyType::TexEnv), CanonicalType::Texture);
        assert_eq!(classify(&RawPropertyType::Int), CanonicalType::Unsupported);
        assert_eq!(
            classify(&RawPropertyType::from("Matrix")),
            CanonicalType::Unsupported
        );
    }

    #[test]
    fn reads_attributes_in_declaration_order() {
        let schema = SchemaDescriptor::new("Legacy Shaders/Diffuse")
            .with_attribute("_Color", "Color")
            .with_attribute("_MainTex", "TexEnv");
        assert_eq!(
            read_attributes(&schema),
            vec![
                Attribute::new("_Color", CanonicalType::Color),
                Attribute::new("_MainTex", CanonicalType::Texture),
            ]
        );
    }
}
