use matconv_map::{CatalogBuilder, MappingResolver, read_attributes};
use matconv_model::{MaterialDocument, PropertyValue, Rgba, SchemaDescriptor, ValueStore};
use matconv_transfer::{BatchConverter, ConversionPlan, TransferError};

fn unlit() -> SchemaDescriptor {
    SchemaDescriptor::new("Unlit/Color").with_attribute("_Color", "Color")
}

fn particles() -> SchemaDescriptor {
    SchemaDescriptor::new("Particles/Unlit")
        .with_attribute("_BaseColor", "Color")
        .with_attribute("_Cutoff", "Range")
}

fn plan() -> ConversionPlan {
    let catalog = CatalogBuilder::from_schemas(Some(&unlit()), Some(&particles())).expect("catalog");
    ConversionPlan::new(MappingResolver::auto_match(&catalog), "Unlit/Color", &particles())
}

fn material(name: &str, schema: &str, color: Rgba) -> MaterialDocument {
    MaterialDocument::for_schema(name, schema, &read_attributes(&unlit()))
        .with_value("_Color", PropertyValue::Color(color))
}

#[test]
fn batch_continues_past_refused_store() {
    let red = Rgba::new(1.0, 0.0, 0.0, 1.0);
    let blue = Rgba::new(0.0, 0.0, 1.0, 1.0);
    let mut stores = vec![
        material("Red", "Unlit/Color", red),
        material("Foreign", "Standard", Rgba::WHITE),
        material("Blue", "Unlit/Color", blue),
    ];
    let plan = plan();

    let report = BatchConverter::new(&plan).convert_all(stores.iter_mut());

    assert_eq!(report.len(), 3);
    assert_eq!(report.converted(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.copied(), 2);
    assert!(matches!(
        report.entries[1].result,
        Err(TransferError::SourceSchemaMismatch { .. })
    ));

    assert_eq!(stores[0].color("_BaseColor"), Some(red));
    assert_eq!(stores[2].color("_BaseColor"), Some(blue));
    assert_eq!(stores[2].schema_name(), Some("Particles/Unlit"));
    assert_eq!(stores[1].schema_name(), Some("Standard"));
    assert!(stores[1].has("_Color"));
}

#[test]
fn batch_trace_lists_each_store() {
    let mut stores = vec![
        material("Red", "Unlit/Color", Rgba::new(1.0, 0.0, 0.0, 1.0)),
        material("Foreign", "Standard", Rgba::WHITE),
    ];
    let plan = plan();

    let report = BatchConverter::new(&plan).convert_all(stores.iter_mut());

    insta::assert_snapshot!(report.to_string(), @r"
    Converting 2 materials from Unlit/Color to Particles/Unlit
    -----------------------------------------------------
    Converting material: Red
      Mapped Color: _Color -> _BaseColor = RGBA(1.000, 0.000, 0.000, 1.000)
    Not converted: store Foreign follows schema Standard, expected Unlit/Color
    -----------------------------------------------------
    ");
}

#[test]
fn empty_batch_reports_nothing() {
    let plan = plan();
    let mut stores: Vec<MaterialDocument> = Vec::new();

    let report = BatchConverter::new(&plan).convert_all(stores.iter_mut());

    assert!(report.is_empty());
    assert_eq!(report.copied(), 0);
}
