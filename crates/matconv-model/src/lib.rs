pub mod attribute;
pub mod error;
pub mod mapping;
pub mod preset;
pub mod schema;
pub mod store;
pub mod value;

pub use attribute::{Attribute, CanonicalType, RawPropertyType};
pub use error::{ModelError, Result, SelectionError};
pub use mapping::{MappingCandidate, MappingOption, MappingSet, MappingSummary};
pub use preset::{Preset, PresetPair};
pub use schema::{RawAttribute, SchemaDescriptor, SchemaIntrospect};
pub use store::{MaterialDocument, ValueStore};
pub use value::{PropertyValue, Rgba, TextureRef, TextureSlot, Vec2, Vec4};
