pub mod attribute;
pub mod attribute_group;
pub mod complex_type;
pub mod element;
pub mod error;
pub mod group;
pub mod schema;
pub mod shared;
pub mod simple_type;
pub mod xstypes;

pub use attribute::Attribute;
pub use attribute_group::AttributeGroup;
pub use complex_type::{ComplexType, ContentVariety};
pub use element::{Element, ElementKind};
pub use error::XsdError;
pub use group::Group;
pub use schema::Schema;
pub use shared::TypeDefinition;
pub use simple_type::{Restriction, SimpleType, Union};
pub use xstypes::{QName, XSD_NAMESPACE};

/// Maps a parsed schema document into the in-memory model. Includes are
/// recorded on the result but not followed; the driver resolves them
/// relative to the including file and merges via [`Schema::include`].
pub fn read_schema(document: &roxmltree::Document) -> Result<Schema, XsdError> {
    Schema::map_from_xml(document.root_element())
}
