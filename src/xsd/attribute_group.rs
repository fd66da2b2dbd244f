use roxmltree::Node;

use crate::xsd::attribute::Attribute;
use crate::xsd::error::XsdError;
use crate::xsd::xstypes::QName;

/// A named attribute group (`xs:attributeGroup`) or a reference to one.
/// Groups may nest further group references.
#[derive(Clone, Debug)]
pub struct AttributeGroup {
    pub name: Option<String>,
    pub reference: Option<QName>,
    pub attributes: Vec<Attribute>,
    pub attribute_groups: Vec<AttributeGroup>,
}

impl AttributeGroup {
    pub(crate) fn map_from_xml(node: Node) -> Result<Self, XsdError> {
        let name = node.attribute("name").map(str::to_string);
        let reference = node
            .attribute("ref")
            .map(|r| QName::parse(r, node))
            .transpose()?;
        let mut attributes = Vec::new();
        let mut attribute_groups = Vec::new();
        for child in node.children().filter(|c| c.is_element()) {
            match child.tag_name().name() {
                "attribute" => attributes.push(Attribute::map_from_xml(child)?),
                "attributeGroup" => attribute_groups.push(AttributeGroup::map_from_xml(child)?),
                _ => {}
            }
        }
        Ok(AttributeGroup {
            name,
            reference,
            attributes,
            attribute_groups,
        })
    }
}
