use std::collections::BTreeMap;

use roxmltree::Node;

use crate::xsd::attribute::Attribute;
use crate::xsd::attribute_group::AttributeGroup;
use crate::xsd::complex_type::ComplexType;
use crate::xsd::element::{Element, ElementKind};
use crate::xsd::error::XsdError;
use crate::xsd::group::Group;
use crate::xsd::shared::TypeDefinition;
use crate::xsd::simple_type::SimpleType;

/// Aggregate of every top-level schema component, keyed by local name.
///
/// The maps are ordered by name so that emission order (and with it the
/// generated output) is deterministic regardless of declaration order.
#[derive(Debug, Default)]
pub struct Schema {
    pub type_map: BTreeMap<String, TypeDefinition>,
    pub element_map: BTreeMap<String, Element>,
    pub attribute_map: BTreeMap<String, Attribute>,
    pub group_map: BTreeMap<String, Group>,
    pub attribute_group_map: BTreeMap<String, AttributeGroup>,
    /// `schemaLocation` values of `xs:include` children, in document order.
    pub includes: Vec<String>,
}

impl Schema {
    pub fn map_from_xml(schema: Node) -> Result<Self, XsdError> {
        if schema.tag_name().name() != "schema" {
            return Err(XsdError::NotASchema(schema.tag_name().name().to_string()));
        }

        let mut result = Schema::default();
        for top_level in schema.children().filter(|c| c.is_element()) {
            match top_level.tag_name().name() {
                "include" => {
                    if let Some(location) = top_level.attribute("schemaLocation") {
                        result.includes.push(location.to_string());
                    }
                }
                "simpleType" => {
                    let simple = SimpleType::map_from_xml(top_level)?;
                    let name = simple
                        .name()
                        .ok_or(XsdError::UnnamedTopLevelComponent("simpleType"))?
                        .to_string();
                    result.type_map.insert(name, TypeDefinition::Simple(simple));
                }
                "complexType" => {
                    let complex = ComplexType::map_from_xml(top_level)?;
                    let name = complex
                        .name
                        .clone()
                        .ok_or(XsdError::UnnamedTopLevelComponent("complexType"))?;
                    result
                        .type_map
                        .insert(name, TypeDefinition::Complex(complex));
                }
                "element" => {
                    let element = Element::map_from_xml(top_level, ElementKind::Normal, false)?;
                    result.element_map.insert(element.name.clone(), element);
                }
                "attribute" => {
                    let attribute = Attribute::map_from_xml(top_level)?;
                    result
                        .attribute_map
                        .insert(attribute.name.clone(), attribute);
                }
                "group" => {
                    let group = Group::map_from_xml(top_level)?;
                    let name = group
                        .name
                        .clone()
                        .ok_or(XsdError::UnnamedTopLevelComponent("group"))?;
                    result.group_map.insert(name, group);
                }
                "attributeGroup" => {
                    let attribute_group = AttributeGroup::map_from_xml(top_level)?;
                    let name = attribute_group
                        .name
                        .clone()
                        .ok_or(XsdError::UnnamedTopLevelComponent("attributeGroup"))?;
                    result.attribute_group_map.insert(name, attribute_group);
                }
                // Imports cross namespaces and are not followed by this
                // compiler; annotations carry no components.
                "import" | "annotation" | "notation" => {}
                other => return Err(XsdError::UnknownTopLevelElement(other.to_string())),
            }
        }
        Ok(result)
    }

    /// Merges the components of an included schema document into this one.
    /// Later definitions overwrite earlier ones.
    pub fn include(&mut self, other: Schema) {
        self.type_map.extend(other.type_map);
        self.element_map.extend(other.element_map);
        self.attribute_map.extend(other.attribute_map);
        self.group_map.extend(other.group_map);
        self.attribute_group_map.extend(other.attribute_group_map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_components_land_in_their_maps() {
        let doc = roxmltree::Document::parse(
            r#"<schema xmlns="http://www.w3.org/2001/XMLSchema">
                 <include schemaLocation="common.xsd"/>
                 <simpleType name="color"><restriction base="string"/></simpleType>
                 <complexType name="node"><sequence/></complexType>
                 <element name="root" type="node"/>
                 <attribute name="shared"/>
                 <group name="body"><sequence/></group>
                 <attributeGroup name="common"/>
               </schema>"#,
        )
        .unwrap();
        let schema = Schema::map_from_xml(doc.root_element()).unwrap();
        assert_eq!(schema.includes, ["common.xsd"]);
        assert_eq!(schema.type_map.len(), 2);
        assert!(schema.element_map.contains_key("root"));
        assert!(schema.attribute_map.contains_key("shared"));
        assert!(schema.group_map.contains_key("body"));
        assert!(schema.attribute_group_map.contains_key("common"));
    }

    #[test]
    fn include_merge_overwrites_by_name() {
        let parse = |text: &str| {
            let doc = roxmltree::Document::parse(text).unwrap();
            Schema::map_from_xml(doc.root_element()).unwrap()
        };
        let mut root = parse(
            r#"<schema><simpleType name="t"><restriction base="a"/></simpleType></schema>"#,
        );
        let child = parse(
            r#"<schema><simpleType name="t"><restriction base="b"/></simpleType>
                 <element name="extra" type="t"/></schema>"#,
        );
        root.include(child);
        assert_eq!(root.type_map.len(), 1);
        assert!(root.element_map.contains_key("extra"));
    }
}
