use roxmltree::Node;

use crate::xsd::attribute::Attribute;
use crate::xsd::attribute_group::AttributeGroup;
use crate::xsd::element::{collect_particle_elements, Element, ElementKind};
use crate::xsd::error::XsdError;
use crate::xsd::group::Group;
use crate::xsd::xstypes::QName;

/// Content variety of a complex type: ordinary element content, or simple
/// content (character data plus attributes, extending a simple base).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContentVariety {
    Element,
    Simple,
}

#[derive(Clone, Debug)]
pub struct ComplexType {
    pub name: Option<String>,
    /// Base type of a `complexContent`/`simpleContent` extension.
    pub base: Option<QName>,
    pub content: ContentVariety,
    /// Reference to a named element group contributing members.
    pub group: Option<Group>,
    pub elements: Vec<Element>,
    pub attributes: Vec<Attribute>,
    pub attribute_groups: Vec<AttributeGroup>,
}

impl ComplexType {
    pub(crate) fn map_from_xml(node: Node) -> Result<Self, XsdError> {
        let mut complex = ComplexType {
            name: node.attribute("name").map(str::to_string),
            base: None,
            content: ContentVariety::Element,
            group: None,
            elements: Vec::new(),
            attributes: Vec::new(),
            attribute_groups: Vec::new(),
        };
        complex.scan_children(node)?;
        Ok(complex)
    }

    /// Walks the children of a `complexType` or of an `extension`/
    /// `restriction` body nested inside one.
    fn scan_children(&mut self, node: Node) -> Result<(), XsdError> {
        for child in node.children().filter(|c| c.is_element()) {
            match child.tag_name().name() {
                "sequence" | "choice" | "all" => collect_particle_elements(
                    child,
                    ElementKind::Normal,
                    false,
                    &mut self.elements,
                    &mut self.group,
                )?,
                "group" => self.group = Some(Group::map_from_xml(child)?),
                "attribute" => self.attributes.push(Attribute::map_from_xml(child)?),
                "attributeGroup" => self
                    .attribute_groups
                    .push(AttributeGroup::map_from_xml(child)?),
                "complexContent" => self.scan_derivation(child, ContentVariety::Element)?,
                "simpleContent" => self.scan_derivation(child, ContentVariety::Simple)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn scan_derivation(&mut self, node: Node, content: ContentVariety) -> Result<(), XsdError> {
        self.content = content;
        for child in node.children().filter(|c| c.is_element()) {
            match child.tag_name().name() {
                "extension" | "restriction" => {
                    if let Some(base) = child.attribute("base") {
                        self.base = Some(QName::parse(base, child)?);
                    }
                    self.scan_children(child)?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_collects_base_and_own_members() {
        let doc = roxmltree::Document::parse(
            r#"<complexType name="derived">
                 <complexContent>
                   <extension base="baseType">
                     <sequence><element name="y"/></sequence>
                     <attribute name="flag"/>
                   </extension>
                 </complexContent>
               </complexType>"#,
        )
        .unwrap();
        let complex = ComplexType::map_from_xml(doc.root_element()).unwrap();
        assert_eq!(complex.base.as_ref().unwrap().local_name, "baseType");
        assert_eq!(complex.content, ContentVariety::Element);
        assert_eq!(complex.elements.len(), 1);
        assert_eq!(complex.attributes.len(), 1);
    }

    #[test]
    fn simple_content_is_tagged() {
        let doc = roxmltree::Document::parse(
            r#"<complexType name="valued">
                 <simpleContent>
                   <extension base="someSimple">
                     <attribute name="unit" use="required"/>
                   </extension>
                 </simpleContent>
               </complexType>"#,
        )
        .unwrap();
        let complex = ComplexType::map_from_xml(doc.root_element()).unwrap();
        assert_eq!(complex.content, ContentVariety::Simple);
        assert_eq!(complex.attributes.len(), 1);
        assert!(complex.elements.is_empty());
    }
}
