use roxmltree::Node;

use crate::xsd::element::{collect_particle_elements, Element, ElementKind};
use crate::xsd::error::XsdError;
use crate::xsd::xstypes::QName;

/// A named element group (`xs:group`) or a reference to one.
#[derive(Clone, Debug)]
pub struct Group {
    pub name: Option<String>,
    pub reference: Option<QName>,
    pub elements: Vec<Element>,
}

impl Group {
    pub(crate) fn map_from_xml(node: Node) -> Result<Self, XsdError> {
        let name = node.attribute("name").map(str::to_string);
        let reference = node
            .attribute("ref")
            .map(|r| QName::parse(r, node))
            .transpose()?;
        let mut elements = Vec::new();
        let mut nested = None;
        for child in node.children().filter(|c| c.is_element()) {
            match child.tag_name().name() {
                "sequence" | "choice" | "all" => collect_particle_elements(
                    child,
                    ElementKind::Normal,
                    false,
                    &mut elements,
                    &mut nested,
                )?,
                _ => {}
            }
        }
        Ok(Group {
            name,
            reference,
            elements,
        })
    }
}
