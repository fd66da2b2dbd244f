use roxmltree::Node;

use crate::xsd::complex_type::ComplexType;
use crate::xsd::error::XsdError;
use crate::xsd::simple_type::SimpleType;
use crate::xsd::xstypes::QName;

/// A type occurrence: either a qualified reference into some symbol space or
/// an inline definition. Named top-level definitions are stored in the
/// schema's type map as the `Simple`/`Complex` variants.
#[derive(Clone, Debug)]
pub enum TypeDefinition {
    Reference(QName),
    Simple(SimpleType),
    Complex(ComplexType),
}

impl TypeDefinition {
    /// Reads the type of an `element`/`attribute` information item: a
    /// `type="q:name"` reference, or an inline `<simpleType>`/`<complexType>`
    /// child. `None` when the item carries neither (e.g. it is a `ref=`).
    pub(crate) fn of_node(node: Node) -> Result<Option<Self>, XsdError> {
        if let Some(reference) = node.attribute("type") {
            return Ok(Some(Self::Reference(QName::parse(reference, node)?)));
        }
        for child in node.children().filter(|c| c.is_element()) {
            match child.tag_name().name() {
                "simpleType" => return Ok(Some(Self::Simple(SimpleType::map_from_xml(child)?))),
                "complexType" => {
                    return Ok(Some(Self::Complex(ComplexType::map_from_xml(child)?)))
                }
                _ => {}
            }
        }
        Ok(None)
    }

    pub fn reference(&self) -> Option<&QName> {
        match self {
            Self::Reference(name) => Some(name),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Reference(_) => None,
            Self::Simple(simple) => simple.name(),
            Self::Complex(complex) => complex.name.as_deref(),
        }
    }
}
