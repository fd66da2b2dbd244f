use roxmltree::Node;

use crate::xsd::error::XsdError;
use crate::xsd::shared::TypeDefinition;
use crate::xsd::xstypes::QName;

#[derive(Clone, Debug)]
pub struct Attribute {
    pub name: String,
    pub reference: Option<QName>,
    pub type_def: Option<TypeDefinition>,
    pub required: bool,
}

impl Attribute {
    pub(crate) fn map_from_xml(node: Node) -> Result<Self, XsdError> {
        let reference = node
            .attribute("ref")
            .map(|r| QName::parse(r, node))
            .transpose()?;
        let name = match node.attribute("name") {
            Some(name) => name.to_string(),
            None => reference
                .as_ref()
                .map(|r| r.local_name.clone())
                .ok_or(XsdError::UnnamedAttribute)?,
        };
        let required = node.attribute("use") == Some("required");
        let type_def = TypeDefinition::of_node(node)?;
        Ok(Attribute {
            name,
            reference,
            type_def,
            required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_required_is_recognized() {
        let doc = roxmltree::Document::parse(
            r#"<a name="version" type="someType" use="required"/>"#,
        )
        .unwrap();
        let attribute = Attribute::map_from_xml(doc.root_element()).unwrap();
        assert!(attribute.required);
        assert!(matches!(
            attribute.type_def,
            Some(TypeDefinition::Reference(_))
        ));
    }

    #[test]
    fn optional_by_default() {
        let doc = roxmltree::Document::parse(r#"<a name="label"/>"#).unwrap();
        let attribute = Attribute::map_from_xml(doc.root_element()).unwrap();
        assert!(!attribute.required);
        assert!(attribute.type_def.is_none());
    }
}
