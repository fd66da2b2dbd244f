use roxmltree::Node;

use crate::xsd::error::XsdError;
use crate::xsd::group::Group;
use crate::xsd::shared::TypeDefinition;
use crate::xsd::xstypes::QName;

/// How an element declaration is wrapped inside its parent's content model.
/// Members of `xs:choice` and `xs:all` groups carry a tag so that the
/// generated member names can be disambiguated with a suffix.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Normal,
    Choice,
    All,
}

#[derive(Clone, Debug)]
pub struct Element {
    pub name: String,
    pub reference: Option<QName>,
    /// Absent for pure `ref=` occurrences; the referenced declaration
    /// carries the type.
    pub type_def: Option<TypeDefinition>,
    /// Effective `maxOccurs > 1`.
    pub multiple: bool,
    pub kind: ElementKind,
}

impl Element {
    pub(crate) fn map_from_xml(
        node: Node,
        kind: ElementKind,
        inherited_multiple: bool,
    ) -> Result<Self, XsdError> {
        let reference = node
            .attribute("ref")
            .map(|r| QName::parse(r, node))
            .transpose()?;
        let name = match node.attribute("name") {
            Some(name) => name.to_string(),
            None => reference
                .as_ref()
                .map(|r| r.local_name.clone())
                .ok_or(XsdError::UnnamedElement)?,
        };
        let multiple = inherited_multiple || max_occurs(node)? > 1;
        let type_def = TypeDefinition::of_node(node)?;
        Ok(Element {
            name,
            reference,
            type_def,
            multiple,
            kind,
        })
    }
}

/// Effective `maxOccurs` of a particle; `unbounded` saturates.
pub(crate) fn max_occurs(node: Node) -> Result<u32, XsdError> {
    match node.attribute("maxOccurs") {
        None => Ok(1),
        Some("unbounded") => Ok(u32::MAX),
        Some(value) => value
            .parse::<u32>()
            .map_err(|_| XsdError::InvalidOccurs(value.to_string())),
    }
}

/// Walks a `sequence`/`choice`/`all` model group and appends the element
/// declarations it contributes, in document order. Multiplicity of the
/// containing group distributes over its members, and `choice`/`all`
/// containers tag their members (see [`ElementKind`]). A `group ref=`
/// encountered inside the content model lands in `group_slot`.
pub(crate) fn collect_particle_elements(
    node: Node,
    outer_kind: ElementKind,
    inherited_multiple: bool,
    elements: &mut Vec<Element>,
    group_slot: &mut Option<Group>,
) -> Result<(), XsdError> {
    let kind = match node.tag_name().name() {
        "choice" => ElementKind::Choice,
        "all" => ElementKind::All,
        _ => outer_kind,
    };
    let multiple = inherited_multiple || max_occurs(node)? > 1;
    for child in node.children().filter(|c| c.is_element()) {
        match child.tag_name().name() {
            "element" => elements.push(Element::map_from_xml(child, kind, multiple)?),
            "sequence" | "choice" | "all" => {
                collect_particle_elements(child, kind, multiple, elements, group_slot)?
            }
            "group" => *group_slot = Some(Group::map_from_xml(child)?),
            // Unknown and informational content is accepted silently; the
            // generated parser is non-validating and so is this front-end.
            _ => {}
        }
    }
    Ok(())
}
