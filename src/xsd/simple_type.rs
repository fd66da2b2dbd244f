use roxmltree::Node;

use crate::xsd::error::XsdError;
use crate::xsd::shared::TypeDefinition;
use crate::xsd::xstypes::QName;

/// The three varieties of a simple type definition.
#[derive(Clone, Debug)]
pub enum SimpleType {
    Restriction(Restriction),
    List(List),
    Union(Union),
}

/// A restriction of a base type. A non-empty enumeration list makes this an
/// enum type; all other constraining facets are dropped (the generated
/// parser does not narrow value spaces).
#[derive(Clone, Debug)]
pub struct Restriction {
    pub name: Option<String>,
    pub base: Box<TypeDefinition>,
    /// Schema-declared enumeration literals, in declaration order.
    pub enums: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct List {
    pub name: Option<String>,
    pub item_type: Box<TypeDefinition>,
}

#[derive(Clone, Debug)]
pub struct Union {
    pub name: Option<String>,
    pub member_types: Vec<TypeDefinition>,
}

impl SimpleType {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Restriction(r) => r.name.as_deref(),
            Self::List(l) => l.name.as_deref(),
            Self::Union(u) => u.name.as_deref(),
        }
    }

    pub(crate) fn map_from_xml(node: Node) -> Result<Self, XsdError> {
        let name = node.attribute("name").map(str::to_string);
        for child in node.children().filter(|c| c.is_element()) {
            match child.tag_name().name() {
                "restriction" => return Self::map_restriction(child, name),
                "list" => return Self::map_list(child, name),
                "union" => return Self::map_union(child, name),
                _ => {}
            }
        }
        Err(XsdError::EmptySimpleType(name.unwrap_or_default()))
    }

    fn map_restriction(node: Node, name: Option<String>) -> Result<Self, XsdError> {
        let base = base_or_inline(node, &name)?;
        let mut enums = Vec::new();
        for facet in node.children().filter(|c| c.is_element()) {
            if facet.tag_name().name() == "enumeration" {
                let value = facet.attribute("value").ok_or_else(|| {
                    XsdError::EnumerationWithoutValue(name.clone().unwrap_or_default())
                })?;
                enums.push(value.to_string());
            }
        }
        Ok(Self::Restriction(Restriction {
            name,
            base: Box::new(base),
            enums,
        }))
    }

    fn map_list(node: Node, name: Option<String>) -> Result<Self, XsdError> {
        let item_type = match node.attribute("itemType") {
            Some(reference) => TypeDefinition::Reference(QName::parse(reference, node)?),
            None => inline_simple(node)
                .transpose()?
                .ok_or_else(|| XsdError::EmptySimpleType(name.clone().unwrap_or_default()))?,
        };
        Ok(Self::List(List {
            name,
            item_type: Box::new(item_type),
        }))
    }

    fn map_union(node: Node, name: Option<String>) -> Result<Self, XsdError> {
        let mut member_types = Vec::new();
        if let Some(members) = node.attribute("memberTypes") {
            for member in members.split_whitespace() {
                member_types.push(TypeDefinition::Reference(QName::parse(member, node)?));
            }
        }
        for child in node.children().filter(|c| c.is_element()) {
            if child.tag_name().name() == "simpleType" {
                member_types.push(TypeDefinition::Simple(SimpleType::map_from_xml(child)?));
            }
        }
        Ok(Self::Union(Union { name, member_types }))
    }
}

fn base_or_inline(node: Node, name: &Option<String>) -> Result<TypeDefinition, XsdError> {
    if let Some(base) = node.attribute("base") {
        return Ok(TypeDefinition::Reference(QName::parse(base, node)?));
    }
    inline_simple(node)
        .transpose()?
        .ok_or_else(|| XsdError::EmptySimpleType(name.clone().unwrap_or_default()))
}

fn inline_simple(node: Node) -> Option<Result<TypeDefinition, XsdError>> {
    node.children()
        .filter(|c| c.is_element())
        .find(|c| c.tag_name().name() == "simpleType")
        .map(|c| SimpleType::map_from_xml(c).map(TypeDefinition::Simple))
}
