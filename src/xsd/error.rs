use thiserror::Error;

/// Errors raised while mapping a schema document into the in-memory model.
#[derive(Debug, Error)]
pub enum XsdError {
    #[error("failed to resolve prefix {0:?} to a namespace URI")]
    NamePrefixNotResolved(String),
    #[error("document root is not a schema : {0}")]
    NotASchema(String),
    #[error("unknown top level element : {0}")]
    UnknownTopLevelElement(String),
    #[error("top level {0} is unnamed")]
    UnnamedTopLevelComponent(&'static str),
    #[error("element has neither name nor ref")]
    UnnamedElement,
    #[error("attribute has neither name nor ref")]
    UnnamedAttribute,
    #[error("invalid occurrence bound : {0}")]
    InvalidOccurs(String),
    #[error("simpleType {0:?} has no restriction, list or union")]
    EmptySimpleType(String),
    #[error("enumeration without a value in type {0:?}")]
    EnumerationWithoutValue(String),
}
