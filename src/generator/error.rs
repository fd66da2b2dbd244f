use thiserror::Error;

/// Fatal conditions raised while lowering the schema and emitting code.
/// The first one aborts the run; nothing is accumulated.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("duplicate class name : {0}")]
    DuplicateClassName(String),
    #[error("no element named : {0}")]
    UnknownElement(String),
    #[error("no group named : {0}")]
    UnknownGroup(String),
    #[error("no attribute named : {0}")]
    UnknownAttribute(String),
    #[error("no attribute group named : {0}")]
    UnknownAttributeGroup(String),
    #[error("no type named : {0}")]
    UnknownType(String),
    #[error("not a simple type : {0}")]
    NotSimpleType(String),
    #[error("base not simple : {0}")]
    BaseNotSimple(String),
    #[error("unknown xsd predefined type : {0}")]
    UnknownBuiltin(String),
    #[error("cannot convert to identifier : {0:?}")]
    InvalidIdentifier(String),
    #[error("list of list is not supported : {0}")]
    NestedList(String),
    #[error("element without a type : {0}")]
    UntypedElement(String),
    #[error("attribute without a type : {0}")]
    UntypedAttribute(String),
    #[error("output write failure : {0}")]
    Io(#[from] std::io::Error),
}
