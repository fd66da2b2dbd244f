//! Schema-to-source compiler: reads an XML Schema (XSD) and emits a pair of
//! C++ translation units containing a non-validating, strongly typed reader
//! (and optionally a writer) for documents conforming to that schema.

pub mod cli;
pub mod generator;
pub mod xsd;
