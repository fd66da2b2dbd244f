pub mod code_writer;
pub mod cpp;
pub mod error;
pub mod naming;

pub use code_writer::CodeWriter;
pub use cpp::{CppCodeGenerator, CppGenConfig};
pub use error::CodegenError;
