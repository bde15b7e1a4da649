pub mod codegen;
pub mod error;
pub mod naming;
pub mod parse;

pub use codegen::{GENERATED_HEADER, emit_source_unit};
pub use error::{EmitError, NameError, ParseError};
pub use naming::{RESERVED_NAMES, SOURCE_SUFFIX, binding_name, is_binding_name, is_identifier};
pub use parse::parse_display_model;
