use std::path::Path;

use syn::ext::IdentExt;

use crate::error::NameError;

/// Suffix selecting markup files; stripped to form the binding name.
pub const SOURCE_SUFFIX: &str = ".xml";

/// Derive the binding name for a markup file: its file name minus `.xml`.
///
/// No sanitizing happens. Names that are not legal Rust identifiers
/// (keywords and raw identifiers included) are rejected, as are names the
/// generated code needs from the prelude.
pub fn binding_name(path: &Path) -> Result<String, NameError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| NameError::MissingSuffix {
            path: path.to_path_buf(),
            suffix: SOURCE_SUFFIX,
        })?
        .to_str()
        .ok_or_else(|| NameError::NotUtf8(path.to_path_buf()))?;

    let name = file_name
        .strip_suffix(SOURCE_SUFFIX)
        .ok_or_else(|| NameError::MissingSuffix {
            path: path.to_path_buf(),
            suffix: SOURCE_SUFFIX,
        })?;

    if !is_binding_name(name) {
        return Err(NameError::InvalidIdentifier {
            name: name.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(name.to_string())
}

/// Prelude values a static must not shadow: the emitted literals call `Some`.
pub const RESERVED_NAMES: &[&str] = &["Some", "None", "Ok", "Err"];

/// A plain (non-raw, non-keyword) Rust identifier.
pub fn is_identifier(s: &str) -> bool {
    syn::parse_str::<syn::Ident>(s).is_ok_and(|ident| ident.unraw() == ident)
}

/// An identifier usable as a generated static's name.
pub fn is_binding_name(s: &str) -> bool {
    is_identifier(s) && !RESERVED_NAMES.contains(&s)
}
