use anyhow::{Context, Result};
use kickback_gen::SOURCE_SUFFIX;
use kickback_model::TreeNode;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub mod logging;

pub const DEFAULT_PACKAGE: &str = "screens";
pub const DEFAULT_OUTPUT: &str = "kickback_generated.rs";

#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Directory searched recursively for `.xml` files.
    pub root: PathBuf,
    /// Name of the module wrapping the generated statics.
    pub package: String,
    /// File the source unit is written to.
    pub out: PathBuf,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            package: DEFAULT_PACKAGE.to_string(),
            out: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerateReport {
    pub out: PathBuf,
    pub sources: Vec<PathBuf>,
    /// Binding names emitted, sorted.
    pub names: Vec<String>,
}

/// Parse every markup file under `opts.root` and write one Rust source unit
/// to `opts.out`.
///
/// Any read, parse or naming failure aborts the run before anything is
/// written; an output file from an earlier run is left as it was.
pub fn generate(opts: &GenerateOptions) -> Result<GenerateReport> {
    let sources = find_sources(&opts.root)?;
    let models = load_models(&sources)?;

    let code = kickback_gen::emit_source_unit(&opts.package, &models)
        .with_context(|| format!("failed to generate module `{}`", opts.package))?;
    fs::write(&opts.out, code).with_context(|| format!("failed to write {}", opts.out.display()))?;

    info!(
        out = %opts.out.display(),
        trees = models.len(),
        "generated tree literals"
    );
    Ok(GenerateReport {
        out: opts.out.clone(),
        sources,
        names: models.into_keys().collect(),
    })
}

/// Markup files below `root`, in file-name order at every level.
pub fn find_sources(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(SOURCE_SUFFIX) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Parse `files` into a name -> tree map.
///
/// Two files with the same binding name do not fail the run: the one
/// processed last replaces the earlier tree.
pub fn load_models(files: &[PathBuf]) -> Result<BTreeMap<String, TreeNode>> {
    let mut models = BTreeMap::new();
    let mut origins: BTreeMap<String, &Path> = BTreeMap::new();
    for path in files {
        let (name, model) = load_model(path)?;
        if let Some(previous) = origins.insert(name.clone(), path) {
            warn!(
                name = %name,
                replaced = %previous.display(),
                by = %path.display(),
                "binding name collision, last file wins"
            );
        }
        models.insert(name, model);
    }
    Ok(models)
}

pub fn load_model(path: &Path) -> Result<(String, TreeNode)> {
    let src = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let model = kickback_gen::parse_display_model(&src)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let name = kickback_gen::binding_name(path)?;
    debug!(name = %name, path = %path.display(), depth = model.depth(), "parsed tree");
    Ok((name, model))
}
