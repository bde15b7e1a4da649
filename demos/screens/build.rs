use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("screens");
    println!("cargo:rerun-if-changed={}", root.display());
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let opts = kickback_cli::GenerateOptions {
        root,
        package: "screens".to_string(),
        out: out_dir.join("screens.rs"),
    };
    let report = kickback_cli::generate(&opts).expect("compile screens/*.xml");
    fs::write(out_dir.join("registry.rs"), registry(&report.names)).expect("write registry.rs");
}

/// Name list and lookup function covering every compiled screen.
fn registry(names: &[String]) -> String {
    let mut out = String::from("/// File names of every compiled screen, sorted.\n");
    let listed: Vec<String> = names.iter().map(|n| format!("{n:?}")).collect();
    writeln!(out, "pub const SCREEN_NAMES: &[&str] = &[{}];\n", listed.join(", ")).unwrap();

    out.push_str("/// Look up a compiled screen by its file name.\n");
    out.push_str("pub fn screen(name: &str) -> Option<&'static TreeNode> {\n");
    out.push_str("    let tree = match name {\n");
    for name in names {
        writeln!(out, "        {name:?} => &screens::{name},").unwrap();
    }
    out.push_str("        _ => return None,\n    };\n    Some(&**tree)\n}\n");
    out
}
