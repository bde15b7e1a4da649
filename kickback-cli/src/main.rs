use anyhow::Result;
use clap::Parser;
use kickback_cli::{DEFAULT_OUTPUT, DEFAULT_PACKAGE, GenerateOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "kickback", version, about = "Compile UI markup files into Rust tree literals")]
struct Cli {
    /// Module the generated statics live in
    #[arg(short = 'p', long = "package", default_value = DEFAULT_PACKAGE)]
    package: String,
    /// Directory searched recursively for .xml files
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Output file
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    out: PathBuf,
    /// More logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    kickback_cli::logging::init_logging(cli.verbose)?;
    let opts = GenerateOptions {
        root: cli.root,
        package: cli.package,
        out: cli.out,
    };
    let report = kickback_cli::generate(&opts)?;
    println!("Generated: {} ({} trees)", report.out.display(), report.names.len());
    Ok(())
}
