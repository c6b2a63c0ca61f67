use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use icon_variants::{GeneratorConfig, VariantPipeline};

/// Generate the ROYGBIV color variants of the app icon.
#[derive(Debug, Parser)]
#[command(name = "icon-variants", version)]
struct Args {
    /// Project root that the other paths are relative to.
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Directory holding the base icon.png [default: src-tauri/icons]
    #[arg(long, value_name = "DIR")]
    icons_dir: Option<PathBuf>,

    /// Working directory of the packaging tool [default: src-tauri]
    #[arg(long, value_name = "DIR")]
    tooling_dir: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> icon_variants::Result<()> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::new(),
    };
    if let Some(dir) = args.icons_dir {
        config.icons_dir = dir;
    }
    if let Some(dir) = args.tooling_dir {
        config.tooling_dir = dir;
    }

    let paths = config.paths(&args.root);
    let packager = config.packager(&args.root);

    println!("Base icon: {}", paths.base_icon.display());
    println!("Output dir: {}", paths.colors_dir.display());
    println!();

    let report = VariantPipeline::new(paths).generate_all(&packager)?;

    println!();
    print!("Done! {}", report);
    Ok(())
}
