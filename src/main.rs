use clap::Parser;
use embkit::cli::{load_manifest, Cli, Commands};
use embkit::output::{display_path, Printer};
use miette::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let printer = Printer::new();
    let manifest = load_manifest(cli.config.as_deref())?;
    if let Some(path) = &cli.config {
        printer.info("Using", &format!("manifest {}", display_path(path)));
    }

    match cli.command {
        Commands::Convert(args) => embkit::cli::convert::run(args, &manifest, &printer)?,
        Commands::Info(args) => embkit::cli::info::run(args, &manifest, &printer)?,
        Commands::Formats(args) => embkit::cli::formats::run(args, &manifest)?,
        Commands::Completions(args) => embkit::cli::completions::run(args)?,
    }

    Ok(())
}
