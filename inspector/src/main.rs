use clap::{Parser, Subcommand};
use inspector_core::{CollectionManager, ManagerSettings, Outcome};
use inspector_gui::{run_gui, GuiConfig};
use std::path::{Path, PathBuf};

mod output;
mod tools;

#[derive(Parser)]
#[command(name = "inspector", version, about = "Inspect and edit a collection of tools")]
struct Cli {
    /// Print the collection instead of opening a window
    #[arg(long)]
    no_gui: bool,
    /// Manager settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Collection file (JSON) to open instead of the demo items
    #[arg(long)]
    load: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a collection file and print what it contains
    Inspect { path: PathBuf },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        output::print_error(&err.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = match &cli.config {
        Some(path) => ManagerSettings::load_from_file(path)?,
        None => ManagerSettings::default(),
    };

    match cli.command {
        Some(Commands::Inspect { path }) => {
            let mut manager = tools::manager(settings);
            load_into(&mut manager, &path)?;
            output::print_collection(&manager);
        }
        None => {
            let mut manager = tools::manager(settings).with_host(inspector_gui::image_host());
            match &cli.load {
                Some(path) => {
                    load_into(&mut manager, path)?;
                    manager.select(0);
                }
                None => tools::populate_demo(&mut manager)?,
            }
            if cli.no_gui {
                output::print_collection(&manager);
                return Ok(());
            }
            let config = GuiConfig {
                title: manager.title().to_string(),
                ..GuiConfig::default()
            };
            run_gui(config, manager)?;
        }
    }
    Ok(())
}

fn load_into(manager: &mut CollectionManager, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Outcome::Done(report) = manager.load(Some(path))? {
        output::print_report(&report);
    }
    Ok(())
}
