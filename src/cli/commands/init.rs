//! `fha init` command - Initialize a new FHA project

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::Workspace;
use crate::core::project::{Project, ProjectError};
use crate::core::{Config, FhaTable};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Force initialization even if .fha/ already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    // Create directory if it doesn't exist
    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    match project {
        Ok(project) => {
            let config = Config::load_for(Some(&project));
            let workspace = Workspace {
                project,
                config,
                table: FhaTable::new(),
            };
            if !workspace.table_path().exists() {
                workspace.save()?;
            }

            println!(
                "{} Initialized FHA project at {}",
                style("✓").green(),
                style(workspace.project.root().display()).cyan()
            );
            println!();
            println!("Next steps:");
            println!(
                "  {} Start an analysis from a function skeleton",
                style("fha new --function <NAME>").yellow()
            );
            println!(
                "  {} Import an existing table",
                style("fha import <FILE>").yellow()
            );
            println!(
                "  {} Review the risk dashboard",
                style("fha dashboard").yellow()
            );
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} FHA project already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!(
                "Use {} to reinitialize",
                style("fha init --force").yellow()
            );
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
