use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use classdeps::cli::commands::{self, CommandOutput, SettingOverrides};
use classdeps::cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Config files are looked up relative to the working directory
    let project_path = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let overrides = SettingOverrides {
        config: cli.config.as_deref().map(Path::new),
        include: &cli.include,
        exclude: &cli.exclude,
        ignore: &cli.ignore,
        keep_self: cli.keep_self,
    };

    match cli.command {
        Commands::Imports { ref path } => {
            let settings = commands::load_settings(&project_path, &overrides)?;
            let result = commands::run_imports(Path::new(path), &settings, &cli.format)?;
            print_result(&result);
        }

        Commands::Summary { ref path } => {
            let settings = commands::load_settings(&project_path, &overrides)?;
            let result = commands::run_summary(Path::new(path), &settings, &cli.format)?;
            print_result(&result);
        }

        Commands::Pool { ref path } => {
            let output = commands::run_pool(Path::new(path), &cli.format)?;
            emit(&output);
        }
    }

    Ok(())
}

fn print_result(result: &CommandOutput) {
    emit(&result.output);

    if !result.errors.is_empty() {
        eprintln!("\nUnreadable class files:");
        for err in &result.errors {
            eprintln!("  {}", err);
        }
    }
}

fn emit(output: &str) {
    if output.is_empty() || output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}
