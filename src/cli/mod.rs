use clap::{Parser, Subcommand, ValueEnum};

pub mod commands;
pub mod output;

#[derive(Parser)]
#[command(
    name = "classdeps",
    version,
    about = "List the types compiled JVM classes depend on"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Include only class files matching this glob
    #[arg(long, global = true)]
    pub include: Vec<String>,

    /// Exclude class files matching this glob
    #[arg(long, global = true)]
    pub exclude: Vec<String>,

    /// Leave out imports matching this glob (e.g. "java.*")
    #[arg(long, global = true)]
    pub ignore: Vec<String>,

    /// Path to config file (default: .classdeps/config.toml or classdeps.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Keep each class's own name in its imports
    #[arg(long, global = true)]
    pub keep_self: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the imports of each class file
    Imports {
        /// Class file or directory of class files
        #[arg(default_value = ".")]
        path: String,
    },

    /// Aggregate classes, packages and imports
    Summary {
        /// Class file or directory of class files
        #[arg(default_value = ".")]
        path: String,
    },

    /// Dump a class file's constant pool and what each entry contributes
    Pool {
        /// Class file to dump
        path: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Compact,
}
