use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::view::FilterCriteria;

#[derive(Parser)]
#[command(
    name = "pkgscope",
    version,
    about = "Dependency graph analysis for monorepos"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Config file (defaults to ./pkgscope.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the filtered project table and summary
    Analyze {
        /// Project graph JSON document
        graph: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        json: bool,
    },
    /// List unresolved dependency cycles with suggested breaks
    Cycles {
        graph: PathBuf,
        /// Mark a cycle resolved by its key (members joined by " -> ")
        #[arg(long, value_name = "KEY")]
        resolve: Vec<String>,
        /// Move the current cycle forward N times
        #[arg(long, default_value = "0", value_name = "N")]
        advance: usize,
        /// Resolve the current cycle after advancing
        #[arg(long)]
        resolve_current: bool,
        #[arg(long)]
        json: bool,
    },
    /// Write the filtered project table as CSV
    Export {
        graph: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
        /// Output file (defaults to the configured export path)
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Show one project and its direct neighborhood
    Show {
        graph: PathBuf,
        project: String,
        #[arg(long)]
        json: bool,
    },
    /// List every display tag in the graph
    Tags {
        graph: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, default_value = "0", value_name = "N")]
    pub min_deps: usize,
    #[arg(long, value_name = "N")]
    pub max_deps: Option<usize>,
    #[arg(long, default_value = "0", value_name = "N")]
    pub min_dependents: usize,
    #[arg(long, value_name = "N")]
    pub max_dependents: Option<usize>,
    /// Keep projects carrying any of these tags (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
    /// Keep only projects that sit on a cycle
    #[arg(long)]
    pub cycles_only: bool,
}

impl FilterArgs {
    #[must_use]
    pub fn to_criteria(&self) -> FilterCriteria {
        self.tags.iter().fold(
            FilterCriteria::new()
                .dependencies(self.min_deps, self.max_deps)
                .dependents(self.min_dependents, self.max_dependents)
                .cycles_only(self.cycles_only),
            |criteria, tag| criteria.tag(tag.clone()),
        )
    }
}
