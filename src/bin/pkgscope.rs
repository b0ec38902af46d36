use clap::Parser;
use colored::Colorize;
use pkgscope_core::cli::{self, Cli};
use pkgscope_core::config::Config;
use pkgscope_core::exit::PkgscopeExit;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> PkgscopeExit {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    let result = if let Some(cmd) = cli.command {
        cli::execute(cmd, &config)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(PkgscopeExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            PkgscopeExit::from_error(&e)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}
