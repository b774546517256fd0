use clap::{Parser, Subcommand};

mod call;
mod inspect;
mod run;

/// A CLI failure tagged with the phase it occurred in, so `main` can map it
/// to the right exit code: reading and loading the IL is one failure class,
/// evaluating it against the given inputs is another.
pub enum Failure {
    Load(miette::Report),
    Run(miette::Report),
}

impl Failure {
    pub fn report(&self) -> &miette::Report {
        match self {
            Failure::Load(report) | Failure::Run(report) => report,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Failure::Load(_) => 1,
            Failure::Run(_) => 2,
        }
    }
}

pub fn exec() -> Result<(), Failure> {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    builder.format_timestamp(None).format_level(false).format_target(false);
    if cli.trace {
        builder.filter_level(log::LevelFilter::Trace);
    } else if cli.debug {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();

    use Command::*;
    match cli.command {
        Run(args) => run::exec(args),
        Call(args) => call::exec(args),
        Inspect(args) => inspect::exec(args),
    }
}

#[derive(Parser)]
#[clap(version, author, about, long_about = None)]
struct Cli {
    /// Enable trace logging
    #[clap(long)]
    trace: bool,
    /// Enable debug logging
    #[clap(long)]
    debug: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a relation against JSON-encoded input values
    Run(run::Args),
    /// Call a deterministic function against JSON-encoded arguments
    Call(call::Args),
    /// Load a spec and report the definitions it contains
    Inspect(inspect::Args),
}

#[derive(Clone, Copy, clap::ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
