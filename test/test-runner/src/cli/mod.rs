use clap::{Parser, Subcommand};

mod run;

pub fn exec() {
    env_logger::Builder::from_default_env().format_timestamp(None).format_target(false).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run::exec(args),
    }
}

#[derive(Parser)]
#[clap(author, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every test suite under `test/suites`
    Run(run::Args),
}
