use std::path::PathBuf;

use p4st_driver::{value_to_json, Engine};

use super::{Failure, OutputFormat};

#[derive(clap::Args)]
pub struct Args {
    /// Path to a serialized IL spec (JSON)
    #[clap(value_parser, value_name = "SPEC")]
    spec_path: PathBuf,

    /// The function to call
    #[clap(long)]
    function: String,

    /// A JSON-encoded argument, one per declared parameter, in order
    #[clap(long = "arg")]
    args: Vec<String>,

    #[clap(long, value_enum, default_value_t)]
    format: OutputFormat,
}

pub fn exec(cmd: Args) -> Result<(), Failure> {
    let text = std::fs::read_to_string(&cmd.spec_path)
        .map_err(|e| Failure::Load(miette::miette!("failed to read {}: {e}", cmd.spec_path.display())))?;
    let engine = Engine::load_spec_json(&text).map_err(|e| Failure::Load(e.into()))?;

    let args = cmd
        .args
        .iter()
        .map(|s| serde_json::from_str(s))
        .collect::<Result<Vec<serde_json::Value>, _>>()
        .map_err(|e| Failure::Run(miette::miette!("invalid JSON argument: {e}")))?;

    let result = engine.call_function(&cmd.function, &args).map_err(|e| Failure::Run(e.into()))?;

    match cmd.format {
        OutputFormat::Json => println!("{}", value_to_json(&result)),
        OutputFormat::Text => println!("{result}"),
    }

    Ok(())
}
