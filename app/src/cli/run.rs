use std::path::PathBuf;

use p4st_driver::{value_to_json, Engine};

use super::{Failure, OutputFormat};

#[derive(clap::Args)]
pub struct Args {
    /// Path to a serialized IL spec (JSON)
    #[clap(value_parser, value_name = "SPEC")]
    spec_path: PathBuf,

    /// The relation to run
    #[clap(long)]
    relation: String,

    /// A JSON-encoded input value, one per declared input slot, in order
    #[clap(long = "input")]
    inputs: Vec<String>,

    #[clap(long, value_enum, default_value_t)]
    format: OutputFormat,
}

pub fn exec(cmd: Args) -> Result<(), Failure> {
    let text = std::fs::read_to_string(&cmd.spec_path)
        .map_err(|e| Failure::Load(miette::miette!("failed to read {}: {e}", cmd.spec_path.display())))?;
    let engine = Engine::load_spec_json(&text).map_err(|e| Failure::Load(e.into()))?;

    let inputs = cmd
        .inputs
        .iter()
        .map(|s| serde_json::from_str(s))
        .collect::<Result<Vec<serde_json::Value>, _>>()
        .map_err(|e| Failure::Run(miette::miette!("invalid JSON input: {e}")))?;

    let outcome = engine.run_relation(&cmd.relation, &inputs).map_err(|e| Failure::Run(e.into()))?;

    match cmd.format {
        OutputFormat::Json => {
            let bindings: serde_json::Map<_, _> =
                outcome.bindings.iter().map(|(k, v)| (k.clone(), value_to_json(v))).collect();
            let report = serde_json::json!({
                "bindings": bindings,
                "phantoms": outcome.phantom_log.iter().map(|h| h.pid.0).collect::<Vec<_>>(),
            });
            println!("{report}");
        }
        OutputFormat::Text => {
            for (name, value) in &outcome.bindings {
                println!("{name} = {value}");
            }
            for hit in &outcome.phantom_log {
                println!("phantom {} (context depth {})", hit.pid.0, hit.context_path.len());
            }
        }
    }

    Ok(())
}
