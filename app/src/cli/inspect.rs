use std::path::PathBuf;

use p4st_driver::Engine;

use super::{Failure, OutputFormat};

#[derive(clap::Args)]
pub struct Args {
    /// Path to a serialized IL spec (JSON)
    #[clap(value_parser, value_name = "SPEC")]
    spec_path: PathBuf,

    #[clap(long, value_enum, default_value_t)]
    format: OutputFormat,
}

/// Loads a spec and reports the definitions it contains, without running
/// anything: reporting rather than typechecking, since the IL here is
/// assumed already elaborated.
pub fn exec(cmd: Args) -> Result<(), Failure> {
    let text = std::fs::read_to_string(&cmd.spec_path)
        .map_err(|e| Failure::Load(miette::miette!("failed to read {}: {e}", cmd.spec_path.display())))?;
    let engine = Engine::load_spec_json(&text).map_err(|e| Failure::Load(e.into()))?;

    let defs = engine.describe_defs();

    match cmd.format {
        OutputFormat::Json => {
            let report: Vec<serde_json::Value> = defs
                .iter()
                .map(|(id, kind, arity)| serde_json::json!({ "id": id, "kind": kind, "arity": arity }))
                .collect();
            println!("{}", serde_json::Value::Array(report));
        }
        OutputFormat::Text => {
            println!("{} definition(s) in {}:", defs.len(), cmd.spec_path.display());
            for (id, kind, arity) in &defs {
                println!("  {kind:<9} {id} (arity {arity})");
            }
        }
    }

    Ok(())
}
