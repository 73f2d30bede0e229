//! Model inspection command.

use amperio_model::{ModelInfo, Network};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args)]
pub struct InspectArgs {
    /// Model file (keras-style JSON capture)
    #[arg(value_name = "MODEL")]
    model: PathBuf,

    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let network = Network::load(&args.model)?;
    let info = network.info();
    debug!(model = %args.model.display(), kind = %info.kind, "model parsed");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&describe(&info))?);
    } else {
        println!("Model: {}", args.model.display());
        println!("  Type:        {}", info.kind);
        println!("  Hidden size: {}", info.hidden_size);
        println!("  Inputs:      {} ({})", info.input_size, flavour(&info));
        println!("  Input skip:  {}", if info.input_skip { "yes" } else { "no" });
    }

    Ok(())
}

fn flavour(info: &ModelInfo) -> &'static str {
    match info.input_size {
        1 => "snapshot",
        2 => "conditioned, one parameter",
        _ => "conditioned, two parameters",
    }
}

fn describe(info: &ModelInfo) -> serde_json::Value {
    serde_json::json!({
        "kind": info.kind.tag(),
        "hidden_size": info.hidden_size,
        "input_size": info.input_size,
        "input_skip": info.input_skip,
        "flavour": flavour(info),
    })
}
