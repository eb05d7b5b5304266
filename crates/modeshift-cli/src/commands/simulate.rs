use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use modeshift_core::{Catalog, Config, ManualClock, ProfileEngine, Snapshot};
use serde_json::json;

use crate::shell::{Reply, Shell, HELP};

#[derive(Args)]
pub struct SimulateArgs {
    /// Script to replay (reads stdin when omitted)
    #[arg(long)]
    script: Option<PathBuf>,
}

/// Replay a script on a virtual clock. Output is one JSON object per line:
/// every event, any per-line errors, and a final snapshot.
pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let script = match &args.script {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin())?,
    };
    let lifecycle = Config::load()?.lifecycle;

    let clock = ManualClock::at_epoch();
    let engine = ProfileEngine::new(Catalog::builtin(), Arc::new(clock.clone()));
    let shell = Shell::new(engine, lifecycle).with_manual_clock(clock);

    for (index, line) in script.lines().enumerate() {
        match shell.handle(line) {
            Ok(Some(Reply::Events(events))) => {
                for event in &events {
                    println!("{}", serde_json::to_string(event)?);
                }
            }
            Ok(Some(Reply::Status(snapshot))) => {
                println!("{}", snapshot_line("Status", &snapshot));
            }
            Ok(Some(Reply::Help)) => eprintln!("{HELP}"),
            Ok(Some(Reply::Quit)) => break,
            Ok(None) => {}
            Err(e) => println!(
                "{}",
                json!({ "type": "Error", "line": index + 1, "message": e.to_string() })
            ),
        }
    }

    println!("{}", snapshot_line("Snapshot", &shell.engine().snapshot()));
    Ok(())
}

fn snapshot_line(kind: &str, snapshot: &Snapshot) -> serde_json::Value {
    json!({
        "type": kind,
        "active": snapshot.active_count(),
        "features_enabled": snapshot.features_enabled(),
        "profiles": snapshot.states(),
    })
}
