use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use modeshift_core::{
    Catalog, Config, LifecycleConfig, LifecycleController, ProfileEngine, SystemClock,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use crate::render;
use crate::shell::{Reply, Shell, HELP};

#[derive(Args)]
pub struct SessionArgs {
    /// Tick interval in milliseconds (defaults to lifecycle.tick_interval_ms)
    #[arg(long)]
    tick_ms: Option<u64>,
}

pub fn run(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let interval = args
        .tick_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.tick_interval());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(session(config.lifecycle, interval));
    // A pending stdin read would otherwise hold the process open.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn session(
    lifecycle: LifecycleConfig,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = ProfileEngine::new(Catalog::builtin(), Arc::new(SystemClock));
    let mut events = engine.subscribe();
    let mut controller = LifecycleController::with_interval(engine.clone(), interval);
    controller.start()?;
    let shell = Shell::new(engine, lifecycle);

    println!("modeshift session (type 'help' for commands)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match shell.handle(&line) {
                    Ok(Some(Reply::Quit)) => break,
                    Ok(Some(reply)) => print_reply(reply),
                    Ok(None) => {}
                    Err(e) => eprintln!("error: {e}"),
                }
            }
            received = events.recv() => match received {
                // Command results are printed from the reply; only expiries arrive unprompted.
                Ok(event) if event.is_expiry() => println!("{}", render::event(&event)),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "event stream lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    }

    controller.stop();
    Ok(())
}

fn print_reply(reply: Reply) {
    match reply {
        Reply::Events(events) if events.is_empty() => println!("no change"),
        Reply::Events(events) => {
            for event in &events {
                println!("{}", render::event(event));
            }
        }
        Reply::Status(snapshot) => println!("{}", render::status(&snapshot)),
        Reply::Help => println!("{HELP}"),
        Reply::Quit => {}
    }
}
