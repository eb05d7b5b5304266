use clap::Args;
use modeshift_core::format_remaining;

#[derive(Args)]
pub struct FormatArgs {
    /// Remaining time in seconds
    seconds: u64,
}

pub fn run(args: FormatArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", format_remaining(args.seconds));
    Ok(())
}
