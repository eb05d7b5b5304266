use clap::Args;
use modeshift_core::Catalog;

#[derive(Args)]
pub struct ModesArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ModesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::builtin();

    if args.json {
        println!("{}", serde_json::to_string_pretty(catalog.modes())?);
        return Ok(());
    }

    for mode in catalog.modes() {
        println!("{:<12} {}", mode.id, mode.name);
        println!("{:<12} {}", "", mode.description);
        println!("{:<12} features: {}", "", mode.features.join(", "));
    }
    Ok(())
}
