mod commands;
mod terminal;

use commands::{CommandLine, Commands, generate, lookup, print, sniff};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.quiet);

    let cfg = commands.config();

    match commands.command.unwrap_or(Commands::Print) {
        Commands::Print => print::print(&cfg, commands.quiet).await,
        Commands::Generate { output } => generate::generate(&output, &cfg, commands.quiet).await,
        Commands::Lookup { addresses } => lookup::lookup(&addresses, &cfg, commands.quiet).await,
        Commands::Sniff { interface } => sniff::sniff(interface.as_deref(), &cfg).await,
    }
}
