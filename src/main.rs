use anyhow::{Context, Result};
use clap::Parser;
use ros_node_audit::logging::{self, Verbosity};
use ros_node_audit::{cli, commands};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));

    args.command.validate().context("Invalid arguments")?;

    let classifier = commands::build_classifier(args.rules.as_deref())
        .context("Failed to load detection rules")?;

    let mut stdout = std::io::stdout().lock();
    commands::run(&args.command, &classifier, &mut stdout)?;

    Ok(())
}
