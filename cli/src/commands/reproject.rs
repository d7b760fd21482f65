use anyhow::Result;
use tracing::info;
use walkability::{reproject_file, Crs};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ReprojectArgs) -> Result<()> {
    let target = Crs::parse(&args.to)?;
    let count = reproject_file(&args.input, &args.output, target)?;
    info!(features = count, crs = %target, output = %args.output.display(), "[reproject] done");
    Ok(())
}
