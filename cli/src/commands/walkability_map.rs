use anyhow::Result;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::WalkabilityArgs) -> Result<()> {
    let dashboard = super::load(cli)?;
    let map = dashboard.walkability_map(&args.district, args.scenario, args.map.theme)?;
    super::emit_map(&map, &args.map)
}
