use anyhow::Result;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::SubIndexArgs) -> Result<()> {
    let dashboard = super::load(cli)?;
    let map = dashboard.sub_index_map(&args.district, args.sub_index, args.map.theme)?;
    println!("{}", args.sub_index.description());
    super::emit_map(&map, &args.map)
}
