use anyhow::Result;

pub fn run(cli: &crate::cli::Cli) -> Result<()> {
    let dashboard = super::load(cli)?;
    for name in dashboard.district_names() {
        println!("{name}\t{}", dashboard.streets_in(name)?.len());
    }
    Ok(())
}
