use anyhow::Result;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ModesArgs) -> Result<()> {
    let dashboard = super::load(cli)?;
    let summary = dashboard.transport(&args.district)?;

    let hidden: Vec<&str> = args.hide.iter().map(String::as_str).collect();
    let pie = if hidden.is_empty() { summary.pie.clone() } else { summary.pie.without(&hidden) };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&pie)?);
        return Ok(());
    }

    println!("{}", pie.title);
    for slice in &pie.slices {
        println!("  {:<24} {:>6.1}%  {}", slice.label, slice.value, slice.color);
    }
    println!("{}", summary.on_foot_sentence());
    Ok(())
}
