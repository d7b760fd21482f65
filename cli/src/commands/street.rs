use anyhow::Result;
use walkability::StreetLookup;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::StreetArgs) -> Result<()> {
    let dashboard = super::load(cli)?;
    let lookup = dashboard.street(&args.id);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&lookup)?);
        return Ok(());
    }

    let profile = match &lookup {
        StreetLookup::Found(profile) => profile,
        StreetLookup::NotFound { .. } => {
            if let Some(notice) = lookup.notice() { eprintln!("{notice}"); }
            return Ok(());
        }
    };

    println!("Street {} ({})", profile.id, profile.district.as_deref().unwrap_or("unknown district"));
    for scenario in &profile.scenarios {
        let score = scenario.score.map_or("N/A".to_string(), |s| s.to_string());
        println!("  {} ({}, {}): {score} | {} | thermal comfort {}",
            scenario.label, scenario.condition, scenario.reference_date, scenario.category, scenario.thermal_comfort);
    }
    for sub_index in &profile.sub_indexes {
        println!("  {:<40} {:>6} | {}", sub_index.label, sub_index.score, sub_index.category);
    }
    println!("{}", profile.summary());
    Ok(())
}
