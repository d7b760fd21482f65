use std::path::PathBuf;

use walkability::{ColorTheme, Scenario, SubIndex};

/// Walkability dashboard CLI
#[derive(clap::Parser, Debug)]
#[command(name = "walkability", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Data directory holding the district, street and mode-share files (and an optional dashboard.json)
    #[arg(short, long, global = true, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub data: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// List the districts offered by the district selector, with their street counts
    Districts,

    /// Composite walkability map of a district
    Walkability(WalkabilityArgs),

    /// Map of a single sub-index in a district
    SubIndex(SubIndexArgs),

    /// Scores, radar chart and summary of one street
    Street(StreetArgs),

    /// Transport mode-share chart of a district
    Modes(ModesArgs),

    /// Reproject a GeoJSON file into another CRS
    Reproject(ReprojectArgs),
}

/// Where a styled map goes.
#[derive(clap::Args, Debug)]
pub struct MapOutput {
    /// Color theme: Viridis, YlGnBu, Magma, Neptunes or Hot-Cold
    #[arg(short, long, default_value_t = ColorTheme::default())]
    pub theme: ColorTheme,

    /// Write the styled layer as GeoJSON here instead of printing a summary
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Also write a static SVG preview
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub svg: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct WalkabilityArgs {
    /// District name, as listed by `districts`
    pub district: String,

    /// Weather scenario: heat (August) or precipitation (October)
    #[arg(short, long, default_value_t = Scenario::default())]
    pub scenario: Scenario,

    #[command(flatten)]
    pub map: MapOutput,
}

#[derive(clap::Args, Debug)]
pub struct SubIndexArgs {
    /// District name, as listed by `districts`
    pub district: String,

    /// Sub-index, e.g. proximity, landscape, infrastructure, comfort, thermal-august
    pub sub_index: SubIndex,

    #[command(flatten)]
    pub map: MapOutput,
}

#[derive(clap::Args, Debug)]
pub struct StreetArgs {
    /// Unique street id
    pub id: String,

    /// Print the full profile as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct ModesArgs {
    /// District name, as listed in the mode-share table
    pub district: String,

    /// Hide these modes and renormalize the rest
    #[arg(long, value_delimiter = ',')]
    pub hide: Vec<String>,

    /// Print the chart as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct ReprojectArgs {
    /// Input GeoJSON file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output GeoJSON file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Target CRS, e.g. EPSG:4326 or EPSG:25832
    #[arg(short, long, default_value = "EPSG:4326")]
    pub to: String,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("walkability").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn walkability_takes_scenario_and_theme() {
        let cli = parse(&["--data", "data", "walkability", "Mitte", "--scenario", "precipitation", "--theme", "hot-cold"]);
        assert_eq!(cli.data, PathBuf::from("data"));
        let Commands::Walkability(args) = cli.command else { panic!("expected walkability command") };
        assert_eq!(args.district, "Mitte");
        assert_eq!(args.scenario, Scenario::Precipitation);
        assert_eq!(args.map.theme, ColorTheme::HotCold);
        assert!(args.map.output.is_none());
    }

    #[test]
    fn defaults_apply() {
        let cli = parse(&["walkability", "Mitte"]);
        assert_eq!(cli.data, PathBuf::from("."));
        assert_eq!(cli.verbose, 0);
        let Commands::Walkability(args) = cli.command else { panic!("expected walkability command") };
        assert_eq!(args.scenario, Scenario::Heat);
        assert_eq!(args.map.theme, ColorTheme::Viridis);
    }

    #[test]
    fn sub_index_is_positional() {
        let cli = parse(&["-vv", "sub-index", "Mitte", "thermal-august", "--svg", "mitte.svg"]);
        assert_eq!(cli.verbose, 2);
        let Commands::SubIndex(args) = cli.command else { panic!("expected sub-index command") };
        assert_eq!(args.sub_index, SubIndex::ThermalAugust);
        assert_eq!(args.map.svg, Some(PathBuf::from("mitte.svg")));
    }

    #[test]
    fn hidden_modes_split_on_comma() {
        let cli = parse(&["modes", "Mitte", "--hide", "Car,Bus", "--json"]);
        let Commands::Modes(args) = cli.command else { panic!("expected modes command") };
        assert_eq!(args.hide, ["Car", "Bus"]);
        assert!(args.json);
    }

    #[test]
    fn reproject_defaults_to_wgs84() {
        let cli = parse(&["reproject", "in.geojson", "out.geojson"]);
        let Commands::Reproject(args) = cli.command else { panic!("expected reproject command") };
        assert_eq!(args.to, "EPSG:4326");
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!(Cli::try_parse_from(["walkability", "walkability", "Mitte", "--theme", "Plasma"]).is_err());
        assert!(Cli::try_parse_from(["walkability", "walkability", "Mitte", "--scenario", "snow"]).is_err());
        assert!(Cli::try_parse_from(["walkability", "sub-index", "Mitte", "noise"]).is_err());
        assert!(Cli::try_parse_from(["walkability", "street"]).is_err());
    }
}
