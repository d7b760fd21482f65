use std::{fs, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Where the dashboard's input files live and which attributes to read from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// District polygons (GeoJSON)
    pub districts: PathBuf,
    /// Street segments with score fields (GeoJSON)
    pub streets: PathBuf,
    /// Transport mode-share table (CSV)
    pub transport: PathBuf,
    /// District attribute holding the district name
    pub district_name_field: String,
    /// Street attribute holding the unique street id
    pub street_id_field: String,
    /// Street attribute holding the district name
    pub street_district_field: String,
    /// Mode-share column holding the transport mode labels
    pub mode_column: String,
    /// Mode-share row counted as walking
    pub on_foot_label: String,
    /// EPSG code both layers are brought into; defaults to the districts' own CRS
    pub target_epsg: Option<u32>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            districts: "ms_districts_prj.geojson".into(),
            streets: "ms_streets_prj.geojson".into(),
            transport: "ms_transportation.csv".into(),
            district_name_field: "NAME_STADT".to_string(),
            street_id_field: "Unique_ID".to_string(),
            street_district_field: "District".to_string(),
            mode_column: "Means of Transport".to_string(),
            on_foot_label: "On Foot".to_string(),
            target_epsg: None,
        }
    }
}

impl DashboardConfig {
    /// Name of the optional config file inside a data directory.
    pub const FILE_NAME: &'static str = "dashboard.json";

    /// Load `<data_dir>/dashboard.json` if present, otherwise use defaults.
    /// Relative input paths are resolved against `data_dir`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(Self::FILE_NAME);
        let config = if path.is_file() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("[config] Failed to read {}", path.display()))?;
            info!(path = %path.display(), "[config] loaded dashboard config");
            Self::from_json_str(&text)
                .with_context(|| format!("[config] Invalid config {}", path.display()))?
        } else {
            debug!(dir = %data_dir.display(), "[config] no dashboard.json, using defaults");
            Self::default()
        };
        Ok(config.resolved(data_dir))
    }

    /// Parse a config from JSON; missing keys take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("[config] Failed to parse dashboard config")
    }

    /// Resolve relative input paths against `base`.
    pub fn resolved(mut self, base: &Path) -> Self {
        for path in [&mut self.districts, &mut self.streets, &mut self.transport] {
            if path.is_relative() { *path = base.join(&*path) }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config = DashboardConfig::from_json_str(r#"{ "streets": "streets.geojson", "target_epsg": 25832 }"#).unwrap();
        assert_eq!(config.streets, PathBuf::from("streets.geojson"));
        assert_eq!(config.districts, PathBuf::from("ms_districts_prj.geojson"));
        assert_eq!(config.district_name_field, "NAME_STADT");
        assert_eq!(config.target_epsg, Some(25832));
    }

    #[test]
    fn relative_paths_resolve_against_data_dir() {
        let mut config = DashboardConfig::default();
        config.transport = "/abs/modes.csv".into();
        let config = config.resolved(Path::new("/data"));
        assert_eq!(config.districts, PathBuf::from("/data/ms_districts_prj.geojson"));
        assert_eq!(config.transport, PathBuf::from("/abs/modes.csv"));
    }

    #[test]
    fn load_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DashboardConfig::FILE_NAME), r#"{ "street_id_field": "id" }"#).unwrap();
        let config = DashboardConfig::load(dir.path()).unwrap();
        assert_eq!(config.street_id_field, "id");
        assert_eq!(config.streets, dir.path().join("ms_streets_prj.geojson"));
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load(dir.path()).unwrap();
        assert_eq!(config, DashboardConfig::default().resolved(dir.path()));
    }
}
