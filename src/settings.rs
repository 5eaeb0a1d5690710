use config::{Config, ConfigError, Environment, File, FileFormat};
use multibot_geometry::{Coordinates, Index};
use multibot_map::{Agent, BinaryOccupancyMap, MapError, MapProperty};
use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Application settings, read from TOML and overridable with `MULTIBOT_*`
/// environment variables (`MULTIBOT_MAP__RESOLUTION=0.05`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub map: MapSettings,
    /// Inflation radius in meters; falls back to the largest agent size.
    pub inflation_radius: Option<f64>,
    #[serde(default)]
    pub agents: Vec<Agent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapSettings {
    pub width: usize,
    pub height: usize,
    pub resolution: f64,
    pub origin: [f64; 2],
    /// Single occupied cells as `[col, row]`.
    #[serde(default)]
    pub obstacles: Vec<[i32; 2]>,
    #[serde(default)]
    pub blocks: Vec<BlockSettings>,
}

/// An inclusive rectangle of occupied cells.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockSettings {
    pub min: [i32; 2],
    pub max: [i32; 2],
}

impl Settings {
    /// The configured radius, or the largest agent footprint when none is set.
    pub fn effective_inflation_radius(&self) -> Option<f64> {
        self.inflation_radius.or_else(|| {
            self.agents
                .iter()
                .map(|agent| agent.size)
                .reduce(f64::max)
        })
    }
}

impl MapSettings {
    /// Builds the base occupancy map with every configured obstacle marked.
    pub fn build(&self) -> Result<BinaryOccupancyMap, MapError> {
        let property = MapProperty::new(Coordinates::from(self.origin), self.width, self.height, self.resolution);
        let mut map = BinaryOccupancyMap::from_property(property)?;

        for &[x, y] in &self.obstacles {
            map.set_occupied(Index::new(x, y), true)?;
        }
        for block in &self.blocks {
            for y in block.min[1]..=block.max[1] {
                for x in block.min[0]..=block.max[0] {
                    map.set_occupied(Index::new(x, y), true)?;
                }
            }
        }
        Ok(map)
    }
}

pub fn load_config(path: &str) -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", path);

    let settings = Config::builder()
        .add_source(File::new(path, FileFormat::Toml).required(true))
        .add_source(
            Environment::with_prefix("MULTIBOT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .and_then(|config| config.try_deserialize::<Settings>());

    match settings {
        Ok(settings) => {
            info!("Successfully loaded configuration: {:?}", settings.map);
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [map]
        width = 6
        height = 4
        resolution = 0.5
        origin = [1.0, -1.0]
        obstacles = [[0, 0]]
        blocks = [{ min = [3, 1], max = [4, 2] }]

        [[agents]]
        name = "tb3_0"
        type = "burger"
        size = 0.1

        [[agents]]
        name = "tb3_1"
        size = 0.3
        start = { x = 1.0, y = 2.0, theta = 0.5 }
    "#;

    fn parse(text: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_parse_settings() {
        let settings = parse(SAMPLE);
        assert_eq!(settings.map.width, 6);
        assert_eq!(settings.map.origin, [1.0, -1.0]);
        assert_eq!(settings.map.blocks.len(), 1);
        assert_eq!(settings.inflation_radius, None);

        assert_eq!(settings.agents.len(), 2);
        assert_eq!(settings.agents[0].kind, "burger");
        assert_eq!(settings.agents[1].kind, "");
        assert_eq!(settings.agents[1].start.theta, 0.5);
    }

    #[test]
    fn test_radius_falls_back_to_largest_agent() {
        let mut settings = parse(SAMPLE);
        assert_eq!(settings.effective_inflation_radius(), Some(0.3));

        settings.inflation_radius = Some(0.05);
        assert_eq!(settings.effective_inflation_radius(), Some(0.05));

        settings.inflation_radius = None;
        settings.agents.clear();
        assert_eq!(settings.effective_inflation_radius(), None);
    }

    #[test]
    fn test_build_map() {
        let map = parse(SAMPLE).map.build().unwrap();
        assert_eq!(map.property().origin, Coordinates::new(1.0, -1.0));
        assert_eq!(
            map.occupied_indices(),
            vec![
                Index::new(0, 0),
                Index::new(3, 1),
                Index::new(4, 1),
                Index::new(3, 2),
                Index::new(4, 2),
            ]
        );
    }

    #[test]
    fn test_build_map_rejects_outside_obstacle() {
        let mut settings = parse(SAMPLE).map;
        settings.obstacles.push([6, 0]);
        assert_eq!(settings.build().unwrap_err(), MapError::OutOfBounds(Index::new(6, 0)));
    }
}
