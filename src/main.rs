mod settings;

use anyhow::{Context, anyhow};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| settings::DEFAULT_CONFIG_PATH.to_string());
    let mut settings = settings::load_config(&path).with_context(|| format!("Failed to load {path}"))?;

    for agent in &mut settings.agents {
        agent.pose = agent.start;
        info!(name = %agent.name, kind = %agent.kind, size = agent.size, "Loaded agent");
        debug!("{agent}");
    }

    let radius = settings
        .effective_inflation_radius()
        .ok_or_else(|| anyhow!("No inflation radius configured and no agents to derive one from"))?;
    if settings.inflation_radius.is_none() {
        warn!(radius, "inflation_radius not set, using the largest agent size");
    }

    let mut map = settings.map.build().context("Failed to build occupancy map")?;
    let obstacles = map.occupied_indices().len();
    let blocked = map
        .inflate(radius)
        .context("Failed to inflate occupancy map")?
        .iter()
        .filter(|cell| cell.occupied)
        .count();

    info!(
        obstacles,
        blocked,
        free = map.property().cell_count() - blocked,
        "Map ready for planning"
    );
    println!("{map}");

    Ok(())
}
