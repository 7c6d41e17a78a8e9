//! Team seed loading for `league init`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use league_core::TeamSeed;

pub fn default_seeds() -> Vec<TeamSeed> {
    vec![
        TeamSeed::new("Chelsea", 85),
        TeamSeed::new("Arsenal", 80),
        TeamSeed::new("Manchester City", 90),
        TeamSeed::new("Liverpool", 88),
    ]
}

/// Read a JSON array of `{ "name", "strength" }` objects.
pub fn load_seeds(path: &Path) -> Result<Vec<TeamSeed>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read teams file: {}", path.display()))?;
    let seeds: Vec<TeamSeed> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse teams file: {}", path.display()))?;
    validate_seeds(&seeds)?;
    Ok(seeds)
}

pub fn validate_seeds(seeds: &[TeamSeed]) -> Result<()> {
    if seeds.len() < 2 {
        bail!("at least 2 teams are required, got {}", seeds.len());
    }
    for (idx, seed) in seeds.iter().enumerate() {
        if seed.name.trim().is_empty() {
            bail!("team #{} has an empty name", idx + 1);
        }
        if seeds[..idx].iter().any(|other| other.name == seed.name) {
            bail!("team name '{}' is used twice", seed.name);
        }
    }
    Ok(())
}
