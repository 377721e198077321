/// Region configuration for tournament discovery
///
/// Coordinates are a "lat, lon" string as the start.gg `distanceFrom` filter
/// expects, radius is a distance string such as "70mi".
#[derive(Debug, Clone)]
pub struct RegionConfig {
    pub coordinates: String,
    pub radius: String,
    pub name: String,
}

impl RegionConfig {
    pub fn new(coordinates: &str, radius: &str, name: &str) -> Self {
        Self {
            coordinates: coordinates.to_string(),
            radius: radius.to_string(),
            name: name.to_string(),
        }
    }
}

/// Get the default Northern California regions to search for tournaments
pub fn get_default_regions() -> Vec<RegionConfig> {
    vec![
        RegionConfig::new("37.77151615492457, -122.41563048985462", "70mi", "SF Bay"),
        RegionConfig::new("38.57608096237729, -121.49183616631059", "40mi", "Sacramento"),
    ]
}
