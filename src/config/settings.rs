pub struct ApiSettings {
    pub endpoint: &'static str,
    pub user_agent: &'static str,
    pub rate_limit_ms: u64,
    pub timeout_secs: u64,
    pub max_retries: usize,
    pub discovery_per_page: usize,
    pub discovery_max_pages: usize,
    pub sets_per_page: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.start.gg/gql/alpha",
            user_agent: "NorCalSmashRanking/1.0",
            rate_limit_ms: 1100, // start.gg allows ~80 requests per 60s
            timeout_secs: 30,
            max_retries: 3,
            discovery_per_page: 50,
            discovery_max_pages: 10,
            sets_per_page: 40,
        }
    }
}

pub struct FilterSettings {
    pub game_title: &'static str,
    pub min_entrants: i64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            game_title: "Super Smash Bros. Ultimate",
            min_entrants: 16,
        }
    }
}

pub struct AppConfig {
    pub api: ApiSettings,
    pub filter: FilterSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            api: ApiSettings::default(),
            filter: FilterSettings::default(),
        }
    }
}
