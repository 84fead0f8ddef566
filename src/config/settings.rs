pub struct CacheSettings {
    pub leaderboard_ttl_secs: u64,
    pub league_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            leaderboard_ttl_secs: 15 * 60,
            league_ttl_secs: 60 * 60,
        }
    }
}

pub struct AppConfig {
    pub cache: CacheSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            cache: CacheSettings::default(),
        }
    }
}
