use serde::Deserialize;

use foodgram_core::config::Config;

/// Recipes service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipesConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 8000). Env var: `RECIPES_PORT`.
    #[serde(default = "default_port")]
    pub recipes_port: u16,
    /// Directory uploaded images are written to. Env var: `MEDIA_ROOT`.
    #[serde(default = "default_media_root")]
    pub media_root: String,
    /// URL prefix the media root is served under. Env var: `MEDIA_URL`.
    #[serde(default = "default_media_url")]
    pub media_url: String,
}

fn default_port() -> u16 {
    8000
}

fn default_media_root() -> String {
    "media".to_owned()
}

fn default_media_url() -> String {
    "/media/".to_owned()
}

impl Config for RecipesConfig {}
