// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::Settings;

/// Loads the application settings from `APP_*` environment variables.
///
/// This function is the primary entry point for this crate. Every setting
/// has a development default, so a bare environment still produces a
/// working configuration; `.env` loading is the binary's responsibility
/// (via `dotenvy`) and happens before this call.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("port", 3000)?
        .set_default("version", "v1")?
        .set_default("path_prefix", "/api")?
        .set_default("environment", "development")?
        .set_default("cors_allowed_origins", "*")?
        .set_default("seed_base_url", "http://localhost:3000")?
        // APP_PORT, APP_VERSION, APP_PATH_PREFIX, APP_ENVIRONMENT,
        // APP_CORS_ALLOWED_ORIGINS, APP_SEED_BASE_URL
        .add_source(config::Environment::with_prefix("APP"))
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}
