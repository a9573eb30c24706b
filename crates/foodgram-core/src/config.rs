/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` and call `Config::from_env()`
/// at startup. Field `database_url` maps to env var `DATABASE_URL`.
///
/// # Panics
///
/// Panics if any required env var is missing or cannot be deserialized.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Self {
        envy::from_env().expect("failed to load config from environment")
    }

    /// Load from an explicit set of `(KEY, value)` pairs.
    fn from_pairs<I>(pairs: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(pairs)
    }
}
