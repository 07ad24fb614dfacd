use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded = crate::env::expand_env(&raw)
            .map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self =
            toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// This is the startup invariant for the upstream credential: a missing
    /// or empty API key fails here, before any listener is bound, so the
    /// process never serves requests it cannot relay.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream credential is empty or the health
    /// path is malformed
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.upstream.api_key.expose_secret().trim().is_empty() {
            anyhow::bail!("upstream.api_key must not be empty");
        }

        if self.server.health.enabled && !self.server.health.path.starts_with('/') {
            anyhow::bail!(
                "server.health.path must start with '/', got '{}'",
                self.server.health.path
            );
        }

        Ok(())
    }
}
