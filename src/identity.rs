//! Resolving whose activity to show.
//!
//! Rather than requiring `--user` on every invocation, identity is resolved through a chain:
//!
//! 1. `--user <identity>` — explicit per-command override
//! 2. `WAKE_USER` env var — process/session level
//! 3. `default-identity` in `~/.wake/config.toml`

use std::env;

use crate::config::Config;

/// Error message shown when identity cannot be resolved.
pub const IDENTITY_REQUIRED: &str = "identity required: pass --user <identity>, \
    set WAKE_USER, or add `default-identity = \"...\"` to ~/.wake/config.toml";

/// Resolve the identity to observe from the tiered resolution chain.
pub fn resolve_identity(explicit: Option<&str>, config: &Config) -> Result<String, String> {
    resolve_from(explicit, env::var("WAKE_USER").ok().as_deref(), config)
}

fn resolve_from(
    explicit: Option<&str>,
    from_env: Option<&str>,
    config: &Config,
) -> Result<String, String> {
    [explicit, from_env, config.default_identity.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| IDENTITY_REQUIRED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(identity: Option<&str>) -> Config {
        Config {
            default_identity: identity.map(String::from),
            ..Config::default()
        }
    }

    #[test]
    fn explicit_wins() {
        let config = config_with(Some("from-config"));
        let id = resolve_from(Some("kcccr123"), Some("from-env"), &config).unwrap();
        assert_eq!(id, "kcccr123");
    }

    #[test]
    fn env_beats_config() {
        let config = config_with(Some("from-config"));
        assert_eq!(resolve_from(None, Some("from-env"), &config).unwrap(), "from-env");
    }

    #[test]
    fn blank_sources_are_skipped() {
        let config = config_with(Some("from-config"));
        assert_eq!(resolve_from(Some("  "), Some(""), &config).unwrap(), "from-config");
    }

    #[test]
    fn nothing_resolves() {
        let err = resolve_from(None, None, &config_with(None)).unwrap_err();
        assert_eq!(err, IDENTITY_REQUIRED);
    }
}
