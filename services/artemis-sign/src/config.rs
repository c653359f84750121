use std::fmt::{self, Debug};

use super::constants::*;
use artemis_core::utils::Redact;
use artemis_core::Context;

/// Config carries the credential configuration for artemis.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ARTEMIS_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ARTEMIS_SECRET_KEY`]
    pub secret_key: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_key", &Redact::from(&self.access_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .finish()
    }
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(ARTEMIS_ACCESS_KEY) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ARTEMIS_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artemis_core::StaticEnv;
    use std::collections::HashMap;

    #[test]
    fn test_from_env_keeps_explicit_values() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (ARTEMIS_ACCESS_KEY.to_string(), "env_ak".to_string()),
                (ARTEMIS_SECRET_KEY.to_string(), "env_sk".to_string()),
            ]),
        });

        let config = Config {
            access_key: Some("explicit_ak".to_string()),
            ..Default::default()
        }
        .from_env(&ctx);

        assert_eq!(config.access_key.as_deref(), Some("explicit_ak"));
        assert_eq!(config.secret_key.as_deref(), Some("env_sk"));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = Config {
            access_key: Some("ak-0123456789abcdef".to_string()),
            secret_key: None,
        };

        assert_eq!(
            format!("{config:?}"),
            r#"Config { access_key: ak-***def, secret_key: EMPTY }"#
        );
    }
}
