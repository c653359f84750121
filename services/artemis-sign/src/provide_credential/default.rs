use crate::provide_credential::{ConfigCredentialProvider, EnvCredentialProvider};
use crate::{Config, Credential};
use artemis_core::{Context, ProvideCredential, ProvideCredentialChain, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// DefaultCredentialProvider is a loader that will try to load credential via default chains.
///
/// Resolution order:
///
/// 1. Static config (when built with [`DefaultCredentialProvider::with_config`])
/// 2. Environment variables
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new `DefaultCredentialProvider` instance.
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new().push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create a provider that tries the given config before the environment.
    pub fn with_config(config: Arc<Config>) -> Self {
        Self::new().push_front(ConfigCredentialProvider::new(config))
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use artemis_sign::{DefaultCredentialProvider, StaticCredentialProvider};
    ///
    /// let provider = DefaultCredentialProvider::new()
    ///     .push_front(StaticCredentialProvider::new("access_key", "secret_key"));
    /// ```
    pub fn push_front(
        mut self,
        provider: impl ProvideCredential<Credential = Credential> + 'static,
    ) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use artemis_core::StaticEnv;
    use std::collections::HashMap;

    fn env_context() -> Context {
        Context::new().with_env(StaticEnv {
            envs: HashMap::from_iter([
                (ARTEMIS_ACCESS_KEY.to_string(), "env_access_key".to_string()),
                (ARTEMIS_SECRET_KEY.to_string(), "env_secret_key".to_string()),
            ]),
        })
    }

    #[tokio::test]
    async fn test_default_loader_without_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new().with_env(StaticEnv::default());

        let loader = DefaultCredentialProvider::new();
        let credential = loader.provide_credential(&ctx).await.unwrap();

        assert!(credential.is_none());
    }

    #[tokio::test]
    async fn test_default_loader_with_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let loader = DefaultCredentialProvider::new();
        let credential = loader
            .provide_credential(&env_context())
            .await
            .unwrap()
            .unwrap();

        assert_eq!("env_access_key", credential.access_key);
        assert_eq!("env_secret_key", credential.secret_key);
    }

    #[tokio::test]
    async fn test_default_loader_prefers_config() {
        let _ = env_logger::builder().is_test(true).try_init();

        let config = Config {
            access_key: Some("config_access_key".to_string()),
            secret_key: Some("config_secret_key".to_string()),
        };
        let loader = DefaultCredentialProvider::with_config(Arc::new(config));
        let credential = loader
            .provide_credential(&env_context())
            .await
            .unwrap()
            .unwrap();

        assert_eq!("config_access_key", credential.access_key);
        assert_eq!("config_secret_key", credential.secret_key);
    }
}
