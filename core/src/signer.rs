use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign the request.
///
/// The credential is loaded on first use and kept for the lifetime of the
/// signer. Cloning a signer shares the loaded credential.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the context this signer runs in.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Signing request.
    ///
    /// `body` is the buffered request body, see [`SignRequest::sign_request`].
    pub async fn sign(&self, req: &mut http::request::Parts, body: Option<&[u8]>) -> Result<()> {
        let credential = self.credential.lock().expect("lock poisoned").clone();
        let credential = if credential.is_valid() {
            credential
        } else {
            let loaded = self.loader.provide_credential(&self.ctx).await?;
            *self.credential.lock().expect("lock poisoned") = loaded.clone();
            loaded
        };

        self.builder
            .sign_request(&self.ctx, req, body, credential.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct TestCredential(String);

    impl SigningCredential for TestCredential {
        fn is_valid(&self) -> bool {
            !self.0.is_empty()
        }
    }

    #[derive(Debug, Default)]
    struct CountingLoader(Arc<AtomicUsize>);

    #[async_trait]
    impl ProvideCredential for CountingLoader {
        type Credential = TestCredential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<TestCredential>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Some(TestCredential("ak".to_string())))
        }
    }

    #[derive(Debug)]
    struct HeaderBuilder;

    #[async_trait]
    impl SignRequest for HeaderBuilder {
        type Credential = TestCredential;

        async fn sign_request(
            &self,
            _: &Context,
            req: &mut http::request::Parts,
            body: Option<&[u8]>,
            credential: Option<&TestCredential>,
        ) -> Result<()> {
            let cred = credential.expect("credential must be loaded");
            req.headers.insert("x-test-key", cred.0.parse()?);
            req.headers
                .insert("x-test-body-len", body.map_or(0, |b| b.len()).into());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_signer_loads_credential_once() -> Result<()> {
        let counter = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(
            Context::new(),
            CountingLoader(counter.clone()),
            HeaderBuilder,
        );

        for _ in 0..3 {
            let mut parts = http::Request::get("http://127.0.0.1/")
                .body(())?
                .into_parts()
                .0;
            signer.sign(&mut parts, Some(b"abc")).await?;
            assert_eq!(parts.headers["x-test-key"], "ak");
            assert_eq!(parts.headers["x-test-body-len"], "3");
        }

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        Ok(())
    }
}
