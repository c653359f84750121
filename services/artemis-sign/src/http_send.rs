use std::error::Error as StdError;

use artemis_core::{Context, Error, HttpSend, Result, Signer};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;

use crate::{Credential, RequestSigner, StaticCredentialProvider};

/// SigningHttpSend signs every request before handing it to the inner send path.
///
/// The request is owned by the transport for the whole sign-and-send call.
/// Its body is read fully, digested, and replaced by a fresh in-memory copy
/// so the inner sender sees exactly the bytes that were signed.
#[derive(Debug, Clone)]
pub struct SigningHttpSend<S> {
    signer: Signer<Credential>,
    inner: S,
}

impl<S: HttpSend> SigningHttpSend<S> {
    /// Create a new signing transport around `inner`.
    pub fn new(signer: Signer<Credential>, inner: S) -> Self {
        Self { signer, inner }
    }

    /// Create a signing transport that always signs with the given key pair.
    pub fn with_static_credential(inner: S, access_key: &str, secret_key: &str) -> Self {
        let signer = Signer::new(
            Context::new(),
            StaticCredentialProvider::new(access_key, secret_key),
            RequestSigner::new(),
        );
        Self::new(signer, inner)
    }

    /// Get the inner send path.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Sign the request without sending it.
    ///
    /// An empty body is treated as no body. If the body can't be read the
    /// request is dropped and a [`ErrorKind::Transport`](artemis_core::ErrorKind::Transport)
    /// error is returned.
    pub async fn sign<B>(&self, req: http::Request<B>) -> Result<http::Request<Bytes>>
    where
        B: http_body::Body,
        B::Error: StdError + Send + Sync + 'static,
    {
        let (parts, body) = req.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| Error::transport("failed to read request body").with_source(e))?
            .to_bytes();

        self.sign_buffered(parts, body).await
    }

    async fn sign_buffered(
        &self,
        mut parts: http::request::Parts,
        body: Bytes,
    ) -> Result<http::Request<Bytes>> {
        let digest_input = if body.is_empty() {
            None
        } else {
            Some(body.as_ref())
        };
        self.signer.sign(&mut parts, digest_input).await?;

        Ok(http::Request::from_parts(parts, body))
    }

    /// Sign the request and send it through the inner send path.
    ///
    /// The response or error of the inner send path is returned unmodified.
    pub async fn send<B>(&self, req: http::Request<B>) -> Result<http::Response<Bytes>>
    where
        B: http_body::Body,
        B::Error: StdError + Send + Sync + 'static,
    {
        let req = self.sign(req).await?;
        self.inner.http_send(req).await
    }
}

#[async_trait]
impl<S: HttpSend> HttpSend for SigningHttpSend<S> {
    /// Sign an already buffered request and send it through the inner send path.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        let req = self.sign_buffered(parts, body).await?;
        self.inner.http_send(req).await
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::pin::Pin;
    use std::sync::{Arc, Mutex};
    use std::task::{Context as TaskContext, Poll};

    use artemis_core::hash::{base64_hmac_sha256, base64_md5};
    use artemis_core::ErrorKind;
    use http_body::Frame;
    use http_body_util::{Full, StreamBody};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::constants::*;

    /// Records every request it is asked to send.
    #[derive(Debug, Default, Clone)]
    struct RecordingHttpSend {
        requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
    }

    impl RecordingHttpSend {
        fn take(&self) -> Vec<http::Request<Bytes>> {
            std::mem::take(&mut *self.requests.lock().unwrap())
        }
    }

    #[async_trait]
    impl HttpSend for RecordingHttpSend {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.requests.lock().unwrap().push(req);
            Ok(http::Response::new(Bytes::from_static(b"ok")))
        }
    }

    /// A body that fails on first read.
    struct BrokenBody;

    impl http_body::Body for BrokenBody {
        type Data = Bytes;
        type Error = io::Error;

        fn poll_frame(
            self: Pin<&mut Self>,
            _cx: &mut TaskContext<'_>,
        ) -> Poll<Option<std::result::Result<Frame<Self::Data>, Self::Error>>> {
            Poll::Ready(Some(Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "body stream reset",
            ))))
        }
    }

    fn transport() -> (SigningHttpSend<RecordingHttpSend>, RecordingHttpSend) {
        let inner = RecordingHttpSend::default();
        (
            SigningHttpSend::with_static_credential(inner.clone(), "AK", "SK"),
            inner,
        )
    }

    #[tokio::test]
    async fn test_send_signs_and_delegates() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();
        let (transport, inner) = transport();

        let req = http::Request::get("https://127.0.0.1/a/b?size=10&start=0")
            .header("X-Test", "value")
            .body(Bytes::new())?;
        let resp = transport.http_send(req).await?;
        assert_eq!(resp.body().as_ref(), b"ok");

        let sent = inner.take();
        assert_eq!(sent.len(), 1);
        let headers = sent[0].headers();
        assert_eq!(headers[X_CA_KEY], "AK");
        assert_eq!(headers[X_CA_SIGNATURE_HEADERS], "x-ca-key,x-test");
        assert_eq!(
            headers[X_CA_SIGNATURE],
            base64_hmac_sha256(
                b"SK",
                b"GET\n*/*\napplication/json;charset=UTF-8\nx-test:value\nx-ca-key:AK\n/a/b?size=10&start=0"
            )
            .as_str()
        );
        assert!(sent[0].body().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_body_is_replayable_after_signing() -> Result<()> {
        let (transport, inner) = transport();
        let payload = Bytes::from_static(br#"{"cameraIndexCode":"a10cafaa777c49a5af92c165c95970e0"}"#);

        // A streaming body that can only be read once.
        let chunks = vec![
            Ok::<_, io::Error>(Frame::data(payload.slice(..10))),
            Ok(Frame::data(payload.slice(10..))),
        ];
        let body = StreamBody::new(futures_util::stream::iter(chunks));
        let req = http::Request::post("https://127.0.0.1/artemis/api/video/v1/preview").body(body)?;

        transport.send(req).await?;

        let sent = inner.take();
        assert_eq!(sent[0].body(), &payload);

        // The digest of the exact bytes is part of the signature.
        let expected = format!(
            "POST\n*/*\n{}\napplication/json;charset=UTF-8\nx-ca-key:AK\n/artemis/api/video/v1/preview",
            base64_md5(&payload)
        );
        assert_eq!(
            sent[0].headers()[X_CA_SIGNATURE],
            base64_hmac_sha256(b"SK", expected.as_bytes()).as_str()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_returns_identical_body() -> Result<()> {
        let (transport, _) = transport();
        let req = http::Request::put("https://127.0.0.1/a").body(Full::new(Bytes::from("hello")))?;

        let signed = transport.sign(req).await?;
        assert_eq!(signed.body().as_ref(), b"hello");
        assert!(signed.headers().contains_key(X_CA_SIGNATURE));
        Ok(())
    }

    #[tokio::test]
    async fn test_buffered_and_streamed_bodies_sign_alike() -> Result<()> {
        let (transport, inner) = transport();
        let payload = Bytes::from_static(br#"{"indexCode":"cam-1"}"#);

        let req = http::Request::post("https://127.0.0.1/a").body(payload.clone())?;
        transport.http_send(req).await?;
        let req = http::Request::post("https://127.0.0.1/a").body(Full::new(payload.clone()))?;
        transport.send(req).await?;

        let sent = inner.take();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].body(), &payload);
        assert_eq!(sent[1].body(), &payload);

        let expected = format!(
            "POST\n*/*\n{}\napplication/json;charset=UTF-8\nx-ca-key:AK\n/a",
            base64_md5(&payload)
        );
        let expected = base64_hmac_sha256(b"SK", expected.as_bytes());
        assert_eq!(sent[0].headers()[X_CA_SIGNATURE], expected.as_str());
        assert_eq!(sent[1].headers()[X_CA_SIGNATURE], expected.as_str());
        Ok(())
    }

    #[tokio::test]
    async fn test_unreadable_body_is_not_sent() {
        let (transport, inner) = transport();
        let req = http::Request::post("https://127.0.0.1/a")
            .body(BrokenBody)
            .expect("request must be valid");

        let err = transport.send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(inner.take().is_empty());
    }

    #[tokio::test]
    async fn test_inner_error_is_propagated() {
        let transport = SigningHttpSend::with_static_credential(
            artemis_core::NoopHttpSend,
            "AK",
            "SK",
        );
        let req = http::Request::get("https://127.0.0.1/a")
            .body(Bytes::new())
            .expect("request must be valid");

        let err = transport.http_send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(err.to_string().contains("no HTTP client configured"));
    }

    #[tokio::test]
    async fn test_concurrent_signing() -> Result<()> {
        let (transport, inner) = transport();
        let transport = Arc::new(transport);

        let mut handles = Vec::new();
        for i in 0..8 {
            let transport = transport.clone();
            handles.push(tokio::spawn(async move {
                let req = http::Request::get(format!("https://127.0.0.1/a?start={i}"))
                    .body(Bytes::new())
                    .expect("request must be valid");
                transport.http_send(req).await
            }));
        }
        for handle in handles {
            handle.await.expect("task must not panic")?;
        }

        let sent = inner.take();
        assert_eq!(sent.len(), 8);
        for req in sent {
            let query = req.uri().query().expect("query must exist");
            let expected = format!(
                "GET\n*/*\napplication/json;charset=UTF-8\nx-ca-key:AK\n/a?{query}"
            );
            assert_eq!(
                req.headers()[X_CA_SIGNATURE],
                base64_hmac_sha256(b"SK", expected.as_bytes()).as_str()
            );
        }
        Ok(())
    }
}
