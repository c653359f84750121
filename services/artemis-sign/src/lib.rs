//! Artemis gateway signing for artemis.
//!
//! The Artemis open platform authenticates every call with an HMAC-SHA256
//! signature over a canonical form of the request, keyed by the caller's
//! secret key and identified by its access key (`x-ca-key`).
//!
//! ## Overview
//!
//! - [`RequestSigner`] builds the canonical string and writes the
//!   `x-ca-key`, `x-ca-signature` and `x-ca-signature-headers` headers.
//! - [`SigningHttpSend`] decorates any [`HttpSend`](artemis_core::HttpSend):
//!   it buffers the body, signs, and forwards the request unchanged otherwise.
//! - Credential providers load the key pair from static values, a [`Config`]
//!   or the environment.
//!
//! ## Quick Start
//!
//! ```no_run
//! use artemis_core::{HttpSend, Result};
//! use artemis_http_send_reqwest::ReqwestHttpSend;
//! use artemis_sign::SigningHttpSend;
//! use bytes::Bytes;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let transport =
//!         SigningHttpSend::with_static_credential(ReqwestHttpSend::default(), "access_key", "secret_key");
//!
//!     let req = http::Request::get(
//!         "https://127.0.0.1/artemis/api/common/v1/remoteControlUnitRestService/findControlUnitPage?size=10&start=0",
//!     )
//!     .body(Bytes::new())?;
//!     let resp = transport.http_send(req).await?;
//!     println!("{}", resp.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! ```bash
//! export ARTEMIS_ACCESS_KEY=your-access-key
//! export ARTEMIS_SECRET_KEY=your-secret-key
//! ```

mod constants;
pub use constants::{CONTENT_TYPE_JSON, X_CA_KEY, X_CA_SIGNATURE, X_CA_SIGNATURE_HEADERS};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::RequestSigner;

mod http_send;
pub use http_send::SigningHttpSend;

mod provide_credential;
pub use provide_credential::*;
