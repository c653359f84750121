//! Signed client for the Hikvision Artemis open platform.
//!
//! [`Client`] wraps the signing transport from [`artemis_sign`] and exposes
//! one typed operation per gateway endpoint. Each operation builds the
//! request, signs and sends it once, and decodes the `{code, msg, data}`
//! envelope into the shapes in [`model`].
//!
//! ## Example
//!
//! ```no_run
//! use artemis::{ClientBuilder, Result};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ClientBuilder::new("https://10.0.0.1:443")
//!         .credential("access_key", "secret_key")
//!         .timeout(Duration::from_secs(10))
//!         .build()?;
//!
//!     let cameras = client.cameras(20, 0).await?;
//!     for camera in &cameras.data {
//!         let preview = client.preview_url(&camera.index_code, 0, 0).await?;
//!         println!("{}: {}", camera.name, preview.data.url);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Failures surface as [`Error`] with an [`ErrorKind`]: `HttpStatus` for a
//! non-2xx response, `Decode` for a body that is not the expected JSON and
//! `Application` when the embedded `code` is neither `"200"` nor `"0"`.

mod client;
pub use client::{Client, ClientBuilder, DEFAULT_TIMEOUT};

pub mod constants;
pub mod model;

pub use artemis_core::{Context, Env, Error, ErrorKind, HttpSend, OsEnv, Result, StaticEnv};
pub use artemis_sign::{
    Config, ConfigCredentialProvider, Credential, DefaultCredentialProvider,
    EnvCredentialProvider, RequestSigner, SigningHttpSend, StaticCredentialProvider,
};
