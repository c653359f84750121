//! Artemis gateway request signer.
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::Write;

use http::header::{HeaderName, ACCEPT, CONTENT_TYPE, DATE};
use http::HeaderValue;
use log::debug;
use percent_encoding::percent_decode_str;

use super::constants::*;
use super::credential::Credential;
use artemis_core::hash::{base64_hmac_sha256, base64_md5};
use artemis_core::{Context, Error, Result, SignRequest};

/// RequestSigner that implements the artemis gateway signature.
///
/// The canonical string is built from the request as it is at signing time,
/// and the request is updated in place with the headers the gateway needs to
/// verify it.
#[derive(Debug)]
pub struct RequestSigner {
    excluded_headers: HashSet<HeaderName>,
    content_md5: bool,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self {
            excluded_headers: HashSet::from(EXCLUDED_HEADERS),
            content_md5: false,
        }
    }

    /// Also send the body digest as a `Content-MD5` header.
    ///
    /// The digest always takes part in the signature. The header is only
    /// needed by deployments that verify the body on the gateway side.
    pub fn with_content_md5(mut self, enable: bool) -> Self {
        self.content_md5 = enable;
        self
    }

    /// Build the string to sign and return it with the sorted list of signed header names.
    ///
    /// ## Format
    ///
    /// ```text
    /// HTTPMethod + "\n" +
    /// Accept + "\n" +
    /// [Content-MD5 + "\n"] +
    /// Content-Type + "\n" +
    /// [Date + "\n"] +
    /// [lowercase-name + ":" + trimmed-value + "\n"]* +
    /// "x-ca-key:" + AccessKey + "\n" +
    /// DecodedPath + ["?" + RawQuery]
    /// ```
    ///
    /// `Accept`, `Content-Type` and `x-ca-key` are written back to the request.
    pub fn build_string_to_sign(
        &self,
        req: &mut http::request::Parts,
        body: Option<&[u8]>,
        cred: &Credential,
    ) -> Result<(String, Vec<String>)> {
        let mut s = String::new();
        s.write_str(req.method.as_str())?;
        s.write_str("\n")?;

        match header_non_empty(req, &ACCEPT) {
            Some(accept) => writeln!(&mut s, "{accept}")?,
            None => {
                req.headers
                    .insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
                writeln!(&mut s, "{DEFAULT_ACCEPT}")?;
            }
        }

        if let Some(body) = body {
            let digest = base64_md5(body);
            writeln!(&mut s, "{digest}")?;
            if self.content_md5 {
                req.headers
                    .insert(HeaderName::from_static(CONTENT_MD5), digest.parse()?);
            }
        }

        writeln!(&mut s, "{CONTENT_TYPE_JSON}")?;
        req.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));

        // Date is signed only when the caller set one, no default is injected.
        if let Some(date) = header_non_empty(req, &DATE) {
            writeln!(&mut s, "{date}")?;
        }

        let mut signed_headers = {
            let mut headers = self.canonical_headers(req);
            headers.sort_unstable();
            for (name, value) in &headers {
                writeln!(&mut s, "{name}:{value}")?;
            }

            headers
                .into_iter()
                .map(|(name, _)| name.to_string())
                .collect::<Vec<_>>()
        };
        signed_headers.push(X_CA_KEY.to_string());
        signed_headers.sort_unstable();

        writeln!(&mut s, "{X_CA_KEY}:{}", cred.access_key)?;
        req.headers
            .insert(HeaderName::from_static(X_CA_KEY), cred.access_key.parse()?);

        // The gateway verifies against the decoded path.
        s.write_str(&percent_decode_str(req.uri.path()).decode_utf8_lossy())?;
        if let Some(query) = req.uri.query().filter(|q| !q.is_empty()) {
            s.write_str("?")?;
            s.write_str(query)?;
        }

        debug!("string to sign: {}", &s);
        Ok((s, signed_headers))
    }

    /// Collect every header that is not excluded as `(name, trimmed value)`.
    ///
    /// `http` stores header names lowercased, so both the exclusion check and
    /// the sort key are case-insensitive on the name. Only the first value of
    /// a multi-valued header is used.
    fn canonical_headers<'a>(
        &self,
        req: &'a http::request::Parts,
    ) -> Vec<(&'a str, Cow<'a, str>)> {
        let mut headers = Vec::with_capacity(req.headers.keys_len());
        for name in req.headers.keys() {
            if self.excluded_headers.contains(name) {
                continue;
            }
            let Some(value) = req.headers.get(name) else {
                continue;
            };
            let value = match header_str(value) {
                Cow::Borrowed(v) => Cow::Borrowed(v.trim()),
                Cow::Owned(v) => Cow::Owned(v.trim().to_string()),
            };
            headers.push((name.as_str(), value));
        }

        headers
    }
}

#[async_trait::async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut http::request::Parts,
        body: Option<&[u8]>,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;

        let (string_to_sign, signed_headers) = self.build_string_to_sign(req, body, cred)?;
        let signature = base64_hmac_sha256(cred.secret_key.as_bytes(), string_to_sign.as_bytes());

        req.headers.insert(HeaderName::from_static(X_CA_SIGNATURE), {
            let mut value: HeaderValue = signature.parse()?;
            value.set_sensitive(true);

            value
        });
        req.headers.insert(
            HeaderName::from_static(X_CA_SIGNATURE_HEADERS),
            signed_headers.join(",").parse()?,
        );

        Ok(())
    }
}

fn header_non_empty<'a>(
    req: &'a http::request::Parts,
    name: &HeaderName,
) -> Option<Cow<'a, str>> {
    match req.headers.get(name) {
        Some(v) if !v.is_empty() => Some(header_str(v)),
        _ => None,
    }
}

/// Header value as text. Bytes outside visible ASCII are read as UTF-8, so
/// valid UTF-8 values are signed byte for byte.
fn header_str(value: &HeaderValue) -> Cow<'_, str> {
    String::from_utf8_lossy(value.as_bytes())
}
