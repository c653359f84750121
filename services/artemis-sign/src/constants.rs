// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use http::header::HeaderName;

// Env values used in artemis services.
pub const ARTEMIS_ACCESS_KEY: &str = "ARTEMIS_ACCESS_KEY";
pub const ARTEMIS_SECRET_KEY: &str = "ARTEMIS_SECRET_KEY";

// Headers used by the artemis gateway.
pub const X_CA_KEY: &str = "x-ca-key";
pub const X_CA_SIGNATURE: &str = "x-ca-signature";
pub const X_CA_SIGNATURE_HEADERS: &str = "x-ca-signature-headers";
pub const CONTENT_MD5: &str = "content-md5";
pub const X_APPLICATION_CONTEXT: &str = "x-application-context";

pub const DEFAULT_ACCEPT: &str = "*/*";
pub const CONTENT_TYPE_JSON: &str = "application/json;charset=UTF-8";

/// Headers that never take part in the canonical header section.
///
/// They are either part of the signature itself, written by the transport
/// or the HTTP stack, or already covered by a dedicated line.
pub const EXCLUDED_HEADERS: [HeaderName; 14] = [
    HeaderName::from_static(X_CA_SIGNATURE),
    HeaderName::from_static(X_CA_SIGNATURE_HEADERS),
    HeaderName::from_static(X_CA_KEY),
    http::header::ACCEPT,
    HeaderName::from_static(CONTENT_MD5),
    http::header::CONTENT_TYPE,
    http::header::DATE,
    http::header::CONTENT_LENGTH,
    http::header::SERVER,
    http::header::CONNECTION,
    http::header::HOST,
    http::header::TRANSFER_ENCODING,
    HeaderName::from_static(X_APPLICATION_CONTEXT),
    http::header::CONTENT_ENCODING,
];
