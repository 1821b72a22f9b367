// Copyright 2024 Jeremy Wall
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::fmt;
use std::rc::Rc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Local storage key the bearer token lives under.
pub const AUTH_TOKEN_KEY: &'static str = "authToken";

/// Build time environment variable holding the api base url.
pub const API_URL_ENV: &'static str = "NEXT_PUBLIC_API_URL";

/// A board post as the api sends and accepts it.
///
/// Reads ignore any extra fields the server includes. Writes send exactly
/// `title` and `content`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PostData {
    pub title: String,
    pub content: String,
}

impl PostData {
    pub fn new<T: Into<String>, C: Into<String>>(title: T, content: C) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Bearer credential forwarded on every api request.
// NOTE(jwall): The token is kept behind a Secret so that it never shows
// up in our tracing output.
#[derive(Clone)]
pub struct AuthToken(Rc<SecretString>);

impl AuthToken {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(Rc::new(SecretString::new(token.into())))
    }

    /// Returns None for a missing or blank stored value.
    pub fn from_stored(value: Option<String>) -> Option<Self> {
        value.filter(|v| !v.trim().is_empty()).map(Self::new)
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

impl PartialEq for AuthToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for AuthToken {}

/// Normalizes a configured api root so paths can be appended to it.
pub fn api_root<S: AsRef<str>>(configured: Option<S>) -> String {
    match configured {
        Some(root) => root.as_ref().trim().trim_end_matches('/').to_owned(),
        None => String::new(),
    }
}

pub fn board_path<S: fmt::Display>(root: &str, id: S) -> String {
    format!("{}/api/boards/{}", root, id)
}

pub fn post_detail_path<S: fmt::Display>(id: S) -> String {
    format!("/posts/{}", id)
}
