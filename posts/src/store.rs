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
use async_trait::async_trait;

use client_api::{AuthToken, PostData};

#[derive(Debug, Clone, PartialEq)]
pub struct Error(String);

impl Error {
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Error {}

impl From<String> for Error {
    fn from(item: String) -> Self {
        Error(item)
    }
}

impl From<&'static str> for Error {
    fn from(item: &'static str) -> Self {
        Error(item.to_owned())
    }
}

impl From<serde_json::Error> for Error {
    fn from(item: serde_json::Error) -> Self {
        Error(format!("{:?}", item))
    }
}

/// Remote storage for board posts.
///
/// Any failure, be it transport, status or decoding, comes back as an
/// [`Error`]. Callers do not distinguish between them.
#[async_trait(?Send)]
pub trait PostStore {
    async fn fetch_post(&self, id: &str, token: Option<&AuthToken>) -> Result<PostData, Error>;

    /// Returns the raw response body on success.
    async fn update_post(
        &self,
        id: &str,
        post: &PostData,
        token: Option<&AuthToken>,
    ) -> Result<String, Error>;
}

pub trait Navigator {
    fn navigate_to(&self, path: &str) -> Result<(), Error>;
}
