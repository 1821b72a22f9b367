// Copyright 2022 Jeremy Wall
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
use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use serde_json::to_string;
use sycamore::prelude::*;
use tracing::{debug, error, instrument};

use client_api::{api_root, board_path, AuthToken, PostData};
use posts::{Error, PostStore};

fn with_auth(request: RequestBuilder, token: Option<&AuthToken>) -> RequestBuilder {
    match token {
        Some(token) => request.header("Authorization", token.bearer().as_str()),
        None => {
            debug!("No auth token available, sending request without one");
            request
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpStore {
    root: String,
}

impl HttpStore {
    pub fn new(root: String) -> Self {
        Self { root }
    }

    /// Uses the api url baked in at build time, or the serving origin when
    /// none was given.
    pub fn from_build_env() -> Self {
        Self::new(api_root(option_env!("NEXT_PUBLIC_API_URL")))
    }

    pub fn board_path(&self, id: &str) -> String {
        board_path(&self.root, id)
    }

    pub fn provide_context(cx: Scope, store: Self) {
        provide_context(cx, Rc::new(store));
    }

    pub fn get_from_context(cx: Scope) -> Rc<Self> {
        use_context::<Rc<Self>>(cx).clone()
    }
}

#[async_trait(?Send)]
impl PostStore for HttpStore {
    #[instrument(skip(self, token))]
    async fn fetch_post(&self, id: &str, token: Option<&AuthToken>) -> Result<PostData, Error> {
        let path = self.board_path(id);
        let resp = match with_auth(Request::get(&path), token).send().await {
            Ok(resp) => resp,
            Err(err) => {
                error!(path, ?err, "Error hitting api");
                return Err(format!("{:?}", err).into());
            }
        };
        if !resp.ok() {
            Err(format!("Status: {}", resp.status()).into())
        } else {
            debug!("We got a valid response back!");
            Ok(resp
                .json::<PostData>()
                .await
                .map_err(|e| format!("{}", e))?)
        }
    }

    #[instrument(skip(self, post, token))]
    async fn update_post(
        &self,
        id: &str,
        post: &PostData,
        token: Option<&AuthToken>,
    ) -> Result<String, Error> {
        let path = self.board_path(id);
        let serialized = to_string(post)?;
        let request = with_auth(Request::put(&path), token)
            .header("Content-Type", "application/json")
            .body(serialized)
            .map_err(|e| format!("{:?}", e))?;
        let resp = match request.send().await {
            Ok(resp) => resp,
            Err(err) => {
                error!(path, ?err, "Error hitting api");
                return Err(format!("{:?}", err).into());
            }
        };
        if !resp.ok() {
            Err(format!("Status: {}", resp.status()).into())
        } else {
            debug!("We got a valid response back!");
            Ok(resp.text().await.map_err(|e| format!("{}", e))?)
        }
    }
}
