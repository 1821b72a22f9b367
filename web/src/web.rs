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
use sycamore::prelude::*;
use tracing::{error, info, instrument};

use crate::{api::HttpStore, app_state::AuthState, js_lib, routing::Handler};

#[instrument]
#[component]
pub fn UI<G: Html>(cx: Scope) -> View<G> {
    HttpStore::provide_context(cx, HttpStore::from_build_env());
    let token = if G::IS_BROWSER {
        js_lib::read_auth_token()
    } else {
        None
    };
    let auth = AuthState::provide_context(cx, token);
    if G::IS_BROWSER {
        if let Err(err) = js_lib::watch_auth_token(move |token| {
            info!("Auth token changed");
            auth.set(token);
        }) {
            error!(?err, "Unable to watch for auth token changes");
        }
    }
    info!("Starting UI");

    view! {cx,
        div(class="app") {
            Handler()
        }
    }
}
