// Copyright 2022 Jeremy Wall (Jeremy@marzhilsltudios.com)
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
use anyhow::{anyhow, Result};
use tracing::{debug, warn};
use wasm_bindgen::{prelude::Closure, JsCast};
use web_sys::{window, Event, HtmlInputElement, Storage, StorageEvent, Window};

use client_api::{AuthToken, AUTH_TOKEN_KEY};

fn get_window() -> Result<Window> {
    window().ok_or_else(|| anyhow!("No window present"))
}

pub fn get_storage() -> Result<Storage> {
    get_window()?
        .local_storage()
        .map_err(|e| anyhow!("Failed to get storage: {:?}", e))?
        .ok_or_else(|| anyhow!("No storage available"))
}

/// Reads the bearer token the login flow left in local storage.
pub fn read_auth_token() -> Option<AuthToken> {
    let stored = get_storage().and_then(|storage| {
        storage
            .get_item(AUTH_TOKEN_KEY)
            .map_err(|e| anyhow!("Failed to read {}: {:?}", AUTH_TOKEN_KEY, e))
    });
    match stored {
        Ok(value) => AuthToken::from_stored(value),
        Err(err) => {
            warn!(?err, "Unable to read auth token");
            None
        }
    }
}

/// Calls `f` whenever another tab changes the stored auth token.
///
/// The listener lives as long as the page does.
pub fn watch_auth_token<F>(mut f: F) -> Result<()>
where
    F: FnMut(Option<AuthToken>) + 'static,
{
    let closure = Closure::wrap(Box::new(move |ev: StorageEvent| {
        // A missing key means the whole storage area was cleared.
        if let Some(key) = ev.key() {
            if key != AUTH_TOKEN_KEY {
                return;
            }
        }
        debug!("auth token storage changed");
        f(AuthToken::from_stored(ev.new_value()));
    }) as Box<dyn FnMut(StorageEvent)>);
    get_window()?
        .add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow!("Failed to listen for storage events: {:?}", e))?;
    closure.forget();
    Ok(())
}

pub fn event_target_value(ev: &Event) -> Option<String> {
    ev.target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
}
