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
use sycamore::{futures::spawn_local_scoped, prelude::*};
use tracing::{error, instrument};
use wasm_bindgen::JsCast;
use web_sys::Element;

use posts::{PostStore, LOAD_FAILED};

use crate::{api::HttpStore, app_state::AuthState};

#[derive(Debug, Prop)]
pub struct PostPageProps {
    pub id: String,
}

/// Read only view of a post. This is where a successful edit lands.
#[instrument]
#[component]
pub fn PostPage<G: Html>(cx: Scope, props: PostPageProps) -> View<G> {
    let store = HttpStore::get_from_context(cx);
    let auth = AuthState::get_from_context(cx);
    let title = create_signal(cx, String::new());
    let failed = create_signal(cx, false);
    let body = create_node_ref(cx);

    if G::IS_BROWSER {
        spawn_local_scoped(cx, async move {
            match store.fetch_post(&props.id, auth.current().as_ref()).await {
                Ok(post) => {
                    title.set(post.title);
                    if let Some(node) = body.try_get::<G>() {
                        node.to_web_sys()
                            .unchecked_into::<Element>()
                            .set_inner_html(&post.content);
                    }
                }
                Err(err) => {
                    error!(?err, "Failed to fetch post");
                    failed.set(true);
                }
            }
        });
    }

    view! {cx,
        article(class="post") {
            (if *failed.get() {
                view! {cx, div(class="error", role="alert") { (LOAD_FAILED) } }
            } else {
                View::empty()
            })
            h1 { (title.get()) }
            div(class="post-content", ref=body)
        }
    }
}
