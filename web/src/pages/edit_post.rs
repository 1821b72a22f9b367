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
use std::rc::Rc;

use sycamore::{futures::spawn_local_scoped, prelude::*};
use tracing::{debug, instrument};

use posts::{load_post, save_post, EditSession, SessionHandle};

use crate::{
    api::HttpStore,
    app_state::{AuthState, SignalSession},
    components::RichTextEditor,
    js_lib,
    routing::RouterNavigator,
};

#[derive(Debug, Prop)]
pub struct EditPostPageProps {
    pub id: Option<String>,
}

#[instrument]
#[component]
pub fn EditPostPage<G: Html>(cx: Scope, props: EditPostPageProps) -> View<G> {
    let store = HttpStore::get_from_context(cx);
    let auth = AuthState::get_from_context(cx);
    let session = SignalSession::new(EditSession::new(props.id, auth.current()));

    create_effect(cx, {
        let session = session.clone();
        let store = store.clone();
        move || {
            let token = auth.token();
            if !session.update(|s| s.request_load(token)) {
                return;
            }
            let session = session.clone();
            let store = store.clone();
            spawn_local_scoped(cx, async move {
                load_post(&session, store.as_ref()).await;
            });
        }
    });

    on_cleanup(cx, {
        let session = session.clone();
        move || {
            debug!("closing post editor");
            session.close();
        }
    });

    let title = session.select(cx, |s| s.title().to_owned());
    let content = session.select(cx, |s| s.content().to_owned());
    let error = session.select(cx, |s| s.error().map(str::to_owned));
    let saving = session.select(cx, EditSession::is_saving);

    let on_title_input = {
        let session = session.clone();
        move |ev: web_sys::Event| {
            if let Some(text) = js_lib::event_target_value(&ev) {
                session.update(|s| s.set_title(text));
            }
        }
    };
    let on_content_change: Rc<dyn Fn(String)> = {
        let session = session.clone();
        Rc::new(move |html: String| session.update(|s| s.set_content(html)))
    };
    let on_submit = {
        let session = session.clone();
        let store = store.clone();
        move |ev: web_sys::Event| {
            ev.prevent_default();
            let session = session.clone();
            let store = store.clone();
            spawn_local_scoped(cx, async move {
                save_post(&session, store.as_ref(), &RouterNavigator).await;
            });
        }
    };

    view! {cx,
        div(class="edit-post") {
            form(class="post-form", on:submit=on_submit) {
                h1 { "게시글 수정" }
                (match error.get().as_ref() {
                    Some(msg) => {
                        let msg = msg.clone();
                        view! {cx, div(class="error", role="alert") { (msg) } }
                    }
                    None => View::empty(),
                })
                div(class="form-group") {
                    label(for="title") { "제목" }
                    input(
                        type="text",
                        id="title",
                        prop:required=true,
                        prop:value=title.get().as_ref().clone(),
                        on:input=on_title_input
                    )
                }
                div(class="form-group") {
                    label(for="content") { "내용" }
                    RichTextEditor(id="content", value=content, on_change=on_content_change)
                }
                button(class="submit", type="submit", prop:disabled=*saving.get()) { "게시글 수정" }
            }
        }
    }
}
