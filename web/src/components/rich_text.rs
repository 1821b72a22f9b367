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
use std::cell::RefCell;
use std::rc::Rc;

use sycamore::{futures::spawn_local_scoped, prelude::*};
use tracing::{debug, error};
use wasm_bindgen::{prelude::Closure, JsCast};
use web_sys::Element;

use posts::editor::EditorOptions;

use crate::typings::Quill;

struct QuillBinding {
    quill: Quill,
    // Dropping this would detach the change listener.
    _on_change: Closure<dyn FnMut()>,
}

impl QuillBinding {
    fn html(&self) -> String {
        self.quill.root().inner_html()
    }

    /// Replaces the document without moving focus. A selection is only
    /// restored when the editor already had focus.
    fn set_html(&self, html: &str) {
        let selection = selection_to_restore(self.quill.has_focus(), || {
            Some(self.quill.get_selection()).filter(|range| !range.is_null())
        });
        let delta = self.quill.clipboard().convert(html);
        self.quill.set_contents(&delta, "api");
        if let Some(range) = selection {
            self.quill.set_selection(&range, "api");
        }
    }
}

/// Only a focused editor has a range worth putting back. Asking an unfocused
/// one for its selection would not move focus, but restoring it would.
pub(crate) fn selection_to_restore<R, F>(focused: bool, current: F) -> Option<R>
where
    F: FnOnce() -> Option<R>,
{
    if focused {
        current()
    } else {
        None
    }
}

#[derive(Prop)]
pub struct RichTextEditorProps<'a> {
    pub id: &'static str,
    pub value: &'a ReadSignal<String>,
    pub on_change: Rc<dyn Fn(String)>,
}

/// A Quill editor kept in sync with `value`.
///
/// Every edit is reported through `on_change` as serialized markup. When
/// `value` changes from the outside, for instance after a load, the
/// document is replaced unless it already holds that markup.
#[component]
pub fn RichTextEditor<'a, G: Html>(cx: Scope<'a>, props: RichTextEditorProps<'a>) -> View<G> {
    let RichTextEditorProps {
        id,
        value,
        on_change,
    } = props;
    let container = create_node_ref(cx);
    let binding = create_ref(cx, RefCell::new(None::<QuillBinding>));

    create_effect(cx, move || {
        let html = value.get();
        if let Some(binding) = binding.borrow().as_ref() {
            if binding.html() != *html {
                debug!("replacing editor document");
                binding.set_html(&html);
            }
        }
    });

    if G::IS_BROWSER {
        // Quill inserts its toolbar next to the container so we wait until
        // the view has been attached before starting it.
        spawn_local_scoped(cx, async move {
            let element = match container.try_get::<G>() {
                Some(node) => node.to_web_sys().unchecked_into::<Element>(),
                None => {
                    error!("Rich text container was never rendered");
                    return;
                }
            };
            let options = match serde_wasm_bindgen::to_value(&EditorOptions::post_editor()) {
                Ok(options) => options,
                Err(err) => {
                    error!(?err, "Unable to encode editor options");
                    return;
                }
            };
            let quill = match Quill::new(&element, &options) {
                Ok(quill) => quill,
                Err(err) => {
                    error!(?err, "Unable to start the rich text editor");
                    return;
                }
            };
            let root = quill.root();
            let on_change = Closure::wrap(Box::new(move || {
                on_change(root.inner_html());
            }) as Box<dyn FnMut()>);
            quill.on("text-change", &on_change);
            let started = QuillBinding {
                quill,
                _on_change: on_change,
            };
            let initial = value.get_untracked();
            if !initial.is_empty() {
                started.set_html(&initial);
            }
            *binding.borrow_mut() = Some(started);
        });
    }

    view! {cx,
        div(class="rich-text", id=id) {
            div(ref=container)
        }
    }
}
