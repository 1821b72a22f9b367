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
//! Bindings for the Quill rich text editor loaded by index.html.
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

#[wasm_bindgen]
extern "C" {
    pub type Quill;

    #[wasm_bindgen(constructor, catch)]
    pub fn new(container: &Element, options: &JsValue) -> Result<Quill, JsValue>;

    /// The contenteditable element holding the document markup.
    #[wasm_bindgen(method, getter)]
    pub fn root(this: &Quill) -> HtmlElement;

    #[wasm_bindgen(method, getter)]
    pub fn clipboard(this: &Quill) -> QuillClipboard;

    #[wasm_bindgen(method)]
    pub fn on(this: &Quill, event: &str, handler: &Closure<dyn FnMut()>);

    #[wasm_bindgen(method, js_name = hasFocus)]
    pub fn has_focus(this: &Quill) -> bool;

    /// The current range, or null when the editor is not focused.
    #[wasm_bindgen(method, js_name = getSelection)]
    pub fn get_selection(this: &Quill) -> JsValue;

    #[wasm_bindgen(method, js_name = setSelection)]
    pub fn set_selection(this: &Quill, range: &JsValue, source: &str);

    #[wasm_bindgen(method, js_name = setContents)]
    pub fn set_contents(this: &Quill, delta: &JsValue, source: &str);

    pub type QuillClipboard;

    /// Parses markup into a Delta without touching the document.
    #[wasm_bindgen(method)]
    pub fn convert(this: &QuillClipboard, html: &str) -> JsValue;
}
