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
//! Configuration handed to the rich text editor widget.
//!
//! The types serialize into the options object the Quill constructor
//! takes, so the toolbar and the allowed formats are defined in one place.
use serde::{Serialize, Serializer};

/// Formats the editor will keep in the document. Anything else is dropped
/// on paste and has no toolbar control.
pub const ALLOWED_FORMATS: [&'static str; 13] = [
    "font",
    "header",
    "bold",
    "italic",
    "underline",
    "strike",
    "blockquote",
    "list",
    "bullet",
    "indent",
    "link",
    "align",
    "size",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeChoice {
    Small,
    Normal,
    Large,
    Huge,
}

impl Serialize for SizeChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Quill spells the default size as `false`.
            SizeChoice::Normal => serializer.serialize_bool(false),
            SizeChoice::Small => serializer.serialize_str("small"),
            SizeChoice::Large => serializer.serialize_str("large"),
            SizeChoice::Huge => serializer.serialize_str("huge"),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Ordered,
    Bullet,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ToolbarItem {
    Toggle(&'static str),
    Size { size: Vec<SizeChoice> },
    // An empty list asks for the editor's default alignments.
    Align { align: Vec<&'static str> },
    List { list: ListKind },
}

impl ToolbarItem {
    /// The document format this control produces.
    pub fn format(&self) -> &'static str {
        match self {
            ToolbarItem::Toggle(name) => *name,
            ToolbarItem::Size { .. } => "size",
            ToolbarItem::Align { .. } => "align",
            ToolbarItem::List { .. } => "list",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Toolbar {
    pub container: Vec<Vec<ToolbarItem>>,
}

impl Toolbar {
    pub fn items(&self) -> impl Iterator<Item = &ToolbarItem> {
        self.container.iter().flat_map(|group| group.iter())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Modules {
    pub toolbar: Toolbar,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EditorOptions {
    pub theme: &'static str,
    pub modules: Modules,
    pub formats: Vec<&'static str>,
}

impl EditorOptions {
    /// The post editor layout: size, alignment, inline styles and lists.
    pub fn post_editor() -> Self {
        Self {
            theme: "snow",
            modules: Modules {
                toolbar: Toolbar {
                    container: vec![
                        vec![ToolbarItem::Size {
                            size: vec![
                                SizeChoice::Small,
                                SizeChoice::Normal,
                                SizeChoice::Large,
                                SizeChoice::Huge,
                            ],
                        }],
                        vec![ToolbarItem::Align { align: Vec::new() }],
                        vec![
                            ToolbarItem::Toggle("bold"),
                            ToolbarItem::Toggle("italic"),
                            ToolbarItem::Toggle("underline"),
                            ToolbarItem::Toggle("strike"),
                        ],
                        vec![
                            ToolbarItem::List {
                                list: ListKind::Ordered,
                            },
                            ToolbarItem::List {
                                list: ListKind::Bullet,
                            },
                        ],
                    ],
                },
            },
            formats: ALLOWED_FORMATS.to_vec(),
        }
    }

    pub fn allows(&self, format: &str) -> bool {
        self.formats.iter().any(|f| *f == format)
    }
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self::post_editor()
    }
}
