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
//! State and workflow for editing a board post.
//!
//! Nothing in here touches the browser. The web crate supplies a
//! [`PostStore`] over http, a [`Navigator`] over the router and a
//! [`SessionHandle`] over a reactive signal.
pub mod editor;
pub mod session;
pub mod store;

pub use session::{
    load_post, save_post, EditSession, EditablePost, LoadOutcome, LoadTicket, SaveOutcome,
    SaveTicket, SessionHandle, SubmitRejected, LOAD_FAILED, SAVE_FAILED,
};
pub use store::{Error, Navigator, PostStore};

pub use client_api::{AuthToken, PostData};

#[cfg(test)]
mod test;
