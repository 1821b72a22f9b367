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
use std::fmt;

use tracing::{debug, error, info, instrument, warn};

use client_api::{post_detail_path, AuthToken, PostData};

use crate::store::{Error, Navigator, PostStore};

pub const LOAD_FAILED: &'static str = "Failed to fetch post";
pub const SAVE_FAILED: &'static str = "게시글 수정 실패";

/// The post as the edit page holds it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditablePost {
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub error: Option<String>,
}

impl EditablePost {
    /// An empty id is the same as no id at all.
    pub fn new(id: Option<String>) -> Self {
        Self {
            id: id.filter(|id| !id.is_empty()),
            ..Self::default()
        }
    }

    pub fn to_post_data(&self) -> PostData {
        PostData::new(self.title.clone(), self.content.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    id: String,
    token: Option<AuthToken>,
    generation: u64,
}

impl LoadTicket {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveTicket {
    id: String,
    token: Option<AuthToken>,
    post: PostData,
}

impl SaveTicket {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn post(&self) -> &PostData {
        &self.post
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    MissingId,
    EmptyTitle,
    InFlight,
    Closed,
}

impl fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SubmitRejected::MissingId => "no post id to save to",
            SubmitRejected::EmptyTitle => "title is required",
            SubmitRejected::InFlight => "a save is already in progress",
            SubmitRejected::Closed => "the editor is closed",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// There was no id to load.
    Skipped,
    Loaded,
    Failed,
    /// The result arrived for a superseded load or a closed session.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Rejected(SubmitRejected),
    Saved { path: String },
    Failed,
    Discarded,
}

/// Edit page state plus the bookkeeping that keeps async results honest.
#[derive(Debug, Clone)]
pub struct EditSession {
    post: EditablePost,
    token: Option<AuthToken>,
    load_generation: u64,
    load_requested: bool,
    saving: bool,
    closed: bool,
}

impl EditSession {
    pub fn new(id: Option<String>, token: Option<AuthToken>) -> Self {
        Self {
            post: EditablePost::new(id),
            token,
            load_generation: 0,
            load_requested: false,
            saving: false,
            closed: false,
        }
    }

    pub fn post(&self) -> &EditablePost {
        &self.post
    }

    pub fn id(&self) -> Option<&str> {
        self.post.id.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.post.title
    }

    pub fn content(&self) -> &str {
        &self.post.content
    }

    pub fn error(&self) -> Option<&str> {
        self.post.error.as_deref()
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.post.title = title.into();
    }

    pub fn set_content<S: Into<String>>(&mut self, content: S) {
        self.post.content = content.into();
    }

    /// Returns true if the token actually changed.
    pub fn set_token(&mut self, token: Option<AuthToken>) -> bool {
        if self.token == token {
            return false;
        }
        self.token = token;
        true
    }

    /// Called whenever the page sees the current token. Returns true when a
    /// load should be started: the first time, and after the token changed.
    pub fn request_load(&mut self, token: Option<AuthToken>) -> bool {
        let changed = self.set_token(token);
        if self.load_requested && !changed {
            return false;
        }
        self.load_requested = true;
        true
    }

    /// Results for anything still in flight are dropped after this.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.closed {
            return None;
        }
        let id = self.post.id.clone()?;
        self.load_generation += 1;
        Some(LoadTicket {
            id,
            token: self.token.clone(),
            generation: self.load_generation,
        })
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<PostData, Error>) -> LoadOutcome {
        if self.closed || ticket.generation != self.load_generation {
            return LoadOutcome::Discarded;
        }
        match result {
            Ok(PostData { title, content }) => {
                self.post.title = title;
                self.post.content = content;
                self.post.error = None;
                LoadOutcome::Loaded
            }
            Err(_) => {
                self.post.error = Some(LOAD_FAILED.to_owned());
                LoadOutcome::Failed
            }
        }
    }

    pub fn begin_save(&mut self) -> Result<SaveTicket, SubmitRejected> {
        if self.closed {
            return Err(SubmitRejected::Closed);
        }
        if self.saving {
            return Err(SubmitRejected::InFlight);
        }
        let id = self.post.id.clone().ok_or(SubmitRejected::MissingId)?;
        if self.post.title.is_empty() {
            return Err(SubmitRejected::EmptyTitle);
        }
        self.saving = true;
        Ok(SaveTicket {
            id,
            token: self.token.clone(),
            post: self.post.to_post_data(),
        })
    }

    pub fn finish_save(&mut self, ticket: SaveTicket, result: Result<String, Error>) -> SaveOutcome {
        self.saving = false;
        if self.closed {
            return SaveOutcome::Discarded;
        }
        match result {
            Ok(_) => {
                self.post.error = None;
                SaveOutcome::Saved {
                    path: post_detail_path(&ticket.id),
                }
            }
            Err(_) => {
                self.post.error = Some(SAVE_FAILED.to_owned());
                SaveOutcome::Failed
            }
        }
    }
}

/// Somewhere an [`EditSession`] lives that can be mutated in place.
pub trait SessionHandle {
    fn update<R, F: FnOnce(&mut EditSession) -> R>(&self, f: F) -> R;
}

impl SessionHandle for RefCell<EditSession> {
    fn update<R, F: FnOnce(&mut EditSession) -> R>(&self, f: F) -> R {
        f(&mut self.borrow_mut())
    }
}

#[instrument(skip_all)]
pub async fn load_post<H, S>(handle: &H, store: &S) -> LoadOutcome
where
    H: SessionHandle + ?Sized,
    S: PostStore + ?Sized,
{
    let ticket = match handle.update(|s| s.begin_load()) {
        Some(ticket) => ticket,
        None => {
            debug!("No post id so there is nothing to load");
            return LoadOutcome::Skipped;
        }
    };
    debug!(id = ticket.id(), "Fetching post");
    let result = store.fetch_post(ticket.id(), ticket.token()).await;
    if let Err(err) = &result {
        error!(?err, "Failed to fetch post");
    }
    let outcome = handle.update(move |s| s.finish_load(ticket, result));
    debug!(?outcome, "Post load finished");
    outcome
}

#[instrument(skip_all)]
pub async fn save_post<H, S, N>(handle: &H, store: &S, navigator: &N) -> SaveOutcome
where
    H: SessionHandle + ?Sized,
    S: PostStore + ?Sized,
    N: Navigator + ?Sized,
{
    let ticket = match handle.update(|s| s.begin_save()) {
        Ok(ticket) => ticket,
        Err(reason) => {
            warn!(%reason, "Not submitting post");
            return SaveOutcome::Rejected(reason);
        }
    };
    let result = store
        .update_post(ticket.id(), ticket.post(), ticket.token())
        .await;
    match &result {
        Ok(body) => info!(body = body.as_str(), "게시글 수정 성공"),
        Err(err) => error!(?err, "게시글 수정 실패"),
    }
    let outcome = handle.update(move |s| s.finish_save(ticket, result));
    if let SaveOutcome::Saved { path } = &outcome {
        if let Err(err) = navigator.navigate_to(path) {
            error!(?err, path = path.as_str(), "Unable to navigate to post");
        }
    }
    outcome
}
