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

use async_trait::async_trait;
use futures::executor::block_on;

use crate::editor::*;
use crate::*;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Fetch {
        id: String,
        auth: Option<String>,
    },
    Update {
        id: String,
        body: serde_json::Value,
        auth: Option<String>,
    },
}

struct MockStore {
    fetch_result: Result<PostData, Error>,
    update_result: Result<String, Error>,
    calls: RefCell<Vec<Call>>,
}

impl MockStore {
    fn new() -> Self {
        Self {
            fetch_result: Ok(PostData::new("T", "<p>C</p>")),
            update_result: Ok(r#"{"ok":true}"#.to_owned()),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn failing_fetch(mut self) -> Self {
        self.fetch_result = Err("Status: 500".into());
        self
    }

    fn failing_update(mut self) -> Self {
        self.update_result = Err("Status: 403".into());
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PostStore for MockStore {
    async fn fetch_post(&self, id: &str, token: Option<&AuthToken>) -> Result<PostData, Error> {
        self.calls.borrow_mut().push(Call::Fetch {
            id: id.to_owned(),
            auth: token.map(|t| t.bearer()),
        });
        self.fetch_result.clone()
    }

    async fn update_post(
        &self,
        id: &str,
        post: &PostData,
        token: Option<&AuthToken>,
    ) -> Result<String, Error> {
        self.calls.borrow_mut().push(Call::Update {
            id: id.to_owned(),
            body: serde_json::to_value(post)?,
            auth: token.map(|t| t.bearer()),
        });
        self.update_result.clone()
    }
}

#[derive(Default)]
struct MockNavigator(RefCell<Vec<String>>);

impl Navigator for MockNavigator {
    fn navigate_to(&self, path: &str) -> Result<(), Error> {
        self.0.borrow_mut().push(path.to_owned());
        Ok(())
    }
}

/// Closes the session while its request is outstanding, the way an
/// unmount would.
struct UnmountingStore<'a> {
    session: &'a RefCell<EditSession>,
}

#[async_trait(?Send)]
impl<'a> PostStore for UnmountingStore<'a> {
    async fn fetch_post(&self, _id: &str, _token: Option<&AuthToken>) -> Result<PostData, Error> {
        self.session.borrow_mut().close();
        Ok(PostData::new("late", "late"))
    }

    async fn update_post(
        &self,
        _id: &str,
        _post: &PostData,
        _token: Option<&AuthToken>,
    ) -> Result<String, Error> {
        self.session.borrow_mut().close();
        Ok(String::new())
    }
}

fn session(id: Option<&str>) -> RefCell<EditSession> {
    RefCell::new(EditSession::new(
        id.map(str::to_owned),
        Some(AuthToken::new("tok")),
    ))
}

#[test]
fn test_load_populates_title_and_content() {
    let store = MockStore::new();
    let handle = session(Some("42"));
    assert_eq!(block_on(load_post(&handle, &store)), LoadOutcome::Loaded);
    let s = handle.borrow();
    assert_eq!(s.title(), "T");
    assert_eq!(s.content(), "<p>C</p>");
    assert_eq!(s.error(), None);
    assert_eq!(
        store.calls(),
        vec![Call::Fetch {
            id: "42".to_owned(),
            auth: Some("Bearer tok".to_owned()),
        }]
    );
}

#[test]
fn test_failed_load_shows_message_and_keeps_fields_empty() {
    let store = MockStore::new().failing_fetch();
    let handle = session(Some("42"));
    assert_eq!(block_on(load_post(&handle, &store)), LoadOutcome::Failed);
    let s = handle.borrow();
    assert_eq!(s.error(), Some("Failed to fetch post"));
    assert_eq!(s.title(), "");
    assert_eq!(s.content(), "");
}

#[test]
fn test_no_request_without_an_id() {
    let store = MockStore::new();
    for id in [None, Some("")] {
        let handle = session(id);
        assert_eq!(block_on(load_post(&handle, &store)), LoadOutcome::Skipped);
        let nav = MockNavigator::default();
        assert_eq!(
            block_on(save_post(&handle, &store, &nav)),
            SaveOutcome::Rejected(SubmitRejected::MissingId)
        );
    }
    assert!(store.calls().is_empty());
}

#[test]
fn test_save_sends_post_and_navigates_once() {
    let store = MockStore::new();
    let nav = MockNavigator::default();
    let handle = session(Some("42"));
    block_on(load_post(&handle, &store));
    handle.update(|s| {
        s.set_title("New title");
        s.set_content("<p><strong>bold</strong></p>");
    });
    let outcome = block_on(save_post(&handle, &store, &nav));
    assert_eq!(
        outcome,
        SaveOutcome::Saved {
            path: "/posts/42".to_owned()
        }
    );
    assert_eq!(*nav.0.borrow(), vec!["/posts/42".to_owned()]);
    assert_eq!(
        store.calls()[1],
        Call::Update {
            id: "42".to_owned(),
            body: serde_json::json!({
                "title": "New title",
                "content": "<p><strong>bold</strong></p>",
            }),
            auth: Some("Bearer tok".to_owned()),
        }
    );
    assert!(!handle.borrow().is_saving());
}

#[test]
fn test_failed_save_keeps_data_and_stays() {
    let store = MockStore::new().failing_update();
    let nav = MockNavigator::default();
    let handle = session(Some("42"));
    handle.update(|s| {
        s.set_title("Draft");
        s.set_content("<p>unsaved work</p>");
    });
    assert_eq!(block_on(save_post(&handle, &store, &nav)), SaveOutcome::Failed);
    assert!(nav.0.borrow().is_empty());
    let s = handle.borrow();
    assert_eq!(s.error(), Some("게시글 수정 실패"));
    assert_eq!(s.title(), "Draft");
    assert_eq!(s.content(), "<p>unsaved work</p>");
    assert!(!s.is_saving());
}

#[test]
fn test_empty_title_is_not_submitted() {
    let store = MockStore::new();
    let nav = MockNavigator::default();
    let handle = session(Some("42"));
    handle.update(|s| s.set_content("<p>body only</p>"));
    assert_eq!(
        block_on(save_post(&handle, &store, &nav)),
        SaveOutcome::Rejected(SubmitRejected::EmptyTitle)
    );
    assert!(store.calls().is_empty());
    assert!(!handle.borrow().is_saving());
}

#[test]
fn test_second_submit_while_saving_is_rejected() {
    let store = MockStore::new();
    let nav = MockNavigator::default();
    let handle = session(Some("42"));
    handle.update(|s| s.set_title("T"));
    let first = handle.update(|s| s.begin_save()).unwrap();
    assert!(handle.borrow().is_saving());
    assert_eq!(
        block_on(save_post(&handle, &store, &nav)),
        SaveOutcome::Rejected(SubmitRejected::InFlight)
    );
    assert!(store.calls().is_empty());
    let outcome = handle.update(|s| s.finish_save(first, Ok(String::new())));
    assert_eq!(
        outcome,
        SaveOutcome::Saved {
            path: "/posts/42".to_owned()
        }
    );
    assert!(!handle.borrow().is_saving());
}

#[test]
fn test_success_clears_previous_error() {
    let handle = session(Some("42"));
    let failing = MockStore::new().failing_fetch();
    block_on(load_post(&handle, &failing));
    assert_eq!(handle.borrow().error(), Some(LOAD_FAILED));
    block_on(load_post(&handle, &MockStore::new()));
    assert_eq!(handle.borrow().error(), None);

    let nav = MockNavigator::default();
    block_on(save_post(&handle, &MockStore::new().failing_update(), &nav));
    assert_eq!(handle.borrow().error(), Some(SAVE_FAILED));
    block_on(save_post(&handle, &MockStore::new(), &nav));
    assert_eq!(handle.borrow().error(), None);
    assert_eq!(nav.0.borrow().len(), 1);
}

#[test]
fn test_results_after_close_are_discarded() {
    let handle = session(Some("42"));
    let store = UnmountingStore { session: &handle };
    assert_eq!(block_on(load_post(&handle, &store)), LoadOutcome::Discarded);
    assert_eq!(handle.borrow().title(), "");
    assert!(handle.borrow().is_closed());

    let handle = session(Some("42"));
    handle.update(|s| s.set_title("T"));
    let store = UnmountingStore { session: &handle };
    let nav = MockNavigator::default();
    assert_eq!(
        block_on(save_post(&handle, &store, &nav)),
        SaveOutcome::Discarded
    );
    assert!(nav.0.borrow().is_empty());
    assert_eq!(
        handle.update(|s| s.begin_save()),
        Err(SubmitRejected::Closed)
    );
    assert_eq!(handle.update(|s| s.begin_load()), None);
}

#[test]
fn test_token_change_reloads_and_drops_stale_result() {
    let store = MockStore::new();
    let handle = session(Some("42"));
    let stale = handle.update(|s| s.begin_load()).unwrap();
    assert!(handle.update(|s| s.set_token(Some(AuthToken::new("fresh")))));
    assert!(!handle.update(|s| s.set_token(Some(AuthToken::new("fresh")))));
    assert_eq!(block_on(load_post(&handle, &store)), LoadOutcome::Loaded);
    assert_eq!(
        store.calls(),
        vec![Call::Fetch {
            id: "42".to_owned(),
            auth: Some("Bearer fresh".to_owned()),
        }]
    );
    let outcome = handle.update(|s| s.finish_load(stale, Ok(PostData::new("old", "old"))));
    assert_eq!(outcome, LoadOutcome::Discarded);
    assert_eq!(handle.borrow().title(), "T");
}

#[test]
fn test_missing_token_sends_no_authorization() {
    let store = MockStore::new();
    let handle = RefCell::new(EditSession::new(Some("1".to_owned()), None));
    block_on(load_post(&handle, &store));
    assert_eq!(
        store.calls(),
        vec![Call::Fetch {
            id: "1".to_owned(),
            auth: None,
        }]
    );
}

#[test]
fn test_editor_options_shape() {
    let options = serde_json::to_value(EditorOptions::post_editor()).unwrap();
    assert_eq!(options["theme"], "snow");
    assert_eq!(
        options["modules"]["toolbar"]["container"],
        serde_json::json!([
            [{"size": ["small", false, "large", "huge"]}],
            [{"align": []}],
            ["bold", "italic", "underline", "strike"],
            [{"list": "ordered"}, {"list": "bullet"}],
        ])
    );
    assert_eq!(options["formats"].as_array().unwrap().len(), 13);
}

#[test]
fn test_toolbar_only_exposes_allowed_formats() {
    let options = EditorOptions::post_editor();
    for item in options.modules.toolbar.items() {
        assert!(options.allows(item.format()), "{} is not allowed", item.format());
    }
    assert!(!options.allows("image"));
    assert!(!options.allows("code-block"));
}

#[test]
fn test_request_load_only_on_first_sight_and_token_change() {
    let store = MockStore::new();
    let handle = session(Some("42"));
    let mut loads = 0;
    // The page rechecks the token every time the token signal fires, even
    // when another tab rewrites the same value.
    for token in ["tok", "tok", "tok", "fresh", "fresh"] {
        if handle.update(|s| s.request_load(Some(AuthToken::new(token)))) {
            loads += 1;
            assert_eq!(block_on(load_post(&handle, &store)), LoadOutcome::Loaded);
        }
    }
    assert_eq!(loads, 2);
    assert_eq!(
        store.calls(),
        vec![
            Call::Fetch {
                id: "42".to_owned(),
                auth: Some("Bearer tok".to_owned()),
            },
            Call::Fetch {
                id: "42".to_owned(),
                auth: Some("Bearer fresh".to_owned()),
            },
        ]
    );
    assert!(handle.update(|s| s.request_load(None)));
    assert!(!handle.update(|s| s.request_load(None)));
}
