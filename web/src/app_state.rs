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

use client_api::AuthToken;
use posts::{EditSession, SessionHandle};

/// An [`EditSession`] kept in a signal so the page re-renders as it changes.
#[derive(Clone)]
pub struct SignalSession(RcSignal<EditSession>);

impl SignalSession {
    pub fn new(session: EditSession) -> Self {
        Self(create_rc_signal(session))
    }

    /// A memoized view of part of the session that only notifies on change.
    pub fn select<'a, T, F>(&self, cx: Scope<'a>, f: F) -> &'a ReadSignal<T>
    where
        T: PartialEq + 'a,
        F: Fn(&EditSession) -> T + 'a,
    {
        let signal = self.0.clone();
        create_selector(cx, move || f(signal.get().as_ref()))
    }

    /// Marks the session closed without notifying anyone. Used while the
    /// owning scope is being torn down.
    pub fn close(&self) {
        let mut session = self.0.get_untracked().as_ref().clone();
        session.close();
        self.0.set_silent(session);
    }
}

impl SessionHandle for SignalSession {
    fn update<R, F: FnOnce(&mut EditSession) -> R>(&self, f: F) -> R {
        let mut session = self.0.get_untracked().as_ref().clone();
        let result = f(&mut session);
        self.0.set(session);
        result
    }
}

/// The bearer token pages use for api calls. Provided once at the root.
#[derive(Clone)]
pub struct AuthState(RcSignal<Option<AuthToken>>);

impl AuthState {
    pub fn provide_context(cx: Scope, token: Option<AuthToken>) -> Self {
        let state = Self(create_rc_signal(token));
        provide_context(cx, state.clone());
        state
    }

    pub fn get_from_context(cx: Scope) -> Self {
        use_context::<Self>(cx).clone()
    }

    /// Tracked read, so effects calling this rerun when the token changes.
    pub fn token(&self) -> Option<AuthToken> {
        self.0.get().as_ref().clone()
    }

    pub fn current(&self) -> Option<AuthToken> {
        self.0.get_untracked().as_ref().clone()
    }

    pub fn set(&self, token: Option<AuthToken>) {
        self.0.set(token);
    }
}
