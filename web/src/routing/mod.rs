// Copyright 2022 zaphar
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
use sycamore_router::{navigate, HistoryIntegration, Route, Router};
use tracing::{debug, instrument};

use posts::{Error, Navigator};

use crate::pages::*;

#[instrument]
fn route_switch<'a, G: Html>(cx: Scope<'a>, route: &'a ReadSignal<Routes>) -> View<G> {
    // The match has to stay inside a dynamic node so the page is rebuilt
    // whenever the route signal changes.
    view! {cx,
        (match route.get().as_ref() {
            Routes::Edit(id) => view! {cx,
                EditPostPage(id=Some(id.clone()))
            },
            Routes::EditWithoutId => view! {cx,
                EditPostPage(id=None)
            },
            Routes::Post(id) => view! {cx,
                PostPage(id=id.clone())
            },
            Routes::NotFound => view! {cx,
                p(class="not-found") { "Not Found" }
            },
        })
    }
}

#[derive(Route, Debug)]
pub enum Routes {
    #[to("/edit/<id>")]
    Edit(String),
    #[to("/edit")]
    EditWithoutId,
    #[to("/posts/<id>")]
    Post(String),
    #[not_found]
    NotFound,
}

#[component]
pub fn Handler<G: Html>(cx: Scope) -> View<G> {
    view! {cx,
        Router(
            integration=HistoryIntegration::new(),
            view=route_switch,
        )
    }
}

/// Client side navigation through the history router.
pub struct RouterNavigator;

impl Navigator for RouterNavigator {
    fn navigate_to(&self, path: &str) -> Result<(), Error> {
        debug!(path, "navigating");
        navigate(path);
        Ok(())
    }
}
