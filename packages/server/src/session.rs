//! Per-session reveal state.
//!
//! Each browser gets a `deck_session` cookie holding a random UUID on its
//! first request. The reveal toggle of the commodity chart is stored against
//! that id, so one presenter revealing the illicit market does not change
//! what another viewer sees.
//!
//! Only revealed sessions are stored; hidden is the default for every id.
//! Cookie values that are not a UUID are replaced with a fresh id.

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
use camden_commodity::RevealState;
use serde::Serialize;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "deck_session";

/// Ids of the sessions that have revealed the illicit market.
#[derive(Default)]
pub struct SessionStore {
    revealed: Mutex<BTreeSet<String>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the reveal state of `session`, hidden if never touched.
    #[must_use]
    pub fn reveal_state(&self, session: &str) -> RevealState {
        let revealed = self.revealed.lock().unwrap_or_else(PoisonError::into_inner);
        state_of(revealed.contains(session))
    }

    /// Applies `f` to the reveal state of `session` and returns the result.
    ///
    /// A session whose state ends up hidden is dropped from the store.
    pub fn update(&self, session: &str, f: impl FnOnce(&mut RevealState)) -> RevealState {
        let mut revealed = self.revealed.lock().unwrap_or_else(PoisonError::into_inner);
        let mut state = state_of(revealed.contains(session));
        f(&mut state);

        if state.is_revealed() {
            if !revealed.contains(session) {
                revealed.insert(session.to_string());
            }
        } else {
            revealed.remove(session);
        }

        state
    }

    /// Number of sessions currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.revealed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no session is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const fn state_of(revealed: bool) -> RevealState {
    let mut state = RevealState::new();
    if revealed {
        state.reveal();
    }
    state
}

/// The session a request belongs to.
pub struct Session {
    id: String,
    is_new: bool,
}

impl Session {
    /// Reads the session cookie, minting a fresh id when it is absent or
    /// not a UUID.
    #[must_use]
    pub fn from_request(req: &HttpRequest) -> Self {
        let existing = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| uuid::Uuid::parse_str(cookie.value()).ok());

        match existing {
            Some(id) => Self {
                id: id.to_string(),
                is_new: false,
            },
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                log::debug!("Starting session {id}");
                Self { id, is_new: true }
            }
        }
    }

    /// Session id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Finishes a JSON response, attaching the cookie for new sessions.
    pub fn respond(&self, mut builder: HttpResponseBuilder, body: &impl Serialize) -> HttpResponse {
        if self.is_new {
            builder.cookie(
                Cookie::build(SESSION_COOKIE, self.id.clone())
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .finish(),
            );
        }
        builder.json(body)
    }
}
