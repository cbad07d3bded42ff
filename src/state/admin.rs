//! Admin moderation session.
//!
//! `AdminSession` holds everything the admin page renders. Each load and each
//! mutation draws a ticket from one increasing sequence, which is what lets a
//! late, stale reload be discarded instead of overwriting newer data.
use std::collections::BTreeSet;

use leptos::logging::{error, log, warn};
use sha2::{Digest, Sha256};

use super::Store;
use crate::client::ReviewService;
use crate::error::{ApiError, AuthError};
use crate::models::review::{Review, ReviewStats};

/// Lowercase hex SHA-256 of `code`.
pub fn code_digest(code: &str) -> String {
    hex::encode(Sha256::digest(code.as_bytes()))
}

/// Case-sensitive check of a typed code against a stored digest. The code
/// itself is never kept. A gate without a digest refuses everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminGate {
    digest: Option<String>,
}

impl AdminGate {
    pub fn new(code: &str) -> Self {
        AdminGate {
            digest: Some(code_digest(code)),
        }
    }

    pub fn from_digest(digest: Option<&str>) -> Self {
        let digest = digest.filter(|d| hex::decode(d).is_ok_and(|bytes| bytes.len() == 32));
        if digest.is_none() {
            warn!("[ADMIN] No valid admin code digest configured, sign-in is disabled");
        }
        AdminGate {
            digest: digest.map(str::to_ascii_lowercase),
        }
    }

    pub fn check(&self, input: &str) -> Result<(), AuthError> {
        match &self.digest {
            Some(digest) if *digest == code_digest(input) => Ok(()),
            _ => Err(AuthError::InvalidCode),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPhase {
    LoggedOut,
    Loading,
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Toggle,
    Delete,
}

/// Dismissible inline message shown above the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    LoadFailed(ApiError),
    Applied(MutationKind),
    Failed(MutationKind, ApiError),
    /// The service refused the admin code; the session was closed.
    SessionRejected,
}

/// Identifies one request within one login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
    seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    Stale,
    SignedOut,
}

#[derive(Debug, Clone)]
pub struct AdminSession {
    gate: AdminGate,
    /// Code typed at sign-in; present exactly while signed in.
    admin_code: Option<String>,
    reviews: Vec<Review>,
    login_error: Option<AuthError>,
    notice: Option<Notice>,
    pending_delete: Option<String>,
    epoch: u64,
    next_seq: u64,
    last_mutation: u64,
    last_applied_load: u64,
    loads_in_flight: BTreeSet<u64>,
}

impl AdminSession {
    pub fn new(gate: AdminGate) -> Self {
        AdminSession {
            gate,
            admin_code: None,
            reviews: Vec::new(),
            login_error: None,
            notice: None,
            pending_delete: None,
            epoch: 0,
            next_seq: 0,
            last_mutation: 0,
            last_applied_load: 0,
            loads_in_flight: BTreeSet::new(),
        }
    }

    pub fn phase(&self) -> AdminPhase {
        if !self.is_authenticated() {
            AdminPhase::LoggedOut
        } else if self.loads_in_flight.is_empty() {
            AdminPhase::Loaded
        } else {
            AdminPhase::Loading
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.admin_code.is_some()
    }

    /// What admin requests send as `X-Admin-Code`.
    pub fn admin_code(&self) -> Option<&str> {
        self.admin_code.as_deref()
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn stats(&self) -> ReviewStats {
        ReviewStats::from_reviews(&self.reviews)
    }

    pub fn login_error(&self) -> Option<&AuthError> {
        self.login_error.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    fn next_ticket(&mut self) -> Ticket {
        self.next_seq += 1;
        Ticket {
            epoch: self.epoch,
            seq: self.next_seq,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.is_authenticated() && ticket.epoch == self.epoch
    }

    /// On a matching code, opens the session and returns the ticket for the
    /// initial load. The caller issues exactly that one request.
    pub fn login(&mut self, input: &str) -> Result<Ticket, AuthError> {
        if let Err(err) = self.gate.check(input) {
            self.login_error = Some(err.clone());
            return Err(err);
        }
        self.admin_code = Some(input.to_string());
        self.login_error = None;
        self.begin_reload().ok_or(AuthError::InvalidCode)
    }

    /// Local reset only; anything still in flight is ignored when it lands.
    pub fn sign_out(&mut self) {
        self.admin_code = None;
        self.reviews.clear();
        self.notice = None;
        self.pending_delete = None;
        self.loads_in_flight.clear();
        self.epoch += 1;
    }

    pub fn begin_reload(&mut self) -> Option<Ticket> {
        if !self.is_authenticated() {
            return None;
        }
        let ticket = self.next_ticket();
        self.loads_in_flight.insert(ticket.seq);
        Some(ticket)
    }

    /// Applies a load-all response unless a newer load was already applied or
    /// a mutation was issued after this load started. A failed load keeps the
    /// current list.
    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Review>, ApiError>) -> LoadOutcome {
        if !self.is_current(ticket) {
            return LoadOutcome::Stale;
        }
        self.loads_in_flight.remove(&ticket.seq);
        if ticket.seq < self.last_mutation || ticket.seq < self.last_applied_load {
            return LoadOutcome::Stale;
        }

        match result {
            Ok(reviews) => {
                self.reviews = reviews;
                self.last_applied_load = ticket.seq;
                self.loads_in_flight.retain(|seq| *seq > ticket.seq);
                LoadOutcome::Applied
            }
            Err(ApiError::Unauthorized) => {
                self.reject_session();
                LoadOutcome::SignedOut
            }
            Err(err) => {
                self.notice = Some(Notice::LoadFailed(err));
                LoadOutcome::Failed
            }
        }
    }

    fn reject_session(&mut self) {
        self.sign_out();
        self.notice = Some(Notice::SessionRejected);
    }

    pub fn begin_mutation(&mut self) -> Option<Ticket> {
        if !self.is_authenticated() {
            return None;
        }
        let ticket = self.next_ticket();
        self.last_mutation = ticket.seq;
        Some(ticket)
    }

    /// Records how the mutation went and starts the reload that follows every
    /// mutation, successful or not.
    pub fn finish_mutation(
        &mut self,
        ticket: Ticket,
        kind: MutationKind,
        result: Result<(), ApiError>,
    ) -> Option<Ticket> {
        if !self.is_current(ticket) {
            return None;
        }
        let notice = match result {
            Ok(()) => Notice::Applied(kind),
            Err(ApiError::Unauthorized) => {
                self.reject_session();
                return None;
            }
            Err(err) => Notice::Failed(kind, err),
        };
        self.notice = Some(notice);
        self.begin_reload()
    }

    pub fn request_delete(&mut self, review_id: impl Into<String>) {
        if self.is_authenticated() {
            self.pending_delete = Some(review_id.into());
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Takes the confirmed id together with the ticket for deleting it.
    pub fn confirm_delete(&mut self) -> Option<(String, Ticket)> {
        let review_id = self.pending_delete.take()?;
        let ticket = self.begin_mutation()?;
        Some((review_id, ticket))
    }
}

/// Pairs a ticket with the code the session signed in with.
fn with_code(session: &AdminSession, ticket: Option<Ticket>) -> Option<(Ticket, String)> {
    Some((ticket?, session.admin_code()?.to_string()))
}

/// Completes a load the session already started.
pub async fn load<S, C>(service: &S, store: &C, ticket: Ticket, admin_code: &str)
where
    S: ReviewService,
    C: Store<AdminSession>,
{
    let result = service.list_all(admin_code).await;
    match &result {
        Ok(reviews) => log!("[ADMIN] Loaded {} reviews", reviews.len()),
        Err(err) => error!("[ADMIN] Error loading reviews: {}", err),
    }
    store.update_with(|session| session.finish_load(ticket, result));
}

/// Checks the code and, when it matches, performs the initial load with it.
pub async fn login<S, C>(service: &S, store: &C, input: &str) -> Result<(), AuthError>
where
    S: ReviewService,
    C: Store<AdminSession>,
{
    let Some(ticket) = store.update_with(|session| session.login(input)) else {
        return Ok(());
    };
    load(service, store, ticket?, input).await;
    Ok(())
}

pub async fn refresh<S, C>(service: &S, store: &C)
where
    S: ReviewService,
    C: Store<AdminSession>,
{
    let started = store.update_with(|session| {
        let ticket = session.begin_reload();
        with_code(session, ticket)
    });
    if let Some((ticket, code)) = started.flatten() {
        load(service, store, ticket, &code).await;
    }
}

pub async fn toggle_visibility<S, C>(service: &S, store: &C, review_id: &str)
where
    S: ReviewService,
    C: Store<AdminSession>,
{
    let started = store.update_with(|session| {
        let ticket = session.begin_mutation();
        with_code(session, ticket)
    });
    let Some((ticket, code)) = started.flatten() else {
        return;
    };
    let result = service.toggle_visibility(&code, review_id).await;
    if let Err(err) = &result {
        error!("[ADMIN] Error toggling visibility of {}: {}", review_id, err);
    }
    finish_mutation(service, store, ticket, &code, MutationKind::Toggle, result).await;
}

/// Deletes the review awaiting confirmation, if any.
pub async fn confirm_delete<S, C>(service: &S, store: &C)
where
    S: ReviewService,
    C: Store<AdminSession>,
{
    let started = store.update_with(|session| {
        let (review_id, ticket) = session.confirm_delete()?;
        let (ticket, code) = with_code(session, Some(ticket))?;
        Some((review_id, ticket, code))
    });
    let Some((review_id, ticket, code)) = started.flatten() else {
        return;
    };
    let result = service.delete(&code, &review_id).await;
    if let Err(err) = &result {
        error!("[ADMIN] Error deleting review {}: {}", review_id, err);
    }
    finish_mutation(service, store, ticket, &code, MutationKind::Delete, result).await;
}

async fn finish_mutation<S, C>(
    service: &S,
    store: &C,
    ticket: Ticket,
    admin_code: &str,
    kind: MutationKind,
    result: Result<(), ApiError>,
) where
    S: ReviewService,
    C: Store<AdminSession>,
{
    let reload = store
        .update_with(|session| session.finish_mutation(ticket, kind, result))
        .flatten();
    if let Some(reload) = reload {
        load(service, store, reload, admin_code).await;
    }
}
