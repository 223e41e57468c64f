use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use skirmish_core::{ReactionCause, ReactionOutcome, ReactionRequest};
use tokio::sync::oneshot;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use super::ArbiterError;

/// Observable lifecycle of an arbiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArbiterPhase {
    /// Never armed.
    Idle,
    /// A window is open and unresolved.
    Armed,
    /// The most recent window ended with this cause.
    Resolved(ReactionCause),
}

/// Single-window reaction arbiter for one defender.
///
/// Cloning is cheap and every clone drives the same arbiter: the turn
/// orchestrator arms and awaits it while the input surface submits tokens.
///
/// Resolution is decided by a single atomic set on the window's outcome slot.
/// Whichever of the countdown, a submission or [`cancel`](Self::cancel) gets
/// there first wins; the rest become no-ops.
#[derive(Clone, Default)]
pub struct ReactionArbiter {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    window: Mutex<Option<Arc<Window>>>,
    next_id: AtomicU64,
}

struct Window {
    id: u64,
    request: ReactionRequest,
    armed_at: Instant,
    outcome: OnceLock<ReactionOutcome>,
    sender: Mutex<Option<oneshot::Sender<ReactionOutcome>>>,
}

impl Window {
    fn is_resolved(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Returns true if this call decided the outcome.
    fn resolve(&self, cause: ReactionCause) -> bool {
        let outcome = ReactionOutcome::new(cause, self.armed_at.elapsed());
        if self.outcome.set(outcome).is_err() {
            return false;
        }

        if let Some(sender) = lock(&self.sender).take() {
            // The handle may already be gone; the outcome stays readable via the slot.
            let _ = sender.send(outcome);
        }
        true
    }
}

impl ReactionArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a reaction window and starts its countdown.
    ///
    /// Must be called from within a tokio runtime. Fails with
    /// [`ArbiterError::AlreadyArmed`] while a previous window is unresolved.
    pub fn arm(&self, request: ReactionRequest) -> Result<ReactionHandle, ArbiterError> {
        if !request.is_valid() {
            return Err(ArbiterError::InvalidRequest {
                token: request.expected_token().to_owned(),
                duration: request.duration(),
            });
        }

        let mut slot = lock(&self.inner.window);
        if let Some(current) = slot.as_ref()
            && !current.is_resolved()
        {
            return Err(ArbiterError::AlreadyArmed {
                expected: current.request.expected_token().to_owned(),
            });
        }

        let (sender, receiver) = oneshot::channel();
        let armed_at = Instant::now();
        let deadline = armed_at + request.duration();
        let window = Arc::new(Window {
            id: self.inner.next_id.fetch_add(1, Ordering::Relaxed),
            request,
            armed_at,
            outcome: OnceLock::new(),
            sender: Mutex::new(Some(sender)),
        });

        let timer = tokio::spawn({
            let window = Arc::clone(&window);
            async move {
                tokio::time::sleep_until(deadline).await;
                if window.resolve(ReactionCause::Timeout) {
                    info!(
                        target: "runtime::reaction",
                        window = window.id,
                        expected = window.request.expected_token(),
                        "Reaction window timed out"
                    );
                }
            }
        });

        debug!(
            target: "runtime::reaction",
            window = window.id,
            expected = window.request.expected_token(),
            duration = ?window.request.duration(),
            "Reaction window armed"
        );

        *slot = Some(Arc::clone(&window));
        Ok(ReactionHandle {
            window,
            receiver,
            timer: timer.abort_handle(),
        })
    }

    /// Submits typed text against the open window.
    ///
    /// The text is trimmed and lowercased. A match resolves the window as
    /// [`ReactionCause::Match`]; anything else closes it immediately as
    /// [`ReactionCause::Typo`]. Returns the cause this submission decided, or
    /// [`ArbiterError::NotArmed`] if no window was open or another trigger
    /// resolved it first.
    pub fn submit_token(&self, text: &str) -> Result<ReactionCause, ArbiterError> {
        let window = self.open_window().ok_or(ArbiterError::NotArmed)?;

        let cause = if window.request.matches(text) {
            ReactionCause::Match
        } else {
            ReactionCause::Typo
        };

        if !window.resolve(cause) {
            return Err(ArbiterError::NotArmed);
        }

        info!(
            target: "runtime::reaction",
            window = window.id,
            expected = window.request.expected_token(),
            submitted = text.trim(),
            %cause,
            "Reaction resolved by submission"
        );
        Ok(cause)
    }

    /// Force-resolves the open window as [`ReactionCause::Cancelled`].
    ///
    /// Returns false if there was nothing to cancel.
    pub fn cancel(&self) -> bool {
        let Some(window) = self.open_window() else {
            return false;
        };

        let cancelled = window.resolve(ReactionCause::Cancelled);
        if cancelled {
            info!(
                target: "runtime::reaction",
                window = window.id,
                "Reaction window cancelled"
            );
        }
        cancelled
    }

    pub fn is_armed(&self) -> bool {
        self.open_window().is_some()
    }

    pub fn phase(&self) -> ArbiterPhase {
        match lock(&self.inner.window).as_ref() {
            None => ArbiterPhase::Idle,
            Some(window) => match window.outcome.get() {
                None => ArbiterPhase::Armed,
                Some(outcome) => ArbiterPhase::Resolved(outcome.cause),
            },
        }
    }

    /// Token the open window expects, if any.
    pub fn expected_token(&self) -> Option<String> {
        self.open_window()
            .map(|window| window.request.expected_token().to_owned())
    }

    fn open_window(&self) -> Option<Arc<Window>> {
        lock(&self.inner.window)
            .as_ref()
            .filter(|window| !window.is_resolved())
            .cloned()
    }
}

impl fmt::Debug for ReactionArbiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionArbiter")
            .field("phase", &self.phase())
            .finish()
    }
}

/// Caller's side of one armed window.
///
/// Dropping an unresolved handle cancels the window, so an aborted turn never
/// leaves the arbiter armed.
#[must_use = "dropping the handle cancels the reaction window"]
pub struct ReactionHandle {
    window: Arc<Window>,
    receiver: oneshot::Receiver<ReactionOutcome>,
    timer: AbortHandle,
}

impl ReactionHandle {
    pub fn request(&self) -> &ReactionRequest {
        &self.window.request
    }

    /// Waits for the window to resolve.
    ///
    /// Cancel-safe: if this future is dropped early, calling it again keeps
    /// waiting on the same window.
    pub async fn outcome(&mut self) -> ReactionOutcome {
        if let Some(outcome) = self.window.outcome.get() {
            self.timer.abort();
            return *outcome;
        }

        let outcome = match (&mut self.receiver).await {
            Ok(outcome) => outcome,
            Err(_) => self.fallback_outcome(),
        };
        self.timer.abort();
        outcome
    }

    fn fallback_outcome(&self) -> ReactionOutcome {
        self.window.resolve(ReactionCause::Cancelled);
        self.window
            .outcome
            .get()
            .copied()
            .unwrap_or_else(|| ReactionOutcome::new(ReactionCause::Cancelled, Default::default()))
    }
}

impl Drop for ReactionHandle {
    fn drop(&mut self) {
        if self.window.resolve(ReactionCause::Cancelled) {
            debug!(
                target: "runtime::reaction",
                window = self.window.id,
                "Reaction handle dropped before resolution"
            );
        }
        self.timer.abort();
    }
}

impl fmt::Debug for ReactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionHandle")
            .field("window", &self.window.id)
            .field("request", &self.window.request)
            .field("outcome", &self.window.outcome.get())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
