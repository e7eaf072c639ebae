//! Round state machine
//!
//! ```text
//! Idle ──start──▶ Loading ──ok──▶ AwaitingGuess ──guess──▶ Resolved
//!                   ▲  │                                      │
//!                   │  └──err──▶ Failed                       │
//!                   └──────────── reload timer (900 ms) ◀─────┘
//! ```
//!
//! Only `AwaitingGuess` accepts a guess. Every other phase drops it, which
//! covers double submission during the feedback delay and clicks that land
//! while an image is loading. `Failed` is sticky: there is no retry.

use aivr_common::{ImageRecord, Label};
use tokio::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::GameError;
use crate::score::ScoreTracker;
use crate::source::ImageSource;
use crate::timer::ReloadTimer;

/// Time feedback stays visible before the next round loads
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(900);

/// Shown when the provider cannot be prepared
pub const START_FAILED_MESSAGE: &str = "Could not start game. Check image-manifest.json.";

/// Shown when a round's image cannot be loaded
pub const LOAD_FAILED_MESSAGE: &str = "Could not load image. Refresh and try again.";

/// Outcome of one accepted guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn judge(guess: Label, truth: Label) -> Self {
        if guess == truth {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }

    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Correct => "Correct",
            Verdict::Incorrect => "Incorrect",
        }
    }
}

/// Visual style of the feedback line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackStyle {
    Correct,
    Incorrect,
}

/// Feedback line under the image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub style: FeedbackStyle,
}

impl Feedback {
    fn verdict(verdict: Verdict) -> Self {
        let style = match verdict {
            Verdict::Correct => FeedbackStyle::Correct,
            Verdict::Incorrect => FeedbackStyle::Incorrect,
        };
        Self {
            text: verdict.as_str().to_string(),
            style,
        }
    }

    fn error(message: &str) -> Self {
        Self {
            text: message.to_string(),
            style: FeedbackStyle::Incorrect,
        }
    }
}

/// Where the current round is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    Loading,
    AwaitingGuess { image: ImageRecord },
    Resolved { image: ImageRecord, verdict: Verdict },
    Failed { message: String },
}

impl RoundPhase {
    pub fn name(&self) -> &'static str {
        match self {
            RoundPhase::Idle => "idle",
            RoundPhase::Loading => "loading",
            RoundPhase::AwaitingGuess { .. } => "awaiting_guess",
            RoundPhase::Resolved { .. } => "resolved",
            RoundPhase::Failed { .. } => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RoundPhase::Loading)
    }

    pub fn current_image(&self) -> Option<&ImageRecord> {
        match self {
            RoundPhase::AwaitingGuess { image } | RoundPhase::Resolved { image, .. } => Some(image),
            _ => None,
        }
    }

    pub fn accepts_guess(&self) -> bool {
        matches!(self, RoundPhase::AwaitingGuess { .. })
    }
}

/// Snapshot of everything a front end renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundView {
    pub phase: &'static str,
    pub image_url: Option<String>,
    pub feedback: Option<Feedback>,
    pub score: String,
    pub controls_enabled: bool,
    pub error: Option<String>,
}

/// Owns the round lifecycle and the session score
pub struct RoundController<S> {
    source: S,
    phase: RoundPhase,
    score: ScoreTracker,
    feedback: Option<Feedback>,
    reload: Option<ReloadTimer>,
    feedback_delay: Duration,
    started: bool,
    rounds_loaded: u64,
}

impl<S: ImageSource> RoundController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            phase: RoundPhase::Idle,
            score: ScoreTracker::new(),
            feedback: None,
            reload: None,
            feedback_delay: FEEDBACK_DELAY,
            started: false,
            rounds_loaded: 0,
        }
    }

    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn pending_reload(&self) -> Option<&ReloadTimer> {
        self.reload.as_ref()
    }

    pub fn rounds_loaded(&self) -> u64 {
        self.rounds_loaded
    }

    pub fn controls_enabled(&self) -> bool {
        self.phase.accepts_guess()
    }

    /// Disable input while a fetch is in flight (idempotent)
    pub fn enter_loading(&mut self) {
        if matches!(self.phase, RoundPhase::Failed { .. }) {
            return;
        }
        if !self.phase.is_loading() {
            debug!("Round phase {} -> loading", self.phase.name());
        }
        self.phase = RoundPhase::Loading;
    }

    fn fail(&mut self, message: &str, error: &GameError) {
        warn!("{} ({})", message, error);
        self.reload = None;
        self.feedback = Some(Feedback::error(message));
        self.phase = RoundPhase::Failed {
            message: message.to_string(),
        };
    }

    /// Prepare the provider and load the first round
    ///
    /// Runs once; later calls leave the state alone.
    pub async fn start(&mut self) -> &RoundPhase {
        if self.started {
            return &self.phase;
        }
        self.started = true;
        self.enter_loading();

        info!("Starting game with {}", self.source.describe());
        if let Err(e) = self.source.prepare().await {
            self.fail(START_FAILED_MESSAGE, &e);
            return &self.phase;
        }

        self.load_next().await
    }

    /// Fetch the next image; `AwaitingGuess` on success, `Failed` otherwise
    pub async fn load_next(&mut self) -> &RoundPhase {
        if matches!(self.phase, RoundPhase::Failed { .. }) {
            return &self.phase;
        }
        self.enter_loading();

        match self.source.select_next().await {
            Ok(image) => {
                debug!(url = %image.url, "Round loaded");
                self.rounds_loaded += 1;
                self.feedback = None;
                self.phase = RoundPhase::AwaitingGuess { image };
            }
            Err(e) => self.fail(LOAD_FAILED_MESSAGE, &e),
        }
        &self.phase
    }

    /// Score a guess and arm the reload timer
    ///
    /// Returns `None` (and changes nothing) unless a round is awaiting a guess.
    pub fn guess(&mut self, label: Label, now: Instant) -> Option<Verdict> {
        let image = match &self.phase {
            RoundPhase::AwaitingGuess { image } => image.clone(),
            other => {
                debug!(%label, phase = other.name(), "Guess ignored");
                return None;
            }
        };

        let verdict = Verdict::judge(label, image.label);
        self.score.record_guess(verdict.is_correct());
        self.feedback = Some(Feedback::verdict(verdict));
        self.reload = Some(ReloadTimer::arm(now, self.feedback_delay));
        debug!(%label, truth = %image.label, verdict = verdict.as_str(), "Guess resolved");
        self.phase = RoundPhase::Resolved { image, verdict };
        Some(verdict)
    }

    /// If the reload timer is due: disarm it, clear feedback, enter `Loading`
    ///
    /// Returns whether the transition happened. The caller then runs
    /// [`load_next`](Self::load_next).
    pub fn begin_reload(&mut self, now: Instant) -> bool {
        match self.reload {
            Some(timer) if timer.is_due(now) => {
                self.reload = None;
                self.feedback = None;
                self.enter_loading();
                true
            }
            _ => false,
        }
    }

    /// Fire the reload timer if it is due at `now`
    pub async fn fire_due(&mut self, now: Instant) -> bool {
        if !self.begin_reload(now) {
            return false;
        }
        self.load_next().await;
        true
    }

    /// Sleep until the armed timer's deadline, then fire it
    ///
    /// Returns `false` immediately if nothing is armed.
    pub async fn wait_and_reload(&mut self) -> bool {
        let timer = match self.reload {
            Some(timer) => timer,
            None => return false,
        };
        timer.wait().await;
        self.fire_due(timer.deadline()).await
    }

    /// Disarm the reload timer without firing it
    pub fn cancel_reload(&mut self) -> Option<ReloadTimer> {
        self.reload.take()
    }

    pub fn view(&self) -> RoundView {
        let error = match &self.phase {
            RoundPhase::Failed { message } => Some(message.clone()),
            _ => None,
        };
        RoundView {
            phase: self.phase.name(),
            image_url: self.phase.current_image().map(|image| image.url.clone()),
            feedback: self.feedback.clone(),
            score: self.score.render(),
            controls_enabled: self.controls_enabled(),
            error,
        }
    }
}
