//! # AI vs Real Game Library (aivr-game)
//!
//! Headless quiz client: round state machine, score tracking and the image
//! source providers it draws from.
//!
//! **Round lifecycle:** `Idle → Loading → AwaitingGuess → Resolved → Loading → …`,
//! with `Failed` as the only dead end. A [`RoundController`] owns all round and
//! score state; a [`GameSession`] moves it into a single tokio task so that
//! multi-threaded hosts get the same one-guess-per-round guarantee as a
//! single-threaded UI loop.

pub mod error;
pub mod remote;
pub mod round;
pub mod score;
pub mod session;
pub mod source;
pub mod timer;

pub use error::{GameError, GameResult};
pub use remote::{ApiSource, ManifestSource};
pub use round::{Feedback, FeedbackStyle, RoundController, RoundPhase, RoundView, Verdict, FEEDBACK_DELAY};
pub use score::ScoreTracker;
pub use session::{GameSession, SessionHandle};
pub use source::{ImageSource, PoolSource};
pub use timer::ReloadTimer;
