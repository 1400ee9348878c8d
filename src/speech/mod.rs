//! Accessibility core: speech session state machine and translation toggle
//!
//! Engine and widget bindings are injected as traits; nothing here
//! touches a real browser API.

pub mod chunk;
mod engine;
mod session;
mod translate;

pub use engine::{EngineEvent, SpeechEngine, Utterance, Voice};
pub use session::{PlaybackState, SpeechSession, KEEPALIVE_INTERVAL, WATCHDOG_INTERVAL};
pub use translate::{LanguageToggle, TranslateControl};
