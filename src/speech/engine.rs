//! Speech engine capability interface
//!
//! The real engine lives in the browser; this trait is the narrow
//! contract the session state machine drives, so it can run against a
//! fake implementation in tests.

/// A voice offered by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// BCP-47 language tag, e.g. "en-IN" or "ml-IN"
    pub lang: String,
}

/// One sentence-scoped unit of text submitted for playback
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Name of the selected voice; `None` means engine default
    pub voice: Option<String>,
    pub lang: String,
    pub rate: f32,
    pub volume: f32,
    /// Completion/error handlers are attached only to the last chunk of a
    /// read-through. The engine reports events for monitored utterances
    /// only, so state resets exactly once per full playback.
    pub monitored: bool,
}

/// Event reported by the engine for a monitored utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// The utterance finished playing
    Ended,
    /// The engine reported a mid-playback error
    Errored,
}

/// Text-to-speech engine operations, mirroring the browser contract:
/// speak/pause/resume/cancel, voice enumeration and a `speaking` flag.
///
/// Volume on an already-enqueued utterance is not guaranteed to change
/// retroactively; that limitation belongs to the engine, not this crate.
pub trait SpeechEngine {
    fn speak(&mut self, utterance: Utterance);
    fn pause(&mut self);
    fn resume(&mut self);
    fn cancel(&mut self);
    fn voices(&self) -> Vec<Voice>;
    fn is_speaking(&self) -> bool;
}
