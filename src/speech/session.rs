//! Speech session state machine
//!
//! One session models one text-to-speech playback: Idle -> Speaking ->
//! Paused and back, with an explicit stop from any state. The session
//! owns the engine handle; the embedding UI drives the two timer ticks.

use std::time::Duration;

use super::chunk::split_sentences;
use super::engine::{EngineEvent, SpeechEngine, Utterance, Voice};

/// Cadence for `watchdog_tick`: reconciles local state with the engine,
/// which does not reliably push all state-change notifications.
pub const WATCHDOG_INTERVAL: Duration = Duration::from_secs(1);

/// Cadence for `keepalive_tick`: just under the engine's cutoff window
/// that silently truncates long narrations.
pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(14);

const DEFAULT_LANG: &str = "en-US";

/// Playback state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Speaking,
    Paused,
}

/// A text-to-speech playback session over an injected engine
pub struct SpeechSession<E: SpeechEngine> {
    engine: E,
    state: PlaybackState,
    volume: f32,
    muted: bool,
    /// Preferred-voice language of the translation target, tried first
    secondary_language: String,
    queued_chunks: usize,
}

impl<E: SpeechEngine> SpeechSession<E> {
    pub fn new(engine: E) -> Self {
        Self::with_secondary_language(engine, "ml")
    }

    pub fn with_secondary_language(engine: E, secondary_language: &str) -> Self {
        Self {
            engine,
            state: PlaybackState::Idle,
            volume: 1.0,
            muted: false,
            secondary_language: secondary_language.to_string(),
            queued_chunks: 0,
        }
    }

    /// Start reading `text`, or resume if paused.
    ///
    /// From Idle: cancels any pending playback, chunks the text, selects
    /// a voice and enqueues every chunk, marking only the last one
    /// monitored. From Paused: resumes without re-chunking or
    /// re-enqueuing.
    pub fn play(&mut self, text: &str) {
        if self.state == PlaybackState::Paused {
            self.engine.resume();
            self.state = PlaybackState::Speaking;
            return;
        }

        self.engine.cancel();

        let chunks = split_sentences(text);
        let voice = select_voice(&self.engine.voices(), &self.secondary_language);
        let volume = self.effective_volume();
        let last = chunks.len() - 1;

        for (i, chunk) in chunks.iter().enumerate() {
            self.engine.speak(Utterance {
                text: chunk.clone(),
                voice: voice.as_ref().map(|v| v.name.clone()),
                lang: voice
                    .as_ref()
                    .map(|v| v.lang.clone())
                    .unwrap_or_else(|| DEFAULT_LANG.to_string()),
                rate: 1.0,
                volume,
                monitored: i == last,
            });
        }

        self.queued_chunks = chunks.len();
        self.state = PlaybackState::Speaking;
    }

    /// Suspend playback, keeping the in-flight queue
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Speaking {
            self.engine.pause();
            self.state = PlaybackState::Paused;
        }
    }

    /// Cancel playback and empty the queue, from any state
    pub fn stop(&mut self) {
        self.engine.cancel();
        self.state = PlaybackState::Idle;
        self.queued_chunks = 0;
    }

    /// Handle an engine event for the monitored (last) chunk. Both the
    /// natural end and an error resolve to a clean Idle; errors are never
    /// surfaced beyond the controls returning to "not speaking".
    ///
    /// Errors on non-final chunks are not reported at all; remaining
    /// queued chunks may still play. Observed engine behavior, kept as
    /// is.
    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Ended => self.reset(),
            EngineEvent::Errored => {
                tracing::warn!("speech engine reported an error; resetting session");
                self.reset();
            }
        }
    }

    /// Reconcile local state with the engine. The engine does not push
    /// every state change, so drift is possible: if it reports idle while
    /// we still think we are speaking (and not paused), force-reset.
    pub fn watchdog_tick(&mut self) {
        if self.state == PlaybackState::Speaking && !self.engine.is_speaking() {
            self.reset();
        }
    }

    /// Nudge the engine with a pause/resume cycle while speaking, to keep
    /// long narrations from being cut off at the engine's window.
    pub fn keepalive_tick(&mut self) {
        if self.state == PlaybackState::Speaking && self.engine.is_speaking() {
            self.engine.pause();
            self.engine.resume();
        }
    }

    /// Set volume (clamped to 0..=1). Applies to utterances created
    /// afterwards; chunks already enqueued keep their volume. Raising the
    /// volume un-mutes.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if self.muted && self.volume > 0.0 {
            self.muted = false;
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_speaking(&self) -> bool {
        self.state == PlaybackState::Speaking
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    pub fn queued_chunks(&self) -> usize {
        self.queued_chunks
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    fn reset(&mut self) {
        self.state = PlaybackState::Idle;
        self.queued_chunks = 0;
    }
}

/// Pick a preferred voice: the translation target language first, then
/// the regional English variant, then any English, then engine default.
fn select_voice(voices: &[Voice], secondary_language: &str) -> Option<Voice> {
    voices
        .iter()
        .find(|v| v.lang.contains(secondary_language))
        .or_else(|| voices.iter().find(|v| v.lang.contains("en-IN")))
        .or_else(|| voices.iter().find(|v| v.lang.contains("en")))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeEngine {
        spoken: Vec<Utterance>,
        pauses: usize,
        resumes: usize,
        cancels: usize,
        speaking: bool,
        voices: Vec<Voice>,
    }

    impl SpeechEngine for FakeEngine {
        fn speak(&mut self, utterance: Utterance) {
            self.spoken.push(utterance);
            self.speaking = true;
        }

        fn pause(&mut self) {
            self.pauses += 1;
        }

        fn resume(&mut self) {
            self.resumes += 1;
        }

        fn cancel(&mut self) {
            self.spoken.clear();
            self.speaking = false;
            self.cancels += 1;
        }

        fn voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }

        fn is_speaking(&self) -> bool {
            self.speaking
        }
    }

    fn voice(name: &str, lang: &str) -> Voice {
        Voice {
            name: name.to_string(),
            lang: lang.to_string(),
        }
    }

    fn session() -> SpeechSession<FakeEngine> {
        SpeechSession::new(FakeEngine::default())
    }

    #[test]
    fn test_play_chunks_and_monitors_last_only() {
        let mut s = session();
        s.play("One. Two. Three.");

        assert_eq!(s.state(), PlaybackState::Speaking);
        assert_eq!(s.queued_chunks(), 3);

        let spoken = &s.engine().spoken;
        assert_eq!(spoken.len(), 3);
        assert!(!spoken[0].monitored);
        assert!(!spoken[1].monitored);
        assert!(spoken[2].monitored);
    }

    #[test]
    fn test_pause_then_play_resumes_without_reenqueue() {
        let mut s = session();
        s.play("One. Two.");
        s.pause();
        assert_eq!(s.state(), PlaybackState::Paused);
        assert_eq!(s.engine().pauses, 1);

        s.play("One. Two.");
        assert_eq!(s.state(), PlaybackState::Speaking);
        assert_eq!(s.engine().resumes, 1);
        // No duplicate chunk enqueue: still the original two utterances
        assert_eq!(s.engine().spoken.len(), 2);
    }

    #[test]
    fn test_stop_from_any_state_resets() {
        let mut s = session();
        s.play("Hello.");
        s.stop();
        assert_eq!(s.state(), PlaybackState::Idle);
        assert_eq!(s.queued_chunks(), 0);
        assert!(s.engine().spoken.is_empty());

        s.play("Hello again.");
        s.pause();
        s.stop();
        assert_eq!(s.state(), PlaybackState::Idle);
        assert_eq!(s.queued_chunks(), 0);
    }

    #[test]
    fn test_play_from_idle_cancels_pending_playback() {
        let mut s = session();
        s.play("First run.");
        s.stop();
        s.play("Second run.");
        // One cancel from stop, one at the start of each play
        assert_eq!(s.engine().cancels, 3);
        assert_eq!(s.engine().spoken.len(), 1);
        assert_eq!(s.engine().spoken[0].text, "Second run.");
    }

    #[test]
    fn test_monitored_end_and_error_reset_to_idle() {
        let mut s = session();
        s.play("Hello.");
        s.handle_event(EngineEvent::Ended);
        assert_eq!(s.state(), PlaybackState::Idle);

        s.play("Hello.");
        s.handle_event(EngineEvent::Errored);
        assert_eq!(s.state(), PlaybackState::Idle);
        assert_eq!(s.queued_chunks(), 0);
    }

    #[test]
    fn test_watchdog_reconciles_engine_drift() {
        let mut s = session();
        s.play("Hello.");
        // Engine finished without notifying us
        s.engine_mut().speaking = false;
        s.watchdog_tick();
        assert_eq!(s.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_watchdog_leaves_paused_sessions_alone() {
        let mut s = session();
        s.play("Hello.");
        s.pause();
        s.engine_mut().speaking = false;
        s.watchdog_tick();
        assert_eq!(s.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_keepalive_nudges_only_while_speaking() {
        let mut s = session();
        s.play("Hello.");
        s.keepalive_tick();
        assert_eq!(s.engine().pauses, 1);
        assert_eq!(s.engine().resumes, 1);

        s.pause();
        s.keepalive_tick();
        // Paused sessions are not nudged
        assert_eq!(s.engine().pauses, 2);
        assert_eq!(s.engine().resumes, 1);
    }

    #[test]
    fn test_voice_priority_order() {
        let all = vec![
            voice("us", "en-US"),
            voice("regional", "en-IN"),
            voice("target", "ml-IN"),
        ];
        assert_eq!(select_voice(&all, "ml").unwrap().name, "target");

        let no_target = vec![voice("us", "en-US"), voice("regional", "en-IN")];
        assert_eq!(select_voice(&no_target, "ml").unwrap().name, "regional");

        let english_only = vec![voice("us", "en-US")];
        assert_eq!(select_voice(&english_only, "ml").unwrap().name, "us");

        let none: Vec<Voice> = vec![voice("fr", "fr-FR")];
        assert!(select_voice(&none, "ml").is_none());
    }

    #[test]
    fn test_volume_applies_to_future_utterances_only() {
        let mut s = session();
        s.play("Hello.");
        assert_eq!(s.engine().spoken[0].volume, 1.0);

        s.set_volume(0.4);
        // The already-enqueued utterance keeps its volume
        assert_eq!(s.engine().spoken[0].volume, 1.0);

        s.stop();
        s.play("Hello.");
        assert_eq!(s.engine().spoken[0].volume, 0.4);
    }

    #[test]
    fn test_mute_and_unmute_via_volume() {
        let mut s = session();
        s.toggle_mute();
        assert_eq!(s.effective_volume(), 0.0);

        s.play("Hello.");
        assert_eq!(s.engine().spoken[0].volume, 0.0);

        // Raising the slider un-mutes
        s.set_volume(0.5);
        assert_eq!(s.effective_volume(), 0.5);
    }
}
