//! Translation toggle
//!
//! The third-party widget injects a select control into the page once its
//! script loads; translation is driven by setting that control's value
//! and dispatching a change event. This module hides the DOM poking
//! behind one narrow capability trait.

/// Capability interface over the injected translation control
pub trait TranslateControl {
    /// Whether the control is present yet (the script loads asynchronously)
    fn is_ready(&self) -> bool;

    /// Set the widget language; the empty string restores the original
    fn set_language(&mut self, code: &str);
}

/// Binary language toggle: original language <-> secondary language
pub struct LanguageToggle<C> {
    control: C,
    code: String,
    active: bool,
}

impl<C: TranslateControl> LanguageToggle<C> {
    pub fn new(control: C, code: &str) -> Self {
        Self {
            control,
            code: code.to_string(),
            active: false,
        }
    }

    /// Flip the translation state. If the control is not ready yet the
    /// toggle is silently ignored beyond a log line; there is no retry.
    pub fn toggle(&mut self) {
        if !self.control.is_ready() {
            tracing::warn!("translation control not ready, ignoring toggle");
            return;
        }

        if self.active {
            self.control.set_language("");
            self.active = false;
        } else {
            self.control.set_language(&self.code);
            self.active = true;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn control(&self) -> &C {
        &self.control
    }
}
