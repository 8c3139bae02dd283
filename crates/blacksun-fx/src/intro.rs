//! Letter-by-letter intro text.
//!
//! Driven by the session clock only; it never touches the GPU and cannot fail.

use std::time::Duration;

use crate::config::IntroConfig;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IntroPhase {
    /// Letters are still appearing.
    Revealing,
    /// Whole text visible, waiting for the timeout.
    Holding,
    /// Overlay dismissed. Terminal.
    Done,
}

#[derive(Debug, Clone)]
pub struct IntroTimeline {
    letters: Vec<char>,
    letter_delay: Duration,
    timeout: Duration,
    phase: IntroPhase,
    visible: usize,
}

impl IntroTimeline {
    pub fn new(config: &IntroConfig) -> Self {
        let letters: Vec<char> = config.text.chars().collect();
        let phase = if letters.is_empty() {
            IntroPhase::Done
        } else {
            IntroPhase::Revealing
        };
        Self {
            letters,
            letter_delay: config.letter_delay,
            timeout: config.timeout,
            phase,
            visible: 0,
        }
    }

    #[inline]
    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Number of letters currently shown.
    #[inline]
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// The revealed prefix; empty once dismissed.
    pub fn revealed(&self) -> String {
        if self.phase == IntroPhase::Done {
            return String::new();
        }
        self.letters[..self.visible].iter().collect()
    }

    /// Advances to `elapsed` seconds since session start.
    ///
    /// Returns `true` when the revealed text or the phase changed.
    pub fn advance(&mut self, elapsed: f64) -> bool {
        if self.phase == IntroPhase::Done {
            return false;
        }

        let elapsed = Duration::from_secs_f64(elapsed.max(0.0));
        let before = (self.phase, self.visible);

        if elapsed >= self.timeout {
            self.phase = IntroPhase::Done;
            self.visible = 0;
            log::debug!("intro dismissed");
            return true;
        }

        // Letter i appears at i * delay, so letter 0 is visible immediately.
        let shown = if self.letter_delay.is_zero() {
            self.letters.len()
        } else {
            (elapsed.as_nanos() / self.letter_delay.as_nanos()) as usize + 1
        };
        self.visible = shown.min(self.letters.len()).max(self.visible);
        if self.visible == self.letters.len() {
            self.phase = IntroPhase::Holding;
        }

        before != (self.phase, self.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(text: &str) -> IntroTimeline {
        IntroTimeline::new(&IntroConfig {
            text: text.to_owned(),
            ..IntroConfig::default()
        })
    }

    #[test]
    fn first_letter_at_zero() {
        let mut t = timeline("SUN");
        assert!(t.advance(0.0));
        assert_eq!(t.revealed(), "S");
        assert_eq!(t.phase(), IntroPhase::Revealing);
    }

    #[test]
    fn one_letter_per_delay() {
        let mut t = timeline("SUN");
        t.advance(0.15);
        assert_eq!(t.revealed(), "SU");
        t.advance(0.2);
        assert_eq!(t.revealed(), "SUN");
        assert_eq!(t.phase(), IntroPhase::Holding);
        assert!(!t.advance(5.0));
    }

    #[test]
    fn dismissed_at_timeout_and_stays_done() {
        let mut t = timeline("SUN");
        t.advance(19.999);
        assert_eq!(t.phase(), IntroPhase::Holding);
        assert!(t.advance(20.0));
        assert_eq!(t.phase(), IntroPhase::Done);
        assert_eq!(t.revealed(), "");
        assert!(!t.advance(0.0));
        assert_eq!(t.phase(), IntroPhase::Done);
    }

    #[test]
    fn never_unreveals() {
        let mut t = timeline("ECLIPSE");
        t.advance(0.5);
        let shown = t.visible();
        t.advance(0.1);
        assert_eq!(t.visible(), shown);
    }

    #[test]
    fn empty_text_is_done() {
        let t = timeline("");
        assert_eq!(t.phase(), IntroPhase::Done);
    }
}
