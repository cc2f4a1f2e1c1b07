//! Type/delete cycle behind the hero headline.
//!
//! The state is a plain value: every tick produces the next state and the
//! delay the host should wait before ticking again. Scheduling and
//! cancellation belong to the component that owns the timer.

use std::rc::Rc;
use thiserror::Error;

pub const TYPE_DELAY_MIN_MS: u32 = 50;
pub const TYPE_DELAY_MAX_MS: u32 = 150;
pub const DELETE_DELAY_MS: u32 = 30;
pub const PAUSE_DELAY_MS: u32 = 2000;
pub const RESTART_DELAY_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Typing,
    Deleting,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhraseCycleError {
    #[error("typewriter needs at least one phrase")]
    NoPhrases,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhraseCycle {
    phrases: Rc<[String]>,
    index: usize,
    // Characters of the current phrase on screen, counted in chars.
    shown: usize,
    mode: Mode,
    tick_delay_ms: u32,
}

impl PhraseCycle {
    pub fn new<I, S>(phrases: I) -> Result<Self, PhraseCycleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Rc<[String]> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            return Err(PhraseCycleError::NoPhrases);
        }
        Ok(Self {
            phrases,
            index: 0,
            shown: 0,
            mode: Mode::Typing,
            tick_delay_ms: RESTART_DELAY_MS,
        })
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Whether this cycle runs over exactly `phrases`, in order.
    pub fn plays(&self, phrases: &[String]) -> bool {
        *self.phrases == *phrases
    }

    pub fn current_phrase(&self) -> &str {
        &self.phrases[self.index]
    }

    pub fn displayed_text(&self) -> &str {
        let phrase = self.current_phrase();
        let end = phrase
            .char_indices()
            .nth(self.shown)
            .map(|(i, _)| i)
            .unwrap_or(phrase.len());
        &phrase[..end]
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Delay before this state should be ticked.
    pub fn tick_delay_ms(&self) -> u32 {
        self.tick_delay_ms
    }

    /// Advances one character. `roll` is a uniform sample in `[0, 1)` that
    /// paces typing; it is ignored while deleting.
    pub fn tick(&self, roll: f64) -> (PhraseCycle, u32) {
        let mut next = self.clone();
        let phrase_len = self.current_phrase().chars().count();

        let delay = match self.mode {
            Mode::Typing => {
                next.shown = (self.shown + 1).min(phrase_len);
                if next.shown == phrase_len {
                    next.mode = Mode::Deleting;
                    PAUSE_DELAY_MS
                } else {
                    typing_delay(roll)
                }
            }
            Mode::Deleting => {
                next.shown = self.shown.saturating_sub(1);
                if next.shown == 0 {
                    next.mode = Mode::Typing;
                    next.index = (self.index + 1) % self.phrases.len();
                    RESTART_DELAY_MS
                } else {
                    DELETE_DELAY_MS
                }
            }
        };

        next.tick_delay_ms = delay;
        (next, delay)
    }
}

fn typing_delay(roll: f64) -> u32 {
    let roll = if roll.is_finite() { roll.clamp(0.0, 1.0) } else { 0.0 };
    let spread = f64::from(TYPE_DELAY_MAX_MS - TYPE_DELAY_MIN_MS);
    TYPE_DELAY_MIN_MS + (spread * roll).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(cycle: &PhraseCycle, ticks: usize) -> PhraseCycle {
        (0..ticks).fold(cycle.clone(), |state, _| state.tick(0.5).0)
    }

    #[test]
    fn refuses_an_empty_phrase_list() {
        assert_eq!(
            PhraseCycle::new(Vec::<String>::new()),
            Err(PhraseCycleError::NoPhrases)
        );
    }

    #[test]
    fn starts_blank_and_typing() {
        let cycle = PhraseCycle::new(["websites"]).unwrap();
        assert_eq!(cycle.current_index(), 0);
        assert_eq!(cycle.displayed_text(), "");
        assert_eq!(cycle.mode(), Mode::Typing);
        assert_eq!(cycle.tick_delay_ms(), RESTART_DELAY_MS);
    }

    #[test]
    fn types_then_pauses_on_the_full_phrase() {
        let mut cycle = PhraseCycle::new(["abc", "de"]).unwrap();
        let mut seen = Vec::new();
        for _ in 0..3 {
            let (next, delay) = cycle.tick(0.25);
            seen.push((next.displayed_text().to_string(), delay));
            cycle = next;
        }
        assert_eq!(
            seen,
            vec![
                ("a".to_string(), 75),
                ("ab".to_string(), 75),
                ("abc".to_string(), PAUSE_DELAY_MS),
            ]
        );
        assert_eq!(cycle.mode(), Mode::Deleting);
        assert_eq!(cycle.tick_delay_ms(), PAUSE_DELAY_MS);
    }

    #[test]
    fn deletes_quickly_then_moves_to_the_next_phrase() {
        let typed = run(&PhraseCycle::new(["abc", "de"]).unwrap(), 3);

        let (two, d1) = typed.tick(0.9);
        let (one, d2) = two.tick(0.9);
        let (empty, d3) = one.tick(0.9);

        assert_eq!(two.displayed_text(), "ab");
        assert_eq!(one.displayed_text(), "a");
        assert_eq!(empty.displayed_text(), "");
        assert_eq!((d1, d2), (DELETE_DELAY_MS, DELETE_DELAY_MS));
        assert_eq!(d3, RESTART_DELAY_MS);
        assert_eq!(empty.mode(), Mode::Typing);
        assert_eq!(empty.current_index(), 1);
        assert!(DELETE_DELAY_MS < TYPE_DELAY_MIN_MS);
    }

    #[test]
    fn full_round_trip_advances_exactly_once() {
        let start = PhraseCycle::new(["hello", "world", "again"]).unwrap();
        // five characters typed, five deleted
        let after = run(&start, 10);
        assert_eq!(after.displayed_text(), "");
        assert_eq!(after.current_index(), 1);
        assert_eq!(after.mode(), Mode::Typing);
    }

    #[test]
    fn wraps_to_the_first_phrase() {
        let mut cycle = PhraseCycle::new(["ab", "c"]).unwrap();
        let mut visited = vec![cycle.current_index()];
        for _ in 0..10 {
            let (next, _) = cycle.tick(0.0);
            if next.current_index() != cycle.current_index() {
                visited.push(next.current_index());
            }
            cycle = next;
        }
        assert_eq!(visited, vec![0, 1, 0, 1]);
    }

    #[test]
    fn displayed_text_is_always_a_bounded_prefix() {
        let phrases = ["Design", "", "Ünïcödé ✨ text", "x"];
        let mut cycle = PhraseCycle::new(phrases).unwrap();
        let rolls = [0.0, 0.3, 0.99, 0.5, 0.71];
        for i in 0..500 {
            let (next, delay) = cycle.tick(rolls[i % rolls.len()]);
            let phrase = next.current_phrase();
            assert!(phrase.starts_with(next.displayed_text()));
            assert!(next.displayed_text().chars().count() <= phrase.chars().count());
            assert!(delay >= DELETE_DELAY_MS && delay <= PAUSE_DELAY_MS);
            assert_eq!(delay, next.tick_delay_ms());
            cycle = next;
        }
    }

    #[test]
    fn typing_delay_stays_in_range() {
        assert_eq!(typing_delay(0.0), TYPE_DELAY_MIN_MS);
        assert_eq!(typing_delay(1.0), TYPE_DELAY_MAX_MS);
        assert_eq!(typing_delay(0.5), 100);
        assert_eq!(typing_delay(-3.0), TYPE_DELAY_MIN_MS);
        assert_eq!(typing_delay(42.0), TYPE_DELAY_MAX_MS);
        assert_eq!(typing_delay(f64::NAN), TYPE_DELAY_MIN_MS);
    }

    #[test]
    fn knows_which_phrases_it_plays() {
        let cycle = PhraseCycle::new(["a", "b"]).unwrap();
        let advanced = run(&cycle, 3);
        let same = vec!["a".to_string(), "b".to_string()];
        assert!(cycle.plays(&same));
        assert!(advanced.plays(&same));
        assert!(!cycle.plays(&["b".to_string(), "a".to_string()]));
        assert!(!cycle.plays(&["a".to_string()]));
        assert!(!cycle.plays(&[]));
    }

    #[test]
    fn ticking_does_not_mutate_the_source_state() {
        let cycle = PhraseCycle::new(["abc"]).unwrap();
        let _ = cycle.tick(0.1);
        assert_eq!(cycle.displayed_text(), "");
    }
}
