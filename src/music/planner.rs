//! Phrase planner — decides which phrase-aligned slot to compose next.
//!
//! Slots sit at integer multiples of the phrase length. A slot is composed
//! when it falls inside the half-open lookahead window
//! `[now, now + phrase + guard)` and has not been composed before. The
//! explicit last-slot index is what makes "at most once per slot" hold even
//! when the polling interval is much shorter than the phrase.

/// Jitter margin added to the lookahead window. Timer wake-ups may land this
/// late without a slot being missed.
pub const GUARD_SECS: f64 = 0.2;

/// Tracks composed slots for one scheduler run.
#[derive(Debug)]
pub struct PhrasePlanner {
    phrase_secs: f64,
    guard_secs: f64,
    last_slot: Option<u64>,
}

impl PhrasePlanner {
    pub fn new(phrase_secs: f64, guard_secs: f64) -> Self {
        debug_assert!(phrase_secs > 0.0);
        Self {
            phrase_secs,
            guard_secs,
            last_slot: None,
        }
    }

    /// Record an out-of-band composition at `start` (the initial phrase the
    /// transport schedules right at startup), so the slot it lands in is not
    /// composed a second time.
    pub fn mark_started(&mut self, start: f64) {
        let slot = (start.max(0.0) / self.phrase_secs).floor() as u64;
        self.last_slot = Some(slot);
    }

    /// If the next phrase-aligned boundary at or after `now` falls inside
    /// the lookahead window and is still uncomposed, claim it and return its
    /// start time.
    pub fn next_due(&mut self, now: f64) -> Option<f64> {
        let slot = (now.max(0.0) / self.phrase_secs).ceil() as u64;
        let start = slot as f64 * self.phrase_secs;
        if start >= now + self.phrase_secs + self.guard_secs {
            return None;
        }
        if self.last_slot.is_some_and(|last| last >= slot) {
            return None;
        }
        self.last_slot = Some(slot);
        Some(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    // The 72 BPM phrase length the transport actually uses.
    const PHRASE: f64 = 16.0 * 60.0 / 72.0; // ≈ 13.333

    fn planner() -> PhrasePlanner {
        PhrasePlanner::new(PHRASE, GUARD_SECS)
    }

    #[test]
    fn startup_composes_first_then_next_boundary() {
        let mut p = planner();
        p.mark_started(0.1);

        // First poll shortly after start: slot 1 (≈13.33) is inside the
        // window, slot 0 was covered by the startup phrase.
        let due = p.next_due(6.7).expect("slot 1 should be due");
        assert_approx_eq!(due, PHRASE, 1e-9);

        // Not 26.66 — the second boundary is out of reach from t=6.7.
        assert!(p.next_due(6.8).is_none());
    }

    #[test]
    fn each_slot_claimed_exactly_once() {
        let mut p = planner();
        p.mark_started(0.1);

        // Poll twice per phrase for five phrases; collect what gets composed.
        let mut composed = Vec::new();
        let mut now = 0.0;
        while now < PHRASE * 5.0 {
            if let Some(start) = p.next_due(now) {
                composed.push(start);
            }
            now += PHRASE / 2.0;
        }

        let expected: Vec<f64> = (1..=5).map(|i| i as f64 * PHRASE).collect();
        assert_eq!(composed.len(), expected.len());
        for (got, want) in composed.iter().zip(expected.iter()) {
            assert_approx_eq!(*got, *want, 1e-6);
        }
    }

    #[test]
    fn repeated_polls_in_same_window_do_not_duplicate() {
        let mut p = planner();
        assert!(p.next_due(10.0).is_some());
        for _ in 0..20 {
            assert!(p.next_due(10.0).is_none());
            assert!(p.next_due(12.0).is_none());
        }
    }

    #[test]
    fn slot_composed_before_its_start_time() {
        let mut p = planner();
        let now = 6.7;
        let due = p.next_due(now).unwrap();
        assert!(due >= now, "slots are never composed in the past");
        assert!(due < now + PHRASE + GUARD_SECS);
    }

    #[test]
    fn next_slot_is_at_most_one_phrase_ahead() {
        // The ceil boundary is never further than one phrase away, so
        // composition happens early within the window but never beyond it.
        let mut p = planner();
        for i in 0..50 {
            let now = i as f64 * 1.7;
            if let Some(due) = p.next_due(now) {
                assert!(due - now <= PHRASE + 1e-9);
                assert!(due - now < PHRASE + GUARD_SECS);
            }
        }
    }

    #[test]
    fn mark_started_mid_phrase_does_not_eat_next_slot() {
        let mut p = planner();
        // Scheduler restarted at t=20; startup phrase at 20.1 lands inside
        // slot 1's span, but slot 2 (≈26.66) must still be composed.
        p.mark_started(20.1);
        let due = p.next_due(20.2).expect("slot 2 due inside window");
        assert_approx_eq!(due, 2.0 * PHRASE, 1e-6);
    }

    #[test]
    fn fresh_planner_claims_current_boundary() {
        let mut p = PhrasePlanner::new(10.0, 0.2);
        // now exactly on a boundary: that boundary is "next" and due now.
        assert_approx_eq!(p.next_due(20.0).unwrap(), 20.0, 1e-9);
    }
}
