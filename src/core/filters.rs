use crate::core::capability::{Compatibility, SELF_PAIRABLE, SELF_PREFERENCE, SELF_SIMILARITY};
use crate::core::similarity::cosine_similarity;
use crate::models::{Participant, WILDCARD_DAY};

/// Check whether two participants may be paired at all
///
/// Hard rules: the day choices must be compatible and neither side may
/// have excluded the other by name. `wildcard` is the "any day" value.
#[inline]
pub fn is_pairable(a: &Participant, b: &Participant, wildcard: &str) -> bool {
    if !days_compatible(a, b, wildcard) {
        return false;
    }

    if a.excludes(&b.name) || b.excludes(&a.name) {
        return false;
    }

    true
}

/// Same day, or at least one side is happy with either day
#[inline]
pub fn days_compatible(a: &Participant, b: &Participant, wildcard: &str) -> bool {
    a.is_flexible_day(wildcard)
        || b.is_flexible_day(wildcard)
        || a.day_choice.trim().eq_ignore_ascii_case(b.day_choice.trim())
}

/// How well a pairing honours both sides' gender preferences
///
/// Returns 1.0 when each seeks the other's gender, 0.5 when only one side
/// does and 0.0 otherwise.
#[inline]
pub fn preference_score(a: &Participant, b: &Participant) -> f64 {
    let a_wants_b = a.seeks(&b.gender);
    let b_wants_a = b.seeks(&a.gender);

    match (a_wants_b, b_wants_a) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.5,
        (false, false) => 0.0,
    }
}

/// [`Compatibility`] over participant records
///
/// Self pairs return the conventions from `capability` directly rather
/// than evaluating the pairwise rules on equal arguments.
#[derive(Debug, Clone, Copy)]
pub struct ParticipantCompatibility<'a> {
    participants: &'a [Participant],
    wildcard: &'a str,
}

impl<'a> ParticipantCompatibility<'a> {
    pub fn new(participants: &'a [Participant]) -> Self {
        Self {
            participants,
            wildcard: WILDCARD_DAY,
        }
    }

    /// Use `wildcard` instead of [`WILDCARD_DAY`] as the "any day" choice
    pub fn with_wildcard(mut self, wildcard: &'a str) -> Self {
        self.wildcard = wildcard;
        self
    }

    pub fn participants(&self) -> &'a [Participant] {
        self.participants
    }

    pub fn wildcard(&self) -> &'a str {
        self.wildcard
    }
}

impl Compatibility for ParticipantCompatibility<'_> {
    fn participant_count(&self) -> usize {
        self.participants.len()
    }

    fn similarity(&self, a: usize, b: usize) -> f64 {
        if a == b {
            return SELF_SIMILARITY;
        }
        cosine_similarity(&self.participants[a].answers, &self.participants[b].answers)
    }

    fn preferred(&self, a: usize, b: usize) -> f64 {
        if a == b {
            return SELF_PREFERENCE;
        }
        preference_score(&self.participants[a], &self.participants[b])
    }

    fn pairable(&self, a: usize, b: usize) -> f64 {
        if a == b {
            return SELF_PAIRABLE;
        }
        if is_pairable(&self.participants[a], &self.participants[b], self.wildcard) {
            1.0
        } else {
            0.0
        }
    }
}
