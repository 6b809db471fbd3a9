use serde::{Deserialize, Serialize};

/// Day choice meaning "any day works for me"
pub const WILDCARD_DAY: &str = "Either";

/// Event participant as registered on the roster
///
/// The position of a participant in the roster is its index for the whole
/// matching run; nothing else identifies it inside the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub gender: String,
    /// Genders this participant wants to be paired with. Empty means anyone.
    #[serde(default)]
    pub seeking: Vec<String>,
    #[serde(rename = "dayChoice", default = "default_day_choice")]
    pub day_choice: String,
    /// Questionnaire answers, compared with cosine similarity
    #[serde(default)]
    pub answers: Vec<f64>,
    /// Names of participants this one must never be paired with
    #[serde(default)]
    pub excluded: Vec<String>,
}

impl Participant {
    /// Whether this participant accepts a partner of the given gender
    pub fn seeks(&self, gender: &str) -> bool {
        self.seeking.is_empty()
            || self
                .seeking
                .iter()
                .any(|g| g.eq_ignore_ascii_case(gender))
    }

    /// Whether this participant refuses to be paired with `name`
    pub fn excludes(&self, name: &str) -> bool {
        self.excluded.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Whether the day choice is the wildcard value, e.g. [`WILDCARD_DAY`]
    pub fn is_flexible_day(&self, wildcard: &str) -> bool {
        self.day_choice.trim().eq_ignore_ascii_case(wildcard)
    }
}

fn default_day_choice() -> String {
    WILDCARD_DAY.to_string()
}
