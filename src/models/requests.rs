use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Participant, WILDCARD_DAY};

/// Separator used inside list-valued roster cells
pub const LIST_SEPARATOR: char = ';';

/// One row of the registration sheet
///
/// List-valued columns (`seeking`, `answers`, `excluded`) are stored as
/// `;`-separated cells so the same shape works for CSV and JSON rosters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RosterRow {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub gender: String,
    #[serde(default)]
    pub seeking: String,
    #[serde(alias = "dayChoice", alias = "day", default)]
    pub day_choice: String,
    #[serde(default)]
    pub answers: String,
    #[serde(default)]
    pub excluded: String,
}

impl RosterRow {
    /// Convert the raw row into a participant record
    ///
    /// Fails with the offending cell when an answer is not a number.
    pub fn into_participant(self) -> Result<Participant, String> {
        let answers = split_list(&self.answers)
            .map(|cell| {
                cell.parse::<f64>()
                    .map_err(|_| format!("answer '{}' is not a number", cell))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let day_choice = match self.day_choice.trim() {
            "" => WILDCARD_DAY.to_string(),
            day => day.to_string(),
        };

        Ok(Participant {
            name: self.name.trim().to_string(),
            gender: self.gender.trim().to_string(),
            seeking: split_list(&self.seeking).map(str::to_string).collect(),
            day_choice,
            answers,
            excluded: split_list(&self.excluded).map(str::to_string).collect(),
        })
    }
}

fn split_list(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
