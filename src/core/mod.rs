// Core algorithm exports
pub mod capability;
pub mod constraints;
pub mod error;
pub mod extract;
pub mod filters;
pub mod matcher;
pub mod model;
pub mod objective;
pub mod pairs;
pub mod similarity;
pub mod text;
pub mod variables;

pub use capability::{validate_contract, Compatibility, CompatibilityTable};
pub use constraints::{ConstraintBuilder, ConstraintSet};
pub use error::MatchError;
pub use extract::{Matching, ResultExtractor};
pub use filters::{is_pairable, preference_score, ParticipantCompatibility};
pub use matcher::Matchmaker;
pub use model::{LinearConstraint, MatchingModel, Objective, Relation, VariableId};
pub use objective::{pair_score, ObjectiveBuilder, ObjectiveWeights};
pub use pairs::{CandidatePair, CandidatePairSpace};
pub use similarity::cosine_similarity;
pub use variables::DecisionVariableStore;
