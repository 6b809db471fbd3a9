use crate::core::capability::Compatibility;
use crate::core::model::{LinearConstraint, Relation};
use crate::core::variables::DecisionVariableStore;

/// Both constraint families of the pairing model
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    pub coverage: Vec<LinearConstraint>,
    pub eligibility: Vec<LinearConstraint>,
}

impl ConstraintSet {
    pub fn coverage_count(&self) -> usize {
        self.coverage.len()
    }

    pub fn eligibility_count(&self) -> usize {
        self.eligibility.len()
    }

    pub fn into_vec(self) -> Vec<LinearConstraint> {
        let mut all = self.coverage;
        all.extend(self.eligibility);
        all
    }
}

pub struct ConstraintBuilder;

impl ConstraintBuilder {
    pub fn build<C: Compatibility + ?Sized>(
        store: &DecisionVariableStore,
        capability: &C,
    ) -> ConstraintSet {
        ConstraintSet {
            coverage: Self::coverage(store),
            eligibility: Self::eligibility(store, capability),
        }
    }

    /// Each participant sits in exactly one selected pair, real or self
    pub fn coverage(store: &DecisionVariableStore) -> Vec<LinearConstraint> {
        (0..store.participant_count())
            .map(|idx| LinearConstraint {
                name: format!("cover_{}", idx),
                terms: store
                    .variables_touching(idx)
                    .iter()
                    .map(|var| (*var, 1.0))
                    .collect(),
                relation: Relation::Eq,
                rhs: 1.0,
            })
            .collect()
    }

    /// `x_ij <= pairable(i, j)`: a hard exclusion when pairable is 0
    pub fn eligibility<C: Compatibility + ?Sized>(
        store: &DecisionVariableStore,
        capability: &C,
    ) -> Vec<LinearConstraint> {
        store
            .pairs_and_participants()
            .map(|(var, a, b)| LinearConstraint {
                name: format!("eligible_{}_{}", a, b),
                terms: vec![(var, 1.0)],
                relation: Relation::Le,
                rhs: capability.pairable(a, b),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capability::CompatibilityTable;
    use crate::core::pairs::{CandidatePair, CandidatePairSpace};

    fn setup(n: usize) -> (DecisionVariableStore, CompatibilityTable) {
        let store = DecisionVariableStore::new(&CandidatePairSpace::new(n));
        (store, CompatibilityTable::new(n))
    }

    #[test]
    fn test_family_sizes() {
        let (store, table) = setup(5);
        let set = ConstraintBuilder::build(&store, &table);
        assert_eq!(set.coverage_count(), 5);
        assert_eq!(set.eligibility_count(), 15);
        assert_eq!(set.into_vec().len(), 20);
    }

    #[test]
    fn test_coverage_sums_all_touching_variables() {
        let (store, _) = setup(4);
        let coverage = ConstraintBuilder::coverage(&store);
        for (idx, c) in coverage.iter().enumerate() {
            assert_eq!(c.relation, Relation::Eq);
            assert_eq!(c.rhs, 1.0);
            assert_eq!(c.terms.len(), 4);
            for (var, coef) in &c.terms {
                assert_eq!(*coef, 1.0);
                assert!(store.pair_of(*var).unwrap().contains(idx));
            }
        }
    }

    #[test]
    fn test_ineligible_pair_bounded_to_zero() {
        let (store, table) = setup(4);
        let table = table.forbid(0, 3);
        let eligibility = ConstraintBuilder::eligibility(&store, &table);
        let var = store.variable_for(&CandidatePair::new(0, 3)).unwrap();

        let bound = eligibility
            .iter()
            .find(|c| c.terms[0].0 == var)
            .unwrap();
        assert_eq!(bound.relation, Relation::Le);
        assert_eq!(bound.rhs, 0.0);
        assert_eq!(bound.name, "eligible_0_3");
        assert_eq!(
            eligibility.iter().filter(|c| c.rhs == 0.0).count(),
            1
        );
    }
}
