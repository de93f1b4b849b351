//! Invariants of the storage under random sequences of submitted cuts.
use std::collections::BTreeMap;
use std::rc::Rc;

use proptest::prelude::*;

use sepastore::algorithm::separation::{Admission, SeparationStorage};
use sepastore::algorithm::separation::settings::SeparationSettings;
use sepastore::data::linear_algebra::vector::SparseVector;
use sepastore::data::linear_program::domain::{Domain, Domains};
use sepastore::data::linear_program::row::{Cut, CutRef, Row};
use sepastore::data::relaxation::Relaxation;
use sepastore::data::search_tree::SearchTree;

const NR_VARIABLES: usize = 6;

fn coefficient() -> impl Strategy<Value = f64> {
    prop_oneof![-5_f64..-0.1, 0.1_f64..5_f64]
}

/// A row `a^T x <= rhs` on at least two variables, so that it never reduces to a bound.
fn row() -> impl Strategy<Value = (BTreeMap<usize, f64>, f64)> {
    (proptest::collection::btree_map(0..NR_VARIABLES, coefficient(), 2..=4), -5_f64..5_f64)
}

fn into_cut(index: usize, (coefficients, rhs): (BTreeMap<usize, f64>, f64)) -> CutRef {
    let coefficients = SparseVector::new(coefficients.into_iter().collect(), NR_VARIABLES);
    Cut::new(format!("cut_{}", index), coefficients, None, Some(rhs)).into_ref()
}

fn environment() -> (Relaxation, SearchTree) {
    let solution = (0..NR_VARIABLES).map(|j| (j % 3) as f64).collect();
    let domains = Domains::new(vec![Domain::continuous(Some(-3_f64), Some(3_f64)); NR_VARIABLES]);

    (Relaxation::new(solution), SearchTree::new(domains))
}

fn settings(max_cuts: usize, min_orthogonality: f64) -> SeparationSettings {
    SeparationSettings { max_cuts, min_orthogonality, ..Default::default() }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn sorted_within_capacity_and_orthogonal(
        rows in proptest::collection::vec(row(), 1..40),
        max_cuts in 1_usize..6,
        min_orthogonality in 0_f64..0.9,
    ) {
        let (lp, tree) = environment();
        let mut storage = SeparationStorage::new(settings(max_cuts, min_orthogonality));
        let tolerances = storage.settings().tolerances;

        for (index, row) in rows.into_iter().enumerate() {
            storage.add_cut(&into_cut(index, row), 1_f64, false, &lp, &tree).unwrap();

            let cuts = storage.cuts().collect::<Vec<_>>();
            prop_assert!(cuts.len() <= max_cuts);
            prop_assert!(storage.statistics().cuts_stored >= cuts.len());
            prop_assert!(cuts.windows(2).all(|pair| !pair[1].score.is_better_than(pair[0].score, &tolerances)));
            prop_assert!(cuts.iter().all(|cut| !tolerances.is_lt(cut.orthogonality, min_orthogonality)));
        }
    }

    #[test]
    fn forced_cuts_are_never_evicted(
        rows in proptest::collection::vec((row(), any::<bool>()), 1..30),
        max_cuts in 1_usize..4,
    ) {
        let (lp, tree) = environment();
        let mut storage = SeparationStorage::new(settings(max_cuts, 0.5));

        let mut nr_forced = 0;
        for (index, (row, forced)) in rows.into_iter().enumerate() {
            let scorefactor = if forced { f64::INFINITY } else { 1_f64 };
            let admission = storage.add_cut(&into_cut(index, row), scorefactor, false, &lp, &tree).unwrap();
            if forced && admission == Admission::Stored {
                nr_forced += 1;
            }

            let stored_forced = storage.cuts().filter(|cut| cut.score.is_forced()).count();
            prop_assert_eq!(stored_forced, nr_forced);
            prop_assert!(storage.cuts().len() - stored_forced <= max_cuts);
            prop_assert!(storage.cuts().take(stored_forced).all(|cut| cut.score.is_forced()));
        }
    }

    #[test]
    fn drained_after_commit(
        rows in proptest::collection::vec(row(), 0..20),
        bounds in proptest::collection::vec((0..NR_VARIABLES, coefficient(), -5_f64..5_f64), 0..5),
        abandon in any::<bool>(),
    ) {
        let (mut lp, mut tree) = environment();
        let mut storage = SeparationStorage::new(SeparationSettings::default());

        let cuts = rows.into_iter().enumerate().map(|(index, row)| into_cut(index, row)).collect::<Vec<_>>();
        for cut in &cuts {
            storage.add_cut(cut, 1_f64, true, &lp, &tree).unwrap();
        }
        for (index, (variable, coefficient, rhs)) in bounds.into_iter().enumerate() {
            let single = SparseVector::new(vec![(variable, coefficient)], NR_VARIABLES);
            let single = Cut::new(format!("bound_{}", index), single, None, Some(rhs)).into_ref();
            storage.add_cut(&single, 1_f64, true, &lp, &tree).unwrap();
        }
        let nr_rows = storage.cuts().len();

        if abandon {
            storage.clear_cuts();
            prop_assert_eq!(lp.nr_rows(), 0);
        } else {
            storage.apply_cuts(&mut lp, &mut tree).unwrap();
            prop_assert_eq!(lp.nr_rows(), nr_rows);
        }
        prop_assert!(storage.is_empty());
        prop_assert_eq!(storage.statistics().cuts_found_round, 0);
        prop_assert_eq!(storage.statistics().cuts_stored, 0);
        // Rows in the LP are also held by the LP
        let released = cuts.iter().all(|cut| Rc::strong_count(cut) == 1 + usize::from(cut.is_in_lp()));
        prop_assert!(released);
    }
}
