//! Several separation rounds over a small search, as a branch-and-bound driver would run them.
use std::rc::Rc;

use sepastore::algorithm::separation::{Admission, SeparationStorage};
use sepastore::algorithm::separation::environment::Tree;
use sepastore::algorithm::separation::settings::SeparationSettings;
use sepastore::data::linear_algebra::vector::SparseVector;
use sepastore::data::linear_program::domain::{Domain, Domains};
use sepastore::data::linear_program::elements::BoundDirection;
use sepastore::data::linear_program::row::{Cut, CutRef, Row};
use sepastore::data::relaxation::Relaxation;
use sepastore::data::search_tree::SearchTree;

fn cut(name: &str, coefficients: Vec<(usize, f64)>, lhs: Option<f64>, rhs: Option<f64>) -> CutRef {
    Cut::new(name, SparseVector::new(coefficients, 3), lhs, rhs).into_ref()
}

#[test]
fn initial_lp_then_rounds() {
    let mut tree = SearchTree::new(Domains::new(vec![
        Domain::integer(Some(0_f64), Some(5_f64)),
        Domain::integer(Some(0_f64), Some(5_f64)),
        Domain::continuous(Some(0_f64), None),
    ]));
    let mut lp = Relaxation::new(vec![0_f64; 3]);
    let mut storage = SeparationStorage::new(SeparationSettings {
        max_cuts: 1,
        max_cuts_root: 2,
        ..Default::default()
    });

    // Initial LP: everything goes in, also parallel rows
    storage.start_initial_lp_phase();
    let model = vec![
        cut("model_0", vec![(0, 2_f64), (1, 2_f64)], None, Some(7_f64)),
        cut("model_1", vec![(0, 1_f64), (1, 1_f64), (2, -1_f64)], Some(0_f64), None),
        cut("model_2", vec![(0, 4_f64), (1, 4_f64)], None, Some(15_f64)),
    ];
    for row in &model {
        assert_eq!(storage.add_cut(row, 1_f64, true, &lp, &tree).unwrap(), Admission::Stored);
    }
    assert!(!storage.apply_cuts(&mut lp, &mut tree).unwrap());
    storage.end_initial_lp_phase();
    assert_eq!(lp.nr_rows(), 3);
    assert_eq!(storage.statistics().cuts_applied, 0);

    // Root round, solution (1.75, 1.75, 3.5)
    lp.set_primal_solution(vec![1.75, 1.75, 3.5]);
    let rounding = cut("rounding", vec![(0, 1_f64), (1, 1_f64)], None, Some(3_f64));
    let weak = cut("weak", vec![(0, 1_f64), (1, 1_f64)], None, Some(3.4));
    let flow = cut("flow", vec![(1, 1_f64), (2, 1_f64)], None, Some(4_f64));
    let bound = cut("bound", vec![(2, 1_f64)], None, Some(3_f64));

    assert_eq!(storage.add_cut(&rounding, 1_f64, true, &lp, &tree).unwrap(), Admission::Stored);
    assert_eq!(storage.add_cut(&weak, 1_f64, true, &lp, &tree).unwrap(), Admission::Rejected);
    assert_eq!(storage.add_cut(&flow, 1_f64, true, &lp, &tree).unwrap(), Admission::Stored);
    assert_eq!(storage.add_cut(&bound, 1_f64, true, &lp, &tree).unwrap(), Admission::BoundChanges(1));
    assert_eq!(storage.nr_cuts(), 3);

    assert!(!storage.apply_cuts(&mut lp, &mut tree).unwrap());
    assert_eq!(lp.nr_rows(), 5);
    assert!(rounding.is_in_lp() && flow.is_in_lp());
    assert!(!weak.is_in_lp());
    assert_eq!(Rc::strong_count(&weak), 1);
    assert_eq!(tree.domains()[2].upper(), Some(3_f64));
    assert_eq!(storage.statistics().cuts_applied, 3);

    // Branch on the first variable, x_0 <= 1
    let child = tree.create_child(tree.root());
    tree.focus(child);
    assert!(!tree.apply_bound_change(child, 0, 1_f64, BoundDirection::Upper));
    lp.set_primal_solution(vec![1_f64, 1.5, 2_f64]);

    // Only one cut fits in a round below the root
    let local_first = cut("local_first", vec![(1, 1_f64), (2, 0.5)], None, Some(2_f64));
    let local_second = cut("local_second", vec![(0, 1_f64), (1, 2_f64)], None, Some(3.2));
    let integral = cut("integral", vec![(1, 2_f64)], None, Some(3_f64));
    assert_eq!(storage.add_cut(&local_first, 1_f64, false, &lp, &tree).unwrap(), Admission::Stored);
    assert_eq!(storage.add_cut(&local_second, 1_f64, false, &lp, &tree).unwrap(), Admission::Rejected);
    assert_eq!(storage.add_cut(&integral, 1_f64, false, &lp, &tree).unwrap(), Admission::BoundChanges(1));

    assert!(!storage.apply_cuts(&mut lp, &mut tree).unwrap());
    assert_eq!(tree.domains()[1].upper(), Some(1_f64));
    assert_eq!(tree.node_domains(tree.root())[1].upper(), Some(5_f64));
    assert!(lp.rows().any(|(row, depth)| row.name() == "local_first" && *depth == 1));

    // Back to the root: rows of the subtree leave the LP
    assert_eq!(lp.remove_rows_above_depth(0), 1);
    assert!(!local_first.is_in_lp());
    assert_eq!(storage.statistics().rounds, 3);
    assert_eq!(storage.statistics().cuts_found, 10);
}

#[test]
fn abandoned_round() {
    let tree = SearchTree::new(Domains::new(vec![Domain::continuous(Some(0_f64), Some(1_f64)); 3]));
    let lp = Relaxation::new(vec![1_f64; 3]);
    let mut storage = SeparationStorage::new(SeparationSettings::default());

    let row = cut("row", vec![(0, 1_f64), (1, 1_f64)], None, Some(1_f64));
    let single = cut("single", vec![(2, 1_f64)], Some(0.5), None);
    storage.add_cut(&row, 1_f64, false, &lp, &tree).unwrap();
    storage.add_cut(&single, 1_f64, false, &lp, &tree).unwrap();
    assert_eq!(storage.nr_cuts(), 2);
    assert_eq!(Rc::strong_count(&row), 2);

    storage.clear_cuts();
    assert!(storage.is_empty());
    assert_eq!(Rc::strong_count(&row), 1);
    assert_eq!(tree.domains()[2].lower(), Some(0_f64));

    // The same row can be submitted again in the next round
    assert_eq!(storage.add_cut(&row, 1_f64, false, &lp, &tree).unwrap(), Admission::Stored);
}
