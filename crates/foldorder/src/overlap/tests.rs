use super::*;
use proptest::prelude::*;

const KINDS: [StorageKind; 4] = [
    StorageKind::Dense,
    StorageKind::BitBlock,
    StorageKind::Sparse,
    StorageKind::Atomic,
];

fn relation_strategy() -> impl Strategy<Value = Relation> {
    prop_oneof![
        Just(Relation::NoOverlap),
        Just(Relation::Above),
        Just(Relation::Below),
        Just(Relation::Unresolved),
    ]
}

#[test]
fn new_matrix_is_all_unresolved() {
    let m = OverlapRelation::new(4);
    assert_eq!(m.size(), 4);
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(m.get(i, j), Ok(Relation::Unresolved));
        }
    }
    assert_eq!(m.unresolved_pairs().len(), 6);
}

#[test]
fn negative_face_count_is_invalid() {
    assert!(matches!(
        OverlapRelation::try_from_count(-1),
        Err(MatrixError::InvalidArgument { .. })
    ));
    assert_eq!(OverlapRelation::try_from_count(3).unwrap().size(), 3);
}

#[test]
fn out_of_range_indices_fail_without_writing() {
    let mut m = OverlapRelation::new(2);
    assert_eq!(
        m.get(2, 0),
        Err(MatrixError::IndexOutOfRange { i: 2, j: 0, size: 2 })
    );
    assert!(m.set(0, 5, Relation::Above).is_err());
    assert!(m.is_above(7, 1).is_err());
    assert!(m.set_if_possible(1, 2, Relation::Below).is_err());
    assert_eq!(m.get(0, 1), Ok(Relation::Unresolved));
}

#[test]
fn set_code_rejects_values_outside_domain() {
    let mut m = OverlapRelation::new(2);
    assert!(matches!(
        m.set_code(0, 1, 9),
        Err(MatrixError::InvalidArgument { .. })
    ));
    assert_eq!(m.get(1, 0), Ok(Relation::Unresolved));
    m.set_code(0, 1, Relation::Above.code()).unwrap();
    assert!(m.is_below(1, 0).unwrap());
}

#[test]
fn diagonal_cannot_hold_an_order() {
    let mut m = OverlapRelation::new(3);
    assert!(m.set_above(1, 1).is_err());
    m.set_no_overlap(1, 1).unwrap();
    assert!(m.is_no_overlap(1, 1).unwrap());
}

#[test]
fn set_writes_the_inverse() {
    let mut m = OverlapRelation::new(3);
    m.set_above(0, 2).unwrap();
    assert!(m.is_above(0, 2).unwrap());
    assert!(m.is_below(2, 0).unwrap());
    m.set_no_overlap(2, 1).unwrap();
    assert!(m.is_no_overlap(1, 2).unwrap());
    m.set_unresolved(0, 2).unwrap();
    assert!(m.is_unresolved(2, 0).unwrap());
}

#[test]
fn set_if_unresolved_only_claims_free_pairs() {
    let mut m = OverlapRelation::new(2);
    assert!(m.set_if_unresolved(0, 1, Relation::Below).unwrap());
    assert!(!m.set_if_unresolved(0, 1, Relation::Above).unwrap());
    assert!(!m.set_if_unresolved(1, 0, Relation::Above).unwrap());
    assert!(m.is_below(0, 1).unwrap());
}

#[test]
fn set_if_possible_is_idempotent() {
    let mut m = OverlapRelation::new(3);
    assert_eq!(
        m.set_if_possible(0, 1, Relation::Above),
        Ok(PropagationResult::Changed)
    );
    let snapshot = m.clone();
    assert_eq!(
        m.set_if_possible(0, 1, Relation::Above),
        Ok(PropagationResult::NotChanged)
    );
    // Same fact seen from the other side.
    assert_eq!(
        m.set_below_if_possible(1, 0),
        Ok(PropagationResult::NotChanged)
    );
    assert_eq!(m, snapshot);
}

#[test]
fn set_if_possible_detects_conflicts() {
    let mut m = OverlapRelation::new(3);
    m.set(0, 2, Relation::Above).unwrap();
    let snapshot = m.clone();
    assert_eq!(
        m.set_if_possible(0, 2, Relation::Below),
        Ok(PropagationResult::Unfoldable)
    );
    assert_eq!(
        m.set_above_if_possible(2, 0),
        Ok(PropagationResult::Unfoldable)
    );
    assert_eq!(m, snapshot);

    m.set_no_overlap(1, 2).unwrap();
    assert_eq!(
        m.set_if_possible(1, 2, Relation::Above),
        Ok(PropagationResult::Unfoldable)
    );
    assert!(m.is_no_overlap(1, 2).unwrap());
}

#[test]
fn clones_are_independent() {
    for kind in KINDS {
        let mut source = OverlapRelation::with_storage(3, kind);
        source.set_above(0, 1).unwrap();
        let mut branch = source.clone();
        branch.set_below(1, 2).unwrap();
        source.set_no_overlap(0, 2).unwrap();
        assert!(source.is_unresolved(1, 2).unwrap(), "{kind}");
        assert!(branch.is_unresolved(0, 2).unwrap(), "{kind}");
        assert!(branch.is_above(0, 1).unwrap(), "{kind}");
    }
}

#[test]
fn degenerate_sizes_are_trivially_valid() {
    let empty = OverlapRelation::new(0);
    assert_eq!(empty.size(), 0);
    assert!(empty.unresolved_pairs().is_empty());
    assert!(empty.face_orders().is_empty());
    assert_eq!(empty.first_unresolved(), None);
    assert_eq!(empty.to_string(), "");

    let single = OverlapRelation::new(1);
    assert_eq!(single.get(0, 0), Ok(Relation::Unresolved));
    assert!(single.unresolved_pairs().is_empty());
    assert_eq!(single.count(Relation::Unresolved), 0);
}

#[test]
fn copy_to_requires_matching_size() {
    let mut a = OverlapRelation::new(3);
    a.set_above(0, 1).unwrap();
    a.set_no_overlap(1, 2).unwrap();
    let mut b = OverlapRelation::with_storage(3, StorageKind::Dense);
    a.copy_to(&mut b).unwrap();
    assert_eq!(a, b);
    let mut c = OverlapRelation::new(2);
    assert!(a.copy_to(&mut c).is_err());
}

#[test]
fn switching_storage_keeps_every_cell() {
    let mut m = OverlapRelation::with_storage(5, StorageKind::Dense);
    for i in 0..5 {
        for j in (i + 1)..5 {
            m.set_no_overlap(i, j).unwrap();
        }
    }
    m.set_above(0, 3).unwrap();
    m.set_unresolved(1, 4).unwrap();
    let before = m.clone();

    m.switch_to_sparse();
    assert_eq!(m.storage_kind(), StorageKind::Sparse);
    assert_eq!(m, before);

    m.switch_storage(StorageKind::BitBlock);
    assert_eq!(m.storage_kind(), StorageKind::BitBlock);
    assert_eq!(m, before);

    let concurrent = m.clone_concurrent();
    assert_eq!(concurrent.storage_kind(), StorageKind::Atomic);
    assert_eq!(concurrent, before);
}

#[test]
fn concurrent_copy_accepts_writes_from_several_threads() {
    let n = 8;
    let shared = OverlapRelation::new(n).clone_concurrent();
    std::thread::scope(|scope| {
        for i in 0..n {
            let shared = &shared;
            scope.spawn(move || {
                // Each thread owns the pairs (i, j) with j > i.
                for j in (i + 1)..n {
                    let value = if (i + j) % 2 == 0 {
                        Relation::Above
                    } else {
                        Relation::Below
                    };
                    shared.set_shared(i, j, value).unwrap();
                }
            });
        }
    });
    for i in 0..n {
        for j in (i + 1)..n {
            let expected = if (i + j) % 2 == 0 {
                Relation::Above
            } else {
                Relation::Below
            };
            assert_eq!(shared.get(i, j), Ok(expected));
            assert_eq!(shared.get(j, i), Ok(expected.inverse()));
        }
    }
}

#[test]
fn shared_writes_need_atomic_storage_and_valid_cells() {
    let plain = OverlapRelation::new(3);
    assert!(matches!(
        plain.set_shared(0, 1, Relation::Above),
        Err(MatrixError::InvalidArgument { .. })
    ));
    assert!(plain.is_unresolved(0, 1).unwrap());

    let shared = plain.clone_concurrent();
    assert!(matches!(
        shared.set_shared(0, 3, Relation::Above),
        Err(MatrixError::IndexOutOfRange { i: 0, j: 3, size: 3 })
    ));
    assert!(matches!(
        shared.set_shared(2, 2, Relation::Below),
        Err(MatrixError::InvalidArgument { .. })
    ));
    shared.set_shared(2, 0, Relation::NoOverlap).unwrap();
    assert!(shared.is_no_overlap(0, 2).unwrap());
}

#[test]
fn counts_and_face_orders() {
    let mut m = OverlapRelation::new(4);
    m.set_below(0, 1).unwrap();
    m.set_above(3, 1).unwrap();
    m.set_no_overlap(0, 3).unwrap();
    assert_eq!(m.count(Relation::Below), 2);
    assert_eq!(m.count(Relation::Above), 0);
    assert_eq!(m.count(Relation::NoOverlap), 1);
    assert_eq!(m.count(Relation::Unresolved), 3);
    assert_eq!(m.first_unresolved(), Some((0, 2)));
    assert_eq!(
        m.face_orders(),
        vec![
            FaceOrder { f: 0, g: 1, s: -1 },
            FaceOrder { f: 1, g: 3, s: -1 },
        ]
    );
}

#[test]
fn display_prints_codes_row_by_row() {
    let mut m = OverlapRelation::new(2);
    m.set_above(0, 1).unwrap();
    assert_eq!(m.to_string(), "3 1\n2 3\n");
}

proptest! {
    #[test]
    fn writes_keep_cells_mutually_inverse(
        kind_idx in 0usize..4,
        n in 1usize..9,
        ops in proptest::collection::vec((0usize..9, 0usize..9, relation_strategy()), 0..48),
    ) {
        let mut m = OverlapRelation::with_storage(n, KINDS[kind_idx]);
        for (i, j, v) in ops {
            let (i, j) = (i % n, j % n);
            if i == j && v.is_definite() {
                continue;
            }
            m.set(i, j, v).unwrap();
        }
        for i in 0..n {
            for j in 0..n {
                prop_assert_eq!(m.get(i, j).unwrap().inverse(), m.get(j, i).unwrap());
            }
        }
    }

    #[test]
    fn guarded_writes_never_break_symmetry(
        n in 2usize..8,
        ops in proptest::collection::vec((0usize..8, 0usize..8, relation_strategy()), 0..48),
    ) {
        let mut m = OverlapRelation::new(n);
        for (i, j, v) in ops {
            let (i, j) = (i % n, j % n);
            if i == j {
                continue;
            }
            let before = m.get(i, j).unwrap();
            let outcome = m.set_if_possible(i, j, v).unwrap();
            let after = m.get(i, j).unwrap();
            match outcome {
                PropagationResult::Changed => {
                    prop_assert_eq!(before, Relation::Unresolved);
                    prop_assert_eq!(after, v);
                }
                PropagationResult::NotChanged => prop_assert_eq!(before, v),
                PropagationResult::Unfoldable => {
                    prop_assert_ne!(before, v);
                    prop_assert_eq!(after, before);
                }
            }
            prop_assert_eq!(m.get(j, i).unwrap(), after.inverse());
        }
    }
}
