use super::*;
use crate::crystal_map::MapError;

#[test]
fn test_duplicate_ids_rejected() {
    let mut list = PhaseList::new();
    list.add(Phase::new(1, "ferrite", "m-3m")).unwrap();

    let err = list.add(Phase::new(1, "austenite", "m-3m")).unwrap_err();
    assert!(matches!(err, MapError::DuplicatePhaseId(1)));
    assert_eq!(list.len(), 1);
}

#[test]
fn test_not_indexed_added_once() {
    let mut list = PhaseList::from_phases([Phase::new(0, "Ni", "432")]).unwrap();
    list.add_not_indexed();
    list.add_not_indexed();

    assert_eq!(list.ids(), vec![-1, 0]);
    assert_eq!(list.indexed().count(), 1);
    assert!(list.get(NOT_INDEXED_ID).unwrap().is_not_indexed());
}

#[test]
fn test_lattice_constants_order() {
    let lattice = Lattice::from_abcabg([3.52, 3.52, 3.52, 90.0, 90.0, 120.0]);
    assert_eq!(lattice.gamma, 120.0);
    assert_eq!(lattice.abcabg(), [3.52, 3.52, 3.52, 90.0, 90.0, 120.0]);

    let phase = Phase::new(2, "Ti", "6/mmm").with_lattice(lattice);
    assert_eq!(phase.structure.title, "Ti");
    assert_eq!(phase.structure.lattice, lattice);
}
