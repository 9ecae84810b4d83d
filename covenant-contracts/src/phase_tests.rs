use super::*;

#[test]
fn test_phase_order_follows_checkpoint_sequence() {
    let mut sorted = Phase::ALL;
    sorted.sort();
    assert_eq!(sorted, Phase::ALL);
    assert!(Phase::Initialization < Phase::Precondition);
    assert!(Phase::Precondition < Phase::PreconditionInvariant);
    assert!(Phase::Postcondition < Phase::PostconditionInvariant);
    assert!(Phase::PostconditionInvariant < Phase::Restore);
    assert!(Phase::PostRestore < Phase::PostRestoreInvariant);
}

#[test]
fn test_phase_labels() {
    assert_eq!(Phase::Initialization.to_string(), "Initialization invariant");
    assert_eq!(Phase::Precondition.to_string(), "Precondition");
    assert_eq!(Phase::PreconditionInvariant.to_string(), "Precondition invariant");
    assert_eq!(Phase::Postcondition.to_string(), "Postcondition");
    assert_eq!(Phase::PostconditionInvariant.to_string(), "Postcondition invariant");
    assert_eq!(Phase::Restore.to_string(), "Restore");
    assert_eq!(Phase::PostRestore.to_string(), "Post-restore");
    assert_eq!(Phase::PostRestoreInvariant.to_string(), "Post-restore invariant");
}

#[test]
fn test_restore_phases() {
    let restore: Vec<_> = Phase::ALL.into_iter().filter(|p| p.is_restore()).collect();
    assert_eq!(
        restore,
        vec![Phase::Restore, Phase::PostRestore, Phase::PostRestoreInvariant]
    );
}

#[test]
fn test_invariant_phases() {
    let invariant: Vec<_> = Phase::ALL.into_iter().filter(|p| p.is_invariant()).collect();
    assert_eq!(
        invariant,
        vec![
            Phase::Initialization,
            Phase::PreconditionInvariant,
            Phase::PostconditionInvariant,
            Phase::PostRestoreInvariant,
        ]
    );
}

#[test]
fn test_phase_serializes_by_name() {
    let json = serde_json::to_string(&Phase::PostRestoreInvariant).unwrap();
    assert_eq!(json, "\"PostRestoreInvariant\"");

    let phase: Phase = serde_json::from_str("\"Precondition\"").unwrap();
    assert_eq!(phase, Phase::Precondition);
}
