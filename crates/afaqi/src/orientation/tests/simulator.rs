use crate::orientation::simulator::{
    compute_average, solve_required_national, BacNotes, Feasibility, Mention, SimulationMode,
};

#[test]
fn average_and_solver_agree_on_reference_case() {
    let average = compute_average(12.0, 14.0, 16.0);
    assert_eq!(average, 14.5);
    assert_eq!(
        solve_required_national(average, Some(12.0), Some(14.0)),
        Some(16.0)
    );
}

#[test]
fn solver_recovers_national_grade_across_the_scale() {
    for (regional, controle, national) in [
        (10.0, 10.0, 10.0),
        (8.5, 17.25, 12.0),
        (19.0, 15.0, 20.0),
        (0.0, 0.0, 4.0),
    ] {
        let average = compute_average(regional, controle, national);
        let solved = solve_required_national(average, Some(regional), Some(controle))
            .expect("both components known");
        assert!(
            (solved - national).abs() <= 0.02,
            "solved {solved} for national {national}"
        );
    }
}

#[test]
fn solver_returns_none_without_both_components() {
    assert_eq!(solve_required_national(12.0, None, None), None);
    assert_eq!(solve_required_national(12.0, Some(14.0), None), None);
    assert_eq!(solve_required_national(12.0, None, Some(14.0)), None);
}

#[test]
fn unreachable_targets_are_flagged_not_clamped() {
    let required = solve_required_national(18.0, Some(12.0), Some(12.0)).expect("inputs known");
    assert_eq!(required, 24.0);
    assert_eq!(Feasibility::of(required), Feasibility::Unreachable);
    assert_eq!(Feasibility::of(20.0), Feasibility::Reachable);
}

#[test]
fn mention_thresholds() {
    let expectations = [
        (20.0, Mention::TresBien),
        (16.0, Mention::TresBien),
        (15.99, Mention::Bien),
        (14.0, Mention::Bien),
        (13.99, Mention::AssezBien),
        (12.0, Mention::AssezBien),
        (11.99, Mention::Passable),
        (10.0, Mention::Passable),
        (9.99, Mention::Insuffisant),
        (0.0, Mention::Insuffisant),
    ];
    for (average, mention) in expectations {
        assert_eq!(Mention::from_average(average), mention, "average {average}");
    }
}

#[test]
fn reverse_mode_keeps_target_and_fills_national() {
    let notes = BacNotes {
        regional: Some(15.0),
        controle_continue: Some(17.0),
        national: None,
        moyenne: Some(16.0),
    };
    let resolved = notes.resolve(SimulationMode::Reverse);

    assert_eq!(resolved.moyenne, Some(16.0));
    assert_eq!(resolved.national, Some(16.0));
    assert!(!BacNotes {
        regional: Some(21.0),
        ..notes
    }
    .is_valid());
}
