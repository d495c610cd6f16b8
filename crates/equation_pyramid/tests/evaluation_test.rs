//! Tests for equation evaluation and combination search.

use equation_pyramid::{
    BlockKind, EvaluationError, InvariantSet, Operator, Puzzle, PuzzleInvariants, Pyramid,
    evaluate_equation, find_valid_combinations,
};

fn num(value: i32) -> BlockKind {
    BlockKind::Number { value }
}

fn op(operator: Operator, magnitude: u32) -> BlockKind {
    BlockKind::Operator {
        operator,
        magnitude,
    }
}

/// a(+7) b(+3) c(×2) d(-5) e(+1) f(÷2) g(+4) h(+6) i(×3) j(+2)
fn scenario_pyramid() -> Pyramid {
    Pyramid::from_kinds([
        num(7),
        op(Operator::Add, 3),
        op(Operator::Multiply, 2),
        num(-5),
        num(1),
        op(Operator::Divide, 2),
        num(4),
        num(6),
        op(Operator::Multiply, 3),
        num(2),
    ])
}

#[test]
fn test_scenario_first_three_miss_target() {
    let pyramid = scenario_pyramid();
    let eq = evaluate_equation(&[0, 1, 2], &pyramid).unwrap();
    assert_eq!(eq.result(), 20.0);
    assert!(!eq.matches(13));
}

#[test]
fn test_scenario_is_solvable() {
    let pyramid = scenario_pyramid();
    let combos = find_valid_combinations(&pyramid, 13);
    let orders: Vec<[usize; 3]> = combos.iter().map(|c| c.indices()).collect();

    // 7 + 5 + 1: the -5 block adds its magnitude in the second role.
    assert!(orders.contains(&[0, 3, 4]));
    assert!(!orders.contains(&[0, 1, 2]));
    assert!(PuzzleInvariants::check_all(&Puzzle::new(pyramid, 13)).is_ok());
}

#[test]
fn test_role_order_changes_result() {
    let mut kinds = [num(1); 10];
    kinds[0] = num(10);
    kinds[1] = op(Operator::Subtract, 4);
    kinds[2] = op(Operator::Add, 1);
    let pyramid = Pyramid::from_kinds(kinds);

    let abc = evaluate_equation(&[0, 1, 2], &pyramid).unwrap();
    let bac = evaluate_equation(&[1, 0, 2], &pyramid).unwrap();
    assert_eq!(abc.result(), 7.0);
    // B's own minus is dropped in the first role; A adds 10.
    assert_eq!(bac.result(), 15.0);
    assert_ne!(abc.result(), bac.result());
}

#[test]
fn test_multiplication_not_prioritised() {
    let mut kinds = [num(1); 10];
    kinds[0] = num(5);
    kinds[1] = op(Operator::Multiply, 2);
    kinds[2] = op(Operator::Add, 3);
    let pyramid = Pyramid::from_kinds(kinds);

    assert_eq!(evaluate_equation(&[0, 1, 2], &pyramid).unwrap().result(), 13.0);
    assert_eq!(evaluate_equation(&[1, 0, 2], &pyramid).unwrap().result(), 10.0);
    // 5 + 3 × 2 is (5 + 3) × 2, not 5 + 6
    assert_eq!(evaluate_equation(&[0, 2, 1], &pyramid).unwrap().result(), 16.0);
}

#[test]
fn test_division_by_zero_never_produces_value() {
    let mut kinds = [num(2); 10];
    kinds[5] = op(Operator::Divide, 0);
    let pyramid = Pyramid::from_kinds(kinds);

    for selection in [[0, 5, 1], [0, 1, 5]] {
        let err = evaluate_equation(&selection, &pyramid).unwrap_err();
        assert_eq!(err, EvaluationError::DivisionByZero('f'));
        assert!(err.to_string().to_lowercase().contains("division by zero"));
    }
    assert!(find_valid_combinations(&pyramid, 0).iter().all(|c| c.result().is_finite()));
}

#[test]
fn test_evaluation_is_deterministic() {
    let pyramid = scenario_pyramid();
    let first = evaluate_equation(&[5, 8, 3], &pyramid).unwrap();
    for _ in 0..10 {
        assert_eq!(evaluate_equation(&[5, 8, 3], &pyramid).unwrap(), first);
    }
}

#[test]
fn test_finder_is_pure() {
    let pyramid = scenario_pyramid();
    assert_eq!(
        find_valid_combinations(&pyramid, 13),
        find_valid_combinations(&pyramid, 13)
    );
}

#[test]
fn test_fractional_results_never_match_integer_target() {
    let mut kinds = [num(1); 10];
    kinds[0] = num(7);
    kinds[1] = op(Operator::Divide, 2);
    let pyramid = Pyramid::from_kinds(kinds);
    let eq = evaluate_equation(&[0, 1, 2], &pyramid).unwrap();
    assert_eq!(eq.result(), 4.5);
    assert_eq!(eq.text(), "a(+7) b(÷2) c(+1) = 4.5");
}
