//! Tests for typed letter input.

use equation_pyramid::{
    LetterError, Pyramid, Round, Submission, evaluate_equation, parse_letter_input,
    selection_from_letters,
};

#[test]
fn test_letter_examples() {
    let pyramid = Pyramid::canonical();
    assert_eq!(parse_letter_input("abc", &pyramid), vec![Some(0), Some(1), Some(2)]);
    assert_eq!(parse_letter_input("aab", &pyramid), vec![Some(0), Some(1)]);
    assert_eq!(parse_letter_input("xyz", &pyramid), vec![None, None, None]);
}

#[test]
fn test_letters_feed_evaluator() {
    let pyramid = Pyramid::canonical();
    let selection = selection_from_letters("J, i, A", &pyramid).unwrap();
    assert_eq!(selection, [9, 8, 0]);
    let eq = evaluate_equation(&selection, &pyramid).unwrap();
    assert_eq!(eq.result(), 20.0);
}

#[test]
fn test_unknown_letter_rejected_before_evaluation() {
    let pyramid = Pyramid::canonical();
    assert_eq!(
        selection_from_letters("aqb", &pyramid),
        Err(LetterError::UnknownLetter('q'))
    );

    let mut round = Round::new(equation_pyramid::Puzzle::canonical());
    assert!(matches!(round.submit_letters("abq"), Submission::Invalid(_)));
    assert!(round.found().is_empty());
}
