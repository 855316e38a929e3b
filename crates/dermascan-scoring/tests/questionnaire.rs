use dermascan_scoring::questionnaire::{
    completion, get_question, questions, validate_answers, AnswerError, SymptomAnswers,
};

fn full_answers() -> SymptomAnswers {
    questions().iter().map(|q| (q.id.clone(), 2)).collect()
}

#[test]
fn questionnaire_has_five_four_option_questions() {
    assert_eq!(questions().len(), 5);
    assert!(questions().iter().all(|q| q.options.len() == 4));
    assert_eq!(questions()[0].id, "symptom_duration");
    assert_eq!(questions()[4].id, "pigmentation_changes");
}

#[test]
fn lookup_by_id() {
    let q = get_question("itching_severity").unwrap();
    assert_eq!(q.prompt, "How intense is the itching?");
    assert!(get_question("fever").is_none());
}

#[test]
fn complete_answers_validate() {
    assert!(validate_answers(&full_answers()).is_empty());
}

#[test]
fn missing_answers_are_reported_in_order() {
    let mut answers = full_answers();
    answers.remove("skin_texture");
    answers.remove("symptom_duration");

    let errors = validate_answers(&answers);
    assert_eq!(
        errors,
        vec![
            AnswerError::Missing {
                question_id: "symptom_duration".to_string()
            },
            AnswerError::Missing {
                question_id: "skin_texture".to_string()
            },
        ]
    );
}

#[test]
fn out_of_range_and_unknown_answers_are_reported() {
    let mut answers = full_answers();
    answers.insert("itching_severity".to_string(), 4);
    answers.insert("fever".to_string(), 0);

    let errors = validate_answers(&answers);
    assert_eq!(errors.len(), 2);
    assert!(matches!(
        &errors[0],
        AnswerError::OutOfRange { question_id, answer: 4, options: 4 } if question_id == "itching_severity"
    ));
    assert!(matches!(
        &errors[1],
        AnswerError::UnknownQuestion { question_id } if question_id == "fever"
    ));
}

#[test]
fn completion_counts_known_questions_only() {
    let mut answers = SymptomAnswers::new();
    answers.insert("symptom_duration".to_string(), 0);
    answers.insert("skin_texture".to_string(), 1);
    answers.insert("fever".to_string(), 1);

    let progress = completion(&answers);
    assert_eq!(progress.answered, 2);
    assert_eq!(progress.total, 5);
    assert_eq!(progress.percent, 40);

    assert_eq!(completion(&full_answers()).percent, 100);
    assert_eq!(completion(&SymptomAnswers::new()).percent, 0);
}
