use pretty_assertions::assert_eq;
use rstruth::table::assignment;
use rstruth::*;

fn results(expr: &str) -> Vec<Result<bool, EvalError>> {
    TruthTable::new(expr).unwrap().rows().map(|r| r.result).collect()
}

fn eval_words(words: &[&str]) -> Result<bool, EvalError> {
    let tokens: Vec<Token> = words.iter().map(|w| Token::from_word(w)).collect();
    evaluate_postfix(&tokens)
}

#[test]
fn test_single_variable_tables() {
    for expr in ["a", "not a", "a or a", "a xor 1", "(x)"] {
        let table = TruthTable::new(expr).unwrap();
        assert_eq!(table.num_vars(), 1);
        assert_eq!(table.rows().count(), 2);
    }
}

#[test]
fn test_row_count_and_order() {
    let table = TruthTable::new("d or c or b or a").unwrap();

    assert_eq!(table.vars(), &['A', 'B', 'C', 'D']);

    let rows: Vec<Row> = table.rows().collect();
    assert_eq!(rows.len(), 16);

    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.index, i);
        let expected: Vec<bool> = (0..4).map(|j| (i >> (3 - j)) & 1 == 1).collect();
        assert_eq!(row.assignment, expected);
        assert_eq!(row.assignment, assignment(i, 4));
        assert_eq!(row.result, Ok(i != 0));
    }
}

#[test]
fn test_double_negation() {
    assert_eq!(results("not not a"), results("a"));
    assert_eq!(results("a"), vec![Ok(false), Ok(true)]);
}

#[test]
fn test_distributivity() {
    assert_eq!(
        results("A AND (B OR C)"),
        results("(A AND B) OR (A AND C)")
    );
}

#[test]
fn test_self_identities() {
    assert_eq!(results("a xor a"), vec![Ok(false), Ok(false)]);
    assert_eq!(results("a nand a"), results("not a"));
    assert_eq!(results("a nor a"), results("not a"));
}

#[test]
fn test_precedence_postfix() {
    let postfix = to_postfix(&tokenize("A AND B OR NOT C"));
    assert_eq!(join_tokens(&postfix), "A B AND C NOT OR");
}

#[test]
fn test_postfix_evaluation() {
    assert_eq!(eval_words(&["1", "0", "AND"]), Ok(false));
    assert_eq!(eval_words(&["1", "0", "OR"]), Ok(true));
    assert_eq!(eval_words(&["1", "NOT"]), Ok(false));
}

#[test]
fn test_postfix_failures() {
    assert_eq!(eval_words(&["1", "AND"]), Err(EvalError::InvalidExpression));
    assert_eq!(eval_words(&["1", "0"]), Err(EvalError::MalformedExpression));
    assert_eq!(
        eval_words(&["1", "FOO"]),
        Err(EvalError::UnknownOperator("FOO".to_string()))
    );
}

#[test]
fn test_round_trip() {
    for expr in [
        "a and b or not c",
        "x nand 1 xor y nor 0",
        "not not not q",
        "foo bar & 1",
    ] {
        let tokens = tokenize(expr);
        assert_eq!(tokenize(&join_tokens(&tokens)), tokens);
    }
}

#[test]
fn test_case_insensitive_table() {
    assert_eq!(results("a AnD b"), results("A and B"));
}

#[test]
fn test_lenient_parentheses() {
    assert_eq!(results("(a and b"), results("a and b"));
    assert_eq!(results("a or b)"), results("a or b"));
}

#[test]
fn test_empty_expression() {
    assert_eq!(results(""), vec![Err(EvalError::MalformedExpression)]);
}

#[test]
fn test_parallel_rows() {
    let table = TruthTable::new("(a xor b) and (c nor d) or e").unwrap();
    assert_eq!(table.par_rows(), table.rows().collect::<Vec<_>>());
}

#[test]
fn test_custom_operator_table() {
    // OR binding tighter than AND
    let table = OperatorTable::new([
        (OpKind::Not, (3, Associativity::Right)),
        (OpKind::Or, (2, Associativity::Left)),
        (OpKind::Nor, (2, Associativity::Left)),
        (OpKind::And, (1, Associativity::Left)),
        (OpKind::Nand, (1, Associativity::Left)),
        (OpKind::Xor, (1, Associativity::Left)),
    ]);
    let truth_table = TruthTable::from_tokens(
        tokenize("a and b or c"),
        &TableOptions::default(),
        PostfixConverter::new(table),
    )
    .unwrap();

    assert_eq!(join_tokens(&truth_table.postfix()), "A B C OR AND");
    // a=0, b=0, c=1 is false under this grouping
    assert_eq!(truth_table.row(1).result, Ok(false));
}
