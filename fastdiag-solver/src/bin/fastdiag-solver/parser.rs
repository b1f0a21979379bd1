//! A parser for knowledge bases in a line-based text format:
//!
//! ```text
//! # a comment
//! var x 1..3
//! var y 1,2,5
//! background domain: x + y <= 6
//! constraint c1: x < y
//! constraint c2: x = 2 & y != 5 -> y = 1 | y = 2
//! test t1: x = 1 ; y >= 2
//! ```
//!
//! A clause is a disjunction of comparisons separated by `|`, optionally preceded by a
//! conjunction of premises separated by `&` and terminated by `->`. A test case is the
//! conjunction of its clauses, which are separated by `;`. Each side of a comparison is a sum of
//! terms of the form `3`, `x` or `3*x`.
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

use fastdiag_solver::csp::constraints::Clause;
use fastdiag_solver::csp::constraints::Comparator;
use fastdiag_solver::csp::constraints::LinearComparison;
use fastdiag_solver::csp::KnowledgeBase;
use fastdiag_solver::csp::ModelError;
use fastdiag_solver::csp::VariableId;
use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum KnowledgeBaseParseError {
    #[error("failed to read file")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {kind}")]
    InvalidLine { line: usize, kind: ParseErrorKind },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ParseErrorKind {
    #[error("'{0}' is not a known statement")]
    UnknownStatement(String),

    #[error("expected {expected} in '{text}'")]
    Expected { expected: &'static str, text: String },

    #[error("'{0}' is an invalid identifier")]
    InvalidIdentifier(String),

    #[error("'{0}' is an invalid integer")]
    InvalidInteger(String),

    #[error("the constant of '{0}' is out of range")]
    IntegerOverflow(String),

    #[error("use of undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub(crate) fn parse_knowledge_base(
    source: impl Read,
) -> Result<KnowledgeBase, KnowledgeBaseParseError> {
    let reader = BufReader::new(source);
    let mut knowledge_base = KnowledgeBase::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let statement = line
            .split_once('#')
            .map_or(line.as_str(), |(statement, _)| statement)
            .trim();

        if statement.is_empty() {
            continue;
        }

        parse_statement(&mut knowledge_base, statement).map_err(|kind| {
            KnowledgeBaseParseError::InvalidLine {
                line: index + 1,
                kind,
            }
        })?;
    }

    debug!(
        "Parsed a knowledge base with {} variables, {} constraints and {} test cases",
        knowledge_base.num_variables(),
        knowledge_base.num_constraints(),
        knowledge_base.all_test_cases().len()
    );
    Ok(knowledge_base)
}

fn parse_statement(
    knowledge_base: &mut KnowledgeBase,
    statement: &str,
) -> Result<(), ParseErrorKind> {
    let (keyword, rest) = statement
        .split_once(char::is_whitespace)
        .ok_or_else(|| ParseErrorKind::UnknownStatement(statement.to_owned()))?;
    let rest = rest.trim();

    match keyword {
        "var" => parse_variable(knowledge_base, rest),
        "constraint" => {
            let (name, clause) = parse_named(rest)?;
            let clause = parse_clause(knowledge_base, clause)?;
            let _ = knowledge_base.add_constraint(name, clause)?;
            Ok(())
        }
        "background" => {
            let (name, clause) = parse_named(rest)?;
            let clause = parse_clause(knowledge_base, clause)?;
            let _ = knowledge_base.add_background_constraint(name, clause)?;
            Ok(())
        }
        "test" => {
            let (name, clauses) = parse_named(rest)?;
            let clauses = clauses
                .split(';')
                .map(|clause| parse_clause(knowledge_base, clause))
                .collect::<Result<Vec<_>, _>>()?;
            let _ = knowledge_base.add_test_case(name, clauses)?;
            Ok(())
        }
        _ => Err(ParseErrorKind::UnknownStatement(keyword.to_owned())),
    }
}

/// Parses `<name> <lb>..<ub>` or `<name> <v1>,<v2>,...`.
fn parse_variable(knowledge_base: &mut KnowledgeBase, text: &str) -> Result<(), ParseErrorKind> {
    let (name, domain) = text
        .split_once(char::is_whitespace)
        .ok_or_else(|| ParseErrorKind::Expected {
            expected: "a domain",
            text: text.to_owned(),
        })?;
    let name = parse_identifier(name)?;
    let domain: String = domain.chars().filter(|c| !c.is_whitespace()).collect();

    let _ = match domain.split_once("..") {
        Some((lower_bound, upper_bound)) => knowledge_base.new_named_bounded_integer(
            parse_integer(lower_bound)?,
            parse_integer(upper_bound)?,
            name,
        )?,
        None => {
            let values = domain
                .split(',')
                .map(parse_integer)
                .collect::<Result<Vec<_>, _>>()?;
            knowledge_base.new_named_sparse_integer(values, name)?
        }
    };

    Ok(())
}

/// Splits `<name>: <body>`.
fn parse_named(text: &str) -> Result<(&str, &str), ParseErrorKind> {
    let (name, body) = text
        .split_once(':')
        .ok_or_else(|| ParseErrorKind::Expected {
            expected: "':'",
            text: text.to_owned(),
        })?;

    Ok((parse_identifier(name.trim())?, body))
}

fn parse_clause(knowledge_base: &KnowledgeBase, text: &str) -> Result<Clause, ParseErrorKind> {
    let parse_all = |comparisons: &str, separator: char| {
        comparisons
            .split(separator)
            .map(|comparison| parse_comparison(knowledge_base, comparison))
            .collect::<Result<Vec<_>, _>>()
    };

    match text.split_once("->") {
        Some((premises, conclusions)) => Ok(Clause::implication(
            parse_all(premises, '&')?,
            parse_all(conclusions, '|')?,
        )),
        None => Ok(Clause::new(parse_all(text, '|')?)),
    }
}

fn parse_comparison(
    knowledge_base: &KnowledgeBase,
    text: &str,
) -> Result<LinearComparison, ParseErrorKind> {
    let text = text.trim();
    let missing_comparator = || ParseErrorKind::Expected {
        expected: "a comparison operator",
        text: text.to_owned(),
    };

    let position = text
        .find(['<', '>', '=', '!'])
        .ok_or_else(missing_comparator)?;
    let (left, rest) = text.split_at(position);

    let (comparator, operator_length) = match rest.as_bytes() {
        [b'!', b'=', ..] => (Comparator::NotEqual, 2),
        [b'<', b'=', ..] => (Comparator::LessOrEqual, 2),
        [b'>', b'=', ..] => (Comparator::GreaterOrEqual, 2),
        [b'=', b'=', ..] => (Comparator::Equal, 2),
        [b'=', ..] => (Comparator::Equal, 1),
        [b'<', ..] => (Comparator::Less, 1),
        [b'>', ..] => (Comparator::Greater, 1),
        _ => return Err(missing_comparator()),
    };
    let right = &rest[operator_length..];

    let (mut terms, left_constant) = parse_linear(knowledge_base, left)?;
    let (right_terms, right_constant) = parse_linear(knowledge_base, right)?;
    terms.extend(
        right_terms
            .into_iter()
            .map(|(coefficient, variable)| (-coefficient, variable)),
    );
    let constant = left_constant
        .checked_sub(right_constant)
        .ok_or_else(|| ParseErrorKind::IntegerOverflow(text.to_owned()))?;

    Ok(LinearComparison::new(terms, constant, comparator))
}

/// Parses a sum of terms into its variable terms and its constant.
fn parse_linear(
    knowledge_base: &KnowledgeBase,
    text: &str,
) -> Result<(Vec<(i32, VariableId)>, i32), ParseErrorKind> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let missing_term = || ParseErrorKind::Expected {
        expected: "a term",
        text: text.trim().to_owned(),
    };
    if compact.is_empty() {
        return Err(missing_term());
    }

    let mut terms = Vec::new();
    let mut constant = 0_i32;

    for (index, term) in compact.replace('-', "+-").split('+').enumerate() {
        if term.is_empty() {
            // only a leading minus sign leaves an empty first term
            if index == 0 {
                continue;
            }
            return Err(missing_term());
        }

        let (sign, body) = match term.strip_prefix('-') {
            Some(body) => (-1, body),
            None => (1, term),
        };

        if let Some((coefficient, name)) = body.split_once('*') {
            let variable = find_variable(knowledge_base, name)?;
            terms.push((sign * parse_integer(coefficient)?, variable));
        } else if body.starts_with(|c: char| c.is_ascii_digit()) {
            constant = constant
                .checked_add(sign * parse_integer(body)?)
                .ok_or_else(|| ParseErrorKind::IntegerOverflow(text.trim().to_owned()))?;
        } else {
            terms.push((sign, find_variable(knowledge_base, body)?));
        }
    }

    Ok((terms, constant))
}

fn find_variable(
    knowledge_base: &KnowledgeBase,
    name: &str,
) -> Result<VariableId, ParseErrorKind> {
    knowledge_base
        .variable_by_name(parse_identifier(name)?)
        .ok_or_else(|| ParseErrorKind::UndefinedVariable(name.to_owned()))
}

fn parse_identifier(text: &str) -> Result<&str, ParseErrorKind> {
    let mut chars = text.chars();
    let is_valid = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if is_valid {
        Ok(text)
    } else {
        Err(ParseErrorKind::InvalidIdentifier(text.to_owned()))
    }
}

fn parse_integer(text: &str) -> Result<i32, ParseErrorKind> {
    text.trim()
        .parse()
        .map_err(|_| ParseErrorKind::InvalidInteger(text.trim().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> KnowledgeBase {
        parse_knowledge_base(source.as_bytes()).expect("valid knowledge base")
    }

    fn parse_error(source: &str) -> (usize, ParseErrorKind) {
        match parse_knowledge_base(source.as_bytes()) {
            Err(KnowledgeBaseParseError::InvalidLine { line, kind }) => (line, kind),
            other => panic!("expected an invalid line, got {other:?}"),
        }
    }

    #[test]
    fn basic_knowledge_base_is_read() {
        let knowledge_base = parse(
            r#"
            var x 1..3
            var y 1, 2, 5
            background b: x + y <= 6
            constraint c1: x < y
            constraint c2: y < x
            test t1: x = 1 ; y >= 2
            "#,
        );

        assert_eq!(knowledge_base.num_variables(), 2);
        assert_eq!(knowledge_base.num_constraints(), 3);
        assert_eq!(knowledge_base.background().len(), 1);
        assert_eq!(
            knowledge_base.describe(knowledge_base.consideration()),
            "{c1, c2}"
        );

        let test_cases = knowledge_base.all_test_cases();
        assert_eq!(test_cases.len(), 1);
        let test_case = test_cases.iter().next().expect("one test case");
        assert_eq!(knowledge_base.test_case(test_case).clauses.len(), 2);

        let y = knowledge_base.variable_by_name("y").expect("declared");
        assert_eq!(
            knowledge_base.variable(y).domain().values().collect::<Vec<_>>(),
            vec![1, 2, 5]
        );
    }

    #[test]
    fn wide_ranges_are_stored_as_bounds() {
        use fastdiag_solver::csp::CspOracle;
        use fastdiag_solver::oracle::ConsistencyOracle;

        let knowledge_base =
            parse("var x -2000000000..2000000000\nconstraint c1: x <= -1999999999\n");
        let x = knowledge_base.variable_by_name("x").expect("declared");
        assert_eq!(
            knowledge_base.variable(x).domain().upper_bound(),
            Some(2_000_000_000)
        );

        let mut oracle = CspOracle::new(knowledge_base.clone());
        assert!(oracle
            .is_consistent(knowledge_base.consideration())
            .expect("valid input"));
    }

    #[test]
    fn comments_and_empty_lines_are_ignored() {
        let knowledge_base = parse("# header\n\nvar x 0..1 # trailing comment\n\n");

        assert_eq!(knowledge_base.num_variables(), 1);
        assert_eq!(knowledge_base.num_constraints(), 0);
    }

    #[test]
    fn both_sides_of_a_comparison_are_moved_to_the_left() {
        let knowledge_base =
            parse("var x 0..9\nvar y 0..9\nconstraint c: 2*x - y + 3 <= 4 - y + x");

        let constraint = knowledge_base
            .consideration()
            .iter()
            .next()
            .expect("one constraint");
        let comparisons = knowledge_base.constraint(constraint).clause.comparisons();
        let x = knowledge_base.variable_by_name("x").expect("declared");

        assert_eq!(comparisons.len(), 1);
        assert_eq!(comparisons[0].terms(), &[(1, x)]);
        assert_eq!(comparisons[0].constant(), -1);
        assert_eq!(comparisons[0].comparator(), Comparator::LessOrEqual);
    }

    #[test]
    fn premises_of_an_implication_are_negated() {
        let knowledge_base = parse("var x 0..9\nconstraint c: x = 1 & x != 2 -> x > 3 | x <= 5");

        let constraint = knowledge_base
            .consideration()
            .iter()
            .next()
            .expect("one constraint");
        let comparators = knowledge_base
            .constraint(constraint)
            .clause
            .comparisons()
            .iter()
            .map(|comparison| comparison.comparator())
            .collect::<Vec<_>>();

        assert_eq!(
            comparators,
            vec![
                Comparator::NotEqual,
                Comparator::Equal,
                Comparator::Greater,
                Comparator::LessOrEqual
            ]
        );
    }

    #[test]
    fn negative_constants_are_read() {
        let knowledge_base = parse("var x -3..3\nconstraint c: -x = -2");

        let constraint = knowledge_base
            .consideration()
            .iter()
            .next()
            .expect("one constraint");
        let comparison = &knowledge_base.constraint(constraint).clause.comparisons()[0];
        let x = knowledge_base.variable_by_name("x").expect("declared");

        assert_eq!(comparison.terms(), &[(-1, x)]);
        assert_eq!(comparison.constant(), 2);
    }

    #[test]
    fn undefined_variables_are_reported_with_their_line() {
        assert_eq!(
            parse_error("var x 1..3\n\nconstraint c: z > 1"),
            (3, ParseErrorKind::UndefinedVariable("z".to_owned()))
        );
    }

    #[test]
    fn invalid_domains_are_rejected() {
        assert_eq!(
            parse_error("var x 1..a"),
            (1, ParseErrorKind::InvalidInteger("a".to_owned()))
        );
        assert_eq!(
            parse_error("var x 3..1"),
            (
                1,
                ParseErrorKind::Model(ModelError::EmptyDomain("x".to_owned()))
            )
        );
    }

    #[test]
    fn missing_operators_are_rejected() {
        assert_eq!(
            parse_error("var x 1..3\nconstraint c: x + 1"),
            (
                2,
                ParseErrorKind::Expected {
                    expected: "a comparison operator",
                    text: "x + 1".to_owned()
                }
            )
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        assert_eq!(
            parse_error("var x 1..3\nconstraint c: x > 1\ntest c: x = 1"),
            (3, ParseErrorKind::Model(ModelError::DuplicateName("c".to_owned())))
        );
    }

    #[test]
    fn unknown_statements_are_rejected() {
        assert_eq!(
            parse_error("variable x 1..3"),
            (1, ParseErrorKind::UnknownStatement("variable".to_owned()))
        );
    }
}
