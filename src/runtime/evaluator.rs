//! Expression and condition evaluation.
//!
//! The expression grammar is flat: a literal, a number, a
//! boolean word, a bound variable, or a single binary operation. Only the
//! first of `+ - * /` found left to right (outside double quotes) is
//! honoured; its right operand ends at the next operator and anything
//! after that is ignored. There is no precedence and no parenthesis
//! support, so `2 + 3 * 4` is `5`. Programs written against this
//! behaviour depend on it; keep it.
//!
//! Anything that does not fit evaluates to its own trimmed text.

use crate::runtime::{
    environment::Environment,
    value::{parse_numeral, Value},
};

const OPERATORS: [char; 4] = ['+', '-', '*', '/'];

const TRUE_WORDS: [&str; 1] = ["verdadero"];
const FALSE_WORDS: [&str; 1] = ["falso"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Comparison {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

/// Phrase operators first, then their symbolic spellings. Two-character
/// symbols precede their one-character prefixes.
const COMPARISONS: [(&str, Comparison); 9] = [
    (" es igual a ", Comparison::Equal),
    (" es mayor que ", Comparison::Greater),
    (" es menor que ", Comparison::Less),
    ("==", Comparison::Equal),
    ("!=", Comparison::NotEqual),
    (">=", Comparison::GreaterOrEqual),
    ("<=", Comparison::LessOrEqual),
    (">", Comparison::Greater),
    ("<", Comparison::Less),
];

pub fn evaluate(expr: &str, env: &Environment) -> Value {
    let expr = expr.trim();

    if let Some(text) = quoted_literal(expr) {
        return Value::text(text);
    }
    if let Some(number) = parse_numeral(expr) {
        return Value::Number(number);
    }
    if TRUE_WORDS.contains(&expr) {
        return Value::Bool(true);
    }
    if FALSE_WORDS.contains(&expr) {
        return Value::Bool(false);
    }
    if let Some(value) = env.lookup(expr) {
        return value.clone();
    }
    if let Some((left, op, right)) = split_first_operator(expr) {
        let left = evaluate(left, env);
        let right = evaluate(right, env);
        if let Some(value) = apply(op, &left, &right) {
            return value;
        }
    }
    Value::text(expr)
}

pub fn evaluate_condition(condition: &str, env: &Environment) -> bool {
    let condition = condition.trim();
    for (phrase, comparison) in COMPARISONS {
        if let Some((left, right)) = condition.split_once(phrase) {
            let left = evaluate(left, env);
            let right = evaluate(right, env);
            return compare(comparison, &left, &right);
        }
    }
    evaluate(condition, env).to_boolean()
}

fn compare(comparison: Comparison, left: &Value, right: &Value) -> bool {
    let (a, b) = (left.to_number(), right.to_number());
    match comparison {
        Comparison::Equal => left.loosely_equals(right),
        Comparison::NotEqual => !left.loosely_equals(right),
        Comparison::Greater => a > b,
        Comparison::GreaterOrEqual => a >= b,
        Comparison::Less => a < b,
        Comparison::LessOrEqual => a <= b,
    }
}

fn apply(op: BinaryOp, left: &Value, right: &Value) -> Option<Value> {
    if let (Value::Number(a), Value::Number(b)) = (left, right) {
        return Some(Value::Number(arithmetic(op, *a, *b)));
    }
    if op == BinaryOp::Add {
        return Some(Value::Text(format!("{left}{right}")));
    }
    let (a, b) = (left.to_number(), right.to_number());
    if a.is_nan() || b.is_nan() {
        return None;
    }
    Some(Value::Number(arithmetic(op, a, b)))
}

fn arithmetic(op: BinaryOp, a: f64, b: f64) -> f64 {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
    }
}

/// `"..."` with no other quote inside.
fn quoted_literal(expr: &str) -> Option<&str> {
    let inner = expr.strip_prefix('"')?.strip_suffix('"')?;
    if inner.contains('"') {
        None
    } else {
        Some(inner)
    }
}

/// Splits at the first operator outside quotes. A sign at the very start
/// of an operand is not an operator.
fn split_first_operator(expr: &str) -> Option<(&str, BinaryOp, &str)> {
    let at = find_operator(expr, 0)?;
    let op = expr[at..].chars().next().and_then(BinaryOp::from_char)?;
    let right_start = at + 1;
    let right_end = find_operator(expr, right_start).unwrap_or(expr.len());
    Some((&expr[..at], op, &expr[right_start..right_end]))
}

/// Byte index of the next operator at or after `from`, skipping a leading
/// sign of the operand that starts at `from`.
fn find_operator(expr: &str, from: usize) -> Option<usize> {
    let mut in_quotes = false;
    let mut operand_started = false;
    for (offset, ch) in expr[from..].char_indices() {
        let index = from + offset;
        if ch == '"' {
            in_quotes = !in_quotes;
            operand_started = true;
            continue;
        }
        if in_quotes || ch.is_whitespace() {
            continue;
        }
        if OPERATORS.contains(&ch) && operand_started {
            return Some(index);
        }
        operand_started = true;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(bindings: &[(&str, Value)]) -> Environment {
        let mut env = Environment::new();
        for (name, value) in bindings {
            env.set(*name, value.clone());
        }
        env
    }

    #[test]
    fn literals_numbers_and_variables() {
        let env = env_with(&[("nombre", Value::text("Ana"))]);
        assert_eq!(evaluate("\"Hola\"", &env), Value::text("Hola"));
        assert_eq!(evaluate(" 42 ", &env), Value::Number(42.0));
        assert_eq!(evaluate("verdadero", &env), Value::Bool(true));
        assert_eq!(evaluate("nombre", &env), Value::text("Ana"));
        assert_eq!(evaluate("otro", &env), Value::text("otro"));
    }

    #[test]
    fn numeric_addition_and_concatenation() {
        let env = env_with(&[
            ("x", Value::Number(5.0)),
            ("y", Value::Number(3.0)),
            ("s", Value::text("5")),
            ("t", Value::text("tres")),
        ]);
        assert_eq!(evaluate("x + y", &env), Value::Number(8.0));
        assert_eq!(evaluate("s + t", &env), Value::text("5tres"));
        assert_eq!(evaluate("\"Hola, \" + t", &env), Value::text("Hola, tres"));
    }

    #[test]
    fn only_the_first_operator_is_honoured() {
        let env = Environment::new();
        assert_eq!(evaluate("2 + 3 * 4", &env), Value::Number(5.0));
        assert_eq!(evaluate("10 - 2 - 3", &env), Value::Number(8.0));
        assert_eq!(evaluate("6 / 3", &env), Value::Number(2.0));
    }

    #[test]
    fn signs_and_quoted_operators_are_not_split_points() {
        let env = Environment::new();
        assert_eq!(evaluate("-4", &env), Value::Number(-4.0));
        assert_eq!(evaluate("5 * -2", &env), Value::Number(-10.0));
        assert_eq!(evaluate("\"a-b\" + \"c\"", &env), Value::text("a-bc"));
    }

    #[test]
    fn non_numeric_operands_fall_back_to_text() {
        let env = env_with(&[("t", Value::text("tres"))]);
        assert_eq!(evaluate("t * 2", &env), Value::text("t * 2"));
        assert_eq!(evaluate("\"8\" - 3", &env), Value::Number(5.0));
    }

    #[test]
    fn phrase_conditions() {
        let env = env_with(&[("edad", Value::text("18"))]);
        assert!(evaluate_condition("5 es mayor que 3", &env));
        assert!(!evaluate_condition("5 es mayor que 9", &env));
        assert!(evaluate_condition("2 es menor que 3", &env));
        assert!(evaluate_condition("edad es igual a 18", &env));
        assert!(evaluate_condition("edad es mayor que 17", &env));
    }

    #[test]
    fn symbolic_conditions() {
        let env = env_with(&[("n", Value::Number(4.0))]);
        assert!(evaluate_condition("n == 4", &env));
        assert!(evaluate_condition("n != 5", &env));
        assert!(evaluate_condition("n >= 4", &env));
        assert!(!evaluate_condition("n < 4", &env));
    }

    #[test]
    fn bare_conditions_use_truthiness() {
        let env = env_with(&[
            ("vacio", Value::text("")),
            ("cero", Value::Number(0.0)),
            ("activo", Value::Bool(true)),
        ]);
        assert!(!evaluate_condition("vacio", &env));
        assert!(!evaluate_condition("cero", &env));
        assert!(!evaluate_condition("falso", &env));
        assert!(evaluate_condition("activo", &env));
    }
}
