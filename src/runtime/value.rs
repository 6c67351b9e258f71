use std::fmt;

/// Runtime value of the interpreter. Coercions between the three variants
/// are explicit: use `to_number`, `to_boolean` or `Display`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
}

const FALSE_WORDS: [&str; 2] = ["falso", "false"];

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    /// Numeric view of the value. Text that is not a numeral becomes NaN,
    /// empty text becomes zero.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    parse_numeral(trimmed).unwrap_or(f64::NAN)
                }
            }
        }
    }

    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => {
                !s.is_empty() && !FALSE_WORDS.iter().any(|word| s.eq_ignore_ascii_case(word))
            }
        }
    }

    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// Weak equality: values of the same variant compare directly, mixed
    /// variants compare numerically, so `5` equals `"5"`.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            _ => self.to_number() == other.to_number(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Text(s) => write!(f, "{s}"),
            Value::Bool(true) => write!(f, "verdadero"),
            Value::Bool(false) => write!(f, "falso"),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// Parses a complete decimal numeral. Rejects the `inf`/`nan` spellings
/// that `f64::from_str` would otherwise accept.
pub fn parse_numeral(text: &str) -> Option<f64> {
    let text = text.trim();
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    let starts_numeric = digits
        .chars()
        .next()
        .map(|ch| ch.is_ascii_digit() || ch == '.')
        .unwrap_or(false);
    if !starts_numeric {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Longest numeric prefix of `text`, the lenient reading used by
/// `convertir ... a numero`.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let mut best = None;
    for (index, ch) in text.char_indices() {
        if !(ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | 'e' | 'E')) {
            break;
        }
        if let Some(value) = parse_numeral(&text[..index + ch.len_utf8()]) {
            best = Some(value);
        }
    }
    best
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
