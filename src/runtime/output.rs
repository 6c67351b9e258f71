use std::fmt;

/// Something the program emitted, in program order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputEvent {
    Text(String),
    Title(String),
    Button {
        label: String,
        action: Option<String>,
    },
    Diagnostic(String),
}

impl fmt::Display for OutputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputEvent::Text(text) => write!(f, "{text}"),
            OutputEvent::Title(text) => write!(f, "# {text}"),
            OutputEvent::Button { label, .. } => write!(f, "[{label}]"),
            OutputEvent::Diagnostic(message) => write!(f, "Error: {message}"),
        }
    }
}

/// Append-only record of everything a run emitted, rendered as strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: &OutputEvent) {
        self.lines.push(event.to_string());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
