use crate::language::{errors::LoadError, span::Span};
use std::{fs, path::Path};

pub const SOURCE_EXTENSION: &str = "vdr";

/// One source line, trimmed, with its 1-based number and byte span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub text: String,
    pub span: Span,
}

impl Line {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let span = Span::new(0, text.len());
        Self { number, text, span }
    }

    /// Blank lines and `#` comments carry no command.
    pub fn is_code(&self) -> bool {
        !self.text.is_empty() && !self.text.starts_with('#')
    }
}

/// An immutable `.vdr` program. Lines keep their position in the file even
/// when they are blank or comments, so diagnostics point at the real line.
#[derive(Clone, Debug)]
pub struct Program {
    name: String,
    source: String,
    lines: Vec<Line>,
}

impl Program {
    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let mut lines = Vec::new();
        let mut offset = 0usize;
        for (index, raw) in source.split('\n').enumerate() {
            let without_cr = raw.strip_suffix('\r').unwrap_or(raw);
            let leading = without_cr.len() - without_cr.trim_start().len();
            let text = without_cr.trim();
            let start = offset + leading;
            lines.push(Line {
                number: index + 1,
                text: text.to_string(),
                span: Span::new(start, start + text.len()),
            });
            offset += raw.len() + 1;
        }
        if lines.last().is_some_and(|line| line.text.is_empty()) && source.ends_with('\n') {
            lines.pop();
        }
        Self {
            name: name.into(),
            source,
            lines,
        }
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let source = fs::read_to_string(path).map_err(|error| LoadError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        if path.extension().map(|ext| ext != SOURCE_EXTENSION).unwrap_or(true) {
            tracing::warn!(path = %path.display(), "source file does not use the .vdr extension");
        }
        Ok(Self::from_source(path.display().to_string(), source))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Copy with every line's text rewritten. Numbers, spans and the
    /// original source are kept, so diagnostics still point at the file.
    pub fn map_lines(&self, mut rewrite: impl FnMut(&Line) -> String) -> Program {
        let lines = self
            .lines
            .iter()
            .map(|line| Line {
                number: line.number,
                text: rewrite(line),
                span: line.span,
            })
            .collect();
        Program {
            name: self.name.clone(),
            source: self.source.clone(),
            lines,
        }
    }
}
