use crate::language::span::Span;
use miette::SourceSpan;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of block a control-flow keyword opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Conditional,
    Loop,
    FunctionDef,
}

impl BlockKind {
    pub fn opener(&self) -> &'static str {
        match self {
            BlockKind::Conditional => "si",
            BlockKind::Loop => "repetir",
            BlockKind::FunctionDef => "funcion",
        }
    }

    pub fn terminator(&self) -> &'static str {
        match self {
            BlockKind::Conditional => "fin si",
            BlockKind::Loop => "fin repetir",
            BlockKind::FunctionDef => "fin funcion",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opener())
    }
}

/// A block opener with no reachable terminator.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("`{kind}` on line {line} has no matching `{}`", .kind.terminator())]
pub struct StructuralError {
    pub kind: BlockKind,
    pub line: usize,
    pub text: String,
    pub span: Span,
}

impl StructuralError {
    pub fn help(&self) -> String {
        format!(
            "add `{}` after the block body; blocks close at the first terminator found, nesting is not tracked",
            self.kind.terminator()
        )
    }

    pub fn to_source_span(&self) -> SourceSpan {
        self.span.into()
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
}
