//! Forward-scanning block resolution.
//!
//! A block opened on line `start` ends at the FIRST line after it that is
//! exactly its terminator. Nesting depth is not tracked: an inner block's
//! `fin si` also closes the outer `si`, and an inner `sino` is taken as a
//! branch of the outer conditional. Nested blocks of the same kind
//! therefore do not behave like nested blocks. The intended upgrade is a
//! one-time parse into a tree of If/Loop/FunctionDef nodes; until then,
//! programs rely on first-terminator-wins.

use crate::language::{
    classifier::{self, ELSE, ELSE_IF_PREFIX},
    command::Command,
    errors::{BlockKind, StructuralError},
    program::Line,
};
use std::collections::HashMap;
use std::rc::Rc;

/// Function name to captured body lines.
pub type FunctionTable = HashMap<String, Rc<[Line]>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    pub index: usize,
    /// `None` for `sino`, the condition text for `sino si`.
    pub condition: Option<String>,
}

/// Resolution of one block, with indices into the scanned line slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub start: usize,
    pub end: usize,
    pub branches: Vec<Branch>,
}

impl Block {
    pub fn body(&self) -> std::ops::Range<usize> {
        self.start + 1..self.end
    }
}

pub fn find_block_end(
    lines: &[Line],
    start: usize,
    kind: BlockKind,
) -> Result<Block, StructuralError> {
    let close = kind.terminator();
    let mut branches = Vec::new();
    for (index, line) in lines.iter().enumerate().skip(start + 1) {
        let text = line.text.as_str();
        if text == close {
            return Ok(Block {
                kind,
                start,
                end: index,
                branches,
            });
        }
        if kind != BlockKind::Conditional {
            continue;
        }
        if text == ELSE {
            branches.push(Branch {
                index,
                condition: None,
            });
        } else if let Some(condition) = text.strip_prefix(ELSE_IF_PREFIX) {
            branches.push(Branch {
                index,
                condition: Some(condition.trim().to_string()),
            });
        }
    }
    let opener = &lines[start];
    Err(StructuralError {
        kind,
        line: opener.number,
        text: opener.text.clone(),
        span: opener.span,
    })
}

pub fn block_kind(command: &Command) -> Option<BlockKind> {
    match command {
        Command::Conditional { .. } => Some(BlockKind::Conditional),
        Command::Loop { .. } => Some(BlockKind::Loop),
        Command::FunctionDef { .. } => Some(BlockKind::FunctionDef),
        _ => None,
    }
}

/// Checks every block opener for a reachable terminator, so a broken
/// program fails before any of it runs. A function body runs as its own
/// slice when called, so each body is checked again on its own; errors come
/// back once each, ordered by line.
pub fn validate(lines: &[Line]) -> Vec<StructuralError> {
    let mut errors = Vec::new();
    validate_into(lines, &mut errors);
    errors.sort_by_key(|err| err.line);
    errors
}

fn validate_into(lines: &[Line], errors: &mut Vec<StructuralError>) {
    for (index, line) in lines.iter().enumerate() {
        if !line.is_code() {
            continue;
        }
        let Some(kind) = block_kind(&classifier::parse_command(&line.text)) else {
            continue;
        };
        match find_block_end(lines, index, kind) {
            Ok(block) if kind == BlockKind::FunctionDef => {
                validate_into(&lines[block.body()], errors);
            }
            Ok(_) => {}
            Err(err) => {
                if !errors.contains(&err) {
                    errors.push(err);
                }
            }
        }
    }
}

/// First pass: captures every `funcion NAME ... fin funcion` body. Bodies
/// are skipped while scanning; `validate` has already rejected definitions
/// nested inside a body.
pub fn collect_functions(lines: &[Line]) -> Result<FunctionTable, StructuralError> {
    let mut table = FunctionTable::new();
    let mut index = 0;
    while index < lines.len() {
        let line = &lines[index];
        if let Command::FunctionDef { name } = classifier::parse_command(&line.text) {
            let block = find_block_end(lines, index, BlockKind::FunctionDef)?;
            table.insert(name, Rc::from(&lines[block.body()]));
            index = block.end + 1;
        } else {
            index += 1;
        }
    }
    Ok(table)
}
