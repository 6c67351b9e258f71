use crate::{
    config::ConfigError,
    language::{
        errors::{LoadError, StructuralError},
        program::Program,
    },
    runtime::error::RuntimeError,
};
use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, Clone)]
#[error("{message}")]
#[diagnostic(code(vader::structure))]
pub struct StructuralDiagnostic {
    #[source_code]
    src: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
    message: String,
    label: String,
}

impl StructuralDiagnostic {
    pub fn from_error(src: NamedSource<String>, err: &StructuralError) -> Self {
        Self {
            src,
            span: err.to_source_span(),
            help: Some(err.help()),
            message: err.to_string(),
            label: format!("`{}` opened here", err.kind),
        }
    }
}

fn named_source(program: &Program) -> NamedSource<String> {
    NamedSource::new(program.name(), program.source().to_string())
}

pub fn structural_reports(program: &Program, errors: &[StructuralError]) -> Vec<Report> {
    let src = named_source(program);
    errors
        .iter()
        .map(|err| Report::new(StructuralDiagnostic::from_error(src.clone(), err)))
        .collect()
}

pub fn emit_structural_errors(program: &Program, errors: &[StructuralError]) {
    for report in structural_reports(program, errors) {
        eprintln!("{report:?}");
    }
}

/// Structural failures point into the source; everything else is reported
/// by message alone.
pub fn runtime_report(program: &Program, error: RuntimeError) -> Report {
    match error {
        RuntimeError::Structural(err) => {
            Report::new(StructuralDiagnostic::from_error(named_source(program), &err))
        }
        other => miette::miette!(code = "vader::runtime", "{other}"),
    }
}

pub fn load_report(error: LoadError) -> Report {
    miette::miette!(code = "vader::io", "{error}")
}

pub fn config_report(error: ConfigError) -> Report {
    miette::miette!(
        code = "vader::config",
        help = "see `vader.toml` keys `[run] debug, max_call_depth` and `[build] platform, out_dir`",
        "{error}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::blocks;

    #[test]
    fn structural_report_points_at_opener() {
        let program = Program::from_source("demo.vdr", "mostrar \"a\"\nsi x > 1 entonces\nmostrar \"b\"");
        let errors = blocks::validate(program.lines());
        let reports = structural_reports(&program, &errors);
        assert_eq!(reports.len(), 1);
        let diagnostic = StructuralDiagnostic::from_error(named_source(&program), &errors[0]);
        assert_eq!(diagnostic.span.offset(), 12);
        assert!(diagnostic.message.contains("fin si"));
        assert!(diagnostic.help.as_deref().is_some_and(|h| h.contains("fin si")));
    }

    #[test]
    fn runtime_errors_keep_their_message() {
        let program = Program::from_source("demo.vdr", "");
        let report = runtime_report(
            &program,
            RuntimeError::CallDepthExceeded {
                name: "bucle".into(),
                limit: 4,
            },
        );
        assert!(report.to_string().contains("bucle"));
    }
}
