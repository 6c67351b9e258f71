pub mod cloud;
pub mod contracts;
pub mod data;
pub mod devices;
pub mod frameworks;
pub mod mobile;
pub mod web;

use crate::codegen::{ButtonSpec, EmitRequest, Generator};
use crate::target::Platform;

pub const DEFAULT_TITLE: &str = "Vader App";

pub fn register_builtin(generator: &mut Generator) {
    generator.register(Platform::Web.id(), web::page);
    generator.register(Platform::React.id(), frameworks::react);
    generator.register(Platform::Vue.id(), frameworks::vue);
    generator.register(Platform::Node.id(), frameworks::node);
    generator.register(Platform::Express.id(), frameworks::express);
    generator.register(Platform::ReactNative.id(), mobile::react_native);
    generator.register(Platform::Flutter.id(), mobile::flutter);
    generator.register(Platform::Ios.id(), mobile::ios);
    generator.register(Platform::Android.id(), mobile::android);
    generator.register(Platform::Blockchain.id(), contracts::solidity);
    generator.register(Platform::Iot.id(), devices::arduino);
    generator.register(Platform::Electronics.id(), devices::microcontroller);
    generator.register(Platform::Database.id(), data::schema);
    generator.register(Platform::AiMl.id(), data::model);
    generator.register(Platform::Cloud.id(), cloud::lambda);
}

/// One-line provenance note, in the target's line-comment syntax.
pub(crate) fn banner(comment: &str, request: &EmitRequest<'_>) -> String {
    format!(
        "{comment} Generado por Vader ({}, {}) el {}",
        request.context, request.language, request.generated_at
    )
}

/// Name of the generated click handler of the `index`th button.
pub(crate) fn handler_name(index: usize) -> String {
    format!("accion_{}", index + 1)
}

/// Buttons that declared an `al hacer click` action, with their position.
pub(crate) fn actionable(buttons: &[ButtonSpec]) -> impl Iterator<Item = (usize, &ButtonSpec, &str)> {
    buttons
        .iter()
        .enumerate()
        .filter_map(|(index, button)| Some((index, button, button.action.as_deref()?)))
}

/// Text shown by a click action. `mostrar "x"` shows `x`, anything else is
/// shown verbatim.
pub(crate) fn action_message(action: &str) -> &str {
    action
        .strip_prefix("mostrar ")
        .map(str::trim)
        .and_then(|expr| expr.strip_prefix('"')?.strip_suffix('"'))
        .unwrap_or(action)
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Double-quoted string literal valid in JS, Swift, C, Solidity and
/// Python.
pub(crate) fn string_literal(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            '\n' => literal.push_str("\\n"),
            _ => literal.push(ch),
        }
    }
    literal.push('"');
    literal
}

/// `string_literal` for languages with `$` interpolation (Dart, Kotlin).
pub(crate) fn template_safe_literal(text: &str) -> String {
    string_literal(text).replace('$', "\\$")
}

/// Lowercase identifier made of ASCII letters, digits and underscores.
pub(crate) fn identifier(text: &str, fallback: &str) -> String {
    let mut ident = String::new();
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            ident.push(ch.to_ascii_lowercase());
        } else if !ident.ends_with('_') && !ident.is_empty() {
            ident.push('_');
        }
    }
    let ident = ident.trim_end_matches('_').to_string();
    match ident.chars().next() {
        None => fallback.to_string(),
        Some(first) if first.is_ascii_digit() => format!("{fallback}_{ident}"),
        Some(_) => ident,
    }
}
