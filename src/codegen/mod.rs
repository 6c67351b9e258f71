//! Transpiled mode: a registry of per-platform emitters.
//!
//! Emitters do not interpret the program. They receive the source, the
//! detected context and language, a generation timestamp and a shallow
//! keyword scan (`SourceFeatures`), and return target text. Adding a
//! platform means registering one function.

pub mod emitters;

use crate::detect::{Context, Language};
use crate::language::{
    classifier,
    command::{Command, Widget},
};
use crate::target::Platform;
use crate::translate;
use chrono::{SecondsFormat, Utc};
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub type Emitter = Arc<dyn Fn(&EmitRequest<'_>) -> String + Send + Sync>;

const FALLBACK_PLATFORM: Platform = Platform::Web;
const CUSTOM_EXTENSION: &str = "txt";

/// Everything an emitter may look at.
#[derive(Clone, Debug)]
pub struct EmitRequest<'a> {
    pub source: &'a str,
    pub context: Context,
    pub language: Language,
    pub generated_at: &'a str,
    pub features: SourceFeatures,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonSpec {
    pub label: String,
    pub action: Option<String>,
}

/// Keyword scan of the source, line by line. Lines are classified but no
/// block structure is resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceFeatures {
    pub title: Option<String>,
    pub buttons: Vec<ButtonSpec>,
    pub messages: Vec<String>,
    pub asks_input: bool,
}

impl SourceFeatures {
    pub fn scan(source: &str) -> Self {
        let mut features = SourceFeatures::default();
        for line in source.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(title) = page_title(line) {
                features.set_title(title);
                continue;
            }
            match classifier::parse_command(line) {
                Command::Widget(Widget::Title { text }) => features.set_title(text),
                Command::Widget(Widget::Button { label, action }) => {
                    features.buttons.push(ButtonSpec { label, action });
                }
                Command::Display { expr } => {
                    if let Some(message) = quoted(&expr) {
                        features.messages.push(message.to_string());
                    }
                }
                Command::Ask { .. } | Command::Read { .. } => features.asks_input = true,
                _ => {}
            }
        }
        features
    }

    fn set_title(&mut self, title: String) {
        if self.title.is_none() {
            self.title = Some(title);
        }
    }

    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }
}

/// `pagina "Título"`, the page declaration of web programs.
fn page_title(line: &str) -> Option<String> {
    static PAGE: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = PAGE
        .get_or_init(|| Regex::new(r#"^p[aá]gina\s+"([^"]+)""#).ok())
        .as_ref()?;
    regex
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|title| title.as_str().to_string())
}

fn quoted(expr: &str) -> Option<&str> {
    let inner = expr.strip_prefix('"')?.strip_suffix('"')?;
    (!inner.contains('"')).then_some(inner)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationArtifact {
    pub platform: String,
    pub text: String,
    pub extension: String,
}

impl GenerationArtifact {
    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension)
    }
}

struct Registration {
    emitter: Emitter,
    extension: String,
}

pub struct Generator {
    emitters: HashMap<String, Registration>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::with_builtin_emitters()
    }
}

impl Generator {
    pub fn empty() -> Self {
        Self {
            emitters: HashMap::new(),
        }
    }

    pub fn with_builtin_emitters() -> Self {
        let mut generator = Self::empty();
        emitters::register_builtin(&mut generator);
        generator
    }

    /// Registers or replaces the emitter for `id`. Known platform ids keep
    /// their usual extension; other ids produce `.txt` artifacts.
    pub fn register<F>(&mut self, id: impl Into<String>, emitter: F)
    where
        F: Fn(&EmitRequest<'_>) -> String + Send + Sync + 'static,
    {
        let id = id.into();
        let extension = id
            .parse::<Platform>()
            .map(|platform| platform.extension())
            .unwrap_or(CUSTOM_EXTENSION)
            .to_string();
        self.emitters.insert(
            id,
            Registration {
                emitter: Arc::new(emitter),
                extension,
            },
        );
    }

    pub fn platforms(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.emitters.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn generate(
        &self,
        source: &str,
        platform_id: &str,
        context: Context,
        language: Language,
    ) -> GenerationArtifact {
        let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.generate_at(source, platform_id, context, language, &generated_at)
    }

    /// Same as `generate` with a fixed timestamp, so output is a pure
    /// function of the arguments.
    pub fn generate_at(
        &self,
        source: &str,
        platform_id: &str,
        context: Context,
        language: Language,
        generated_at: &str,
    ) -> GenerationArtifact {
        let (id, registration) = match self.lookup(platform_id) {
            Some(found) => found,
            None => {
                tracing::warn!(platform = platform_id, "no emitter registered, generating empty artifact");
                return GenerationArtifact {
                    platform: FALLBACK_PLATFORM.id().to_string(),
                    text: String::new(),
                    extension: FALLBACK_PLATFORM.extension().to_string(),
                };
            }
        };
        let request = EmitRequest {
            source,
            context,
            language,
            generated_at,
            features: SourceFeatures::scan(&translate::normalize_source(source, language)),
        };
        tracing::debug!(platform = id, %context, %language, "generating");
        GenerationArtifact {
            platform: id.to_string(),
            text: (registration.emitter)(&request),
            extension: registration.extension.clone(),
        }
    }

    /// Canonical id of a known platform (or the raw id for custom
    /// emitters), then the web emitter.
    fn lookup<'a>(&'a self, platform_id: &str) -> Option<(&'a str, &'a Registration)> {
        let canonical = platform_id
            .parse::<Platform>()
            .map(|platform| platform.id().to_string())
            .unwrap_or_else(|_| platform_id.trim().to_string());
        if let Some((id, registration)) = self.emitters.get_key_value(&canonical) {
            return Some((id.as_str(), registration));
        }
        tracing::warn!(platform = platform_id, "unknown platform, falling back to web");
        self.emitters
            .get_key_value(FALLBACK_PLATFORM.id())
            .map(|(id, registration)| (id.as_str(), registration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAMP: &str = "2024-01-01T00:00:00Z";

    const APP: &str = "pagina \"Mi Tienda\"\nmostrar \"Bienvenido\"\ncrear boton \"Comprar\" al hacer click mostrar \"Gracias\"\ncrear boton \"Salir\"\npreguntar \"¿Nombre?\" guardar la respuesta en nombre";

    #[test]
    fn scans_features() {
        let features = SourceFeatures::scan(APP);
        assert_eq!(features.title.as_deref(), Some("Mi Tienda"));
        assert_eq!(features.messages, vec!["Bienvenido"]);
        assert_eq!(
            features.buttons,
            vec![
                ButtonSpec {
                    label: "Comprar".into(),
                    action: Some("mostrar \"Gracias\"".into())
                },
                ButtonSpec {
                    label: "Salir".into(),
                    action: None
                },
            ]
        );
        assert!(features.asks_input);
    }

    #[test]
    fn generation_is_deterministic_for_a_fixed_timestamp() {
        let generator = Generator::with_builtin_emitters();
        for platform in Platform::ALL {
            let first = generator.generate_at(APP, platform.id(), Context::Web, Language::Es, STAMP);
            let second = generator.generate_at(APP, platform.id(), Context::Web, Language::Es, STAMP);
            assert_eq!(first, second, "{platform}");
            assert_eq!(first.platform, platform.id());
            assert_eq!(first.extension, platform.extension());
            assert!(!first.text.is_empty(), "{platform}");
        }
    }

    #[test]
    fn unknown_platform_falls_back_to_web() {
        let generator = Generator::default();
        let artifact = generator.generate_at("mostrar 1", "cobol", Context::Web, Language::Es, STAMP);
        assert_eq!(artifact.platform, "web");
        assert_eq!(artifact.extension, "html");
        assert!(artifact.text.starts_with("<!DOCTYPE html>"));
        assert_eq!(artifact.file_name("app"), "app.html");
    }

    #[test]
    fn platform_ids_are_normalised() {
        let generator = Generator::default();
        let artifact = generator.generate_at("", "React_Native", Context::Mobile, Language::Es, STAMP);
        assert_eq!(artifact.platform, "react-native");
        assert_eq!(artifact.extension, "jsx");
    }

    #[test]
    fn button_actions_add_a_handler() {
        let generator = Generator::default();
        let with_action = generator.generate_at(APP, "web", Context::Web, Language::Es, STAMP);
        assert!(with_action.text.contains("function accion_1()"));
        assert!(with_action.text.contains("onclick=\"accion_1()\""));

        let plain = generator.generate_at(
            "crear boton \"Salir\"",
            "web",
            Context::Web,
            Language::Es,
            STAMP,
        );
        assert!(!plain.text.contains("function accion_"));
    }

    #[test]
    fn english_keywords_are_scanned() {
        let generator = Generator::default();
        let artifact = generator.generate_at(
            "create title \"Shop\"\nshow \"Welcome\"\ncreate button \"Buy\" on click show \"thanks\"",
            "web",
            Context::Web,
            Language::En,
            STAMP,
        );
        assert!(artifact.text.contains("<h1>Shop</h1>"));
        assert!(artifact.text.contains("<p>Welcome</p>"));
        assert!(artifact.text.contains("onclick=\"accion_1()\""));
        assert!(artifact.text.contains("thanks"));
    }

    #[test]
    fn timestamp_is_embedded() {
        let generator = Generator::default();
        let artifact = generator.generate_at(APP, "iot", Context::Iot, Language::Es, STAMP);
        assert!(artifact.text.contains(STAMP));
    }

    #[test]
    fn custom_emitters_can_be_registered() {
        let mut generator = Generator::empty();
        generator.register("svelte", |request: &EmitRequest<'_>| {
            format!("<h1>{}</h1>", request.features.title_or("App"))
        });
        generator.register("web", |_: &EmitRequest<'_>| "web".to_string());
        let artifact = generator.generate_at("crear titulo \"Hola\"", "svelte", Context::Web, Language::Es, STAMP);
        assert_eq!(artifact.text, "<h1>Hola</h1>");
        assert_eq!(artifact.extension, "txt");
        assert_eq!(generator.platforms(), vec!["svelte", "web"]);
    }

    #[test]
    fn empty_registry_produces_empty_artifact() {
        let generator = Generator::empty();
        let artifact = generator.generate_at("mostrar 1", "web", Context::Web, Language::Es, STAMP);
        assert!(artifact.text.is_empty());
        assert_eq!(artifact.platform, "web");
    }
}
