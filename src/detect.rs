//! Keyword-scoring detection of the application context and the human
//! language a program is written in.
//!
//! Every candidate owns a list of word patterns; its score is the number of
//! matches over the lowercased source. The highest score wins, ties go to
//! the candidate declared first, and a source that matches nothing gets the
//! default (`web`, `es`).

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    #[default]
    Web,
    Mobile,
    Database,
    Blockchain,
    Iot,
    Ai,
    Electronics,
    Cloud,
}

impl Context {
    pub const ALL: [Context; 8] = [
        Context::Web,
        Context::Mobile,
        Context::Database,
        Context::Blockchain,
        Context::Iot,
        Context::Ai,
        Context::Electronics,
        Context::Cloud,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Context::Web => "web",
            Context::Mobile => "mobile",
            Context::Database => "database",
            Context::Blockchain => "blockchain",
            Context::Iot => "iot",
            Context::Ai => "ai",
            Context::Electronics => "electronics",
            Context::Cloud => "cloud",
        }
    }

    fn patterns(&self) -> &'static [&'static str] {
        match self {
            Context::Web => &[
                r"\b(html|css|javascript|dom|browser|navegador|web|website|p[aá]gina)\b",
                r"\b(button|input|form|div|span|header|footer|bot[oó]n|formulario)\b",
                r"\b(click|clic|hover|scroll)\b",
            ],
            Context::Mobile => &[
                r"\b(mobile|m[oó]vil|app|app_movil|mobile_app|aplicaci[oó]n|ios|android)\b",
                r"\b(react.native|flutter|ionic|cordova)\b",
                r"\b(touch|swipe|gesture|notificaci[oó]n|notification|c[aá]mara|foto|gps|ubicaci[oó]n)\b",
            ],
            Context::Database => &[
                r"\b(database|base.datos|base_datos|sql|mysql|postgresql|mongodb)\b",
                r"\b(tabla|table|query|consulta|insert|select|update|delete)\b",
                r"\b(schema|esquema|[ií]ndice|relaci[oó]n|foreign.key)\b",
            ],
            Context::Blockchain => &[
                r"\b(blockchain|ethereum|solana|polygon|smart.contract|contrato|contract)\b",
                r"\b(token|nft|defi|dao|wallet|metamask)\b",
                r"\b(solidity|web3|mint|stake|swap)\b",
            ],
            Context::Iot => &[
                r"\b(iot|arduino|raspberry|raspberry.pi|esp32|sensor|actuador|gpio|led)\b",
                r"\b(pin|digital|analog|pwm|i2c|spi)\b",
                r"\b(temperatura|humedad|luz|movimiento|distancia)\b",
            ],
            Context::Ai => &[
                r"\b(ai|ia|inteligencia.artificial|machine.learning|ml|neural|entrenar|train)\b",
                r"\b(modelo|model|prompt|gpt|llama|predecir|predict)\b",
                r"\b(openai|huggingface|tensorflow|pytorch)\b",
            ],
            Context::Electronics => &[
                r"\b(microcontrolador|microcontroller|fpga|embedded|pic|avr)\b",
                r"\b(circuito|circuit|voltaje|voltage|resistencia|transistor)\b",
            ],
            Context::Cloud => &[
                r"\b(cloud|nube|aws|azure|gcp|serverless|lambda)\b",
                r"\b(bucket|contenedor|container|kubernetes|docker)\b",
            ],
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Context {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if needle == "ai_ml" {
            return Ok(Context::Ai);
        }
        Context::ALL
            .into_iter()
            .find(|context| context.id() == needle)
            .ok_or_else(|| ParseError::Context(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
    Fr,
    It,
    Pt,
    De,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Es,
        Language::En,
        Language::Fr,
        Language::It,
        Language::Pt,
        Language::De,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
            Language::Fr => "fr",
            Language::It => "it",
            Language::Pt => "pt",
            Language::De => "de",
        }
    }

    fn patterns(&self) -> &'static [&'static str] {
        match self {
            Language::Es => &[
                r"\b(mostrar|crear|configurar|usar|ejecutar|preguntar|guardar|leer|convertir|repetir|veces)\b",
                r"\b(si|sino|fin|funci[oó]n|servicio|aplicaci[oó]n)\b",
                r"\b(p[aá]gina|t[ií]tulo|bot[oó]n|formulario|tabla|lista|men[uú]|ventana)\b",
                r"\b(datos|base|consulta|modelo|an[aá]lisis|visualizaci[oó]n)\b",
            ],
            Language::En => &[
                r"\b(show|print|create|configure|use|execute|ask|save|read|repeat|times)\b",
                r"\b(if|else|end|function|service|application)\b",
                r"\b(page|title|button|form|table|list|menu|window)\b",
                r"\b(data|database|query|model|analysis|visualization)\b",
            ],
            Language::Fr => &[
                r"\b(montrer|afficher|cr[ée]er|configurer|utiliser|ex[ée]cuter|fonction)\b",
                r"\b(titre|bouton|formulaire|tableau|liste|fen[êe]tre)\b",
                r"\b(sinon|r[ée]p[ée]ter|fois|demander|lire|vrai|faux)\b",
            ],
            Language::It => &[
                r"\b(mostrare|creare|configurare|usare|eseguire|funzione|servizio)\b",
                r"\b(pulsante|modulo|tabella|finestra)\b",
                r"\b(mostra|chiedi|leggi|ripeti|volte|altrimenti|fine|vero)\b",
            ],
            Language::Pt => &[
                r"\b(mostrar|criar|configurar|usar|executar|fun[çc][ãa]o|servi[çc]o)\b",
                r"\b(bot[ãa]o|formul[áa]rio|tabela|janela)\b",
                r"\b(perguntar|ler|sen[ãa]o|fim|vezes|verdadeiro)\b",
            ],
            Language::De => &[
                r"\b(zeigen|anzeigen|erstellen|konfigurieren|verwenden|ausf[üu]hren|funktion)\b",
                r"\b(seite|schaltfl[äa]che|formular|tabelle|fenster|wenn|sonst)\b",
                r"\b(zeige|frage|lies|wiederhole|ende|wahr|falsch)\b",
            ],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|language| language.code() == needle)
            .ok_or_else(|| ParseError::Language(s.to_string()))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown context `{0}`")]
    Context(String),
    #[error("unknown language `{0}`")]
    Language(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    pub context: Context,
    pub language: Language,
}

pub fn detect(source: &str) -> DetectionResult {
    let lowered = source.to_lowercase();
    DetectionResult {
        context: best_match(context_table(), &lowered).unwrap_or_default(),
        language: best_match(language_table(), &lowered).unwrap_or_default(),
    }
}

pub fn detect_context(source: &str) -> Context {
    best_match(context_table(), &source.to_lowercase()).unwrap_or_default()
}

pub fn detect_language(source: &str) -> Language {
    best_match(language_table(), &source.to_lowercase()).unwrap_or_default()
}

type Table<T> = Vec<(T, Vec<Regex>)>;

fn context_table() -> &'static Table<Context> {
    static TABLE: OnceLock<Table<Context>> = OnceLock::new();
    TABLE.get_or_init(|| {
        Context::ALL
            .into_iter()
            .map(|context| (context, compile(context.patterns())))
            .collect()
    })
}

fn language_table() -> &'static Table<Language> {
    static TABLE: OnceLock<Table<Language>> = OnceLock::new();
    TABLE.get_or_init(|| {
        Language::ALL
            .into_iter()
            .map(|language| (language, compile(language.patterns())))
            .collect()
    })
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(err) => {
                tracing::error!(pattern, error = %err, "invalid detection pattern");
                None
            }
        })
        .collect()
}

/// Highest positive score, first declared on ties.
fn best_match<T: Copy + fmt::Debug>(table: &Table<T>, text: &str) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    for (candidate, patterns) in table {
        let score: usize = patterns
            .iter()
            .map(|pattern| pattern.find_iter(text).count())
            .sum();
        tracing::trace!(?candidate, score, "detection score");
        if score > best.map_or(0, |(_, top)| top) {
            best = Some((*candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}
