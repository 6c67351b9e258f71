//! Keyword normalization of programs written in another language.
//!
//! The classifier, the interpreter and the generators only know the
//! Spanish keyword set. A program detected as en/fr/it/pt/de is rewritten
//! phrase by phrase into Spanish before it is validated or run. Matching is
//! case-insensitive on whole words, longer phrases win over their prefixes,
//! and quoted text is never touched.

use crate::detect::{self, Language};
use crate::language::program::Program;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

type Phrases = &'static [(&'static str, &'static str)];

fn phrases(language: Language) -> Phrases {
    match language {
        Language::Es => &[],
        Language::En => &[
            ("show", "mostrar"),
            ("say", "mostrar"),
            ("print", "mostrar"),
            ("display", "mostrar"),
            ("ask", "preguntar"),
            ("save the answer in", "guardar la respuesta en"),
            ("read", "leer"),
            ("convert", "convertir"),
            ("to number", "a numero"),
            ("to text", "a texto"),
            ("to", "a"),
            ("if", "si"),
            ("else if", "sino si"),
            ("else", "sino"),
            ("end if", "fin si"),
            ("repeat", "repetir"),
            ("times", "veces"),
            ("end repeat", "fin repetir"),
            ("function", "funcion"),
            ("end function", "fin funcion"),
            ("create button", "crear boton"),
            ("create title", "crear titulo"),
            ("on click", "al hacer click"),
            ("is equal to", "es igual a"),
            ("is greater than", "es mayor que"),
            ("is less than", "es menor que"),
            ("true", "verdadero"),
            ("false", "falso"),
            ("take photo", "tomar foto"),
            ("get location", "obtener ubicacion"),
            ("send http", "enviar http"),
            ("data", "datos"),
        ],
        Language::Fr => &[
            ("afficher", "mostrar"),
            ("montrer", "mostrar"),
            ("demander", "preguntar"),
            ("enregistrer la réponse dans", "guardar la respuesta en"),
            ("lire", "leer"),
            ("en nombre", "a numero"),
            ("en texte", "a texto"),
            ("sinon si", "sino si"),
            ("sinon", "sino"),
            ("répéter", "repetir"),
            ("repeter", "repetir"),
            ("fois", "veces"),
            ("fonction", "funcion"),
            ("créer bouton", "crear boton"),
            ("créer titre", "crear titulo"),
            ("au clic", "al hacer click"),
            ("est égal à", "es igual a"),
            ("est supérieur à", "es mayor que"),
            ("est inférieur à", "es menor que"),
            ("vrai", "verdadero"),
            ("faux", "falso"),
            ("prendre photo", "tomar foto"),
            ("obtenir position", "obtener ubicacion"),
            ("envoyer http", "enviar http"),
            ("à", "a"),
            ("données", "datos"),
        ],
        Language::It => &[
            ("mostra", "mostrar"),
            ("chiedi", "preguntar"),
            ("salva la risposta in", "guardar la respuesta en"),
            ("leggi", "leer"),
            ("converti", "convertir"),
            ("a testo", "a texto"),
            ("se", "si"),
            ("altrimenti se", "sino si"),
            ("altrimenti", "sino"),
            ("fine se", "fin si"),
            ("ripeti", "repetir"),
            ("volte", "veces"),
            ("fine ripeti", "fin repetir"),
            ("funzione", "funcion"),
            ("fine funzione", "fin funcion"),
            ("crea pulsante", "crear boton"),
            ("crea titolo", "crear titulo"),
            ("al clic", "al hacer click"),
            ("è uguale a", "es igual a"),
            ("è maggiore di", "es mayor que"),
            ("è minore di", "es menor que"),
            ("vero", "verdadero"),
            ("scatta foto", "tomar foto"),
            ("ottieni posizione", "obtener ubicacion"),
            ("invia http", "enviar http"),
            ("dati", "datos"),
        ],
        Language::Pt => &[
            ("perguntar", "preguntar"),
            ("guardar a resposta em", "guardar la respuesta en"),
            ("ler", "leer"),
            ("converter", "convertir"),
            ("para número", "a numero"),
            ("para numero", "a numero"),
            ("para texto", "a texto"),
            ("se", "si"),
            ("senão se", "sino si"),
            ("senão", "sino"),
            ("fim se", "fin si"),
            ("vezes", "veces"),
            ("fim repetir", "fin repetir"),
            ("função", "funcion"),
            ("fim função", "fin funcion"),
            ("criar botão", "crear boton"),
            ("criar título", "crear titulo"),
            ("ao clicar", "al hacer click"),
            ("é igual a", "es igual a"),
            ("é maior que", "es mayor que"),
            ("é menor que", "es menor que"),
            ("verdadeiro", "verdadero"),
            ("tirar foto", "tomar foto"),
            ("obter localização", "obtener ubicacion"),
            ("dados", "datos"),
        ],
        Language::De => &[
            ("zeige", "mostrar"),
            ("anzeigen", "mostrar"),
            ("frage", "preguntar"),
            ("speichere die antwort in", "guardar la respuesta en"),
            ("lies", "leer"),
            ("konvertiere", "convertir"),
            ("zu zahl", "a numero"),
            ("zu text", "a texto"),
            ("wenn", "si"),
            ("sonst wenn", "sino si"),
            ("sonst", "sino"),
            ("ende wenn", "fin si"),
            ("wiederhole", "repetir"),
            ("mal", "veces"),
            ("ende wiederhole", "fin repetir"),
            ("funktion", "funcion"),
            ("ende funktion", "fin funcion"),
            ("erstelle knopf", "crear boton"),
            ("erstelle titel", "crear titulo"),
            ("beim klick", "al hacer click"),
            ("ist gleich", "es igual a"),
            ("ist größer als", "es mayor que"),
            ("ist kleiner als", "es menor que"),
            ("wahr", "verdadero"),
            ("falsch", "falso"),
            ("mache foto", "tomar foto"),
            ("hole standort", "obtener ubicacion"),
            ("sende http", "enviar http"),
            ("an", "a"),
            ("daten", "datos"),
        ],
    }
}

/// One alternation per language, longest phrase first, so `end if` is
/// matched before `if`.
struct Translator {
    pattern: Regex,
    spanish: HashMap<String, &'static str>,
}

impl Translator {
    fn new(language: Language) -> Option<Self> {
        let mut ordered = phrases(language).to_vec();
        if ordered.is_empty() {
            return None;
        }
        ordered.sort_by_key(|(foreign, _)| std::cmp::Reverse(foreign.chars().count()));
        let alternation = ordered
            .iter()
            .map(|(foreign, _)| {
                foreign
                    .split(' ')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect::<Vec<_>>()
            .join("|");
        let pattern = match Regex::new(&format!(r"(?i)\b(?:{alternation})\b")) {
            Ok(pattern) => pattern,
            Err(err) => {
                tracing::error!(%language, error = %err, "invalid keyword table");
                return None;
            }
        };
        let spanish = ordered
            .into_iter()
            .map(|(foreign, spanish)| (foreign.to_lowercase(), spanish))
            .collect();
        Some(Self { pattern, spanish })
    }

    fn rewrite<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(text, |caps: &Captures| {
            let found = &caps[0];
            let key = found
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            match self.spanish.get(&key) {
                Some(spanish) => spanish.to_string(),
                None => found.to_string(),
            }
        })
    }
}

fn translator(language: Language) -> Option<&'static Translator> {
    static TABLE: OnceLock<Vec<(Language, Translator)>> = OnceLock::new();
    TABLE
        .get_or_init(|| {
            Language::ALL
                .into_iter()
                .filter_map(|language| Some((language, Translator::new(language)?)))
                .collect()
        })
        .iter()
        .find(|(candidate, _)| *candidate == language)
        .map(|(_, translator)| translator)
}

/// Rewrites the unquoted parts of one line into Spanish keywords.
pub fn normalize_line(text: &str, language: Language) -> Cow<'_, str> {
    let Some(translator) = translator(language) else {
        return Cow::Borrowed(text);
    };
    let mut out = String::with_capacity(text.len());
    for (index, segment) in text.split('"').enumerate() {
        if index > 0 {
            out.push('"');
        }
        if index % 2 == 0 {
            out.push_str(&translator.rewrite(segment));
        } else {
            out.push_str(segment);
        }
    }
    if out == text {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(out)
    }
}

pub fn normalize_source(source: &str, language: Language) -> Cow<'_, str> {
    if translator(language).is_none() {
        return Cow::Borrowed(source);
    }
    Cow::Owned(
        source
            .split('\n')
            .map(|line| normalize_line(line, language))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Detects the program's language and, unless it is Spanish, returns a copy
/// whose lines use Spanish keywords. Line numbers and spans still point into
/// the original source.
pub fn normalize_program(program: &Program) -> Cow<'_, Program> {
    let language = detect::detect_language(program.source());
    if translator(language).is_none() {
        return Cow::Borrowed(program);
    }
    tracing::debug!(program = program.name(), %language, "normalizing keywords to es");
    Cow::Owned(program.map_lines(|line| {
        if line.is_code() {
            normalize_line(&line.text, language).into_owned()
        } else {
            line.text.clone()
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_control_flow() {
        assert_eq!(
            normalize_line("if x is greater than 3", Language::En),
            "si x es mayor que 3"
        );
        assert_eq!(normalize_line("End If", Language::En), "fin si");
        assert_eq!(normalize_line("else if x > 1", Language::En), "sino si x > 1");
        assert_eq!(normalize_line("else", Language::En), "sino");
        assert_eq!(normalize_line("repeat 3 times", Language::En), "repetir 3 veces");
        assert_eq!(normalize_line("end   repeat", Language::En), "fin repetir");
    }

    #[test]
    fn quoted_text_is_untouched() {
        assert_eq!(
            normalize_line("show \"if you repeat it\" + name", Language::En),
            "mostrar \"if you repeat it\" + name"
        );
        assert_eq!(
            normalize_line("ask \"Name?\" save the answer in name", Language::En),
            "preguntar \"Name?\" guardar la respuesta en name"
        );
    }

    #[test]
    fn identifiers_containing_keywords_are_kept() {
        assert_eq!(normalize_line("shown = total", Language::En), "shown = total");
        assert!(matches!(
            normalize_line("x = 1", Language::En),
            Cow::Borrowed("x = 1")
        ));
    }

    #[test]
    fn other_languages() {
        assert_eq!(
            normalize_line("sinon si x est égal à 2", Language::Fr),
            "sino si x es igual a 2"
        );
        assert_eq!(normalize_line("fine ripeti", Language::It), "fin repetir");
        assert_eq!(normalize_line("senão", Language::Pt), "sino");
        assert_eq!(
            normalize_line("wenn x ist größer als 3", Language::De),
            "si x es mayor que 3"
        );
        assert_eq!(normalize_line("wiederhole 2 mal", Language::De), "repetir 2 veces");
    }

    #[test]
    fn spanish_is_borrowed() {
        let program = Program::from_source("es.vdr", "si x > 1\nmostrar x\nfin si");
        assert!(matches!(normalize_program(&program), Cow::Borrowed(_)));
        assert!(matches!(
            normalize_source("mostrar 1", Language::Es),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn english_program_keeps_numbers_and_comments() {
        let program = Program::from_source("en.vdr", "# show me\nshow 1\n\nrepeat 2 times\nshow 2\nend repeat");
        let normalized = normalize_program(&program);
        let lines = normalized.lines();
        assert_eq!(lines[0].text, "# show me");
        assert_eq!(lines[1].text, "mostrar 1");
        assert_eq!(lines[3].text, "repetir 2 veces");
        assert_eq!(lines[5].number, 6);
        assert_eq!(lines[5].span, program.lines()[5].span);
        assert_eq!(lines[5].text, "fin repetir");
        assert_eq!(normalized.source(), program.source());
    }
}
