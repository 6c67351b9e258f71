//! Ordered keyword-prefix classification of single `.vdr` lines.
//!
//! Prefixes are tried in a fixed priority order and the first match wins:
//! display, assignment, ask, read, convert, conditional, function
//! definition, loop, block markers, call by name, widget, device, and
//! finally `Unrecognized`. Assignment sits right after display so that
//! `mostrar x = y` stays a display command, while any other line with a
//! bare `=` (outside a comparison phrase) is an assignment.

use crate::language::command::{Command, CommandKind, Conversion, DeviceRequest, Marker, Widget};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{space0, space1},
    combinator::{all_consuming, opt, rest},
    sequence::{delimited, preceded, tuple},
    IResult,
};

pub const ELSE: &str = "sino";
pub const ELSE_IF_PREFIX: &str = "sino si ";
pub const END_IF: &str = "fin si";
pub const END_LOOP: &str = "fin repetir";
pub const END_FUNCTION: &str = "fin funcion";

const DISPLAY: &str = "mostrar ";
const ASK: &str = "preguntar ";
const READ: &str = "leer ";
const CONVERT: &str = "convertir ";
const CONDITIONAL: &str = "si ";
const FUNCTION: &str = "funcion ";
const LOOP: &str = "repetir ";
const LOOP_SUFFIX: &str = " veces";
const CREATE: &str = "crear ";

const COMPARISONS: [&str; 7] = [
    "==",
    "!=",
    ">=",
    "<=",
    " es igual a ",
    " es mayor que ",
    " es menor que ",
];

pub fn classify(line: &str) -> CommandKind {
    parse_command(line).kind()
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();

    if let Some(expr) = line.strip_prefix(DISPLAY) {
        return Command::Display {
            expr: expr.trim().to_string(),
        };
    }

    if line.contains('=') && !has_comparison_operator(line) {
        if let Some((name, expr)) = line.split_once('=') {
            return Command::Assign {
                name: name.trim().to_string(),
                expr: expr.trim().to_string(),
            };
        }
    }

    if line.starts_with(ASK) {
        return match ask(line) {
            Ok((_, (prompt, target))) => Command::Ask {
                prompt: prompt.to_string(),
                target: target.map(str::to_string),
            },
            Err(_) => Command::Unrecognized,
        };
    }

    if let Some(target) = line.strip_prefix(READ) {
        let target = target.trim();
        return if target.is_empty() {
            Command::Unrecognized
        } else {
            Command::Read {
                target: target.to_string(),
            }
        };
    }

    if line.starts_with(CONVERT) {
        return match convert(line) {
            Ok((_, (name, to))) => Command::Convert {
                name: name.to_string(),
                to,
            },
            Err(_) => Command::Unrecognized,
        };
    }

    if let Some(condition) = line.strip_prefix(CONDITIONAL) {
        return Command::Conditional {
            condition: condition.trim().to_string(),
        };
    }

    if let Some(name) = line.strip_prefix(FUNCTION) {
        return Command::FunctionDef {
            name: name.trim().to_string(),
        };
    }

    if let Some(count) = line
        .strip_prefix(LOOP)
        .and_then(|body| body.strip_suffix(LOOP_SUFFIX))
    {
        return Command::Loop {
            count: count.trim().to_string(),
        };
    }

    if let Some(marker) = block_marker(line) {
        return Command::BlockMarker(marker);
    }

    if is_bare_name(line) {
        return Command::Call {
            name: line.to_string(),
        };
    }

    if line.starts_with(CREATE) {
        return match widget(line) {
            Ok((_, widget)) => Command::Widget(widget),
            Err(_) => Command::Unrecognized,
        };
    }

    if let Ok((_, request)) = device(line) {
        return Command::Device(request);
    }

    Command::Unrecognized
}

pub fn has_comparison_operator(line: &str) -> bool {
    COMPARISONS.iter().any(|op| line.contains(op))
}

pub fn block_marker(line: &str) -> Option<Marker> {
    match line {
        ELSE => Some(Marker::Else),
        END_IF => Some(Marker::EndIf),
        END_LOOP => Some(Marker::EndLoop),
        END_FUNCTION => Some(Marker::EndFunction),
        _ => line
            .strip_prefix(ELSE_IF_PREFIX)
            .map(|condition| Marker::ElseIf(condition.trim().to_string())),
    }
}

fn is_bare_name(line: &str) -> bool {
    !line.is_empty() && line.chars().all(is_name_char)
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn name(input: &str) -> IResult<&str, &str> {
    take_while1(is_name_char)(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    delimited(tag("\""), take_until("\""), tag("\""))(input)
}

fn ask(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (input, _) = tag("preguntar")(input)?;
    let (input, _) = space1(input)?;
    let (input, prompt) = quoted(input)?;
    let (input, target) = opt(preceded(
        tuple((
            space1,
            tag("guardar"),
            space1,
            opt(tuple((tag("la"), space1))),
            tag("respuesta"),
            space1,
            tag("en"),
            space1,
        )),
        name,
    ))(input)?;
    Ok((input, (prompt, target)))
}

fn convert(input: &str) -> IResult<&str, (&str, Conversion)> {
    let (input, _) = tag("convertir")(input)?;
    let (input, _) = space1(input)?;
    let (input, var) = name(input)?;
    let (input, _) = tuple((space1, tag("a"), space1))(input)?;
    let (input, target) = alt((tag("numero"), tag("número"), tag("texto")))(input)?;
    let to = if target == "texto" {
        Conversion::Text
    } else {
        Conversion::Number
    };
    Ok((input, (var, to)))
}

fn widget(input: &str) -> IResult<&str, Widget> {
    let (input, _) = tag("crear")(input)?;
    let (input, _) = space1(input)?;
    alt((button, title))(input)
}

fn button(input: &str) -> IResult<&str, Widget> {
    let (input, _) = alt((tag("boton"), tag("botón")))(input)?;
    let (input, _) = space1(input)?;
    let (input, label) = quoted(input)?;
    let (input, action) = opt(preceded(
        tuple((
            space1,
            tag("al"),
            space1,
            tag("hacer"),
            space1,
            alt((tag("click"), tag("clic"))),
            space1,
        )),
        rest,
    ))(input)?;
    Ok((
        input,
        Widget::Button {
            label: label.to_string(),
            action: action
                .map(str::trim)
                .filter(|action| !action.is_empty())
                .map(str::to_string),
        },
    ))
}

fn title(input: &str) -> IResult<&str, Widget> {
    let (input, _) = alt((tag("titulo"), tag("título")))(input)?;
    let (input, _) = space1(input)?;
    let (input, text) = quoted(input)?;
    Ok((
        input,
        Widget::Title {
            text: text.to_string(),
        },
    ))
}

fn device(input: &str) -> IResult<&str, DeviceRequest> {
    alt((photo, locate, http))(input)
}

fn photo(input: &str) -> IResult<&str, DeviceRequest> {
    let (input, _) = all_consuming(tuple((tag("tomar"), space1, tag("foto"), space0)))(input)?;
    Ok((input, DeviceRequest::CapturePhoto))
}

fn locate(input: &str) -> IResult<&str, DeviceRequest> {
    let (input, _) = all_consuming(tuple((
        tag("obtener"),
        space1,
        alt((tag("ubicacion"), tag("ubicación"))),
        space0,
    )))(input)?;
    Ok((input, DeviceRequest::Locate))
}

fn http(input: &str) -> IResult<&str, DeviceRequest> {
    let (input, _) = tuple((tag("enviar"), space1, tag("http"), space1))(input)?;
    let (input, method) = quoted(input)?;
    let (input, _) = tuple((space1, tag("a"), space1))(input)?;
    let (input, url) = quoted(input)?;
    let (input, body) = opt(preceded(tuple((space1, tag("datos"), space1)), quoted))(input)?;
    Ok((
        input,
        DeviceRequest::Http {
            method: method.to_uppercase(),
            url: url.to_string(),
            body: body.map(str::to_string),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_wins_over_assignment() {
        assert_eq!(classify("mostrar x = y"), CommandKind::Display);
        assert_eq!(
            parse_command("mostrar x = y"),
            Command::Display {
                expr: "x = y".into()
            }
        );
    }

    #[test]
    fn bare_equals_is_assignment_but_comparisons_are_not() {
        assert_eq!(
            parse_command("total = precio * 2"),
            Command::Assign {
                name: "total".into(),
                expr: "precio * 2".into()
            }
        );
        assert_eq!(classify("si x == 3"), CommandKind::Conditional);
        assert_eq!(classify("si x es igual a 3"), CommandKind::Conditional);
        assert_eq!(classify("si x >= 3"), CommandKind::Conditional);
    }

    #[test]
    fn parses_ask_with_and_without_target() {
        assert_eq!(
            parse_command("preguntar \"¿Cómo te llamas?\" guardar la respuesta en nombre"),
            Command::Ask {
                prompt: "¿Cómo te llamas?".into(),
                target: Some("nombre".into())
            }
        );
        assert_eq!(
            parse_command("preguntar \"Edad\" guardar respuesta en edad"),
            Command::Ask {
                prompt: "Edad".into(),
                target: Some("edad".into())
            }
        );
        assert_eq!(
            parse_command("preguntar \"Listo?\""),
            Command::Ask {
                prompt: "Listo?".into(),
                target: None
            }
        );
        assert_eq!(classify("preguntar sin comillas"), CommandKind::Unrecognized);
    }

    #[test]
    fn parses_read_and_convert() {
        assert_eq!(
            parse_command("leer edad"),
            Command::Read {
                target: "edad".into()
            }
        );
        assert_eq!(
            parse_command("convertir edad a numero"),
            Command::Convert {
                name: "edad".into(),
                to: Conversion::Number
            }
        );
        assert_eq!(
            parse_command("convertir edad a texto"),
            Command::Convert {
                name: "edad".into(),
                to: Conversion::Text
            }
        );
        assert_eq!(classify("convertir edad a fecha"), CommandKind::Unrecognized);
    }

    #[test]
    fn recognizes_block_openers() {
        assert_eq!(
            parse_command("si edad es mayor que 17"),
            Command::Conditional {
                condition: "edad es mayor que 17".into()
            }
        );
        assert_eq!(
            parse_command("funcion saludar"),
            Command::FunctionDef {
                name: "saludar".into()
            }
        );
        assert_eq!(
            parse_command("repetir 3 veces"),
            Command::Loop { count: "3".into() }
        );
        assert_eq!(classify("repetir cada 5 segundos"), CommandKind::Unrecognized);
    }

    #[test]
    fn sino_si_is_not_mistaken_for_si() {
        assert_eq!(
            parse_command("sino si x es igual a 2"),
            Command::BlockMarker(Marker::ElseIf("x es igual a 2".into()))
        );
        assert_eq!(parse_command("sino"), Command::BlockMarker(Marker::Else));
        assert_eq!(parse_command("fin si"), Command::BlockMarker(Marker::EndIf));
        assert_eq!(
            parse_command("fin repetir"),
            Command::BlockMarker(Marker::EndLoop)
        );
    }

    #[test]
    fn bare_word_is_a_call() {
        assert_eq!(
            parse_command("saludar"),
            Command::Call {
                name: "saludar".into()
            }
        );
        assert_eq!(classify("esto es texto libre"), CommandKind::Unrecognized);
    }

    #[test]
    fn parses_widgets() {
        assert_eq!(
            parse_command("crear titulo \"Mi App\""),
            Command::Widget(Widget::Title {
                text: "Mi App".into()
            })
        );
        assert_eq!(
            parse_command("crear boton \"Enviar\" al hacer click mostrar \"ok\""),
            Command::Widget(Widget::Button {
                label: "Enviar".into(),
                action: Some("mostrar \"ok\"".into())
            })
        );
        assert_eq!(
            parse_command("crear boton \"Nada\""),
            Command::Widget(Widget::Button {
                label: "Nada".into(),
                action: None
            })
        );
        assert_eq!(classify("crear tabla usuarios"), CommandKind::Unrecognized);
    }

    #[test]
    fn parses_device_commands() {
        assert_eq!(
            parse_command("tomar foto"),
            Command::Device(DeviceRequest::CapturePhoto)
        );
        assert_eq!(
            parse_command("obtener ubicacion"),
            Command::Device(DeviceRequest::Locate)
        );
        assert_eq!(
            parse_command("enviar http \"get\" a \"http://localhost/estado\""),
            Command::Device(DeviceRequest::Http {
                method: "GET".into(),
                url: "http://localhost/estado".into(),
                body: None
            })
        );
        assert_eq!(
            parse_command("enviar http \"POST\" a \"http://api/x\" datos \"{}\""),
            Command::Device(DeviceRequest::Http {
                method: "POST".into(),
                url: "http://api/x".into(),
                body: Some("{}".into())
            })
        );
    }
}
