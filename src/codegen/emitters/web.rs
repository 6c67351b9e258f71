use super::{
    actionable, action_message, banner, escape_html, handler_name, string_literal, DEFAULT_TITLE,
};
use crate::codegen::EmitRequest;

const STYLE: &str = "\
body { font-family: 'Courier New', monospace; margin: 0; padding: 20px; background: #000; color: #00ff41; }
h1 { font-size: 3rem; text-align: center; text-shadow: 0 0 20px #00ff41; }
button { background: #00ff41; color: #000; border: none; padding: 10px 20px; border-radius: 5px; cursor: pointer; margin: 10px 5px; }
button:hover { background: #00cc33; }
#salida { margin-top: 10px; padding: 10px; border: 1px solid #00ff41; border-radius: 5px; min-height: 50px; }
";

/// Standalone HTML page with inline style and script.
pub fn page(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let title = escape_html(features.title_or(DEFAULT_TITLE));

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!("{} -->\n", banner("<!--", request)));
    html.push_str(&format!("<html lang=\"{}\">\n<head>\n", request.language));
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str(&format!("<style>\n{STYLE}</style>\n</head>\n<body>\n"));
    html.push_str(&format!("<header><h1>{title}</h1></header>\n<main>\n"));

    for message in &features.messages {
        html.push_str(&format!("<p>{}</p>\n", escape_html(message)));
    }
    for (index, button) in features.buttons.iter().enumerate() {
        let label = escape_html(&button.label);
        if button.action.is_some() {
            html.push_str(&format!(
                "<button onclick=\"{}()\">{label}</button>\n",
                handler_name(index)
            ));
        } else {
            html.push_str(&format!("<button>{label}</button>\n"));
        }
    }
    if features.asks_input {
        html.push_str("<input id=\"respuesta\" type=\"text\" placeholder=\"Escribe tu respuesta\">\n");
    }
    html.push_str("<div id=\"salida\"></div>\n</main>\n");

    html.push_str("<script>\n");
    html.push_str("function mostrar_mensaje(mensaje) {\n");
    html.push_str("  const salida = document.getElementById('salida');\n");
    html.push_str("  const linea = document.createElement('p');\n");
    html.push_str("  linea.textContent = mensaje;\n");
    html.push_str("  salida.appendChild(linea);\n");
    html.push_str("}\n");
    for (index, _, action) in actionable(&features.buttons) {
        html.push_str(&format!(
            "function {}() {{\n  mostrar_mensaje({});\n}}\n",
            handler_name(index),
            string_literal(action_message(action))
        ));
    }
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::SourceFeatures;
    use crate::detect::{Context, Language};

    fn request(source: &str) -> EmitRequest<'_> {
        EmitRequest {
            source,
            context: Context::Web,
            language: Language::Es,
            generated_at: "2024-01-01T00:00:00Z",
            features: SourceFeatures::scan(source),
        }
    }

    #[test]
    fn renders_title_messages_and_buttons() {
        let html = page(&request(
            "crear titulo \"Hola <Mundo>\"\nmostrar \"Bienvenido\"\ncrear boton \"Ir\" al hacer click mostrar \"Vamos\"",
        ));
        assert!(html.contains("<title>Hola &lt;Mundo&gt;</title>"));
        assert!(html.contains("<p>Bienvenido</p>"));
        assert!(html.contains("<button onclick=\"accion_1()\">Ir</button>"));
        assert!(html.contains("mostrar_mensaje(\"Vamos\");"));
        assert!(html.contains("<html lang=\"es\">"));
    }

    #[test]
    fn input_field_only_when_asking() {
        assert!(!page(&request("mostrar \"x\"")).contains("id=\"respuesta\""));
        assert!(page(&request("leer x")).contains("id=\"respuesta\""));
    }
}
