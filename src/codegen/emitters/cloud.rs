use super::{actionable, action_message, banner, handler_name, string_literal, DEFAULT_TITLE};
use crate::codegen::EmitRequest;

/// AWS Lambda handler. Button actions become `accion` values of the
/// request body.
pub fn lambda(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let messages: Vec<String> = features.messages.iter().map(|m| string_literal(m)).collect();

    let mut out = String::new();
    out.push_str(&format!("{}\n", banner("//", request)));
    out.push_str("const ACCIONES = {\n");
    for (index, _, action) in actionable(&features.buttons) {
        out.push_str(&format!(
            "  {}: {},\n",
            handler_name(index),
            string_literal(action_message(action))
        ));
    }
    out.push_str("};\n\n");
    out.push_str("exports.handler = async (event) => {\n");
    out.push_str("  const cuerpo = event && event.body ? JSON.parse(event.body) : {};\n");
    out.push_str("  const accion = ACCIONES[cuerpo.accion];\n\n");
    out.push_str("  return {\n    statusCode: 200,\n    headers: {\n");
    out.push_str("      'Content-Type': 'application/json',\n");
    out.push_str("      'Access-Control-Allow-Origin': '*',\n    },\n");
    out.push_str("    body: JSON.stringify({\n");
    out.push_str(&format!(
        "      titulo: {},\n",
        string_literal(features.title_or(DEFAULT_TITLE))
    ));
    out.push_str(&format!("      mensajes: [{}],\n", messages.join(", ")));
    out.push_str("      accion: accion || null,\n");
    out.push_str("      timestamp: new Date().toISOString(),\n");
    out.push_str(&format!("      context: '{}',\n", request.context));
    out.push_str("    }),\n  };\n};\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::SourceFeatures;
    use crate::detect::{Context, Language};

    #[test]
    fn handler_maps_actions() {
        let source = "mostrar \"desplegado\"\ncrear boton \"Ping\" al hacer click mostrar \"pong\"";
        let request = EmitRequest {
            source,
            context: Context::Cloud,
            language: Language::Es,
            generated_at: "2024-01-01T00:00:00Z",
            features: SourceFeatures::scan(source),
        };
        let js = lambda(&request);
        assert!(js.contains("  accion_1: \"pong\",\n"));
        assert!(js.contains("mensajes: [\"desplegado\"],"));
        assert!(js.contains("context: 'cloud',"));
        assert!(js.starts_with("// Generado por Vader (cloud, es) el 2024-01-01T00:00:00Z"));
    }
}
