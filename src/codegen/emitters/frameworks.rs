use super::{
    actionable, action_message, banner, escape_html, handler_name, string_literal, DEFAULT_TITLE,
};
use crate::codegen::EmitRequest;

/// Function component with one `useState` slot for displayed messages.
pub fn react(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let mut out = String::new();
    out.push_str(&format!("{}\n", banner("//", request)));
    out.push_str("import React, { useState } from 'react';\n\n");
    out.push_str("export default function VaderApp() {\n");
    out.push_str("  const [mensajes, setMensajes] = useState([]);\n");
    out.push_str("  const mostrar = (mensaje) => setMensajes((previos) => [...previos, mensaje]);\n");
    for (index, _, action) in actionable(&features.buttons) {
        out.push_str(&format!(
            "  const {} = () => mostrar({});\n",
            handler_name(index),
            string_literal(action_message(action))
        ));
    }
    out.push_str("\n  return (\n    <div className=\"vader-app\">\n");
    out.push_str(&format!(
        "      <h1>{{{}}}</h1>\n",
        string_literal(features.title_or(DEFAULT_TITLE))
    ));
    for message in &features.messages {
        out.push_str(&format!("      <p>{{{}}}</p>\n", string_literal(message)));
    }
    for (index, button) in features.buttons.iter().enumerate() {
        let label = string_literal(&button.label);
        match button.action {
            Some(_) => out.push_str(&format!(
                "      <button onClick={{{}}}>{{{label}}}</button>\n",
                handler_name(index)
            )),
            None => out.push_str(&format!("      <button>{{{label}}}</button>\n")),
        }
    }
    if features.asks_input {
        out.push_str("      <input placeholder=\"Escribe tu respuesta\" />\n");
    }
    out.push_str("      {mensajes.map((mensaje, i) => <p key={i}>{mensaje}</p>)}\n");
    out.push_str("    </div>\n  );\n}\n");
    out
}

/// Single-file component.
pub fn vue(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let mut out = String::new();
    out.push_str(&format!("{} -->\n", banner("<!--", request)));
    out.push_str("<template>\n  <div class=\"vader-app\">\n");
    out.push_str("    <h1>{{ titulo }}</h1>\n");
    out.push_str("    <p v-for=\"(mensaje, i) in mensajes\" :key=\"i\">{{ mensaje }}</p>\n");
    for (index, button) in features.buttons.iter().enumerate() {
        let label = escape_html(&button.label);
        match button.action {
            Some(_) => out.push_str(&format!(
                "    <button @click=\"{}\">{label}</button>\n",
                handler_name(index)
            )),
            None => out.push_str(&format!("    <button>{label}</button>\n")),
        }
    }
    if features.asks_input {
        out.push_str("    <input v-model=\"respuesta\" placeholder=\"Escribe tu respuesta\" />\n");
    }
    out.push_str("  </div>\n</template>\n\n<script>\nexport default {\n");
    out.push_str("  name: 'VaderApp',\n  data() {\n    return {\n");
    out.push_str(&format!(
        "      titulo: {},\n",
        string_literal(features.title_or(DEFAULT_TITLE))
    ));
    let messages: Vec<String> = features.messages.iter().map(|m| string_literal(m)).collect();
    out.push_str(&format!("      mensajes: [{}],\n", messages.join(", ")));
    out.push_str("      respuesta: '',\n    };\n  },\n  methods: {\n");
    for (index, _, action) in actionable(&features.buttons) {
        out.push_str(&format!(
            "    {}() {{\n      this.mensajes.push({});\n    }},\n",
            handler_name(index),
            string_literal(action_message(action))
        ));
    }
    out.push_str("  },\n};\n</script>\n");
    out
}

/// Console script.
pub fn node(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let mut out = String::new();
    out.push_str(&format!("{}\n", banner("//", request)));
    if features.asks_input {
        out.push_str("const readline = require('readline');\n\n");
        out.push_str("function preguntar(texto) {\n");
        out.push_str("  const rl = readline.createInterface({ input: process.stdin, output: process.stdout });\n");
        out.push_str("  return new Promise((resolve) => rl.question(texto + ' ', (respuesta) => {\n");
        out.push_str("    rl.close();\n    resolve(respuesta);\n  }));\n}\n\n");
    }
    out.push_str("async function main() {\n");
    if let Some(title) = &features.title {
        out.push_str(&format!("  console.log({});\n", string_literal(title)));
    }
    for message in &features.messages {
        out.push_str(&format!("  console.log({});\n", string_literal(message)));
    }
    if features.asks_input {
        out.push_str("  const respuesta = await preguntar('>');\n");
        out.push_str("  console.log(respuesta);\n");
    }
    out.push_str("}\n\nmain().catch((error) => {\n  console.error(error);\n  process.exit(1);\n});\n");
    out
}

/// HTTP server with one route per button action.
pub fn express(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let mut out = String::new();
    out.push_str(&format!("{}\n", banner("//", request)));
    out.push_str("const express = require('express');\n\n");
    out.push_str("const app = express();\nconst PORT = process.env.PORT || 3000;\n\n");
    out.push_str("app.use(express.json());\n\n");
    out.push_str("app.get('/', (req, res) => {\n");
    out.push_str(&format!(
        "  res.json({{ titulo: {}, mensajes: [{}] }});\n",
        string_literal(features.title_or(DEFAULT_TITLE)),
        features
            .messages
            .iter()
            .map(|m| string_literal(m))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    out.push_str("});\n\n");
    for (index, _, action) in actionable(&features.buttons) {
        out.push_str(&format!(
            "app.post('/{}', (req, res) => {{\n  res.json({{ mensaje: {} }});\n}});\n\n",
            handler_name(index),
            string_literal(action_message(action))
        ));
    }
    out.push_str("app.listen(PORT, () => {\n");
    out.push_str("  console.log(`Servidor escuchando en http://localhost:${PORT}`);\n");
    out.push_str("});\n");
    out
}
