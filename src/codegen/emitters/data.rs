use super::{banner, identifier, string_literal, DEFAULT_TITLE};
use crate::codegen::EmitRequest;
use regex::Regex;
use std::sync::OnceLock;

const DEFAULT_TABLE: &str = "usuarios";

/// MySQL schema. Tables come from `crear tabla NOMBRE` lines; displayed
/// messages are seeded into a `mensajes` table.
pub fn schema(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let database = identifier(features.title_or("vader_db"), "vader_db");
    let mut tables = declared_tables(request.source);
    if tables.is_empty() {
        tables.push(DEFAULT_TABLE.to_string());
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", banner("--", request)));
    out.push_str(&format!("CREATE DATABASE IF NOT EXISTS {database};\nUSE {database};\n"));
    for table in &tables {
        out.push_str(&format!("\nCREATE TABLE {table} (\n"));
        out.push_str("    id INT PRIMARY KEY AUTO_INCREMENT,\n");
        out.push_str("    nombre VARCHAR(100) NOT NULL,\n");
        out.push_str("    email VARCHAR(100) UNIQUE,\n");
        out.push_str("    fecha_creacion TIMESTAMP DEFAULT CURRENT_TIMESTAMP\n);\n");
    }
    if !features.messages.is_empty() {
        out.push_str("\nCREATE TABLE mensajes (\n");
        out.push_str("    id INT PRIMARY KEY AUTO_INCREMENT,\n");
        out.push_str("    texto TEXT NOT NULL\n);\n\n");
        let rows: Vec<String> = features
            .messages
            .iter()
            .map(|message| format!("({})", sql_literal(message)))
            .collect();
        out.push_str(&format!("INSERT INTO mensajes (texto) VALUES\n{};\n", rows.join(",\n")));
    }
    out
}

/// Small dense classifier in Keras.
pub fn model(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let mut out = String::new();
    out.push_str(&format!("{}\n", banner("#", request)));
    out.push_str("import tensorflow as tf\n\n\n");
    out.push_str("def crear_modelo():\n");
    out.push_str("    modelo = tf.keras.Sequential([\n");
    out.push_str("        tf.keras.layers.Input(shape=(784,)),\n");
    out.push_str("        tf.keras.layers.Dense(128, activation=\"relu\"),\n");
    out.push_str("        tf.keras.layers.Dense(10, activation=\"softmax\"),\n");
    out.push_str("    ])\n");
    out.push_str("    modelo.compile(\n");
    out.push_str("        optimizer=\"adam\",\n");
    out.push_str("        loss=\"categorical_crossentropy\",\n");
    out.push_str("        metrics=[\"accuracy\"],\n    )\n");
    out.push_str("    return modelo\n\n\n");
    out.push_str("if __name__ == \"__main__\":\n");
    out.push_str(&format!(
        "    print({})\n",
        string_literal(features.title_or(DEFAULT_TITLE))
    ));
    for message in &features.messages {
        out.push_str(&format!("    print({})\n", string_literal(message)));
    }
    out.push_str("    modelo = crear_modelo()\n");
    out.push_str("    modelo.summary()\n");
    if features.asks_input {
        out.push_str("    respuesta = input(\"> \")\n");
        out.push_str("    print(respuesta)\n");
    }
    out
}

fn declared_tables(source: &str) -> Vec<String> {
    static TABLE: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(regex) = TABLE
        .get_or_init(|| Regex::new(r"(?m)^\s*crear\s+tabla\s+(\w+)").ok())
        .as_ref()
    else {
        return Vec::new();
    };
    let mut tables: Vec<String> = Vec::new();
    for captures in regex.captures_iter(source) {
        if let Some(name) = captures.get(1) {
            let name = identifier(name.as_str(), "tabla");
            if !tables.contains(&name) {
                tables.push(name);
            }
        }
    }
    tables
}

fn sql_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
