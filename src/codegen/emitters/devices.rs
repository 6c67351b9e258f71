use super::{banner, string_literal, DEFAULT_TITLE};
use crate::codegen::EmitRequest;

const STATUS_LED: u8 = 13;
const BAUD_RATE: u32 = 9600;

/// Arduino sketch: prints the program's messages once, then blinks the
/// status LED.
pub fn arduino(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let mut out = String::new();
    out.push_str(&format!("{}\n", banner("//", request)));
    out.push_str(&format!("const int LED_ESTADO = {STATUS_LED};\n\n"));
    out.push_str("void setup() {\n");
    out.push_str(&format!("    Serial.begin({BAUD_RATE});\n"));
    out.push_str("    pinMode(LED_ESTADO, OUTPUT);\n");
    out.push_str(&format!(
        "    Serial.println({});\n",
        string_literal(features.title_or(DEFAULT_TITLE))
    ));
    for message in &features.messages {
        out.push_str(&format!("    Serial.println({});\n", string_literal(message)));
    }
    out.push_str("}\n\n");
    out.push_str("void loop() {\n");
    if features.asks_input {
        out.push_str("    if (Serial.available() > 0) {\n");
        out.push_str("        String respuesta = Serial.readStringUntil('\\n');\n");
        out.push_str("        Serial.println(respuesta);\n    }\n");
    }
    out.push_str("    digitalWrite(LED_ESTADO, HIGH);\n");
    out.push_str("    Serial.println(\"LED ON\");\n    delay(1000);\n\n");
    out.push_str("    digitalWrite(LED_ESTADO, LOW);\n");
    out.push_str("    Serial.println(\"LED OFF\");\n    delay(1000);\n}\n");
    out
}

/// Bare-metal style C main loop.
pub fn microcontroller(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let mut out = String::new();
    out.push_str(&format!("{}\n", banner("//", request)));
    out.push_str("#include <stdio.h>\n#include <stdlib.h>\n\n");
    out.push_str("static void gpio_init(void) {\n    /* configurar pines del microcontrolador */\n}\n\n");
    out.push_str("int main(void) {\n");
    out.push_str("    gpio_init();\n");
    out.push_str(&format!(
        "    printf(\"%s\\n\", {});\n",
        string_literal(features.title_or(DEFAULT_TITLE))
    ));
    for message in &features.messages {
        out.push_str(&format!("    printf(\"%s\\n\", {});\n", string_literal(message)));
    }
    if features.asks_input {
        out.push_str("    char respuesta[128];\n");
        out.push_str("    if (fgets(respuesta, sizeof respuesta, stdin) != NULL) {\n");
        out.push_str("        printf(\"%s\", respuesta);\n    }\n");
    }
    out.push_str("\n    for (;;) {\n        /* lógica principal */\n    }\n\n    return 0;\n}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::SourceFeatures;
    use crate::detect::{Context, Language};

    fn request(source: &str) -> EmitRequest<'_> {
        EmitRequest {
            source,
            context: Context::Iot,
            language: Language::Es,
            generated_at: "2024-01-01T00:00:00Z",
            features: SourceFeatures::scan(source),
        }
    }

    #[test]
    fn sketch_prints_messages_in_setup() {
        let sketch = arduino(&request("mostrar \"Sensor listo\""));
        assert!(sketch.contains("Serial.println(\"Sensor listo\");"));
        assert!(sketch.contains("pinMode(LED_ESTADO, OUTPUT);"));
        assert!(!sketch.contains("readStringUntil"));
    }

    #[test]
    fn c_program_uses_format_strings() {
        let c = microcontroller(&request("mostrar \"100%\"\nleer x"));
        assert!(c.contains("printf(\"%s\\n\", \"100%\");"));
        assert!(c.contains("fgets(respuesta"));
    }
}
