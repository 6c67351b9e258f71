use super::{
    actionable, action_message, banner, handler_name, string_literal, template_safe_literal,
    DEFAULT_TITLE,
};
use crate::codegen::EmitRequest;

pub fn react_native(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let mut out = String::new();
    out.push_str(&format!("{}\n", banner("//", request)));
    out.push_str("import React, { useState } from 'react';\n");
    out.push_str("import { View, Text, Button, TextInput, StyleSheet } from 'react-native';\n\n");
    out.push_str("export default function VaderApp() {\n");
    out.push_str("  const [mensajes, setMensajes] = useState([]);\n");
    if features.asks_input {
        out.push_str("  const [respuesta, setRespuesta] = useState('');\n");
    }
    out.push_str("  const mostrar = (mensaje) => setMensajes((previos) => [...previos, mensaje]);\n\n");
    out.push_str("  return (\n    <View style={styles.container}>\n");
    out.push_str(&format!(
        "      <Text style={{styles.title}}>{{{}}}</Text>\n",
        string_literal(features.title_or(DEFAULT_TITLE))
    ));
    for message in &features.messages {
        out.push_str(&format!(
            "      <Text style={{styles.subtitle}}>{{{}}}</Text>\n",
            string_literal(message)
        ));
    }
    for button in &features.buttons {
        let on_press = match &button.action {
            Some(action) => format!("() => mostrar({})", string_literal(action_message(action))),
            None => "() => {}".to_string(),
        };
        out.push_str(&format!(
            "      <Button title={{{}}} onPress={{{on_press}}} />\n",
            string_literal(&button.label)
        ));
    }
    if features.asks_input {
        out.push_str("      <TextInput style={styles.input} value={respuesta} onChangeText={setRespuesta} />\n");
    }
    out.push_str("      {mensajes.map((mensaje, i) => <Text key={i} style={styles.subtitle}>{mensaje}</Text>)}\n");
    out.push_str("    </View>\n  );\n}\n\n");
    out.push_str(
        "const styles = StyleSheet.create({
  container: { flex: 1, justifyContent: 'center', alignItems: 'center', backgroundColor: '#000' },
  title: { fontSize: 24, color: '#00ff41', fontWeight: 'bold' },
  subtitle: { fontSize: 16, color: '#00ff41', marginTop: 10 },
  input: { borderColor: '#00ff41', borderWidth: 1, color: '#00ff41', minWidth: 200, marginTop: 10 },
});
",
    );
    out
}

pub fn flutter(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let title = template_safe_literal(features.title_or(DEFAULT_TITLE));
    let mut out = String::new();
    out.push_str(&format!("{}\n", banner("//", request)));
    out.push_str("import 'package:flutter/material.dart';\n\n");
    out.push_str("void main() => runApp(const VaderApp());\n\n");
    out.push_str("class VaderApp extends StatelessWidget {\n");
    out.push_str("  const VaderApp({super.key});\n\n");
    out.push_str("  @override\n  Widget build(BuildContext context) {\n");
    out.push_str(&format!(
        "    return MaterialApp(\n      title: {title},\n      home: const Inicio(),\n    );\n  }}\n}}\n\n"
    ));
    out.push_str("class Inicio extends StatefulWidget {\n");
    out.push_str("  const Inicio({super.key});\n\n");
    out.push_str("  @override\n  State<Inicio> createState() => _InicioState();\n}\n\n");
    out.push_str("class _InicioState extends State<Inicio> {\n");
    out.push_str("  final List<String> _mensajes = [];\n\n");
    out.push_str("  void _mostrar(String mensaje) => setState(() => _mensajes.add(mensaje));\n\n");
    out.push_str("  @override\n  Widget build(BuildContext context) {\n");
    out.push_str(&format!(
        "    return Scaffold(\n      appBar: AppBar(title: Text({title})),\n"
    ));
    out.push_str("      body: ListView(\n        padding: const EdgeInsets.all(16),\n        children: [\n");
    for message in &features.messages {
        out.push_str(&format!(
            "          Text({}),\n",
            template_safe_literal(message)
        ));
    }
    for button in &features.buttons {
        let on_pressed = match &button.action {
            Some(action) => format!(
                "() => _mostrar({})",
                template_safe_literal(action_message(action))
            ),
            None => "() {}".to_string(),
        };
        out.push_str(&format!(
            "          ElevatedButton(onPressed: {on_pressed}, child: Text({})),\n",
            template_safe_literal(&button.label)
        ));
    }
    if features.asks_input {
        out.push_str("          const TextField(decoration: InputDecoration(labelText: 'Respuesta')),\n");
    }
    out.push_str("          ..._mensajes.map(Text.new),\n");
    out.push_str("        ],\n      ),\n    );\n  }\n}\n");
    out
}

/// SwiftUI view.
pub fn ios(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let mut out = String::new();
    out.push_str(&format!("{}\n", banner("//", request)));
    out.push_str("import SwiftUI\n\n");
    out.push_str("@main\nstruct VaderApp: App {\n    var body: some Scene {\n");
    out.push_str("        WindowGroup {\n            ContentView()\n        }\n    }\n}\n\n");
    out.push_str("struct ContentView: View {\n");
    out.push_str("    @State private var mensajes: [String] = []\n");
    if features.asks_input {
        out.push_str("    @State private var respuesta = \"\"\n");
    }
    out.push_str("\n    var body: some View {\n        VStack(spacing: 12) {\n");
    out.push_str(&format!(
        "            Text({}).font(.largeTitle)\n",
        string_literal(features.title_or(DEFAULT_TITLE))
    ));
    for message in &features.messages {
        out.push_str(&format!("            Text({})\n", string_literal(message)));
    }
    for button in &features.buttons {
        let label = string_literal(&button.label);
        match &button.action {
            Some(action) => out.push_str(&format!(
                "            Button({label}) {{ mensajes.append({}) }}\n",
                string_literal(action_message(action))
            )),
            None => out.push_str(&format!("            Button({label}) {{}}\n")),
        }
    }
    if features.asks_input {
        out.push_str("            TextField(\"Respuesta\", text: $respuesta)\n");
    }
    out.push_str("            ForEach(mensajes.indices, id: \\.self) { i in\n");
    out.push_str("                Text(mensajes[i])\n            }\n");
    out.push_str("        }\n        .padding()\n    }\n}\n");
    out
}

/// Jetpack Compose activity.
pub fn android(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let mut out = String::new();
    out.push_str(&format!("{}\n", banner("//", request)));
    out.push_str("package org.vader.app\n\n");
    out.push_str("import android.os.Bundle\n");
    out.push_str("import androidx.activity.ComponentActivity\n");
    out.push_str("import androidx.activity.compose.setContent\n");
    out.push_str("import androidx.compose.foundation.layout.Column\n");
    out.push_str("import androidx.compose.material3.*\n");
    out.push_str("import androidx.compose.runtime.*\n\n");
    out.push_str("class MainActivity : ComponentActivity() {\n");
    out.push_str("    override fun onCreate(savedInstanceState: Bundle?) {\n");
    out.push_str("        super.onCreate(savedInstanceState)\n");
    out.push_str("        setContent { VaderApp() }\n    }\n}\n\n");
    out.push_str("@Composable\nfun VaderApp() {\n");
    out.push_str("    val mensajes = remember { mutableStateListOf<String>() }\n");
    if features.asks_input {
        out.push_str("    var respuesta by remember { mutableStateOf(\"\") }\n");
    }
    for (index, _, action) in actionable(&features.buttons) {
        out.push_str(&format!(
            "    val {} = {{ mensajes.add({}) }}\n",
            handler_name(index),
            template_safe_literal(action_message(action))
        ));
    }
    out.push_str("    Column {\n");
    out.push_str(&format!(
        "        Text({}, style = MaterialTheme.typography.headlineLarge)\n",
        template_safe_literal(features.title_or(DEFAULT_TITLE))
    ));
    for message in &features.messages {
        out.push_str(&format!("        Text({})\n", template_safe_literal(message)));
    }
    for (index, button) in features.buttons.iter().enumerate() {
        let on_click = match button.action {
            Some(_) => format!("{{ {}() }}", handler_name(index)),
            None => "{}".to_string(),
        };
        out.push_str(&format!(
            "        Button(onClick = {on_click}) {{ Text({}) }}\n",
            template_safe_literal(&button.label)
        ));
    }
    if features.asks_input {
        out.push_str("        TextField(value = respuesta, onValueChange = { respuesta = it })\n");
    }
    out.push_str("        mensajes.forEach { Text(it) }\n    }\n}\n");
    out
}
