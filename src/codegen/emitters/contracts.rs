use super::{actionable, action_message, banner, identifier, string_literal, DEFAULT_TITLE};
use crate::codegen::EmitRequest;

/// Ownable message contract. Each button action becomes an owner-only
/// function that records its message and emits an event.
pub fn solidity(request: &EmitRequest<'_>) -> String {
    let features = &request.features;
    let initial = features
        .messages
        .first()
        .map(String::as_str)
        .unwrap_or(features.title_or(DEFAULT_TITLE));

    let mut out = String::new();
    out.push_str(&format!("{}\n", banner("//", request)));
    out.push_str("// SPDX-License-Identifier: MIT\n");
    out.push_str("pragma solidity ^0.8.0;\n\n");
    out.push_str("contract VaderContract {\n");
    out.push_str(&format!("    string public message = {};\n", sol_literal(initial)));
    out.push_str("    address public owner;\n\n");
    out.push_str("    event MessageUpdated(string message);\n\n");
    out.push_str("    modifier onlyOwner() {\n");
    out.push_str("        require(msg.sender == owner, \"Solo el propietario puede actualizar\");\n");
    out.push_str("        _;\n    }\n\n");
    out.push_str("    constructor() {\n        owner = msg.sender;\n    }\n\n");
    out.push_str("    function updateMessage(string memory newMessage) public onlyOwner {\n");
    out.push_str("        message = newMessage;\n        emit MessageUpdated(newMessage);\n    }\n");
    for (index, button, action) in actionable(&features.buttons) {
        let name = identifier(&button.label, &format!("accion_{}", index + 1));
        out.push_str(&format!(
            "\n    function {name}() public onlyOwner {{\n        message = {};\n        emit MessageUpdated(message);\n    }}\n",
            sol_literal(action_message(action))
        ));
    }
    out.push_str("}\n");
    out
}

/// Non-ASCII text needs the `unicode` prefix since Solidity 0.7.
fn sol_literal(text: &str) -> String {
    if text.is_ascii() {
        string_literal(text)
    } else {
        format!("unicode{}", string_literal(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::SourceFeatures;
    use crate::detect::{Context, Language};

    #[test]
    fn contract_functions_follow_buttons() {
        let source = "mostrar \"Hola cadena\"\ncrear boton \"Acuñar Token\" al hacer click mostrar \"acuñado\"";
        let request = EmitRequest {
            source,
            context: Context::Blockchain,
            language: Language::Es,
            generated_at: "2024-01-01T00:00:00Z",
            features: SourceFeatures::scan(source),
        };
        let sol = solidity(&request);
        assert!(sol.contains("string public message = \"Hola cadena\";"));
        assert!(sol.contains("function acu_ar_token() public onlyOwner {"));
        assert!(sol.contains("message = unicode\"acuñado\";"));
    }
}
