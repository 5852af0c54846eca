// src/common/i18n.rs

use std::collections::HashMap;

// Idioma usado quando o cliente não manda Accept-Language ou manda um que não temos.
pub const DEFAULT_LANG: &str = "pt";

/// Catálogo de mensagens de erro por idioma.
/// As mensagens aceitam parâmetros no formato `{nome}`.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<String, HashMap<&'static str, &'static str>>,
}

const PT: &[(&str, &str)] = &[
    ("validation", "Um ou mais campos são inválidos."),
    ("email_exists", "Este e-mail já está em uso."),
    ("invalid_credentials", "E-mail ou senha inválidos."),
    ("invalid_token", "Token de autenticação inválido ou ausente."),
    ("user_not_found", "Usuário não encontrado."),
    ("forbidden", "Você precisa da permissão '{perm}' para realizar esta ação."),
    ("property_not_found", "Propriedade '{id}' não encontrada."),
    ("lot_not_found", "Lote '{id}' não encontrado."),
    ("lot_code_exists", "Já existe um lote com o código '{code}'."),
    ("professional_not_found", "Não foi possível encontrar ARTs para \"{name}\"."),
    ("nfe_parse", "Não foi possível ler o arquivo XML da NF-e. Verifique o formato."),
    ("font_not_found", "Fonte não encontrada na pasta de fontes."),
    ("internal", "Ocorreu um erro inesperado."),
];

const EN: &[(&str, &str)] = &[
    ("validation", "One or more fields are invalid."),
    ("email_exists", "This e-mail is already in use."),
    ("invalid_credentials", "Invalid e-mail or password."),
    ("invalid_token", "Authentication token is invalid or missing."),
    ("user_not_found", "User not found."),
    ("forbidden", "You need the '{perm}' permission to perform this action."),
    ("property_not_found", "Property '{id}' not found."),
    ("lot_not_found", "Lot '{id}' not found."),
    ("lot_code_exists", "A lot with code '{code}' already exists."),
    ("professional_not_found", "No ARTs found for \"{name}\"."),
    ("nfe_parse", "Could not read the NF-e XML file. Check its format."),
    ("font_not_found", "Font not found in the fonts directory."),
    ("internal", "An unexpected error occurred."),
];

impl I18nStore {
    pub fn builtin() -> Self {
        let mut messages = HashMap::new();
        messages.insert("pt".to_string(), PT.iter().copied().collect());
        messages.insert("en".to_string(), EN.iter().copied().collect());
        Self { messages }
    }

    /// Traduz `key` para `lang`, caindo para o português e depois para a própria chave.
    pub fn translate(&self, lang: &str, key: &str, params: &[(&str, &str)]) -> String {
        let template = self
            .messages
            .get(lang)
            .and_then(|m| m.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|m| m.get(key)))
            .copied()
            .unwrap_or(key);

        params
            .iter()
            .fold(template.to_string(), |msg, (name, value)| {
                msg.replace(&format!("{{{}}}", name), value)
            })
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_with_params() {
        let store = I18nStore::builtin();
        assert_eq!(
            store.translate("en", "lot_not_found", &[("id", "L-1")]),
            "Lot 'L-1' not found."
        );
    }

    #[test]
    fn unknown_language_falls_back_to_portuguese() {
        let store = I18nStore::builtin();
        assert_eq!(
            store.translate("de", "user_not_found", &[]),
            "Usuário não encontrado."
        );
    }

    #[test]
    fn unknown_key_is_returned_as_is() {
        let store = I18nStore::builtin();
        assert_eq!(store.translate("pt", "nope", &[]), "nope");
    }
}
