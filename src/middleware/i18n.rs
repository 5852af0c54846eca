// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::common::i18n::DEFAULT_LANG;

// Nosso extrator de idioma. Guarda só o idioma primário ("pt-BR" -> "pt").
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let lang = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .first() // Pega o idioma de maior peso (ex: "pt-BR")
                    .map(|tag| {
                        tag.split('-').next().unwrap_or(tag).to_lowercase()
                    })
            })
            .map(Locale)
            .unwrap_or_default();

        Ok(lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn locale_for(header_value: Option<&str>) -> String {
        let mut builder = Request::builder();
        if let Some(v) = header_value {
            builder = builder.header(header::ACCEPT_LANGUAGE, v);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        let Ok(locale) = Locale::from_request_parts(&mut parts, &()).await;
        locale.0
    }

    #[tokio::test]
    async fn picks_primary_language_of_highest_weight() {
        assert_eq!(locale_for(Some("en-US,pt;q=0.5")).await, "en");
        assert_eq!(locale_for(Some("pt-BR")).await, "pt");
    }

    #[tokio::test]
    async fn missing_header_defaults_to_portuguese() {
        assert_eq!(locale_for(None).await, "pt");
    }
}
