// src/services/traceability_service.rs

use crate::{
    common::error::AppError,
    db::RecordRepository,
    models::{
        analysis::{LotSearch, RtProfile},
        art::FullArt,
        lot::Lot,
        property::Property,
    },
};

// ---
// Funções puras
// ---

/// Busca de lote por trecho do código, sem diferenciar maiúsculas.
/// O primeiro lote da coleção que casar vence.
pub fn lookup_lot(query: &str, lots: &[Lot]) -> LotSearch {
    let query = query.trim();
    if query.is_empty() {
        return LotSearch::NotSearched;
    }

    let needle = query.to_lowercase();
    lots.iter()
        .find(|lot| lot.lot_code.to_lowercase().contains(&needle))
        .cloned()
        .map(LotSearch::Found)
        .unwrap_or(LotSearch::NotFound)
}

/// Filtra ARTs pelo responsável técnico (trecho, sem diferenciar maiúsculas).
/// Consulta em branco devolve a coleção inteira.
pub fn filter_arts_by_responsible(query: &str, arts: &[FullArt]) -> Vec<FullArt> {
    let query = query.trim();
    if query.is_empty() {
        return arts.to_vec();
    }

    let needle = query.to_lowercase();
    arts.iter()
        .filter(|art| art.responsible.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Perfil do RT: ARTs com o responsável exatamente igual (sem diferenciar maiúsculas),
/// propriedades atendidas e insumos recomendados, na ordem em que aparecem.
pub fn build_rt_profile(
    responsible: &str,
    arts: &[FullArt],
    properties: &[Property],
) -> Option<RtProfile> {
    let wanted = responsible.to_lowercase();
    let arts_by_rt: Vec<FullArt> = arts
        .iter()
        .filter(|art| art.responsible.to_lowercase() == wanted)
        .cloned()
        .collect();

    if responsible.trim().is_empty() || arts_by_rt.is_empty() {
        return None;
    }

    let mut served: Vec<Property> = Vec::new();
    let mut products: Vec<String> = Vec::new();
    for art in &arts_by_rt {
        if !served.iter().any(|p| p.id == art.art.property_id) {
            // Referência pendurada: a propriedade simplesmente não entra na lista.
            if let Some(property) = properties.iter().find(|p| p.id == art.art.property_id) {
                served.push(property.clone());
            }
        }
        if !products.contains(&art.application_product) {
            products.push(art.application_product.clone());
        }
    }

    Some(RtProfile {
        responsible: responsible.to_string(),
        properties: served,
        recommended_products: products,
        arts: arts_by_rt,
    })
}

// ---
// Serviço
// ---

#[derive(Clone)]
pub struct TraceabilityService {
    repo: RecordRepository,
}

impl TraceabilityService {
    pub fn new(repo: RecordRepository) -> Self {
        Self { repo }
    }

    pub async fn search_lot(&self, query: &str) -> LotSearch {
        let lots = self.repo.list_lots().await;
        lookup_lot(query, &lots)
    }

    pub async fn list_arts(&self, responsible: Option<&str>) -> Vec<FullArt> {
        let arts = self.repo.list_arts().await;
        filter_arts_by_responsible(responsible.unwrap_or_default(), &arts)
    }

    pub async fn rt_profile(&self, responsible: &str) -> Result<RtProfile, AppError> {
        let records = self.repo.snapshot().await;
        build_rt_profile(responsible, &records.arts, &records.properties)
            .ok_or_else(|| AppError::ProfessionalNotFound(responsible.to_string()))
    }

    /// Rastreio público (QR Code): código exato.
    pub async fn trace_lot(&self, lot_code: &str) -> Result<Lot, AppError> {
        self.repo
            .find_lot_by_code(lot_code)
            .await
            .ok_or_else(|| AppError::LotNotFound(lot_code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{full_art, lot, property};

    #[test]
    fn blank_query_is_not_searched() {
        let lots = vec![lot("LOTE-001")];
        assert!(matches!(lookup_lot("", &lots), LotSearch::NotSearched));
        assert!(matches!(lookup_lot("   ", &lots), LotSearch::NotSearched));
    }

    #[test]
    fn exact_and_substring_codes_match_case_insensitively() {
        let lots = vec![lot("LOTE-20240615-001"), lot("LOTE-20240701-002")];

        match lookup_lot("LOTE-20240615-001", &lots) {
            LotSearch::Found(found) => assert_eq!(found.lot_code, "LOTE-20240615-001"),
            other => panic!("esperava Found, veio {:?}", other),
        }
        match lookup_lot("0701", &lots) {
            LotSearch::Found(found) => assert_eq!(found.lot_code, "LOTE-20240701-002"),
            other => panic!("esperava Found, veio {:?}", other),
        }
        match lookup_lot("lote-2024", &lots) {
            // Vários casam: vence o primeiro da coleção
            LotSearch::Found(found) => assert_eq!(found.lot_code, "LOTE-20240615-001"),
            other => panic!("esperava Found, veio {:?}", other),
        }
    }

    #[test]
    fn unknown_code_is_not_found() {
        let lots = vec![lot("LOTE-001")];
        assert!(matches!(lookup_lot("XYZ", &lots), LotSearch::NotFound));
        assert!(matches!(lookup_lot("XYZ", &[]), LotSearch::NotFound));
    }

    #[test]
    fn responsible_filter_is_substring_and_blank_is_noop() {
        let arts = vec![
            full_art("art-1", "prop-1", "João da Silva (CREA-SP 123456)"),
            full_art("art-2", "prop-2", "Maria Oliveira (CREA-RJ 654321)"),
        ];

        assert_eq!(filter_arts_by_responsible("", &arts).len(), 2);
        assert_eq!(filter_arts_by_responsible("  ", &arts).len(), 2);

        let found = filter_arts_by_responsible("oliveira", &arts);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].art.id, "art-2");

        assert!(filter_arts_by_responsible("crea-mg", &arts).is_empty());
    }

    #[test]
    fn rt_profile_collects_distinct_properties_and_products() {
        let rt = "João da Silva (CREA-SP 123456)";
        let mut second = full_art("art-2", "prop-1", rt);
        second.application_product = "Fungicida Protetor".into();
        let arts = vec![
            full_art("art-1", "prop-1", rt),
            second,
            full_art("art-3", "prop-missing", rt),
            full_art("art-4", "prop-2", "Outra Pessoa"),
        ];
        let properties = vec![property("prop-1", None), property("prop-2", None)];

        let profile = build_rt_profile(&rt.to_uppercase(), &arts, &properties).unwrap();
        assert_eq!(profile.arts.len(), 3);
        assert_eq!(profile.properties.len(), 1);
        assert_eq!(profile.properties[0].id, "prop-1");
        assert_eq!(
            profile.recommended_products,
            vec!["Herbicida Z-MAX".to_string(), "Fungicida Protetor".to_string()]
        );
    }

    #[test]
    fn rt_profile_requires_exact_match() {
        let arts = vec![full_art("art-1", "prop-1", "João da Silva (CREA-SP 123456)")];
        assert!(build_rt_profile("João da Silva", &arts, &[]).is_none());
        assert!(build_rt_profile("", &arts, &[]).is_none());
    }
}
