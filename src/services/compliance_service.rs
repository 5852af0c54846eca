// src/services/compliance_service.rs

use crate::{
    db::RecordRepository,
    models::{
        analysis::{ComplianceChecks, ComplianceResult},
        art::FullArt,
        lot::Lot,
        property::Property,
    },
};

// Único status de CAR aceito no cruzamento.
pub const ACTIVE_REGISTRY_STATUS: &str = "Ativo";

/// Cruza uma ART com a propriedade, o CAR, o lote e a NF.
/// Referências que não resolvem viram checagens falsas, nunca erro.
pub fn check_art(art: &FullArt, properties: &[Property], lots: &[Lot]) -> ComplianceResult {
    let property = properties.iter().find(|p| p.id == art.art.property_id);
    let registry = property.and_then(|p| p.registry.as_ref());

    // Junção fraca: igualdade de string entre ART.lotNumber e Lot.lotCode
    let lot = art
        .art
        .lot_number
        .as_deref()
        .and_then(|number| lots.iter().find(|l| l.lot_code == number));

    let checks = ComplianceChecks {
        property_found: property.is_some(),
        registry_found: registry.is_some(),
        registry_status_ok: registry.is_some_and(|r| r.status == ACTIVE_REGISTRY_STATUS),
        lot_found: lot.is_some(),
        invoice_found: art.art.nf_number.as_deref().is_some_and(|nf| !nf.is_empty()),
    };
    let verdict = checks.verdict();

    ComplianceResult {
        art: art.clone(),
        property_name: property.map(|p| p.name.clone()),
        property_owner_id: property.map(|p| p.owner_id.clone()),
        registry_id: registry.map(|r| r.registry_id.clone()),
        registry_status: registry.map(|r| r.status.clone()),
        lot_code: lot.map(|l| l.lot_code.clone()),
        checks,
        verdict,
        verdict_label: verdict.label().to_string(),
    }
}

/// Uma linha de resultado por ART, na ordem das ARTs.
pub fn cross_check(arts: &[FullArt], properties: &[Property], lots: &[Lot]) -> Vec<ComplianceResult> {
    arts.iter()
        .map(|art| check_art(art, properties, lots))
        .collect()
}

#[derive(Clone)]
pub struct ComplianceService {
    repo: RecordRepository,
}

impl ComplianceService {
    pub fn new(repo: RecordRepository) -> Self {
        Self { repo }
    }

    pub async fn analyze(&self) -> Vec<ComplianceResult> {
        let records = self.repo.snapshot().await;
        let results = cross_check(&records.arts, &records.properties, &records.lots);

        tracing::debug!("Cruzamento de dados executado para {} ARTs", results.len());
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::ComplianceVerdict;
    use crate::services::test_support::{full_art, lot, property, registry};

    fn compliant_art() -> FullArt {
        let mut art = full_art("art-1", "prop-1", "João da Silva (CREA-SP 123456)");
        art.art.lot_number = Some("LOTE-001".into());
        art.art.nf_number = Some("123456".into());
        art
    }

    fn world() -> (Vec<Property>, Vec<Lot>) {
        (
            vec![property("prop-1", Some(registry("Ativo")))],
            vec![lot("LOTE-001")],
        )
    }

    #[test]
    fn all_checks_passing_is_compliant() {
        let (properties, lots) = world();
        let result = check_art(&compliant_art(), &properties, &lots);

        assert!(result.checks.all_passed());
        assert_eq!(result.verdict, ComplianceVerdict::Compliant);
        assert_eq!(result.verdict_label, "Conforme");
        assert_eq!(result.lot_code.as_deref(), Some("LOTE-001"));
    }

    #[test]
    fn any_downstream_failure_with_property_is_non_compliant() {
        let (properties, lots) = world();

        let mut no_lot = compliant_art();
        no_lot.art.lot_number = Some("LOTE-999".into());

        let mut empty_nf = compliant_art();
        empty_nf.art.nf_number = Some(String::new());

        let mut missing_nf = compliant_art();
        missing_nf.art.nf_number = None;

        let mut no_lot_number = compliant_art();
        no_lot_number.art.lot_number = None;

        for art in [no_lot, empty_nf, missing_nf, no_lot_number] {
            let result = check_art(&art, &properties, &lots);
            assert!(result.checks.property_found);
            assert_eq!(result.verdict, ComplianceVerdict::NonCompliant);
        }
    }

    #[test]
    fn registry_problems_are_non_compliant() {
        let lots = vec![lot("LOTE-001")];

        let inactive = vec![property("prop-1", Some(registry("Suspenso")))];
        let result = check_art(&compliant_art(), &inactive, &lots);
        assert!(result.checks.registry_found);
        assert!(!result.checks.registry_status_ok);
        assert_eq!(result.verdict, ComplianceVerdict::NonCompliant);

        // "ativo" minúsculo não é "Ativo"
        let lowercase = vec![property("prop-1", Some(registry("ativo")))];
        assert_eq!(
            check_art(&compliant_art(), &lowercase, &lots).verdict,
            ComplianceVerdict::NonCompliant
        );

        let without = vec![property("prop-1", None)];
        let result = check_art(&compliant_art(), &without, &lots);
        assert!(!result.checks.registry_found);
        assert!(!result.checks.registry_status_ok);
        assert_eq!(result.verdict, ComplianceVerdict::NonCompliant);
    }

    #[test]
    fn dangling_property_is_data_error_regardless_of_other_checks() {
        let (_, lots) = world();
        let mut art = compliant_art();
        art.art.property_id = "prop-404".into();

        let result = check_art(&art, &[], &lots);
        assert!(!result.checks.property_found);
        assert!(result.checks.lot_found);
        assert!(result.checks.invoice_found);
        assert_eq!(result.verdict, ComplianceVerdict::DataError);
        assert_eq!(result.verdict_label, "Erro de Dados");
        assert!(result.property_name.is_none());
    }

    #[test]
    fn cross_check_keeps_art_order() {
        let (properties, lots) = world();
        let mut broken = compliant_art();
        broken.art.id = "art-2".into();
        broken.art.property_id = "nope".into();

        let results = cross_check(&[compliant_art(), broken], &properties, &lots);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].art.art.id, "art-1");
        assert_eq!(results[1].verdict, ComplianceVerdict::DataError);
    }
}
