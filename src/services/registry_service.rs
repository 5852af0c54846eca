// src/services/registry_service.rs

use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AuditRepository, RecordRepository},
    models::{
        art::{Art, CreateArtPayload, FullArt, NOT_AVAILABLE},
        auth::User,
        lot::{AddMovementPayload, CreateLotPayload, Lot, Movement},
        professional::{CreateProfessionalPayload, RegisteredProfessional},
        property::{Application, CreatePropertyPayload, CreateApplicationPayload, Property},
    },
};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Resolve os campos de exibição da ART a partir da propriedade e da aplicação.
/// Referência que não resolve vira "N/A" (ou ausente), nunca erro.
pub fn denormalize_art(art: Art, properties: &[Property]) -> FullArt {
    let property = properties.iter().find(|p| p.id == art.property_id);
    let application = property.and_then(|p| p.find_application(&art.application_id));

    FullArt {
        property_name: property
            .map(|p| p.name.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        application_product: application
            .map(|a| a.product.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        application_date: application.map(|a| a.date),
        responsible: application
            .map(|a| a.responsible.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        culture: application.map(|a| a.culture.clone()),
        dose: application.map(|a| a.dose.clone()),
        art,
    }
}

// Cadastros: propriedades, aplicações, ARTs, lotes e profissionais.
// Toda escrita deixa um registro na auditoria.
#[derive(Clone)]
pub struct RegistryService {
    repo: RecordRepository,
    audit_repo: AuditRepository,
}

impl RegistryService {
    pub fn new(repo: RecordRepository, audit_repo: AuditRepository) -> Self {
        Self { repo, audit_repo }
    }

    // ---
    // Propriedades
    // ---

    pub async fn list_properties(&self) -> Vec<Property> {
        self.repo.list_properties().await
    }

    pub async fn get_property(&self, id: &str) -> Result<Property, AppError> {
        self.repo
            .get_property(id)
            .await
            .ok_or_else(|| AppError::PropertyNotFound(id.to_string()))
    }

    pub async fn create_property(
        &self,
        user: &User,
        payload: CreatePropertyPayload,
    ) -> Result<Property, AppError> {
        let property = Property {
            id: new_id(),
            name: payload.name,
            owner_id: payload.owner_id,
            total_area: payload.total_area,
            latitude: payload.latitude,
            longitude: payload.longitude,
            main_culture: payload.main_culture,
            address: payload.address,
            state: payload.state.map(|s| s.to_uppercase()),
            registry: payload.registry,
            applications: Vec::new(),
        };

        let property = self.repo.insert_property(property).await;
        self.audit_repo
            .log_action(
                Some(user),
                "Propriedade cadastrada",
                json!({ "propertyId": property.id, "name": property.name }),
            )
            .await;

        Ok(property)
    }

    pub async fn add_application(
        &self,
        user: &User,
        property_id: &str,
        payload: CreateApplicationPayload,
    ) -> Result<Property, AppError> {
        let application = Application {
            id: new_id(),
            date: payload.date,
            product: payload.product,
            dose: payload.dose,
            method: payload.method,
            responsible: payload.responsible,
            culture: payload.culture,
        };
        let application_id = application.id.clone();

        let property = self.repo.add_application(property_id, application).await?;
        self.audit_repo
            .log_action(
                Some(user),
                "Aplicação registrada",
                json!({ "propertyId": property.id, "applicationId": application_id }),
            )
            .await;

        Ok(property)
    }

    // ---
    // ARTs
    // ---

    pub async fn create_art(&self, user: &User, payload: CreateArtPayload) -> Result<FullArt, AppError> {
        let art = Art {
            id: new_id(),
            art_number: payload.art_number,
            issue_date: payload.issue_date,
            property_id: payload.property_id,
            application_id: payload.application_id,
            file_url: payload.file_url,
            lot_number: payload.lot_number.filter(|l| !l.trim().is_empty()),
            nf_number: payload.nf_number,
        };

        let properties = self.repo.list_properties().await;
        let full_art = self.repo.insert_art(denormalize_art(art, &properties)).await;

        self.audit_repo
            .log_action(
                Some(user),
                "ART cadastrada",
                json!({ "artId": full_art.art.id, "artNumber": full_art.art.art_number }),
            )
            .await;

        Ok(full_art)
    }

    // ---
    // Lotes
    // ---

    pub async fn list_lots(&self) -> Vec<Lot> {
        self.repo.list_lots().await
    }

    pub async fn get_lot(&self, id: &str) -> Result<Lot, AppError> {
        self.repo
            .get_lot(id)
            .await
            .ok_or_else(|| AppError::LotNotFound(id.to_string()))
    }

    pub async fn create_lot(&self, user: &User, payload: CreateLotPayload) -> Result<Lot, AppError> {
        let lot = Lot {
            id: new_id(),
            lot_code: payload.lot_code.trim().to_string(),
            input_name: payload.input_name,
            manufacturer: payload.manufacturer,
            composition: payload.composition,
            manufacture_date: payload.manufacture_date,
            expiry_date: payload.expiry_date,
            movements: Vec::new(),
        };

        let lot = self.repo.insert_lot(lot).await?;
        self.audit_repo
            .log_action(
                Some(user),
                "Lote cadastrado",
                json!({ "lotId": lot.id, "lotCode": lot.lot_code }),
            )
            .await;

        Ok(lot)
    }

    pub async fn add_movement(
        &self,
        user: &User,
        lot_id: &str,
        payload: AddMovementPayload,
    ) -> Result<Lot, AppError> {
        let movement = Movement {
            date: payload.date,
            event: payload.event,
            location: payload.location,
            kind: payload.kind,
            responsible_party: payload.responsible_party,
            note: payload.note,
        };

        let lot = self.repo.append_movement(lot_id, movement).await?;
        self.audit_repo
            .log_action(
                Some(user),
                "Movimentação registrada",
                json!({ "lotCode": lot.lot_code, "movements": lot.movements.len() }),
            )
            .await;

        Ok(lot)
    }

    // ---
    // Profissionais
    // ---

    pub async fn list_professionals(&self) -> Vec<RegisteredProfessional> {
        self.repo.list_professionals().await
    }

    pub async fn create_professional(
        &self,
        user: &User,
        payload: CreateProfessionalPayload,
    ) -> Result<RegisteredProfessional, AppError> {
        let professional = RegisteredProfessional {
            id: new_id(),
            name: payload.name.trim().to_string(),
            registration_number: payload.registration_number.trim().to_string(),
            state: payload.state.to_uppercase(),
        };

        let professional = self.repo.insert_professional(professional).await;
        self.audit_repo
            .log_action(
                Some(user),
                "Profissional cadastrado",
                json!({ "name": professional.name, "registrationNumber": professional.registration_number }),
            )
            .await;

        Ok(professional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{auth::Role, lot::MovementKind};
    use crate::services::test_support::{application, date, property, user};

    fn art(property_id: &str, application_id: &str) -> Art {
        Art {
            id: "art-1".into(),
            art_number: "2024123456".into(),
            issue_date: date(2024, 6, 12),
            property_id: property_id.into(),
            application_id: application_id.into(),
            file_url: None,
            lot_number: None,
            nf_number: None,
        }
    }

    #[test]
    fn denormalizes_from_property_and_application() {
        let mut farm = property("prop-1", None);
        farm.applications = vec![application("app-1", date(2024, 6, 10), "Herbicida Z-MAX")];

        let full = denormalize_art(art("prop-1", "app-1"), &[farm]);
        assert_eq!(full.property_name, "Fazenda prop-1");
        assert_eq!(full.application_product, "Herbicida Z-MAX");
        assert_eq!(full.responsible, "João da Silva (CREA-SP 123456)");
        assert_eq!(full.application_date, Some(date(2024, 6, 10)));
        assert_eq!(full.culture.as_deref(), Some("Soja"));
    }

    #[test]
    fn dangling_references_become_not_available() {
        let full = denormalize_art(art("prop-404", "app-404"), &[property("prop-1", None)]);
        assert_eq!(full.property_name, NOT_AVAILABLE);
        assert_eq!(full.application_product, NOT_AVAILABLE);
        assert_eq!(full.responsible, NOT_AVAILABLE);
        assert!(full.application_date.is_none());
        assert!(full.dose.is_none());
    }

    #[tokio::test]
    async fn duplicate_lot_code_is_rejected() {
        let audit = AuditRepository::new();
        let service = RegistryService::new(RecordRepository::new(), audit.clone());
        let industria = user(Role::Industria);
        let payload = || CreateLotPayload {
            lot_code: "LOTE-1".into(),
            input_name: "Herbicida XZ100".into(),
            manufacturer: "Química Verde S.A.".into(),
            composition: "Glifosato".into(),
            manufacture_date: date(2024, 5, 10),
            expiry_date: date(2026, 5, 10),
        };

        let lot = service.create_lot(&industria, payload()).await.unwrap();
        let err = service.create_lot(&industria, payload()).await.unwrap_err();
        assert!(matches!(err, AppError::LotCodeAlreadyExists(code) if code == "LOTE-1"));

        let lot = service
            .add_movement(
                &industria,
                &lot.id,
                AddMovementPayload {
                    date: date(2024, 5, 20),
                    event: "Transporte para Revenda AgroMax".into(),
                    location: "AgroMax".into(),
                    kind: MovementKind::Transport,
                    responsible_party: "Transportes Rápidos".into(),
                    note: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(lot.movements.len(), 1);

        let logs = audit.list().await;
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action, "Movimentação registrada");
        assert_eq!(logs[0].actor, "Usuário de Teste");
    }

    #[tokio::test]
    async fn application_on_unknown_property_is_not_found() {
        let service = RegistryService::new(RecordRepository::new(), AuditRepository::new());
        let payload = CreateApplicationPayload {
            date: date(2024, 6, 10),
            product: "Fungicida".into(),
            dose: "1L/ha".into(),
            method: "Pulverização".into(),
            responsible: "Maria Oliveira".into(),
            culture: "Café".into(),
        };

        let err = service
            .add_application(&user(Role::ProdutorRural), "prop-404", payload)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PropertyNotFound(_)));
    }
}
