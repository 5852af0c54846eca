// src/db/record_repo.rs

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    models::{
        art::FullArt,
        lot::{Lot, Movement},
        nfe::NfeData,
        professional::RegisteredProfessional,
        property::{Application, Property},
    },
};

/// Todas as coleções de registros do sistema.
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub properties: Vec<Property>,
    pub arts: Vec<FullArt>,
    pub lots: Vec<Lot>,
    pub professionals: Vec<RegisteredProfessional>,
    pub invoices: Vec<NfeData>,
}

/// Repositório em memória. Só acrescenta, nunca apaga.
/// Leituras devolvem cópias (snapshot), escritas passam pelo lock de escrita.
#[derive(Clone, Default)]
pub struct RecordRepository {
    inner: Arc<RwLock<Records>>,
}

impl RecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Records {
        self.inner.read().await.clone()
    }

    // ---
    // Propriedades e aplicações
    // ---

    pub async fn list_properties(&self) -> Vec<Property> {
        self.inner.read().await.properties.clone()
    }

    pub async fn get_property(&self, id: &str) -> Option<Property> {
        self.inner
            .read()
            .await
            .properties
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn insert_property(&self, property: Property) -> Property {
        self.inner.write().await.properties.push(property.clone());
        property
    }

    pub async fn add_application(
        &self,
        property_id: &str,
        application: Application,
    ) -> Result<Property, AppError> {
        let mut records = self.inner.write().await;
        let property = records
            .properties
            .iter_mut()
            .find(|p| p.id == property_id)
            .ok_or_else(|| AppError::PropertyNotFound(property_id.to_string()))?;

        property.applications.push(application);
        Ok(property.clone())
    }

    // ---
    // ARTs
    // ---

    pub async fn list_arts(&self) -> Vec<FullArt> {
        self.inner.read().await.arts.clone()
    }

    pub async fn insert_art(&self, art: FullArt) -> FullArt {
        self.inner.write().await.arts.push(art.clone());
        art
    }

    // ---
    // Lotes
    // ---

    pub async fn list_lots(&self) -> Vec<Lot> {
        self.inner.read().await.lots.clone()
    }

    pub async fn get_lot(&self, id: &str) -> Option<Lot> {
        self.inner
            .read()
            .await
            .lots
            .iter()
            .find(|l| l.id == id)
            .cloned()
    }

    pub async fn find_lot_by_code(&self, code: &str) -> Option<Lot> {
        self.inner
            .read()
            .await
            .lots
            .iter()
            .find(|l| l.lot_code == code)
            .cloned()
    }

    pub async fn insert_lot(&self, lot: Lot) -> Result<Lot, AppError> {
        let mut records = self.inner.write().await;
        if records.lots.iter().any(|l| l.lot_code == lot.lot_code) {
            return Err(AppError::LotCodeAlreadyExists(lot.lot_code));
        }
        records.lots.push(lot.clone());
        Ok(lot)
    }

    pub async fn append_movement(&self, lot_id: &str, movement: Movement) -> Result<Lot, AppError> {
        let mut records = self.inner.write().await;
        let lot = records
            .lots
            .iter_mut()
            .find(|l| l.id == lot_id)
            .ok_or_else(|| AppError::LotNotFound(lot_id.to_string()))?;

        lot.movements.push(movement);
        Ok(lot.clone())
    }

    // ---
    // Profissionais e NF-e
    // ---

    pub async fn list_professionals(&self) -> Vec<RegisteredProfessional> {
        self.inner.read().await.professionals.clone()
    }

    pub async fn insert_professional(
        &self,
        professional: RegisteredProfessional,
    ) -> RegisteredProfessional {
        self.inner
            .write()
            .await
            .professionals
            .push(professional.clone());
        professional
    }

    pub async fn list_invoices(&self) -> Vec<NfeData> {
        self.inner.read().await.invoices.clone()
    }

    pub async fn insert_invoice(&self, invoice: NfeData) -> NfeData {
        self.inner.write().await.invoices.push(invoice.clone());
        invoice
    }
}
