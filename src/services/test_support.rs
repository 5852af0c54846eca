// Construtores de registros para os testes dos serviços.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    art::{Art, FullArt},
    lot::Lot,
    property::{Application, EnvironmentalRegistry, Property},
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn lot(code: &str) -> Lot {
    Lot {
        id: format!("id-{}", code),
        lot_code: code.to_string(),
        input_name: "Herbicida XZ100".into(),
        manufacturer: "Química Verde S.A.".into(),
        composition: "Glifosato".into(),
        manufacture_date: date(2024, 5, 10),
        expiry_date: date(2026, 5, 10),
        movements: Vec::new(),
    }
}

pub fn registry(status: &str) -> EnvironmentalRegistry {
    EnvironmentalRegistry {
        registry_id: "SP-3515807-ABCDE".into(),
        kind: "Imóvel Rural".into(),
        status: status.to_string(),
        state: "SP".into(),
        municipality_id: "3515807".into(),
        condition: None,
        area: None,
        fiscal_modules: None,
        extraction_date: None,
        car_updated_at: None,
    }
}

pub fn property(id: &str, registry: Option<EnvironmentalRegistry>) -> Property {
    Property {
        id: id.to_string(),
        name: format!("Fazenda {}", id),
        owner_id: "123.456.789-00".into(),
        total_area: Decimal::new(150, 0),
        latitude: -23.5,
        longitude: -46.6,
        main_culture: "Soja".into(),
        address: "Zona Rural, n° 100".into(),
        state: Some("SP".into()),
        registry,
        applications: Vec::new(),
    }
}

pub fn application(id: &str, date: NaiveDate, product: &str) -> Application {
    Application {
        id: id.to_string(),
        date,
        product: product.to_string(),
        dose: "2L/ha".into(),
        method: "Pulverização tratorizada".into(),
        responsible: "João da Silva (CREA-SP 123456)".into(),
        culture: "Soja".into(),
    }
}

pub fn full_art(id: &str, property_id: &str, responsible: &str) -> FullArt {
    FullArt {
        art: Art {
            id: id.to_string(),
            art_number: format!("N-{}", id),
            issue_date: date(2024, 6, 12),
            property_id: property_id.to_string(),
            application_id: "app-1".into(),
            file_url: None,
            lot_number: None,
            nf_number: None,
        },
        property_name: format!("Fazenda {}", property_id),
        application_product: "Herbicida Z-MAX".into(),
        application_date: Some(date(2024, 6, 10)),
        responsible: responsible.to_string(),
        culture: Some("Soja".into()),
        dose: Some("2L/ha".into()),
    }
}

pub fn user(role: crate::models::auth::Role) -> crate::models::auth::User {
    crate::models::auth::User {
        id: uuid::Uuid::new_v4(),
        email: "usuario@exemplo.com".into(),
        full_name: "Usuário de Teste".into(),
        role,
        created_at: chrono::Utc::now(),
    }
}
