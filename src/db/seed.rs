// src/db/seed.rs

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::{
    db::RecordRepository,
    models::{
        art::{Art, FullArt},
        lot::{Lot, Movement, MovementKind},
        professional::RegisteredProfessional,
        property::{Application, EnvironmentalRegistry, Property},
    },
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn days_from(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_add_days(Days::new(days)).unwrap_or(today)
}

/// Dados de demonstração. As datas das aplicações são relativas a `today`
/// para que as notificações da semana apareçam.
pub async fn load_demo_data(repo: &RecordRepository, today: NaiveDate) {
    let joao = "João da Silva (CREA-SP 123456)";

    let santa_luzia = Property {
        id: "prop-1".into(),
        name: "Fazenda Santa Luzia".into(),
        owner_id: "123.456.789-00".into(),
        total_area: Decimal::new(150, 0),
        latitude: -23.55052,
        longitude: -46.633308,
        main_culture: "Soja".into(),
        address: "Zona Rural, n° 100, Cidade Exemplo, UF".into(),
        state: Some("SP".into()),
        registry: Some(EnvironmentalRegistry {
            registry_id: "SP-3515807-ABCDE1234567890FABCDE1234567890F".into(),
            kind: "Imóvel Rural".into(),
            status: "Ativo".into(),
            state: "SP".into(),
            municipality_id: "3515807".into(),
            condition: Some("Aguardando análise".into()),
            area: Some(Decimal::new(150, 0)),
            fiscal_modules: Some(Decimal::new(15, 0)),
            extraction_date: Some(ymd(2025, 2, 20)),
            car_updated_at: Some(ymd(2025, 2, 21)),
        }),
        applications: vec![
            Application {
                id: "app-1".into(),
                date: days_from(today, 1),
                product: "Herbicida Z-MAX".into(),
                dose: "2L/ha".into(),
                method: "Pulverização tratorizada".into(),
                responsible: joao.into(),
                culture: "Soja".into(),
            },
            Application {
                id: "app-2".into(),
                date: days_from(today, 3),
                product: "Fungicida Protetor".into(),
                dose: "1.5L/ha".into(),
                method: "Pulverização aérea".into(),
                responsible: joao.into(),
                culture: "Soja".into(),
            },
        ],
    };

    let agua_limpa = Property {
        id: "prop-2".into(),
        name: "Sítio Água Limpa".into(),
        owner_id: "987.654.321-99".into(),
        total_area: Decimal::new(75, 0),
        latitude: -22.906847,
        longitude: -43.172896,
        main_culture: "Milho".into(),
        address: "Estrada Vicinal, km 5, Outra Cidade, UF".into(),
        state: Some("RJ".into()),
        registry: None,
        applications: vec![Application {
            id: "app-3".into(),
            date: days_from(today, 5),
            product: "Inseticida Guardião".into(),
            dose: "500ml/ha".into(),
            method: "Pulverização costal".into(),
            responsible: "Maria Oliveira (CREA-RJ 654321)".into(),
            culture: "Milho".into(),
        }],
    };

    let lot = Lot {
        id: "lot-1".into(),
        lot_code: "LOTE-20240615-001".into(),
        input_name: "Herbicida XZ100".into(),
        manufacturer: "Química Verde S.A.".into(),
        composition: "Glifosato 480 g/L".into(),
        manufacture_date: ymd(2024, 5, 10),
        expiry_date: ymd(2026, 5, 10),
        movements: vec![
            Movement {
                date: ymd(2024, 5, 12),
                event: "Recebido na Indústria".into(),
                location: "Química Verde S.A.".into(),
                kind: MovementKind::Receipt,
                responsible_party: "Química Verde S.A.".into(),
                note: None,
            },
            Movement {
                date: ymd(2024, 5, 16),
                event: "Transporte para Revenda AgroMax".into(),
                location: "AgroMax".into(),
                kind: MovementKind::Transport,
                responsible_party: "Transportadora Rota Sul".into(),
                note: None,
            },
            Movement {
                date: ymd(2024, 6, 2),
                event: "Venda para Produtor João Silva".into(),
                location: "Fazenda Santa Luzia".into(),
                kind: MovementKind::Sale,
                responsible_party: "AgroMax".into(),
                note: Some("NF-e 123456".into()),
            },
        ],
    };

    let first_app = &santa_luzia.applications[0];
    let art = FullArt {
        art: Art {
            id: "art-1".into(),
            art_number: "2024123456".into(),
            issue_date: ymd(2024, 6, 12),
            property_id: santa_luzia.id.clone(),
            application_id: first_app.id.clone(),
            file_url: Some("/mock-art.pdf".into()),
            lot_number: Some(lot.lot_code.clone()),
            nf_number: Some("123456".into()),
        },
        property_name: santa_luzia.name.clone(),
        application_product: first_app.product.clone(),
        application_date: Some(first_app.date),
        responsible: first_app.responsible.clone(),
        culture: Some(first_app.culture.clone()),
        dose: Some(first_app.dose.clone()),
    };

    let professionals = [
        ("rt-1", "João da Silva", "CREA-SP 123456", "SP"),
        ("rt-2", "Maria Oliveira", "CREA-RJ 654321", "RJ"),
        ("rt-3", "Carlos Souza", "CREA-MG 112233", "MG"),
    ];

    repo.insert_property(santa_luzia).await;
    repo.insert_property(agua_limpa).await;
    if let Err(e) = repo.insert_lot(lot).await {
        tracing::warn!("Lote de demonstração ignorado: {}", e);
    }
    repo.insert_art(art).await;
    for (id, name, registration, state) in professionals {
        repo.insert_professional(RegisteredProfessional {
            id: id.into(),
            name: name.into(),
            registration_number: registration.into(),
            state: state.into(),
        })
        .await;
    }

    tracing::info!("🌱 Dados de demonstração carregados.");
}
