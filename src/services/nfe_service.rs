// src/services/nfe_service.rs

use chrono::Utc;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AuditRepository, RecordRepository},
    models::{
        auth::User,
        nfe::{NfeData, NfeFields},
    },
};

// Grupos da NF-e que interessam, na ordem de NfeFields
const SECTIONS: [&str; 4] = ["ide", "emit", "dest", "ICMSTot"];

// (grupo, tag) de cada campo extraído
const FIELDS: [(&str, &str); 5] = [
    ("ide", "nNF"),
    ("ide", "dhEmi"),
    ("emit", "xNome"),
    ("dest", "xNome"),
    ("ICMSTot", "vNF"),
];

fn field_slot<'a>(fields: &'a mut NfeFields, idx: usize) -> &'a mut String {
    match idx {
        0 => &mut fields.number,
        1 => &mut fields.issued_at,
        2 => &mut fields.issuer,
        3 => &mut fields.recipient,
        _ => &mut fields.total_value,
    }
}

// Grava o texto no campo do elemento corrente, se ele estiver dentro do grupo
// certo e o campo ainda estiver vazio.
fn fill_field(fields: &mut NfeFields, stack: &[String], open_at: &[Option<usize>; 4], text: &str) {
    let Some(current) = stack.last() else {
        return;
    };

    for (idx, (section, tag)) in FIELDS.iter().enumerate() {
        let section_idx = SECTIONS.iter().position(|s| s == section).unwrap_or(0);
        let inside = open_at[section_idx].is_some_and(|d| stack.len() > d);
        let slot = field_slot(fields, idx);
        if inside && current == tag && slot.is_empty() {
            *slot = text.to_string();
        }
    }
}

/// Extrai número, emissão, emitente, destinatário e valor total de uma NF-e.
///
/// Só o primeiro elemento de cada grupo (`ide`, `emit`, `dest`, `ICMSTot`) é
/// considerado, e dentro dele o primeiro descendente com a tag procurada.
/// Prefixos de namespace são ignorados. Campos ausentes ficam vazios.
/// XML malformado (tags trocadas, documento truncado) é erro.
pub fn parse_nfe_xml(xml: &str) -> Result<NfeFields, AppError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut fields = NfeFields::default();
    let mut stack: Vec<String> = Vec::new();
    // profundidade em que cada grupo foi aberto, e se já fechou
    let mut open_at: [Option<usize>; 4] = [None; 4];
    let mut done = [false; 4];
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                stack.push(name);
                let depth = stack.len();

                if let Some(idx) = SECTIONS.iter().position(|s| *s == stack[depth - 1]) {
                    if !done[idx] && open_at[idx].is_none() {
                        open_at[idx] = Some(depth);
                    }
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                let depth = stack.len();
                match stack.pop() {
                    Some(open) if open == name => {}
                    _ => return Err(AppError::NfeParse(format!("tag inesperada </{}>", name))),
                }

                for idx in 0..SECTIONS.len() {
                    if open_at[idx] == Some(depth) {
                        open_at[idx] = None;
                        done[idx] = true;
                    }
                }
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| AppError::NfeParse(err.to_string()))?;
                fill_field(&mut fields, &stack, &open_at, &text);
            }
            Ok(Event::CData(e)) => {
                let text = std::str::from_utf8(&e)
                    .map_err(|err| AppError::NfeParse(err.to_string()))?;
                fill_field(&mut fields, &stack, &open_at, text);
            }
            Ok(Event::Eof) => {
                if let Some(open) = stack.last() {
                    return Err(AppError::NfeParse(format!("documento truncado em <{}>", open)));
                }
                break;
            }
            Err(e) => return Err(AppError::NfeParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(fields)
}

#[derive(Clone)]
pub struct NfeService {
    repo: RecordRepository,
    audit_repo: AuditRepository,
}

impl NfeService {
    pub fn new(repo: RecordRepository, audit_repo: AuditRepository) -> Self {
        Self { repo, audit_repo }
    }

    pub async fn list(&self) -> Vec<NfeData> {
        self.repo.list_invoices().await
    }

    /// Lê o XML e guarda a nota. Sem número da NF-e o documento é rejeitado.
    pub async fn import(&self, user: &User, file_name: &str, xml: &str) -> Result<NfeData, AppError> {
        let fields = parse_nfe_xml(xml)?;
        if fields.number.trim().is_empty() {
            return Err(AppError::NfeParse("nNF ausente".to_string()));
        }

        let invoice = NfeData {
            id: Uuid::new_v4().to_string(),
            file_name: file_name.to_string(),
            total_amount: fields.total_value.trim().parse::<Decimal>().ok(),
            number: fields.number,
            issued_at: fields.issued_at,
            issuer: fields.issuer,
            recipient: fields.recipient,
            total_value: fields.total_value,
            imported_at: Utc::now(),
        };

        let invoice = self.repo.insert_invoice(invoice).await;
        self.audit_repo
            .log_action(
                Some(user),
                "NF-e importada",
                json!({ "number": invoice.number, "fileName": invoice.file_name }),
            )
            .await;

        Ok(invoice)
    }
}
