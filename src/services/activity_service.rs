// src/services/activity_service.rs

use std::collections::HashSet;

use crate::{
    db::RecordRepository,
    models::{
        analysis::{ActivityReport, StateActivity, UsageEntry, UsageReport},
        art::FullArt,
        professional::RegisteredProfessional,
        property::Property,
    },
};

const UNSPECIFIED_CULTURE: &str = "Não especificada";
const UNKNOWN_STATE: &str = "N/D";

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// O profissional conta como ativo se "nome (registro)" ou só "nome" aparece,
/// em minúsculas, entre os responsáveis das ARTs. Heurística de texto livre:
/// acentos não são normalizados ("joao" não casa com "joão").
fn is_active(professional: &RegisteredProfessional, active: &HashSet<String>) -> bool {
    let name = professional.name.to_lowercase();
    let with_registration =
        format!("{} ({})", name, professional.registration_number).to_lowercase();
    active.contains(&with_registration) || active.contains(&name)
}

/// Percentual de profissionais cadastrados que emitiram ao menos uma ART,
/// no total e por estado (na ordem em que os estados aparecem no cadastro).
pub fn analyze_activity(arts: &[FullArt], professionals: &[RegisteredProfessional]) -> ActivityReport {
    let active: HashSet<String> = arts.iter().map(|a| a.responsible.to_lowercase()).collect();

    let mut by_state: Vec<StateActivity> = Vec::new();
    let mut total_active = 0;

    for professional in professionals {
        let counts_as_active = is_active(professional, &active);
        if counts_as_active {
            total_active += 1;
        }

        let idx = match by_state.iter().position(|s| s.state == professional.state) {
            Some(idx) => idx,
            None => {
                by_state.push(StateActivity {
                    state: professional.state.clone(),
                    registered: 0,
                    active: 0,
                    activity_percentage: 0.0,
                });
                by_state.len() - 1
            }
        };
        let entry = &mut by_state[idx];
        entry.registered += 1;
        if counts_as_active {
            entry.active += 1;
        }
    }

    for entry in &mut by_state {
        entry.activity_percentage = percentage(entry.active, entry.registered);
    }

    ActivityReport {
        total_registered: professionals.len(),
        total_active,
        activity_percentage: percentage(total_active, professionals.len()),
        by_state,
    }
}

fn count_into(entries: &mut Vec<UsageEntry>, name: &str) {
    match entries.iter_mut().find(|e| e.name == name) {
        Some(entry) => entry.applications += 1,
        None => entries.push(UsageEntry {
            name: name.to_string(),
            applications: 1,
        }),
    }
}

/// Uso de insumos por cultura e por estado da propriedade da ART.
pub fn usage_report(arts: &[FullArt], properties: &[Property]) -> UsageReport {
    let mut by_culture = Vec::new();
    let mut by_state = Vec::new();

    for art in arts {
        let culture = art
            .culture
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNSPECIFIED_CULTURE);
        count_into(&mut by_culture, culture);

        let state = properties
            .iter()
            .find(|p| p.id == art.art.property_id)
            .and_then(|p| p.state.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_STATE);
        count_into(&mut by_state, state);
    }

    UsageReport {
        by_culture,
        by_state,
    }
}

#[derive(Clone)]
pub struct ActivityService {
    repo: RecordRepository,
}

impl ActivityService {
    pub fn new(repo: RecordRepository) -> Self {
        Self { repo }
    }

    pub async fn activity(&self) -> ActivityReport {
        let records = self.repo.snapshot().await;
        analyze_activity(&records.arts, &records.professionals)
    }

    pub async fn usage(&self) -> UsageReport {
        let records = self.repo.snapshot().await;
        usage_report(&records.arts, &records.properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{full_art, property};

    fn rt(id: &str, name: &str, registration: &str, state: &str) -> RegisteredProfessional {
        RegisteredProfessional {
            id: id.into(),
            name: name.into(),
            registration_number: registration.into(),
            state: state.into(),
        }
    }

    #[test]
    fn name_with_registration_counts_as_active() {
        let arts = vec![full_art("art-1", "prop-1", "João Silva (CREA-SP 123456)")];
        let roster = vec![rt("rt-1", "João Silva", "CREA-SP 123456", "SP")];

        let report = analyze_activity(&arts, &roster);
        assert_eq!(report.total_active, 1);
        assert_eq!(report.activity_percentage, 100.0);
    }

    #[test]
    fn bare_name_matches_case_insensitively() {
        let arts = vec![full_art("art-1", "prop-1", "JOÃO SILVA")];
        let roster = vec![rt("rt-1", "João Silva", "CREA-SP 123456", "SP")];

        assert_eq!(analyze_activity(&arts, &roster).total_active, 1);
    }

    #[test]
    fn accents_are_not_normalized() {
        let arts = vec![full_art("art-1", "prop-1", "joao silva")];
        let roster = vec![rt("rt-1", "João Silva", "CREA-SP 123456", "SP")];

        assert_eq!(analyze_activity(&arts, &roster).total_active, 0);
    }

    #[test]
    fn groups_by_state_in_roster_order() {
        let arts = vec![
            full_art("art-1", "prop-1", "Maria Oliveira (CREA-RJ 654321)"),
            full_art("art-2", "prop-1", "Maria Oliveira (CREA-RJ 654321)"),
        ];
        let roster = vec![
            rt("rt-2", "Maria Oliveira", "CREA-RJ 654321", "RJ"),
            rt("rt-1", "João Silva", "CREA-SP 123456", "SP"),
            rt("rt-3", "Ana Costa", "CREA-RJ 777", "RJ"),
            rt("rt-4", "Carlos Souza", "CREA-SP 999", "SP"),
        ];

        let report = analyze_activity(&arts, &roster);
        assert_eq!(report.total_registered, 4);
        assert_eq!(report.total_active, 1);
        assert_eq!(report.activity_percentage, 25.0);

        let states: Vec<&str> = report.by_state.iter().map(|s| s.state.as_str()).collect();
        assert_eq!(states, vec!["RJ", "SP"]);
        assert_eq!(report.by_state[0].registered, 2);
        assert_eq!(report.by_state[0].active, 1);
        assert_eq!(report.by_state[0].activity_percentage, 50.0);
        assert_eq!(report.by_state[1].active, 0);
    }

    #[test]
    fn empty_roster_is_zero_percent() {
        let report = analyze_activity(&[], &[]);
        assert_eq!(report.total_registered, 0);
        assert_eq!(report.activity_percentage, 0.0);
        assert!(report.by_state.is_empty());
    }

    #[test]
    fn usage_groups_by_culture_and_property_state() {
        let mut corn = full_art("art-2", "prop-1", "X");
        corn.culture = Some("Milho".into());
        let mut unknown = full_art("art-3", "prop-404", "X");
        unknown.culture = None;

        let arts = vec![full_art("art-1", "prop-1", "X"), corn, unknown];
        let properties = vec![property("prop-1", None)];

        let report = usage_report(&arts, &properties);
        assert_eq!(
            report.by_culture,
            vec![
                UsageEntry { name: "Soja".into(), applications: 1 },
                UsageEntry { name: "Milho".into(), applications: 1 },
                UsageEntry { name: "Não especificada".into(), applications: 1 },
            ]
        );
        assert_eq!(
            report.by_state,
            vec![
                UsageEntry { name: "SP".into(), applications: 2 },
                UsageEntry { name: "N/D".into(), applications: 1 },
            ]
        );
    }
}
