// src/services/notification_service.rs

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    db::{NotificationStateRepository, RecordRepository},
    models::{
        notification::{Notification, NotificationFeed},
        property::{Application, Property},
    },
};

// Janela de alerta: hoje até daqui a 7 dias, inclusive.
pub const ALERT_WINDOW_DAYS: i64 = 7;

const PROPERTIES_LINK: &str = "/dashboard/propriedades";

fn alert_message(app: &Application, property: &Property, days_until: i64) -> String {
    match days_until {
        0 => format!(
            "Aplicação de {} na {} agendada para hoje.",
            app.product, property.name
        ),
        1 => format!(
            "Aplicação de {} na {} agendada para amanhã.",
            app.product, property.name
        ),
        n => format!(
            "Aplicação de {} na {} em {} dias ({}).",
            app.product,
            property.name,
            n,
            app.date.format("%d/%m/%Y")
        ),
    }
}

/// Alertas das aplicações agendadas para os próximos 7 dias.
/// Aplicações passadas nunca notificam. Ordenado pela data da aplicação.
pub fn generate_notifications(properties: &[Property], today: NaiveDate) -> Vec<Notification> {
    let mut notifications: Vec<Notification> = properties
        .iter()
        .flat_map(|property| property.applications.iter().map(move |app| (property, app)))
        .filter_map(|(property, app)| {
            let days_until = (app.date - today).num_days();
            if !(0..=ALERT_WINDOW_DAYS).contains(&days_until) {
                return None;
            }

            Some(Notification {
                id: format!("notif-{}", app.id),
                message: alert_message(app, property, days_until),
                date: app.date,
                read: false,
                link: Some(PROPERTIES_LINK.to_string()),
            })
        })
        .collect();

    // sort_by_key é estável: empates mantêm a ordem das propriedades
    notifications.sort_by_key(|n| n.date);
    notifications
}

#[derive(Clone)]
pub struct NotificationService {
    repo: RecordRepository,
    state: NotificationStateRepository,
}

impl NotificationService {
    pub fn new(repo: RecordRepository, state: NotificationStateRepository) -> Self {
        Self { repo, state }
    }

    pub async fn feed(&self, user_id: Uuid, today: NaiveDate) -> NotificationFeed {
        let properties = self.repo.list_properties().await;
        let read_ids = self.state.read_ids(user_id).await;

        let notifications: Vec<Notification> = generate_notifications(&properties, today)
            .into_iter()
            .map(|mut n| {
                n.read = read_ids.contains(&n.id);
                n
            })
            .collect();
        let unread_count = notifications.iter().filter(|n| !n.read).count();

        NotificationFeed {
            notifications,
            unread_count,
        }
    }

    pub async fn mark_as_read(&self, user_id: Uuid, notification_id: &str) {
        self.state
            .mark_read(user_id, [notification_id.to_string()])
            .await;
    }

    pub async fn mark_all_as_read(&self, user_id: Uuid, today: NaiveDate) -> NotificationFeed {
        let properties = self.repo.list_properties().await;
        let ids = generate_notifications(&properties, today)
            .into_iter()
            .map(|n| n.id);
        self.state.mark_read(user_id, ids).await;

        self.feed(user_id, today).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{application, date, property};
    use chrono::Days;

    fn farm_with(apps: Vec<Application>) -> Property {
        let mut p = property("prop-1", None);
        p.name = "Fazenda Santa Luzia".into();
        p.applications = apps;
        p
    }

    #[test]
    fn today_tomorrow_and_later_messages() {
        let today = date(2024, 6, 10);
        let farm = farm_with(vec![
            application("app-3", date(2024, 6, 13), "Inseticida Guardião"),
            application("app-1", today, "Herbicida Z-MAX"),
            application("app-2", date(2024, 6, 11), "Fungicida Protetor"),
        ]);

        let notifications = generate_notifications(&[farm], today);
        assert_eq!(notifications.len(), 3);

        assert_eq!(notifications[0].id, "notif-app-1");
        assert_eq!(
            notifications[0].message,
            "Aplicação de Herbicida Z-MAX na Fazenda Santa Luzia agendada para hoje."
        );
        assert_eq!(
            notifications[1].message,
            "Aplicação de Fungicida Protetor na Fazenda Santa Luzia agendada para amanhã."
        );
        assert_eq!(
            notifications[2].message,
            "Aplicação de Inseticida Guardião na Fazenda Santa Luzia em 3 dias (13/06/2024)."
        );
        assert!(notifications.iter().all(|n| !n.read));
        assert_eq!(notifications[0].link.as_deref(), Some("/dashboard/propriedades"));
    }

    #[test]
    fn window_is_zero_to_seven_days_inclusive() {
        let today = date(2024, 6, 10);
        let at = |n: u64| today.checked_add_days(Days::new(n)).unwrap();
        let farm = farm_with(vec![
            application("past", date(2024, 6, 9), "A"),
            application("seven", at(7), "B"),
            application("eight", at(8), "C"),
        ]);

        let ids: Vec<String> = generate_notifications(&[farm], today)
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["notif-seven".to_string()]);
    }

    #[test]
    fn sorted_by_date_across_properties() {
        let today = date(2024, 6, 10);
        let mut other = property("prop-2", None);
        other.applications = vec![application("b", date(2024, 6, 11), "B")];
        let farm = farm_with(vec![application("a", date(2024, 6, 15), "A")]);

        let notifications = generate_notifications(&[farm, other], today);
        let ids: Vec<&str> = notifications.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["notif-b", "notif-a"]);
    }

    #[tokio::test]
    async fn read_state_is_per_user() {
        let today = date(2024, 6, 10);
        let repo = RecordRepository::new();
        repo.insert_property(farm_with(vec![
            application("app-1", today, "A"),
            application("app-2", date(2024, 6, 12), "B"),
        ]))
        .await;
        let service = NotificationService::new(repo, NotificationStateRepository::new());

        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        service.mark_as_read(alice, "notif-app-1").await;
        let feed = service.feed(alice, today).await;
        assert_eq!(feed.unread_count, 1);
        assert!(feed.notifications[0].read);

        assert_eq!(service.feed(bob, today).await.unread_count, 2);

        let feed = service.mark_all_as_read(bob, today).await;
        assert_eq!(feed.unread_count, 0);
    }
}
