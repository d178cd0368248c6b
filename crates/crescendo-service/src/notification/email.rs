//! Email notification sender.

use std::sync::Arc;

use async_trait::async_trait;

use crescendo_core::result::AppResult;
use crescendo_core::traits::MailTransport;
use crescendo_entity::release::Release;
use crescendo_entity::user::User;

use super::sender::{release_line, NotificationSender};

/// Formats plain-text notification mail and hands it to the mail transport.
pub struct EmailNotificationSender {
    mail: Arc<dyn MailTransport>,
}

impl EmailNotificationSender {
    /// Creates a new email sender.
    pub fn new(mail: Arc<dyn MailTransport>) -> Self {
        Self { mail }
    }
}

#[async_trait]
impl NotificationSender for EmailNotificationSender {
    async fn send_frequency_message(
        &self,
        user: &User,
        upcoming: &[Release],
        recent: &[Release],
    ) -> AppResult<()> {
        let body = frequency_body(&user.username, upcoming, recent);
        self.mail
            .send_mail(&user.email, "Your release overview", &body)
            .await
    }

    async fn send_release_date_message(&self, user: &User, todays: &[Release]) -> AppResult<()> {
        let body = listing_body(&user.username, "These releases are out today:", todays);
        self.mail
            .send_mail(&user.email, "Releases out today", &body)
            .await
    }

    async fn send_announcement_date_message(
        &self,
        user: &User,
        todays: &[Release],
    ) -> AppResult<()> {
        let body = listing_body(&user.username, "These releases were announced today:", todays);
        self.mail
            .send_mail(&user.email, "Releases announced today", &body)
            .await
    }
}

fn frequency_body(username: &str, upcoming: &[Release], recent: &[Release]) -> String {
    let mut body = format!("Hi {username},\n");

    if !upcoming.is_empty() {
        body.push_str("\nUpcoming releases of artists you follow:\n");
        for release in upcoming {
            body.push_str(&format!("  {}\n", release_line(release)));
        }
    }
    if !recent.is_empty() {
        body.push_str("\nRecently released:\n");
        for release in recent {
            body.push_str(&format!("  {}\n", release_line(release)));
        }
    }

    body.push_str("\nYour Crescendo team\n");
    body
}

fn listing_body(username: &str, heading: &str, releases: &[Release]) -> String {
    let mut body = format!("Hi {username},\n\n{heading}\n");
    for release in releases {
        body.push_str(&format!("  {}\n", release_line(release)));
    }
    body.push_str("\nYour Crescendo team\n");
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use crescendo_entity::release::ReleaseState;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingMail {
        sent: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl MailTransport for RecordingMail {
        async fn send_mail(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "sandra".to_string(),
            email: "sandra@example.org".to_string(),
            enabled: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn release(title: &str) -> Release {
        Release {
            artist: "Opeth".to_string(),
            album_title: title.to_string(),
            release_date: NaiveDate::from_ymd_opt(2024, 6, 24).unwrap(),
            announcement_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            state: ReleaseState::Ok,
            reissue: false,
        }
    }

    #[tokio::test]
    async fn test_frequency_mail_lists_both_sections() {
        let mail = Arc::new(RecordingMail::default());
        let sender = EmailNotificationSender::new(Arc::clone(&mail) as Arc<dyn MailTransport>);

        sender
            .send_frequency_message(&user(), &[release("Sorceress")], &[release("Pale Communion")])
            .await
            .unwrap();

        let sent = mail.sent.lock().unwrap();
        let (to, subject, body) = &sent[0];
        assert_eq!(to, "sandra@example.org");
        assert_eq!(subject, "Your release overview");
        assert!(body.contains("Hi sandra"));
        assert!(body.contains("Upcoming releases"));
        assert!(body.contains("Opeth - Sorceress (2024-06-24)"));
        assert!(body.contains("Recently released"));
        assert!(body.contains("Pale Communion"));
    }

    #[tokio::test]
    async fn test_frequency_mail_omits_empty_sections() {
        let mail = Arc::new(RecordingMail::default());
        let sender = EmailNotificationSender::new(Arc::clone(&mail) as Arc<dyn MailTransport>);

        sender
            .send_frequency_message(&user(), &[release("Sorceress")], &[])
            .await
            .unwrap();

        let sent = mail.sent.lock().unwrap();
        assert!(!sent[0].2.contains("Recently released"));
    }

    #[tokio::test]
    async fn test_release_date_mail_uses_todays_heading() {
        let mail = Arc::new(RecordingMail::default());
        let sender = EmailNotificationSender::new(Arc::clone(&mail) as Arc<dyn MailTransport>);

        sender
            .send_release_date_message(&user(), &[release("Sorceress")])
            .await
            .unwrap();

        let sent = mail.sent.lock().unwrap();
        assert_eq!(sent[0].1, "Releases out today");
        assert!(sent[0].2.contains("out today"));
    }
}
