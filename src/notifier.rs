// src/notifier.rs
use crate::config::MailConfig;
use crate::errors::NotifyError;
use crate::event::Event;
use async_trait::async_trait;
use log::info;
use mail_builder::MessageBuilder;
use mail_send::SmtpClientBuilder;

pub const SMTP_RELAY: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 465;

const PLACEHOLDER: &str = "N/A";

pub fn render_subject(artist_name: &str, num_events: usize) -> String {
    let plural_s = if num_events > 1 { "s" } else { "" };
    format!("{} added {} new concert{}!", artist_name, num_events, plural_s)
}

/// One block per event, in input order, with "N/A" standing in for anything
/// the source left out.
pub fn render_body(events: &[Event]) -> String {
    let num_events = events.len();
    let plural_s = if num_events > 1 { "s" } else { "" };

    let mut body_parts: Vec<String> = vec![format!(
        "Hello! {} new event{} have been added for your tracked artist:\n",
        num_events, plural_s
    )];

    for event in events {
        body_parts.push(format!(
            "----------------------------------------\n\
             Event: {}\n\
             Date: {}\n\
             Venue: {} in {}\n\
             Link: {}\n",
            event.name(),
            event.local_date().unwrap_or(PLACEHOLDER),
            event.venue().unwrap_or(PLACEHOLDER),
            event.city().unwrap_or(PLACEHOLDER),
            event.url().unwrap_or(PLACEHOLDER),
        ));
    }

    body_parts.join("\n")
}

// ===== notifier
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one summary message covering all the given events.
    async fn notify(&self, events: &[Event]) -> Result<(), NotifyError>;
}

// ===== Live SMTP notifier
pub struct SmtpNotifier {
    artist_name: String,
    mail: Option<MailConfig>,
}

impl SmtpNotifier {
    pub fn new(artist_name: String, mail: Option<MailConfig>) -> Self {
        Self { artist_name, mail }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, events: &[Event]) -> Result<(), NotifyError> {
        let mail: &MailConfig = self.mail.as_ref().ok_or(NotifyError::MissingCredentials)?;

        let subject: String = render_subject(&self.artist_name, events.len());
        let body: String = render_body(events);

        let recipients: Vec<&str> = mail.recipients.iter().map(String::as_str).collect();
        let message = MessageBuilder::new()
            .from(mail.user.as_str())
            .to(recipients)
            .subject(subject.as_str())
            .text_body(body.as_str());

        SmtpClientBuilder::new(SMTP_RELAY, SMTP_PORT)
            .implicit_tls(true)
            .credentials((mail.user.as_str(), mail.app_password.as_str()))
            .connect()
            .await?
            .send(message)
            .await?;

        info!(
            "Summary notification for {} new event(s) sent to {} recipient(s).",
            events.len(),
            mail.recipients.len()
        );
        Ok(())
    }
}

// ===== Fake notifier for testing
pub struct FakeNotifier {
    pub sent: std::sync::Mutex<Vec<Vec<Event>>>,
    pub fail_with_missing_credentials: bool,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self { sent: std::sync::Mutex::new(Vec::new()), fail_with_missing_credentials: false }
    }

    pub fn failing() -> Self {
        Self { sent: std::sync::Mutex::new(Vec::new()), fail_with_missing_credentials: true }
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn notify(&self, events: &[Event]) -> Result<(), NotifyError> {
        if self.fail_with_missing_credentials {
            return Err(NotifyError::MissingCredentials);
        }
        self.sent.lock().unwrap().push(events.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventId;

    fn full_event() -> Event {
        Event::new(
            EventId::new("evt1"),
            "Masayoshi Takanaka at Budokan".to_string(),
            Some("https://tickets.example.com/evt1".to_string()),
            Some("2026-10-03".to_string()),
            Some("Nippon Budokan".to_string()),
            Some("Tokyo".to_string()),
        )
    }

    fn sparse_event() -> Event {
        Event::new(EventId::new("evt2"), "Rainbow Goblins Night".to_string(), None, None, None, None)
    }

    #[test]
    fn test_subject_pluralization() {
        assert_eq!(
            render_subject("Masayoshi Takanaka", 1),
            "Masayoshi Takanaka added 1 new concert!"
        );
        assert_eq!(
            render_subject("Masayoshi Takanaka", 3),
            "Masayoshi Takanaka added 3 new concerts!"
        );
    }

    #[test]
    fn test_body_lists_events_in_input_order() {
        let body = render_body(&[full_event(), sparse_event()]);

        assert!(body.starts_with("Hello! 2 new events have been added"));

        let first = body.find("Event: Masayoshi Takanaka at Budokan").unwrap();
        let second = body.find("Event: Rainbow Goblins Night").unwrap();
        assert!(first < second);

        assert!(body.contains("Date: 2026-10-03"));
        assert!(body.contains("Venue: Nippon Budokan in Tokyo"));
        assert!(body.contains("Link: https://tickets.example.com/evt1"));
    }

    #[test]
    fn test_body_placeholders_for_missing_fields() {
        let body = render_body(&[sparse_event()]);
        assert!(body.contains("Date: N/A"));
        assert!(body.contains("Venue: N/A in N/A"));
        assert!(body.contains("Link: N/A"));
    }

    #[test]
    fn test_body_has_one_separator_block_per_event() {
        let body = render_body(&[full_event(), sparse_event()]);
        let separators = body.matches("----------------------------------------").count();
        assert_eq!(separators, 2);
    }

    #[test]
    fn test_message_assembly() {
        let subject = render_subject("Masayoshi Takanaka", 1);
        let body = render_body(&[full_event()]);

        let raw = MessageBuilder::new()
            .from("watcher@example.com")
            .to(vec!["a@example.com", "b@example.com"])
            .subject(subject.as_str())
            .text_body(body.as_str())
            .write_to_string()
            .unwrap();

        assert!(raw.contains("Subject: Masayoshi Takanaka added 1 new concert!"));
        assert!(raw.contains("watcher@example.com"));
        assert!(raw.contains("a@example.com"));
        assert!(raw.contains("b@example.com"));
        assert!(raw.contains("Venue: Nippon Budokan in Tokyo"));
    }

    #[tokio::test]
    async fn test_smtp_notifier_without_credentials() {
        let notifier = SmtpNotifier::new("Masayoshi Takanaka".to_string(), None);
        let result = notifier.notify(&[full_event()]).await;
        assert!(matches!(result, Err(NotifyError::MissingCredentials)));
    }
}
