use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use netcheck_common::config::SmtpSettings;
use tracing::debug;

use crate::ports::{Mailer, ReportMail};

/// Submits the report over an authenticated STARTTLS session.
pub struct SmtpMailer;

pub fn compose(mail: &ReportMail) -> anyhow::Result<Message> {
    let from: Mailbox = mail.sender.parse()?;
    let to: Mailbox = mail.recipient.parse()?;

    let message: Message = Message::builder()
        .from(from)
        .to(to)
        .subject(mail.subject.clone())
        .multipart(MultiPart::alternative_plain_html(
            mail.plain.clone(),
            mail.html.clone(),
        ))?;

    Ok(message)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, smtp: &SmtpSettings, mail: &ReportMail) -> anyhow::Result<()> {
        let message: Message = compose(mail)?;

        let transport: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.server)?
                .port(smtp.port)
                .credentials(Credentials::new(smtp.user.clone(), smtp.password.clone()))
                .build();

        let response = transport.send(message).await?;
        debug!("smtp server answered {:?}", response.code());
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
