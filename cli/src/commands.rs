pub mod run;
pub mod targets;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use netcheck_common::config::{
    Config, DEFAULT_REPORT_NAME, DEFAULT_TITLE, Delivery, ProbeSettings, RenderOptions,
    SmtpSettings,
};
use netcheck_common::network::target::TargetCatalog;

#[derive(Parser)]
#[command(name = "netcheck")]
#[command(version, about = "Network health diagnostic with HTML and transcript reports.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every diagnostic stage, write the reports and mail the HTML one
    #[command(alias = "r")]
    Run(RunArgs),
    /// List the hosts, ports and URLs a run probes
    #[command(alias = "t")]
    Targets,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory the reports are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Middle part of the report file names
    #[arg(long, default_value = DEFAULT_REPORT_NAME)]
    pub report_name: String,

    /// Title printed at the top of the console output
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Adds a "Property of <OWNER>" line to the report
    #[arg(long)]
    pub owner: Option<String>,

    /// Escape HTML special characters in report entries
    #[arg(long)]
    pub escape_html: bool,

    /// Verify TLS certificates during the URL checks
    #[arg(long)]
    pub strict_tls: bool,

    #[command(flatten)]
    pub smtp: SmtpArgs,
}

#[derive(Args, Debug)]
pub struct SmtpArgs {
    /// Do not send the report by email
    #[arg(long)]
    pub no_email: bool,

    #[arg(long, env = "NETCHECK_SMTP_SERVER", default_value = SmtpSettings::DEFAULT_SERVER)]
    pub smtp_server: String,

    #[arg(long, env = "NETCHECK_SMTP_PORT", default_value_t = SmtpSettings::DEFAULT_PORT)]
    pub smtp_port: u16,

    #[arg(long, env = "NETCHECK_SMTP_USER")]
    pub smtp_user: Option<String>,

    #[arg(long, env = "NETCHECK_SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    /// Sender address, defaults to the SMTP user
    #[arg(long, env = "NETCHECK_MAIL_FROM")]
    pub mail_from: Option<String>,

    #[arg(long, env = "NETCHECK_MAIL_TO")]
    pub mail_to: Option<String>,

    /// Defaults to "Network Report from <hostname>"
    #[arg(long, env = "NETCHECK_MAIL_SUBJECT")]
    pub mail_subject: Option<String>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl RunArgs {
    pub fn into_config(self, hostname: &str) -> Config {
        let probes = ProbeSettings {
            accept_invalid_certs: !self.strict_tls,
            ..ProbeSettings::default()
        };

        Config {
            output_dir: self.output_dir,
            report_name: self.report_name,
            title: self.title,
            owner: self.owner,
            catalog: TargetCatalog::builtin(),
            probes,
            render: RenderOptions {
                escape_html: self.escape_html,
            },
            delivery: self.smtp.delivery(hostname),
        }
    }
}

impl SmtpArgs {
    pub fn delivery(self, hostname: &str) -> Delivery {
        if self.no_email {
            return Delivery::Disabled;
        }

        let sender: Option<String> = self.mail_from.or_else(|| self.smtp_user.clone());

        let mut missing: Vec<&'static str> = Vec::new();
        if self.smtp_user.is_none() {
            missing.push("smtp user");
        }
        if self.smtp_password.is_none() {
            missing.push("smtp password");
        }
        if sender.is_none() {
            missing.push("sender");
        }
        if self.mail_to.is_none() {
            missing.push("recipient");
        }

        match (self.smtp_user, self.smtp_password, sender, self.mail_to) {
            (Some(user), Some(password), Some(sender), Some(recipient)) => {
                Delivery::Smtp(SmtpSettings {
                    server: self.smtp_server,
                    port: self.smtp_port,
                    user,
                    password,
                    sender,
                    recipient,
                    subject: self
                        .mail_subject
                        .unwrap_or_else(|| format!("Network Report from {hostname}")),
                })
            }
            _ => Delivery::Incomplete { missing },
        }
    }
}
