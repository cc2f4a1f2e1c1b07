use std::time::Duration;

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use thiserror::Error;

use crate::config::mail_config::{MailConfig, MailConfigError};
use crate::utils::contact_mail::OutboundMail;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("mail configuration error: {0}")]
    Config(#[from] MailConfigError),
    #[error("could not open mail transport: {0}")]
    Transport(String),
    #[error("mail server verification failed: {0}")]
    Verify(String),
    #[error("could not build message: {0}")]
    Message(String),
    #[error("delivery failed: {0}")]
    Send(String),
    #[error("mail server {0} timed out")]
    Timeout(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendReceipt {
    /// Final SMTP reply, e.g. `250 2.0.0 Ok: queued`.
    pub response: String,
}

/// One authenticated session against the outbound mail server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn verify(&self) -> Result<(), RelayError>;
    async fn send(&self, mail: OutboundMail) -> Result<SendReceipt, RelayError>;
}

pub trait TransportFactory: Send + Sync {
    fn open(&self, config: &MailConfig) -> Result<Box<dyn MailTransport>, RelayError>;
}

pub struct SmtpTransportFactory;

impl TransportFactory for SmtpTransportFactory {
    fn open(&self, config: &MailConfig) -> Result<Box<dyn MailTransport>, RelayError> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| RelayError::Transport(e.to_string()))?
        } else {
            let tls = TlsParameters::new(config.host.clone())
                .map_err(|e| RelayError::Transport(e.to_string()))?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .tls(Tls::Opportunistic(tls))
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(config.user.clone(), config.password.clone()))
            .timeout(Some(config.connection_timeout))
            .build();

        tracing::debug!(
            "Opened SMTP transport to {}:{} (secure: {})",
            config.host,
            config.port,
            config.secure
        );

        Ok(Box::new(SmtpSession {
            transport,
            socket_timeout: config.socket_timeout,
        }))
    }
}

struct SmtpSession {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    socket_timeout: Duration,
}

#[async_trait]
impl MailTransport for SmtpSession {
    async fn verify(&self) -> Result<(), RelayError> {
        let outcome = tokio::time::timeout(self.socket_timeout, self.transport.test_connection())
            .await
            .ok();
        verification_result(outcome)
    }

    async fn send(&self, mail: OutboundMail) -> Result<SendReceipt, RelayError> {
        let message = mail.into_message()?;
        let response = tokio::time::timeout(self.socket_timeout, self.transport.send(message))
            .await
            .map_err(|_| RelayError::Timeout("delivery"))?
            .map_err(|e| RelayError::Send(e.to_string()))?;

        let lines: Vec<&str> = response.message().collect();
        Ok(SendReceipt {
            response: format!("{} {}", response.code(), lines.join(" ")),
        })
    }
}

/// `None` means the socket timeout elapsed first.
fn verification_result<E: std::fmt::Display>(outcome: Option<Result<bool, E>>) -> Result<(), RelayError> {
    match outcome {
        None => Err(RelayError::Timeout("verification")),
        Some(Err(e)) => Err(RelayError::Verify(e.to_string())),
        Some(Ok(false)) => Err(RelayError::Verify("server refused the connection".to_string())),
        Some(Ok(true)) => Ok(()),
    }
}
