use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use super::Responder;
use crate::diagnose_client::DiagnoseTransport;
use crate::notify::{Notifier, Severity};

/// Reply shown in place of the service's answer when the call fails.
pub const CONNECTION_ERROR_REPLY: &str = "Sorry, I couldn't reach the diagnosis service right now. Please check your connection and try again in a moment.";

/// Forwards the user's text to the diagnosis service. Failures never leave
/// this type: they turn into [`CONNECTION_ERROR_REPLY`] plus an error banner.
pub struct RemoteResponder {
    transport: Arc<dyn DiagnoseTransport>,
    notifier: Arc<dyn Notifier>,
}

impl RemoteResponder {
    pub fn new(transport: Arc<dyn DiagnoseTransport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
        }
    }

    fn connection_error(&self) -> String {
        self.notifier.notify(
            Severity::Error,
            "Connection error",
            "Could not get a reply from the diagnosis service.",
        );
        CONNECTION_ERROR_REPLY.to_string()
    }
}

#[async_trait]
impl Responder for RemoteResponder {
    async fn respond(&self, input: &str) -> String {
        match self.transport.diagnose(input).await {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => {
                warn!("Diagnosis service returned an empty reply");
                self.connection_error()
            }
            Err(e) => {
                error!("Diagnosis request failed: {}", e);
                self.connection_error()
            }
        }
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
