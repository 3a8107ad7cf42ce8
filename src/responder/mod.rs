pub mod remote;
pub mod rules;

use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;
use tracing::info;

pub use remote::RemoteResponder;
pub use rules::RuleResponder;

use crate::config::{ResponderKind, Settings};
use crate::diagnose_client::DiagnoseClient;
use crate::notify::{Notifier, Severity};

/// Produces the assistant's reply to the latest user turn.
///
/// Implementations always return displayable text; any failure has to be
/// folded into the reply itself.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, input: &str) -> String;

    fn name(&self) -> &'static str;
}

/// Builds the responder selected by the settings.
pub fn from_settings(settings: &Settings, notifier: Arc<dyn Notifier>) -> Result<Box<dyn Responder>> {
    let responder: Box<dyn Responder> = match settings.responder {
        ResponderKind::Rules => Box::new(RuleResponder::new(settings.reply_delay)),
        ResponderKind::Remote => {
            let client = DiagnoseClient::new(settings.diagnose_url.clone(), settings.request_timeout)?;
            info!("Using diagnosis service at {}", client.url());
            notifier.notify(
                Severity::Info,
                "Remote assistant",
                &format!("Replies come from {}", client.url()),
            );
            Box::new(RemoteResponder::new(Arc::new(client), notifier))
        }
    };

    info!("Responder: {}", responder.name());
    Ok(responder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENDPOINT;
    use crate::test_support::RecordingNotifier;

    #[test]
    fn builds_the_selected_responder() {
        let notifier = Arc::new(RecordingNotifier::default());

        let rules = Settings::new(ResponderKind::Rules, DEFAULT_ENDPOINT, 0, 1).unwrap();
        assert_eq!(from_settings(&rules, notifier.clone()).unwrap().name(), "rules");
        assert!(notifier.recorded().is_empty());

        let remote = Settings::new(ResponderKind::Remote, DEFAULT_ENDPOINT, 0, 1).unwrap();
        assert_eq!(from_settings(&remote, notifier.clone()).unwrap().name(), "remote");
        assert_eq!(
            notifier.recorded(),
            vec![(Severity::Info, "Remote assistant".to_string())]
        );
    }
}
