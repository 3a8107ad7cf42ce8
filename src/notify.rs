use color_print::ceprintln;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Fire-and-forget sink for short banners shown next to the transcript.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, title: &str, description: &str);
}

/// Prints banners to stderr so they never mix with the transcript on stdout.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, severity: Severity, title: &str, description: &str) {
        match severity {
            Severity::Info => ceprintln!("<cyan,bold>{}</> {}", title, description),
            Severity::Success => ceprintln!("<green,bold>{}</> {}", title, description),
            Severity::Error => ceprintln!("<red,bold>{}</> {}", title, description),
        }
    }
}
