pub mod conversation_state;
pub mod prompt;
pub mod quick_symptoms;
pub mod session;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use conversation_state::{Sender, Turn};
use eyre::Result;
use prompt::generate_prompt;
use quick_symptoms::{quick_symptom_text, symptom_menu};
use rustyline::error::ReadlineError;
use session::ChatSession;
use tracing::{debug, error};

use crate::notify::{Notifier, Severity};
use crate::responder::Responder;

const WELCOME_TEXT: &str = "
AI Health Assistant

Describe your symptoms and I'll share some general guidance.

Things to try
• I have a headache and feel dizzy
• My temperature has been high since yesterday
• /symptoms to pick from common symptoms

/help         Show the help dialogue
/quit         Quit the application
";

const HELP_TEXT: &str = "
AI Health Assistant

/clear        Start a new conversation
/symptoms     List common symptoms
/quick N      Send common symptom number N
/history      Show the conversation so far
/disclaimer   Show the medical disclaimer
/help         Show this help dialogue
/quit         Quit the application
";

const DISCLAIMER_TEXT: &str = "Disclaimer: This AI assistant provides general health information only and should not replace professional medical advice. Always consult with a qualified healthcare provider for proper diagnosis and treatment.";

pub struct ChatContext {
    output: Box<dyn Write>,
    input: Option<String>,
    interactive: bool,
    session: ChatSession,
    responder: Box<dyn Responder>,
    notifier: Arc<dyn Notifier>,
}

impl ChatContext {
    pub fn new(
        output: Box<dyn Write>,
        input: Option<String>,
        interactive: bool,
        responder: Box<dyn Responder>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            output,
            input,
            interactive,
            session: ChatSession::new(),
            responder,
            notifier,
        }
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        if self.interactive {
            self.print_welcome()?;
        }

        // Handle non-interactive mode (single query)
        if let Some(input) = self.input.take() {
            self.handle_input(&input).await?;
            return Ok(ExitCode::SUCCESS);
        }

        if self.interactive {
            self.run_interactive().await?;
        }

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output, "{}", WELCOME_TEXT)?;
        writeln!(self.output, "{}\n", DISCLAIMER_TEXT)?;
        self.print_history()
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            let prompt_text = generate_prompt(None);
            let readline = rl.readline(&prompt_text);

            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    if line.trim() == "/quit" {
                        break;
                    }

                    if let Err(e) = self.handle_input(&line).await {
                        error!("Failed to handle input: {}", e);
                        writeln!(self.output, "Error: {}", e)?;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        Ok(())
    }

    async fn handle_input(&mut self, input: &str) -> Result<()> {
        let mut words = input.split_whitespace();
        let command = words.next().unwrap_or_default();

        match command {
            "/help" => {
                writeln!(self.output, "{}", HELP_TEXT)?;
            }
            // The interactive loop stops before getting here.
            "/quit" => {}
            "/clear" => {
                self.session.reset();
                self.notifier.notify(
                    Severity::Success,
                    "Conversation cleared",
                    "Starting a new conversation.",
                );
                self.print_history()?;
            }
            "/symptoms" => {
                writeln!(self.output, "Common symptoms:\n{}", symptom_menu())?;
                writeln!(self.output, "Use /quick N to send one.")?;
            }
            "/history" => {
                self.print_history()?;
            }
            "/disclaimer" => {
                writeln!(self.output, "{}", DISCLAIMER_TEXT)?;
            }
            "/quick" => {
                let text = words
                    .next()
                    .and_then(|number| number.parse::<usize>().ok())
                    .and_then(quick_symptom_text);

                match text {
                    Some(text) => self.process_chat_input(&text).await?,
                    None => {
                        writeln!(self.output, "Usage: /quick N where N is a number from /symptoms")?;
                    }
                }
            }
            command if command.starts_with('/') => {
                writeln!(self.output, "Unknown command: {}. Type /help for options.", command)?;
            }
            _ => {
                self.process_chat_input(input).await?;
            }
        }

        Ok(())
    }

    async fn process_chat_input(&mut self, input: &str) -> Result<()> {
        let mut rendered = Ok(());
        let sent = self
            .session
            .send(input, self.responder.as_ref(), |turn| {
                rendered = render_submitted(&mut self.output, turn);
            })
            .await;
        rendered?;

        match sent {
            Ok(turn) => render_turn(&mut self.output, turn),
            Err(e) => {
                debug!("Ignoring submission: {}", e);
                Ok(())
            }
        }
    }

    fn print_history(&mut self) -> Result<()> {
        for turn in self.session.conversation().all() {
            render_turn(&mut self.output, turn)?;
        }
        Ok(())
    }
}

/// Echoes the user's turn and shows the typing indicator while the reply is
/// pending.
fn render_submitted(output: &mut dyn Write, turn: &Turn) -> Result<()> {
    render_turn(output, turn)?;
    writeln!(output, "Assistant is typing...")?;
    output.flush()?;
    Ok(())
}

fn render_turn(output: &mut dyn Write, turn: &Turn) -> Result<()> {
    let label = match turn.sender() {
        Sender::User => color_print::cformat!("<blue,bold>{}</>", turn.sender().label()),
        Sender::Assistant => color_print::cformat!("<green,bold>{}</>", turn.sender().label()),
    };
    writeln!(output, "[{}] {}: {}", turn.formatted_time(), label, turn.text())?;
    Ok(())
}
