use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::Responder;

pub const HEADACHE_REPLY: &str = "Based on your symptoms of headache, this could be due to several factors like stress, dehydration, or lack of sleep. I recommend: 1) Rest in a quiet, dark room 2) Stay hydrated 3) Apply a cold compress. If symptoms persist for more than 24 hours or worsen, please consult a doctor.";

pub const FEVER_REPLY: &str = "Fever can indicate your body is fighting an infection. Monitor your temperature and: 1) Rest and stay hydrated 2) Take fever-reducing medication if needed 3) Wear light clothing. Seek immediate medical attention if fever exceeds 103°F (39.4°C) or persists for more than 3 days.";

pub const COUGH_REPLY: &str = "For cough and cold symptoms, try: 1) Warm saltwater gargling 2) Honey and warm water 3) Adequate rest 4) Stay hydrated. If symptoms persist beyond a week or you experience difficulty breathing, please consult a healthcare provider.";

pub const FALLBACK_REPLY: &str = "Thank you for sharing your symptoms. Based on the information provided, I recommend monitoring your condition closely. If symptoms worsen or persist, please consult with a healthcare professional for proper diagnosis and treatment. Would you like to book an appointment with a doctor?";

/// A keyword rule: any keyword appearing in the lowercased input selects
/// the reply.
#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

impl Rule {
    fn matches(&self, folded_input: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| folded_input.contains(keyword))
    }
}

/// Evaluated top to bottom; the first matching rule wins.
pub const RULES: &[Rule] = &[
    Rule {
        name: "headache",
        keywords: &["headache", "head pain"],
        reply: HEADACHE_REPLY,
    },
    Rule {
        name: "fever",
        keywords: &["fever", "temperature"],
        reply: FEVER_REPLY,
    },
    Rule {
        name: "cough",
        keywords: &["cough", "cold"],
        reply: COUGH_REPLY,
    },
];

/// Picks the canned reply for a symptom description.
pub fn match_reply(input: &str) -> &'static str {
    let folded = input.to_lowercase();

    match RULES.iter().find(|rule| rule.matches(&folded)) {
        Some(rule) => {
            debug!("Matched symptom rule '{}'", rule.name);
            rule.reply
        }
        None => {
            debug!("No symptom rule matched, using fallback reply");
            FALLBACK_REPLY
        }
    }
}

/// Answers from the local rule table after an optional "thinking" pause.
pub struct RuleResponder {
    delay: Duration,
}

impl RuleResponder {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[cfg(test)]
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl Responder for RuleResponder {
    async fn respond(&self, input: &str) -> String {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match_reply(input).to_string()
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}
