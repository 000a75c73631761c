//! Call prompt templates and customer context rendering.

/// Language model provider used for inline assistants.
pub const MODEL_PROVIDER: &str = "openai";

/// Language model used for inline assistants.
pub const MODEL_NAME: &str = "gpt-3.5-turbo";

/// Default voice model.
pub const DEFAULT_VOICE: &str = "jennifer-playht";

/// A call prompt template: what the assistant opens with and how it is
/// instructed to behave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPrompt {
    /// What the assistant says when the call connects.
    pub first_message: String,
    /// Base system prompt, before customer context is appended.
    pub system_prompt: String,
    /// Voice model name.
    pub voice: String,
}

impl CallPrompt {
    /// Create a prompt with the default voice.
    pub fn new(first_message: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            first_message: first_message.into(),
            system_prompt: system_prompt.into(),
            voice: DEFAULT_VOICE.to_string(),
        }
    }

    /// Override the voice model.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Follow up with a customer regarding a recent claim.
    pub fn claim_follow_up() -> Self {
        Self::new(
            "Hello, this is Ready Set Insure calling to follow up on your recent claim. \
             Is now a good time to talk?",
            "You are a helpful customer service representative from Ready Set Insure. \
             You're calling to follow up on a customer's recent insurance claim. Be \
             empathetic, clear, and concise. Gather any additional information needed \
             for the claim and answer any questions they might have. Remember, you're \
             representing an insurance company, so maintain a professional tone. If the \
             customer has specific questions about coverage amounts or policy details, \
             let them know you'll note their concerns and have a claims specialist \
             contact them with those details.",
        )
    }

    /// Remind a customer about an upcoming policy renewal.
    pub fn policy_renewal() -> Self {
        Self::new(
            "Hello, I'm calling from Ready Set Insure about your insurance policy \
             that's coming up for renewal soon. Do you have a moment to discuss your \
             options?",
            "You are a customer service representative from Ready Set Insure. You're \
             calling about the customer's insurance policy that's up for renewal. Your \
             goal is to remind them about the renewal date, briefly discuss any changes \
             to their coverage or premiums, and answer basic questions. If they ask for \
             specific details about new rates or want to make changes to their policy, \
             tell them you'll make a note and have a policy specialist call them back \
             with those specific details. Be friendly but professional, and respect \
             their time.",
        )
    }

    /// Collect feedback on a recent interaction.
    pub fn feedback_survey() -> Self {
        Self::new(
            "Hello, I'm calling from Ready Set Insure. We value your feedback and \
             would appreciate a few minutes of your time to discuss your recent \
             experience with us. Is now a good time?",
            "You are a customer service representative from Ready Set Insure \
             conducting a brief satisfaction survey. Ask the customer about their \
             recent experience with the company, whether it was filing a claim, \
             speaking with customer service, or using the website. Your goal is to \
             collect specific feedback on what went well and what could be improved. \
             Keep the conversation relatively short but gather meaningful insights. \
             Thank them for their time and feedback.",
        )
    }

    /// Proactively update a customer on their claim status.
    pub fn claim_status_update() -> Self {
        Self::new(
            "Hello, I'm calling from Ready Set Insure with an update on your recent \
             insurance claim. Do you have a moment to talk?",
            "You are a customer service representative from Ready Set Insure calling \
             to provide an update on a customer's insurance claim. You should inform \
             them about the current status of their claim, any actions that have been \
             taken, and the next steps in the process. Be clear about timeframes. If \
             they have questions about specific details you don't have, offer to have \
             a claims specialist call them back. Be empathetic and understanding, \
             especially if their claim is still being processed or if there are any \
             complications.",
        )
    }

    /// Remind a customer about an upcoming or missed payment.
    pub fn payment_reminder() -> Self {
        Self::new(
            "Hello, I'm calling from Ready Set Insure regarding your insurance policy \
             payment. Is this a good time to talk?",
            "You are a customer service representative from Ready Set Insure calling \
             about a payment matter. If it's an upcoming payment, your tone should be \
             informative and helpful. If it's a missed payment, be understanding but \
             clear about the importance of maintaining coverage. Avoid using \
             threatening language or creating unnecessary pressure. Your goal is to \
             remind them about the payment, explain payment options if they ask, and \
             address any simple questions they might have. For complex account issues, \
             offer to connect them with the billing department.",
        )
    }

    /// A minimal connectivity test call.
    pub fn test_call() -> Self {
        Self::new(
            "Hello, this is a test call from Ready Set Insure. How are you today?",
            "You are making a quick test call. Keep the conversation very brief, just \
             verify that the connection works, thank them for their time, and end the \
             call.",
        )
    }

    /// Look up a template by its key.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "claim_follow_up" => Some(Self::claim_follow_up()),
            "policy_renewal" => Some(Self::policy_renewal()),
            "feedback_survey" => Some(Self::feedback_survey()),
            "claim_status_update" => Some(Self::claim_status_update()),
            "payment_reminder" => Some(Self::payment_reminder()),
            "test_call" => Some(Self::test_call()),
            _ => None,
        }
    }
}

/// Customer details appended to the system prompt so the assistant knows
/// who it is talking to.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    pub name: Option<String>,
    pub policy_number: Option<String>,
    pub status: Option<String>,
    pub email: Option<String>,
    /// Free-form notes for this specific call (e.g., feedback being chased).
    pub notes: Option<String>,
}

impl CallContext {
    /// Attach free-form notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Render the full system prompt: the template's base prompt followed
    /// by a customer-information block and any notes.
    pub fn render_system_prompt(&self, prompt: &CallPrompt) -> String {
        fn field(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or("Unknown")
        }

        let mut context = format!(
            "\nCustomer Information:\n\
             - Name: {}\n\
             - Policy Number: {}\n\
             - Status: {}\n\
             - Email: {}\n",
            field(&self.name),
            field(&self.policy_number),
            field(&self.status),
            field(&self.email),
        );

        if let Some(notes) = &self.notes {
            context.push_str(&format!("\nAdditional Notes:\n{}\n", notes));
        }

        format!("{}\n{}", prompt.system_prompt, context)
    }
}
