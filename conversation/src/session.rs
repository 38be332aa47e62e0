//! Per-conversation scratch space and the fixed preference choices.

/// Transient field values accumulated during the registration flow.
/// Lives only in the conversation runtime; discarded once the profile is
/// persisted or the conversation is cancelled.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub school: Option<String>,
    pub preference: Option<Preference>,
}

/// The four fixed preference choices, selected by their menu number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    AiStrategy,
    SatActPrep,
    EssayAssistance,
    Mentorship,
}

impl Preference {
    /// Parses the literal menu number "1".."4". Anything else is rejected.
    pub fn from_choice(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Preference::AiStrategy),
            "2" => Some(Preference::SatActPrep),
            "3" => Some(Preference::EssayAssistance),
            "4" => Some(Preference::Mentorship),
            _ => None,
        }
    }

    /// The descriptive label stored in the profile and shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Preference::AiStrategy => "Use AI to strategize where to apply",
            Preference::SatActPrep => "Help with SAT / ACT preparation",
            Preference::EssayAssistance => "Assistance with writing essays",
            Preference::Mentorship => "Affordable mentorship",
        }
    }
}
