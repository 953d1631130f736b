use serde::{Deserialize, Serialize};

/// How many audio streams the session records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioMode {
    One,
    Two,
    None,
}

impl AudioMode {
    pub const OPTIONS: [&'static str; 3] = ["one", "two", "none"];

    pub fn from_option(s: &str) -> Option<Self> {
        match s {
            "one" => Some(AudioMode::One),
            "two" => Some(AudioMode::Two),
            "none" => Some(AudioMode::None),
            _ => None,
        }
    }
}

/// A completed pre-session questionnaire. Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub date: String,
    pub current_time: String,
    pub participant_id: String,
    pub participant_initials: String,
    pub assigned_subject_knowledge: String,
    pub methods_of_analysis: u8,
    pub recruitment_form_completed: bool,
    pub participant_gender: String,
    pub subject_knowledge_topics: [u8; 2],
    pub behavioral_profiles: [u8; 2],
    pub screen_resolution: String,
    pub screen_distance: String,
    pub sampling_rate: String,
    pub additional_notes: String,
    pub audio_recording: AudioMode,
    pub generated_at: String,
    pub generator_version: String,
}

/// Answers collected so far. Saved as-is when the questionnaire is cut short.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_initials: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_subject_knowledge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methods_of_analysis: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruitment_form_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_knowledge_topics: Option<[u8; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavioral_profiles: Option<[u8; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_distance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_recording: Option<AudioMode>,
}

impl ManifestDraft {
    pub fn is_empty(&self) -> bool {
        self == &ManifestDraft::default()
    }

    /// `None` while any answer is missing.
    pub fn finish(&self, generated_at: String, generator_version: String) -> Option<Manifest> {
        Some(Manifest {
            date: self.date.clone()?,
            current_time: self.current_time.clone()?,
            participant_id: self.participant_id.clone()?,
            participant_initials: self.participant_initials.clone()?,
            assigned_subject_knowledge: self.assigned_subject_knowledge.clone()?,
            methods_of_analysis: self.methods_of_analysis?,
            recruitment_form_completed: self.recruitment_form_completed?,
            participant_gender: self.participant_gender.clone()?,
            subject_knowledge_topics: self.subject_knowledge_topics?,
            behavioral_profiles: self.behavioral_profiles?,
            screen_resolution: self.screen_resolution.clone()?,
            screen_distance: self.screen_distance.clone()?,
            sampling_rate: self.sampling_rate.clone()?,
            additional_notes: self.additional_notes.clone()?,
            audio_recording: self.audio_recording?,
            generated_at,
            generator_version,
        })
    }
}
