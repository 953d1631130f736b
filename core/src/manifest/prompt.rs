//! Line-based question loop. Invalid answers are explained and asked again;
//! end of input counts as an interruption.

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use super::types::{AudioMode, Manifest, ManifestDraft};
use super::validate::{self, InputError};
use crate::error::ManifestError;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: &str) -> Result<(), ManifestError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, ManifestError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            tracing::info!("input closed while prompting");
            return Err(ManifestError::Interrupted);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn ask_text(&mut self, prompt: &str) -> Result<String, ManifestError> {
        self.read_line(prompt)
    }

    /// Re-prompts until `parse` accepts the answer.
    pub fn ask_valid<T, F>(&mut self, prompt: &str, parse: F) -> Result<T, ManifestError>
    where
        F: Fn(&str) -> Result<T, InputError>,
    {
        loop {
            let raw = self.read_line(prompt)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::warn!(input = %raw, reason = ?e, "rejected answer");
                    writeln!(self.output, "{e}")?;
                }
            }
        }
    }

    pub fn ask_int(&mut self, prompt: &str, min: u8, max: u8) -> Result<u8, ManifestError> {
        self.ask_valid(prompt, |s| {
            validate::parse_int_in_range(s, min as i64, max as i64).map(|v| v as u8)
        })
    }

    pub fn ask_yes_no(&mut self, prompt: &str) -> Result<bool, ManifestError> {
        self.ask_valid(prompt, validate::parse_yes_no)
    }

    pub fn ask_option(&mut self, prompt: &str, options: &[&str]) -> Result<String, ManifestError> {
        self.ask_valid(prompt, |s| validate::parse_option(s, options))
    }

    pub fn ask_date(&mut self, prompt: &str) -> Result<String, ManifestError> {
        self.ask_valid(prompt, validate::parse_date)
    }

    pub fn ask_time(&mut self, prompt: &str) -> Result<String, ManifestError> {
        self.ask_valid(prompt, validate::parse_time)
    }

    /// The first value is kept; only the second is asked again on a duplicate.
    pub fn ask_distinct_pair(
        &mut self,
        first_prompt: &str,
        second_prompt: &str,
        min: u8,
        max: u8,
    ) -> Result<[u8; 2], ManifestError> {
        let first = self.ask_int(first_prompt, min, max)?;
        self.ask_valid(second_prompt, |s| {
            let second = validate::parse_int_in_range(s, min as i64, max as i64)? as u8;
            validate::ensure_distinct(first, second)
        })
    }
}

/// Runs the fixed question sequence, recording each answer into a shared draft
/// so that whoever holds [`Questionnaire::draft_handle`] can save partial work.
pub struct Questionnaire {
    draft: Arc<Mutex<ManifestDraft>>,
}

impl Questionnaire {
    pub fn new() -> Self {
        Self {
            draft: Arc::new(Mutex::new(ManifestDraft::default())),
        }
    }

    pub fn draft_handle(&self) -> Arc<Mutex<ManifestDraft>> {
        Arc::clone(&self.draft)
    }

    pub fn snapshot(&self) -> ManifestDraft {
        lock(&self.draft).clone()
    }

    fn record(&self, f: impl FnOnce(&mut ManifestDraft)) {
        f(&mut lock(&self.draft));
    }

    pub fn run<R: BufRead, W: Write>(
        &self,
        p: &mut Prompter<R, W>,
        generated_at: String,
    ) -> Result<Manifest, ManifestError> {
        p.say("Please answer the following questions:\n")?;

        let v = p.ask_date("Enter today's date (YYYY-MM-DD): ")?;
        self.record(|d| d.date = Some(v));
        let v = p.ask_time("Enter the current time (HH:MM): ")?;
        self.record(|d| d.current_time = Some(v));
        let v = p.ask_text("Enter participant ID number: ")?;
        self.record(|d| d.participant_id = Some(v));
        let v = p.ask_text("Enter participant initials: ")?;
        self.record(|d| d.participant_initials = Some(v));
        let v = p.ask_text("Enter assigned subject knowledge: ")?;
        self.record(|d| d.assigned_subject_knowledge = Some(v));

        let v = p.ask_int("Enter the number of methods of analysis (1-4): ", 1, 4)?;
        self.record(|d| d.methods_of_analysis = Some(v));
        let v = p.ask_yes_no("Was the recruitment form completed? (yes/no): ")?;
        self.record(|d| d.recruitment_form_completed = Some(v));
        let v = p.ask_text("Enter participant gender: ")?;
        self.record(|d| d.participant_gender = Some(v));

        p.say("\nSelect two subject knowledge topics (choose two distinct numbers between 1 and 5).")?;
        let v = p.ask_distinct_pair(
            "Enter first subject knowledge topic (1-5): ",
            "Enter second subject knowledge topic (1-5): ",
            1,
            5,
        )?;
        self.record(|d| d.subject_knowledge_topics = Some(v));

        p.say("\nSelect two behavioral profiles (choose two distinct numbers between 1 and 5).")?;
        let v = p.ask_distinct_pair(
            "Enter first behavioral profile (1-5): ",
            "Enter second behavioral profile (1-5): ",
            1,
            5,
        )?;
        self.record(|d| d.behavioral_profiles = Some(v));

        p.say("\nPlease provide details regarding the eye tracking metrics:")?;
        let v = p.ask_text("Enter the screen resolution (e.g., 1920x1080): ")?;
        self.record(|d| d.screen_resolution = Some(v));
        let v = p.ask_text("Enter the approximate distance from the screen (e.g., in cm): ")?;
        self.record(|d| d.screen_distance = Some(v));
        let v = p.ask_text("Enter the sampling rate (Hz): ")?;
        self.record(|d| d.sampling_rate = Some(v));
        let v = p.ask_text("Enter any additional notes for data analysis: ")?;
        self.record(|d| d.additional_notes = Some(v));

        let answer = p.ask_option(
            "Is audio being recorded on one stream, two streams, or none? (one/two/none): ",
            &AudioMode::OPTIONS,
        )?;
        let mode = AudioMode::from_option(&answer).unwrap_or(AudioMode::None);
        self.record(|d| d.audio_recording = Some(mode));

        let manifest = self
            .snapshot()
            .finish(generated_at, env!("CARGO_PKG_VERSION").to_string())
            .ok_or_else(|| ManifestError::Save(anyhow::anyhow!("questionnaire incomplete")))?;
        Ok(manifest)
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::new()
    }
}

fn lock(draft: &Mutex<ManifestDraft>) -> MutexGuard<'_, ManifestDraft> {
    draft.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
