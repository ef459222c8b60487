//! Wire types for the `generateContent` endpoint. Only the fields Roster uses
//! are modelled.

use serde::{Deserialize, Serialize};

const HARM_CATEGORIES: [&str; 4] = [
  "HARM_CATEGORY_HARASSMENT",
  "HARM_CATEGORY_HATE_SPEECH",
  "HARM_CATEGORY_SEXUALLY_EXPLICIT",
  "HARM_CATEGORY_DANGEROUS_CONTENT",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest<'a> {
  pub contents:        Vec<Content<'a>>,
  pub safety_settings: Vec<SafetySetting>,
}

impl<'a> GenerateRequest<'a> {
  pub fn text(prompt: &'a str) -> Self {
    Self {
      contents:        vec![Content {
        parts: vec![Part { text: prompt }],
      }],
      safety_settings: HARM_CATEGORIES
        .into_iter()
        .map(|category| SafetySetting {
          category,
          threshold: "BLOCK_MEDIUM_AND_ABOVE",
        })
        .collect(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
  pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Part<'a> {
  pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SafetySetting {
  pub category:  &'static str,
  pub threshold: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
  #[serde(default)]
  pub candidates:      Vec<Candidate>,
  pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
  pub content:       Option<CandidateContent>,
  pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
  #[serde(default)]
  pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
  pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
  pub block_reason: Option<String>,
}

impl GenerateResponse {
  /// Concatenated text of the first candidate, if it has any.
  pub fn first_text(&self) -> Option<String> {
    let content = self.candidates.first()?.content.as_ref()?;
    let text: String = content
      .parts
      .iter()
      .filter_map(|p| p.text.as_deref())
      .collect();
    (!text.is_empty()).then_some(text)
  }
}
