//! Assessment Models
//!
//! Questions, options, answers and the response store that the scorer,
//! detector, selector and merger operate on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use trait_assessment_core::{CoreError, CoreResult, TraitVector};

/// Question identifier. Base questions use 1..=N, calibration questions a
/// disjoint range.
pub type QuestionId = u32;

/// Whether a question takes one selection or a most-like/second-like pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// One option is chosen
    Single,
    /// A "most like me" and a distinct "second most like me" option are chosen
    Dual,
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionKind::Single => write!(f, "single"),
            QuestionKind::Dual => write!(f, "dual"),
        }
    }
}

/// A selectable option of a scenario question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Value tag, unique within the question ("A", "B", ...)
    pub value: String,
    /// Display text
    pub text: String,
    /// Trait contribution carried by this option
    pub traits: TraitVector,
    /// Optional descriptive tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl QuestionOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>, traits: TraitVector) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            traits,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// An immutable scenario question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub category: String,
    pub scenario: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn new(
        id: QuestionId,
        kind: QuestionKind,
        category: impl Into<String>,
        scenario: impl Into<String>,
        options: Vec<QuestionOption>,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            scenario: scenario.into(),
            kind,
            options,
        }
    }

    /// Look up an option by its value tag
    pub fn option(&self, value: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Look up an option or fail with a not-found error naming the question
    pub fn require_option(&self, value: &str) -> CoreResult<&QuestionOption> {
        self.option(value).ok_or_else(|| {
            CoreError::not_found(format!("option '{}' on question {}", value, self.id))
        })
    }

    pub fn is_dual(&self) -> bool {
        self.kind == QuestionKind::Dual
    }
}

/// A recorded answer to one question.
///
/// For single questions the chosen option's contribution is `primary`. For
/// dual questions `primary` is the most-like option and `secondary` the
/// second-like option; the two must come from different options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<TraitVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<TraitVector>,
    /// Value tag of the option behind `primary`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_choice: Option<String>,
    /// Value tag of the option behind `secondary`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_choice: Option<String>,
}

impl Answer {
    /// Answer a single-choice question
    pub fn single(option: &QuestionOption) -> Self {
        Self {
            kind: QuestionKind::Single,
            primary: Some(option.traits),
            secondary: None,
            primary_choice: Some(option.value.clone()),
            secondary_choice: None,
        }
    }

    /// An empty dual answer, filled in with `set_most_like`/`set_second_like`
    pub fn dual_pending() -> Self {
        Self {
            kind: QuestionKind::Dual,
            primary: None,
            secondary: None,
            primary_choice: None,
            secondary_choice: None,
        }
    }

    /// Answer a dual question in one step
    pub fn dual(most_like: &QuestionOption, second_like: &QuestionOption) -> CoreResult<Self> {
        let mut answer = Self::dual_pending();
        answer.set_most_like(most_like)?;
        answer.set_second_like(second_like)?;
        Ok(answer)
    }

    /// Build an answer from raw contribution vectors, without option tags.
    pub fn from_vectors(
        kind: QuestionKind,
        primary: Option<TraitVector>,
        secondary: Option<TraitVector>,
    ) -> Self {
        Self {
            kind,
            primary,
            secondary,
            primary_choice: None,
            secondary_choice: None,
        }
    }

    /// Record the most-like selection of a dual answer
    pub fn set_most_like(&mut self, option: &QuestionOption) -> CoreResult<()> {
        self.ensure_dual()?;
        if self.secondary_choice.as_deref() == Some(option.value.as_str()) {
            return Err(CoreError::validation(format!(
                "option '{}' is already the second-like choice",
                option.value
            )));
        }
        self.primary = Some(option.traits);
        self.primary_choice = Some(option.value.clone());
        Ok(())
    }

    /// Record the second-like selection of a dual answer
    pub fn set_second_like(&mut self, option: &QuestionOption) -> CoreResult<()> {
        self.ensure_dual()?;
        if self.primary_choice.as_deref() == Some(option.value.as_str()) {
            return Err(CoreError::validation(format!(
                "option '{}' is already the most-like choice",
                option.value
            )));
        }
        self.secondary = Some(option.traits);
        self.secondary_choice = Some(option.value.clone());
        Ok(())
    }

    fn ensure_dual(&self) -> CoreResult<()> {
        if self.kind != QuestionKind::Dual {
            return Err(CoreError::validation(
                "most-like/second-like selections only apply to dual questions",
            ));
        }
        Ok(())
    }

    /// Single: primary present. Dual: both present and distinct.
    pub fn is_complete(&self) -> bool {
        match self.kind {
            QuestionKind::Single => self.primary.is_some(),
            QuestionKind::Dual => {
                self.primary.is_some() && self.secondary.is_some() && self.validate().is_ok()
            }
        }
    }

    /// Reject structurally invalid answers.
    ///
    /// When both option tags are known they decide identity; otherwise two
    /// identical contribution vectors are treated as the same option.
    pub fn validate(&self) -> CoreResult<()> {
        match self.kind {
            QuestionKind::Single => {
                if self.secondary.is_some() || self.secondary_choice.is_some() {
                    return Err(CoreError::validation(
                        "single-choice answer cannot carry a second-like selection",
                    ));
                }
            }
            QuestionKind::Dual => {
                let same_option = match (&self.primary_choice, &self.secondary_choice) {
                    (Some(a), Some(b)) => a == b,
                    _ => matches!((&self.primary, &self.secondary), (Some(a), Some(b)) if a == b),
                };
                if same_option {
                    return Err(CoreError::validation(
                        "the same option cannot be both most-like and second-like",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Map from question identifier to the user's answer.
///
/// Backed by a `BTreeMap`, so iteration is always in ascending identifier
/// order regardless of the order answers were recorded in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseStore {
    answers: BTreeMap<QuestionId, Answer>,
}

impl ResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an answer after validating it
    pub fn record(&mut self, id: QuestionId, answer: Answer) -> CoreResult<()> {
        answer.validate()?;
        self.answers.insert(id, answer);
        Ok(())
    }

    pub fn get(&self, id: QuestionId) -> Option<&Answer> {
        self.answers.get(&id)
    }

    pub fn remove(&mut self, id: QuestionId) -> Option<Answer> {
        self.answers.remove(&id)
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.answers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Answers in ascending identifier order
    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &Answer)> + '_ {
        self.answers.iter().map(|(id, a)| (*id, a))
    }

    pub fn ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.answers.keys().copied()
    }

    /// Validate every stored answer, e.g. after deserializing a snapshot
    pub fn validate(&self) -> CoreResult<()> {
        for (id, answer) in &self.answers {
            answer
                .validate()
                .map_err(|e| CoreError::validation(format!("answer to question {}: {}", id, e)))?;
        }
        Ok(())
    }

    pub(crate) fn insert_unchecked(&mut self, id: QuestionId, answer: Answer) {
        self.answers.insert(id, answer);
    }
}

/// Answer set handed to the downstream archetype classifier.
///
/// Holds exactly the base question identifiers, each answer already merged
/// with any calibration evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionPayload {
    answers: ResponseStore,
}

impl SubmissionPayload {
    pub(crate) fn new(answers: ResponseStore) -> Self {
        Self { answers }
    }

    pub fn answers(&self) -> &ResponseStore {
        &self.answers
    }

    pub fn into_answers(self) -> ResponseStore {
        self.answers
    }
}
