//! Review-authoring form state machine.

use serde::Serialize;

use crate::error::CommerceError;
use crate::reviews::ReviewDraft;

/// Where the review form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormPhase {
    /// Form collapsed; only the "Write Review" button shows.
    #[default]
    Hidden,
    /// Form open and editable.
    Editing,
    /// Submission in flight; inputs and submit are disabled.
    Submitting,
}

impl FormPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormPhase::Hidden => "hidden",
            FormPhase::Editing => "editing",
            FormPhase::Submitting => "submitting",
        }
    }
}

/// Named events that move the form between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormEvent {
    /// "Write Review" pressed.
    Open,
    /// Header button pressed; opens or closes.
    Toggle,
    /// "Cancel" pressed.
    Cancel,
    /// A validated submission was handed to the review service.
    BeginSubmit,
    /// The review service accepted the submission.
    SubmitSucceeded,
    /// The review service rejected the submission.
    SubmitFailed,
}

impl FormEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormEvent::Open => "open",
            FormEvent::Toggle => "toggle",
            FormEvent::Cancel => "cancel",
            FormEvent::BeginSubmit => "begin_submit",
            FormEvent::SubmitSucceeded => "submit_succeeded",
            FormEvent::SubmitFailed => "submit_failed",
        }
    }
}

/// Review form: its phase plus the draft being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewForm {
    phase: FormPhase,
    draft: ReviewDraft,
}

impl ReviewForm {
    /// Create a hidden, empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Draft contents.
    pub fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    /// Check if the form body is rendered.
    pub fn is_visible(&self) -> bool {
        self.phase != FormPhase::Hidden
    }

    /// Check if the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        self.phase == FormPhase::Editing && self.draft.has_rating()
    }

    /// Label of the header toggle button.
    pub fn toggle_label(&self) -> &'static str {
        if self.is_visible() {
            "Cancel"
        } else {
            "Write Review"
        }
    }

    /// Apply an event, returning the new phase.
    ///
    /// Events that make no sense in the current phase are rejected and leave
    /// the form untouched.
    pub fn apply(&mut self, event: FormEvent) -> Result<FormPhase, CommerceError> {
        use FormEvent::*;
        use FormPhase::*;

        let next = match (self.phase, event) {
            (Hidden, Open | Toggle) => Editing,
            (Editing, Toggle | Cancel) => Hidden,
            (Editing, BeginSubmit) => Submitting,
            (Submitting, SubmitSucceeded) => {
                self.draft = ReviewDraft::default();
                Hidden
            }
            (Submitting, SubmitFailed) => Editing,
            (from, event) => {
                return Err(CommerceError::InvalidFormTransition {
                    from: from.as_str(),
                    event: event.as_str(),
                })
            }
        };

        self.phase = next;
        Ok(next)
    }

    /// Pick a star rating. Ignored unless editing.
    pub fn set_rating(&mut self, rating: u8) -> bool {
        self.edit(|draft| draft.rating = rating.min(5))
    }

    /// Update the name field. Ignored unless editing.
    pub fn set_reviewer_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        self.edit(|draft| draft.reviewer_name = name)
    }

    /// Update the review text. Ignored unless editing.
    pub fn set_review_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        self.edit(|draft| draft.review_text = text)
    }

    /// Enter `Submitting` and hold the form until the request settles.
    ///
    /// If the returned guard is dropped without `succeed` or `fail` (the
    /// request future was cancelled), the form goes back to `Editing` with
    /// the draft intact.
    pub fn begin_submit(&mut self) -> Result<PendingSubmit<'_>, CommerceError> {
        self.apply(FormEvent::BeginSubmit)?;
        Ok(PendingSubmit {
            form: self,
            settled: false,
        })
    }

    fn edit(&mut self, f: impl FnOnce(&mut ReviewDraft)) -> bool {
        if self.phase != FormPhase::Editing {
            return false;
        }
        f(&mut self.draft);
        true
    }
}

/// A submission in flight. See [`ReviewForm::begin_submit`].
#[must_use = "dropping the guard returns the form to editing"]
#[derive(Debug)]
pub struct PendingSubmit<'a> {
    form: &'a mut ReviewForm,
    settled: bool,
}

impl PendingSubmit<'_> {
    /// The review was stored: clear the draft and hide the form.
    pub fn succeed(mut self) -> FormPhase {
        self.settled = true;
        self.form.draft = ReviewDraft::default();
        self.form.phase = FormPhase::Hidden;
        FormPhase::Hidden
    }

    /// The review was refused: back to editing with the draft kept.
    pub fn fail(mut self) -> FormPhase {
        self.settled = true;
        self.form.phase = FormPhase::Editing;
        FormPhase::Editing
    }
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.form.phase = FormPhase::Editing;
        }
    }
}
