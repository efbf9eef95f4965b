//! Review section controller.

use std::sync::Arc;

use storefront_commerce::prelude::*;
use storefront_data::ReviewService;
use storefront_observability::StructuredLogger;

use crate::config::ReviewsConfig;
use crate::notify::Notifications;
use crate::sections::render_review_section;
use crate::views::{LoadState, ViewError};

const LOAD_FAILED: &str = "Failed to load reviews";
const SUBMIT_FAILED: &str = "Failed to submit review";
const SUBMIT_OK: &str = "Review submitted successfully!";

/// Customer reviews for one product.
///
/// Owns the review list, its summary and the authoring form. The summary is
/// recomputed from the whole list on every load; nothing is patched in
/// place after a submission.
pub struct ReviewSection<S: ReviewService + ?Sized> {
    product_id: ProductId,
    service: Arc<S>,
    state: LoadState<Vec<Review>>,
    summary: ReviewSummary,
    form: ReviewForm,
    form_error: Option<ValidationError>,
    notifications: Notifications,
    options: ReviewsConfig,
    logger: StructuredLogger,
}

/// Borrowed snapshot handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct ReviewSectionView<'a> {
    pub state: &'a LoadState<Vec<Review>>,
    pub summary: &'a ReviewSummary,
    pub form: &'a ReviewForm,
    pub form_error: Option<&'a ValidationError>,
    pub options: &'a ReviewsConfig,
}

impl<S: ReviewService + ?Sized> ReviewSection<S> {
    /// Create a section in the loading state.
    pub fn new(product_id: ProductId, service: Arc<S>, logger: StructuredLogger) -> Self {
        Self {
            product_id,
            service,
            state: LoadState::Loading,
            summary: ReviewSummary::empty(),
            form: ReviewForm::new(),
            form_error: None,
            notifications: Notifications::new(),
            options: ReviewsConfig::default(),
            logger: logger.for_component("review-section"),
        }
    }

    /// Use review display settings from config.
    pub fn with_options(mut self, options: ReviewsConfig) -> Self {
        self.options = options;
        self
    }

    /// Fetch the review list and recompute the summary.
    ///
    /// Also the retry action after a failed load.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        self.logger
            .debug_builder("Loading reviews")
            .field("product_id", self.product_id.as_str())
            .emit();

        match self.service.get_by_product_id(&self.product_id).await {
            Ok(reviews) => {
                self.summary = summarize(&reviews);
                self.logger
                    .info_builder("Reviews loaded")
                    .field("product_id", self.product_id.as_str())
                    .field("count", self.summary.total_count)
                    .field("average_rating", self.summary.average_rating)
                    .emit();
                self.state = LoadState::Loaded(reviews);
            }
            Err(e) => {
                self.logger
                    .warn_builder("Review load failed")
                    .field("product_id", self.product_id.as_str())
                    .field("error", e.to_string())
                    .emit();
                self.summary = ReviewSummary::empty();
                self.state = LoadState::Failed(e.message_or(LOAD_FAILED));
            }
        }
    }

    /// Validate the draft and send it to the review service.
    ///
    /// Invalid input stays in the form with an inline error and the service
    /// is not called. A refused or cancelled submission returns the form to
    /// editing with the draft intact. On success the form is cleared and
    /// hidden and the list is reloaded.
    pub async fn submit(&mut self) -> Result<Review, ViewError> {
        if self.form.phase() != FormPhase::Editing {
            return Err(CommerceError::InvalidFormTransition {
                from: self.form.phase().as_str(),
                event: FormEvent::BeginSubmit.as_str(),
            }
            .into());
        }

        let submission = match self.form.draft().validate(&self.product_id) {
            Ok(submission) => submission,
            Err(err) => {
                self.logger
                    .debug_builder("Review rejected by validation")
                    .field("field", err.field.as_str())
                    .emit();
                self.form_error = Some(err.clone());
                return Err(err.into());
            }
        };

        self.form_error = None;
        // Dropping this future mid-request puts the form back to editing.
        let pending = self.form.begin_submit()?;
        self.logger
            .info_builder("Submitting review")
            .field("product_id", self.product_id.as_str())
            .field("rating", submission.rating)
            .emit();

        match self.service.create(submission).await {
            Ok(review) => {
                pending.succeed();
                self.load().await;
                self.notifications.success(SUBMIT_OK);
                self.logger
                    .info_builder("Review submitted")
                    .field("review_id", review.id.as_str())
                    .emit();
                Ok(review)
            }
            Err(e) => {
                pending.fail();
                let message = e.message_or(SUBMIT_FAILED);
                self.logger
                    .error_builder("Review submission failed")
                    .field("product_id", self.product_id.as_str())
                    .field("error", e.to_string())
                    .emit();
                self.notifications.error(message.clone());
                Err(ViewError::Submission(message))
            }
        }
    }

    /// "Write Review" pressed.
    pub fn open_form(&mut self) -> Result<FormPhase, ViewError> {
        Ok(self.form.apply(FormEvent::Open)?)
    }

    /// Header toggle pressed.
    pub fn toggle_form(&mut self) -> Result<FormPhase, ViewError> {
        Ok(self.form.apply(FormEvent::Toggle)?)
    }

    /// "Cancel" pressed.
    pub fn cancel_form(&mut self) -> Result<FormPhase, ViewError> {
        self.form_error = None;
        Ok(self.form.apply(FormEvent::Cancel)?)
    }

    /// Star picked in the form.
    pub fn set_rating(&mut self, rating: u8) -> bool {
        self.clear_error_for(ReviewField::Rating);
        self.form.set_rating(rating)
    }

    /// Name typed in the form.
    pub fn set_reviewer_name(&mut self, name: impl Into<String>) -> bool {
        self.clear_error_for(ReviewField::ReviewerName);
        self.form.set_reviewer_name(name)
    }

    /// Review text typed in the form.
    pub fn set_review_text(&mut self, text: impl Into<String>) -> bool {
        self.clear_error_for(ReviewField::ReviewText);
        self.form.set_review_text(text)
    }

    fn clear_error_for(&mut self, field: ReviewField) {
        if self.form_error.as_ref().map(|e| e.field) == Some(field) {
            self.form_error = None;
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn state(&self) -> &LoadState<Vec<Review>> {
        &self.state
    }

    /// Loaded reviews; empty while loading or after a failure.
    pub fn reviews(&self) -> &[Review] {
        self.state.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn summary(&self) -> &ReviewSummary {
        &self.summary
    }

    pub fn form(&self) -> &ReviewForm {
        &self.form
    }

    /// Inline validation error from the last submit attempt.
    pub fn form_error(&self) -> Option<&ValidationError> {
        self.form_error.as_ref()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> ReviewSectionView<'_> {
        ReviewSectionView {
            state: &self.state,
            summary: &self.summary,
            form: &self.form,
            form_error: self.form_error.as_ref(),
            options: &self.options,
        }
    }

    /// Render the section as HTML.
    pub fn render(&self) -> String {
        render_review_section(&self.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastKind;
    use storefront_data::{InMemoryReviewService, ServiceError};
    use storefront_observability::{LogCapture, ViewId};

    fn section(service: &Arc<InMemoryReviewService>) -> ReviewSection<InMemoryReviewService> {
        ReviewSection::new(
            ProductId::new("p1"),
            Arc::clone(service),
            StructuredLogger::new(ViewId::from_string("test")),
        )
    }

    fn seeded() -> Arc<InMemoryReviewService> {
        Arc::new(InMemoryReviewService::with_reviews(vec![
            Review::new("r1", "p1", 5.0),
            Review::new("r2", "p1", 3.0),
            Review::new("r3", "p2", 1.0),
        ]))
    }

    fn fill_form(section: &mut ReviewSection<InMemoryReviewService>, rating: u8, name: &str) {
        section.open_form().unwrap();
        section.set_rating(rating);
        section.set_reviewer_name(name);
        section.set_review_text("Works as described");
    }

    #[tokio::test]
    async fn test_load_computes_summary() {
        let service = seeded();
        let mut section = section(&service);
        assert!(section.state().is_loading());

        section.load().await;

        assert_eq!(section.reviews().len(), 2);
        assert_eq!(section.summary().average_rating, 4.0);
        assert_eq!(section.summary().count_for(5), 1);
    }

    #[tokio::test]
    async fn test_load_failure_degrades_to_empty_summary() {
        let service = seeded();
        let mut section = section(&service);
        section.load().await;

        service.fail_next(ServiceError::Fetch("Network down".into()));
        section.load().await;

        assert_eq!(section.state().error(), Some("Network down"));
        assert!(section.summary().is_empty());
        assert!(section.reviews().is_empty());

        section.load().await;
        assert_eq!(section.reviews().len(), 2);
    }

    #[tokio::test]
    async fn test_load_failure_without_message_uses_default() {
        let service = seeded();
        service.fail_next(ServiceError::Fetch(String::new()));
        let mut section = section(&service);
        section.load().await;
        assert_eq!(section.state().error(), Some(LOAD_FAILED));
    }

    #[tokio::test]
    async fn test_invalid_submit_never_calls_service() {
        let service = seeded();
        let mut section = section(&service);
        section.load().await;
        let calls = service.calls();

        section.open_form().unwrap();
        section.set_rating(4);
        section.set_reviewer_name("   ");
        section.set_review_text("Good");
        let err = section.submit().await.unwrap_err();

        match err {
            ViewError::Validation(e) => assert_eq!(e.field, ReviewField::ReviewerName),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(service.calls(), calls);
        assert_eq!(section.form().phase(), FormPhase::Editing);
        assert_eq!(
            section.form_error().map(|e| e.field),
            Some(ReviewField::ReviewerName)
        );

        section.set_reviewer_name("Ada");
        assert!(section.form_error().is_none());
    }

    #[tokio::test]
    async fn test_submit_success_reloads_and_resets() {
        let service = seeded();
        let mut section = section(&service);
        section.load().await;

        fill_form(&mut section, 1, "Ada");
        let review = section.submit().await.unwrap();

        assert_eq!(review.display_name(), "Ada");
        assert_eq!(section.form().phase(), FormPhase::Hidden);
        assert_eq!(section.form().draft(), &ReviewDraft::default());
        assert_eq!(section.summary().total_count, 3);
        assert_eq!(section.summary().average_rating, 3.0);
        assert_eq!(
            section.notifications().last().map(|t| (t.kind, t.message.as_str())),
            Some((ToastKind::Success, SUBMIT_OK))
        );
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_draft() {
        let service = seeded();
        let mut section = section(&service);
        section.load().await;

        fill_form(&mut section, 5, "Bo");
        service.fail_next(ServiceError::Rejected(String::new()));
        let err = section.submit().await.unwrap_err();

        assert_eq!(err, ViewError::Submission(SUBMIT_FAILED.to_string()));
        assert_eq!(section.form().phase(), FormPhase::Editing);
        assert_eq!(section.form().draft().reviewer_name, "Bo");
        assert_eq!(section.summary().total_count, 2);
        assert_eq!(
            section.notifications().last().map(|t| t.kind),
            Some(ToastKind::Error)
        );

        section.submit().await.unwrap();
        assert_eq!(section.summary().total_count, 3);
    }

    #[tokio::test]
    async fn test_submit_requires_open_form() {
        let service = seeded();
        let mut section = section(&service);
        let err = section.submit().await.unwrap_err();
        assert!(matches!(err, ViewError::State(_)));
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_logs_carry_component() {
        let service = seeded();
        let capture = LogCapture::new();
        let logger = StructuredLogger::new(ViewId::from_string("v"))
            .with_min_level(storefront_observability::LogLevel::Debug)
            .with_capture(capture.clone());
        let mut section = ReviewSection::new(ProductId::new("p1"), service, logger);
        section.load().await;

        let entries = capture.entries();
        assert_eq!(capture.messages(), vec!["Loading reviews", "Reviews loaded"]);
        assert!(entries
            .iter()
            .all(|e| e.component.as_deref() == Some("review-section")));
    }
}
