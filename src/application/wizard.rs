//! # Workflow Controller
//!
//! Owns the session, gates which step is active, validates whether the user
//! may advance, and issues the two outbound collaborator calls at the right
//! transitions. All state mutation goes through here; collaborator results
//! are merged back only on settled outcomes.

use crate::application::pricing::{self, PriceQuote};
use crate::application::prompt;
use crate::application::session::Session;
use crate::domain::config::AppConfig;
use crate::domain::error::{GenerationError, ValidationError, WizardError};
use crate::domain::traits::{ImageHost, StickerGenerator};
use crate::domain::types::{GenerationRequest, Step, StyleId};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tokio::sync::watch;

/// Behaviour switches resolved once at startup.
#[derive(Debug, Clone)]
pub struct WizardOptions {
    /// When false, step 3 is skipped and `default_quantity` is used.
    pub quantity_step: bool,
    pub default_quantity: u32,
    /// Per-call ceiling of the generation collaborator.
    pub max_images: u32,
}

impl WizardOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            quantity_step: config.wizard.quantity_step,
            default_quantity: config.wizard.default_quantity,
            max_images: config.services.generation.max_images,
        }
    }
}

fn is_absolute_url(s: &str) -> bool {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    let re = URL_RE.get_or_init(|| Regex::new(r"(?i)^https?://.+").expect("Invalid URL pattern"));
    re.is_match(s)
}

pub struct WizardController<H, G> {
    options: WizardOptions,
    session: Session,
    host: H,
    generator: G,
}

impl<H: ImageHost, G: StickerGenerator> WizardController<H, G> {
    pub fn new(options: WizardOptions, host: H, generator: G) -> Self {
        let session = Session::new(options.default_quantity);
        Self {
            options,
            session,
            host,
            generator,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Link an already-public image URL.
    ///
    /// Invalid references (empty, relative, non-http) are a silent no-op.
    /// Returns whether the reference was accepted.
    pub fn submit_image(&mut self, url: &str) -> bool {
        let url = url.trim();
        if !is_absolute_url(url) {
            tracing::debug!(reference = url, "ignoring invalid image reference");
            return false;
        }

        if self.session.source_image.as_deref() != Some(url) {
            self.session.source_image = Some(url.to_string());
            self.session.invalidate_downstream();
        }
        self.session.advance_to(Step::Style);
        true
    }

    /// Push a local file through the hosting collaborator, then link the
    /// returned public URL. Session state is untouched on failure.
    pub async fn upload_image(&mut self, file: &Path) -> Result<String, WizardError> {
        let url = self.host.upload(file).await?;
        tracing::info!(url = %url, "image hosted");
        if !self.submit_image(&url) {
            return Err(WizardError::Upload(
                crate::domain::error::UploadError::Rejected {
                    body: format!("host returned an unusable URL: {url}"),
                },
            ));
        }
        Ok(url)
    }

    /// Clear the photo and everything derived from it. Always legal.
    pub fn remove_image(&mut self) {
        self.session.source_image = None;
        self.session.invalidate_downstream();
        self.session.current_step = Step::Upload;
    }

    pub fn select_style(&mut self, style: StyleId) -> Result<(), ValidationError> {
        if self.session.source_image.is_none() {
            return Err(ValidationError::MissingImage);
        }
        self.session.style = Some(style);
        self.session.invalidate_downstream();
        let target = if self.options.quantity_step {
            Step::Quantity
        } else {
            Step::Review
        };
        self.session.advance_to(target);
        Ok(())
    }

    pub fn select_quantity(&mut self, quantity: u32) -> Result<(), ValidationError> {
        if !pricing::is_offered_quantity(quantity) {
            return Err(ValidationError::QuantityNotOffered(quantity));
        }
        self.session.quantity = quantity;
        self.session.invalidate_downstream();
        self.session.advance_to(Step::Review);
        Ok(())
    }

    /// Confirm the computed price, unlocking generation.
    pub fn accept_price(&mut self) -> Result<PriceQuote, ValidationError> {
        let style = self.session.style.ok_or(ValidationError::MissingStyle)?;
        let quote = pricing::quote(style, self.session.quantity)
            .ok_or(ValidationError::QuantityNotOffered(self.session.quantity))?;
        self.session.price_accepted = true;
        self.session.advance_to(Step::Generate);
        Ok(quote)
    }

    /// Run the generation call without an external cancel signal.
    pub async fn generate(&mut self) -> Result<usize, WizardError> {
        let (_keepalive, cancel) = watch::channel(false);
        self.generate_with_cancel(cancel).await
    }

    /// Run the generation call. The watch channel is the cancel signal: when
    /// it flips to true the call is abandoned and surfaced as
    /// [`GenerationError::Cancelled`], with the session left as it was apart
    /// from the in-flight flag.
    pub async fn generate_with_cancel(
        &mut self,
        mut cancel: watch::Receiver<bool>,
    ) -> Result<usize, WizardError> {
        let (image_url, style) = self.guard_generate()?;
        let num_images = self.session.quantity.min(self.options.max_images);
        let request = GenerationRequest {
            prompt: prompt::build_prompt(style, self.session.quantity),
            image_url,
            num_images,
        };

        tracing::info!(style = style.as_str(), num_images, "starting sticker generation");
        self.session.is_generating = true;
        let outcome = tokio::select! {
            result = self.generator.generate(request) => result,
            _ = cancelled(&mut cancel) => Err(GenerationError::Cancelled),
        };
        self.session.is_generating = false;

        match outcome {
            Ok(urls) if urls.is_empty() => Err(GenerationError::Empty.into()),
            Ok(urls) => {
                let count = urls.len();
                self.session.result_images = urls;
                tracing::info!(count, "generation finished");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "generation failed");
                Err(e.into())
            }
        }
    }

    /// Move forward one step, gated on the current step's preconditions.
    pub fn next_step(&mut self) -> Result<Step, ValidationError> {
        if !self.session.step_complete(self.session.current_step) {
            return Err(ValidationError::StepIncomplete);
        }
        self.session.current_step = self.session.current_step.next(self.options.quantity_step);
        Ok(self.session.current_step)
    }

    /// Move back one step. Clears no data, so the user can review without
    /// losing selections.
    pub fn previous_step(&mut self) -> Step {
        self.session.current_step = self
            .session
            .current_step
            .previous(self.options.quantity_step);
        self.session.current_step
    }

    /// Everything `generate()` needs, or the first unmet precondition.
    fn guard_generate(&self) -> Result<(String, StyleId), ValidationError> {
        if self.session.is_generating {
            return Err(ValidationError::GenerationInFlight);
        }
        let image_url = self
            .session
            .source_image
            .clone()
            .ok_or(ValidationError::MissingImage)?;
        let style = self.session.style.ok_or(ValidationError::MissingStyle)?;
        if !self.session.price_accepted {
            return Err(ValidationError::PriceNotAccepted);
        }
        Ok((image_url, style))
    }
}

/// Resolves once the cancel signal flips to true; never resolves if the
/// sender is dropped without cancelling.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow() {
            return;
        }
        if cancel.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::UploadError;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubHost {
        url: &'static str,
    }

    #[async_trait]
    impl ImageHost for StubHost {
        async fn upload(&self, _file: &Path) -> Result<String, UploadError> {
            Ok(self.url.to_string())
        }
    }

    struct FailingHost;

    #[async_trait]
    impl ImageHost for FailingHost {
        async fn upload(&self, _file: &Path) -> Result<String, UploadError> {
            Err(UploadError::Rejected {
                body: "{\"error\":\"denied\"}".to_string(),
            })
        }
    }

    enum MockOutcome {
        Urls,
        Fail,
        Hang,
    }

    struct MockGenerator {
        calls: Arc<AtomicUsize>,
        outcome: MockOutcome,
    }

    #[async_trait]
    impl StickerGenerator for MockGenerator {
        async fn generate(
            &self,
            request: GenerationRequest,
        ) -> Result<Vec<String>, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                MockOutcome::Urls => Ok((0..request.num_images)
                    .map(|i| format!("https://cdn.example/sticker-{i}.png"))
                    .collect()),
                MockOutcome::Fail => Err(GenerationError::Rejected {
                    detail: "loc: [body, image_url]".to_string(),
                }),
                MockOutcome::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }
    }

    fn controller(
        outcome: MockOutcome,
    ) -> (WizardController<StubHost, MockGenerator>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let options = WizardOptions {
            quantity_step: true,
            default_quantity: 6,
            max_images: 4,
        };
        let controller = WizardController::new(
            options,
            StubHost {
                url: "https://cdn.example/source.png",
            },
            MockGenerator {
                calls: calls.clone(),
                outcome,
            },
        );
        (controller, calls)
    }

    #[tokio::test]
    async fn test_full_run_success() {
        let (mut c, calls) = controller(MockOutcome::Urls);

        c.upload_image(Path::new("selfie.png")).await.unwrap();
        assert_eq!(c.session().current_step, Step::Style);

        c.select_style(StyleId::Kawaii).unwrap();
        assert_eq!(c.session().current_step, Step::Quantity);

        c.select_quantity(4).unwrap();
        assert_eq!(c.session().current_step, Step::Review);

        let quote = c.accept_price().unwrap();
        assert!((quote.total - 0.10).abs() < f64::EPSILON);
        assert_eq!(c.session().current_step, Step::Generate);

        let count = c.generate().await.unwrap();
        assert_eq!(count, 4);
        assert_eq!(c.session().result_images.len(), 4);
        assert!(!c.session().is_generating);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_generate_without_accepted_price_is_rejected() {
        let (mut c, calls) = controller(MockOutcome::Urls);
        c.submit_image("https://cdn.example/source.png");
        c.select_style(StyleId::Chibi).unwrap();

        let err = c.generate().await.unwrap_err();
        assert!(matches!(
            err,
            WizardError::Validation(ValidationError::PriceNotAccepted)
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(c.session().result_images.is_empty());
        assert!(!c.session().is_generating);
    }

    #[tokio::test]
    async fn test_generation_failure_leaves_state_untouched() {
        let (mut c, calls) = controller(MockOutcome::Fail);
        c.submit_image("https://cdn.example/source.png");
        c.select_style(StyleId::Magical).unwrap();
        c.select_quantity(8).unwrap();
        c.accept_price().unwrap();

        let err = c.generate().await.unwrap_err();
        assert!(matches!(err, WizardError::Generation(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(c.session().result_images.is_empty());
        assert!(!c.session().is_generating);
        assert!(c.session().price_accepted);
        assert_eq!(c.session().current_step, Step::Generate);
    }

    #[tokio::test]
    async fn test_style_change_resets_accepted_price() {
        let (mut c, _) = controller(MockOutcome::Urls);
        c.submit_image("https://cdn.example/source.png");
        c.select_style(StyleId::Kawaii).unwrap();
        c.accept_price().unwrap();
        assert!(c.session().price_accepted);

        c.select_style(StyleId::Emoji).unwrap();
        assert!(!c.session().price_accepted);
        assert!(c.session().result_images.is_empty());
    }

    #[tokio::test]
    async fn test_quantity_change_resets_accepted_price() {
        let (mut c, _) = controller(MockOutcome::Urls);
        c.submit_image("https://cdn.example/source.png");
        c.select_style(StyleId::Kawaii).unwrap();
        c.accept_price().unwrap();

        c.select_quantity(12).unwrap();
        assert!(!c.session().price_accepted);
    }

    #[tokio::test]
    async fn test_remove_image_resets_to_upload() {
        let (mut c, _) = controller(MockOutcome::Urls);
        c.submit_image("https://cdn.example/source.png");
        c.select_style(StyleId::Kawaii).unwrap();
        c.select_quantity(6).unwrap();
        c.accept_price().unwrap();
        assert_eq!(c.session().current_step, Step::Generate);

        c.remove_image();
        assert_eq!(c.session().current_step, Step::Upload);
        assert!(c.session().source_image.is_none());
        assert!(!c.session().price_accepted);
        assert!(c.session().result_images.is_empty());
        // selections survive, only the image and derived state are gone
        assert_eq!(c.session().style, Some(StyleId::Kawaii));
    }

    #[tokio::test]
    async fn test_invalid_image_reference_is_silent_noop() {
        let (mut c, _) = controller(MockOutcome::Urls);
        assert!(!c.submit_image(""));
        assert!(!c.submit_image("selfie.png"));
        assert!(!c.submit_image("ftp://host/file.png"));
        assert_eq!(c.session().current_step, Step::Upload);
        assert!(c.session().source_image.is_none());
    }

    #[tokio::test]
    async fn test_image_change_invalidates_downstream() {
        let (mut c, _) = controller(MockOutcome::Urls);
        c.submit_image("https://cdn.example/a.png");
        c.select_style(StyleId::Kawaii).unwrap();
        c.accept_price().unwrap();

        assert!(c.submit_image("https://cdn.example/b.png"));
        assert!(!c.session().price_accepted);
        // re-linking the same image keeps accepted state
        c.accept_price().unwrap();
        assert!(c.submit_image("https://cdn.example/b.png"));
        assert!(c.session().price_accepted);
    }

    #[tokio::test]
    async fn test_generate_rejected_while_in_flight() {
        let (mut c, calls) = controller(MockOutcome::Urls);
        c.submit_image("https://cdn.example/source.png");
        c.select_style(StyleId::Kawaii).unwrap();
        c.accept_price().unwrap();
        c.session.is_generating = true;

        let err = c.generate().await.unwrap_err();
        assert!(matches!(
            err,
            WizardError::Validation(ValidationError::GenerationInFlight)
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_signal_aborts_generation() {
        let (mut c, _) = controller(MockOutcome::Hang);
        c.submit_image("https://cdn.example/source.png");
        c.select_style(StyleId::Kawaii).unwrap();
        c.accept_price().unwrap();

        let (_tx, cancel) = watch::channel(true);
        let err = c.generate_with_cancel(cancel).await.unwrap_err();
        assert!(matches!(
            err,
            WizardError::Generation(GenerationError::Cancelled)
        ));
        assert!(!c.session().is_generating);
        assert!(c.session().result_images.is_empty());
    }

    #[tokio::test]
    async fn test_quantity_is_clamped_to_collaborator_ceiling() {
        let (mut c, _) = controller(MockOutcome::Urls);
        c.submit_image("https://cdn.example/source.png");
        c.select_style(StyleId::Kawaii).unwrap();
        c.select_quantity(12).unwrap();
        c.accept_price().unwrap();

        // the mock returns num_images URLs, so the clamp is observable
        let count = c.generate().await.unwrap();
        assert_eq!(count, 4);
    }

    #[tokio::test]
    async fn test_select_style_requires_image() {
        let (mut c, _) = controller(MockOutcome::Urls);
        assert_eq!(
            c.select_style(StyleId::Kawaii),
            Err(ValidationError::MissingImage)
        );
    }

    #[tokio::test]
    async fn test_select_quantity_rejects_unoffered_size() {
        let (mut c, _) = controller(MockOutcome::Urls);
        assert_eq!(
            c.select_quantity(5),
            Err(ValidationError::QuantityNotOffered(5))
        );
        assert_eq!(c.session().quantity, 6);
    }

    #[tokio::test]
    async fn test_next_step_is_gated() {
        let (mut c, _) = controller(MockOutcome::Urls);
        assert_eq!(c.next_step(), Err(ValidationError::StepIncomplete));

        c.submit_image("https://cdn.example/source.png");
        c.session.current_step = Step::Upload;
        assert_eq!(c.next_step(), Ok(Step::Style));
    }

    #[tokio::test]
    async fn test_previous_step_floors_at_upload() {
        let (mut c, _) = controller(MockOutcome::Urls);
        assert_eq!(c.previous_step(), Step::Upload);
        c.submit_image("https://cdn.example/source.png");
        assert_eq!(c.previous_step(), Step::Upload);
    }

    #[tokio::test]
    async fn test_navigation_skips_disabled_quantity_step() {
        let calls = Arc::new(AtomicUsize::new(0));
        let options = WizardOptions {
            quantity_step: false,
            default_quantity: 6,
            max_images: 4,
        };
        let mut c = WizardController::new(
            options,
            StubHost {
                url: "https://cdn.example/source.png",
            },
            MockGenerator {
                calls,
                outcome: MockOutcome::Urls,
            },
        );

        c.submit_image("https://cdn.example/source.png");
        c.select_style(StyleId::Kawaii).unwrap();
        assert_eq!(c.session().current_step, Step::Review);
        assert_eq!(c.previous_step(), Step::Style);
    }

    #[tokio::test]
    async fn test_upload_failure_leaves_session_untouched() {
        let calls = Arc::new(AtomicUsize::new(0));
        let options = WizardOptions {
            quantity_step: true,
            default_quantity: 6,
            max_images: 4,
        };
        let mut c = WizardController::new(
            options,
            FailingHost,
            MockGenerator {
                calls,
                outcome: MockOutcome::Urls,
            },
        );

        let err = c.upload_image(Path::new("selfie.png")).await.unwrap_err();
        assert!(matches!(err, WizardError::Upload(_)));
        assert!(c.session().source_image.is_none());
        assert_eq!(c.session().current_step, Step::Upload);
    }
}
