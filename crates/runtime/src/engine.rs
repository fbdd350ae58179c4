// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The classification pipeline with a type-state–enforced lifecycle.
//!
//! ```text
//! Classifier<Configured>
//!     │  .prepare(session) / .load()
//!     ▼
//! Classifier<Ready>
//!     │  .classify(input)
//!     ▼
//!   ClassificationOutput
//! ```
//!
//! Each state transition consumes the old value and returns a new one,
//! so classifying before a session is attached is a compile error.

use crate::image_source::{ImageCrateDecoder, ImageDecoder, ImageInput};
use crate::session::{InferenceSession, SessionInputs, SessionIo};
use crate::{ClassifierConfig, RuntimeError, SessionError, StageMetrics};
use result_ranker::{LabelTable, LogitVector, RankedResultSet, Ranker};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tensor_core::PixelBuffer;

// ── Type-state markers ─────────────────────────────────────────

/// Configuration is set but no session is attached.
#[derive(Default)]
pub struct Configured {
    decoder: Option<Arc<dyn ImageDecoder>>,
}

/// Session, labels and IO names are resolved; the classifier can run.
pub struct Ready {
    decoder: Arc<dyn ImageDecoder>,
    session: Arc<dyn InferenceSession>,
    io: SessionIo,
    ranker: Ranker,
}

/// Marker trait for classifier states.
pub trait ClassifierState: std::fmt::Debug {}
impl ClassifierState for Configured {}
impl ClassifierState for Ready {}

impl std::fmt::Debug for Configured {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configured")
            .field("custom_decoder", &self.decoder.is_some())
            .finish()
    }
}

impl std::fmt::Debug for Ready {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ready")
            .field("input", &self.io.input)
            .field("output", &self.io.output)
            .field("labels", &self.ranker.labels().len())
            .field("top_k", &self.ranker.k())
            .finish()
    }
}

// ── Output ─────────────────────────────────────────────────────

/// The result of one classify call.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ClassificationOutput {
    /// Top-K predictions, most probable first.
    pub predictions: RankedResultSet,
    /// Per-stage timings.
    pub metrics: StageMetrics,
}

impl ClassificationOutput {
    /// Model execution time reported by the session, in seconds.
    pub fn inference_seconds(&self) -> f64 {
        self.metrics.inference_seconds()
    }

    /// `(predictions, inference seconds)`.
    pub fn into_parts(self) -> (RankedResultSet, f64) {
        let secs = self.inference_seconds();
        (self.predictions, secs)
    }
}

// ── Classifier ─────────────────────────────────────────────────

/// Image classifier: decode → tensor → session → ranked labels.
///
/// `S` is a type-state marker. A `Classifier<Ready>` is immutable and can be
/// shared behind an `Arc`; concurrent calls serialise only where the
/// session does.
///
/// # Example
/// ```no_run
/// use runtime::{Classifier, ClassifierConfig, ImageInput};
///
/// # async fn example(session: impl runtime::InferenceSession + 'static)
/// #     -> Result<(), runtime::RuntimeError> {
/// let classifier = Classifier::new(ClassifierConfig::default()).prepare(session)?;
/// let output = classifier.classify(&ImageInput::Path("cat.jpg".into())).await?;
/// for p in &output.predictions {
///     println!("{p}");
/// }
/// println!("{}", output.metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct Classifier<S: ClassifierState = Configured> {
    config: ClassifierConfig,
    state: S,
}

// ── Configured → Ready ─────────────────────────────────────────

impl Classifier<Configured> {
    /// Creates a classifier from the given configuration.
    pub fn new(config: ClassifierConfig) -> Self {
        tracing::info!(
            "classifier created for {}x{} input, top {}",
            config.input_width,
            config.input_height,
            config.top_k,
        );
        Self {
            config,
            state: Configured::default(),
        }
    }

    /// Replaces the default `image`-crate decoder.
    pub fn with_decoder(mut self, decoder: impl ImageDecoder + 'static) -> Self {
        self.state.decoder = Some(Arc::new(decoder));
        self
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Loads the label table from `labels_path` and attaches `session`.
    pub fn prepare<T>(self, session: T) -> Result<Classifier<Ready>, RuntimeError>
    where
        T: InferenceSession + 'static,
    {
        let labels =
            LabelTable::from_file(&self.config.labels_path).map_err(RuntimeError::Labels)?;
        self.prepare_with_labels(session, labels)
    }

    /// Attaches `session` with an in-memory label table.
    ///
    /// Steps:
    /// 1. Validate the configuration.
    /// 2. Resolve the input/output names against the session.
    /// 3. Build the ranker and the decoder.
    pub fn prepare_with_labels<T>(
        self,
        session: T,
        labels: LabelTable,
    ) -> Result<Classifier<Ready>, RuntimeError>
    where
        T: InferenceSession + 'static,
    {
        self.config.validate()?;

        let io = SessionIo::resolve(
            &session,
            self.config.input_name.as_deref(),
            self.config.output_name.as_deref(),
        )?;
        tracing::info!("session input '{}', output '{}'", io.input, io.output);

        let ranker = Ranker::new(labels, self.config.top_k)?;
        if ranker.k() > ranker.labels().len() {
            tracing::warn!(
                "top_k {} exceeds the {} known labels; results will be truncated",
                ranker.k(),
                ranker.labels().len(),
            );
        }

        let decoder = match self.state.decoder {
            Some(d) => d,
            None => Arc::new(ImageCrateDecoder::new(self.config.parse_filter()?)),
        };

        Ok(Classifier {
            config: self.config,
            state: Ready {
                decoder,
                session: Arc::new(session),
                io,
                ranker,
            },
        })
    }

    /// Opens `model_path` with ONNX Runtime and calls [`prepare`](Self::prepare).
    #[cfg(feature = "onnx")]
    pub fn load(self) -> Result<Classifier<Ready>, RuntimeError> {
        let session = crate::OnnxSession::from_file(
            &self.config.model_path,
            Some(self.config.resolve_threads()),
        )?;
        self.prepare(session)
    }
}

// ── Ready: classify ────────────────────────────────────────────

impl Classifier<Ready> {
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn ranker(&self) -> &Ranker {
        &self.state.ranker
    }

    pub fn labels(&self) -> &LabelTable {
        self.state.ranker.labels()
    }

    pub fn input_name(&self) -> &str {
        &self.state.io.input
    }

    pub fn output_name(&self) -> &str {
        &self.state.io.output
    }

    pub fn session(&self) -> &dyn InferenceSession {
        self.state.session.as_ref()
    }

    /// Classifies an encoded image.
    ///
    /// Decode and inference run on the blocking pool. Errors from the
    /// decoder and the session are returned unchanged.
    pub async fn classify(&self, input: &ImageInput) -> Result<ClassificationOutput, RuntimeError> {
        let decoder = Arc::clone(&self.state.decoder);
        let input = input.clone();
        let (width, height) = (self.config.input_width, self.config.input_height);

        let (pixels, decode) = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let pixels = decoder.decode(&input, width, height);
            (pixels, start.elapsed())
        })
        .await?;
        let pixels = pixels?;
        tracing::debug!("decode: {:.2}ms", decode.as_secs_f64() * 1000.0);

        self.classify_decoded(pixels, decode).await
    }

    /// Classifies pixels that are already at the model's input size.
    pub async fn classify_pixels(
        &self,
        pixels: PixelBuffer,
    ) -> Result<ClassificationOutput, RuntimeError> {
        self.classify_decoded(pixels, Duration::ZERO).await
    }

    /// Runs the session once on a uniform grey image and returns the length
    /// of the output vector.
    pub async fn probe_output_len(&self) -> Result<usize, RuntimeError> {
        let pixels = PixelBuffer::filled(
            self.config.input_width as usize,
            self.config.input_height as usize,
            [128, 128, 128, 255],
        );
        let inferred = self.infer(pixels).await?;
        Ok(inferred.logits.len())
    }

    async fn classify_decoded(
        &self,
        pixels: PixelBuffer,
        decode: Duration,
    ) -> Result<ClassificationOutput, RuntimeError> {
        let inferred = self.infer(pixels).await?;

        let start = Instant::now();
        let logits = LogitVector::new(inferred.logits)?;
        let predictions = self.state.ranker.rank(&logits)?;
        let postprocess = start.elapsed();
        tracing::debug!(
            "postprocess: {} logits → {} predictions",
            logits.len(),
            predictions.len(),
        );

        let metrics = StageMetrics {
            decode,
            preprocess: inferred.preprocess,
            inference: inferred.inference,
            postprocess,
        };
        tracing::debug!("{}", metrics.summary());

        Ok(ClassificationOutput {
            predictions,
            metrics,
        })
    }

    /// Tensor build + session run on the blocking pool.
    async fn infer(&self, pixels: PixelBuffer) -> Result<Inferred, RuntimeError> {
        let session = Arc::clone(&self.state.session);
        let io = self.state.io.clone();
        let shape = self.config.tensor_shape();
        let profile = self.config.normalization;

        tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let tensor = tensor_core::build(&pixels, shape, &profile)?;
            let preprocess = start.elapsed();
            tracing::debug!("preprocess: tensor {shape} built");

            let mut feeds = SessionInputs::with_capacity(1);
            feeds.insert(io.input.as_str(), &tensor);

            let (mut outputs, inference) = session.run_timed(feeds)?;
            tracing::debug!("inference: {:.2}ms", inference.as_secs_f64() * 1000.0);

            let logits = outputs
                .remove(&io.output)
                .ok_or_else(|| SessionError::MissingOutput(io.output.clone()))?;

            Ok::<_, RuntimeError>(Inferred {
                logits,
                preprocess,
                inference,
            })
        })
        .await?
    }
}

struct Inferred {
    logits: Vec<f32>,
    preprocess: Duration,
    inference: Duration,
}

impl<S: ClassifierState> std::fmt::Debug for Classifier<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("state", &self.state)
            .field("model", &self.config.model_path)
            .field("input", &(self.config.input_width, self.config.input_height))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionOutputs;
    use crate::DecodeError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Returns fixed logits and remembers what it was fed.
    struct FakeSession {
        inputs: Vec<String>,
        outputs: Vec<String>,
        logits: Vec<f32>,
        delay: Duration,
        seen: Mutex<Vec<(String, usize)>>,
        calls: AtomicUsize,
    }

    impl FakeSession {
        fn new(logits: Vec<f32>) -> Self {
            Self {
                inputs: vec!["input".into()],
                outputs: vec!["output".into()],
                logits,
                delay: Duration::ZERO,
                seen: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl InferenceSession for FakeSession {
        fn input_names(&self) -> &[String] {
            &self.inputs
        }
        fn output_names(&self) -> &[String] {
            &self.outputs
        }
        fn run(&self, feeds: SessionInputs<'_>) -> Result<SessionOutputs, SessionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            for (name, tensor) in &feeds {
                self.seen.lock().unwrap().push((name.to_string(), tensor.len()));
            }
            std::thread::sleep(self.delay);
            let mut out = SessionOutputs::new();
            out.insert(self.outputs[0].clone(), self.logits.clone());
            Ok(out)
        }
    }

    /// Queues behind a shared lock before "executing" and reports only the
    /// execution time.
    struct LockedSession {
        names: Vec<String>,
        lock: Mutex<()>,
        queued: Duration,
        executed: Duration,
    }

    impl InferenceSession for LockedSession {
        fn input_names(&self) -> &[String] {
            &self.names
        }
        fn output_names(&self) -> &[String] {
            &self.names
        }
        fn run(&self, feeds: SessionInputs<'_>) -> Result<SessionOutputs, SessionError> {
            self.run_timed(feeds).map(|(out, _)| out)
        }
        fn run_timed(
            &self,
            _feeds: SessionInputs<'_>,
        ) -> Result<(SessionOutputs, Duration), SessionError> {
            std::thread::sleep(self.queued);
            let _guard = self.lock.lock().unwrap();
            let mut out = SessionOutputs::new();
            out.insert(self.names[0].clone(), vec![0.1, 0.9, 0.0]);
            Ok((out, self.executed))
        }
    }

    struct FailingSession {
        names: Vec<String>,
    }

    impl InferenceSession for FailingSession {
        fn input_names(&self) -> &[String] {
            &self.names
        }
        fn output_names(&self) -> &[String] {
            &self.names
        }
        fn run(&self, _feeds: SessionInputs<'_>) -> Result<SessionOutputs, SessionError> {
            Err(SessionError::Run("backend exploded".into()))
        }
    }

    struct FailingDecoder;

    impl ImageDecoder for FailingDecoder {
        fn decode(&self, _: &ImageInput, w: u32, h: u32) -> Result<PixelBuffer, DecodeError> {
            Err(DecodeError::InvalidTarget { width: w, height: h })
        }
    }

    fn small_config(top_k: usize) -> ClassifierConfig {
        ClassifierConfig {
            input_width: 4,
            input_height: 2,
            top_k,
            ..Default::default()
        }
    }

    fn fruit() -> LabelTable {
        ["apple", "banana", "cherry"].into_iter().collect()
    }

    fn ready(logits: Vec<f32>, top_k: usize) -> Classifier<Ready> {
        Classifier::new(small_config(top_k))
            .prepare_with_labels(FakeSession::new(logits), fruit())
            .unwrap()
    }

    #[tokio::test]
    async fn test_classify_pixels() {
        let c = ready(vec![2.0, 1.0, 0.1], 2);
        let out = c
            .classify_pixels(PixelBuffer::filled(4, 2, [255, 255, 255, 255]))
            .await
            .unwrap();

        let p = out.predictions.as_slice();
        assert_eq!(p.len(), 2);
        assert_eq!(p[0].class_name, "apple");
        assert!((p[0].probability - 0.659).abs() < 1e-3);
        assert_eq!(p[1].class_name, "banana");
        assert_eq!(out.metrics.decode, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_session_receives_full_tensor() {
        let session = Arc::new(FakeSession::new(vec![0.0, 0.0, 1.0]));
        let c = Classifier::new(small_config(1))
            .prepare_with_labels(Arc::clone(&session), fruit())
            .unwrap();
        c.classify_pixels(PixelBuffer::filled(4, 2, [0, 0, 0, 255]))
            .await
            .unwrap();

        assert_eq!(session.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*session.seen.lock().unwrap(), vec![("input".to_string(), 3 * 2 * 4)]);
        assert_eq!(c.input_name(), "input");
        assert_eq!(c.output_name(), "output");
        assert_eq!(c.session().input_names(), ["input".to_string()]);
    }

    #[tokio::test]
    async fn test_wrong_pixel_size_is_tensor_error() {
        let c = ready(vec![0.0, 0.0, 1.0], 1);
        let err = c
            .classify_pixels(PixelBuffer::filled(3, 3, [0, 0, 0, 255]))
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Tensor(_)));
    }

    #[tokio::test]
    async fn test_decoder_error_passes_through() {
        let c = Classifier::new(small_config(1))
            .with_decoder(FailingDecoder)
            .prepare_with_labels(FakeSession::new(vec![0.0; 3]), fruit())
            .unwrap();
        let err = c.classify(&ImageInput::Bytes(vec![])).await.unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Decode(DecodeError::InvalidTarget { width: 4, height: 2 })
        ));
    }

    #[tokio::test]
    async fn test_session_error_passes_through() {
        let session = FailingSession {
            names: vec!["x".into()],
        };
        let c = Classifier::new(small_config(1))
            .prepare_with_labels(session, fruit())
            .unwrap();
        let err = c
            .classify_pixels(PixelBuffer::filled(4, 2, [0, 0, 0, 255]))
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Session(SessionError::Run(_))));
        assert_eq!(err.to_string(), "inference failed: backend exploded");
    }

    #[test]
    fn test_prepare_without_inputs() {
        let err = Classifier::new(small_config(1))
            .prepare_with_labels(FailingSession { names: vec![] }, fruit())
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Session(SessionError::NoInputs)));
    }

    #[tokio::test]
    async fn test_missing_output() {
        let mut session = FakeSession::new(vec![1.0, 2.0, 3.0]);
        session.outputs = vec!["logits".into(), "features".into()];
        let config = ClassifierConfig {
            output_name: Some("features".into()),
            ..small_config(1)
        };
        // Fake only fills its first output.
        let c = Classifier::new(config).prepare_with_labels(session, fruit()).unwrap();
        let err = c
            .classify_pixels(PixelBuffer::filled(4, 2, [0, 0, 0, 255]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Session(SessionError::MissingOutput(ref n)) if n == "features"
        ));
    }

    #[tokio::test]
    async fn test_label_count_mismatch() {
        let c = ready(vec![1.0, 2.0], 1);
        let err = c
            .classify_pixels(PixelBuffer::filled(4, 2, [0, 0, 0, 255]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Rank(result_ranker::RankError::LabelCountMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_inference_covers_slow_run() {
        let mut session = FakeSession::new(vec![0.5, 0.1, 0.2]);
        session.delay = Duration::from_millis(20);
        let c = Classifier::new(small_config(3))
            .prepare_with_labels(session, fruit())
            .unwrap();
        let out = c
            .classify_pixels(PixelBuffer::filled(4, 2, [9, 9, 9, 255]))
            .await
            .unwrap();
        assert!(out.metrics.inference >= Duration::from_millis(20));
        assert!(out.metrics.total() >= out.metrics.inference);

        let (predictions, secs) = out.into_parts();
        assert_eq!(predictions.len(), 3);
        assert!(secs >= 0.02);
    }

    #[tokio::test]
    async fn test_inference_excludes_session_queueing() {
        let session = LockedSession {
            names: vec!["io".into()],
            lock: Mutex::new(()),
            queued: Duration::from_millis(30),
            executed: Duration::from_millis(2),
        };
        let c = Classifier::new(small_config(3))
            .prepare_with_labels(session, fruit())
            .unwrap();
        let out = c
            .classify_pixels(PixelBuffer::filled(4, 2, [9, 9, 9, 255]))
            .await
            .unwrap();
        assert_eq!(out.metrics.inference, Duration::from_millis(2));
        assert_eq!(out.predictions.top().unwrap().class_index, 1);
    }

    #[tokio::test]
    async fn test_probe_output_len() {
        let c = ready(vec![0.1; 3], 1);
        assert_eq!(c.probe_output_len().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_reuse_across_calls() {
        let c = Arc::new(ready(vec![0.3, 2.0, -1.0], 1));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let c = Arc::clone(&c);
            handles.push(tokio::spawn(async move {
                c.classify_pixels(PixelBuffer::filled(4, 2, [1, 2, 3, 255]))
                    .await
                    .unwrap()
            }));
        }
        for h in handles {
            let out = h.await.unwrap();
            assert_eq!(out.predictions.top().unwrap().class_name, "banana");
        }
    }

    #[test]
    fn test_prepare_rejects_invalid_config() {
        let err = Classifier::new(small_config(0))
            .prepare_with_labels(FakeSession::new(vec![0.0; 3]), fruit())
            .unwrap_err();
        assert!(matches!(err, RuntimeError::ConfigError(_)));
    }

    #[test]
    fn test_prepare_loads_label_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.txt");
        std::fs::write(&path, "apple\nbanana\ncherry\n").unwrap();
        let config = ClassifierConfig {
            labels_path: path,
            ..small_config(2)
        };
        let c = Classifier::new(config)
            .prepare(FakeSession::new(vec![0.0; 3]))
            .unwrap();
        assert_eq!(c.labels().len(), 3);
        assert_eq!(c.ranker().k(), 2);

        let missing = Classifier::new(small_config(1))
            .prepare(FakeSession::new(vec![0.0; 3]))
            .unwrap_err();
        assert!(matches!(
            missing,
            RuntimeError::Labels(result_ranker::RankError::LabelRead { .. })
        ));
        assert!(missing.to_string().starts_with("cannot load label table: "));
    }

    #[test]
    fn test_debug_shows_state() {
        let c = ready(vec![0.0; 3], 1);
        let s = format!("{c:?}");
        assert!(s.contains("Ready"));
        assert!(s.contains("labels: 3"));
    }
}
