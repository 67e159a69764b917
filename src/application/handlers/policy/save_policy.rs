//! SavePolicyHandler - Command handler for persisting a policy document.
//!
//! One save writes the submitted HTML as a template, then renders it to PDF
//! and DOCX. Steps run strictly in order and the first failure aborts the
//! rest. Artifacts written before a failure stay on disk.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::foundation::Timestamp;
use crate::domain::policy::{ArtifactFormat, BaseName, PolicyError, PolicyInput, SavedPolicyPaths};
use crate::ports::{DocumentConverter, PolicyFileStorage, StoredArtifact};

/// Command to save a policy in all three formats.
#[derive(Debug, Clone)]
pub struct SavePolicyCommand {
    /// Caller-supplied metadata; `companyName` and `title` name the files.
    pub policy: PolicyInput,
    /// Fully rendered HTML, stored verbatim and converted as-is.
    pub html_content: String,
}

/// Result of a successful save.
#[derive(Debug, Clone)]
pub struct SavePolicyResult {
    /// Name shared by the three artifacts.
    pub base_name: BaseName,
    /// Where each artifact was written.
    pub paths: SavedPolicyPaths,
}

/// Handler for saving policies.
pub struct SavePolicyHandler {
    storage: Arc<dyn PolicyFileStorage>,
    pdf_converter: Arc<dyn DocumentConverter>,
    docx_converter: Arc<dyn DocumentConverter>,
}

impl SavePolicyHandler {
    pub fn new(
        storage: Arc<dyn PolicyFileStorage>,
        pdf_converter: Arc<dyn DocumentConverter>,
        docx_converter: Arc<dyn DocumentConverter>,
    ) -> Self {
        Self {
            storage,
            pdf_converter,
            docx_converter,
        }
    }

    pub async fn handle(&self, cmd: SavePolicyCommand) -> Result<SavePolicyResult, PolicyError> {
        self.handle_at(cmd, Timestamp::now()).await
    }

    /// Saves with an explicit clock reading for the base name.
    pub async fn handle_at(
        &self,
        cmd: SavePolicyCommand,
        now: Timestamp,
    ) -> Result<SavePolicyResult, PolicyError> {
        let result = self.save(&cmd, &now).await;

        if let Err(err) = &result {
            error!(code = err.code(), error = %err, "Failed to save policy");
        }

        result
    }

    async fn save(
        &self,
        cmd: &SavePolicyCommand,
        now: &Timestamp,
    ) -> Result<SavePolicyResult, PolicyError> {
        // 1. Make sure the output directories exist
        self.storage.ensure_layout().await?;

        // 2. Derive the shared base name
        let base_name = BaseName::for_policy(&cmd.policy, now)?;

        // 3. Store the HTML verbatim
        let template = self
            .storage
            .write(&base_name, ArtifactFormat::Template, cmd.html_content.as_bytes())
            .await?;
        info!(path = %template.path, "Template saved");

        // 4. Render and store the PDF
        let pdf = self
            .render_and_store(self.pdf_converter.as_ref(), &base_name, &cmd.html_content)
            .await?;

        // 5. Render and store the DOCX
        let docx = self
            .render_and_store(self.docx_converter.as_ref(), &base_name, &cmd.html_content)
            .await?;

        info!(base_name = %base_name, "Policy saved in all formats");

        Ok(SavePolicyResult {
            base_name,
            paths: SavedPolicyPaths::new(
                template.path.as_path(),
                pdf.path.as_path(),
                docx.path.as_path(),
            ),
        })
    }

    async fn render_and_store(
        &self,
        converter: &dyn DocumentConverter,
        base_name: &BaseName,
        html: &str,
    ) -> Result<StoredArtifact, PolicyError> {
        let bytes = converter.convert(html).await?;
        let artifact = self
            .storage
            .write(base_name, converter.format(), &bytes)
            .await?;

        info!(path = %artifact.path, format = %artifact.format, "Document saved");
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{
        ConversionError, ConversionFailure, FilePath, PolicyListingEntry, StorageError,
    };
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // ─────────────────────────────────────────────────────────────────────
    // Mock implementations
    // ─────────────────────────────────────────────────────────────────────

    #[derive(Default)]
    struct MockStorage {
        files: Mutex<HashMap<PathBuf, Vec<u8>>>,
        fail_layout: bool,
        fail_write: Option<ArtifactFormat>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self::default()
        }

        fn failing_layout() -> Self {
            Self {
                fail_layout: true,
                ..Self::default()
            }
        }

        fn failing_write(format: ArtifactFormat) -> Self {
            Self {
                fail_write: Some(format),
                ..Self::default()
            }
        }

        fn content(&self, path: &std::path::Path) -> Option<Vec<u8>> {
            self.files.lock().unwrap().get(path).cloned()
        }

        fn file_count(&self) -> usize {
            self.files.lock().unwrap().len()
        }

        fn has_format(&self, format: ArtifactFormat) -> bool {
            self.files
                .lock()
                .unwrap()
                .keys()
                .any(|p| p.extension().and_then(|e| e.to_str()) == Some(format.extension()))
        }
    }

    #[async_trait]
    impl PolicyFileStorage for MockStorage {
        async fn ensure_layout(&self) -> Result<(), StorageError> {
            if self.fail_layout {
                return Err(StorageError::permission_denied("templates"));
            }
            Ok(())
        }

        fn resolve_path(&self, base: &BaseName, format: ArtifactFormat) -> FilePath {
            FilePath::new(PathBuf::from(format.to_string()).join(base.file_name(format)))
        }

        async fn write(
            &self,
            base: &BaseName,
            format: ArtifactFormat,
            content: &[u8],
        ) -> Result<StoredArtifact, StorageError> {
            if self.fail_write == Some(format) {
                return Err(StorageError::io("disk full"));
            }
            let path = self.resolve_path(base, format);
            self.files
                .lock()
                .unwrap()
                .insert(path.as_path().to_path_buf(), content.to_vec());
            Ok(StoredArtifact::new(path, format))
        }

        async fn list_pdfs(&self) -> Result<Vec<PolicyListingEntry>, StorageError> {
            Ok(vec![])
        }
    }

    struct MockConverter {
        format: ArtifactFormat,
        failure: Option<ConversionFailure>,
        inputs: Mutex<Vec<String>>,
    }

    impl MockConverter {
        fn succeeding(format: ArtifactFormat) -> Self {
            Self {
                format,
                failure: None,
                inputs: Mutex::new(Vec::new()),
            }
        }

        fn failing(format: ArtifactFormat) -> Self {
            Self {
                format,
                failure: Some(ConversionFailure::RenderFailed("engine crashed".to_string())),
                inputs: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.inputs.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentConverter for MockConverter {
        fn format(&self) -> ArtifactFormat {
            self.format
        }

        async fn convert(&self, html: &str) -> Result<Vec<u8>, ConversionError> {
            self.inputs.lock().unwrap().push(html.to_string());
            match &self.failure {
                Some(cause) => Err(ConversionError::new(self.format, cause.clone())),
                None => Ok(format!("{}:{}", self.format, html).into_bytes()),
            }
        }

        async fn is_available(&self) -> bool {
            true
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Test helpers
    // ─────────────────────────────────────────────────────────────────────

    struct Fixture {
        storage: Arc<MockStorage>,
        pdf: Arc<MockConverter>,
        docx: Arc<MockConverter>,
        handler: SavePolicyHandler,
    }

    fn fixture(storage: MockStorage, pdf: MockConverter, docx: MockConverter) -> Fixture {
        let storage = Arc::new(storage);
        let pdf = Arc::new(pdf);
        let docx = Arc::new(docx);
        let handler = SavePolicyHandler::new(storage.clone(), pdf.clone(), docx.clone());
        Fixture {
            storage,
            pdf,
            docx,
            handler,
        }
    }

    fn happy_fixture() -> Fixture {
        fixture(
            MockStorage::new(),
            MockConverter::succeeding(ArtifactFormat::Pdf),
            MockConverter::succeeding(ArtifactFormat::Docx),
        )
    }

    fn command(html: &str) -> SavePolicyCommand {
        SavePolicyCommand {
            policy: PolicyInput::new("Acme Corp!", "Remote Work"),
            html_content: html.to_string(),
        }
    }

    fn fixed_time() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 45).unwrap())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Success path
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn saves_three_artifacts_under_one_base_name() {
        let f = happy_fixture();

        let result = f
            .handler
            .handle_at(command("<h1>Policy</h1>"), fixed_time())
            .await
            .unwrap();

        assert_eq!(
            result.base_name.as_str(),
            "acme_corp__remote_work_2024_01_15t10_30_45z"
        );
        assert_eq!(f.storage.file_count(), 3);
        assert_eq!(
            result.paths.template,
            PathBuf::from("template/acme_corp__remote_work_2024_01_15t10_30_45z.html")
        );
        assert_eq!(
            f.storage.content(&result.paths.template).unwrap(),
            b"<h1>Policy</h1>"
        );
        assert_eq!(
            f.storage.content(&result.paths.pdf).unwrap(),
            b"pdf:<h1>Policy</h1>"
        );
        assert_eq!(
            f.storage.content(&result.paths.docx).unwrap(),
            b"docx:<h1>Policy</h1>"
        );
    }

    #[tokio::test]
    async fn both_converters_receive_the_same_html() {
        let f = happy_fixture();

        f.handler.handle(command("<p>same</p>")).await.unwrap();

        assert_eq!(f.pdf.calls(), vec!["<p>same</p>".to_string()]);
        assert_eq!(f.docx.calls(), vec!["<p>same</p>".to_string()]);
    }

    #[tokio::test]
    async fn second_save_in_same_second_overwrites_all_files() {
        let f = happy_fixture();

        let first = f
            .handler
            .handle_at(command("<p>v1</p>"), fixed_time())
            .await
            .unwrap();
        let second = f
            .handler
            .handle_at(command("<p>v2</p>"), fixed_time())
            .await
            .unwrap();

        assert_eq!(first.paths, second.paths);
        assert_eq!(f.storage.file_count(), 3);
        assert_eq!(f.storage.content(&second.paths.template).unwrap(), b"<p>v2</p>");
        assert_eq!(f.storage.content(&second.paths.pdf).unwrap(), b"pdf:<p>v2</p>");
        assert_eq!(f.storage.content(&second.paths.docx).unwrap(), b"docx:<p>v2</p>");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Failure paths
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn pdf_failure_keeps_template_and_skips_docx() {
        let f = fixture(
            MockStorage::new(),
            MockConverter::failing(ArtifactFormat::Pdf),
            MockConverter::succeeding(ArtifactFormat::Docx),
        );

        let err = f.handler.handle(command("<p/>")).await.unwrap_err();

        assert!(matches!(
            err,
            PolicyError::Conversion { format: ArtifactFormat::Pdf, .. }
        ));
        assert!(f.storage.has_format(ArtifactFormat::Template));
        assert!(!f.storage.has_format(ArtifactFormat::Pdf));
        assert!(!f.storage.has_format(ArtifactFormat::Docx));
        assert!(f.docx.calls().is_empty());
    }

    #[tokio::test]
    async fn docx_failure_keeps_template_and_pdf() {
        let f = fixture(
            MockStorage::new(),
            MockConverter::succeeding(ArtifactFormat::Pdf),
            MockConverter::failing(ArtifactFormat::Docx),
        );

        let err = f.handler.handle(command("<p/>")).await.unwrap_err();

        assert!(matches!(
            err,
            PolicyError::Conversion { format: ArtifactFormat::Docx, .. }
        ));
        assert!(f.storage.has_format(ArtifactFormat::Template));
        assert!(f.storage.has_format(ArtifactFormat::Pdf));
        assert!(!f.storage.has_format(ArtifactFormat::Docx));
    }

    #[tokio::test]
    async fn layout_failure_writes_nothing() {
        let f = fixture(
            MockStorage::failing_layout(),
            MockConverter::succeeding(ArtifactFormat::Pdf),
            MockConverter::succeeding(ArtifactFormat::Docx),
        );

        let err = f.handler.handle(command("<p/>")).await.unwrap_err();

        assert!(matches!(err, PolicyError::Storage(_)));
        assert_eq!(f.storage.file_count(), 0);
        assert!(f.pdf.calls().is_empty());
    }

    #[tokio::test]
    async fn template_write_failure_skips_conversion() {
        let f = fixture(
            MockStorage::failing_write(ArtifactFormat::Template),
            MockConverter::succeeding(ArtifactFormat::Pdf),
            MockConverter::succeeding(ArtifactFormat::Docx),
        );

        let err = f.handler.handle(command("<p/>")).await.unwrap_err();

        assert!(matches!(err, PolicyError::Storage(_)));
        assert!(f.pdf.calls().is_empty());
        assert!(f.docx.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_company_name_is_invalid_input() {
        let f = happy_fixture();
        let cmd = SavePolicyCommand {
            policy: PolicyInput::default().with_field("title", "Remote Work"),
            html_content: "<p/>".to_string(),
        };

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, PolicyError::InvalidInput(_)));
        assert_eq!(f.storage.file_count(), 0);
        assert!(f.pdf.calls().is_empty());
    }
}
