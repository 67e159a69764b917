//! Pandoc-based document converter adapter.
//!
//! Renders policy HTML into PDF or DOCX by piping it through an external
//! `pandoc` process:
//! - PDF: `pandoc -f html -t pdf --pdf-engine=<engine>`, A4 with 1in margins
//! - DOCX: `pandoc -f html -t docx`
//!
//! HTML goes in on stdin and the document bytes come back on stdout.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::config::ConverterConfig;
use crate::domain::policy::ArtifactFormat;
use crate::ports::{ConversionError, ConversionFailure, DocumentConverter};

/// Margin applied on every side of a rendered PDF page.
const PAGE_MARGIN: &str = "1in";

/// Converter that shells out to Pandoc for a single output format.
///
/// One instance produces one format. Build a pair with [`PandocConverter::pdf`]
/// and [`PandocConverter::docx`].
///
/// # Example
///
/// ```rust,ignore
/// let config = ConverterConfig::default();
/// let pdf = PandocConverter::pdf(&config);
///
/// let bytes = pdf.convert("<h1>Remote Work</h1>").await?;
/// ```
#[derive(Debug, Clone)]
pub struct PandocConverter {
    format: ArtifactFormat,

    /// Path to pandoc executable. If None, will search PATH.
    pandoc_path: Option<String>,

    /// Engine used for PDF output. Ignored for DOCX.
    pdf_engine: String,

    /// Timeout for one conversion in seconds.
    timeout_secs: u64,
}

impl PandocConverter {
    /// PDF converter configured from `config`.
    pub fn pdf(config: &ConverterConfig) -> Self {
        Self::from_config(ArtifactFormat::Pdf, config)
    }

    /// DOCX converter configured from `config`.
    pub fn docx(config: &ConverterConfig) -> Self {
        Self::from_config(ArtifactFormat::Docx, config)
    }

    fn from_config(format: ArtifactFormat, config: &ConverterConfig) -> Self {
        Self {
            format,
            pandoc_path: config.pandoc_path.clone(),
            pdf_engine: config.pdf_engine.clone(),
            timeout_secs: config.timeout_secs,
        }
    }

    /// Set a custom pandoc path.
    pub fn with_pandoc_path(mut self, path: impl Into<String>) -> Self {
        self.pandoc_path = Some(path.into());
        self
    }

    /// Set the timeout for a conversion.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    fn pandoc_command(&self) -> &str {
        self.pandoc_path.as_deref().unwrap_or("pandoc")
    }

    /// Command-line arguments for this converter's format.
    fn args(&self) -> Vec<String> {
        let mut args: Vec<String> = vec!["-f".into(), "html".into()];

        match self.format {
            ArtifactFormat::Pdf => {
                args.extend([
                    "-t".into(),
                    "pdf".into(),
                    format!("--pdf-engine={}", self.pdf_engine),
                    "-V".into(),
                    "papersize=a4".into(),
                    "-V".into(),
                    format!("geometry:a4paper,margin={PAGE_MARGIN}"),
                ]);
                for side in ["top", "right", "bottom", "left"] {
                    args.push("-V".into());
                    args.push(format!("margin-{side}={PAGE_MARGIN}"));
                }
            }
            ArtifactFormat::Docx => {
                args.extend(["-t".into(), "docx".into()]);
            }
            // Templates are stored verbatim and never rendered.
            ArtifactFormat::Template => {
                args.extend(["-t".into(), "html".into()]);
            }
        }

        args.extend(["-o".into(), "-".into()]);
        args
    }
}

#[async_trait]
impl DocumentConverter for PandocConverter {
    fn format(&self) -> ArtifactFormat {
        self.format
    }

    async fn convert(&self, html: &str) -> Result<Vec<u8>, ConversionError> {
        let format = self.format;

        let mut child = Command::new(self.pandoc_command())
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    ConversionError::backend_unavailable(
                        format,
                        format!("cannot start {}: {}", self.pandoc_command(), e),
                    )
                }
                _ => ConversionError::io(format, format!("Failed to start Pandoc: {}", e)),
            })?;

        // Feed stdin while collecting output so a backend that stalls on
        // either pipe is still bounded by the timeout. Dropping stdin closes it.
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(html.as_bytes()).await?;
            }
            Ok::<(), std::io::Error>(())
        };

        let (fed, output) = tokio::time::timeout(
            Duration::from_secs(self.timeout_secs),
            async move { tokio::join!(feed, child.wait_with_output()) },
        )
        .await
        .map_err(|_| ConversionError::timeout(format, self.timeout_secs))?;

        let output = output
            .map_err(|e| ConversionError::io(format, format!("Pandoc execution failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConversionError::render_failed(format, stderr.trim()));
        }

        // A backend that exits cleanly without reading all input gives a
        // broken pipe here; its exit status is checked first.
        fed.map_err(|e| ConversionError::io(format, format!("Failed to write to Pandoc: {}", e)))?;

        if output.stdout.is_empty() {
            return Err(ConversionError::new(format, ConversionFailure::EmptyOutput));
        }

        debug!(format = %format, bytes = output.stdout.len(), "Pandoc conversion finished");
        Ok(output.stdout)
    }

    async fn is_available(&self) -> bool {
        let output = Command::new(self.pandoc_command())
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await;

        output.map(|o| o.status.success()).unwrap_or(false)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING_PANDOC: &str = "/nonexistent/bin/pandoc-policy-press";

    // ───────────────────────────────────────────────────────────────
    // Argument tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn pdf_args_select_engine_and_page_setup() {
        let converter = PandocConverter::pdf(&ConverterConfig::default());
        let args = converter.args();

        assert_eq!(&args[..4], ["-f", "html", "-t", "pdf"]);
        assert!(args.contains(&"--pdf-engine=wkhtmltopdf".to_string()));
        assert!(args.contains(&"papersize=a4".to_string()));
        assert!(args.contains(&"margin-left=1in".to_string()));
        assert_eq!(&args[args.len() - 2..], ["-o", "-"]);
    }

    #[test]
    fn docx_args_are_plain_conversion() {
        let converter = PandocConverter::docx(&ConverterConfig::default());

        assert_eq!(converter.args(), ["-f", "html", "-t", "docx", "-o", "-"]);
    }

    #[test]
    fn pdf_engine_comes_from_config() {
        let config = ConverterConfig {
            pdf_engine: "weasyprint".to_string(),
            ..ConverterConfig::default()
        };
        let args = PandocConverter::pdf(&config).args();

        assert!(args.contains(&"--pdf-engine=weasyprint".to_string()));
    }

    // ───────────────────────────────────────────────────────────────
    // Builder tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn builder_sets_pandoc_path() {
        let converter =
            PandocConverter::pdf(&ConverterConfig::default()).with_pandoc_path("/usr/local/bin/pandoc");

        assert_eq!(converter.pandoc_command(), "/usr/local/bin/pandoc");
    }

    #[test]
    fn defaults_to_pandoc_on_path() {
        let converter = PandocConverter::docx(&ConverterConfig::default());

        assert_eq!(converter.pandoc_command(), "pandoc");
        assert_eq!(converter.timeout_secs, 30);
    }

    #[test]
    fn builder_sets_timeout() {
        let converter = PandocConverter::docx(&ConverterConfig::default()).with_timeout(5);

        assert_eq!(converter.timeout_secs, 5);
    }

    #[test]
    fn format_matches_constructor() {
        let config = ConverterConfig::default();
        assert_eq!(PandocConverter::pdf(&config).format(), ArtifactFormat::Pdf);
        assert_eq!(PandocConverter::docx(&config).format(), ArtifactFormat::Docx);
    }

    // ───────────────────────────────────────────────────────────────
    // Missing backend tests
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn missing_pandoc_reports_backend_unavailable() {
        let converter =
            PandocConverter::pdf(&ConverterConfig::default()).with_pandoc_path(MISSING_PANDOC);

        let err = converter.convert("<p>hi</p>").await.unwrap_err();

        assert_eq!(err.format, ArtifactFormat::Pdf);
        assert!(matches!(err.cause, ConversionFailure::BackendUnavailable(_)));
    }

    #[tokio::test]
    async fn missing_pandoc_is_not_available() {
        let converter =
            PandocConverter::docx(&ConverterConfig::default()).with_pandoc_path(MISSING_PANDOC);

        assert!(!converter.is_available().await);
    }

    // ───────────────────────────────────────────────────────────────
    // Process tests (scripted stand-in backends)
    // ───────────────────────────────────────────────────────────────

    #[cfg(unix)]
    fn script_backend(dir: &tempfile::TempDir, body: &str) -> String {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("fake-pandoc");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "#!/bin/sh\n{}", body).unwrap();
        file.sync_all().unwrap();
        drop(file);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().to_string()
    }

    #[cfg(unix)]
    fn large_html() -> String {
        format!("<p>{}</p>", "x".repeat(1024 * 1024))
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timeout_covers_backend_that_never_reads_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let converter = PandocConverter::pdf(&ConverterConfig::default())
            .with_pandoc_path(script_backend(&dir, "exec sleep 30"))
            .with_timeout(1);

        let result = tokio::time::timeout(
            Duration::from_secs(10),
            converter.convert(&large_html()),
        )
        .await
        .expect("conversion must honour its own timeout");

        let err = result.unwrap_err();
        assert!(matches!(err.cause, ConversionFailure::Timeout(1)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn large_input_streams_through_backend() {
        let dir = tempfile::TempDir::new().unwrap();
        let converter = PandocConverter::docx(&ConverterConfig::default())
            .with_pandoc_path(script_backend(&dir, "exec cat"));
        let html = large_html();

        let bytes = converter.convert(&html).await.unwrap();

        assert_eq!(bytes.len(), html.len());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_backend_reports_stderr() {
        let dir = tempfile::TempDir::new().unwrap();
        let converter = PandocConverter::pdf(&ConverterConfig::default())
            .with_pandoc_path(script_backend(&dir, "echo 'engine crashed' >&2; exit 3"));

        let err = converter.convert(&large_html()).await.unwrap_err();

        assert!(matches!(err.cause, ConversionFailure::RenderFailed(ref msg) if msg == "engine crashed"));
    }
}
