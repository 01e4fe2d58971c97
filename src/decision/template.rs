//! Template renderer: placeholder fill followed by external conversion.
//!
//! Each request gets its own temporary directory under `<scratch>/fill/` for
//! the filled template and another under `<scratch>/convert/` that the
//! converter writes into. Both are owned by a [`RequestWorkspace`] and removed
//! as a whole, so converter by-products go with them.

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tempfile::TempDir;

use super::converter::{convert, ConverterConfig};
use super::model::DecisionView;
use super::traits::DecisionRenderer;
use super::GeneratorError;

pub const TEMPLATE_FILE: &str = "decision_template.fodt";

const FILL_DIR: &str = "fill";
const CONVERT_DIR: &str = "convert";
const WORKSPACE_PREFIX: &str = "decision-";
const FILLED_STEM: &str = "decision";

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap();
}

/// Substitute every `{{name}}` token using `lookup`. Unknown names become
/// empty text.
pub fn fill_placeholders<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<Cow<'a, str>>,
{
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            lookup(&caps[1]).map(Cow::into_owned).unwrap_or_default()
        })
        .into_owned()
}

/// Escape text for inclusion in XML character data.
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Fill the decision template with a view's fields.
pub fn fill_decision_template(template: &str, view: &DecisionView) -> String {
    fill_placeholders(template, |name| {
        view.field(name).map(|value| Cow::Owned(escape_xml(value)))
    })
}

/// Per-request scratch directories.
#[derive(Debug)]
pub struct RequestWorkspace {
    fill: TempDir,
    convert: TempDir,
}

impl RequestWorkspace {
    /// Create fresh `decision-*` directories under the shared fill and
    /// convert roots.
    pub fn create(config: &TemplateConfig) -> Result<Self, GeneratorError> {
        let fill = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(config.fill_dir())
            .map_err(GeneratorError::Workspace)?;
        let convert = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(config.convert_dir())
            .map_err(GeneratorError::Workspace)?;
        Ok(Self { fill, convert })
    }

    pub fn fill_dir(&self) -> &Path {
        self.fill.path()
    }

    pub fn convert_dir(&self) -> &Path {
        self.convert.path()
    }

    /// Remove both directories on the blocking pool. A dropped workspace is
    /// still removed by `TempDir`, just without error reporting.
    pub async fn close(self) {
        let Self { fill, convert } = self;
        let removal = tokio::task::spawn_blocking(move || {
            let fill_path = fill.path().to_path_buf();
            let convert_path = convert.path().to_path_buf();
            [(fill_path, fill.close()), (convert_path, convert.close())]
        })
        .await;

        match removal {
            Ok(results) => {
                for (path, result) in results {
                    if let Err(e) = result {
                        log::warn!(
                            "Failed to remove scratch directory {}: {}",
                            path.display(),
                            e
                        );
                    }
                }
            }
            Err(e) => log::warn!("Scratch cleanup task failed: {}", e),
        }
    }
}

/// Settings for the template strategy.
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    pub template_path: PathBuf,
    pub scratch_dir: PathBuf,
    pub converter: ConverterConfig,
}

impl TemplateConfig {
    pub fn fill_dir(&self) -> PathBuf {
        self.scratch_dir.join(FILL_DIR)
    }

    pub fn convert_dir(&self) -> PathBuf {
        self.scratch_dir.join(CONVERT_DIR)
    }
}

/// Renders decisions by filling a document template and converting it.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    config: TemplateConfig,
}

impl TemplateRenderer {
    pub fn new(config: TemplateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Create the scratch directories if they do not exist yet.
    pub async fn prepare_workspace(&self) -> Result<(), GeneratorError> {
        for dir in [self.config.fill_dir(), self.config.convert_dir()] {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(GeneratorError::Workspace)?;
        }
        Ok(())
    }

    pub async fn load_template(&self) -> Result<String, GeneratorError> {
        let path = &self.config.template_path;
        match tokio::fs::read_to_string(path).await {
            Ok(template) => Ok(template),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(GeneratorError::TemplateNotFound(path.clone()))
            }
            Err(e) => Err(GeneratorError::TemplateIo(e)),
        }
    }

    fn template_extension(&self) -> &str {
        self.config
            .template_path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("fodt")
    }

    pub async fn render_view(&self, view: &DecisionView) -> Result<Vec<u8>, GeneratorError> {
        self.prepare_workspace().await?;
        let template = self.load_template().await?;
        let filled = fill_decision_template(&template, view);

        let workspace = RequestWorkspace::create(&self.config)?;
        let result = self.convert_in(&workspace, filled).await;
        workspace.close().await;
        result
    }

    async fn convert_in(
        &self,
        workspace: &RequestWorkspace,
        filled: String,
    ) -> Result<Vec<u8>, GeneratorError> {
        let input = workspace
            .fill_dir()
            .join(format!("{}.{}", FILLED_STEM, self.template_extension()));
        tokio::fs::write(&input, filled)
            .await
            .map_err(GeneratorError::WriteFilled)?;

        let output = convert(&self.config.converter, &input, workspace.convert_dir()).await?;
        let bytes = tokio::fs::read(&output)
            .await
            .map_err(GeneratorError::ReadOutput)?;

        log::info!(
            "Converted decision template ({} bytes) via {}",
            bytes.len(),
            self.config.converter.program.display()
        );
        Ok(bytes)
    }
}

#[async_trait]
impl DecisionRenderer for TemplateRenderer {
    fn name(&self) -> &'static str {
        "template"
    }

    async fn render(&self, view: &DecisionView) -> Result<Vec<u8>, GeneratorError> {
        self.render_view(view).await
    }
}
