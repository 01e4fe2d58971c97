//! Generation entry point: normalize, render with the configured strategy,
//! name the result.

use std::str::FromStr;
use std::sync::Arc;

use super::direct::DirectRenderer;
use super::filename::{decision_filename, GenerationStamp};
use super::model::DecisionRecord;
use super::normalize::normalize;
use super::template::{TemplateConfig, TemplateRenderer};
use super::traits::DecisionRenderer;
use super::{GeneratedDocument, GeneratorError};

/// Which renderer a deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStrategy {
    #[default]
    Direct,
    Template,
}

impl FromStr for RenderStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(RenderStrategy::Direct),
            "template" => Ok(RenderStrategy::Template),
            other => Err(format!(
                "unknown render strategy '{other}', expected 'direct' or 'template'"
            )),
        }
    }
}

#[derive(Clone)]
pub struct DecisionService {
    renderer: Arc<dyn DecisionRenderer>,
}

impl DecisionService {
    pub fn new(renderer: Arc<dyn DecisionRenderer>) -> Self {
        Self { renderer }
    }

    pub fn direct() -> Self {
        Self::new(Arc::new(DirectRenderer::new()))
    }

    pub fn template(config: TemplateConfig) -> Self {
        Self::new(Arc::new(TemplateRenderer::new(config)))
    }

    pub fn from_strategy(strategy: RenderStrategy, template: TemplateConfig) -> Self {
        match strategy {
            RenderStrategy::Direct => Self::direct(),
            RenderStrategy::Template => Self::template(template),
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.renderer.name()
    }

    /// Produce the decision PDF for `record`.
    pub async fn generate(
        &self,
        record: &DecisionRecord,
    ) -> Result<GeneratedDocument, GeneratorError> {
        let view = normalize(record);
        let pdf = self.renderer.render(&view).await?;
        let filename = format!(
            "{}.pdf",
            decision_filename(record.driver_name.as_deref(), GenerationStamp::next())
        );

        log::info!(
            "Generated decision {} ({} bytes) with {} renderer",
            filename,
            pdf.len(),
            self.renderer.name()
        );

        Ok(GeneratedDocument {
            filename,
            pdf,
            view,
        })
    }
}
