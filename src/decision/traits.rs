//! Traits for decision rendering strategies.

use async_trait::async_trait;

use super::model::DecisionView;
use super::GeneratorError;

/// One way of turning a [`DecisionView`] into PDF bytes.
///
/// Implementations are interchangeable; the service picks one at start-up.
#[async_trait]
pub trait DecisionRenderer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    async fn render(&self, view: &DecisionView) -> Result<Vec<u8>, GeneratorError>;
}
