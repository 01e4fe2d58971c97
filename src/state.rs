//! Shared application state.

use crate::config::AppConfig;
use crate::decision::DecisionService;

#[derive(Clone)]
pub struct AppState {
    pub decisions: DecisionService,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let decisions = DecisionService::from_strategy(config.strategy, config.template.clone());
        log::info!(
            "Decision documents will be rendered with the {} strategy",
            decisions.strategy_name()
        );
        Self { decisions }
    }

    pub fn with_service(decisions: DecisionService) -> Self {
        Self { decisions }
    }
}
