use serde::Deserialize;

use crate::matcher::{FilterMatchStrategy, MatchStrategy, PresentationExchangeMatchStrategy};

/// Matcher settings, as embedded in a wallet's configuration.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct MatcherConfig {
    pub strategy: StrategyKind,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Filter,
    PresentationExchange,
}

impl From<&MatcherConfig> for MatchStrategy {
    fn from(config: &MatcherConfig) -> Self {
        match config.strategy {
            StrategyKind::Filter => FilterMatchStrategy.into(),
            StrategyKind::PresentationExchange => PresentationExchangeMatchStrategy.into(),
        }
    }
}
