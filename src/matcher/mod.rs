//! Selection of holder credentials satisfying a presentation definition.
//!
//! [`PresentationDefinitionMatchStrategy`] is the contract every matching
//! strategy fulfils: given credentials and a definition, return the matching
//! credentials in their original order. Two strategies are provided:
//!
//! - [`FilterMatchStrategy`] reduces each input descriptor to a group of type
//!   filters and compares claim values by string equality;
//! - [`PresentationExchangeMatchStrategy`] evaluates the constraint fields as
//!   JSONPath expressions and JSON Schema filters.
//!
//! [`MatchStrategy`] wraps either one for callers choosing at runtime.

pub mod filter;
pub mod presentation_exchange;
pub mod type_filter;

pub use filter::{matches, FilterMatchStrategy};
pub use presentation_exchange::PresentationExchangeMatchStrategy;
pub use type_filter::{extract_filter_groups, FilterGroup, TypeFilter};

use crate::core::{credential::Credential, presentation_definition::PresentationDefinition};

/// Errors raised while preparing a presentation definition for matching.
///
/// Credentials themselves never cause an error: a credential that cannot be
/// evaluated simply does not match.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// A type-referencing field has no filter pattern.
    #[error("no filter pattern in presentation definition constraint of input descriptor `{descriptor}`")]
    MissingFilterPattern { descriptor: String },

    /// A constraint field path is not a valid JSONPath expression.
    #[error("invalid JSONPath `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A constraint field filter is not a valid JSON Schema.
    #[error("invalid filter in input descriptor `{descriptor}`: {reason}")]
    InvalidFilter { descriptor: String, reason: String },
}

/// A way of deciding which credentials satisfy a presentation definition.
///
/// Implementations are stateless: concurrent calls share nothing and the
/// result only depends on the arguments.
pub trait PresentationDefinitionMatchStrategy {
    /// Return the credentials satisfying the definition, in input order.
    ///
    /// # Errors
    ///
    /// Fails when the presentation definition is malformed. Nothing is
    /// returned in that case, not even the credentials evaluated so far.
    fn match_credentials<'c, C>(
        &self,
        credentials: &'c [C],
        definition: &PresentationDefinition,
    ) -> Result<Vec<&'c C>, MatchError>
    where
        C: Credential;
}

/// Any of the provided matching strategies.
#[derive(Clone, Debug)]
pub enum MatchStrategy {
    Filter(FilterMatchStrategy),
    PresentationExchange(PresentationExchangeMatchStrategy),
}

impl Default for MatchStrategy {
    fn default() -> Self {
        Self::Filter(FilterMatchStrategy)
    }
}

impl From<FilterMatchStrategy> for MatchStrategy {
    fn from(strategy: FilterMatchStrategy) -> Self {
        Self::Filter(strategy)
    }
}

impl From<PresentationExchangeMatchStrategy> for MatchStrategy {
    fn from(strategy: PresentationExchangeMatchStrategy) -> Self {
        Self::PresentationExchange(strategy)
    }
}

impl PresentationDefinitionMatchStrategy for MatchStrategy {
    fn match_credentials<'c, C>(
        &self,
        credentials: &'c [C],
        definition: &PresentationDefinition,
    ) -> Result<Vec<&'c C>, MatchError>
    where
        C: Credential,
    {
        match self {
            Self::Filter(strategy) => strategy.match_credentials(credentials, definition),
            Self::PresentationExchange(strategy) => {
                strategy.match_credentials(credentials, definition)
            }
        }
    }
}
