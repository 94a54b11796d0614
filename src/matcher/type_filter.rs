use std::borrow::Cow;

use super::MatchError;
use crate::core::{
    input_descriptor::{ConstraintsField, InputDescriptor, SchemaRef},
    path,
    presentation_definition::PresentationDefinition,
};

use serde_json::Value as Json;

/// Path of the claim compared against a descriptor's schema references.
const SCHEMA_TYPE_PATH: &str = "type";

/// A normalized type constraint derived from an input descriptor.
///
/// The declared `filter_type` is carried along but never checked at match
/// time: a filter matches on the string content of the claim alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeFilter {
    path: String,
    filter_type: Option<String>,
    pattern: String,
}

impl TypeFilter {
    pub fn new(path: String, filter_type: Option<String>, pattern: String) -> Self {
        Self {
            path,
            filter_type,
            pattern,
        }
    }

    /// Build a filter from a type-referencing constraints field.
    ///
    /// Only the first candidate path is used. The field's filter must carry a
    /// `pattern`, otherwise the definition is malformed.
    pub fn from_field(descriptor_id: &str, field: &ConstraintsField) -> Result<Self, MatchError> {
        let filter = field.filter();
        let pattern = filter
            .and_then(|filter| filter.pattern())
            .ok_or_else(|| MatchError::MissingFilterPattern {
                descriptor: descriptor_id.to_owned(),
            })?;

        Ok(Self {
            path: path::strip_root(field.path().head()).to_owned(),
            filter_type: filter
                .and_then(|filter| filter.filter_type())
                .map(ToOwned::to_owned),
            pattern: pattern.to_owned(),
        })
    }

    /// Build a filter requiring the credential `type` to be the schema URI.
    pub fn from_schema(schema: &SchemaRef) -> Self {
        Self {
            path: SCHEMA_TYPE_PATH.to_owned(),
            filter_type: Some("string".to_owned()),
            pattern: schema.uri().to_owned(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn filter_type(&self) -> Option<&str> {
        self.filter_type.as_deref()
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the claim at this filter's path equals the pattern.
    ///
    /// Scalars compare by their string content; sequences compare by the
    /// content of their last element. Comparison is exact and case-sensitive.
    pub fn matches(&self, document: &Json) -> bool {
        let Some(node) = path::resolve(document, &self.path) else {
            tracing::trace!("claim `{}` is absent", self.path);
            return false;
        };

        claim_content(node).is_some_and(|content| content == self.pattern)
    }
}

/// The type filters derived from one input descriptor, all of which must hold.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterGroup {
    descriptor_id: String,
    filters: Vec<TypeFilter>,
}

impl FilterGroup {
    /// Derive the filter group of an input descriptor.
    ///
    /// Filters from type-referencing fields come first, followed by one
    /// filter per schema reference.
    pub fn from_descriptor(descriptor: &InputDescriptor) -> Result<Self, MatchError> {
        let mut filters = descriptor
            .type_fields()
            .map(|field| TypeFilter::from_field(descriptor.id(), field))
            .collect::<Result<Vec<_>, _>>()?;

        filters.extend(
            descriptor
                .schema()
                .unwrap_or_default()
                .iter()
                .map(TypeFilter::from_schema),
        );

        Ok(Self {
            descriptor_id: descriptor.id().to_owned(),
            filters,
        })
    }

    /// Return the id of the input descriptor this group was derived from.
    pub fn descriptor_id(&self) -> &str {
        &self.descriptor_id
    }

    pub fn filters(&self) -> &[TypeFilter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Whether every filter of the group matches the document.
    pub fn is_satisfied_by(&self, document: &Json) -> bool {
        self.filters.iter().all(|filter| filter.matches(document))
    }
}

/// Derive one filter group per input descriptor, in definition order.
///
/// Descriptors yielding no filter are left out. A type-referencing field
/// without a filter pattern fails the whole extraction.
pub fn extract_filter_groups(
    definition: &PresentationDefinition,
) -> Result<Vec<FilterGroup>, MatchError> {
    let mut groups = Vec::new();

    for descriptor in definition.input_descriptors() {
        let group = FilterGroup::from_descriptor(descriptor)?;
        if group.is_empty() {
            tracing::trace!("input descriptor `{}` has no type filter", descriptor.id());
            continue;
        }
        groups.push(group);
    }

    tracing::debug!(
        "presentation definition `{}` yields {} filter group(s)",
        definition.id(),
        groups.len()
    );

    Ok(groups)
}

/// The string content a claim node is compared by.
///
/// Strings are taken as is, numbers and booleans by their JSON text, and
/// sequences by the content of their last element. `null` and objects have
/// no content.
pub fn claim_content(node: &Json) -> Option<Cow<'_, str>> {
    match node {
        Json::String(s) => Some(Cow::Borrowed(s)),
        Json::Number(n) => Some(Cow::Owned(n.to_string())),
        Json::Bool(b) => Some(Cow::Owned(b.to_string())),
        Json::Array(items) => items.last().and_then(scalar_content),
        Json::Null | Json::Object(_) => None,
    }
}

fn scalar_content(node: &Json) -> Option<Cow<'_, str>> {
    match node {
        Json::Array(_) => None,
        scalar => claim_content(scalar),
    }
}
