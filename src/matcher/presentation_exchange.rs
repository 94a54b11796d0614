use super::{MatchError, PresentationDefinitionMatchStrategy};
use crate::core::{
    credential::Credential,
    input_descriptor::{ConstraintsField, ConstraintsLimitDisclosure, InputDescriptor, Predicate},
    path,
    presentation_definition::PresentationDefinition,
};

use jsonschema::JSONSchema;
use serde_json::Value as Json;
use serde_json_path::JsonPath;

/// Matches credentials by evaluating input descriptors as Presentation Exchange does.
///
/// For every constraint field, the JSONPath expressions are evaluated in order
/// and the first one selecting anything is used. When the field has a filter,
/// at least one selected value must validate against it as a JSON Schema.
/// Optional fields may be missing, but must still validate when present.
///
/// Schema references are satisfied when one of their URIs is a `type` of the
/// credential or the id of its `credentialSchema`.
///
/// A descriptor without constraints or schema references accepts any
/// credential. A definition without descriptors matches nothing.
///
/// A field with a `required` predicate must have a filter, and
/// `limit_disclosure: required` must come with fields. Both are reported as
/// [`MatchError::InvalidFilter`].
///
/// See: [https://identity.foundation/presentation-exchange/spec/v2.0.0/#input-evaluation](https://identity.foundation/presentation-exchange/spec/v2.0.0/#input-evaluation)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PresentationExchangeMatchStrategy;

impl PresentationDefinitionMatchStrategy for PresentationExchangeMatchStrategy {
    fn match_credentials<'c, C>(
        &self,
        credentials: &'c [C],
        definition: &PresentationDefinition,
    ) -> Result<Vec<&'c C>, MatchError>
    where
        C: Credential,
    {
        // Compile everything up front so a malformed definition fails before
        // any credential is looked at.
        let descriptors = definition
            .input_descriptors()
            .iter()
            .map(CompiledDescriptor::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(credentials
            .iter()
            .filter(|credential| {
                let Some(document) = credential.parsed_document() else {
                    tracing::debug!("credential has no parsed document, skipping");
                    return false;
                };
                descriptors
                    .iter()
                    .any(|descriptor| descriptor.is_satisfied_by(document))
            })
            .collect())
    }
}

struct CompiledDescriptor<'d> {
    id: &'d str,
    fields: Vec<CompiledField>,
    schemas: Vec<&'d str>,
}

impl<'d> CompiledDescriptor<'d> {
    fn compile(descriptor: &'d InputDescriptor) -> Result<Self, MatchError> {
        let constraints = descriptor.constraints();
        let fields = constraints
            .map(|constraints| constraints.fields())
            .unwrap_or_default();

        if let Some(ConstraintsLimitDisclosure::Required) =
            constraints.and_then(|constraints| constraints.limit_disclosure())
        {
            if fields.is_empty() {
                return Err(MatchError::InvalidFilter {
                    descriptor: descriptor.id().to_owned(),
                    reason: "Required limit disclosure must have fields.".into(),
                });
            }
        }

        let fields = fields
            .iter()
            .map(|field| CompiledField::compile(descriptor.id(), field))
            .collect::<Result<Vec<_>, _>>()?;

        let schemas = descriptor
            .schema()
            .unwrap_or_default()
            .iter()
            .map(|schema| schema.uri())
            .collect();

        Ok(Self {
            id: descriptor.id(),
            fields,
            schemas,
        })
    }

    fn is_satisfied_by(&self, document: &Json) -> bool {
        if !self.schemas.is_empty()
            && !self
                .schemas
                .iter()
                .any(|uri| declares_schema(document, uri))
        {
            tracing::trace!("input descriptor `{}`: no schema matched", self.id);
            return false;
        }

        self.fields.iter().all(|field| field.is_satisfied_by(document))
    }
}

struct CompiledField {
    paths: Vec<JsonPath>,
    validator: Option<JSONSchema>,
    optional: bool,
}

impl CompiledField {
    fn compile(descriptor_id: &str, field: &ConstraintsField) -> Result<Self, MatchError> {
        let paths = field
            .path()
            .iter()
            .map(|path| {
                JsonPath::parse(path).map_err(|e| MatchError::InvalidPath {
                    path: path.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let (Some(Predicate::Required), None) = (field.predicate(), field.filter()) {
            return Err(MatchError::InvalidFilter {
                descriptor: descriptor_id.to_owned(),
                reason: "Required predicate must have a filter.".into(),
            });
        }

        let validator = match field.filter() {
            Some(filter) => {
                let schema = filter.to_schema();
                let validator =
                    JSONSchema::compile(&schema).map_err(|e| MatchError::InvalidFilter {
                        descriptor: descriptor_id.to_owned(),
                        reason: e.to_string(),
                    })?;
                Some(validator)
            }
            None => None,
        };

        Ok(Self {
            paths,
            validator,
            optional: field.is_optional(),
        })
    }

    fn is_satisfied_by(&self, document: &Json) -> bool {
        // If the result returned no JSONPath match, skip to the next path array element.
        let Some(nodes) = self
            .paths
            .iter()
            .map(|path| path.query(document))
            .find(|nodes| !nodes.is_empty())
        else {
            return self.optional;
        };

        let Some(validator) = &self.validator else {
            return true;
        };

        nodes.iter().any(|node| match validator.validate(node) {
            Ok(()) => true,
            Err(errors) => {
                for error in errors {
                    tracing::debug!("Field did not pass filter validation: {error}");
                }
                false
            }
        })
    }
}

fn declares_schema(document: &Json, uri: &str) -> bool {
    let by_type = match path::resolve(document, "type") {
        Some(Json::Array(types)) => types.iter().any(|t| t.as_str() == Some(uri)),
        Some(Json::String(t)) => t == uri,
        _ => false,
    };

    by_type
        || match path::resolve(document, "credentialSchema") {
            Some(Json::Array(schemas)) => {
                schemas.iter().any(|schema| schema_id(schema) == Some(uri))
            }
            Some(schema) => schema_id(schema) == Some(uri),
            None => false,
        }
}

fn schema_id(schema: &Json) -> Option<&str> {
    schema.get("id").and_then(Json::as_str)
}
