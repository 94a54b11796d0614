use crate::utils::NonEmptyVec;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// A JSONPath is a string that represents a path to a specific value within a JSON object.
///
/// For syntax details, see [https://identity.foundation/presentation-exchange/spec/v2.0.0/#jsonpath-syntax-definition](https://identity.foundation/presentation-exchange/spec/v2.0.0/#jsonpath-syntax-definition)
pub type JsonPath = String;

/// The predicate Feature introduces properties enabling Verifier to request that Holder apply a predicate and return the result.
///
/// See: [https://identity.foundation/presentation-exchange/#predicate-feature](https://identity.foundation/presentation-exchange/#predicate-feature)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub enum Predicate {
    #[serde(rename = "required")]
    Required,
    #[serde(rename = "preferred")]
    Preferred,
}

/// Input Descriptors are objects used to describe the information a
/// [Verifier](https://identity.foundation/presentation-exchange/spec/v2.0.0/#term:verifier) requires of a
/// [Holder](https://identity.foundation/presentation-exchange/spec/v2.0.0/#term:holder).
///
/// Both `constraints` and the legacy (v1) `schema` list are optional here. A descriptor
/// carrying neither imposes no type constraint on a credential.
///
/// See: [https://identity.foundation/presentation-exchange/spec/v2.0.0/#input-descriptor-object](https://identity.foundation/presentation-exchange/spec/v2.0.0/#input-descriptor-object)
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputDescriptor {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    constraints: Option<Constraints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<Vec<SchemaRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purpose: Option<String>,
}

impl InputDescriptor {
    /// Create a new input descriptor with the given id and no constraints.
    pub fn new(id: String) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Return the id of the input descriptor.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Set the constraints of the input descriptor.
    pub fn set_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Return the constraints of the input descriptor, if any.
    pub fn constraints(&self) -> Option<&Constraints> {
        self.constraints.as_ref()
    }

    /// Add a schema reference to the input descriptor.
    ///
    /// Schema references come from Presentation Exchange v1, where each
    /// descriptor names the credential schemas it accepts.
    pub fn add_schema(mut self, schema: SchemaRef) -> Self {
        self.schema.get_or_insert_with(Vec::new).push(schema);
        self
    }

    /// Return the schema references of the input descriptor, if any.
    pub fn schema(&self) -> Option<&[SchemaRef]> {
        self.schema.as_deref()
    }

    /// Set the name of the input descriptor.
    pub fn set_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Return the name of the input descriptor.
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Set the purpose of the input descriptor.
    ///
    /// If present, the purpose MUST be a string that describes the purpose for which the
    /// [Claim](https://identity.foundation/presentation-exchange/spec/v2.0.0/#term:claim)'s
    /// data is being requested.
    pub fn set_purpose(mut self, purpose: String) -> Self {
        self.purpose = Some(purpose);
        self
    }

    /// Return the purpose of the input descriptor.
    pub fn purpose(&self) -> Option<&String> {
        self.purpose.as_ref()
    }

    /// Return the constraint fields that refer to a credential type, in order.
    ///
    /// A field refers to a type when any of its candidate paths contains `type`.
    pub fn type_fields(&self) -> impl Iterator<Item = &ConstraintsField> {
        self.constraints
            .iter()
            .flat_map(|constraints| constraints.fields())
            .filter(|field| field.is_type_field())
    }
}

/// Constraints are objects used to describe the constraints that a [Holder](https://identity.foundation/presentation-exchange/spec/v2.0.0/#term:holder) must satisfy to fulfill an Input Descriptor.
///
/// A constraint object MAY be empty, or it may include a `fields` and/or `limit_disclosure` property.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<ConstraintsField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit_disclosure: Option<ConstraintsLimitDisclosure>,
}

impl Constraints {
    /// Returns an empty Constraints object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new field constraint to the constraints list.
    pub fn add_constraint(mut self, field: ConstraintsField) -> Self {
        self.fields.get_or_insert_with(Vec::new).push(field);
        self
    }

    /// Returns the fields of the constraints object.
    ///
    /// An absent `fields` property is reported as an empty slice.
    pub fn fields(&self) -> &[ConstraintsField] {
        self.fields.as_deref().unwrap_or_default()
    }

    /// Set the limit disclosure value.
    ///
    /// For more information: see [https://identity.foundation/presentation-exchange/spec/v2.0.0/#limited-disclosure-submissions](https://identity.foundation/presentation-exchange/spec/v2.0.0/#limited-disclosure-submissions)
    pub fn set_limit_disclosure(mut self, limit_disclosure: ConstraintsLimitDisclosure) -> Self {
        self.limit_disclosure = Some(limit_disclosure);
        self
    }

    /// Returns the limit disclosure value.
    pub fn limit_disclosure(&self) -> Option<&ConstraintsLimitDisclosure> {
        self.limit_disclosure.as_ref()
    }
}

/// ConstraintsField objects are used to describe the constraints that a
/// [Holder](https://identity.foundation/presentation-exchange/spec/v2.0.0/#term:holder)
/// must satisfy to fulfill an Input Descriptor.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConstraintsField {
    path: NonEmptyVec<JsonPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    predicate: Option<Predicate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Filter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    optional: Option<bool>,
}

impl From<NonEmptyVec<JsonPath>> for ConstraintsField {
    fn from(path: NonEmptyVec<JsonPath>) -> Self {
        Self {
            path,
            id: None,
            purpose: None,
            name: None,
            predicate: None,
            filter: None,
            optional: None,
        }
    }
}

impl ConstraintsField {
    /// Create a new instance of the constraints field with the given path.
    pub fn new(path: JsonPath) -> ConstraintsField {
        NonEmptyVec::new(path).into()
    }

    /// Add a new candidate path to the constraints field.
    pub fn add_path(mut self, path: JsonPath) -> Self {
        self.path.push(path);
        self
    }

    /// Return the candidate paths of the constraints field, in evaluation order.
    pub fn path(&self) -> &NonEmptyVec<JsonPath> {
        &self.path
    }

    /// Set the id of the constraints field.
    pub fn set_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    /// Return the id of the constraints field.
    pub fn id(&self) -> Option<&String> {
        self.id.as_ref()
    }

    /// Set the purpose of the constraints field.
    pub fn set_purpose(mut self, purpose: String) -> Self {
        self.purpose = Some(purpose);
        self
    }

    /// Return the purpose of the constraints field.
    pub fn purpose(&self) -> Option<&String> {
        self.purpose.as_ref()
    }

    /// Set the name of the constraints field.
    pub fn set_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Return the name of the constraints field.
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Set the filter of the constraints field.
    pub fn set_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Return the filter of the constraints field.
    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Set the predicate of the constraints field.
    ///
    /// If the predicate property is present, the filter property **MUST** also be present.
    pub fn set_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Return the predicate of the constraints field.
    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    /// Set the optional value of the constraints field.
    pub fn set_optional(mut self, optional: bool) -> Self {
        self.optional = Some(optional);
        self
    }

    /// Return the optional value of the constraints field.
    pub fn is_optional(&self) -> bool {
        self.optional.unwrap_or(false)
    }

    /// Whether any candidate path of the field refers to a `type` claim.
    pub fn is_type_field(&self) -> bool {
        self.path.iter().any(|path| path.contains("type"))
    }
}

/// The `filter` of a constraints field: a JSON Schema descriptor.
///
/// The `type` and `pattern` keywords are what type matching reads, so they are
/// kept as explicit fields. Every other keyword is preserved untouched in
/// [`Filter::keywords`] and takes part when the filter is compiled as a schema.
///
/// Both keywords accept any JSON value, so a schema such as
/// `{"type": ["number", "string"]}` still parses. Type matching only reads
/// their string form.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Filter {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    filter_type: Option<Json>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<Json>,
    #[serde(flatten)]
    keywords: Map<String, Json>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_type(mut self, filter_type: String) -> Self {
        self.filter_type = Some(Json::String(filter_type));
        self
    }

    /// The declared JSON type of the filtered value, e.g. `string`.
    ///
    /// `None` when absent or when `type` lists several types.
    pub fn filter_type(&self) -> Option<&str> {
        self.filter_type.as_ref().and_then(Json::as_str)
    }

    pub fn set_pattern(mut self, pattern: String) -> Self {
        self.pattern = Some(Json::String(pattern));
        self
    }

    /// The pattern, if it is a string.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().and_then(Json::as_str)
    }

    /// Add an arbitrary JSON Schema keyword, e.g. `const` or `contains`.
    pub fn set_keyword(mut self, keyword: String, value: Json) -> Self {
        self.keywords.insert(keyword, value);
        self
    }

    pub fn keywords(&self) -> &Map<String, Json> {
        &self.keywords
    }

    /// Return the filter as a JSON Schema document.
    pub fn to_schema(&self) -> Json {
        let mut schema = self.keywords.clone();
        if let Some(filter_type) = &self.filter_type {
            schema.insert("type".into(), filter_type.clone());
        }
        if let Some(pattern) = &self.pattern {
            schema.insert("pattern".into(), pattern.clone());
        }
        Json::Object(schema)
    }
}

/// A legacy (Presentation Exchange v1) schema reference of an input descriptor.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaRef {
    uri: String,
}

impl SchemaRef {
    pub fn new(uri: String) -> Self {
        Self { uri }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintsLimitDisclosure {
    Required,
    Preferred,
}
