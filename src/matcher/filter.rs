use super::{
    type_filter::{extract_filter_groups, FilterGroup},
    MatchError, PresentationDefinitionMatchStrategy,
};
use crate::core::{credential::Credential, presentation_definition::PresentationDefinition};

/// Matches credentials on the type filters of each input descriptor.
///
/// A credential matches when at least one descriptor's filter group is fully
/// satisfied. Descriptors without type filters are ignored, so a definition
/// without any type filter matches no credential at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterMatchStrategy;

impl PresentationDefinitionMatchStrategy for FilterMatchStrategy {
    fn match_credentials<'c, C>(
        &self,
        credentials: &'c [C],
        definition: &PresentationDefinition,
    ) -> Result<Vec<&'c C>, MatchError>
    where
        C: Credential,
    {
        let groups = extract_filter_groups(definition)?;

        Ok(credentials
            .iter()
            .filter(|credential| matches(*credential, &groups))
            .collect())
    }
}

/// Whether the credential satisfies every filter of at least one group.
pub fn matches<C>(credential: &C, groups: &[FilterGroup]) -> bool
where
    C: Credential + ?Sized,
{
    let Some(document) = credential.parsed_document() else {
        tracing::debug!("credential has no parsed document, skipping");
        return false;
    };

    groups.iter().any(|group| {
        let satisfied = group.is_satisfied_by(document);
        if !satisfied {
            tracing::trace!(
                "filter group of input descriptor `{}` not satisfied",
                group.descriptor_id()
            );
        }
        satisfied
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::{json, Value as Json};

    fn groups_of(definition: Json) -> Vec<FilterGroup> {
        extract_filter_groups(&serde_json::from_value(definition).unwrap()).unwrap()
    }

    #[test]
    fn no_groups_never_match() {
        assert!(!matches(&json!({ "type": "DegreeCredential" }), &[]));
    }

    #[test]
    fn unparsed_credential_never_matches() {
        let groups = groups_of(json!({
            "id": "pd",
            "input_descriptors": [{ "id": "any", "schema": [{ "uri": "DegreeCredential" }] }]
        }));

        let missing: Option<Json> = None;
        assert!(!matches(&missing, &groups));
    }

    #[test]
    fn all_filters_of_a_group_must_hold() {
        let groups = groups_of(json!({
            "id": "pd",
            "input_descriptors": [{
                "id": "degree",
                "constraints": { "fields": [
                    { "path": ["$.type"], "filter": { "type": "string", "pattern": "DegreeCredential" } },
                    { "path": ["$.credentialSubject.degree.type"], "filter": { "type": "string", "pattern": "MasterDegree" } }
                ]}
            }]
        }));
        assert_eq!(groups[0].filters().len(), 2);

        let bachelor = json!({
            "type": ["VerifiableCredential", "DegreeCredential"],
            "credentialSubject": { "degree": { "type": "BachelorDegree" } }
        });
        let master = json!({
            "type": ["VerifiableCredential", "DegreeCredential"],
            "credentialSubject": { "degree": { "type": "MasterDegree" } }
        });

        assert!(!matches(&bachelor, &groups));
        assert!(matches(&master, &groups));
    }

    #[test]
    fn any_group_may_hold() {
        let groups = groups_of(json!({
            "id": "pd",
            "input_descriptors": [
                { "id": "passport", "constraints": { "fields": [
                    { "path": ["$.type"], "filter": { "type": "string", "pattern": "PassportCredential" } }
                ]}},
                { "id": "id-card", "constraints": { "fields": [
                    { "path": ["$.type"], "filter": { "type": "string", "pattern": "IDCardCredential" } }
                ]}}
            ]
        }));

        let id_card = json!({ "type": ["VerifiableCredential", "IDCardCredential"] });
        assert!(matches(&id_card, &groups));
    }

    #[test]
    fn strategy_keeps_input_order() {
        let definition = serde_json::from_value(json!({
            "id": "pd",
            "input_descriptors": [{ "id": "any", "schema": [{ "uri": "DegreeCredential" }] }]
        }))
        .unwrap();

        let credentials = vec![
            json!({ "id": "1", "type": ["VerifiableCredential", "DegreeCredential"] }),
            json!({ "id": "2", "type": ["VerifiableCredential", "IDCardCredential"] }),
            json!({ "id": "3", "type": "DegreeCredential" }),
        ];

        let matched = FilterMatchStrategy
            .match_credentials(&credentials, &definition)
            .unwrap();
        let ids: Vec<&str> = matched
            .iter()
            .filter_map(|credential| credential["id"].as_str())
            .collect();
        assert_eq!(ids, ["1", "3"]);
    }
}
