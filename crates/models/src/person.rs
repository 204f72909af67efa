use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ModelError;

pub type PersonId = u64;

/// A stored person row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
}

/// Validated field values for a create or full replace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    pub fn from_new(id: PersonId, new: NewPerson) -> Self {
        Self { id, first_name: new.first_name, last_name: new.last_name }
    }

    /// Overwrite every mutable field; `id` is kept.
    pub fn replace_with(&mut self, new: NewPerson) {
        self.first_name = new.first_name;
        self.last_name = new.last_name;
    }
}

/// Body of `POST /people` and `PUT /people/{id}`.
///
/// Fields are optional at the wire level so that a missing field becomes a
/// validation error instead of a deserialization failure. Any `id` in the body
/// is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl PersonInput {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self { first_name: Some(first_name.into()), last_name: Some(last_name.into()) }
    }

    pub fn validate(self) -> Result<NewPerson, ModelError> {
        Ok(NewPerson {
            first_name: required("firstName", self.first_name)?,
            last_name: required("lastName", self.last_name)?,
        })
    }
}

/// Body of `PATCH /people/{id}`.
///
/// Outer `None`: field absent, left untouched. `Some(None)`: explicit `null`,
/// rejected because both fields are required.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPatch {
    #[serde(default, deserialize_with = "present")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub last_name: Option<Option<String>>,
}

impl PersonPatch {
    pub fn first_name(value: impl Into<String>) -> Self {
        Self { first_name: Some(Some(value.into())), ..Self::default() }
    }

    pub fn last_name(value: impl Into<String>) -> Self {
        Self { last_name: Some(Some(value.into())), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }

    /// Apply onto `person`. Either every present field is written or none is.
    pub fn apply(self, person: &mut Person) -> Result<(), ModelError> {
        let first_name = self.first_name.map(|v| required("firstName", v)).transpose()?;
        let last_name = self.last_name.map(|v| required("lastName", v)).transpose()?;
        if let Some(first_name) = first_name {
            person.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            person.last_name = last_name;
        }
        Ok(())
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, ModelError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ModelError::required(field)),
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fowler() -> Person {
        Person { id: 1, first_name: "Martin".into(), last_name: "Fowler".into() }
    }

    #[test]
    fn input_requires_both_fields() {
        let missing_last: PersonInput = serde_json::from_str(r#"{"firstName":"Kent"}"#).unwrap();
        assert_eq!(missing_last.validate(), Err(ModelError::required("lastName")));

        let blank_first = PersonInput::new("  ", "Beck");
        assert_eq!(blank_first.validate(), Err(ModelError::required("firstName")));

        let ok = PersonInput::new("Kent", "Beck").validate().unwrap();
        assert_eq!(ok.first_name, "Kent");
        assert_eq!(ok.last_name, "Beck");
    }

    #[test]
    fn input_ignores_body_id() {
        let input: PersonInput =
            serde_json::from_str(r#"{"id":99,"firstName":"John","lastName":"Smith"}"#).unwrap();
        assert_eq!(input, PersonInput::new("John", "Smith"));
    }

    #[test]
    fn replace_keeps_id() {
        let mut p = fowler();
        p.replace_with(PersonInput::new("John", "Smith").validate().unwrap());
        assert_eq!(p, Person { id: 1, first_name: "John".into(), last_name: "Smith".into() });
    }

    #[test]
    fn patch_distinguishes_absent_and_null() {
        let absent: PersonPatch = serde_json::from_str(r#"{"firstName":"Martin Jr."}"#).unwrap();
        assert_eq!(absent, PersonPatch::first_name("Martin Jr."));

        let null: PersonPatch = serde_json::from_str(r#"{"lastName":null}"#).unwrap();
        assert_eq!(null.last_name, Some(None));
        assert!(null.first_name.is_none());

        let empty: PersonPatch = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn patch_touches_only_supplied_fields() {
        let mut p = fowler();
        PersonPatch::first_name("Martin Jr.").apply(&mut p).unwrap();
        assert_eq!(p.first_name, "Martin Jr.");
        assert_eq!(p.last_name, "Fowler");
    }

    #[test]
    fn rejected_patch_leaves_record_untouched() {
        let mut p = fowler();
        let patch = PersonPatch { first_name: Some(Some("X".into())), last_name: Some(None) };
        assert_eq!(patch.apply(&mut p), Err(ModelError::required("lastName")));
        assert_eq!(p, fowler());
    }

    #[test]
    fn person_round_trips_camel_case() {
        let json = serde_json::to_value(fowler()).unwrap();
        assert_eq!(json["firstName"], "Martin");
        assert_eq!(json["lastName"], "Fowler");
    }
}
