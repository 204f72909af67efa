use models::person::Person;

/// A lookup identified by name and driven by a single request parameter.
#[derive(Debug)]
pub struct NamedQuery {
    pub name: &'static str,
    pub param: &'static str,
    predicate: fn(&Person, &str) -> bool,
}

impl NamedQuery {
    pub fn matches(&self, person: &Person, value: &str) -> bool {
        (self.predicate)(person, value)
    }

    /// URI template relative to the search root, e.g. `findByLastName{?name}`.
    pub fn template(&self) -> String {
        format!("{}{{?{}}}", self.name, self.param)
    }
}

fn last_name_equals(person: &Person, value: &str) -> bool {
    person.last_name == value
}

/// Exact, case-sensitive match on `lastName`.
pub const FIND_BY_LAST_NAME: NamedQuery =
    NamedQuery { name: "findByLastName", param: "name", predicate: last_name_equals };

/// Every query exposed under `/people/search`.
pub static PERSON_QUERIES: &[NamedQuery] = &[FIND_BY_LAST_NAME];

pub fn lookup(name: &str) -> Option<&'static NamedQuery> {
    PERSON_QUERIES.iter().find(|q| q.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(first: &str, last: &str) -> Person {
        Person { id: 1, first_name: first.into(), last_name: last.into() }
    }

    #[test]
    fn registry_exposes_find_by_last_name() {
        let names: Vec<_> = PERSON_QUERIES.iter().map(|q| q.name).collect();
        assert_eq!(names, vec!["findByLastName"]);
        assert!(lookup("findByFirstName").is_none());
    }

    #[test]
    fn template_uses_param_name() {
        assert_eq!(FIND_BY_LAST_NAME.template(), "findByLastName{?name}");
    }

    #[test]
    fn last_name_match_is_exact_and_case_sensitive() {
        let q = lookup("findByLastName").unwrap();
        let fowler = person("Martin", "Fowler");
        assert!(q.matches(&fowler, "Fowler"));
        assert!(!q.matches(&fowler, "fowler"));
        assert!(!q.matches(&fowler, "Fowl"));
        assert!(!q.matches(&fowler, "Martin"));
    }
}
