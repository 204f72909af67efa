//! HAL response builders.
//!
//! Each builder lists exactly the links its endpoint returns. Hrefs are absolute,
//! rooted at the request's [`BaseUrl`](crate::extractors::BaseUrl).

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use models::person::{Person, PersonId};
use serde::Serialize;
use serde_json::{json, Map, Value};
use service::pagination::PageMetadata;
use service::person::queries::PERSON_QUERIES;

use crate::errors::ApiError;

pub const HAL_JSON: &str = "application/hal+json";
pub const ALPS_JSON: &str = "application/alps+json";

pub const COLLECTION: &str = "people";
pub const ITEM_REL: &str = "person";

/// JSON body served as `application/hal+json`.
pub struct Hal<T>(pub T);

/// JSON body served as `application/alps+json`.
pub struct Alps<T>(pub T);

impl<T: Serialize> IntoResponse for Hal<T> {
    fn into_response(self) -> Response {
        typed_json(&self.0, HAL_JSON)
    }
}

impl<T: Serialize> IntoResponse for Alps<T> {
    fn into_response(self) -> Response {
        typed_json(&self.0, ALPS_JSON)
    }
}

fn typed_json<T: Serialize>(value: &T, content_type: &'static str) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, HeaderValue::from_static(content_type))],
            body,
        )
            .into_response(),
        Err(e) => ApiError::Internal(e.to_string()).into_response(),
    }
}

fn href(href: impl Into<String>) -> Value {
    json!({ "href": href.into() })
}

fn templated(href: impl Into<String>) -> Value {
    json!({ "href": href.into(), "templated": true })
}

pub fn collection_href(base: &str) -> String {
    format!("{base}/{COLLECTION}")
}

pub fn person_href(base: &str, id: PersonId) -> String {
    format!("{base}/{COLLECTION}/{id}")
}

pub fn search_href(base: &str) -> String {
    format!("{base}/{COLLECTION}/search")
}

pub fn profile_href(base: &str) -> String {
    format!("{base}/profile/{COLLECTION}")
}

/// Single record: fields plus `self` and `person` links; the id only appears in links.
pub fn person_model(base: &str, person: &Person) -> Value {
    let me = person_href(base, person.id);
    json!({
        "firstName": person.first_name,
        "lastName": person.last_name,
        "_links": {
            "self": href(me.clone()),
            ITEM_REL: href(me),
        }
    })
}

fn embedded_people(base: &str, people: &[Person]) -> Value {
    let items: Vec<Value> = people.iter().map(|p| person_model(base, p)).collect();
    json!({ COLLECTION: items })
}

/// `GET /people`: embedded page, collection links and page metadata.
pub fn people_collection(base: &str, people: &[Person], page: PageMetadata) -> Value {
    let mut links = Map::new();
    links.insert("self".into(), href(collection_href(base)));
    links.extend(paging_links(base, page));
    links.insert("profile".into(), href(profile_href(base)));
    links.insert("search".into(), href(search_href(base)));

    json!({
        "_embedded": embedded_people(base, people),
        "_links": links,
        "page": page,
    })
}

/// `first`/`prev`/`next`/`last`, only when there is more than one page.
fn paging_links(base: &str, page: PageMetadata) -> Map<String, Value> {
    let mut links = Map::new();
    if page.total_pages <= 1 {
        return links;
    }
    let at = |n: u64| href(format!("{}?page={n}&size={}", collection_href(base), page.size));
    let number = u64::from(page.number);
    let last = page.total_pages - 1;
    links.insert("first".into(), at(0));
    if number > 0 {
        links.insert("prev".into(), at((number - 1).min(last)));
    }
    if number < last {
        links.insert("next".into(), at(number + 1));
    }
    links.insert("last".into(), at(last));
    links
}

/// `GET /people/search`: one templated link per registered query.
pub fn search_index(base: &str) -> Value {
    let root = search_href(base);
    let mut links = Map::new();
    for query in PERSON_QUERIES {
        links.insert(query.name.into(), templated(format!("{root}/{}", query.template())));
    }
    links.insert("self".into(), href(root));
    json!({ "_links": links })
}

/// `GET /people/search/{query}`: matches plus a `self` link to the request.
pub fn search_results(base: &str, self_href: String, people: &[Person]) -> Value {
    json!({
        "_embedded": embedded_people(base, people),
        "_links": { "self": href(self_href) },
    })
}

/// `GET /`: entry point listing the collection.
pub fn root_index(base: &str) -> Value {
    json!({
        "_links": {
            COLLECTION: templated(format!("{}{{?page,size}}", collection_href(base))),
            "profile": href(format!("{base}/profile")),
        }
    })
}

/// `GET /profile`
pub fn profile_index(base: &str) -> Value {
    json!({
        "_links": {
            "self": href(format!("{base}/profile")),
            COLLECTION: href(profile_href(base)),
        }
    })
}

/// `GET /profile/people`: ALPS descriptor of the representation and its transitions.
pub fn people_alps(base: &str) -> Value {
    let repr = "#person-representation";
    let field = |name: &str| json!({ "name": name, "type": "SEMANTIC" });
    let transition = |id: &str, kind: &str| json!({ "id": id, "name": ITEM_REL, "type": kind, "rt": repr });

    let mut descriptors = vec![
        json!({
            "id": "person-representation",
            "href": profile_href(base),
            "descriptor": [field("firstName"), field("lastName")],
        }),
        json!({ "id": "get-people", "name": COLLECTION, "type": "SAFE", "rt": repr }),
        json!({ "id": "create-people", "name": COLLECTION, "type": "UNSAFE", "rt": repr }),
        transition("get-person", "SAFE"),
        transition("update-person", "IDEMPOTENT"),
        transition("patch-person", "UNSAFE"),
        transition("delete-person", "IDEMPOTENT"),
    ];
    for query in PERSON_QUERIES {
        descriptors.push(json!({
            "name": query.name,
            "type": "SAFE",
            "descriptor": [field(query.param)],
        }));
    }

    json!({ "alps": { "version": "1.0", "descriptor": descriptors } })
}
