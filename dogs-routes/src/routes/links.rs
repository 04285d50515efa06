use crate::routes::paths::{self, full};
use crate::routes::responses::{DogCollection, DogResource, Link};
use dogs_core::list_filter::ListOperation;
use dogs_core::model::{Dog, DogId};
use std::sync::Arc;

const SELF_REL: &str = "self";
const DOGS_REL: &str = "dogs";

/// Builds hypermedia links from the route table. Every href is `base_url` followed by an
/// expanded path, so an empty base yields root-relative links.
#[derive(Debug, Clone, Default)]
pub struct LinkAssembler {
    base_url: Arc<str>,
}

impl LinkAssembler {
    pub fn new(base_url: Option<&str>) -> Self {
        let base_url = base_url.unwrap_or_default().trim_end_matches('/');
        Self {
            base_url: Arc::from(base_url),
        }
    }

    pub fn self_link(&self, id: DogId) -> Link {
        Link::new(SELF_REL, self.href(&expand(full::DOG, "id", &id.to_string())))
    }

    pub fn collection_link(&self) -> Link {
        Link::new(DOGS_REL, self.href(paths::DOGS_ROOT_PATH))
    }

    /// The `self` link of the listing endpoint that serves `operation`.
    pub fn listing_link(&self, operation: &ListOperation) -> Link {
        let path = match operation {
            ListOperation::All => paths::DOGS_ROOT_PATH.to_string(),
            ListOperation::ByBreed => full::DOGS_BY_BREED.to_string(),
            ListOperation::ByWeight => full::DOGS_BY_WEIGHT.to_string(),
            ListOperation::Breed(breed) => expand(full::DOGS_OF_BREED, "breed", breed),
            ListOperation::Apartment => full::APARTMENT_DOGS.to_string(),
        };
        Link::new(SELF_REL, self.href(&path))
    }

    pub fn to_resource(&self, dog: Dog) -> DogResource {
        let links = vec![self.self_link(dog.id), self.collection_link()];
        DogResource::new(dog, links)
    }

    pub fn to_collection(&self, operation: &ListOperation, dogs: Vec<Dog>) -> DogCollection {
        DogCollection::new(
            dogs.into_iter().map(|d| self.to_resource(d)).collect(),
            vec![self.listing_link(operation)],
        )
    }

    fn href(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Substitutes `{param}` in `template` with the percent-encoded `value`.
fn expand(template: &str, param: &str, value: &str) -> String {
    template.replacen(&format!("{{{param}}}"), &encode_path_segment(value), 1)
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_links_without_base_url() {
        let links = LinkAssembler::new(None);

        assert_eq!("/dogs/3", links.self_link(DogId(3)).href);
        assert_eq!("/dogs", links.collection_link().href);
    }

    #[test]
    fn base_url_is_prefixed_once() {
        let links = LinkAssembler::new(Some("http://localhost:8080/"));

        assert_eq!("http://localhost:8080/dogs/3", links.self_link(DogId(3)).href);
    }

    #[test]
    fn resource_links_are_self_then_dogs() {
        let resource = LinkAssembler::default().to_resource(Dog::new(DogId(9), "Pug", 9, true));

        let rels: Vec<_> = resource.links.iter().map(|l| l.rel.as_str()).collect();
        assert_eq!(vec!["self", "dogs"], rels);
        assert_eq!("/dogs/9", resource.links[0].href);
    }

    #[test]
    fn listing_links_match_their_routes() {
        let links = LinkAssembler::default();

        assert_eq!("/dogs", links.listing_link(&ListOperation::All).href);
        assert_eq!("/dogs/breeds", links.listing_link(&ListOperation::ByBreed).href);
        assert_eq!("/dogs/weight", links.listing_link(&ListOperation::ByWeight).href);
        assert_eq!(
            "/dogs/apartment",
            links.listing_link(&ListOperation::Apartment).href
        );
        assert_eq!(
            "/dogs/breeds/Collie",
            links
                .listing_link(&ListOperation::Breed("Collie".into()))
                .href
        );
    }

    #[test]
    fn breed_segments_are_percent_encoded() {
        let links = LinkAssembler::default();

        assert_eq!(
            "/dogs/breeds/Boston%20Terrier",
            links
                .listing_link(&ListOperation::Breed("Boston Terrier".into()))
                .href
        );
        assert_eq!("a%2Fb%3F%25", encode_path_segment("a/b?%"));
        assert_eq!("Kai-Ken_1.0~", encode_path_segment("Kai-Ken_1.0~"));
        assert_eq!("Sch%C3%A4ferhund", encode_path_segment("Schäferhund"));
    }
}
