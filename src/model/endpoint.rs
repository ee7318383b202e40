use std::fmt;

use crate::base::{FileId, Location, LocatedString};

use super::{EndpointId, Namespace, Property};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "PATCH" => Some(HttpMethod::Patch),
            "DELETE" => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An API operation: method, route, ordered parameters and return value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub id: EndpointId,
    pub name: LocatedString,
    pub method: HttpMethod,
    pub route: String,
    pub description: String,
    pub params: Vec<Property>,
    pub returns: Option<Property>,
    pub preserve_property_casing: bool,
    pub namespace: Namespace,
    pub location: Location,
}

impl Endpoint {
    pub fn file(&self) -> FileId {
        self.id.file
    }

    pub fn name(&self) -> &str {
        &self.name.value
    }

    /// Route with the file's endpoint prefix, if any.
    pub fn full_route(&self, prefix: Option<&str>) -> String {
        match prefix {
            Some(prefix) if !prefix.is_empty() => format!(
                "{}/{}",
                prefix.trim_end_matches('/'),
                self.route.trim_start_matches('/')
            ),
            _ => self.route.clone(),
        }
    }

    /// Names written between braces in the route (`{utiId}` → `utiId`).
    pub fn route_parameter_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.route.as_str();
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) => {
                    names.push(&after[..end]);
                    rest = &after[end + 1..];
                }
                None => break,
            }
        }
        names
    }
}
