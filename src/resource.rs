use url::Url;

use crate::traits::BoxError;

/// Just a wrapper around a URL and credentials
#[derive(Clone, Debug)]
pub struct Resource {
    url: Url,
    token: Option<String>,
}

impl Resource {
    pub fn new(url: Url, token: Option<String>) -> Self {
        Self { url, token }
    }

    pub fn url(&self) -> &Url { &self.url }
    pub fn token(&self) -> Option<&str> { self.token.as_deref() }

    /// Build a new Resource for the given API path, relative to this one.
    ///
    /// Path segments are percent-encoded, so that identifiers cannot escape their own segment
    pub fn endpoint(&self, segments: &[&str]) -> Result<Resource, BoxError> {
        let mut built = (*self).clone();
        {
            let mut path = built.url.path_segments_mut()
                .map_err(|_| format!("{} cannot be used as a base URL", self.url))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        let base = Resource::new("https://tasks.example.com/".parse().unwrap(), Some("t".into()));
        let read = base.endpoint(&["api", "notifications", "12", "read"]).unwrap();
        assert_eq!(read.url().as_str(), "https://tasks.example.com/api/notifications/12/read");
        assert_eq!(read.token(), Some("t"));

        let weird = base.endpoint(&["api", "notifications", "a/b"]).unwrap();
        assert_eq!(weird.url().as_str(), "https://tasks.example.com/api/notifications/a%2Fb");

        let nested = Resource::new("https://example.com/backend/".parse().unwrap(), None);
        let tasks = nested.endpoint(&["api", "tasks"]).unwrap();
        assert_eq!(tasks.url().as_str(), "https://example.com/backend/api/tasks");
    }
}
