//! Request URL assembly.

/// Target of a single call: base URL plus optional path suffix and query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub base_url: &'a str,
    pub path: Option<&'a str>,
    pub query: Option<&'a str>,
}

impl<'a> Endpoint<'a> {
    /// Creates an endpoint for `base_url` with no path and no query.
    pub fn new(base_url: &'a str) -> Self {
        Self {
            base_url,
            path: None,
            query: None,
        }
    }

    /// Appends `path` verbatim after the base URL.
    pub fn with_path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    /// The query may be given with or without a leading `?`.
    pub fn with_query(mut self, query: &'a str) -> Self {
        self.query = Some(query);
        self
    }

    /// Assembles the full request URL with [`build_url`].
    pub fn url(&self) -> String {
        build_url(self.base_url, self.path, self.query)
    }
}

/// Assembles `base_url` + `path` + `?query`.
///
/// At most one leading `?` is stripped from the query before it is trimmed; a query that is
/// empty after trimming adds nothing. The result is not validated, a malformed URL fails later
/// in the transport.
pub fn build_url(base_url: &str, path: Option<&str>, query: Option<&str>) -> String {
    let mut url = String::from(base_url);
    if let Some(path) = path {
        url.push_str(path);
    }

    let query = query
        .map(|q| q.strip_prefix('?').unwrap_or(q).trim())
        .filter(|q| !q.is_empty());
    if let Some(query) = query {
        url.push('?');
        url.push_str(query);
    }

    url
}
