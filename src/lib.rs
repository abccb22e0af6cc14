//! Find where a movie takes place by asking two public knowledge graphs.
//!
//! The crate wraps a small client of the [SPARQL1.1 protocol], used to send
//! `SELECT` queries to [DBpedia] and [Wikidata]. Their answers are merged into a
//! deduplicated [`ResultSet`] of location names, and rendered as a list of
//! hotel-search links.
//!
//! Example:
//! ```
//! use film_locations::SparqlClient;
//!
//! # fn bla() -> Result<(), Box<dyn std::error::Error>> {
//! let cli = SparqlClient::new("https://query.wikidata.org/sparql");
//! let query = r#"
//!     SELECT ?locationName WHERE {
//!       wd:Q25188 wdt:P840 ?location .
//!       ?location rdfs:label ?locationName .
//!       FILTER(LANG(?locationName) = "en")
//!     }
//! "#;
//! let bindings = cli.select(query)?;
//! for name in bindings.values("locationName") {
//!     println!("{}", name?);
//! }
//! # Ok(()) }
//! ```
//!
//! [SPARQL1.1 protocol]: https://www.w3.org/TR/sparql11-protocol/
//! [DBpedia]: https://dbpedia.org/sparql
//! [Wikidata]: https://query.wikidata.org/
use ureq::{Agent, Error as UreqError};

pub mod config;
pub mod location;
pub mod logging;
pub mod render;
mod results;
pub mod search;
pub mod sources;

#[cfg(test)]
mod test_server;

pub use location::{LocationName, ResultSet};
pub use results::BindingsDocument as Bindings;
use results::ResultsDocument;
pub use search::{FilmSearch, SearchReport};
pub use sources::{Contribution, DbpediaSource, LocationSource, WikidataSource};

/// A client sending `SELECT` queries to a single SPARQL endpoint with `GET` requests.
pub struct SparqlClient {
    endpoint: Box<str>,
    agent: Agent,
    accept: Option<String>,
    params: Vec<(String, String)>,
}

impl SparqlClient {
    /// The default [Accept HTTP header](https://tools.ietf.org/html/rfc7231.html#section-5.3.2) used by clients.
    pub const DEFAULT_ACCEPT: &'static str = "application/sparql-results+json";

    /// Create a [`SparqlClient`] on the given SPARQL-endpoint URL.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: Box::from(endpoint),
            agent: Agent::new(),
            accept: None,
            params: Vec::new(),
        }
    }

    /// Replace the underlying [`ureq::Agent`] of this client.
    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agent = agent;
        self
    }

    /// Replace the [Accept HTTP header](https://tools.ietf.org/html/rfc7231.html#section-5.3.2) used by this client.
    ///
    /// See also [`DEFAULT_ACCEPT`](Self::DEFAULT_ACCEPT)
    pub fn with_accept<T: ToString>(mut self, accept: T) -> Self {
        self.accept = Some(accept.to_string());
        self
    }

    /// Add a query-string parameter sent after `query` on every request.
    ///
    /// Some endpoints (Virtuoso, behind DBpedia) select their output format
    /// with a `format` parameter rather than with content negotiation.
    pub fn with_param<K: ToString, V: ToString>(mut self, name: K, value: V) -> Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    /// The [Accept HTTP header](https://tools.ietf.org/html/rfc7231.html#section-5.3.2) used by this client.
    pub fn accept(&self) -> &str {
        self.accept.as_deref().unwrap_or(Self::DEFAULT_ACCEPT)
    }

    /// The URL of the endpoint queried by this client.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a `SELECT` query and return its bindings.
    pub fn select(&self, query: &str) -> Result<Bindings, Error> {
        tracing::debug!(endpoint = %self.endpoint, "sending SPARQL query");
        let mut req = self
            .agent
            .get(&self.endpoint)
            .set("Accept", self.accept())
            .query("query", query);
        for (name, value) in &self.params {
            req = req.query(name, value);
        }
        let resp = req.call()?;
        match resp.content_type() {
            "application/sparql-results+json" | "application/json" => {
                match serde_json::from_reader::<_, ResultsDocument>(resp.into_reader())? {
                    ResultsDocument::Bindings { doc } => {
                        tracing::debug!(endpoint = %self.endpoint, rows = doc.len(), "received bindings");
                        Ok(doc)
                    }
                    ResultsDocument::Boolean { .. } => Err(Error::Unsupported(
                        "expected bindings, got a boolean result".to_string(),
                    )),
                }
            }
            ctype => Err(Error::Unsupported(format!(
                "unsupported content-type: {0}",
                ctype
            ))),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(
        #[source]
        #[from]
        std::io::Error,
    ),
    #[error("http error: {0}")]
    Http(#[source] Box<UreqError>),
    #[error("malformed results document: {0}")]
    Json(
        #[source]
        #[from]
        serde_json::Error,
    ),
    #[error("{0}")]
    Unsupported(String),
    #[error("binding without a value for ?{0}")]
    MissingVariable(String),
}

impl From<UreqError> for Error {
    fn from(other: UreqError) -> Error {
        Error::Http(Box::new(other))
    }
}
