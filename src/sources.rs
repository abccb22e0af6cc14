//! The two knowledge graphs asked for the locations of a film.
//!
//! Each source turns a film title into a [`Contribution`]. A source never
//! fails loudly: transport or parsing errors are logged and reported in
//! the contribution, together with whatever rows were read before the error.
use crate::location::LocationName;
use crate::{Bindings, Error, SparqlClient};
use tracing::{debug, warn};

pub const DBPEDIA_ENDPOINT: &str = "https://dbpedia.org/sparql";
pub const WIKIDATA_ENDPOINT: &str = "https://query.wikidata.org/sparql";

/// Something that can be asked where a film takes place.
pub trait LocationSource {
    /// A short name used in logs and failure reports.
    fn name(&self) -> &str;

    /// Look up the locations of the films whose label contains `title`.
    fn fetch(&self, title: &str) -> Contribution;
}

/// What one source adds to a search.
#[derive(Debug)]
pub enum Contribution {
    Found(Vec<LocationName>),
    /// The query failed; `partial` holds the names read before the failure.
    Failed {
        partial: Vec<LocationName>,
        error: Error,
    },
}

impl Contribution {
    fn failed(source: &str, partial: Vec<LocationName>, error: Error) -> Self {
        warn!(source, kept = partial.len(), "error querying {} endpoint: {}", source, error);
        Contribution::Failed { partial, error }
    }

    /// The names contributed, whether or not the source failed.
    pub fn locations(&self) -> &[LocationName] {
        match self {
            Contribution::Found(names) | Contribution::Failed { partial: names, .. } => names.as_slice(),
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Contribution::Found(_) => None,
            Contribution::Failed { error, .. } => Some(error),
        }
    }

    pub fn into_parts(self) -> (Vec<LocationName>, Option<Error>) {
        match self {
            Contribution::Found(names) => (names, None),
            Contribution::Failed { partial, error } => (partial, Some(error)),
        }
    }
}

/// Countries of the DBpedia films whose label contains the title.
pub struct DbpediaSource {
    client: SparqlClient,
}

impl DbpediaSource {
    pub const VARIABLE: &'static str = "countryStr";

    pub fn new(client: SparqlClient) -> Self {
        DbpediaSource {
            client: client.with_param("format", "json"),
        }
    }

    pub fn query(title: &str) -> String {
        format!(
            r#"
        PREFIX dbo: <http://dbpedia.org/ontology/>
        SELECT DISTINCT ?countryStr WHERE {{
            ?film a dbo:Film.
            ?film dbp:country ?country.
            ?film rdfs:label ?label.
            FILTER (CONTAINS(LCASE(STR(?label)), LCASE("{}"))).
            BIND(STR(?country) AS ?countryStr)
        }}
    "#,
            escape_literal(title)
        )
    }
}

impl Default for DbpediaSource {
    fn default() -> Self {
        DbpediaSource::new(SparqlClient::new(DBPEDIA_ENDPOINT))
    }
}

impl LocationSource for DbpediaSource {
    fn name(&self) -> &str {
        "dbpedia"
    }

    fn fetch(&self, title: &str) -> Contribution {
        let result = self.client.select(&Self::query(title));
        gather(self.name(), result, Self::VARIABLE, LocationName::from_dbpedia)
    }
}

/// English labels of the narrative locations of Wikidata films whose label contains the title.
pub struct WikidataSource {
    client: SparqlClient,
}

impl WikidataSource {
    pub const VARIABLE: &'static str = "locationName";

    pub fn new(client: SparqlClient) -> Self {
        WikidataSource {
            client: client.with_accept("application/sparql-results+json"),
        }
    }

    pub fn query(title: &str) -> String {
        format!(
            r#"
    PREFIX wd: <http://www.wikidata.org/entity/>
    PREFIX wdt: <http://www.wikidata.org/prop/direct/>
    PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>

    SELECT DISTINCT ?locationName
    WHERE {{
        ?film wdt:P31 wd:Q11424;
            rdfs:label ?filmTitle;
            wdt:P840 ?narrativeLocation.
        ?narrativeLocation rdfs:label ?locationName.
        FILTER(LANG(?locationName) = "en")
        FILTER (CONTAINS(LCASE(STR(?filmTitle)), LCASE("{}"))).
    }}"#,
            escape_literal(title)
        )
    }
}

impl Default for WikidataSource {
    fn default() -> Self {
        WikidataSource::new(SparqlClient::new(WIKIDATA_ENDPOINT))
    }
}

impl LocationSource for WikidataSource {
    fn name(&self) -> &str {
        "wikidata"
    }

    fn fetch(&self, title: &str) -> Contribution {
        let result = self.client.select(&Self::query(title));
        gather(self.name(), result, Self::VARIABLE, |v| {
            Some(LocationName::verbatim(v))
        })
    }
}

/// Read `var` from every row, stopping at the first row without it.
fn gather<F>(source: &str, result: Result<Bindings, Error>, var: &str, normalize: F) -> Contribution
where
    F: Fn(&str) -> Option<LocationName>,
{
    let bindings = match result {
        Ok(bindings) => bindings,
        Err(error) => return Contribution::failed(source, Vec::new(), error),
    };
    let mut found = Vec::with_capacity(bindings.len());
    for value in bindings.values(var) {
        match value {
            Ok(value) => found.extend(normalize(value)),
            Err(error) => return Contribution::failed(source, found, error),
        }
    }
    debug!(source, rows = bindings.len(), kept = found.len(), "query complete");
    Contribution::Found(found)
}

/// Escape `text` for use inside a double-quoted SPARQL string literal.
fn escape_literal(text: &str) -> String {
    let mut ret = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => ret.push_str("\\\\"),
            '"' => ret.push_str("\\\""),
            '\n' => ret.push_str("\\n"),
            '\r' => ret.push_str("\\r"),
            c => ret.push(c),
        }
    }
    ret
}
