//! A search: every source asked in turn, answers merged into one [`ResultSet`].
use crate::config::FilmConfig;
use crate::location::ResultSet;
use crate::render::{Listing, ResultsView, HOTEL_SEARCH_URL};
use crate::sources::{DbpediaSource, LocationSource, WikidataSource};
use crate::{Error, SparqlClient};
use tracing::info;

/// A source that failed during a search.
#[derive(Debug)]
pub struct SourceFailure {
    pub source: String,
    pub error: Error,
}

/// Everything a search found.
#[derive(Debug)]
pub struct SearchReport {
    pub title: String,
    pub locations: ResultSet,
    /// Failures are not shown to the user; they only reduce `locations`.
    pub failures: Vec<SourceFailure>,
}

pub struct FilmSearch {
    sources: Vec<Box<dyn LocationSource>>,
    link_template: String,
}

impl FilmSearch {
    pub fn new(sources: Vec<Box<dyn LocationSource>>) -> Self {
        FilmSearch {
            sources,
            link_template: HOTEL_SEARCH_URL.to_string(),
        }
    }

    /// DBpedia then Wikidata, on the endpoints and with the agent settings of `cfg`.
    pub fn from_config(cfg: &FilmConfig) -> Self {
        let agent = cfg.agent();
        let dbpedia = SparqlClient::new(&cfg.dbpedia_endpoint).with_agent(agent.clone());
        let wikidata = SparqlClient::new(&cfg.wikidata_endpoint).with_agent(agent);
        FilmSearch::new(vec![
            Box::new(DbpediaSource::new(dbpedia)),
            Box::new(WikidataSource::new(wikidata)),
        ])
        .with_link_template(&cfg.hotel_search_url)
    }

    pub fn with_link_template(mut self, template: &str) -> Self {
        self.link_template = template.to_string();
        self
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Ask each source in turn, and merge what they found.
    ///
    /// A source is only asked once the previous one has returned; its
    /// names (including partial ones from a failed query) are merged before
    /// moving on.
    pub fn collect(&self, title: &str) -> SearchReport {
        let mut locations = ResultSet::new();
        let mut failures = Vec::new();
        for source in &self.sources {
            let (names, error) = source.fetch(title).into_parts();
            locations.extend(names);
            if let Some(error) = error {
                failures.push(SourceFailure {
                    source: source.name().to_string(),
                    error,
                });
            }
        }
        info!(
            title,
            locations = locations.len(),
            failures = failures.len(),
            "search complete"
        );
        SearchReport {
            title: title.to_string(),
            locations,
            failures,
        }
    }

    /// The listing shown for `report`.
    pub fn listing(&self, report: &SearchReport) -> Listing {
        Listing::new(&report.title, &report.locations, &self.link_template)
    }

    /// Run a search the way the web page does: the view shows a loading
    /// indicator with submission disabled until the listing is displayed.
    pub fn submit<V: ResultsView + ?Sized>(&self, title: &str, view: &mut V) -> SearchReport {
        view.begin_loading();
        let report = self.collect(title);
        view.show(&self.listing(&report));
        view.set_submit_enabled(true);
        report
    }
}

impl Default for FilmSearch {
    fn default() -> Self {
        FilmSearch::from_config(&FilmConfig::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::location::LocationName;
    use crate::render::{Body, HtmlPanel};
    use crate::sources::Contribution;
    use crate::test_server::{refused_endpoint, serve_once};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// A source answering from a fixed list, recording each call and the
    /// submit state it saw.
    struct Canned {
        name: &'static str,
        names: Vec<&'static str>,
        fail: bool,
        log: Log,
        submit_enabled: Rc<Cell<bool>>,
    }

    impl LocationSource for Canned {
        fn name(&self) -> &str {
            self.name
        }

        fn fetch(&self, title: &str) -> Contribution {
            self.log.borrow_mut().push(format!(
                "fetch {} {} (submit enabled: {})",
                self.name,
                title,
                self.submit_enabled.get()
            ));
            let names = self.names.iter().map(|n| LocationName::verbatim(*n)).collect();
            if self.fail {
                Contribution::Failed {
                    partial: names,
                    error: Error::Unsupported("connection reset".to_string()),
                }
            } else {
                Contribution::Found(names)
            }
        }
    }

    struct Recording {
        log: Log,
        submit_enabled: Rc<Cell<bool>>,
        shown: Option<Listing>,
    }

    impl ResultsView for Recording {
        fn begin_loading(&mut self) {
            self.submit_enabled.set(false);
            self.log.borrow_mut().push("loading".to_string());
        }

        fn show(&mut self, listing: &Listing) {
            self.log
                .borrow_mut()
                .push(format!("show (submit enabled: {})", self.submit_enabled.get()));
            self.shown = Some(listing.clone());
        }

        fn set_submit_enabled(&mut self, enabled: bool) {
            self.submit_enabled.set(enabled);
            self.log.borrow_mut().push(format!("submit enabled: {}", enabled));
        }
    }

    fn fixture(sources: Vec<(&'static str, Vec<&'static str>, bool)>) -> (FilmSearch, Recording, Log) {
        let log: Log = Rc::default();
        let submit_enabled = Rc::new(Cell::new(true));
        let sources = sources
            .into_iter()
            .map(|(name, names, fail)| {
                Box::new(Canned {
                    name,
                    names,
                    fail,
                    log: log.clone(),
                    submit_enabled: submit_enabled.clone(),
                }) as Box<dyn LocationSource>
            })
            .collect();
        let view = Recording {
            log: log.clone(),
            submit_enabled,
            shown: None,
        };
        (FilmSearch::new(sources), view, log)
    }

    #[test]
    fn same_name_from_both_sources_once() {
        let (search, _, _) = fixture(vec![
            ("dbpedia", vec!["United States", "France"], false),
            ("wikidata", vec!["France", "Paris"], false),
        ]);
        let report = search.collect("Ratatouille");
        let names: Vec<&str> = report.locations.iter().map(LocationName::as_str).collect();
        assert_eq!(names, vec!["France", "Paris", "United States"]);
        assert!(report.failures.is_empty());
        assert_eq!(search.listing(&report).entries().len(), 3);
    }

    #[test]
    fn sources_run_in_order_while_submit_disabled() {
        let (search, mut view, log) = fixture(vec![
            ("dbpedia", vec!["France"], false),
            ("wikidata", vec!["Paris"], false),
        ]);
        assert!(view.submit_enabled.get());
        let report = search.submit("Amelie", &mut view);
        assert_eq!(
            *log.borrow(),
            vec![
                "loading",
                "fetch dbpedia Amelie (submit enabled: false)",
                "fetch wikidata Amelie (submit enabled: false)",
                "show (submit enabled: false)",
                "submit enabled: true",
            ]
        );
        assert_eq!(report.locations.len(), 2);
        assert_eq!(view.shown.unwrap().entries().len(), 2);
    }

    #[test]
    fn failure_path_reenables_submit() {
        let (search, mut view, log) = fixture(vec![
            ("dbpedia", vec![], true),
            ("wikidata", vec![], true),
        ]);
        let report = search.submit("Inception", &mut view);
        assert!(view.submit_enabled.get());
        assert_eq!(log.borrow().last().unwrap(), "submit enabled: true");
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].source, "dbpedia");
        assert_eq!(report.failures[1].source, "wikidata");
        assert_eq!(view.shown.unwrap().body, Body::NoResults);
    }

    #[test]
    fn partial_names_from_failed_source_are_kept() {
        let (search, _, _) = fixture(vec![
            ("dbpedia", vec!["Italy"], true),
            ("wikidata", vec!["Rome"], false),
        ]);
        let report = search.collect("Roman Holiday");
        assert!(report.locations.contains("Italy"));
        assert!(report.locations.contains("Rome"));
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn no_match_anywhere_is_no_results() {
        let (search, _, _) = fixture(vec![("dbpedia", vec![], false), ("wikidata", vec![], false)]);
        let report = search.collect("qwertyuiop");
        assert!(report.locations.is_empty());
        let listing = search.listing(&report);
        assert_eq!(listing.body, Body::NoResults);
        assert!(listing.to_html().contains(crate::render::NO_RESULTS));
    }

    #[test]
    fn inception_over_http() {
        let dbpedia = serve_once(
            "200 OK",
            "application/sparql-results+json",
            r#"{ "head": { "link": [], "vars": ["countryStr"] },
                 "results": { "bindings": [
                   { "countryStr": { "type": "literal", "value": "http://dbpedia.org/resource/United_Kingdom" } },
                   { "countryStr": { "type": "literal", "value": "United States" } }
                 ] } }"#,
        );
        let wikidata = serve_once(
            "200 OK",
            "application/sparql-results+json",
            r#"{ "head": { "vars": ["locationName"] },
                 "results": { "bindings": [
                   { "locationName": { "type": "literal", "value": "United Kingdom", "xml:lang": "en" } },
                   { "locationName": { "type": "literal", "value": "Mombasa", "xml:lang": "en" } }
                 ] } }"#,
        );
        let cfg = FilmConfig {
            dbpedia_endpoint: dbpedia.url.clone(),
            wikidata_endpoint: wikidata.url.clone(),
            ..FilmConfig::default()
        };
        let search = FilmSearch::from_config(&cfg);
        assert_eq!(search.source_names(), vec!["dbpedia", "wikidata"]);

        let mut panel = HtmlPanel::new();
        let report = search.submit("Inception", &mut panel);
        assert!(report.failures.is_empty());
        let names: Vec<&str> = report.locations.iter().map(LocationName::as_str).collect();
        assert_eq!(names, vec!["Mombasa", "United Kingdom", "United States"]);
        assert!(panel.submit_enabled());
        assert_eq!(panel.fragment().matches("<a ").count(), 3);
        assert!(panel
            .fragment()
            .contains("destination=United%20Kingdom&amp;adults=2"));
        assert!(dbpedia.request().to_lowercase().contains("user-agent: film-locations/"));
        assert!(wikidata.request().starts_with("GET /sparql?query="));
    }

    #[test]
    fn unreachable_endpoints_degrade_to_no_results() {
        let cfg = FilmConfig {
            dbpedia_endpoint: refused_endpoint(),
            wikidata_endpoint: refused_endpoint(),
            ..FilmConfig::default()
        };
        let search = FilmSearch::from_config(&cfg);
        let mut panel = HtmlPanel::new();
        let report = search.submit("Inception", &mut panel);
        assert!(report.locations.is_empty());
        assert_eq!(report.failures.len(), 2);
        assert!(panel.submit_enabled());
        assert!(panel.fragment().contains(crate::render::NO_RESULTS));
    }
}
