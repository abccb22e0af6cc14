//! Turning a [`ResultSet`] into something a person can click on.
//!
//! [`Listing`] is the pure part: heading and entries computed from the final
//! set. [`ResultsView`] is what a search drives while it runs; [`HtmlPanel`]
//! implements it by producing the results container of the web page.
use crate::location::ResultSet;
use std::fmt;

/// Hotel search, with `{destination}` standing for the location.
pub const HOTEL_SEARCH_URL: &str =
    "https://www.expedia.com/Hotel-Search?destination={destination}&adults=2&rooms=1&sort=RECOMMENDED";

pub const NO_RESULTS: &str = "No results found... Try another movie.";

const LOADING_IMG: &str = r#"<img src="./assets/loading.gif" alt="Loading..." class="mx-auto">"#;

/// Link to a hotel search for `location`.
///
/// Only spaces are encoded (as `%20`); the rest of the name is inserted as is.
pub fn hotel_search_link(template: &str, location: &str) -> String {
    template.replace("{destination}", &location.replace(' ', "%20"))
}

/// One clickable location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    NoResults,
    Locations(Vec<Entry>),
}

/// What is shown once a search is over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listing {
    pub heading: String,
    pub body: Body,
}

impl Listing {
    pub fn new(title: &str, locations: &ResultSet, link_template: &str) -> Self {
        let body = if locations.is_empty() {
            Body::NoResults
        } else {
            Body::Locations(
                locations
                    .iter()
                    .map(|name| Entry {
                        name: name.to_string(),
                        href: hotel_search_link(link_template, name.as_str()),
                    })
                    .collect(),
            )
        };
        Listing {
            heading: format!("Countries where {} movie was filmed:", title),
            body,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        match &self.body {
            Body::NoResults => &[],
            Body::Locations(entries) => entries.as_slice(),
        }
    }

    /// The results container content for this listing.
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<h1>{}</h1>\n<ul class=\"list-group col-6\">\n",
            escape_html(&self.heading)
        );
        match &self.body {
            Body::NoResults => {
                html.push_str(&format!(
                    "<li class=\"list-group-item list-group-item-action list-group-item-danger\">{}</li>\n",
                    NO_RESULTS
                ));
            }
            Body::Locations(entries) => {
                for e in entries {
                    html.push_str(&format!(
                        "<li style=\"list-style:none;\"><a class=\"list-group-item list-group-item-action\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></li>\n",
                        escape_html(&e.href),
                        escape_html(&e.name)
                    ));
                }
            }
        }
        html.push_str("</ul>");
        html
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        match &self.body {
            Body::NoResults => writeln!(f, "  {}", NO_RESULTS),
            Body::Locations(entries) => {
                for e in entries {
                    writeln!(f, "  {}\t{}", e.name, e.href)?;
                }
                Ok(())
            }
        }
    }
}

/// The part of a user interface a search updates while it runs.
pub trait ResultsView {
    /// Clear previous results, disable the submit control and show a loading indicator.
    fn begin_loading(&mut self);

    /// Replace the loading indicator with `listing`.
    fn show(&mut self, listing: &Listing);

    fn set_submit_enabled(&mut self, enabled: bool);
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Content {
    Empty,
    Loading,
    Listing(String),
}

/// Results container of the web page.
#[derive(Clone, Debug)]
pub struct HtmlPanel {
    content: Content,
    submit_enabled: bool,
}

impl Default for HtmlPanel {
    fn default() -> Self {
        HtmlPanel {
            content: Content::Empty,
            submit_enabled: true,
        }
    }
}

impl HtmlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn is_loading(&self) -> bool {
        self.content == Content::Loading
    }

    /// Inner HTML of the results container.
    pub fn fragment(&self) -> &str {
        match &self.content {
            Content::Empty => "",
            Content::Loading => LOADING_IMG,
            Content::Listing(html) => html.as_str(),
        }
    }

    /// The whole page: title, search form and results container.
    ///
    /// The page is a static snapshot: its form is not wired to anything and
    /// only shows the submit state. New searches go through [`FilmSearch::submit`](crate::FilmSearch::submit).
    pub fn page(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Heads in the Cloud</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css">
</head>
<body>
<div id="root">
<h1 class="text-center mt-4">Heads in the Cloud</h1>
<main>
<div class="container-sm mt-4">
<form class="filmform row g-3">
<div class="col-md-6">
<div class="col-12 mb-2">
<label for="inputFilm" class="form-label">Favorite movie</label>
<input type="text" class="form-control" id="inputFilm" required>
</div>
<div class="col-12">
<button id="filmform__submit" type="submit" class="btn btn-primary"{}>Submit</button>
</div>
</div>
</form>
</div>
<div class="container-sm mt-4" id="results">{}</div>
</main>
</div>
</body>
</html>
"#,
            if self.submit_enabled { "" } else { " disabled" },
            self.fragment()
        )
    }
}

impl ResultsView for HtmlPanel {
    fn begin_loading(&mut self) {
        self.submit_enabled = false;
        self.content = Content::Loading;
    }

    fn show(&mut self, listing: &Listing) {
        self.content = Content::Listing(listing.to_html());
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }
}

fn escape_html(text: &str) -> String {
    let mut ret = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => ret.push_str("&amp;"),
            '<' => ret.push_str("&lt;"),
            '>' => ret.push_str("&gt;"),
            '"' => ret.push_str("&quot;"),
            '\'' => ret.push_str("&#39;"),
            c => ret.push(c),
        }
    }
    ret
}
