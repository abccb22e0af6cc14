use super::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultsDocument {
    Boolean {
        head: BooleanHead,
        boolean: bool,
    },
    Bindings {
        #[serde(flatten)]
        doc: BindingsDocument,
    },
}

/// The result of a `SELECT` query as returned by [`SparqlClient`](super::SparqlClient).
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct BindingsDocument {
    pub(super) head: BindingsHead,
    pub(super) results: Results,
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct BooleanHead {
    #[serde(default)]
    link: Vec<Box<str>>,
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct BindingsHead {
    pub(super) vars: Vec<Box<str>>,
    #[serde(default)]
    link: Vec<Box<str>>,
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct Results {
    pub(super) bindings: Vec<HashMap<Box<str>, Term>>,
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Term {
    #[serde(rename = "bnode")]
    Bnode { value: Box<str> },
    #[serde(rename = "literal")]
    Literal(Literal),
    /// Pre-REC spelling of datatyped literals, still produced by Virtuoso.
    #[serde(rename = "typed-literal")]
    TypedLiteral { value: Box<str>, datatype: Box<str> },
    #[serde(rename = "uri")]
    Uri { value: Box<str> },
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Datatype {
        value: Box<str>,
        datatype: Box<str>,
    },
    Lang {
        value: Box<str>,
        #[serde(rename = "xml:lang")]
        lang: Box<str>,
    },
    Simple {
        value: Box<str>,
    },
}

impl Term {
    /// The lexical form of a literal, the IRI of a URI, or the label of a blank node.
    pub fn value(&self) -> &str {
        use self::Literal::*;
        use Term::*;
        match self {
            Bnode { value }
            | Uri { value }
            | TypedLiteral { value, .. }
            | Literal(Simple { value })
            | Literal(Datatype { value, .. })
            | Literal(Lang { value, .. }) => &**value,
        }
    }
}

impl BindingsDocument {
    /// The variables announced in the head of the document.
    pub fn variables(&self) -> Vec<&str> {
        self.head
            .vars
            .iter()
            .map(|b| b.as_ref())
            .collect::<Vec<&str>>()
    }

    /// The number of rows.
    pub fn len(&self) -> usize {
        self.results.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.bindings.is_empty()
    }

    /// The value bound to `var` in each row, in document order.
    ///
    /// A row where `var` is unbound yields [`Error::MissingVariable`].
    pub fn values<'a>(&'a self, var: &'a str) -> impl Iterator<Item = Result<&'a str, Error>> + 'a {
        self.results.bindings.iter().map(move |row| {
            row.get(var)
                .map(Term::value)
                .ok_or_else(|| Error::MissingVariable(var.to_string()))
        })
    }
}
