//! Candidate fixture names and their specificity order.
//!
//! A fixture name is `<base>[.<query>][.<method>].<extension>`. The four
//! suffix combinations form a fixed lattice that is always walked from most
//! to least specific.

use std::fmt;
use std::path::PathBuf;

/// Rank of a candidate's suffix combination. Higher is more specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Specificity {
    Bare,
    QueryOnly,
    MethodOnly,
    QueryAndMethod,
}

impl Specificity {
    /// Search order, most specific first.
    pub const ORDER: [Specificity; 4] = [
        Specificity::QueryAndMethod,
        Specificity::MethodOnly,
        Specificity::QueryOnly,
        Specificity::Bare,
    ];

    /// The file-name suffix this specificity contributes, or `None` when a
    /// suffix it requires is empty (the candidate would duplicate a less
    /// specific one).
    pub fn suffix(self, suffixes: &Suffixes) -> Option<String> {
        let query = suffixes.query.as_str();
        let method = suffixes.method.as_str();
        match self {
            Specificity::QueryAndMethod => {
                (!query.is_empty() && !method.is_empty()).then(|| format!(".{query}.{method}"))
            }
            Specificity::MethodOnly => (!method.is_empty()).then(|| format!(".{method}")),
            Specificity::QueryOnly => (!query.is_empty()).then(|| format!(".{query}")),
            Specificity::Bare => Some(String::new()),
        }
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Specificity::QueryAndMethod => "query+method",
            Specificity::MethodOnly => "method",
            Specificity::QueryOnly => "query",
            Specificity::Bare => "bare",
        };
        f.write_str(name)
    }
}

/// Query signature and method suffix of one request. Either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suffixes {
    pub query: String,
    pub method: String,
}

impl Suffixes {
    /// `default_method` is the method left unsuffixed; `None` suffixes all.
    pub fn new(method: &str, default_method: Option<&str>, query: &[(String, String)]) -> Self {
        let method = match default_method {
            Some(default) if method.eq_ignore_ascii_case(default) => String::new(),
            _ => escape(&method.to_ascii_lowercase()),
        };

        Self {
            query: query_signature(query),
            method,
        }
    }
}

/// One fallback attempt: a path relative to the fixtures root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePath {
    pub relative_path: PathBuf,
    pub specificity: Specificity,
}

/// Enumerate candidates for `base` (host followed by path segments), most
/// specific first, skipping combinations whose suffix would be empty.
pub fn enumerate(base: &[&str], suffixes: &Suffixes, extension: &str) -> Vec<CandidatePath> {
    let stem = base.join("/");
    Specificity::ORDER
        .iter()
        .filter_map(|&specificity| {
            let suffix = specificity.suffix(suffixes)?;
            Some(CandidatePath {
                relative_path: PathBuf::from(format!("{stem}{suffix}.{extension}")),
                specificity,
            })
        })
        .collect()
}

/// Canonical, order-independent rendering of query parameters.
///
/// Pairs are sorted by key (stable, so repeated keys keep wire order) and
/// rendered as `key-value` joined by `.`. A pair with an empty value renders
/// as its key alone; a pair with neither key nor value is dropped.
pub fn query_signature(query: &[(String, String)]) -> String {
    let mut pairs: Vec<&(String, String)> = query
        .iter()
        .filter(|(key, value)| !(key.is_empty() && value.is_empty()))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    pairs
        .into_iter()
        .map(|(key, value)| {
            if value.is_empty() {
                escape(key)
            } else {
                format!("{}-{}", escape(key), escape(value))
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

// Percent-encode everything outside [A-Za-z0-9_~]. `-` and `.` are the
// signature separators, so they are encoded too.
fn escape(raw: &str) -> String {
    urlencoding::encode(raw)
        .replace('-', "%2D")
        .replace('.', "%2E")
}
