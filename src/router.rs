//! Screen routes and the deep-link parser.
//!
//! ## Supported routes (v1)
//!
//! - `taox://v1/extrinsic/<id>`
//! - `taox://v1/event/<id>`
//! - `taox://v1/call/<id>`
//! - `taox://v1/account/<address>`
//! - `taox://v1/search/<Pallet.Name>` or `taox://v1/search?query=<Pallet.Name>`
//! - `taox://v1/subnets`
//! - `taox://v1/accounts` (account statistics)
//! - `taox://v1/home`
//!
//! The same paths are accepted as `#/v1/...`, `/v1/...`, and in the
//! unversioned web form (`/extrinsic/<id>`, `/search?query=...`) that links
//! on the hosted explorer use. Scheme matching is case-insensitive and
//! repeated slashes after the scheme are tolerated.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Extrinsic { id: String },
    Event { id: String },
    Call { id: String },
    Account { address: String },
    /// Events and extrinsics named `Pallet.Name`.
    Search { query: String },
    Subnets,
    AccountStats,
}

impl Route {
    /// Short title used in the header bar.
    pub fn title(&self) -> String {
        match self {
            Route::Home => "Home".to_string(),
            Route::Extrinsic { id } => format!("Extrinsic #{id}"),
            Route::Event { id } => format!("Event #{id}"),
            Route::Call { id } => format!("Call #{id}"),
            Route::Account { address } => format!("Account {address}"),
            Route::Search { query } => format!("Search: {query}"),
            Route::Subnets => "Subnet owners".to_string(),
            Route::AccountStats => "Account statistics".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "taox://v1/home"),
            Route::Extrinsic { id } => write!(f, "taox://v1/extrinsic/{id}"),
            Route::Event { id } => write!(f, "taox://v1/event/{id}"),
            Route::Call { id } => write!(f, "taox://v1/call/{id}"),
            Route::Account { address } => write!(f, "taox://v1/account/{address}"),
            Route::Search { query } => write!(f, "taox://v1/search?query={}", urlencoding::encode(query)),
            Route::Subnets => write!(f, "taox://v1/subnets"),
            Route::AccountStats => write!(f, "taox://v1/accounts"),
        }
    }
}

/// Split `path?query#frag` into path and query.
fn split_query(s: &str) -> (&str, Option<&str>) {
    let s = s.split('#').next().unwrap_or_default();
    match s.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (s, None),
    }
}

/// Everything after `taox:` with leading slashes removed.
fn after_scheme(s: &str) -> Option<&str> {
    let (scheme, rest) = s.split_once(':')?;
    if scheme.eq_ignore_ascii_case("taox") {
        Some(rest.trim_start_matches('/'))
    } else {
        None
    }
}

fn query_param(query: Option<&str>, key: &str) -> Option<String> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .and_then(|(_, v)| urlencoding::decode(&v.replace('+', " ")).ok().map(|v| v.into_owned()))
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Parse a route from a deep link, a web hash, or a bare path.
///
/// Empty input is `Home`. Unknown versions and malformed paths are `None`.
pub fn parse(raw: &str) -> Option<Route> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(Route::Home);
    }

    let rest = if let Some(rest) = after_scheme(s) {
        // Deep links must be versioned.
        let rest = rest.strip_prefix("v1")?;
        if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with('?')) {
            return None;
        }
        rest
    } else {
        let path = s.strip_prefix('#').unwrap_or(s);
        let path = path.trim_start_matches('/');
        match path.strip_prefix("v1") {
            Some(r) if r.is_empty() || r.starts_with('/') || r.starts_with('?') => r,
            _ => path,
        }
    };

    let (path, query) = split_query(rest);
    let mut segments = path.split('/').filter(|seg| !seg.is_empty());
    let head = segments.next().unwrap_or("home").to_ascii_lowercase();
    let arg = segments.next().map(|a| urlencoding::decode(a).map(|d| d.into_owned()).unwrap_or_else(|_| a.to_string()));

    match head.as_str() {
        "home" => Some(Route::Home),
        "extrinsic" => non_empty(&arg?).map(|id| Route::Extrinsic { id }),
        "event" => non_empty(&arg?).map(|id| Route::Event { id }),
        "call" => non_empty(&arg?).map(|id| Route::Call { id }),
        "account" => non_empty(&arg?).map(|address| Route::Account { address }),
        "search" => arg
            .as_deref()
            .and_then(non_empty)
            .or_else(|| query_param(query, "query").as_deref().and_then(non_empty))
            .map(|query| Route::Search { query }),
        "subnets" => Some(Route::Subnets),
        "accounts" => Some(Route::AccountStats),
        _ => None,
    }
}
