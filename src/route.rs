//! Page addresses, identifier validation and session history

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PokedexError;

pub const MAX_POKEMON: u16 = 151;

pub fn is_valid_identifier(id: i64) -> bool {
    (1..=i64::from(MAX_POKEMON)).contains(&id)
}

/// Leading-integer parse: `" 25abc"` -> 25, `"abc"` -> None.
pub fn parse_id_param(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.as_bytes().first() {
        Some(b'-') => (-1, &raw[1..]),
        Some(b'+') => (1, &raw[1..]),
        _ => (1, raw),
    };
    let end = digits
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(sign * value)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Roster,
    Detail(u16),
}

impl Route {
    /// Resolve an address such as `roster` or `detail?id=25`.
    pub fn resolve(address: &str) -> Result<Route, PokedexError> {
        let address = address.trim();
        let (page, query) = address.split_once('?').unwrap_or((address, ""));
        let page = page.trim_start_matches("./");
        let page = page.strip_suffix(".html").unwrap_or(page);

        match page {
            "detail" => {
                let raw = query_param(query, "id").unwrap_or_default();
                parse_id_param(raw)
                    .filter(|id| is_valid_identifier(*id))
                    .and_then(|id| u16::try_from(id).ok())
                    .map(Route::Detail)
                    .ok_or_else(|| PokedexError::InvalidIdentifier(raw.to_string()))
            }
            _ => Ok(Route::Roster),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Roster => write!(f, "roster"),
            Route::Detail(id) => write!(f, "detail?id={id}"),
        }
    }
}

fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Previous/next targets; `None` means the control is inert.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationControls {
    pub prev: Option<u16>,
    pub next: Option<u16>,
}

impl NavigationControls {
    pub fn for_id(id: u16) -> Self {
        Self {
            prev: (id > 1).then(|| id - 1),
            next: (id < MAX_POKEMON).then(|| id + 1),
        }
    }
}

/// In-memory stand-in for the browser history stack.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<Route>,
    cursor: usize,
}

impl History {
    pub fn current(&self) -> Option<Route> {
        self.entries.get(self.cursor).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Push `route` unless it is already the current entry.
    pub fn visit(&mut self, route: Route) -> bool {
        if self.current() == Some(route) {
            return false;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(route);
        self.cursor = self.entries.len() - 1;
        true
    }

    pub fn back(&mut self) -> Option<Route> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    pub fn forward(&mut self) -> Option<Route> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_bounds() {
        assert!(!is_valid_identifier(0));
        assert!(is_valid_identifier(1));
        assert!(is_valid_identifier(151));
        assert!(!is_valid_identifier(152));
    }

    #[test]
    fn id_param_parses_leading_integer() {
        assert_eq!(parse_id_param("25"), Some(25));
        assert_eq!(parse_id_param("  7abc"), Some(7));
        assert_eq!(parse_id_param("-3"), Some(-3));
        assert_eq!(parse_id_param("abc"), None);
        assert_eq!(parse_id_param(""), None);
    }

    #[test]
    fn resolve_detail_addresses() {
        assert_eq!(Route::resolve("detail?id=25").unwrap(), Route::Detail(25));
        assert_eq!(
            Route::resolve("./detail.html?id=151").unwrap(),
            Route::Detail(151)
        );
        assert_eq!(
            Route::resolve("detail?lang=en&id=4").unwrap(),
            Route::Detail(4)
        );
        assert_eq!(Route::resolve("roster").unwrap(), Route::Roster);
        assert_eq!(Route::resolve("./index.html").unwrap(), Route::Roster);
    }

    #[test]
    fn resolve_rejects_bad_identifiers() {
        for address in ["detail", "detail?id=", "detail?id=0", "detail?id=152", "detail?id=pika"] {
            let err = Route::resolve(address).unwrap_err();
            assert!(
                matches!(err, PokedexError::InvalidIdentifier(_)),
                "{address}"
            );
        }
    }

    #[test]
    fn route_display_round_trips() {
        let route = Route::Detail(42);
        assert_eq!(route.to_string(), "detail?id=42");
        assert_eq!(Route::resolve(&route.to_string()).unwrap(), route);
    }

    #[test]
    fn navigation_boundaries() {
        assert_eq!(
            NavigationControls::for_id(1),
            NavigationControls {
                prev: None,
                next: Some(2)
            }
        );
        assert_eq!(
            NavigationControls::for_id(151),
            NavigationControls {
                prev: Some(150),
                next: None
            }
        );
        for id in 2..151 {
            let controls = NavigationControls::for_id(id);
            assert_eq!(controls.prev, Some(id - 1));
            assert_eq!(controls.next, Some(id + 1));
        }
    }

    #[test]
    fn history_visit_back_forward() {
        let mut history = History::default();
        assert!(history.visit(Route::Roster));
        assert!(history.visit(Route::Detail(1)));
        assert!(!history.visit(Route::Detail(1)));
        assert!(history.visit(Route::Detail(2)));
        assert_eq!(history.len(), 3);

        assert_eq!(history.back(), Some(Route::Detail(1)));
        assert_eq!(history.back(), Some(Route::Roster));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some(Route::Detail(1)));

        // visiting from the middle drops the forward entries
        assert!(history.visit(Route::Detail(9)));
        assert_eq!(history.forward(), None);
        assert_eq!(history.len(), 3);
    }
}
