//! Sort state shared between list screens and the items table.
//!
//! The table never owns a [`SortOrder`]; it only computes the next one when a
//! sort affordance is activated and hands it back to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Arrow used by sort affordances.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// A sortable property that maps onto an indexer `orderBy` enum prefix
/// (`BLOCK_HEIGHT` in `BLOCK_HEIGHT_DESC`).
pub trait SortProperty {
    fn order_prefix(&self) -> &'static str;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortOrder<S> {
    pub property: S,
    pub direction: SortDirection,
}

impl<S> SortOrder<S> {
    pub fn new(property: S, direction: SortDirection) -> Self {
        Self { property, direction }
    }
}

impl<S: PartialEq + Clone> SortOrder<S> {
    /// Next sort order after activating the toggle for `property`.
    ///
    /// Same property flips the direction; anything else (or no sort at all)
    /// starts over at `start`.
    pub fn toggle(current: Option<&SortOrder<S>>, property: &S, start: SortDirection) -> SortOrder<S> {
        match current {
            Some(cur) if cur.property == *property => SortOrder::new(property.clone(), cur.direction.flip()),
            _ => SortOrder::new(property.clone(), start),
        }
    }

    /// Direction of `property` if it is the one currently sorted on.
    pub fn direction_of(current: Option<&SortOrder<S>>, property: &S) -> Option<SortDirection> {
        current.filter(|c| c.property == *property).map(|c| c.direction)
    }
}

impl<S: SortProperty> SortOrder<S> {
    /// Indexer `orderBy` value, e.g. `BLOCK_HEIGHT_DESC`.
    pub fn order_by(&self) -> String {
        format!("{}_{}", self.property.order_prefix(), self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Prop {
        Height,
        Id,
    }

    impl SortProperty for Prop {
        fn order_prefix(&self) -> &'static str {
            match self {
                Prop::Height => "BLOCK_HEIGHT",
                Prop::Id => "ID",
            }
        }
    }

    #[test]
    fn toggle_starts_at_start_direction() {
        let next = SortOrder::toggle(None, &Prop::Height, SortDirection::Desc);
        assert_eq!(next, SortOrder::new(Prop::Height, SortDirection::Desc));
    }

    #[test]
    fn toggle_flips_same_property() {
        let cur = SortOrder::new(Prop::Height, SortDirection::Desc);
        let next = SortOrder::toggle(Some(&cur), &Prop::Height, SortDirection::Desc);
        assert_eq!(next.direction, SortDirection::Asc);

        let again = SortOrder::toggle(Some(&next), &Prop::Height, SortDirection::Desc);
        assert_eq!(again.direction, SortDirection::Desc);
    }

    #[test]
    fn toggle_resets_when_switching_property() {
        let cur = SortOrder::new(Prop::Id, SortDirection::Asc);
        let next = SortOrder::toggle(Some(&cur), &Prop::Height, SortDirection::Desc);
        assert_eq!(next, SortOrder::new(Prop::Height, SortDirection::Desc));
    }

    #[test]
    fn order_by_joins_prefix_and_direction() {
        assert_eq!(SortOrder::new(Prop::Height, SortDirection::Desc).order_by(), "BLOCK_HEIGHT_DESC");
        assert_eq!(SortOrder::new(Prop::Id, SortDirection::Asc).order_by(), "ID_ASC");
    }

    #[test]
    fn direction_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&SortDirection::Asc).unwrap(), "\"ASC\"");
        assert_eq!(serde_json::from_str::<SortDirection>("\"DESC\"").unwrap(), SortDirection::Desc);
    }
}
