//! Sort registry and multi-key trade ordering.

use crate::domain::property::Property;
use crate::domain::trade::Trade;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Ordinal used for a trade without a result; sorts below `Loss`.
pub const NULL_RESULT_ORDINAL: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Sort key extracted from a trade. `None` orders before any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Instant(Option<DateTime<Utc>>),
    Decimal(Option<Decimal>),
    Ordinal(i32),
}

type Selector = fn(&Trade) -> SortValue;

#[derive(Clone, Copy)]
pub struct SortKey {
    property: Property,
    direction: SortDirection,
    selector: Selector,
}

impl SortKey {
    pub fn value(&self, trade: &Trade) -> SortValue {
        (self.selector)(trade)
    }

    pub fn compare(&self, a: &Trade, b: &Trade) -> Ordering {
        self.direction.apply(self.value(a).cmp(&self.value(b)))
    }
}

impl fmt::Debug for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortKey")
            .field("property", &self.property)
            .field("direction", &self.direction)
            .finish()
    }
}

/// Primary key first; each later key only breaks ties left by the ones before.
#[derive(Debug, Clone, Default)]
pub struct TradeOrdering {
    keys: Vec<SortKey>,
}

impl TradeOrdering {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    pub fn compare(&self, a: &Trade, b: &Trade) -> Ordering {
        self.keys
            .iter()
            .fold(Ordering::Equal, |acc, key| acc.then_with(|| key.compare(a, b)))
    }

    /// Stable sort, so trades equal under every key keep their input order.
    pub fn sort(&self, trades: &mut [&Trade]) {
        trades.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for TradeOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let dir = match key.direction {
                SortDirection::Ascending => "asc",
                SortDirection::Descending => "desc",
            };
            write!(f, "{}:{}", key.property, dir)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
pub struct SortBuilder {
    property: Property,
    selector: Selector,
}

impl SortBuilder {
    pub fn matches(&self, property: &str) -> bool {
        self.property.name().eq_ignore_ascii_case(property)
    }

    pub fn build(&self, direction: SortDirection) -> SortKey {
        SortKey {
            property: self.property,
            direction,
            selector: self.selector,
        }
    }
}

fn select_opened(t: &Trade) -> SortValue {
    SortValue::Instant(Some(t.opened))
}

fn select_closed(t: &Trade) -> SortValue {
    SortValue::Instant(t.closed)
}

fn select_balance(t: &Trade) -> SortValue {
    SortValue::Decimal(t.balance)
}

fn select_size(t: &Trade) -> SortValue {
    SortValue::Decimal(Some(t.size))
}

fn select_result(t: &Trade) -> SortValue {
    SortValue::Ordinal(t.result.map_or(NULL_RESULT_ORDINAL, |r| r.index()))
}

#[derive(Clone)]
pub struct SortRegistry {
    builders: HashMap<Property, SortBuilder>,
}

impl SortRegistry {
    pub fn new() -> Self {
        let entries: [(Property, Selector); 5] = [
            (Property::Opened, select_opened),
            (Property::Closed, select_closed),
            (Property::Balance, select_balance),
            (Property::Size, select_size),
            (Property::Result, select_result),
        ];
        let builders = entries
            .into_iter()
            .map(|(property, selector)| (property, SortBuilder { property, selector }))
            .collect();
        Self { builders }
    }

    pub fn get(&self, property: Property) -> Option<&SortBuilder> {
        self.builders.get(&property)
    }

    pub fn find(&self, property: &str) -> Option<&SortBuilder> {
        self.builders.values().find(|b| b.matches(property))
    }

    pub fn matches(&self, property: &str) -> bool {
        self.find(property).is_some()
    }

    pub fn properties(&self) -> Vec<Property> {
        let mut props: Vec<Property> = self.builders.keys().copied().collect();
        props.sort_by_key(|p| Property::ALL.iter().position(|q| q == p));
        props
    }
}

impl Default for SortRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SortRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortRegistry")
            .field("properties", &self.properties())
            .finish()
    }
}
