//! Property filter registry (one predicate builder per property/operator pair).

use crate::domain::error::ValueParseError;
use crate::domain::operator::Operator;
use crate::domain::property::{Property, PropertyDescriptor};
use crate::domain::trade::Trade;
use crate::domain::value_parser::{DecimalParser, InstantParser, ResultParser, ValueParser};
use std::collections::HashMap;
use std::fmt;

type TradeTest = dyn Fn(&Trade) -> bool + Send + Sync;

/// Boolean test over a single trade.
pub struct Predicate {
    test: Box<TradeTest>,
}

impl Predicate {
    pub fn new(test: impl Fn(&Trade) -> bool + Send + Sync + 'static) -> Self {
        Self {
            test: Box::new(test),
        }
    }

    /// Identity for [`Predicate::and`].
    pub fn match_all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, trade: &Trade) -> bool {
        (self.test)(trade)
    }

    pub fn and(self, other: Predicate) -> Self {
        Self::new(move |trade| self.matches(trade) && other.matches(trade))
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FilterBuilder {
    descriptor: &'static PropertyDescriptor,
    operator: Operator,
}

impl FilterBuilder {
    pub fn build(&self, raw: &str, is_literal: bool) -> Result<Predicate, ValueParseError> {
        let op = self.operator;
        let nullable = self.descriptor.nullable;
        let predicate = match self.descriptor.property {
            Property::Opened => {
                let value = required(InstantParser { nullable }.parse(raw, is_literal)?)?;
                Predicate::new(move |t| op.holds(t.opened.cmp(&value)))
            }
            Property::Closed => {
                let value = InstantParser { nullable }.parse(raw, is_literal)?;
                Predicate::new(move |t| op.holds_nullable(t.closed.as_ref(), value.as_ref()))
            }
            Property::Balance => {
                let value = DecimalParser { nullable }.parse(raw, is_literal)?;
                Predicate::new(move |t| op.holds_nullable(t.balance.as_ref(), value.as_ref()))
            }
            Property::Size => {
                let value = required(DecimalParser { nullable }.parse(raw, is_literal)?)?;
                Predicate::new(move |t| op.holds(t.size.cmp(&value)))
            }
            Property::Result => {
                let value = ResultParser { nullable }
                    .parse(raw, is_literal)?
                    .map(|r| r.index());
                Predicate::new(move |t| {
                    let index = t.result.map(|r| r.index());
                    op.holds_nullable(index.as_ref(), value.as_ref())
                })
            }
        };
        Ok(predicate)
    }
}

fn required<T>(value: Option<T>) -> Result<T, ValueParseError> {
    value.ok_or(ValueParseError::NullNotAllowed)
}

/// Immutable map from (property, operator) to its builder. Built once and
/// shared; lookups are by case-insensitive name.
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    builders: HashMap<(Property, Operator), FilterBuilder>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        let mut builders = HashMap::new();
        for descriptor in Property::descriptors() {
            for &operator in descriptor.operators {
                builders.insert(
                    (descriptor.property, operator),
                    FilterBuilder {
                        descriptor,
                        operator,
                    },
                );
            }
        }
        Self { builders }
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    pub fn get(&self, property: Property, operator: Operator) -> Option<&FilterBuilder> {
        self.builders.get(&(property, operator))
    }

    pub fn find(&self, property: &str, operator: &str) -> Option<&FilterBuilder> {
        let property = Property::from_name(property)?;
        let operator = Operator::from_name(operator)?;
        self.get(property, operator)
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
