//! Comparison operator catalog.

use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Ge,
        Operator::Lt,
        Operator::Le,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Lt => "lt",
            Operator::Le => "le",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(name))
    }

    /// `gt`, `ge`, `lt` and `le`: the operators that need an orderable value.
    pub fn is_inequality(self) -> bool {
        !matches!(self, Operator::Eq | Operator::Ne)
    }

    /// Whether `record <op> value` holds given `record.cmp(value)`.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Ge => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
        }
    }

    /// Null-aware comparison: `eq`/`ne` compare presence first, the
    /// inequalities only match when both sides carry a value.
    pub fn holds_nullable<T: Ord>(self, record: Option<&T>, value: Option<&T>) -> bool {
        match (record, value) {
            (Some(r), Some(v)) => self.holds(r.cmp(v)),
            (None, None) => self == Operator::Eq,
            _ => self == Operator::Ne,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
