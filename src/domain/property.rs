//! Filterable trade properties and their descriptors.

use crate::domain::operator::Operator;
use crate::domain::value_parser::{DecimalParser, InstantParser, ResultParser, ValueParser};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Opened,
    Closed,
    Balance,
    Size,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Instant,
    Decimal,
    Ordinal,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Instant => "timestamp",
            ValueType::Decimal => "decimal",
            ValueType::Ordinal => "result",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PropertyDescriptor {
    pub property: Property,
    pub value_type: ValueType,
    pub nullable: bool,
    pub operators: &'static [Operator],
}

impl PropertyDescriptor {
    pub fn name(&self) -> &'static str {
        self.property.name()
    }

    pub fn supports(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }

    /// A null comparison cannot be ordered, so nullable properties refuse it
    /// for the inequality operators.
    pub fn forbids_null(&self, operator: Operator) -> bool {
        self.nullable && operator.is_inequality()
    }

    pub fn can_parse(&self, raw: &str, is_literal: bool) -> bool {
        let nullable = self.nullable;
        match self.value_type {
            ValueType::Instant => InstantParser { nullable }.can_parse(raw, is_literal),
            ValueType::Decimal => DecimalParser { nullable }.can_parse(raw, is_literal),
            ValueType::Ordinal => ResultParser { nullable }.can_parse(raw, is_literal),
        }
    }
}

const ALL_OPERATORS: &[Operator] = &Operator::ALL;

static DESCRIPTORS: [PropertyDescriptor; 5] = [
    PropertyDescriptor {
        property: Property::Opened,
        value_type: ValueType::Instant,
        nullable: false,
        operators: ALL_OPERATORS,
    },
    PropertyDescriptor {
        property: Property::Closed,
        value_type: ValueType::Instant,
        nullable: true,
        operators: ALL_OPERATORS,
    },
    PropertyDescriptor {
        property: Property::Balance,
        value_type: ValueType::Decimal,
        nullable: true,
        operators: ALL_OPERATORS,
    },
    PropertyDescriptor {
        property: Property::Size,
        value_type: ValueType::Decimal,
        nullable: false,
        operators: ALL_OPERATORS,
    },
    PropertyDescriptor {
        property: Property::Result,
        value_type: ValueType::Ordinal,
        nullable: true,
        operators: ALL_OPERATORS,
    },
];

impl Property {
    pub const ALL: [Property; 5] = [
        Property::Opened,
        Property::Closed,
        Property::Balance,
        Property::Size,
        Property::Result,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Property::Opened => "Opened",
            Property::Closed => "Closed",
            Property::Balance => "Balance",
            Property::Size => "Size",
            Property::Result => "Result",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn descriptor(self) -> &'static PropertyDescriptor {
        match self {
            Property::Opened => &DESCRIPTORS[0],
            Property::Closed => &DESCRIPTORS[1],
            Property::Balance => &DESCRIPTORS[2],
            Property::Size => &DESCRIPTORS[3],
            Property::Result => &DESCRIPTORS[4],
        }
    }

    pub fn descriptors() -> &'static [PropertyDescriptor] {
        &DESCRIPTORS
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
