//! Search request validation.
//!
//! Each clause is checked rule by rule and stops at its first failure; failures
//! from different clauses and from pagination are all collected.

use crate::domain::error::{FieldError, ValidationErrors};
use crate::domain::operator::Operator;
use crate::domain::property::Property;
use crate::domain::query::{FilterClause, PageRequest, SearchRequest, SortClause};
use crate::domain::sort_registry::SortRegistry;
use crate::domain::value_parser::is_null_literal;

pub const MAX_COMPARISON_VALUE_LEN: usize = 50;

pub fn validate_request(
    request: &SearchRequest,
    sorts: &SortRegistry,
    max_page_size: u32,
) -> Result<PageRequest, ValidationErrors> {
    let mut errors: Vec<FieldError> = request
        .filter
        .iter()
        .enumerate()
        .filter_map(|(i, clause)| validate_filter_clause(i, clause))
        .collect();

    errors.extend(
        request
            .sort
            .iter()
            .enumerate()
            .filter_map(|(i, clause)| validate_sort_clause(i, clause, sorts)),
    );

    match validate_pagination(request.page, request.page_size, max_page_size) {
        Ok(page) if errors.is_empty() => Ok(page),
        Ok(_) => Err(ValidationErrors::new(errors)),
        Err(page_errors) => {
            errors.extend(page_errors);
            Err(ValidationErrors::new(errors))
        }
    }
}

pub fn validate_filter_clause(index: usize, clause: &FilterClause) -> Option<FieldError> {
    let field = |name: &str| format!("filter[{index}].{name}");

    let Some(property) = Property::from_name(&clause.property_name) else {
        return Some(FieldError::new(
            field("propertyName"),
            format!("unknown property '{}'", clause.property_name),
        ));
    };
    let descriptor = property.descriptor();

    let operator = match Operator::from_name(&clause.operator) {
        Some(op) if descriptor.supports(op) => op,
        _ => {
            return Some(FieldError::new(
                field("operator"),
                format!(
                    "operator '{}' is not supported for {}",
                    clause.operator, property
                ),
            ));
        }
    };

    let value = clause.comparison_value.as_str();
    let null = is_null_literal(value, clause.is_literal);
    let value_error = if value.trim().is_empty() {
        Some("comparison value must not be empty".to_string())
    } else if value.chars().count() > MAX_COMPARISON_VALUE_LEN {
        Some(format!(
            "comparison value must be at most {MAX_COMPARISON_VALUE_LEN} characters"
        ))
    } else if !descriptor.can_parse(value, clause.is_literal) {
        if null {
            Some(format!("{property} cannot be compared against null"))
        } else {
            Some(format!(
                "'{value}' is not a valid {} value for {property}",
                descriptor.value_type.as_str()
            ))
        }
    } else if null && descriptor.forbids_null(operator) {
        Some(format!("null cannot be compared with '{operator}'"))
    } else {
        None
    };

    value_error.map(|message| FieldError::new(field("comparisonValue"), message))
}

pub fn validate_sort_clause(
    index: usize,
    clause: &SortClause,
    sorts: &SortRegistry,
) -> Option<FieldError> {
    if sorts.matches(&clause.property) {
        return None;
    }
    Some(FieldError::new(
        format!("sort[{index}].property"),
        format!("unknown sort property '{}'", clause.property),
    ))
}

pub fn validate_pagination(
    page: i64,
    page_size: i64,
    max_page_size: u32,
) -> Result<PageRequest, Vec<FieldError>> {
    let mut errors = Vec::new();

    let page = if page < 1 {
        errors.push(FieldError::new("page", "page must be at least 1"));
        None
    } else if let Ok(p) = u32::try_from(page) {
        Some(p)
    } else {
        errors.push(FieldError::new("page", "page is out of range"));
        None
    };

    let page_size = if page_size < 1 {
        errors.push(FieldError::new("pageSize", "pageSize must be at least 1"));
        None
    } else if page_size > i64::from(max_page_size) {
        errors.push(FieldError::new(
            "pageSize",
            format!("pageSize must be at most {max_page_size}"),
        ));
        None
    } else {
        u32::try_from(page_size).ok()
    };

    match (page, page_size) {
        (Some(page), Some(page_size)) => Ok(PageRequest { page, page_size }),
        _ => Err(errors),
    }
}
