use chrono::NaiveDate;
use serde::Deserialize;

use super::ApiError;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;
pub const DEFAULT_SAMPLE_SIZE: u64 = 10;
pub const MAX_SAMPLE_SIZE: u64 = 50;

const INVALID_PARAMS: &str = "Invalid request parameters";

/// Raw query strings. Values stay untyped here so a malformed `?page=abc`
/// produces the uniform validation envelope instead of an extractor
/// rejection, and so every failing field can be reported at once.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct YearRangeParams {
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SampleParams {
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub page: u64,
    pub limit: u64,
}

impl PageSpec {
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    /// January 1st of the start year.
    pub from: NaiveDate,
    /// December 31st of the end year (inclusive range).
    pub to: NaiveDate,
    pub paging: PageSpec,
}

fn parse_bounded(
    raw: Option<&str>,
    field: &str,
    max: u64,
    default: u64,
    issues: &mut Vec<String>,
) -> u64 {
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse::<u64>() {
        Ok(value) if (1..=max).contains(&value) => value,
        _ => {
            issues.push(format!("{field} must be an integer between 1 and {max}"));
            default
        }
    }
}

fn parse_page(raw: Option<&str>, issues: &mut Vec<String>) -> u64 {
    let Some(raw) = raw else {
        return 1;
    };

    match raw.trim().parse::<u64>() {
        Ok(value) if value >= 1 => value,
        _ => {
            issues.push("page must be an integer greater than or equal to 1".to_string());
            1
        }
    }
}

fn parse_year(raw: Option<&str>, field: &str, issues: &mut Vec<String>) -> Option<i32> {
    let Some(raw) = raw else {
        issues.push(format!("{field} is required"));
        return None;
    };

    match raw.trim().parse::<i32>() {
        Ok(year) => Some(year),
        Err(_) => {
            issues.push(format!("{field} must be an integer"));
            None
        }
    }
}

/// page >= 1 (default 1), limit in [1, 100] (default 20).
pub fn validate_paging(params: &PageParams) -> Result<PageSpec, ApiError> {
    let mut issues = Vec::new();

    let page = parse_page(params.page.as_deref(), &mut issues);
    let limit = parse_bounded(
        params.limit.as_deref(),
        "limit",
        MAX_PAGE_SIZE,
        DEFAULT_PAGE_SIZE,
        &mut issues,
    );

    if issues.is_empty() {
        Ok(PageSpec { page, limit })
    } else {
        Err(ApiError::validation(INVALID_PARAMS, issues))
    }
}

/// Both years are required integers with start <= end; paging rules as for
/// the plain listing. Every failing field is reported.
pub fn validate_year_range(params: &YearRangeParams) -> Result<YearRange, ApiError> {
    let mut issues = Vec::new();

    let start = parse_year(params.start_year.as_deref(), "start_year", &mut issues);
    let end = parse_year(params.end_year.as_deref(), "end_year", &mut issues);

    let page = parse_page(params.page.as_deref(), &mut issues);
    let limit = parse_bounded(
        params.limit.as_deref(),
        "limit",
        MAX_PAGE_SIZE,
        DEFAULT_PAGE_SIZE,
        &mut issues,
    );

    let span = match (start, end) {
        (Some(start), Some(end)) if start > end => {
            issues.push("start_year must be less than or equal to end_year".to_string());
            None
        }
        (Some(start), Some(end)) => {
            // Only fails for years outside chrono's representable range.
            match (
                NaiveDate::from_ymd_opt(start, 1, 1),
                NaiveDate::from_ymd_opt(end, 12, 31),
            ) {
                (Some(from), Some(to)) => Some((from, to)),
                _ => {
                    issues.push("start_year and end_year are out of range".to_string());
                    None
                }
            }
        }
        _ => None,
    };

    match span {
        Some((from, to)) if issues.is_empty() => Ok(YearRange {
            from,
            to,
            paging: PageSpec { page, limit },
        }),
        _ => Err(ApiError::validation(INVALID_PARAMS, issues)),
    }
}

/// Random-sample limit in [1, 50] (default 10).
pub fn validate_sample_size(params: &SampleParams) -> Result<u64, ApiError> {
    let mut issues = Vec::new();

    let limit = parse_bounded(
        params.limit.as_deref(),
        "limit",
        MAX_SAMPLE_SIZE,
        DEFAULT_SAMPLE_SIZE,
        &mut issues,
    );

    if issues.is_empty() {
        Ok(limit)
    } else {
        Err(ApiError::validation(INVALID_PARAMS, issues))
    }
}

/// Show ids are externally assigned positive integers.
pub fn validate_show_id(raw: &str) -> Result<i32, ApiError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::validation(
            INVALID_PARAMS,
            vec!["id must be a positive integer".to_string()],
        )),
    }
}
