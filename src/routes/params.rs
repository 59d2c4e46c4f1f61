use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult, FieldErrors};

#[derive(Debug, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        self.normalize_with(20)
    }

    /// Normalize with a resource-specific default page size. The ceiling
    /// of 100 applies everywhere.
    pub fn normalize_with(&self, default_per_page: i64) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(default_per_page).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

/// Split a comma-separated query value into trimmed, non-empty names.
pub fn csv_names(qs: &str) -> Vec<String> {
    qs.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a comma-separated list of uuids, reporting the offending field
/// on failure.
pub fn csv_ids(field: &str, qs: &str) -> AppResult<Vec<Uuid>> {
    qs.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Uuid::parse_str(s).map_err(|_| {
                AppError::Validation(FieldErrors::single(field, format!("invalid id: {s}")))
            })
        })
        .collect()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AirportQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub dep_countries: Option<String>,
    pub dep_cities: Option<String>,
    pub dest_countries: Option<String>,
    pub dest_cities: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RouteQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub dep_countries: Option<String>,
    pub dep_cities: Option<String>,
    pub dest_countries: Option<String>,
    pub dest_cities: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CrewQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Comma-separated flight ids the crew member must be assigned to.
    pub flights: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FlightQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Exact departure calendar day, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Route id filter.
    pub route: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_to_ceiling() {
        let p = Pagination {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(p.normalize(), (1, 100, 0));
    }

    #[test]
    fn order_pagination_defaults_to_five() {
        let p = Pagination {
            page: Some(3),
            per_page: None,
        };
        assert_eq!(p.normalize_with(5), (3, 5, 10));
    }

    #[test]
    fn csv_names_trims_and_drops_empties() {
        assert_eq!(
            csv_names("Ukraine, Poland ,,France"),
            vec!["Ukraine", "Poland", "France"]
        );
    }

    #[test]
    fn csv_ids_rejects_garbage() {
        let err = csv_ids("flights", "not-a-uuid").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
