//! `?page=&size=&sort=` query parameters

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::pagination::DEFAULT_PAGE_SIZE;
use crate::domain::{DomainError, PageRequest, SortOrder};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page index
    pub page: Option<u64>,
    /// Page size, 1 to 100
    pub size: Option<u64>,
    /// `property` or `property,asc|desc`
    pub sort: Option<String>,
}

impl PageQuery {
    pub fn into_request(self, default_sort: &str) -> Result<PageRequest, DomainError> {
        let sort = match self.sort.as_deref() {
            Some(raw) => SortOrder::parse(raw).map_err(DomainError::InvalidArgument)?,
            None => None,
        }
        .unwrap_or_else(|| SortOrder::asc(default_sort));

        let request = PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort,
        );

        // The row offset must fit a signed 64-bit SQL OFFSET
        let offset = request.page.checked_mul(request.size);
        if offset.is_none_or(|o| i64::try_from(o).is_err()) {
            return Err(DomainError::InvalidArgument(format!(
                "Page index out of range: {}",
                request.page
            )));
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortDirection;

    #[test]
    fn defaults_apply() {
        let request = PageQuery::default().into_request("dateRented").unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
        assert_eq!(request.sort, SortOrder::asc("dateRented"));
    }

    #[test]
    fn explicit_sort_wins() {
        let query = PageQuery {
            page: Some(2),
            size: Some(5),
            sort: Some("birthdate,desc".to_string()),
        };
        let request = query.into_request("customerName").unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(request.size, 5);
        assert_eq!(request.sort.property, "birthdate");
        assert_eq!(request.sort.direction, SortDirection::Desc);
    }

    #[test]
    fn huge_page_index_is_rejected() {
        let query = PageQuery {
            page: Some(u64::MAX),
            size: Some(10),
            ..Default::default()
        };
        let err = query.into_request("customerName").unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Page index out of range: {}", u64::MAX)
        );

        let query = PageQuery {
            page: Some(u64::MAX / 100),
            size: Some(100),
            ..Default::default()
        };
        assert!(matches!(
            query.into_request("customerName"),
            Err(DomainError::InvalidArgument(_))
        ));

        let query = PageQuery {
            page: Some(1_000_000),
            size: Some(100),
            ..Default::default()
        };
        assert_eq!(query.into_request("customerName").unwrap().page, 1_000_000);
    }

    #[test]
    fn bad_direction_is_invalid_argument() {
        let query = PageQuery {
            sort: Some("birthdate,up".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            query.into_request("customerName"),
            Err(DomainError::InvalidArgument(_))
        ));
    }
}
