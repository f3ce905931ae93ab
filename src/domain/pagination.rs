//! Paging and sorting types shared by every listing.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Caller-chosen sort property, resolved to a column by each repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(property: &str) -> Self {
        Self {
            property: property.to_string(),
            direction: SortDirection::Asc,
        }
    }

    /// Parse `field` or `field,asc|desc`. Blank input yields `None`.
    pub fn parse(raw: &str) -> Result<Option<Self>, String> {
        let mut parts = raw.split(',').map(str::trim);
        let property = match parts.next() {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => return Ok(None),
        };
        let direction = match parts.next().map(|d| d.to_ascii_lowercase()) {
            None => SortDirection::Asc,
            Some(d) if d == "asc" => SortDirection::Asc,
            Some(d) if d == "desc" => SortDirection::Desc,
            Some(d) => return Err(format!("Invalid sort direction: {}", d)),
        };
        if parts.next().is_some() {
            return Err(format!("Invalid sort expression: {}", raw));
        }
        Ok(Some(Self {
            property,
            direction,
        }))
    }
}

/// Zero-based page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: SortOrder,
}

impl PageRequest {
    pub fn new(page: u64, size: u64, sort: SortOrder) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort,
        }
    }

    pub fn first(sort: SortOrder) -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, sort)
    }
}

/// One page of results plus totals
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(request.size);
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
            first: request.page == 0,
            last: request.page + 1 >= total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sort_expressions() {
        assert_eq!(
            SortOrder::parse("customerName").unwrap(),
            Some(SortOrder::asc("customerName"))
        );
        assert_eq!(
            SortOrder::parse("dateRented,DESC").unwrap(),
            Some(SortOrder {
                property: "dateRented".to_string(),
                direction: SortDirection::Desc,
            })
        );
        assert_eq!(SortOrder::parse("  ").unwrap(), None);
        assert!(SortOrder::parse("name,sideways").is_err());
    }

    #[test]
    fn page_totals() {
        let request = PageRequest::new(1, 10, SortOrder::asc("id"));
        let page = Page::new(vec![1, 2, 3], &request, 13);
        assert_eq!(page.total_pages, 2);
        assert!(!page.first);
        assert!(page.last);

        let empty: Page<i32> = Page::new(vec![], &PageRequest::first(SortOrder::asc("id")), 0);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.first && empty.last);
    }

    #[test]
    fn size_is_bounded() {
        assert_eq!(PageRequest::new(0, 0, SortOrder::asc("id")).size, 1);
        assert_eq!(PageRequest::new(0, 5000, SortOrder::asc("id")).size, MAX_PAGE_SIZE);
    }
}
