use crate::{FuelType, Transmission};
use std::fmt;

/// Catalog filter state. Every field is optional; unset fields are omitted
/// from the query string entirely rather than sent empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CarFilter {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub transmission: Option<Transmission>,
    pub fuel_type: Option<FuelType>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl CarFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.make.is_none()
            && self.model.is_none()
            && self.year.is_none()
            && self.transmission.is_none()
            && self.fuel_type.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Render to query pairs in the order the backend documents them.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(make) = &self.make {
            pairs.push(("make", make.clone()));
        }
        if let Some(model) = &self.model {
            pairs.push(("model", model.clone()));
        }
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        if let Some(transmission) = self.transmission {
            pairs.push(("transmission", transmission.as_str().to_owned()));
        }
        if let Some(fuel_type) = self.fuel_type {
            pairs.push(("fuelType", fuel_type.as_str().to_owned()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("minPrice", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("maxPrice", max_price.to_string()));
        }
        pairs
    }
}

/// Sort direction for paged listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination and ordering state for the public catalog. Pages are 0-based;
/// the backend defaults match [`PageQuery::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    pub page: usize,
    pub size: usize,
    pub sort_by: String,
    pub sort_dir: SortDir,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 12,
            sort_by: "id".to_owned(),
            sort_dir: SortDir::Asc,
        }
    }
}

impl PageQuery {
    /// First page with the given size, keeping default ordering.
    #[must_use]
    pub fn sized(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// The same query moved to another page. Filter changes reset to page
    /// zero; this is for the pager itself.
    #[must_use]
    pub fn at_page(&self, page: usize) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sortBy", self.sort_by.clone()),
            ("sortDir", self.sort_dir.as_str().to_owned()),
        ]
    }
}
