//! Search domain models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

use crate::dog::DogId;
use crate::error::{PawError, Result};

/// Page sizes offered to the user.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [12, 24, 48, 100];

/// Page size used until the user picks another one.
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Field the catalog sorts results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Breed,
    Name,
    Age,
}

/// Ordering direction for sorted queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort order, rendered on the wire as `<field>:<direction>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Every order the catalog understands, in menu order.
    pub fn all() -> [SortOrder; 6] {
        use SortDirection::*;
        use SortField::*;
        [
            Self::new(Breed, Asc),
            Self::new(Breed, Desc),
            Self::new(Name, Asc),
            Self::new(Name, Desc),
            Self::new(Age, Asc),
            Self::new(Age, Desc),
        ]
    }

    /// Menu label for this order.
    pub fn label(&self) -> &'static str {
        use SortDirection::*;
        use SortField::*;
        match (self.field, self.direction) {
            (Breed, Asc) => "Breed: A-Z",
            (Breed, Desc) => "Breed: Z-A",
            (Name, Asc) => "Name: A-Z",
            (Name, Desc) => "Name: Z-A",
            (Age, Asc) => "Age: Youngest First",
            (Age, Desc) => "Age: Oldest First",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction)
    }
}

impl FromStr for SortOrder {
    type Err = PawError;

    fn from_str(s: &str) -> Result<Self> {
        let (field, direction) = s
            .split_once(':')
            .ok_or_else(|| PawError::invalid_filter(format!("sort order '{s}' is not <field>:<asc|desc>")))?;
        let field = field
            .trim()
            .parse::<SortField>()
            .map_err(|_| PawError::invalid_filter(format!("unknown sort field '{field}'")))?;
        let direction = direction
            .trim()
            .parse::<SortDirection>()
            .map_err(|_| PawError::invalid_filter(format!("unknown sort direction '{direction}'")))?;
        Ok(Self { field, direction })
    }
}

/// Filters to refine search results.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Breeds to include; empty means every breed
    pub breeds: BTreeSet<String>,

    /// Zip codes to include; empty means everywhere
    #[serde(default)]
    pub zip_codes: BTreeSet<String>,

    /// Inclusive lower age bound
    pub age_min: Option<u32>,

    /// Inclusive upper age bound
    pub age_max: Option<u32>,

    pub sort: SortOrder,
}

impl FilterState {
    /// Builds a validated filter state.
    pub fn new<I, S>(breeds: I, age_min: Option<u32>, age_max: Option<u32>, sort: SortOrder) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let filters = Self {
            breeds: breeds.into_iter().map(Into::into).collect(),
            zip_codes: BTreeSet::new(),
            age_min,
            age_max,
            sort,
        };
        filters.validate()?;
        Ok(filters)
    }

    /// Restricts results to the given zip codes.
    pub fn with_zip_codes<I, S>(mut self, zip_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.zip_codes = zip_codes.into_iter().map(Into::into).collect();
        self
    }

    /// Same filters with another sort order.
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.age_min, self.age_max)
            && min > max
        {
            return Err(PawError::invalid_filter(format!(
                "minimum age {min} is greater than maximum age {max}"
            )));
        }
        Ok(())
    }
}

/// Opaque pagination token, resent verbatim as `from`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single page query: filters, page size and an optional cursor.
///
/// A `cursor` of `None` asks for the first page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub filters: FilterState,
    pub page_size: u32,
    pub cursor: Option<Cursor>,
}

impl PageRequest {
    /// First page for the given filters.
    pub fn first_page(filters: FilterState, page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(PawError::invalid_filter("page size must be greater than zero"));
        }
        filters.validate()?;
        Ok(Self {
            filters,
            page_size,
            cursor: None,
        })
    }

    /// Same query continued from `cursor`.
    pub fn at_cursor(&self, cursor: Cursor) -> Self {
        Self {
            filters: self.filters.clone(),
            page_size: self.page_size,
            cursor: Some(cursor),
        }
    }

    /// Query-string pairs for `GET /dogs/search`.
    ///
    /// Collections become repeated keys (`breeds=a&breeds=b`).
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for breed in &self.filters.breeds {
            pairs.push(("breeds", breed.clone()));
        }
        for zip in &self.filters.zip_codes {
            pairs.push(("zipCodes", zip.clone()));
        }
        if let Some(min) = self.filters.age_min {
            pairs.push(("ageMin", min.to_string()));
        }
        if let Some(max) = self.filters.age_max {
            pairs.push(("ageMax", max.to_string()));
        }
        pairs.push(("size", self.page_size.to_string()));
        pairs.push(("sort", self.filters.sort.to_string()));
        if let Some(cursor) = &self.cursor {
            pairs.push(("from", cursor.as_str().to_string()));
        }
        pairs
    }
}

/// One page of search results as returned by `GET /dogs/search`.
///
/// `next_cursor`/`prev_cursor` keep the raw strings the service sent; they may
/// embed the token in a larger query fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageResult {
    #[serde(rename = "resultIds")]
    pub result_ids: Vec<DogId>,
    #[serde(rename = "total")]
    pub total_matches: u64,
    #[serde(rename = "next", default)]
    pub next_cursor: Option<String>,
    #[serde(rename = "prev", default)]
    pub prev_cursor: Option<String>,
}

/// Derived pagination figures for the page on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_results: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationInfo {
    pub fn derive(result: &PageResult, page_size: u32, current_page: u32) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            result.total_matches.div_ceil(u64::from(page_size))
        };
        Self {
            current_page,
            total_pages,
            total_results: result.total_matches,
            has_next: result.next_cursor.is_some(),
            has_prev: result.prev_cursor.is_some(),
        }
    }
}
