use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 25;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query string accepted by the unscoped collection endpoints, e.g.
/// `?page=2&limit=10&sort=-created_at`.
#[derive(Deserialize, Debug, Default)]
pub struct ListQuery {
    page: Option<i64>,
    limit: Option<i64>,
    sort: Option<SortOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match String::deserialize(deserializer)?.as_str() {
            "-created_at" => Ok(SortOrder::Newest),
            "created_at" => Ok(SortOrder::Oldest),
            _ => Err(serde::de::Error::custom("invalid sort field")),
        }
    }
}

/// A resolved window into a collection. Stores fetch one row past `limit` so
/// the handler can tell whether a next page exists without a count query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page {
    pub number: i64,
    pub limit: i64,
    pub order: SortOrder,
}

impl Page {
    /// Saturates for page numbers far past the end of any collection.
    pub fn offset(&self) -> i64 {
        (self.number - 1).saturating_mul(self.limit)
    }

    pub fn fetch_limit(&self) -> i64 {
        self.limit + 1
    }
}

impl From<&ListQuery> for Page {
    fn from(q: &ListQuery) -> Self {
        Page {
            number: q.page.unwrap_or(1).max(1),
            limit: q.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            order: q.sort.unwrap_or_default(),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct PageRef {
    pub page: i64,
    pub limit: i64,
}

#[derive(Serialize, Debug, Default, PartialEq)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
}

/// Trims the look-ahead row fetched by the store and describes the
/// neighbouring pages.
pub fn paginate<T>(page: &Page, mut rows: Vec<T>) -> (Vec<T>, Pagination) {
    let has_next = rows.len() as i64 > page.limit;
    rows.truncate(page.limit as usize);

    let pagination = Pagination {
        next: has_next.then_some(PageRef {
            page: page.number.saturating_add(1),
            limit: page.limit,
        }),
        prev: (page.number > 1).then_some(PageRef {
            page: page.number - 1,
            limit: page.limit,
        }),
    };

    (rows, pagination)
}
