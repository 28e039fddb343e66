//! Pagination and the normalized list envelope

use serde::{Deserialize, Serialize};

/// Pagination block as returned by list endpoints (`limit`/`offset`/`total`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub total: u64,
}

/// 1-based page request issued by view models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page: page.max(1), limit: limit.max(1) }
    }

    /// Row offset for the `offset` query parameter
    pub fn offset(&self) -> u32 {
        self.page.max(1).saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, crate::constants::DEFAULT_PAGE_SIZE)
    }
}

/// Page position as shown by tables (`page`, `totalPages`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl PageInfo {
    pub fn from_pagination(pagination: &Pagination) -> Self {
        let limit = pagination.limit;
        let (page, total_pages) = if limit == 0 {
            (1, 0)
        } else {
            (pagination.offset / limit + 1, pagination.total.div_ceil(u64::from(limit)))
        };
        Self { page, limit, total: pagination.total, total_pages }
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }
}

/// Stable response shape produced by every API client, whatever envelope the
/// backend used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: Vec<T>, pagination: Option<Pagination>) -> Self {
        Self { success: true, data, pagination, error: None }
    }

    /// Pagination, or one derived from the request when the backend sent none
    pub fn pagination_or(&self, request: &PageRequest) -> Pagination {
        self.pagination.unwrap_or(Pagination {
            limit: request.limit,
            offset: request.offset(),
            total: u64::from(request.offset()) + self.data.len() as u64,
        })
    }
}

/// One fetched page handed to view models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn from_response(response: ApiResponse<T>, request: &PageRequest) -> Self {
        let pagination = response.pagination_or(request);
        Self { items: response.data, pagination }
    }
}
