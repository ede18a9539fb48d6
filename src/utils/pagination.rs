use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

const DEFAULT_PER_PAGE: u64 = 50;
const MAX_PER_PAGE: u64 = 500;

/// 列表分页查询参数（page 从 1 开始）
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
pub struct PageParams {
    /// 页码 (默认 1)
    pub page: Option<u64>,
    /// 每页数量 (默认 50，最大 500)
    pub per_page: Option<u64>,
}

impl PageParams {
    pub fn new(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self { page, per_page }
    }

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    /// 上限为 Postgres BIGINT 最大值
    pub fn offset(&self) -> u64 {
        (self.page() - 1)
            .saturating_mul(self.per_page())
            .min(i64::MAX as u64)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PageInfo {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PageInfo {
    pub fn new(params: &PageParams, total: u64) -> Self {
        let per_page = params.per_page();
        Self {
            page: params.page(),
            per_page,
            total,
            total_pages: total.div_ceil(per_page).max(1),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, params: &PageParams, total: u64) -> Self {
        Self {
            items,
            pagination: PageInfo::new(params, total),
        }
    }
}
