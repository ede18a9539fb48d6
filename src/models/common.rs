use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// 失败响应体 `{"success": false, "error": {...}}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    pub count: u64,
}

/// 列表过滤：`?active=true` 仅返回激活记录
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ActiveFilter {
    pub active: Option<bool>,
}
