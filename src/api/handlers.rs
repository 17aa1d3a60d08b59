use crate::error::LinkError;
use crate::models::EnrichedRecord;
use crate::service::{LinkRequest, VerificationLinker};
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 请求体: 多份文档
#[derive(Debug, Deserialize)]
pub struct BatchLinkRequest {
    pub documents: Vec<LinkRequest>,
}

/// 批量响应体（含每份文档的链接结果）
#[derive(Debug, Serialize)]
pub struct BatchLinkResponse {
    pub success: bool,
    pub message: String,
    pub results: Option<Vec<EnrichedRecord>>,
}

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

fn error_response(e: LinkError) -> Response {
    tracing::error!("Linking request failed: {}", e);
    let response = ErrorResponse {
        success: false,
        message: format!("Error: {}", e),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 单文档链接接口
pub async fn link_document(
    State(linker): State<Arc<VerificationLinker>>,
    Json(req): Json<LinkRequest>,
) -> Response {
    // 跨度匹配是 CPU 密集的, 放到阻塞线程池
    let result = tokio::task::spawn_blocking(move || linker.link_request(&req)).await;

    match result {
        Ok(enriched) => (StatusCode::OK, Json(enriched)).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// 批量链接接口
pub async fn link_batch(
    State(linker): State<Arc<VerificationLinker>>,
    Json(req): Json<BatchLinkRequest>,
) -> Response {
    let documents = req.documents;
    let result = tokio::task::spawn_blocking(move || linker.link_batch(&documents)).await;

    match result {
        Ok(results) => {
            let matched: usize = results.iter().map(|r| r.match_summary.matched).sum();
            let total: usize = results.iter().map(|r| r.match_summary.total_fields).sum();

            let response = BatchLinkResponse {
                success: true,
                message: format!(
                    "Successfully linked {} documents, {}/{} fields matched",
                    results.len(), matched, total
                ),
                results: Some(results),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e.into()),
    }
}
