/// 分类服务 API 客户端
///
/// 封装所有与分类服务相关的 HTTP 调用，是唯一持有 `reqwest::Client` 的地方
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, ConfigError};
use crate::models::UploadSessionResponse;
use crate::services::media::MediaFile;

/// 每个请求都要带上，否则隧道服务会返回警告页面
const SKIP_BROWSER_WARNING: (&str, &str) = ("ngrok-skip-browser-warning", "true");

/// `GET /inventory` 的查询参数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InventoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<bool>,
}

impl InventoryQuery {
    /// 不带任何过滤条件
    pub fn all() -> Self {
        Self::default()
    }

    /// `?status=inventory&before=true`
    pub fn inventory_before() -> Self {
        Self {
            status: Some("inventory"),
            before: Some(true),
        }
    }
}

#[derive(Debug, Serialize)]
struct AcceptToInventoryRequest<'a> {
    image_ids: &'a [String],
}

#[derive(Debug, Serialize)]
struct ConfirmMatchesRequest<'a> {
    item_ids: &'a [String],
}

#[derive(Debug, Serialize)]
struct DeleteFromInventoryRequest<'a> {
    item_id: &'a str,
}

/// 服务端的通用确认响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub matched_images: Vec<String>,
}

/// 分类服务 API 客户端
#[derive(Clone)]
pub struct InventoryClient {
    http: Client,
    config: Config,
}

impl InventoryClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// 获取物品列表
    pub async fn fetch_inventory(&self, query: InventoryQuery) -> AppResult<UploadSessionResponse> {
        let url = self.config.endpoint("/inventory");
        debug!("GET {} {:?}", url, query);

        let request = self.http.get(&url).query(&query);
        let body = self.send("/inventory", request).await?;

        if body.trim().is_empty() {
            return Err(ApiError::EmptyResponse {
                endpoint: "/inventory".to_string(),
            }
            .into());
        }

        let response: UploadSessionResponse =
            serde_json::from_str(&body).map_err(|source| ApiError::JsonParseFailed {
                endpoint: "/inventory".to_string(),
                source,
            })?;

        debug!(
            "获取到 {} 个物品, {} 张图片, processing={}",
            response.item_count(),
            response.image_count(),
            response.processing
        );

        Ok(response)
    }

    /// 上传照片/视频，`before` 为 true 表示入库照片，false 表示索赔照片
    pub async fn upload_media(&self, before: bool, files: Vec<MediaFile>) -> AppResult<Acknowledgement> {
        let url = self.config.endpoint("/upload_media");
        let videos = files.iter().filter(|file| file.is_video()).count();
        info!(
            "📤 上传 {} 个文件, 其中视频 {} 个 (before={})",
            files.len(),
            videos,
            before
        );

        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(file.content_type)
                .map_err(|e| AppError::api_request_failed("/upload_media", e))?;
            form = form.part("files[]", part);
        }

        let request = self
            .http
            .post(&url)
            .query(&[("before", before)])
            .multipart(form);
        let body = self.send("/upload_media", request).await?;

        Ok(parse_acknowledgement(&body))
    }

    /// 把图片加入库存
    pub async fn accept_to_inventory(&self, image_ids: &[String]) -> AppResult<Acknowledgement> {
        let url = self.config.endpoint("/accept_to_inventory");
        debug!("接受入库图片: {:?}", image_ids);

        let request = self.http.post(&url).json(&AcceptToInventoryRequest { image_ids });
        let body = self.send("/accept_to_inventory", request).await?;

        Ok(parse_acknowledgement(&body))
    }

    /// 确认匹配的物品
    pub async fn confirm_matches(&self, item_ids: &[String]) -> AppResult<Acknowledgement> {
        let url = self.config.endpoint("/confirm_matches");
        debug!("确认匹配物品: {:?}", item_ids);

        let request = self.http.post(&url).json(&ConfirmMatchesRequest { item_ids });
        let body = self.send("/confirm_matches", request).await?;

        Ok(parse_acknowledgement(&body))
    }

    /// 从库存删除物品的所有图片
    pub async fn delete_from_inventory(&self, item_id: &str) -> AppResult<Acknowledgement> {
        let url = self.config.endpoint("/delete_from_inventory");
        debug!("删除物品: {}", item_id);

        let request = self
            .http
            .post(&url)
            .json(&DeleteFromInventoryRequest { item_id });
        let body = self.send("/delete_from_inventory", request).await?;

        Ok(parse_acknowledgement(&body))
    }

    /// 发送请求并读取响应体，非 2xx 视为错误
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> AppResult<String> {
        let response: Response = request
            .header(SKIP_BROWSER_WARNING.0, SKIP_BROWSER_WARNING.1)
            .send()
            .await
            .map_err(|e| {
                error!("请求 {} 失败: {}", endpoint, e);
                AppError::api_request_failed(endpoint, e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        if !status.is_success() {
            let message = parse_acknowledgement(&body).error.or(Some(body).filter(|b| !b.is_empty()));
            error!("{} 返回 {}: {:?}", endpoint, status, message);
            return Err(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            }
            .into());
        }

        Ok(body)
    }
}

/// 确认响应的格式不固定，解析失败时退回空响应
fn parse_acknowledgement(body: &str) -> Acknowledgement {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => serde_json::from_value(value).unwrap_or_default(),
        Err(_) => Acknowledgement::default(),
    }
}
