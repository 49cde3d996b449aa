use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::Item;

/// `/inventory` 的响应：一次服务端异步任务的快照
///
/// 实际服务端只返回 `items`，其他字段都有默认值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadSessionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub after: bool,
    /// 为 true 时客户端保持加载状态
    #[serde(default)]
    pub processing: bool,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl UploadSessionResponse {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn image_count(&self) -> usize {
        self.items.iter().map(|item| item.images.len()).sum()
    }
}
