//! 页面加载状态与会话拉取
//!
//! 所有页面共用：拉取一次 `/inventory`，服务端仍在处理时可选轮询

use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::clients::{InventoryClient, InventoryQuery};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::UploadSessionResponse;
use crate::workflow::page_ctx::PageCtx;

/// 页面状态
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    /// 服务端仍在处理
    Processing,
    /// 没有拿到可用的响应
    Error,
    /// 可以渲染
    Ready(T),
}

impl<T> PageState<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PageState<U> {
        match self {
            PageState::Processing => PageState::Processing,
            PageState::Error => PageState::Error,
            PageState::Ready(value) => PageState::Ready(f(value)),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, PageState::Ready(_))
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            PageState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// 非 Ready 状态下的占位文本
    pub fn placeholder(&self, waiting_message: &str) -> Option<String> {
        match self {
            PageState::Processing => Some(format!("Hang tight!\n{}\n", waiting_message)),
            PageState::Error => Some("error\n".to_string()),
            PageState::Ready(_) => None,
        }
    }
}

impl PageState<UploadSessionResponse> {
    /// 根据一次拉取的结果决定页面状态
    pub fn from_fetch(result: AppResult<UploadSessionResponse>) -> Self {
        match result {
            Ok(response) if response.processing => PageState::Processing,
            Ok(response) => PageState::Ready(response),
            Err(_) => PageState::Error,
        }
    }
}

/// 轮询策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub enabled: bool,
    pub interval: Duration,
    pub max_attempts: usize,
}

impl PollPolicy {
    pub fn from_config(config: &Config, wait: bool) -> Self {
        Self {
            enabled: wait,
            interval: Duration::from_secs(config.poll_interval_secs),
            max_attempts: config.poll_max_attempts.max(1),
        }
    }
}

/// 会话拉取器
#[derive(Clone)]
pub struct SessionLoader {
    client: InventoryClient,
    poll: PollPolicy,
}

impl SessionLoader {
    pub fn new(client: InventoryClient, poll: PollPolicy) -> Self {
        Self { client, poll }
    }

    pub fn client(&self) -> &InventoryClient {
        &self.client
    }

    /// 拉取会话，服务端处理中且允许等待时重复拉取
    pub async fn load(&self, query: InventoryQuery, ctx: &PageCtx) -> PageState<UploadSessionResponse> {
        let attempts = if self.poll.enabled { self.poll.max_attempts } else { 1 };

        for attempt in 1..=attempts {
            let result = self.client.fetch_inventory(query).await;
            if let Err(e) = &result {
                error!("{} 获取数据失败: {}", ctx, e);
            }

            let state = PageState::from_fetch(result);
            if state != PageState::Processing {
                return state;
            }

            if attempt < attempts {
                info!(
                    "{} ⏳ 服务端处理中 (第 {}/{} 次)，{} 秒后重试...",
                    ctx,
                    attempt,
                    attempts,
                    self.poll.interval.as_secs()
                );
                sleep(self.poll.interval).await;
            }
        }

        warn!("{} 服务端仍在处理", ctx);
        PageState::Processing
    }
}
