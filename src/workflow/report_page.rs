//! 索赔报告页 - 流程层
//!
//! 读取索赔存储，渲染报告，写入文件或返回给调用方打印

use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::Claim;
use crate::services::{ClaimReport, ClaimStore};

/// 报告页流程
pub struct ReportPage {
    store: ClaimStore,
    report: ClaimReport,
}

impl ReportPage {
    pub fn new(store: ClaimStore, report: ClaimReport) -> Self {
        Self { store, report }
    }

    /// 生成报告文本
    pub async fn render(&self, claim_name: &str) -> AppResult<String> {
        let items = self.store.load().await?;
        if items.is_empty() {
            warn!("⚠️ 索赔存储 {} 中没有物品", self.store.path().display());
        }
        let claim = Claim::new(claim_name, items);
        Ok(self.report.render(&claim))
    }

    /// 生成报告并写入文件
    pub async fn write_to(&self, claim_name: &str, path: &str) -> AppResult<()> {
        let content = self.render(claim_name).await?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| AppError::file_write_failed(path, e))?;
        info!("📄 报告已保存至: {}", path);
        Ok(())
    }
}
