//! 上传页流程 - 流程层
//!
//! 选择上传类型（入库 / 索赔），收集文件，上传后跳转到审核页

use std::path::PathBuf;

use tracing::{error, info};

use crate::clients::InventoryClient;
use crate::error::{AppResult, BusinessError};
use crate::services::MediaCollector;
use crate::utils::logging::log_navigation;
use crate::workflow::page_ctx::Route;

/// 上传类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadTab {
    /// 入库照片（before=true）
    #[default]
    Inventory,
    /// 索赔照片（before=false）
    Claims,
}

impl UploadTab {
    pub fn before(self) -> bool {
        matches!(self, UploadTab::Inventory)
    }

    pub fn label(self) -> &'static str {
        match self {
            UploadTab::Inventory => "Inventory",
            UploadTab::Claims => "For Claims",
        }
    }
}

/// 上传页流程
pub struct UploadPage {
    client: InventoryClient,
    tab: UploadTab,
    files: MediaCollector,
}

impl UploadPage {
    pub fn new(client: InventoryClient) -> Self {
        Self {
            client,
            tab: UploadTab::default(),
            files: MediaCollector::new(),
        }
    }

    pub fn select_tab(&mut self, tab: UploadTab) {
        self.tab = tab;
    }

    pub fn tab(&self) -> UploadTab {
        self.tab
    }

    /// 追加文件
    pub fn add_files<I, P>(&mut self, paths: I) -> AppResult<()>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for path in paths {
            self.files.add(path)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// 上传按钮是否可用
    pub fn can_upload(&self) -> bool {
        !self.files.is_empty()
    }

    /// 上传所有文件，成功后跳转到对应的审核页
    pub async fn upload(&self) -> AppResult<Route> {
        if !self.can_upload() {
            return Err(BusinessError::NoFiles.into());
        }

        let before = self.tab.before();
        info!("📁 [{}] 准备上传 {} 个文件", self.tab.label(), self.files.len());

        let media = self.files.read_all().await?;
        match self.client.upload_media(before, media).await {
            Ok(ack) => {
                info!("✓ 上传成功: {}", ack.message.unwrap_or_default());
            }
            Err(e) => {
                error!("❌ 上传失败: {}", e);
                return Err(e);
            }
        }

        let next = Route::Review { before };
        log_navigation(&Route::Upload.path(), &next.path());
        Ok(next)
    }
}
