//! 上传结果审核页 - 流程层
//!
//! 核心职责：定义"审核一次上传"的完整流程
//!
//! 流程顺序：
//! 1. 拉取 `/inventory`，按 before 过滤待审核物品
//! 2. before=true：勾选的物品的所有图片 → `/accept_to_inventory`
//! 3. before=false：勾选的物品 ID → `/confirm_matches`
//! 4. 成功后回到库存页；失败只记日志，停留在本页

use std::fmt::Write as _;

use tracing::{error, info};

use crate::clients::InventoryQuery;
use crate::error::AppResult;
use crate::models::{Item, UploadSessionResponse};
use crate::services::{ItemFilter, ItemsTable};
use crate::utils::logging::{log_navigation, log_page_loaded};
use crate::workflow::page_ctx::{PageCtx, Route};
use crate::workflow::page_state::{PageState, SessionLoader};

pub const PROCESSING_MESSAGE: &str = "We're processing your uploads. This may take a few minutes.";

/// 审核页的可渲染数据
#[derive(Debug, Clone)]
pub struct ReviewView {
    pub before: bool,
    pub table: ItemsTable,
}

impl ReviewView {
    pub fn from_response(response: &UploadSessionResponse, before: bool) -> Self {
        Self {
            before,
            table: ItemsTable::new(ItemFilter::review(before).apply(&response.items)),
        }
    }

    /// 操作按钮文字
    pub fn action_label(&self) -> &'static str {
        if self.before {
            "Add to Inventory"
        } else {
            "Confirm Matches"
        }
    }

    pub fn click_row(&mut self, id: &str) -> AppResult<()> {
        if self.before {
            return Ok(());
        }
        self.table.click_row(id)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "We found {} items.", self.table.len());
        let prompt = if self.before {
            "Select the ones you want to add to your inventory."
        } else {
            "Confirm the matched objects below."
        };
        let _ = writeln!(out, "{}", prompt);
        let _ = writeln!(out);
        out.push_str(&self.table.render());
        let _ = writeln!(out);
        let enabled = if self.table.has_selection() { "" } else { " (select items first)" };
        let _ = writeln!(out, "[{}]{}", self.action_label(), enabled);
        out
    }
}

/// 勾选的物品的所有图片 ID，按表格顺序展开
pub fn selected_image_ids(items: &[&Item]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.image_ids().map(String::from))
        .collect()
}

/// 勾选的物品 ID
pub fn selected_item_ids(items: &[&Item]) -> Vec<String> {
    items.iter().map(|item| item.id.clone()).collect()
}

/// 审核页流程
pub struct ReviewPage {
    loader: SessionLoader,
}

impl ReviewPage {
    pub fn new(loader: SessionLoader) -> Self {
        Self { loader }
    }

    pub async fn load(&self, ctx: &PageCtx) -> PageState<ReviewView> {
        let state = self.loader.load(InventoryQuery::all(), ctx).await;
        state.map(|response| {
            let view = ReviewView::from_response(&response, ctx.before);
            log_page_loaded(&ctx.route.path(), response.item_count(), view.table.len());
            view
        })
    }

    /// 提交勾选的物品
    pub async fn continue_selected(&self, view: &ReviewView, ctx: &PageCtx) -> AppResult<Route> {
        let selected = view.table.require_selection()?;
        let client = self.loader.client();

        if view.before {
            let image_ids = selected_image_ids(&selected);
            info!("{} 📥 加入库存: {} 个物品, {} 张图片", ctx, selected.len(), image_ids.len());

            if let Err(e) = client.accept_to_inventory(&image_ids).await {
                error!("{} ❌ 加入库存失败: {}", ctx, e);
                return Err(e);
            }
            info!("{} ✓ 已加入库存", ctx);
        } else {
            let item_ids = selected_item_ids(&selected);
            info!("{} 🔗 确认匹配: {:?}", ctx, item_ids);

            match client.confirm_matches(&item_ids).await {
                Ok(ack) => info!("{} ✓ 已确认匹配, {} 张图片标记为 matched", ctx, ack.matched_images.len()),
                Err(e) => {
                    error!("{} ❌ 确认匹配失败: {}", ctx, e);
                    return Err(e);
                }
            }
        }

        log_navigation(&ctx.route.path(), &Route::Inventory.path());
        Ok(Route::Inventory)
    }
}
