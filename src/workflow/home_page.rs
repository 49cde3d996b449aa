//! 待处理总览页 - 流程层
//!
//! 只读页面：拉取 `/inventory?status=inventory&before=true`，按 before 过滤待处理物品

use std::fmt::Write as _;

use crate::clients::InventoryQuery;
use crate::error::AppResult;
use crate::models::UploadSessionResponse;
use crate::services::{ItemFilter, ItemsTable};
use crate::utils::logging::log_page_loaded;
use crate::workflow::page_ctx::PageCtx;
use crate::workflow::page_state::{PageState, SessionLoader};

/// 总览页的可渲染数据
#[derive(Debug, Clone)]
pub struct HomeView {
    pub before: bool,
    pub table: ItemsTable,
}

impl HomeView {
    pub fn from_response(response: &UploadSessionResponse, before: bool) -> Self {
        Self {
            before,
            table: ItemsTable::new(ItemFilter::pending(before).apply(&response.items)),
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
        let _ = writeln!(out, "Your inventory has {} items.", self.table.len());
        let prompt = if self.before {
            "Select the ones you want to add to your inventory."
        } else {
            "Select the ones you want to claim."
        };
        let _ = writeln!(out, "{}", prompt);
        let _ = writeln!(out);
        out.push_str(&self.table.render());
        out
    }
}

/// 总览页流程
pub struct HomePage {
    loader: SessionLoader,
}

impl HomePage {
    pub fn new(loader: SessionLoader) -> Self {
        Self { loader }
    }

    pub async fn load(&self, ctx: &PageCtx) -> PageState<HomeView> {
        let state = self.loader.load(InventoryQuery::inventory_before(), ctx).await;
        state.map(|response| {
            let view = HomeView::from_response(&response, ctx.before);
            log_page_loaded(&ctx.route.path(), response.item_count(), view.table.len());
            view
        })
    }
}
