//! 库存页流程 - 流程层
//!
//! 流程顺序：
//! 1. 拉取 `/inventory`
//! 2. 主表显示已入库物品，副表显示已匹配物品
//! 3. 勾选物品索赔 → 写入索赔存储 → 跳转报告页

use std::fmt::Write as _;

use tracing::info;

use crate::clients::InventoryQuery;
use crate::error::AppResult;
use crate::models::{Item, UploadSessionResponse};
use crate::services::{ClaimStore, ItemFilter, ItemsTable};
use crate::utils::logging::{log_navigation, log_page_loaded};
use crate::workflow::page_ctx::{PageCtx, Route};
use crate::workflow::page_state::{PageState, SessionLoader};

pub const FETCHING_MESSAGE: &str = "We're fetching everything. This may take a few minutes.";

/// 库存页的可渲染数据
#[derive(Debug, Clone)]
pub struct InventoryView {
    pub before: bool,
    pub items: ItemsTable,
    pub matched: ItemsTable,
}

impl InventoryView {
    /// 从同一份响应构建两个表
    pub fn from_response(response: &UploadSessionResponse, before: bool) -> Self {
        Self {
            before,
            items: ItemsTable::new(ItemFilter::inventory().apply(&response.items)),
            matched: ItemsTable::new(ItemFilter::matched().apply(&response.items)),
        }
    }

    /// 点击行展开 before/after 对比；before 模式下不响应
    pub fn click_row(&mut self, id: &str) -> AppResult<()> {
        if self.before {
            return Ok(());
        }
        if self.items.rows().iter().any(|row| row.id == id) {
            self.items.click_row(id)
        } else {
            self.matched.click_row(id)
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Your inventory has {} items.", self.items.len());
        let prompt = if self.before {
            "Select the ones you want to add to your inventory."
        } else {
            "Select the ones you want to claim."
        };
        let _ = writeln!(out, "{}", prompt);
        let _ = writeln!(out);
        out.push_str(&self.items.render());

        if !self.matched.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Matched Items");
            let _ = writeln!(out, "These are items that you've already found.");
            let _ = writeln!(out);
            out.push_str(&self.matched.render());
        }
        out
    }
}

/// 库存页流程
pub struct InventoryPage {
    loader: SessionLoader,
    claim_store: ClaimStore,
}

impl InventoryPage {
    pub fn new(loader: SessionLoader, claim_store: ClaimStore) -> Self {
        Self {
            loader,
            claim_store,
        }
    }

    pub async fn load(&self, ctx: &PageCtx) -> PageState<InventoryView> {
        let state = self.loader.load(InventoryQuery::all(), ctx).await;
        state.map(|response| {
            let view = InventoryView::from_response(&response, ctx.before);
            log_page_loaded(&ctx.route.path(), response.item_count(), view.items.len());
            view
        })
    }

    /// 索赔勾选的物品
    pub async fn claim_selected(&self, view: &InventoryView, ctx: &PageCtx) -> AppResult<Route> {
        let selected: Vec<Item> = view
            .items
            .require_selection()?
            .into_iter()
            .cloned()
            .collect();

        info!("{} 📝 索赔 {} 个物品", ctx, selected.len());
        self.claim_store.save(&selected).await?;

        log_navigation(&ctx.route.path(), &Route::Report.path());
        Ok(Route::Report)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::clients::InventoryClient;
    use crate::config::Config;
    use crate::error::{AppError, BusinessError};
    use crate::models::{Image, ImageStatus};
    use crate::workflow::page_state::PollPolicy;

    fn page(store_path: &Path) -> InventoryPage {
        let config = Config::default();
        let client = InventoryClient::new(&config).unwrap();
        let loader = SessionLoader::new(client, PollPolicy::from_config(&config, false));
        InventoryPage::new(loader, ClaimStore::with_path(store_path))
    }

    fn item(id: &str, statuses: &[(ImageStatus, bool)]) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {}", id),
            description: String::new(),
            price: "5".to_string(),
            before_count: 1,
            after_count: 0,
            category: "Toys".to_string(),
            images: statuses
                .iter()
                .enumerate()
                .map(|(n, (status, before))| Image {
                    image_id: format!("{}{}", id, n),
                    url_path: format!("https://example.com/{}{}.jpg", id, n),
                    status: status.clone(),
                    before: *before,
                })
                .collect(),
        }
    }

    fn response() -> UploadSessionResponse {
        UploadSessionResponse {
            items: vec![
                item("1", &[(ImageStatus::Inventory, true), (ImageStatus::Pending, false)]),
                item("2", &[(ImageStatus::Matched, true), (ImageStatus::Matched, false)]),
                item("3", &[(ImageStatus::Rejected, true)]),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_view_splits_inventory_and_matched() {
        let view = InventoryView::from_response(&response(), false);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items.rows()[0].images.len(), 1);
        assert_eq!(view.matched.len(), 1);
        assert_eq!(view.matched.rows()[0].images.len(), 2);

        let rendered = view.render();
        assert!(rendered.starts_with("Your inventory has 1 items."));
        assert!(rendered.contains("Select the ones you want to claim."));
        assert!(rendered.contains("Matched Items"));
    }

    #[test]
    fn test_matched_section_hidden_when_empty() {
        let mut data = response();
        data.items.remove(1);
        let view = InventoryView::from_response(&data, true);
        let rendered = view.render();
        assert!(rendered.contains("Select the ones you want to add to your inventory."));
        assert!(!rendered.contains("Matched Items"));
    }

    #[test]
    fn test_click_row_ignored_in_before_mode() {
        let mut view = InventoryView::from_response(&response(), true);
        view.click_row("1").unwrap();
        assert_eq!(view.items.expanded(), None);

        let mut view = InventoryView::from_response(&response(), false);
        view.click_row("2").unwrap();
        assert_eq!(view.matched.expanded(), Some("2"));
    }

    #[tokio::test]
    async fn test_claim_selected_saves_and_routes_to_report() {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("claimed.json");
        let page = page(&store_path);

        let mut view = InventoryView::from_response(&response(), false);
        view.items.select("1").unwrap();

        let next = page.claim_selected(&view, &PageCtx::inventory(false)).await.unwrap();
        assert_eq!(next, Route::Report);

        let claimed = ClaimStore::with_path(&store_path).load().await.unwrap();
        assert_eq!(claimed.len(), 1);
        assert_eq!(claimed[0].id, "1");
    }

    #[tokio::test]
    async fn test_claim_without_selection_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("claimed.json");
        let page = page(&store_path);

        let view = InventoryView::from_response(&response(), false);
        let result = page.claim_selected(&view, &PageCtx::inventory(false)).await;

        assert!(matches!(
            result,
            Err(AppError::Business(BusinessError::EmptySelection))
        ));
        assert!(!store_path.exists());
    }
}
