//! 应用主结构 - 编排层
//!
//! 持有配置和 HTTP 客户端，把命令分发给页面流程，并跟随页面返回的路由

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::clients::InventoryClient;
use crate::config::Config;
use crate::services::{ClaimReport, ClaimStore, ItemsTable};
use crate::utils::logging::log_startup;
use crate::workflow::inventory_page::FETCHING_MESSAGE;
use crate::workflow::review_page::PROCESSING_MESSAGE;
use crate::workflow::{
    HomePage, InventoryPage, InventoryView, PageCtx, PageState, PollPolicy, ReportPage,
    ReviewPage, ReviewView, Route, SessionLoader, UploadPage, UploadTab,
};

use super::command::{Command, Selection};

/// 应用主结构
pub struct App {
    config: Config,
    client: InventoryClient,
    poll: PollPolicy,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config, wait: bool) -> Result<Self> {
        log_startup(&config);

        let client = InventoryClient::new(&config).context("无法创建分类服务客户端")?;
        let poll = PollPolicy::from_config(&config, wait);

        Ok(Self {
            config,
            client,
            poll,
        })
    }

    /// 运行一个命令
    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Inventory {
                before,
                selection,
                claim,
            } => self.inventory(before, selection, claim).await,
            Command::Home { before, expand } => self.home(before, expand).await,
            Command::Review {
                before,
                selection,
                proceed,
            } => self.review(before, selection, proceed).await,
            Command::Upload { claims, files } => self.upload(claims, files).await,
            Command::Report { name, output } => {
                let output = output
                    .map(|p| p.display().to_string())
                    .or_else(|| self.config.report_path.clone());
                self.report(&name, output.as_deref()).await
            }
            Command::Remove { item_id } => self.remove(&item_id).await,
        }
    }

    fn loader(&self) -> SessionLoader {
        SessionLoader::new(self.client.clone(), self.poll)
    }

    fn claim_store(&self) -> ClaimStore {
        ClaimStore::with_path(&self.config.claim_store_path)
    }

    async fn inventory(&self, before: bool, selection: Selection, claim: bool) -> Result<()> {
        let ctx = PageCtx::inventory(before);
        let page = InventoryPage::new(self.loader(), self.claim_store());

        let Some(view) = open_inventory(&page, &ctx, &selection).await? else {
            return Ok(());
        };

        if claim {
            let next = page.claim_selected(&view, &ctx).await?;
            self.navigate(next).await?;
        }
        Ok(())
    }

    async fn home(&self, before: bool, expand: Option<String>) -> Result<()> {
        let ctx = PageCtx::new(Route::Home { before });
        let page = HomePage::new(self.loader());

        let Some(mut view) = ready_or_print(page.load(&ctx).await, FETCHING_MESSAGE) else {
            return Ok(());
        };
        if let Some(id) = &expand {
            view.click_row(id)?;
        }
        println!("{}", view.render());
        Ok(())
    }

    async fn review(&self, before: bool, selection: Selection, proceed: bool) -> Result<()> {
        let ctx = PageCtx::new(Route::Review { before });
        let page = ReviewPage::new(self.loader());

        let Some(view) = open_review(&page, &ctx, &selection).await? else {
            return Ok(());
        };

        if proceed {
            let next = page.continue_selected(&view, &ctx).await?;
            self.navigate(next).await?;
        }
        Ok(())
    }

    async fn upload(&self, claims: bool, files: Vec<PathBuf>) -> Result<()> {
        let mut page = UploadPage::new(self.client.clone());
        page.select_tab(if claims { UploadTab::Claims } else { UploadTab::Inventory });
        page.add_files(files)?;

        let next = page.upload().await?;
        self.navigate(next).await
    }

    async fn report(&self, name: &str, output: Option<&str>) -> Result<()> {
        let page = ReportPage::new(
            self.claim_store(),
            ClaimReport::new(self.config.claim_year, self.config.link_base.clone()),
        );

        match output {
            Some(path) => page.write_to(name, path).await?,
            None => println!("{}", page.render(name).await?),
        }
        Ok(())
    }

    async fn remove(&self, item_id: &str) -> Result<()> {
        let ack = self
            .client
            .delete_from_inventory(item_id)
            .await
            .with_context(|| format!("删除物品 {} 失败", item_id))?;
        info!(
            "🗑️ {}",
            ack.message.unwrap_or_else(|| format!("已删除物品 {}", item_id))
        );
        Ok(())
    }

    /// 跟随页面跳转：只渲染目标页，不执行任何操作
    async fn navigate(&self, route: Route) -> Result<()> {
        info!("➡️  打开 {} (命令: {})", route, route.command_hint());
        let ctx = PageCtx::new(route);
        match route {
            Route::Inventory => {
                let page = InventoryPage::new(self.loader(), self.claim_store());
                open_inventory(&page, &ctx, &Selection::default()).await?;
                Ok(())
            }
            Route::Review { .. } => {
                let page = ReviewPage::new(self.loader());
                open_review(&page, &ctx, &Selection::default()).await?;
                Ok(())
            }
            Route::Home { before } => self.home(before, None).await,
            Route::Report => {
                self.report("Claim", self.config.report_path.as_deref())
                    .await
            }
            Route::Upload => {
                println!("Run `{}` to add items.", route.command_hint());
                Ok(())
            }
        }
    }
}

/// 加载库存页，应用选择并打印
async fn open_inventory(
    page: &InventoryPage,
    ctx: &PageCtx,
    selection: &Selection,
) -> Result<Option<InventoryView>> {
    let Some(mut view) = ready_or_print(page.load(ctx).await, FETCHING_MESSAGE) else {
        return Ok(None);
    };

    apply_selection(&mut view.items, selection)?;
    if let Some(id) = &selection.expand {
        view.click_row(id)?;
    }
    println!("{}", view.render());
    Ok(Some(view))
}

/// 加载审核页，应用选择并打印
async fn open_review(
    page: &ReviewPage,
    ctx: &PageCtx,
    selection: &Selection,
) -> Result<Option<ReviewView>> {
    let Some(mut view) = ready_or_print(page.load(ctx).await, PROCESSING_MESSAGE) else {
        return Ok(None);
    };

    apply_selection(&mut view.table, selection)?;
    if let Some(id) = &selection.expand {
        view.click_row(id)?;
    }
    println!("{}", view.render());
    Ok(Some(view))
}

fn apply_selection(table: &mut ItemsTable, selection: &Selection) -> Result<()> {
    if selection.all {
        table.select_all();
    } else {
        table.select_many(&selection.select)?;
    }
    Ok(())
}

/// Ready 时返回数据，否则打印占位文本
fn ready_or_print<T>(state: PageState<T>, waiting_message: &str) -> Option<T> {
    if let Some(placeholder) = state.placeholder(waiting_message) {
        if matches!(state, PageState::Processing) {
            warn!("服务端仍在处理，可使用 --wait 等待结果");
        }
        println!("{}", placeholder);
        return None;
    }
    state.into_ready()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_or_print() {
        assert_eq!(ready_or_print(PageState::Ready(7), "..."), Some(7));
        assert_eq!(ready_or_print::<i32>(PageState::Processing, "..."), None);
        assert_eq!(ready_or_print::<i32>(PageState::Error, "..."), None);
    }

    #[test]
    fn test_apply_selection() {
        let mut table = ItemsTable::new(Vec::new());
        let selection = Selection {
            select: vec!["missing".to_string()],
            ..Default::default()
        };
        assert!(apply_selection(&mut table, &selection).is_err());
    }
}
