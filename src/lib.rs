//! # Claim Inventory
//!
//! 一个用于库存登记和保险索赔的命令行客户端：
//! 上传物品照片，由远程分类服务归类，再在表格中审核、确认或索赔
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 唯一持有 HTTP 客户端，只暴露接口能力
//! - `InventoryClient` - `/inventory` `/upload_media` `/accept_to_inventory` `/confirm_matches`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `ItemFilter` - 按图片状态和 before 标记过滤物品
//! - `ItemsTable` - 表格渲染、多选、展开
//! - `ClaimStore` - 已索赔物品的本地存储
//! - `ClaimReport` - 索赔报告
//! - `MediaCollector` - 上传文件收集
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 每个页面的加载和操作
//! - `PageCtx` / `Route` - 页面上下文与跳转
//! - `InventoryPage` `HomePage` `ReviewPage` `UploadPage` `ReportPage`
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 命令解析、分发和路由跟随
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{InventoryClient, InventoryQuery};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Image, ImageStatus, Item, UploadSessionResponse};
pub use orchestrator::{App, Cli, Command};
pub use services::ItemFilter;
pub use workflow::{PageCtx, Route};
