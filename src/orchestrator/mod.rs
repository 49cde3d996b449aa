//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责解析命令、创建页面流程并跟随页面跳转，是整个客户端的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `command` - 命令行定义
//! - 每个子命令对应一个页面
//! - 浏览器中的勾选、点击、按钮变成参数
//!
//! ### `app` - 应用主结构
//! - 持有配置和 `InventoryClient`
//! - 把命令分发给 workflow 中的页面
//! - 页面操作成功后跟随返回的 `Route`
//!
//! ## 层次关系
//!
//! ```text
//! app (处理命令和路由)
//!     ↓
//! workflow (一个页面的加载和操作)
//!     ↓
//! services (能力层：filter / table / store / report / media)
//!     ↓
//! clients (基础设施：InventoryClient)
//! ```

pub mod app;
pub mod command;

pub use app::App;
pub use command::{Cli, Command, Selection};
