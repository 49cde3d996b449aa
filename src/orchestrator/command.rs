//! 命令行定义
//!
//! 每个子命令对应一个页面；浏览器里的勾选和点击变成命令行参数

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "claim-inventory")]
#[command(about = "Review, confirm and claim classified inventory items")]
pub struct Cli {
    /// 服务端处理中时持续轮询，直到结果可用
    #[arg(long, global = true)]
    pub wait: bool,

    /// 覆盖配置中的服务地址
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// 显示详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// 表格行选择
#[derive(Debug, Clone, Default, Args)]
pub struct Selection {
    /// 勾选的物品 ID，逗号分隔
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,

    /// 勾选所有行
    #[arg(long, conflicts_with = "select")]
    pub all: bool,

    /// 展开一行，显示 before/after 对比
    #[arg(long)]
    pub expand: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the inventory and optionally claim selected items
    Inventory {
        /// Use the "add to inventory" wording
        #[arg(long)]
        before: bool,

        #[command(flatten)]
        selection: Selection,

        /// Claim the selected items and open the report
        #[arg(long)]
        claim: bool,
    },

    /// Show items that still have pending photos
    Home {
        #[arg(long)]
        before: bool,

        /// Expand one row
        #[arg(long)]
        expand: Option<String>,
    },

    /// Review the results of an upload
    Review {
        /// Review inventory photos instead of claim photos
        #[arg(long)]
        before: bool,

        #[command(flatten)]
        selection: Selection,

        /// Add the selection to the inventory (--before) or confirm matches
        #[arg(long = "continue")]
        proceed: bool,
    },

    /// Upload photos and videos
    Upload {
        /// Upload claim photos instead of inventory photos
        #[arg(long)]
        claims: bool,

        /// Files to upload (.png .jpg .heic .gif .mp4 .mov)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Render the claim report for the claimed items
    Report {
        /// Name printed in the report header
        #[arg(long, default_value = "Claim")]
        name: String,

        /// Output file (default: configured report path or stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete an item and all of its photos from the inventory
    Remove {
        item_id: String,
    },
}
