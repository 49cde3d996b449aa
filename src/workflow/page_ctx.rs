//! 页面上下文
//!
//! 封装"我在哪个页面、before 参数是什么"这一信息

use std::fmt::Display;

/// 页面路由
///
/// 页面操作成功后返回下一个要去的页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/` 库存页
    Inventory,
    /// `/home` 待处理总览
    Home { before: bool },
    /// `/uploads?before=` 上传结果审核
    Review { before: bool },
    /// `/upload` 上传页
    Upload,
    /// `/pdf` 索赔报告
    Report,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Inventory => "/".to_string(),
            Route::Home { before } => format!("/home?before={}", before),
            Route::Review { before } => format!("/uploads?before={}", before),
            Route::Upload => "/upload".to_string(),
            Route::Report => "/pdf".to_string(),
        }
    }

    /// 对应的命令行写法
    pub fn command_hint(&self) -> String {
        match self {
            Route::Inventory => "inventory".to_string(),
            Route::Home { before: true } => "home --before".to_string(),
            Route::Home { before: false } => "home".to_string(),
            Route::Review { before: true } => "review --before".to_string(),
            Route::Review { before: false } => "review".to_string(),
            Route::Upload => "upload <files..>".to_string(),
            Route::Report => "report".to_string(),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// 页面上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCtx {
    /// 当前页面
    pub route: Route,

    /// URL 中的 before 参数
    pub before: bool,
}

impl PageCtx {
    pub fn new(route: Route) -> Self {
        let before = match route {
            Route::Home { before } | Route::Review { before } => before,
            _ => false,
        };
        Self { route, before }
    }

    /// 带 before 参数的库存页（`/?before=true`）
    pub fn inventory(before: bool) -> Self {
        Self {
            route: Route::Inventory,
            before,
        }
    }
}

impl Display for PageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[页面 {} before={}]", self.route.path(), self.before)
    }
}
