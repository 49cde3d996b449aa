//! 物品表格服务 - 业务能力层
//!
//! 负责把物品渲染成文本表格，并维护行选择和展开状态

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::error::{AppResult, BusinessError};
use crate::models::Item;
use crate::utils::logging::truncate_text;

/// 每行最多显示的图片数
const MAX_PREVIEW_IMAGES: usize = 3;

const HEADERS: [&str; 7] = ["Name", "Description", "Price", "Count", "Images", "Category", ""];
const WIDTHS: [usize; 7] = [24, 40, 10, 5, 32, 16, 3];

/// 物品表格
///
/// 行 ID 即物品 ID，支持多选
#[derive(Debug, Clone, Default)]
pub struct ItemsTable {
    rows: Vec<Item>,
    selected: HashSet<String>,
    expanded: Option<String>,
}

impl ItemsTable {
    pub fn new(rows: Vec<Item>) -> Self {
        Self {
            rows,
            selected: HashSet::new(),
            expanded: None,
        }
    }

    pub fn rows(&self) -> &[Item] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn contains(&self, id: &str) -> bool {
        self.rows.iter().any(|row| row.id == id)
    }

    /// 勾选一行
    pub fn select(&mut self, id: &str) -> AppResult<()> {
        if !self.contains(id) {
            return Err(BusinessError::UnknownRow { id: id.to_string() }.into());
        }
        self.selected.insert(id.to_string());
        Ok(())
    }

    /// 勾选多行，遇到不存在的行立即失败
    pub fn select_many<I, S>(&mut self, ids: I) -> AppResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            self.select(id.as_ref())?;
        }
        Ok(())
    }

    pub fn select_all(&mut self) {
        self.selected = self.rows.iter().map(|row| row.id.clone()).collect();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// 已勾选的行，按表格顺序
    pub fn selected_items(&self) -> Vec<&Item> {
        self.rows
            .iter()
            .filter(|row| self.selected.contains(&row.id))
            .collect()
    }

    /// 已勾选的行；没有勾选时返回错误（按钮禁用）
    pub fn require_selection(&self) -> AppResult<Vec<&Item>> {
        if !self.has_selection() {
            return Err(BusinessError::EmptySelection.into());
        }
        Ok(self.selected_items())
    }

    /// 点击行：再次点击同一行则收起
    pub fn click_row(&mut self, id: &str) -> AppResult<()> {
        if !self.contains(id) {
            return Err(BusinessError::UnknownRow { id: id.to_string() }.into());
        }
        if self.expanded.as_deref() == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id.to_string());
        }
        Ok(())
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// 渲染整个表格
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format_row(&HEADERS.map(String::from)));
        out.push('\n');
        out.push_str(&separator());
        out.push('\n');

        if self.rows.is_empty() {
            out.push_str("No results.\n");
            return out;
        }

        for row in &self.rows {
            out.push_str(&format_row(&self.cells(row)));
            out.push('\n');
            if self.expanded.as_deref() == Some(row.id.as_str()) {
                out.push_str(&render_expanded(row));
            }
        }
        out
    }

    fn cells(&self, item: &Item) -> [String; 7] {
        let images = item
            .images
            .iter()
            .take(MAX_PREVIEW_IMAGES)
            .map(|image| image.image_id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let mark = if self.is_selected(&item.id) { "[x]" } else { "[ ]" };

        [
            item.name.clone(),
            item.description.clone(),
            item.display_price(),
            item.before_count.to_string(),
            images,
            item.category.clone(),
            mark.to_string(),
        ]
    }
}

fn format_row(cells: &[String; 7]) -> String {
    let mut line = String::new();
    for (cell, width) in cells.iter().zip(WIDTHS) {
        let text = if cell.chars().count() > width {
            truncate_text(cell, width.saturating_sub(3))
        } else {
            cell.clone()
        };
        let _ = write!(line, "{:<width$} ", text, width = width);
    }
    line.trim_end().to_string()
}

fn separator() -> String {
    WIDTHS
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 展开行：并排显示第一张 before 和第一张 after 照片
fn render_expanded(item: &Item) -> String {
    let mut out = String::new();
    if let Some(image) = item.before_image() {
        let _ = writeln!(out, "    Before: {}", image.url_path);
    }
    if let Some(image) = item.after_image() {
        let _ = writeln!(out, "    After:  {}", image.url_path);
    }
    out
}
