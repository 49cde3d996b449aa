//! 索赔报告服务 - 业务能力层
//!
//! 把已索赔物品渲染成打印用的表格

use std::fmt::Write as _;

use crate::models::{format_money, Claim, ClaimLine, Item};

const HEADERS: [&str; 8] = [
    "Category",
    "Item",
    "Description",
    "Year Bought",
    "Qty",
    "Replacement Cost",
    "Total Cost",
    "Link",
];

/// 索赔报告
pub struct ClaimReport {
    year_bought: i32,
    link_base: String,
}

impl ClaimReport {
    pub fn new(year_bought: i32, link_base: impl Into<String>) -> Self {
        Self {
            year_bought,
            link_base: link_base.into(),
        }
    }

    pub fn lines(&self, items: &[Item]) -> Vec<ClaimLine> {
        items
            .iter()
            .map(|item| ClaimLine::from_item(item, self.year_bought, &self.link_base))
            .collect()
    }

    /// 渲染报告；列宽按内容自适应
    pub fn render(&self, claim: &Claim) -> String {
        let rows: Vec<[String; 8]> = self
            .lines(&claim.items)
            .into_iter()
            .map(|line| {
                [
                    line.category,
                    line.item,
                    line.description,
                    line.year_bought.to_string(),
                    line.qty.to_string(),
                    line.replacement_cost,
                    line.total_cost,
                    line.link,
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "Claim: {} (filed {})",
            claim.name,
            claim.date_filed.format("%Y-%m-%d")
        );
        let _ = writeln!(out);
        out.push_str(&join_row(&HEADERS.map(String::from), &widths));
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        out.push('\n');
        for row in &rows {
            out.push_str(&join_row(row, &widths));
            out.push('\n');
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Total: {}", format_money(Some(claim.total_cost())));
        out
    }
}

fn join_row(cells: &[String; 8], widths: &[usize; 8]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
