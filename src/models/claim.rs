use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::item::{format_money, Item};

/// 一次索赔：用户勾选后保存的物品集合
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: u64,
    pub name: String,
    pub date_filed: DateTime<Local>,
    pub items: Vec<Item>,
}

impl Claim {
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        let date_filed = Local::now();
        Self {
            id: date_filed.timestamp() as u64,
            name: name.into(),
            date_filed,
            items,
        }
    }

    /// 所有物品的合计金额，价格无法解析的物品不计入
    pub fn total_cost(&self) -> f64 {
        self.items
            .iter()
            .filter_map(|item| ClaimLine::total_for(item))
            .fold(0.0, |acc, v| acc + v)
    }
}

/// 索赔报告中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimLine {
    pub category: String,
    pub item: String,
    pub description: String,
    pub year_bought: i32,
    pub qty: u32,
    pub replacement_cost: String,
    pub total_cost: String,
    pub link: String,
}

impl ClaimLine {
    pub fn from_item(item: &Item, year_bought: i32, link_base: &str) -> Self {
        Self {
            category: item.category.clone(),
            item: item.name.clone(),
            description: item.description.clone(),
            year_bought,
            qty: item.before_count,
            replacement_cost: item.display_price(),
            total_cost: format_money(Self::total_for(item)),
            link: format!("{}/{}", link_base.trim_end_matches('/'), item.name),
        }
    }

    /// 单价 × 数量
    fn total_for(item: &Item) -> Option<f64> {
        item.unit_price().map(|price| price * f64::from(item.before_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: &str, qty: u32) -> Item {
        Item {
            id: name.to_string(),
            name: name.to_string(),
            description: format!("{} description", name),
            price: price.to_string(),
            before_count: qty,
            after_count: 0,
            category: "Electronics".to_string(),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_claim_line_columns() {
        let line = ClaimLine::from_item(&item("Laptop", "1500", 2), 2024, "https://example.com/");
        assert_eq!(line.category, "Electronics");
        assert_eq!(line.qty, 2);
        assert_eq!(line.replacement_cost, "$1500.00");
        assert_eq!(line.total_cost, "$3000.00");
        assert_eq!(line.link, "https://example.com/Laptop");
    }

    #[test]
    fn test_total_cost_skips_unparseable_prices() {
        let claim = Claim::new("fire", vec![item("A", "10", 1), item("B", "n/a", 3), item("C", "2.5", 2)]);
        assert!((claim.total_cost() - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_claim_total_is_positive_zero() {
        let claim = Claim::new("empty", Vec::new());
        assert!(claim.total_cost().is_sign_positive());
        assert_eq!(format_money(Some(claim.total_cost())), "$0.00");
    }
}
