use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// 图片分类状态
///
/// 服务端在新的上传会话开始时会把旧的 pending 改写为 `done`，
/// 未知状态统一落到 `Other`，不会命中任何过滤条件
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    /// 待审核
    Pending,
    /// 已入库
    Inventory,
    /// 已拒绝
    Rejected,
    /// 已匹配到索赔
    Matched,
    #[serde(other)]
    Other,
}

impl ImageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStatus::Pending => "pending",
            ImageStatus::Inventory => "inventory",
            ImageStatus::Rejected => "rejected",
            ImageStatus::Matched => "matched",
            ImageStatus::Other => "other",
        }
    }
}

impl std::fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 物品的一张照片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub image_id: String,
    pub url_path: String,
    pub status: ImageStatus,
    /// true 表示"之前"（受损前）的照片，false 表示当前状态的照片
    #[serde(deserialize_with = "deserialize_lenient_bool", default)]
    pub before: bool,
}

/// 服务端返回的物品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_null_default", default)]
    pub description: String,
    /// 十进制字符串，如 "10.99"
    #[serde(deserialize_with = "deserialize_null_default", default)]
    pub price: String,
    #[serde(deserialize_with = "deserialize_null_default", default)]
    pub before_count: u32,
    #[serde(deserialize_with = "deserialize_null_default", default)]
    pub after_count: u32,
    #[serde(deserialize_with = "deserialize_null_default", default)]
    pub category: String,
    #[serde(deserialize_with = "deserialize_null_default", default)]
    pub images: Vec<Image>,
}

impl Item {
    /// 解析价格字符串的数字前缀，行为与 `parseFloat` 一致
    pub fn unit_price(&self) -> Option<f64> {
        parse_decimal_prefix(&self.price)
    }

    /// 表格中显示的价格，例如 `$10.99`，无法解析时为 `$NaN`
    pub fn display_price(&self) -> String {
        format_money(self.unit_price())
    }

    /// 第一张"之前"的照片
    pub fn before_image(&self) -> Option<&Image> {
        self.images.iter().find(|image| image.before)
    }

    /// 第一张"之后"的照片
    pub fn after_image(&self) -> Option<&Image> {
        self.images.iter().find(|image| !image.before)
    }

    /// 所有照片的 ID，按原顺序
    pub fn image_ids(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(|image| image.image_id.as_str())
    }
}

/// 格式化金额，保留两位小数
pub fn format_money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${:.2}", v),
        None => "$NaN".to_string(),
    }
}

fn decimal_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
            .expect("decimal prefix pattern is valid")
    })
}

/// 取字符串开头最长的十进制数字
fn parse_decimal_prefix(raw: &str) -> Option<f64> {
    decimal_prefix()
        .captures(raw)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

// 数据库列可为空，null 与缺失字段同样取默认值
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// 元数据存储可能把布尔值存成字符串或数字
fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct LenientBoolVisitor;

    impl<'de> Visitor<'de> for LenientBoolVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a boolean, a boolean-like string or 0/1")
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" | "" | "none" | "null" => Ok(false),
                other => Err(E::custom(format!("invalid boolean string: {}", other))),
            }
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value != 0)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value != 0)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(false)
        }
    }

    deserializer.deserialize_any(LenientBoolVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item_with_price(price: &str) -> Item {
        Item {
            id: "1".to_string(),
            name: "Lamp".to_string(),
            description: String::new(),
            price: price.to_string(),
            before_count: 1,
            after_count: 0,
            category: String::new(),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_before_flag_accepts_stringified_values() {
        for (raw, expected) in [
            (json!(true), true),
            (json!("True"), true),
            (json!("true"), true),
            (json!("1"), true),
            (json!(1), true),
            (json!(false), false),
            (json!("False"), false),
            (json!(0), false),
            (json!(null), false),
        ] {
            let image: Image = serde_json::from_value(json!({
                "image_id": "a",
                "url_path": "https://example.com/a.jpg",
                "status": "pending",
                "before": raw,
            }))
            .unwrap();
            assert_eq!(image.before, expected, "raw value {}", raw);
        }
    }

    #[test]
    fn test_before_flag_rejects_garbage() {
        let result: Result<Image, _> = serde_json::from_value(json!({
            "image_id": "a",
            "url_path": "u",
            "status": "pending",
            "before": "maybe",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_status_decodes_as_other() {
        let image: Image = serde_json::from_value(json!({
            "image_id": "a",
            "url_path": "u",
            "status": "done",
            "before": true,
        }))
        .unwrap();
        assert_eq!(image.status, ImageStatus::Other);
    }

    #[test]
    fn test_server_item_with_extra_fields() {
        let item: Item = serde_json::from_value(json!({
            "id": "42",
            "name": "Chair",
            "description": "Oak",
            "category": "Furniture",
            "price": "120",
            "before_count": 2,
            "after_count": 1,
            "images": [
                {"image_id": "x", "url_path": "u", "status": "inventory", "before": "True", "item_id": "42"}
            ]
        }))
        .unwrap();
        assert_eq!(item.after_count, 1);
        assert!(item.images[0].before);
    }

    #[test]
    fn test_nullable_columns_fall_back_to_defaults() {
        let item: Item = serde_json::from_value(json!({
            "id": "1",
            "name": "Desk",
            "description": null,
            "category": null,
            "price": null,
            "before_count": null,
            "after_count": null,
            "images": null
        }))
        .unwrap();
        assert_eq!(item.description, "");
        assert_eq!(item.category, "");
        assert_eq!(item.before_count, 0);
        assert!(item.images.is_empty());
        assert_eq!(item.display_price(), "$NaN");
    }

    #[test]
    fn test_display_price_like_parse_float() {
        assert_eq!(item_with_price("10.99").display_price(), "$10.99");
        assert_eq!(item_with_price("15.5").display_price(), "$15.50");
        assert_eq!(item_with_price("  7").display_price(), "$7.00");
        assert_eq!(item_with_price("12.5abc").display_price(), "$12.50");
        assert_eq!(item_with_price("abc").display_price(), "$NaN");
        assert_eq!(item_with_price("").display_price(), "$NaN");
    }

    #[test]
    fn test_before_and_after_image() {
        let mut item = item_with_price("1");
        item.images = vec![
            Image {
                image_id: "after".to_string(),
                url_path: "u1".to_string(),
                status: ImageStatus::Pending,
                before: false,
            },
            Image {
                image_id: "before".to_string(),
                url_path: "u2".to_string(),
                status: ImageStatus::Inventory,
                before: true,
            },
        ];
        assert_eq!(item.before_image().unwrap().image_id, "before");
        assert_eq!(item.after_image().unwrap().image_id, "after");
    }
}
