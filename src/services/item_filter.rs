//! 物品过滤服务 - 业务能力层
//!
//! 每个页面对同一份 `/inventory` 数据使用不同的过滤条件：
//!
//! | 页面       | 条件                                                   | 收窄图片 |
//! |------------|--------------------------------------------------------|----------|
//! | `/` 库存   | 有 inventory 图片                                      | 是       |
//! | `/` 已匹配 | 有 matched 图片                                        | 否       |
//! | `/uploads` | before: 有 pending∧before；否则 pending∧¬before 且有 before 照片 | 否 |
//! | `/home`    | before: 有 pending；否则有 pending∧¬before             | 仅 before |
//!
//! `before` 只改变过滤条件，不改变请求本身

use crate::models::{Image, ImageStatus, Item};

/// 对图片 `before` 字段的要求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeforeRule {
    /// 不关心
    Any,
    /// 必须等于给定值
    Is(bool),
}

impl BeforeRule {
    fn accepts(self, before: bool) -> bool {
        match self {
            BeforeRule::Any => true,
            BeforeRule::Is(expected) => before == expected,
        }
    }
}

/// 物品过滤条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFilter {
    /// 命中图片必须处于的状态
    pub status: ImageStatus,
    /// 命中图片的 before 要求
    pub before: BeforeRule,
    /// 物品还必须至少有一张 before 照片（任意状态）
    pub require_before_photo: bool,
    /// 保留的物品只留下命中的图片
    pub narrow_images: bool,
}

impl ItemFilter {
    /// 库存页主表：有已入库图片的物品，只显示已入库图片
    pub fn inventory() -> Self {
        Self {
            status: ImageStatus::Inventory,
            before: BeforeRule::Any,
            require_before_photo: false,
            narrow_images: true,
        }
    }

    /// 库存页"已匹配"表：有已匹配图片的物品，图片不变
    pub fn matched() -> Self {
        Self {
            status: ImageStatus::Matched,
            before: BeforeRule::Any,
            require_before_photo: false,
            narrow_images: false,
        }
    }

    /// 上传结果审核页
    ///
    /// - before=true：有 pending 的 before 照片
    /// - before=false：有 pending 的 after 照片，并且已有 before 照片可供比对
    pub fn review(before: bool) -> Self {
        Self {
            status: ImageStatus::Pending,
            before: BeforeRule::Is(before),
            require_before_photo: !before,
            narrow_images: false,
        }
    }

    /// 待处理总览页
    ///
    /// - before=true：有 pending 图片（任意 before），只显示 pending 图片
    /// - before=false：有 pending 的 after 照片，图片不变
    pub fn pending(before: bool) -> Self {
        if before {
            Self {
                status: ImageStatus::Pending,
                before: BeforeRule::Any,
                require_before_photo: false,
                narrow_images: true,
            }
        } else {
            Self {
                status: ImageStatus::Pending,
                before: BeforeRule::Is(false),
                require_before_photo: false,
                narrow_images: false,
            }
        }
    }

    fn image_matches(&self, image: &Image) -> bool {
        image.status == self.status && self.before.accepts(image.before)
    }

    /// 物品是否保留
    pub fn matches(&self, item: &Item) -> bool {
        let has_hit = item.images.iter().any(|image| self.image_matches(image));
        let has_before_photo =
            !self.require_before_photo || item.images.iter().any(|image| image.before);
        has_hit && has_before_photo
    }

    /// 过滤物品列表，保持原顺序，不修改输入
    pub fn apply(&self, items: &[Item]) -> Vec<Item> {
        items
            .iter()
            .filter(|item| self.matches(item))
            .map(|item| {
                let mut item = item.clone();
                if self.narrow_images {
                    item.images.retain(|image| self.image_matches(image));
                }
                item
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: &str, status: ImageStatus, before: bool) -> Image {
        Image {
            image_id: id.to_string(),
            url_path: format!("https://picsum.photos/seed/{}/200", id),
            status,
            before,
        }
    }

    fn item(id: &str, images: Vec<Image>) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {}", id),
            description: String::new(),
            price: "10.00".to_string(),
            before_count: 1,
            after_count: 0,
            category: "Misc".to_string(),
            images,
        }
    }

    fn sample() -> Vec<Item> {
        vec![
            // 1: 已入库 + 待审核的 before 照片
            item(
                "1",
                vec![
                    image("1a", ImageStatus::Inventory, true),
                    image("1b", ImageStatus::Pending, true),
                ],
            ),
            // 2: 只有被拒绝的照片
            item("2", vec![image("2a", ImageStatus::Rejected, true)]),
            // 3: 有 before 照片，且有待审核的 after 照片
            item(
                "3",
                vec![
                    image("3a", ImageStatus::Inventory, true),
                    image("3b", ImageStatus::Pending, false),
                ],
            ),
            // 4: 只有待审核的 after 照片，没有 before
            item("4", vec![image("4a", ImageStatus::Pending, false)]),
            // 5: 已匹配
            item(
                "5",
                vec![
                    image("5a", ImageStatus::Matched, true),
                    image("5b", ImageStatus::Matched, false),
                ],
            ),
        ]
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn test_inventory_narrows_images() {
        let result = ItemFilter::inventory().apply(&sample());
        assert_eq!(ids(&result), vec!["1", "3"]);
        assert!(result
            .iter()
            .all(|item| item.images.iter().all(|i| i.status == ImageStatus::Inventory)));
        assert_eq!(result[0].images.len(), 1);
    }

    #[test]
    fn test_matched_keeps_images() {
        let result = ItemFilter::matched().apply(&sample());
        assert_eq!(ids(&result), vec!["5"]);
        assert_eq!(result[0].images.len(), 2);
    }

    #[test]
    fn test_review_before() {
        let result = ItemFilter::review(true).apply(&sample());
        assert_eq!(ids(&result), vec!["1"]);
        // 图片不收窄
        assert_eq!(result[0].images.len(), 2);
    }

    #[test]
    fn test_review_after_requires_before_photo() {
        let result = ItemFilter::review(false).apply(&sample());
        // 4 没有 before 照片，无法比对
        assert_eq!(ids(&result), vec!["3"]);
    }

    #[test]
    fn test_pending_before_narrows_to_pending() {
        let result = ItemFilter::pending(true).apply(&sample());
        assert_eq!(ids(&result), vec!["1", "3", "4"]);
        assert!(result
            .iter()
            .all(|item| item.images.iter().all(|i| i.status == ImageStatus::Pending)));
    }

    #[test]
    fn test_pending_after() {
        let result = ItemFilter::pending(false).apply(&sample());
        assert_eq!(ids(&result), vec!["3", "4"]);
        assert_eq!(result[0].images.len(), 2);
    }

    #[test]
    fn test_items_without_pending_never_reviewed() {
        let data = sample();
        let without_pending: Vec<&Item> = data
            .iter()
            .filter(|item| !item.images.iter().any(|i| i.status == ImageStatus::Pending))
            .collect();
        assert!(!without_pending.is_empty());

        for before in [true, false] {
            for filter in [ItemFilter::review(before), ItemFilter::pending(before)] {
                for item in &without_pending {
                    assert!(!filter.matches(item), "{:?} kept {}", filter, item.id);
                }
            }
        }
    }

    #[test]
    fn test_toggling_before_only_changes_predicate() {
        let data = sample();
        let snapshot = data.clone();
        let with_before = ItemFilter::review(true).apply(&data);
        let without_before = ItemFilter::review(false).apply(&data);
        assert_ne!(ids(&with_before), ids(&without_before));
        // 同一份数据，未被修改
        assert_eq!(data, snapshot);
    }

    #[test]
    fn test_narrowing_never_empties_an_item() {
        for filter in [ItemFilter::inventory(), ItemFilter::pending(true)] {
            for item in filter.apply(&sample()) {
                assert!(!item.images.is_empty());
            }
        }
    }

    #[test]
    fn test_unknown_status_is_ignored() {
        let data = vec![item("9", vec![image("9a", ImageStatus::Other, true)])];
        assert!(ItemFilter::pending(true).apply(&data).is_empty());
        assert!(ItemFilter::inventory().apply(&data).is_empty());
    }
}
