//! 已索赔物品存储 - 业务能力层
//!
//! 相当于浏览器的 localStorage：一个按 key 存 JSON 字符串的文件。
//! 索赔页写入 `claimedItems`，报告页读取

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AppError, AppResult, FileError};
use crate::models::Item;

/// 已索赔物品的存储 key
pub const CLAIMED_ITEMS_KEY: &str = "claimedItems";

/// 本地键值存储
pub struct ClaimStore {
    path: PathBuf,
}

impl ClaimStore {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 保存勾选的物品，覆盖之前的内容
    pub async fn save(&self, items: &[Item]) -> AppResult<()> {
        let value = serde_json::to_string(items).map_err(|source| FileError::StoreCorrupted {
            path: self.display(),
            source,
        })?;
        self.set_item(CLAIMED_ITEMS_KEY, value).await?;
        info!("💾 已保存 {} 个索赔物品到 {}", items.len(), self.display());
        Ok(())
    }

    /// 读取已索赔物品，不存在时返回空列表
    pub async fn load(&self) -> AppResult<Vec<Item>> {
        match self.get_item(CLAIMED_ITEMS_KEY).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| {
                FileError::StoreCorrupted {
                    path: self.display(),
                    source,
                }
                .into()
            }),
            None => Ok(Vec::new()),
        }
    }

    /// 删除已索赔物品
    pub async fn clear(&self) -> AppResult<()> {
        let mut entries = self.read_entries().await?;
        if entries.remove(CLAIMED_ITEMS_KEY).is_some() {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }

    async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: String) -> AppResult<()> {
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value);
        self.write_entries(&entries).await
    }

    async fn read_entries(&self) -> AppResult<BTreeMap<String, String>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("存储文件 {} 不存在", self.display());
                return Ok(BTreeMap::new());
            }
            Err(e) => return Err(AppError::file_read_failed(self.display(), e)),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|source| {
            FileError::StoreCorrupted {
                path: self.display(),
                source,
            }
            .into()
        })
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        let content = serde_json::to_string_pretty(entries).map_err(|source| {
            FileError::StoreCorrupted {
                path: self.display(),
                source,
            }
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
        }

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| AppError::file_write_failed(self.display(), e))
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Image, ImageStatus};

    fn claimed(id: &str) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {}", id),
            description: "water damage".to_string(),
            price: "99.95".to_string(),
            before_count: 1,
            after_count: 1,
            category: "Appliances".to_string(),
            images: vec![Image {
                image_id: format!("{}a", id),
                url_path: "https://example.com/a.jpg".to_string(),
                status: ImageStatus::Inventory,
                before: true,
            }],
        }
    }

    #[tokio::test]
    async fn test_load_missing_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::with_path(dir.path().join("missing.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClaimStore::with_path(dir.path().join("nested/claims.json"));

        store.save(&[claimed("1"), claimed("2")]).await.unwrap();
        let items = store.load().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], claimed("2"));

        // 再次保存会覆盖
        store.save(&[claimed("3")]).await.unwrap();
        let items = store.load().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "3");
    }

    #[tokio::test]
    async fn test_other_keys_survive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let store = ClaimStore::with_path(&path);
        store.save(&[claimed("1")]).await.unwrap();
        store.clear().await.unwrap();

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get("theme").map(String::as_str), Some("dark"));
        assert!(!raw.contains_key(CLAIMED_ITEMS_KEY));
    }

    #[tokio::test]
    async fn test_corrupted_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let store = ClaimStore::with_path(&path);
        assert!(store.load().await.is_err());
    }
}
