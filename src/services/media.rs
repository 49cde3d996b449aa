//! 上传文件收集服务 - 业务能力层
//!
//! 只负责"把本地文件变成可上传的媒体"，不关心上传流程

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use phf::phf_map;
use tracing::debug;

use crate::error::{AppError, AppResult, FileError};

/// 扩展名 → Content-Type
static MEDIA_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
    "png" => "image/png",
    "jpg" => "image/jpeg",
    "jpeg" => "image/jpeg",
    "heic" => "image/heic",
    "gif" => "image/gif",
    "mp4" => "video/mp4",
    "mov" => "video/quicktime",
};

/// 待上传的媒体文件
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn is_video(&self) -> bool {
        self.content_type.starts_with("video/")
    }
}

/// 根据扩展名判断 Content-Type，不支持的类型返回 None
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    MEDIA_TYPES.get(ext.as_str()).copied()
}

/// 上传文件收集器
///
/// 对应上传页面的拖放区：文件可以多次追加，也可以清空
#[derive(Debug, Default)]
pub struct MediaCollector {
    files: Vec<PathBuf>,
}

impl MediaCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加文件，遇到不支持的类型直接报错
    pub fn add(&mut self, path: impl Into<PathBuf>) -> AppResult<()> {
        let path = path.into();
        if content_type_for(&path).is_none() {
            return Err(FileError::UnsupportedMedia {
                path: path.display().to_string(),
            }
            .into());
        }
        self.files.push(path);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// 并发读取所有文件内容
    pub async fn read_all(&self) -> AppResult<Vec<MediaFile>> {
        try_join_all(self.files.iter().map(|path| read_media(path))).await
    }
}

async fn read_media(path: &Path) -> AppResult<MediaFile> {
    let content_type = content_type_for(path).ok_or_else(|| FileError::UnsupportedMedia {
        path: path.display().to_string(),
    })?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());

    debug!("读取文件 {} ({} 字节, {})", file_name, bytes.len(), content_type);

    Ok(MediaFile {
        file_name,
        content_type,
        bytes,
    })
}
