//! 员工照片存储
//!
//! 照片以随机文件名保存在上传目录中，对外路径为 `/uploads/<文件名>`

use crate::models::err::{AppError, AppResult};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// 照片对外访问的路径前缀
pub const PUBLIC_PREFIX: &str = "/uploads/";

/// 支持的图片类型及其扩展名
const ALLOWED_TYPES: [(&str, &str); 3] = [("image/jpeg", "jpg"), ("image/png", "png"), ("image/webp", "webp")];

#[derive(Debug, Clone)]
pub struct PhotoStorage {
    dir: PathBuf,
    max_bytes: usize,
}

impl PhotoStorage {
    pub fn new<P: Into<PathBuf>>(dir: P, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 校验并保存照片
    ///
    /// # 返回值
    /// 返回照片的对外访问路径
    pub async fn save(&self, content_type: Option<&str>, bytes: &[u8]) -> AppResult<String> {
        let extension = content_type
            .and_then(|ct| ALLOWED_TYPES.iter().find(|(mime, _)| ct.eq_ignore_ascii_case(mime)))
            .map(|(_, ext)| *ext)
            .ok_or_else(|| {
                AppError::bad_request(format!(
                    "Unsupported photo type {:?}, expected one of image/jpeg, image/png, image/webp",
                    content_type.unwrap_or("unknown")
                ))
            })?;

        if bytes.is_empty() {
            return Err(AppError::bad_request("Photo file is empty"));
        }
        if bytes.len() > self.max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Photo is {} bytes, the limit is {} bytes",
                bytes.len(),
                self.max_bytes
            )));
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        let file_name = format!("{}.{extension}", Uuid::new_v4());
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;

        debug!("🖼️ 照片已保存: {}", file_name);
        Ok(format!("{PUBLIC_PREFIX}{file_name}"))
    }

    /// 删除照片文件，失败只记录日志
    pub async fn remove(&self, public_path: &str) {
        let Some(file_name) = public_path.strip_prefix(PUBLIC_PREFIX) else {
            return;
        };
        // 只接受上传目录下的单层文件名
        if file_name.is_empty() || file_name.contains('/') || file_name.contains('\\') || file_name.contains("..") {
            warn!("⚠️ 忽略非法的照片路径: {}", public_path);
            return;
        }

        if let Err(e) = tokio::fs::remove_file(self.dir.join(file_name)).await {
            warn!("⚠️ 删除照片失败: {} ({})", e, public_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> PhotoStorage {
        PhotoStorage::new(std::env::temp_dir().join(format!("depot-photos-{}", Uuid::new_v4())), 16)
    }

    #[tokio::test]
    async fn saves_and_removes_photo() {
        let storage = storage();
        let path = storage.save(Some("image/png"), b"png-bytes").await.unwrap();
        assert!(path.starts_with(PUBLIC_PREFIX));
        assert!(path.ends_with(".png"));

        let file = storage.dir().join(path.trim_start_matches(PUBLIC_PREFIX));
        assert!(file.exists());

        storage.remove(&path).await;
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn rejects_unknown_type_and_oversized_files() {
        let storage = storage();
        let err = storage.save(Some("application/pdf"), b"pdf").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = storage.save(Some("image/jpeg"), &[0u8; 17]).await.unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));

        let err = storage.save(None, b"x").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
