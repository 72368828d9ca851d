//! # 파일 기반 키-값 세션 저장소
//!
//! 브라우저 로컬 스토리지처럼 문자열 키-값 쌍을 하나의 JSON 파일에 보관합니다.
//! 토큰 외의 다른 키(장바구니 등)가 함께 들어 있어도 보존합니다.
//!
//! ## 원자적 기록
//!
//! ```text
//! 1. 프로세스 내 Mutex 획득
//! 2. 현재 파일 읽기 → 맵 수정 (손상된 파일은 빈 맵에서 시작)
//! 3. {path}.{pid}.tmp 에 전체 맵 기록
//! 4. rename({path}.{pid}.tmp, {path})
//! ```
//!
//! rename은 같은 파일 시스템 안에서 원자적이므로 다른 프로세스의 리더도
//! 이전 파일 또는 새 파일 전체만 관찰합니다.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use crate::config::StoreConfig;
use crate::domain::models::token::TokenPair;
use crate::errors::errors::{AppError, AppResult};
use crate::storage::SessionStore;

type Entries = BTreeMap<String, String>;

/// 파일 기반 세션 저장소
#[derive(Debug)]
pub struct FileSessionStore {
    config: StoreConfig,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// 키에 해당하는 값을 읽습니다.
    pub fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    /// 키에 값을 기록합니다.
    pub fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    /// 키를 삭제합니다.
    pub fn remove(&self, key: &str) -> AppResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn update<F>(&self, mutate: F) -> AppResult<()>
    where
        F: FnOnce(&mut Entries),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| AppError::StorageError(format!("세션 파일 잠금 획득 실패: {}", e)))?;

        let mut entries = match self.read_raw()? {
            Some(raw) => self.parse_entries(&raw).unwrap_or_else(|e| {
                log::warn!("손상된 세션 파일을 새로 기록합니다: {}", e);
                Entries::new()
            }),
            None => Entries::new(),
        };
        mutate(&mut entries);
        self.write_entries(&entries)
    }

    fn read_entries(&self) -> AppResult<Entries> {
        match self.read_raw()? {
            Some(raw) => self.parse_entries(&raw),
            None => Ok(Entries::new()),
        }
    }

    fn read_raw(&self) -> AppResult<Option<String>> {
        match fs::read_to_string(&self.config.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::StorageError(format!(
                "세션 파일 읽기 실패 '{}': {}",
                self.config.path.display(),
                e
            ))),
        }
    }

    fn parse_entries(&self, raw: &str) -> AppResult<Entries> {
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(raw).map_err(|e| {
            AppError::StorageError(format!(
                "세션 파일 파싱 실패 '{}': {}",
                self.config.path.display(),
                e
            ))
        })
    }

    fn write_entries(&self, entries: &Entries) -> AppResult<()> {
        let path = &self.config.path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::StorageError(format!("세션 디렉토리 생성 실패: {}", e)))?;
        }

        let body = serde_json::to_vec_pretty(entries)
            .map_err(|e| AppError::StorageError(format!("세션 직렬화 실패: {}", e)))?;

        let tmp_path = temp_path(path);
        fs::write(&tmp_path, body)
            .map_err(|e| AppError::StorageError(format!("세션 임시 파일 기록 실패: {}", e)))?;

        // 토큰 파일은 소유자만 읽기/쓰기
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))
                .map_err(|e| AppError::StorageError(format!("세션 파일 권한 설정 실패: {}", e)))?;
        }

        fs::rename(&tmp_path, path)
            .map_err(|e| AppError::StorageError(format!("세션 파일 교체 실패: {}", e)))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> AppResult<Option<TokenPair>> {
        let mut entries = self.read_entries()?;
        Ok(TokenPair::from_parts(
            entries.remove(&self.config.access_key),
            entries.remove(&self.config.refresh_key),
        ))
    }

    fn save(&self, pair: &TokenPair) -> AppResult<()> {
        self.update(|entries| {
            entries.insert(self.config.access_key.clone(), pair.access_token.clone());
            entries.insert(self.config.refresh_key.clone(), pair.refresh_token.clone());
        })
    }

    fn clear(&self) -> AppResult<()> {
        self.update(|entries| {
            entries.remove(&self.config.access_key);
            entries.remove(&self.config.refresh_key);
        })
    }
}

// 동시에 기록하는 다른 프로세스와 임시 파일을 공유하지 않음
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (FileSessionStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("storefront-session-{}", uuid::Uuid::new_v4()));
        let store = FileSessionStore::new(StoreConfig::at(dir.join("session.json")));
        (store, dir)
    }

    #[test]
    fn test_missing_file_means_no_session() {
        let (store, dir) = temp_store();
        assert_eq!(store.load().unwrap(), None);
        assert!(!dir.exists());
    }

    #[test]
    fn test_save_and_load_pair_survives_new_instance() {
        let (store, dir) = temp_store();
        store.save(&TokenPair::new("a1", "r1")).unwrap();

        let reopened = FileSessionStore::new(StoreConfig::at(store.path()));
        assert_eq!(reopened.load().unwrap(), Some(TokenPair::new("a1", "r1")));
        assert_eq!(reopened.get("accessToken").unwrap().as_deref(), Some("a1"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_clear_preserves_unrelated_keys() {
        let (store, dir) = temp_store();
        store.set("cart", r#"[{"sku":"A-1","qty":2}]"#).unwrap();
        store.save(&TokenPair::new("a1", "r1")).unwrap();

        store.clear().unwrap();

        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.get("accessToken").unwrap(), None);
        assert_eq!(store.get("refreshToken").unwrap(), None);
        assert!(store.get("cart").unwrap().is_some());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_single_key_present_is_treated_as_absent() {
        let (store, dir) = temp_store();
        store.set("accessToken", "a1").unwrap();
        assert_eq!(store.load().unwrap(), None);

        store.remove("accessToken").unwrap();
        store.set("refreshToken", "r1").unwrap();
        assert_eq!(store.load().unwrap(), None);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_corrupted_file_is_storage_error() {
        let (store, dir) = temp_store();
        fs::create_dir_all(&dir).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.load(), Err(AppError::StorageError(_))));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_corrupted_file_is_overwritten_by_save() {
        let (store, dir) = temp_store();
        fs::create_dir_all(&dir).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        store.save(&TokenPair::new("a1", "r1")).unwrap();
        assert_eq!(store.load().unwrap(), Some(TokenPair::new("a1", "r1")));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_corrupted_file_can_be_cleared() {
        let (store, dir) = temp_store();
        fs::create_dir_all(&dir).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_custom_key_names() {
        let dir = std::env::temp_dir().join(format!("storefront-session-{}", uuid::Uuid::new_v4()));
        let config = StoreConfig {
            path: dir.join("session.json"),
            access_key: "sf_access".to_string(),
            refresh_key: "sf_refresh".to_string(),
        };
        let store = FileSessionStore::new(config);

        store.save(&TokenPair::new("a1", "r1")).unwrap();
        assert_eq!(store.get("sf_access").unwrap().as_deref(), Some("a1"));
        assert_eq!(store.get("accessToken").unwrap(), None);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_temp_path_is_sibling_and_per_process() {
        let tmp = temp_path(Path::new("/tmp/x/session.json"));
        assert_eq!(tmp.parent(), Some(Path::new("/tmp/x")));
        assert_eq!(
            tmp.file_name().and_then(|n| n.to_str()),
            Some(format!("session.json.{}.tmp", std::process::id()).as_str())
        );
    }
}
