//! Local persistence: icon position and comment history.
//!
//! Everything lives in one pretty-printed `store.json` under the data
//! directory. Reads and writes go straight to disk; a mutex serializes
//! read-modify-write cycles within the process.

use crate::comment::Tier;
use crate::error::Result;
use crate::layout::{icon::DEFAULT_ICON_POS, Point};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const STORE_FILE: &str = "store.json";

/// History is cut to this many records, newest first.
pub const MAX_COMMENTS: usize = 1000;

/// How long the overlay shows a comment, recorded with each entry.
pub const COMMENT_DURATION_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreData {
    pub icon_pos: Point,
    #[serde(default)]
    pub comments: Vec<CommentRecord>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            icon_pos: DEFAULT_ICON_POS,
            comments: Vec::new(),
        }
    }
}

/// One generated comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: String,
    /// Unix epoch milliseconds.
    pub created_at: u64,
    pub screenshot_path: String,
    /// Display text (extracted and padded).
    pub message: String,
    /// Model output as received.
    pub raw_message: String,
    pub duration_ms: u64,
    pub model: String,
    pub prompt_version: String,
    /// Extraction tier that produced `message`. Absent in older stores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}

impl CommentRecord {
    /// Id derived from creation time and raw text.
    pub fn make_id(created_at: u64, raw_message: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(created_at.to_be_bytes());
        hasher.update(raw_message.as_bytes());
        let hex = format!("{:x}", hasher.finalize());
        hex[..32].to_string()
    }
}

pub struct Store {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Store {
    /// Open the store in `dir`, creating the directory and a default file
    /// if missing.
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        let store = Self {
            path: dir.join(STORE_FILE),
            lock: Mutex::new(()),
        };
        if !store.path.exists() {
            store.write_unlocked(&StoreData::default())?;
            log::info!("[STORE] Created {}", store.path.display());
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<StoreData> {
        let _guard = self.guard();
        self.read_unlocked()
    }

    /// Prepend a record and trim history to [`MAX_COMMENTS`].
    pub fn push_comment(&self, record: CommentRecord) -> Result<()> {
        let _guard = self.guard();
        let mut data = self.read_unlocked()?;
        data.comments.insert(0, record);
        data.comments.truncate(MAX_COMMENTS);
        self.write_unlocked(&data)
    }

    pub fn set_icon_pos(&self, pos: Point) -> Result<()> {
        let _guard = self.guard();
        let mut data = self.read_unlocked()?;
        data.icon_pos = pos;
        self.write_unlocked(&data)
    }

    /// Display text of the newest comment, fed back into the next prompt.
    pub fn previous_message(&self) -> Result<Option<String>> {
        Ok(self.read()?.comments.into_iter().next().map(|c| c.message))
    }

    fn read_unlocked(&self) -> Result<StoreData> {
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_unlocked(&self, data: &StoreData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("screen-companion-store-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn record(n: u64) -> CommentRecord {
        CommentRecord {
            id: CommentRecord::make_id(n, "raw"),
            created_at: n,
            screenshot_path: format!("shot-{n}.jpg"),
            message: format!("message {n}"),
            raw_message: "raw".to_string(),
            duration_ms: COMMENT_DURATION_MS,
            model: "gemini-2.5-flash".to_string(),
            prompt_version: "v3-system-user-split".to_string(),
            tier: None,
        }
    }

    #[test]
    fn open_creates_default_store() {
        let dir = temp_dir("default");
        let store = Store::open(&dir).unwrap();
        let data = store.read().unwrap();
        assert_eq!(data.icon_pos, Point::new(60.0, 60.0));
        assert!(data.comments.is_empty());
        assert!(store.previous_message().unwrap().is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn newest_comment_first() {
        let dir = temp_dir("order");
        let store = Store::open(&dir).unwrap();
        store.push_comment(record(1)).unwrap();
        store.push_comment(record(2)).unwrap();
        assert_eq!(store.previous_message().unwrap().as_deref(), Some("message 2"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn history_is_capped() {
        let dir = temp_dir("cap");
        let store = Store::open(&dir).unwrap();
        let mut data = StoreData::default();
        data.comments = (0..MAX_COMMENTS as u64).map(record).collect();
        store.write_unlocked(&data).unwrap();

        store.push_comment(record(5000)).unwrap();
        let data = store.read().unwrap();
        assert_eq!(data.comments.len(), MAX_COMMENTS);
        assert_eq!(data.comments[0].created_at, 5000);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn icon_pos_persists_across_opens() {
        let dir = temp_dir("icon");
        Store::open(&dir).unwrap().set_icon_pos(Point::new(300.0, 40.0)).unwrap();
        let reopened = Store::open(&dir).unwrap();
        assert_eq!(reopened.read().unwrap().icon_pos, Point::new(300.0, 40.0));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn json_uses_camel_case() {
        let json = serde_json::to_value(record(7)).unwrap();
        assert!(json.get("rawMessage").is_some());
        assert!(json.get("promptVersion").is_some());
        assert_eq!(json["createdAt"], 7);
    }

    #[test]
    fn tier_is_kept_and_optional() {
        let mut with_tier = record(3);
        with_tier.tier = Some(Tier::LabeledSlot);
        let json = serde_json::to_value(&with_tier).unwrap();
        assert_eq!(json["tier"], "labeled_slot");
        let back: CommentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.tier, Some(Tier::LabeledSlot));

        let mut older = serde_json::to_value(record(4)).unwrap();
        assert!(older.get("tier").is_none());
        older.as_object_mut().unwrap().remove("tier");
        let back: CommentRecord = serde_json::from_value(older).unwrap();
        assert_eq!(back.tier, None);
    }

    #[test]
    fn ids_differ_by_time_and_text() {
        let a = CommentRecord::make_id(1, "x");
        assert_eq!(a.len(), 32);
        assert_ne!(a, CommentRecord::make_id(2, "x"));
        assert_ne!(a, CommentRecord::make_id(1, "y"));
    }
}
