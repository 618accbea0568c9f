use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// 作成時に設定される初期ステータス
pub const INITIAL_STATUS: &str = "TODO";

/// レコードの識別子
///
/// 新規作成時は ULID を採番する。既存データの識別子（タイムスタンプ由来など）も
/// そのまま扱えるよう、空文字以外は受け入れる。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// パスパラメータやストアから受け取った値を識別子として扱う
    ///
    /// 空文字の判定は呼び出し側（Validator）で行う。
    pub fn from_stored(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

/// バリデーション済みの入力値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub title: String,
    pub content: String,
    pub expiration: String,
    pub status: Option<String>,
}

/// ToDo / タスクのレコード
///
/// 永続化されるレコードは 5 フィールドすべてを文字列で持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    pub expiration: String,
    pub status: String,
}

impl Record {
    /// 新しい識別子を採番し、ステータスを初期値にして作成
    pub fn create(draft: RecordDraft) -> Self {
        Self {
            id: RecordId::new(),
            title: draft.title,
            content: draft.content,
            expiration: draft.expiration,
            status: INITIAL_STATUS.to_string(),
        }
    }

    /// 既存の識別子を保ったまま全フィールドを置き換えたレコードを作成
    pub fn replace(id: RecordId, draft: RecordDraft) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            expiration: draft.expiration,
            status: draft.status.unwrap_or_default(),
        }
    }
}
