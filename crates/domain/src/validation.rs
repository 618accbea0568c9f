use crate::errors::DomainError;
use crate::record::{RecordDraft, RecordId};
use serde::Deserialize;
use std::collections::HashMap;

/// リクエストボディの生の形
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecordBody {
    title: Option<String>,
    content: Option<String>,
    expiration: Option<String>,
    status: Option<String>,
}

/// 入力バリデーション
///
/// チェック順は固定: ボディ → パスパラメータの識別子 → title → content → expiration。
/// 最初に見つかった不足項目でエラーを返す。空文字と未指定は同じ扱い。
pub struct Validator;

impl Validator {
    /// 作成リクエストの検証
    pub fn validate_create(body: Option<&str>) -> Result<RecordDraft, DomainError> {
        let body = require_body(body)?;
        parse_draft(body)
    }

    /// 更新リクエストの検証
    pub fn validate_update(
        body: Option<&str>,
        path_parameters: &HashMap<String, String>,
        id_param: &str,
    ) -> Result<(RecordId, RecordDraft), DomainError> {
        let body = require_body(body)?;
        let id = require_id(path_parameters, id_param)?;
        let draft = parse_draft(body)?;
        Ok((id, draft))
    }

    /// 削除リクエストの検証（ボディは見ない）
    pub fn validate_delete(
        path_parameters: &HashMap<String, String>,
        id_param: &str,
    ) -> Result<RecordId, DomainError> {
        require_id(path_parameters, id_param)
    }
}

fn require_body(body: Option<&str>) -> Result<&str, DomainError> {
    body.filter(|b| !b.is_empty()).ok_or_else(DomainError::missing_body)
}

fn require_id(
    path_parameters: &HashMap<String, String>,
    id_param: &str,
) -> Result<RecordId, DomainError> {
    path_parameters
        .get(id_param)
        .filter(|id| !id.is_empty())
        .map(|id| RecordId::from_stored(id.clone()))
        .ok_or_else(|| DomainError::missing_path_parameter(id_param))
}

fn require_field(value: Option<String>, field: &str) -> Result<String, DomainError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DomainError::missing_field(field))
}

fn parse_draft(body: &str) -> Result<RecordDraft, DomainError> {
    let parsed: RecordBody =
        serde_json::from_str(body).map_err(|_| DomainError::malformed_body())?;

    Ok(RecordDraft {
        title: require_field(parsed.title, "title")?,
        content: require_field(parsed.content, "content")?,
        expiration: require_field(parsed.expiration, "expiration")?,
        status: parsed.status,
    })
}
