use aws_sdk_dynamodb::types::AttributeValue;
use domain::{Record, RecordId};
use std::collections::HashMap;

/// テーブルのハッシュキー属性名
pub const ID_ATTRIBUTE: &str = "Id";
pub const TITLE_ATTRIBUTE: &str = "Title";
pub const CONTENT_ATTRIBUTE: &str = "Content";
pub const EXPIRATION_ATTRIBUTE: &str = "Expiration";
pub const STATUS_ATTRIBUTE: &str = "Status";

/// キー属性だけの AttributeValue マップ
pub fn key_attribute(id: &RecordId) -> (String, AttributeValue) {
    (
        ID_ATTRIBUTE.to_string(),
        AttributeValue::S(id.as_str().to_string()),
    )
}

/// Record を DynamoDB AttributeValue マップに変換
/// 5 属性すべてを文字列型で書き込む
pub fn record_to_item(record: &Record) -> HashMap<String, AttributeValue> {
    let mut map = HashMap::new();

    map.insert(
        ID_ATTRIBUTE.to_string(),
        AttributeValue::S(record.id.as_str().to_string()),
    );
    map.insert(
        TITLE_ATTRIBUTE.to_string(),
        AttributeValue::S(record.title.clone()),
    );
    map.insert(
        CONTENT_ATTRIBUTE.to_string(),
        AttributeValue::S(record.content.clone()),
    );
    map.insert(
        EXPIRATION_ATTRIBUTE.to_string(),
        AttributeValue::S(record.expiration.clone()),
    );
    map.insert(
        STATUS_ATTRIBUTE.to_string(),
        AttributeValue::S(record.status.clone()),
    );

    map
}

/// DynamoDB AttributeValue マップから Record を復元
/// 欠けている属性・文字列以外の属性は空文字として扱い、失敗しない
pub fn record_from_item(item: &HashMap<String, AttributeValue>) -> Record {
    Record {
        id: RecordId::from_stored(string_attribute(item, ID_ATTRIBUTE)),
        title: string_attribute(item, TITLE_ATTRIBUTE),
        content: string_attribute(item, CONTENT_ATTRIBUTE),
        expiration: string_attribute(item, EXPIRATION_ATTRIBUTE),
        status: string_attribute(item, STATUS_ATTRIBUTE),
    }
}

fn string_attribute(item: &HashMap<String, AttributeValue>, name: &str) -> String {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .unwrap_or_default()
}
