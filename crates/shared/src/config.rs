use crate::errors::AppError;
use std::env;
use std::fmt;
use std::str::FromStr;

/// 扱うレコードの種類
///
/// 種類ごとにテーブル名とパスパラメータ名が決まる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Todo,
    Task,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Todo => "todo",
            RecordKind::Task => "task",
        }
    }

    /// デフォルトのテーブル名
    pub fn table_name(&self) -> &'static str {
        match self {
            RecordKind::Todo => "todos",
            RecordKind::Task => "tasks",
        }
    }

    /// 識別子を受け取るパスパラメータ名
    pub fn id_param(&self) -> &'static str {
        match self {
            RecordKind::Todo => "todoId",
            RecordKind::Task => "taskId",
        }
    }
}

impl FromStr for RecordKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(RecordKind::Todo),
            "task" => Ok(RecordKind::Task),
            other => Err(AppError::Configuration(format!(
                "unknown RECORD_KIND: {other}"
            ))),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub record_kind: RecordKind,
    pub table_name: String,
    pub dynamodb_endpoint: Option<String>,
    pub environment: String,
    pub aws_region: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を組み立てる
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let record_kind = match lookup("RECORD_KIND") {
            Some(kind) => kind.parse()?,
            None => RecordKind::Todo,
        };

        Ok(Config {
            record_kind,
            table_name: lookup("TABLE_NAME")
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| record_kind.table_name().to_string()),
            dynamodb_endpoint: lookup("DYNAMODB_ENDPOINT").filter(|url| !url.is_empty()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()),
            aws_region: lookup("AWS_REGION").unwrap_or_else(|| "ap-northeast-1".to_string()),
        })
    }

    pub fn id_param(&self) -> &'static str {
        self.record_kind.id_param()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_to_todo_kind() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.record_kind, RecordKind::Todo);
        assert_eq!(config.table_name, "todos");
        assert_eq!(config.id_param(), "todoId");
        assert_eq!(config.environment, "dev");
        assert_eq!(config.aws_region, "ap-northeast-1");
        assert!(config.dynamodb_endpoint.is_none());
    }

    #[test]
    fn test_task_kind_selects_table_and_param() {
        let config = config_from(&[("RECORD_KIND", "Task")]).unwrap();

        assert_eq!(config.record_kind, RecordKind::Task);
        assert_eq!(config.table_name, "tasks");
        assert_eq!(config.id_param(), "taskId");
    }

    #[test]
    fn test_table_name_override() {
        let config = config_from(&[
            ("RECORD_KIND", "task"),
            ("TABLE_NAME", "tasks-staging"),
            ("DYNAMODB_ENDPOINT", "http://localhost:8000"),
        ])
        .unwrap();

        assert_eq!(config.table_name, "tasks-staging");
        assert_eq!(
            config.dynamodb_endpoint.as_deref(),
            Some("http://localhost:8000")
        );
    }

    #[test]
    fn test_unknown_kind_is_configuration_error() {
        let result = config_from(&[("RECORD_KIND", "note")]);

        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
