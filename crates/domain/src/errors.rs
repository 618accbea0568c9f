use thiserror::Error;

/// ドメイン層のエラー
///
/// `Validation` のメッセージはそのままクライアントへ返すため、
/// 内部情報を含めないこと。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
}

impl DomainError {
    pub fn missing_body() -> Self {
        Self::Validation("requestBody is required.".to_string())
    }

    pub fn missing_path_parameter(name: &str) -> Self {
        Self::Validation(format!("{name} in pathParameters is required."))
    }

    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("{field} in requestBody is required."))
    }

    pub fn malformed_body() -> Self {
        Self::Validation("requestBody must be a JSON object with string fields.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_displayed_verbatim() {
        let error = DomainError::missing_field("title");
        assert_eq!(error.to_string(), "title in requestBody is required.");
    }

    #[test]
    fn test_missing_path_parameter_names_the_parameter() {
        let error = DomainError::missing_path_parameter("taskId");
        assert_eq!(error.to_string(), "taskId in pathParameters is required.");
    }
}
