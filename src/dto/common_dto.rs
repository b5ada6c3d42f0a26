use serde::{Deserialize, Deserializer, Serialize};

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

/// Distinguir "campo ausente" de "campo presente con null" en updates
/// parciales: ausente conserva el valor actual, null explícito lo limpia.
/// Se usa con `#[serde(default, deserialize_with = "...")]` sobre un
/// campo `Option<Option<T>>`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_success_with_message() {
        let resp = ApiResponse::success_with_message(42, "hecho".to_string());
        assert!(resp.success);
        assert_eq!(resp.data, Some(42));
        assert_eq!(resp.message.as_deref(), Some("hecho"));
    }

    #[test]
    fn test_double_option_distinguishes_null_from_absent() {
        #[derive(Deserialize)]
        struct Body {
            #[serde(default, deserialize_with = "double_option")]
            field: Option<Option<i32>>,
        }

        let body: Body = serde_json::from_str(r#"{"field": null}"#).unwrap();
        assert_eq!(body.field, Some(None));

        let body: Body = serde_json::from_str(r#"{"field": 7}"#).unwrap();
        assert_eq!(body.field, Some(Some(7)));

        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.field, None);
    }
}
