use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{error::Failure, i18n, rest_api::context::RequestMeta};

const SEVERITY_ERROR: &str = "error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message_title: String,
    pub message: String,
    pub message_severity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub request_id: String,
}

/// JSON body of every API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub error: Option<ErrorBody>,
    pub success: bool,
    pub metadata: Metadata,
}

impl<T> Envelope<T> {
    pub fn success(data: T, meta: &RequestMeta) -> Self {
        Envelope {
            data: Some(data),
            error: None,
            success: true,
            metadata: Metadata {
                request_id: meta.request_id.clone(),
            },
        }
    }

    pub fn failure(failure: &Failure, meta: &RequestMeta) -> Self {
        let mut message = i18n::message(meta.lang, failure.code);
        if let Some(detail) = &failure.detail {
            message = format!("{message}: {detail}");
        }
        Envelope {
            data: None,
            error: Some(ErrorBody {
                code: failure.code.to_string(),
                message_title: i18n::title(meta.lang, failure.code),
                message,
                message_severity: SEVERITY_ERROR.to_string(),
            }),
            success: false,
            metadata: Metadata {
                request_id: meta.request_id.clone(),
            },
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use movies_types::Lang;

    use super::*;
    use crate::error::ERR_BAD_REQUEST;

    #[test]
    fn test_failure_envelope() {
        let meta = RequestMeta {
            request_id: "req-1".into(),
            lang: Lang::Id,
        };
        let envelope = Envelope::<()>::failure(
            &Failure {
                code: ERR_BAD_REQUEST,
                detail: Some("title: length is lower than 1".into()),
            },
            &meta,
        );
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["data"], serde_json::Value::Null);
        assert_eq!(json["success"], false);
        assert_eq!(json["metadata"]["request_id"], "req-1");
        assert_eq!(json["error"]["code"], "err_bad_request");
        assert_eq!(json["error"]["message_severity"], "error");
        assert_eq!(json["error"]["message_title"], "Permintaan Tidak Valid");
        assert!(
            json["error"]["message"]
                .as_str()
                .unwrap()
                .ends_with("title: length is lower than 1")
        );
    }

    #[test]
    fn test_success_envelope() {
        let envelope = Envelope::success("ok", &RequestMeta::default());
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["data"], "ok");
        assert_eq!(json["error"], serde_json::Value::Null);
        assert_eq!(json["success"], true);
    }
}
