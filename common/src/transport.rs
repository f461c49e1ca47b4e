//! HTTPトランスポート抽象
//!
//! WASMでは`fetch`（gloo-net）、CLIではreqwestが実装する。
//! ApiClientはこのトレイト越しにのみ通信する。

use crate::types::PhotoFile;
use serde_json::Value;

/// HTTPメソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// multipartの1フィールド
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: PhotoFile },
}

/// リクエストボディ
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Body {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

/// HTTPリクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn post(url: impl Into<String>, body: Body) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTPレスポンス
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// JSONとして解釈（失敗時は空オブジェクト）
    pub fn json_or_empty(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|_| Value::Object(Default::default()))
    }
}

/// 通信失敗（ネットワーク到達不能など）
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// HTTP送信
///
/// ブラウザのメインスレッドで動くためSendは要求しない。
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// 画面遷移（ブラウザのlocation変更）
pub trait Navigator {
    fn redirect(&self, path: &str);
}

#[cfg(test)]
pub(crate) mod mock {
    //! テスト用スクリプト化トランスポート

    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    pub struct MockTransport {
        responses: Rc<RefCell<VecDeque<Result<HttpResponse, TransportError>>>>,
        pub requests: Rc<RefCell<Vec<HttpRequest>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, status: u16, body: &str) -> &Self {
            self.responses
                .borrow_mut()
                .push_back(Ok(HttpResponse::new(status, body)));
            self
        }

        pub fn fail(&self, message: &str) -> &Self {
            self.responses
                .borrow_mut()
                .push_back(Err(TransportError(message.to_string())));
            self
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }

        pub fn last_request(&self) -> Option<HttpRequest> {
            self.requests.borrow().last().cloned()
        }
    }

    impl HttpTransport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError("no scripted response".to_string())))
        }
    }

    #[derive(Clone, Default)]
    pub struct RecordingNavigator {
        pub redirects: Rc<RefCell<Vec<String>>>,
    }

    impl Navigator for RecordingNavigator {
        fn redirect(&self, path: &str) {
            self.redirects.borrow_mut().push(path.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_ok_range() {
        assert!(HttpResponse::new(200, "").ok());
        assert!(HttpResponse::new(202, "").ok());
        assert!(!HttpResponse::new(404, "").ok());
        assert!(!HttpResponse::new(500, "").ok());
    }

    #[test]
    fn test_json_or_empty() {
        assert_eq!(HttpResponse::new(200, r#"{"a":1}"#).json_or_empty()["a"], 1);
        assert!(HttpResponse::new(500, "Internal Server Error")
            .json_or_empty()
            .as_object()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = HttpRequest::get("/x").with_header("Authorization", "Bearer t");
        assert_eq!(req.header("authorization"), Some("Bearer t"));
    }
}
