use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{Error, HttpClient, Method, Request, Response, StatusCode};

/// [`HttpClient`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient(reqwest::Client);

impl ReqwestClient {
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self(client)
    }
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
            Method::Head => Self::HEAD,
            Method::Options => Self::OPTIONS,
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn execute(&self, request: Request) -> Result<Response, Error> {
        let mut builder = self.0.request(request.method.into(), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        log::trace!("execute: {} {}", request.method, request.url);
        let response = builder.send().await?;

        let status = StatusCode::from_u16(response.status().as_u16()).ok_or(Error::Decode)?;
        let headers = headers_to_btree(response.headers());
        let body = response.bytes().await?;

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

fn headers_to_btree(value: &reqwest::header::HeaderMap) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();

    for (key, value) in value {
        if let Ok(value) = value.to_str() {
            headers.insert(key.to_string(), value.to_string());
        }
    }

    headers
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test_log::test]
    fn converts_methods() {
        assert_eq!(reqwest::Method::from(Method::Get), reqwest::Method::GET);
        assert_eq!(reqwest::Method::from(Method::Post), reqwest::Method::POST);
    }

    #[test_log::test]
    fn skips_non_utf8_header_values() {
        let mut map = reqwest::header::HeaderMap::new();
        map.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        map.insert(
            "x-binary",
            reqwest::header::HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap(),
        );

        let headers = headers_to_btree(&map);

        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }
}
