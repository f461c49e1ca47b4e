//! gloo-netによるHTTPトランスポート

use dristi_common::{Body, FormPart, HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
use gloo::net::http::{Request, RequestBuilder};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder: RequestBuilder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            Body::Empty => builder.build(),
            Body::Json(value) => builder.json(&value),
            // Content-Typeはブラウザがboundary付きで設定する
            Body::Multipart(parts) => builder.body(build_form_data(parts)?),
        }
        .map_err(|e| TransportError(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

fn js_error(e: JsValue) -> TransportError {
    TransportError(format!("{:?}", e))
}

fn build_form_data(parts: Vec<FormPart>) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(js_error)?;
    for part in parts {
        match part {
            FormPart::Text { name, value } => form.append_with_str(&name, &value).map_err(js_error)?,
            FormPart::File { name, file } => {
                let bytes = Uint8Array::from(file.bytes.as_slice());
                let bag = BlobPropertyBag::new();
                bag.set_type(&file.mime_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&Array::of1(&bytes), &bag)
                    .map_err(js_error)?;
                form.append_with_blob_and_filename(&name, &blob, &file.file_name)
                    .map_err(js_error)?;
            }
        }
    }
    Ok(form)
}
