use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData, Url};

use super::attachments::{AttachmentSource, PreviewRegistry};
use super::payload::{SubmissionPayload, Transport};
use super::submission::{ContactAck, ContactGateway, ContactReceipt, GatewayError};

impl AttachmentSource for File {
    fn file_name(&self) -> String {
        self.name()
    }

    fn media_type(&self) -> String {
        self.type_()
    }

    fn byte_size(&self) -> f64 {
        self.size()
    }
}

/// Preview handles backed by `URL.createObjectURL`; revoked on release so
/// removed attachments do not pin their file data.
#[derive(Default)]
pub struct ObjectUrlRegistry;

impl PreviewRegistry<File> for ObjectUrlRegistry {
    fn acquire(&mut self, source: &File) -> String {
        Url::create_object_url_with_blob(source).unwrap_or_default()
    }

    fn release(&mut self, handle: &str) {
        if !handle.is_empty() {
            let _ = Url::revoke_object_url(handle);
        }
    }
}

/// POSTs submissions to `{base}/api/contact`, as JSON when there are no
/// attachments and as multipart form data otherwise.
pub struct HttpContactGateway {
    endpoint: String,
}

impl HttpContactGateway {
    pub fn new(base: &str) -> Self {
        let endpoint = if base.is_empty() {
            "/api/contact".to_string()
        } else {
            format!("{base}/api/contact")
        };
        Self { endpoint }
    }
}

impl ContactGateway<File> for HttpContactGateway {
    async fn dispatch(
        &self,
        payload: &SubmissionPayload<File>,
    ) -> Result<ContactReceipt, GatewayError> {
        let sent = match payload.transport() {
            Transport::Multipart => {
                let form = FormData::new().map_err(js_error)?;
                form.append_with_str("name", &payload.name).map_err(js_error)?;
                form.append_with_str("tag", &payload.tag).map_err(js_error)?;
                form.append_with_str("subject", &payload.subject).map_err(js_error)?;
                form.append_with_str("message", &payload.message).map_err(js_error)?;
                form.append_with_str("hcaptchaToken", &payload.verification_token)
                    .map_err(js_error)?;
                for file in &payload.attachments {
                    form.append_with_blob_and_filename("images", file, &file.name())
                        .map_err(js_error)?;
                }
                Request::post(&self.endpoint).body(form).send().await
            }
            Transport::Json => {
                Request::post(&self.endpoint)
                    .json(&payload.wire_body())
                    .map_err(|e| GatewayError::Network(e.to_string()))?
                    .send()
                    .await
            }
        };

        let response = sent.map_err(|e| GatewayError::Network(e.to_string()))?;
        // A non-JSON body just means no ack; the HTTP status still decides.
        let ack = response.json::<ContactAck>().await.ok();
        Ok(ContactReceipt { http_ok: response.ok(), ack })
    }
}

fn js_error(value: JsValue) -> GatewayError {
    GatewayError::Network(format!("{value:?}"))
}
