use serde::Serialize;

use super::tags::TagSelection;

// Advisory caps, mirrored by maxlength on the inputs. The backend enforces
// its own limits.
pub const MAX_SUBJECT_CHARS: usize = 120;
pub const MAX_MESSAGE_CHARS: usize = 1900;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContactMethod {
    #[default]
    Discord,
    Email,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub method: ContactMethod,
    pub name: String,
    pub email: String,
    pub discord_username: String,
    pub subject: String,
    pub message: String,
}

impl ContactDraft {
    /// The name the backend greets the sender by: the Discord username for
    /// Discord replies, the given name for email replies.
    pub fn identity_name(&self) -> &str {
        match self.method {
            ContactMethod::Discord => &self.discord_username,
            ContactMethod::Email => &self.name,
        }
    }

    /// Reply-routing field the backend parses out of the `tag` value.
    pub fn tag_field(&self, tags: &TagSelection) -> String {
        match self.method {
            ContactMethod::Email => format!(
                "method=email; email={}; categories={}",
                self.email,
                tags.serialized()
            ),
            ContactMethod::Discord => {
                format!("method=discord; categories={}", tags.serialized())
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    Json,
    Multipart,
}

/// Fully assembled submission, generic over the attachment file type so the
/// pipeline runs without a browser in tests.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmissionPayload<F> {
    pub name: String,
    pub tag: String,
    pub subject: String,
    pub message: String,
    pub verification_token: String,
    pub attachments: Vec<F>,
}

impl<F> SubmissionPayload<F> {
    pub fn assemble(
        draft: &ContactDraft,
        tags: &TagSelection,
        token: &str,
        attachments: Vec<F>,
    ) -> Self {
        Self {
            name: draft.identity_name().to_string(),
            tag: draft.tag_field(tags),
            subject: draft.subject.clone(),
            message: draft.message.clone(),
            verification_token: token.to_string(),
            attachments,
        }
    }

    /// Attachments force multipart; the bare form goes out as JSON.
    pub fn transport(&self) -> Transport {
        if self.attachments.is_empty() {
            Transport::Json
        } else {
            Transport::Multipart
        }
    }

    pub fn wire_body(&self) -> ContactBody<'_> {
        ContactBody {
            name: &self.name,
            tag: &self.tag,
            subject: &self.subject,
            message: &self.message,
            hcaptcha_token: &self.verification_token,
        }
    }
}

/// JSON body for the attachment-free path. Field names belong to the
/// backend contract, including the camelCase token key.
#[derive(Debug, Serialize)]
pub struct ContactBody<'a> {
    pub name: &'a str,
    pub tag: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
    #[serde(rename = "hcaptchaToken")]
    pub hcaptcha_token: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(method: ContactMethod) -> ContactDraft {
        ContactDraft {
            method,
            name: "Alex".to_string(),
            email: "a@b.c".to_string(),
            discord_username: "alex#0001".to_string(),
            subject: "Pack request".to_string(),
            message: "Hello".to_string(),
        }
    }

    #[test]
    fn test_email_tag_field_carries_address_and_categories() {
        let mut tags = TagSelection::default();
        tags.toggle("Scripting");
        assert_eq!(
            draft(ContactMethod::Email).tag_field(&tags),
            "method=email; email=a@b.c; categories=Scripting"
        );
    }

    #[test]
    fn test_discord_tag_field_joins_categories_in_pick_order() {
        let mut tags = TagSelection::default();
        tags.toggle("Scripting");
        tags.toggle("Website");
        assert_eq!(
            draft(ContactMethod::Discord).tag_field(&tags),
            "method=discord; categories=Scripting, Website"
        );
    }

    #[test]
    fn test_identity_name_follows_method() {
        assert_eq!(draft(ContactMethod::Discord).identity_name(), "alex#0001");
        assert_eq!(draft(ContactMethod::Email).identity_name(), "Alex");
    }

    #[test]
    fn test_assemble_uses_identity_name_and_token() {
        let mut tags = TagSelection::default();
        tags.toggle("Discord Bot");
        let payload: SubmissionPayload<()> =
            SubmissionPayload::assemble(&draft(ContactMethod::Discord), &tags, "tok-9", vec![]);
        assert_eq!(payload.name, "alex#0001");
        assert_eq!(payload.tag, "method=discord; categories=Discord Bot");
        assert_eq!(payload.verification_token, "tok-9");
    }

    #[test]
    fn test_transport_is_multipart_only_with_attachments() {
        let tags = TagSelection::default();
        let bare: SubmissionPayload<()> =
            SubmissionPayload::assemble(&draft(ContactMethod::Discord), &tags, "t", vec![]);
        assert_eq!(bare.transport(), Transport::Json);
        let with_files: SubmissionPayload<()> =
            SubmissionPayload::assemble(&draft(ContactMethod::Discord), &tags, "t", vec![(), ()]);
        assert_eq!(with_files.transport(), Transport::Multipart);
    }

    #[test]
    fn test_wire_body_uses_backend_field_names() {
        let mut tags = TagSelection::default();
        tags.toggle("Website");
        let payload: SubmissionPayload<()> =
            SubmissionPayload::assemble(&draft(ContactMethod::Email), &tags, "tok-3", vec![]);
        let value = serde_json::to_value(payload.wire_body()).unwrap();
        assert_eq!(value["name"], "Alex");
        assert_eq!(value["tag"], "method=email; email=a@b.c; categories=Website");
        assert_eq!(value["subject"], "Pack request");
        assert_eq!(value["message"], "Hello");
        assert_eq!(value["hcaptchaToken"], "tok-3");
        assert_eq!(value.as_object().unwrap().len(), 5);
    }
}
