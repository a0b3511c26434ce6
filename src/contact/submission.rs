use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;

use super::payload::{ContactDraft, SubmissionPayload};
use super::tags::TagSelection;
use super::verification::{VerificationState, MISSING_MESSAGE};

pub const SENDING_MESSAGE: &str = "Sending...";
pub const SUCCESS_MESSAGE: &str = "Message sent! I will get back to you soon.";
pub const SEND_FAILURE_MESSAGE: &str = "Failed to send. Please try again later.";
pub const NETWORK_FAILURE_MESSAGE: &str = "Network error. Please try again.";

/// Why a submit attempt never left the page. `InFlight` is silent; the rest
/// render as the status line.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionBlock {
    #[error("hCaptcha is not configured. Please try again later.")]
    NotConfigured,
    #[error("{MISSING_MESSAGE}")]
    VerificationMissing,
    #[error("Please select at least one tag.")]
    TagsMissing,
    #[error("a submission is already in flight")]
    InFlight,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),
}

/// Response body of POST /api/contact.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ContactAck {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// What came back over the wire: transport-level success plus whatever body
/// could be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactReceipt {
    pub http_ok: bool,
    pub ack: Option<ContactAck>,
}

impl ContactReceipt {
    /// The backend's contract: accepted only on a 2xx status AND `ok: true`
    /// in the body.
    pub fn accepted(&self) -> bool {
        self.http_ok && self.ack.as_ref().is_some_and(|ack| ack.ok)
    }
}

pub trait ContactGateway<F> {
    async fn dispatch(
        &self,
        payload: &SubmissionPayload<F>,
    ) -> Result<ContactReceipt, GatewayError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected { message: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionEvent {
    Blocked(SubmissionBlock),
    Settled(Verdict),
}

impl SubmissionEvent {
    /// False only for the in-flight block: that event reports on an attempt
    /// still running somewhere else, so it must not touch the form's sending
    /// state. Every other event ends the attempt it belongs to.
    pub fn concludes_attempt(&self) -> bool {
        !matches!(self, SubmissionEvent::Blocked(SubmissionBlock::InFlight))
    }
}

/// Owns the single-flight rule and the order of the preflight checks. The
/// form holds one of these for its whole life.
#[derive(Debug, Default)]
pub struct SubmissionController {
    sending: bool,
}

impl SubmissionController {
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Runs the preflight checks in their fixed order and, if they pass,
    /// assembles the payload and marks the controller busy.
    pub fn begin<F>(
        &mut self,
        draft: &ContactDraft,
        verification: &VerificationState,
        tags: &TagSelection,
        attachments: Vec<F>,
        challenge_configured: bool,
    ) -> Result<SubmissionPayload<F>, SubmissionBlock> {
        if self.sending {
            return Err(SubmissionBlock::InFlight);
        }
        if !challenge_configured {
            return Err(SubmissionBlock::NotConfigured);
        }
        if !verification.is_verified() {
            return Err(SubmissionBlock::VerificationMissing);
        }
        if tags.is_empty() {
            return Err(SubmissionBlock::TagsMissing);
        }
        self.sending = true;
        Ok(SubmissionPayload::assemble(draft, tags, verification.token(), attachments))
    }

    pub fn conclude(&mut self, receipt: Result<ContactReceipt, GatewayError>) -> Verdict {
        self.sending = false;
        match receipt {
            Ok(receipt) if receipt.accepted() => Verdict::Accepted,
            Ok(receipt) => Verdict::Rejected {
                message: receipt
                    .ack
                    .and_then(|ack| ack.error)
                    .filter(|msg| !msg.is_empty())
                    .unwrap_or_else(|| SEND_FAILURE_MESSAGE.to_string()),
            },
            Err(GatewayError::Network(_)) => Verdict::Rejected {
                message: NETWORK_FAILURE_MESSAGE.to_string(),
            },
        }
    }
}

/// One submit attempt end to end. The form's submit handler and the tests
/// both go through here so the blocking rules cannot drift between them.
/// `notify_sending` runs once the preflight has passed, right before the
/// dispatch; blocked attempts never reach it.
pub async fn submit<F, G, N>(
    controller: Rc<RefCell<SubmissionController>>,
    gateway: &G,
    draft: &ContactDraft,
    verification: &VerificationState,
    tags: &TagSelection,
    attachments: Vec<F>,
    challenge_configured: bool,
    notify_sending: N,
) -> SubmissionEvent
where
    G: ContactGateway<F>,
    N: FnOnce(),
{
    let payload = {
        let mut controller = controller.borrow_mut();
        match controller.begin(draft, verification, tags, attachments, challenge_configured) {
            Ok(payload) => payload,
            Err(block) => return SubmissionEvent::Blocked(block),
        }
    };
    notify_sending();
    let receipt = gateway.dispatch(&payload).await;
    SubmissionEvent::Settled(controller.borrow_mut().conclude(receipt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    struct StubGateway {
        calls: Cell<usize>,
        response: Result<ContactReceipt, GatewayError>,
    }

    impl StubGateway {
        fn replying(http_ok: bool, ack: Option<ContactAck>) -> Self {
            Self { calls: Cell::new(0), response: Ok(ContactReceipt { http_ok, ack }) }
        }

        fn unreachable_host() -> Self {
            Self {
                calls: Cell::new(0),
                response: Err(GatewayError::Network("connection refused".to_string())),
            }
        }
    }

    impl ContactGateway<()> for StubGateway {
        async fn dispatch(
            &self,
            _payload: &SubmissionPayload<()>,
        ) -> Result<ContactReceipt, GatewayError> {
            self.calls.set(self.calls.get() + 1);
            self.response.clone()
        }
    }

    fn ack(ok: bool, error: Option<&str>) -> Option<ContactAck> {
        Some(ContactAck { ok, error: error.map(str::to_string) })
    }

    fn verified() -> VerificationState {
        let mut state = VerificationState::default();
        state.verify("tok".to_string());
        state
    }

    fn tagged() -> TagSelection {
        let mut tags = TagSelection::default();
        tags.toggle("Scripting");
        tags
    }

    fn attempt(
        gateway: &StubGateway,
        verification: &VerificationState,
        tags: &TagSelection,
        configured: bool,
    ) -> SubmissionEvent {
        let controller = Rc::new(RefCell::new(SubmissionController::default()));
        block_on(submit(
            controller,
            gateway,
            &ContactDraft::default(),
            verification,
            tags,
            Vec::<()>::new(),
            configured,
            || {},
        ))
    }

    #[test]
    fn test_blocked_when_challenge_unconfigured() {
        let gateway = StubGateway::replying(true, ack(true, None));
        let event = attempt(&gateway, &verified(), &tagged(), false);
        assert_eq!(event, SubmissionEvent::Blocked(SubmissionBlock::NotConfigured));
        assert_eq!(gateway.calls.get(), 0);
    }

    #[test]
    fn test_blocked_without_verification_token() {
        let gateway = StubGateway::replying(true, ack(true, None));
        let event = attempt(&gateway, &VerificationState::default(), &tagged(), true);
        assert_eq!(event, SubmissionEvent::Blocked(SubmissionBlock::VerificationMissing));
        assert_eq!(gateway.calls.get(), 0);
    }

    #[test]
    fn test_blocked_without_tags() {
        let gateway = StubGateway::replying(true, ack(true, None));
        let event = attempt(&gateway, &verified(), &TagSelection::default(), true);
        assert_eq!(event, SubmissionEvent::Blocked(SubmissionBlock::TagsMissing));
        assert_eq!(gateway.calls.get(), 0);
    }

    #[test]
    fn test_preflight_checks_run_in_fixed_order() {
        let gateway = StubGateway::replying(true, ack(true, None));
        let everything_wrong =
            attempt(&gateway, &VerificationState::default(), &TagSelection::default(), false);
        assert_eq!(everything_wrong, SubmissionEvent::Blocked(SubmissionBlock::NotConfigured));
        let unverified_untagged =
            attempt(&gateway, &VerificationState::default(), &TagSelection::default(), true);
        assert_eq!(
            unverified_untagged,
            SubmissionEvent::Blocked(SubmissionBlock::VerificationMissing)
        );
    }

    #[test]
    fn test_accepted_requires_http_ok_and_ack_ok() {
        let gateway = StubGateway::replying(true, ack(true, None));
        let event = attempt(&gateway, &verified(), &tagged(), true);
        assert_eq!(event, SubmissionEvent::Settled(Verdict::Accepted));
        assert_eq!(gateway.calls.get(), 1);
    }

    #[test]
    fn test_server_error_message_is_surfaced() {
        let gateway = StubGateway::replying(false, ack(false, Some("Rate limited")));
        let event = attempt(&gateway, &verified(), &tagged(), true);
        assert_eq!(
            event,
            SubmissionEvent::Settled(Verdict::Rejected { message: "Rate limited".to_string() })
        );
    }

    #[test]
    fn test_fallback_when_reject_carries_no_error() {
        let gateway = StubGateway::replying(false, None);
        let event = attempt(&gateway, &verified(), &tagged(), true);
        assert_eq!(
            event,
            SubmissionEvent::Settled(Verdict::Rejected {
                message: SEND_FAILURE_MESSAGE.to_string()
            })
        );
    }

    #[test]
    fn test_empty_error_string_falls_back_too() {
        let gateway = StubGateway::replying(true, ack(false, Some("")));
        let event = attempt(&gateway, &verified(), &tagged(), true);
        assert_eq!(
            event,
            SubmissionEvent::Settled(Verdict::Rejected {
                message: SEND_FAILURE_MESSAGE.to_string()
            })
        );
    }

    #[test]
    fn test_ok_flag_alone_is_not_acceptance() {
        let gateway = StubGateway::replying(false, ack(true, None));
        let event = attempt(&gateway, &verified(), &tagged(), true);
        assert!(matches!(event, SubmissionEvent::Settled(Verdict::Rejected { .. })));
    }

    #[test]
    fn test_network_failure_has_its_own_message() {
        let gateway = StubGateway::unreachable_host();
        let event = attempt(&gateway, &verified(), &tagged(), true);
        assert_eq!(
            event,
            SubmissionEvent::Settled(Verdict::Rejected {
                message: NETWORK_FAILURE_MESSAGE.to_string()
            })
        );
        assert_eq!(gateway.calls.get(), 1);
    }

    #[test]
    fn test_notify_sending_fires_only_past_the_preflight() {
        let gateway = StubGateway::replying(true, ack(true, None));

        let notified = Cell::new(false);
        let controller = Rc::new(RefCell::new(SubmissionController::default()));
        let blocked = block_on(submit(
            controller,
            &gateway,
            &ContactDraft::default(),
            &VerificationState::default(),
            &tagged(),
            Vec::<()>::new(),
            true,
            || notified.set(true),
        ));
        assert!(matches!(blocked, SubmissionEvent::Blocked(_)));
        assert!(!notified.get());

        let controller = Rc::new(RefCell::new(SubmissionController::default()));
        let settled = block_on(submit(
            controller,
            &gateway,
            &ContactDraft::default(),
            &verified(),
            &tagged(),
            Vec::<()>::new(),
            true,
            || notified.set(true),
        ));
        assert!(matches!(settled, SubmissionEvent::Settled(_)));
        assert!(notified.get());
    }

    #[test]
    fn test_second_begin_while_sending_is_a_silent_noop() {
        let mut controller = SubmissionController::default();
        let first: Result<SubmissionPayload<()>, _> =
            controller.begin(&ContactDraft::default(), &verified(), &tagged(), vec![], true);
        assert!(first.is_ok());
        assert!(controller.is_sending());

        let second: Result<SubmissionPayload<()>, _> =
            controller.begin(&ContactDraft::default(), &verified(), &tagged(), vec![], true);
        assert_eq!(second.unwrap_err(), SubmissionBlock::InFlight);

        controller.conclude(Ok(ContactReceipt { http_ok: true, ack: ack(true, None) }));
        assert!(!controller.is_sending());
        let third: Result<SubmissionPayload<()>, _> =
            controller.begin(&ContactDraft::default(), &verified(), &tagged(), vec![], true);
        assert!(third.is_ok());
    }

    #[test]
    fn test_in_flight_block_leaves_the_running_attempt_alone() {
        let gateway = StubGateway::replying(true, ack(true, None));
        let controller = Rc::new(RefCell::new(SubmissionController::default()));
        let first: Result<SubmissionPayload<()>, _> = controller.borrow_mut().begin(
            &ContactDraft::default(),
            &verified(),
            &tagged(),
            vec![],
            true,
        );
        assert!(first.is_ok());

        let notified = Cell::new(false);
        let event = block_on(submit(
            controller.clone(),
            &gateway,
            &ContactDraft::default(),
            &verified(),
            &tagged(),
            Vec::<()>::new(),
            true,
            || notified.set(true),
        ));
        assert_eq!(event, SubmissionEvent::Blocked(SubmissionBlock::InFlight));
        assert!(!event.concludes_attempt());
        assert!(controller.borrow().is_sending());
        assert_eq!(gateway.calls.get(), 0);
        assert!(!notified.get());

        assert!(SubmissionEvent::Settled(Verdict::Accepted).concludes_attempt());
        assert!(SubmissionEvent::Blocked(SubmissionBlock::TagsMissing).concludes_attempt());
    }

    #[test]
    fn test_block_messages_match_the_status_lines() {
        assert_eq!(
            SubmissionBlock::NotConfigured.to_string(),
            "hCaptcha is not configured. Please try again later."
        );
        assert_eq!(SubmissionBlock::VerificationMissing.to_string(), MISSING_MESSAGE);
        assert_eq!(SubmissionBlock::TagsMissing.to_string(), "Please select at least one tag.");
    }

    #[test]
    fn test_ack_tolerates_missing_fields() {
        let empty: ContactAck = serde_json::from_str("{}").unwrap();
        assert!(!empty.ok);
        assert_eq!(empty.error, None);
        let ok_only: ContactAck = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert!(ok_only.ok);
    }
}
