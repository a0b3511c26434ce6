pub const EXPIRED_MESSAGE: &str = "hCaptcha expired. Please try again.";
pub const MISSING_MESSAGE: &str = "Please verify the captcha before submitting.";

/// How long the widget area stays visually highlighted after a submit was
/// blocked on a missing verification.
pub const HIGHLIGHT_MILLIS: u32 = 1_800;

/// Everything the rest of the form knows about the bot-verification widget.
/// The widget's JS callbacks drive the transitions; the submit path only
/// ever reads this.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerificationState {
    token: String,
    error: String,
    highlighted: bool,
}

impl VerificationState {
    /// Challenge passed: keep the token, clear any stale error.
    pub fn verify(&mut self, token: String) {
        self.token = token;
        self.error.clear();
    }

    /// Token aged out before it was used.
    pub fn expire(&mut self) {
        self.token.clear();
        self.error = EXPIRED_MESSAGE.to_string();
    }

    /// Submit was attempted without a token.
    pub fn flag_missing(&mut self) {
        self.error = MISSING_MESSAGE.to_string();
        self.highlighted = true;
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = false;
    }

    /// Back to the initial state, after a successful submission reset the
    /// widget alongside this.
    pub fn reset(&mut self) {
        self.token.clear();
        self.error.clear();
        self.highlighted = false;
    }

    pub fn is_verified(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn highlighted(&self) -> bool {
        self.highlighted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_stores_token_and_clears_error() {
        let mut state = VerificationState::default();
        state.flag_missing();
        state.verify("tok-1".to_string());
        assert!(state.is_verified());
        assert_eq!(state.token(), "tok-1");
        assert_eq!(state.error(), "");
    }

    #[test]
    fn test_expire_drops_token_and_explains() {
        let mut state = VerificationState::default();
        state.verify("tok-1".to_string());
        state.expire();
        assert!(!state.is_verified());
        assert_eq!(state.error(), EXPIRED_MESSAGE);
    }

    #[test]
    fn test_flag_missing_highlights_until_cleared() {
        let mut state = VerificationState::default();
        state.flag_missing();
        assert!(state.highlighted());
        assert_eq!(state.error(), MISSING_MESSAGE);
        state.clear_highlight();
        assert!(!state.highlighted());
        assert_eq!(state.error(), MISSING_MESSAGE);
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut state = VerificationState::default();
        state.verify("tok-1".to_string());
        state.flag_missing();
        state.reset();
        assert_eq!(state, VerificationState::default());
    }
}
