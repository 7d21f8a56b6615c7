mod forgot_password;
mod login;
mod me;
mod resend_verification;
mod reset_password;
mod signup;
mod verify_email;

use serde::{Deserialize, Serialize};

pub use forgot_password::{FORGOT_PASSWORD_MESSAGE, ForgotPasswordRequest, forgot_password};
pub use login::{LoginRequest, LoginResponseBody, login};
pub use me::me;
pub use resend_verification::{
    RESEND_VERIFICATION_MESSAGE, ResendVerificationRequest, resend_verification,
};
pub use reset_password::{ResetPasswordRequest, reset_password};
pub use signup::{SignupRequest, SignupResponse, signup};
pub use verify_email::verify_email;

/// Body of responses that only carry a human readable outcome.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
