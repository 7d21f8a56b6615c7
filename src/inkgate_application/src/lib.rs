pub mod notifications;
pub mod policy;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use policy::AuthPolicy;
pub use use_cases::{
    AuthFlowError,
    forgot_password::ForgotPasswordUseCase,
    login::{LoginResponse, LoginUseCase},
    resend_verification::ResendVerificationUseCase,
    reset_password::ResetPasswordUseCase,
    signup::SignupUseCase,
    verify_email::VerifyEmailUseCase,
};
