mod containers;
mod forgot_password;
mod login;
mod me;
mod resend_verification;
mod reset_password;
mod signup;
mod verify_email;
