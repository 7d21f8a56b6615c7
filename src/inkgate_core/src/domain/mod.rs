pub mod email;
pub mod one_time_token;
pub mod password;
pub mod rate_limit;
pub mod session;
pub mod user;
pub mod user_id;
