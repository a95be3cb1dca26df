pub mod subscription_event;
pub mod user_subscription;
