pub mod subscription_sync;
