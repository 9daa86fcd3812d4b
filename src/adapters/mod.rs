// Adapters layer: concrete implementations for external systems (http APIs, stores, staging).

pub mod http;
pub mod storage;
