/// 当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a client-side entity id: `<prefix>-<millis>-<4 hex>`.
///
/// Timestamp keeps ids roughly sortable by creation time; the random
/// suffix makes same-millisecond collisions a non-issue at front-of-house
/// scale (one operator, one device).
pub fn entity_id(prefix: &str) -> String {
    use rand::Rng;
    let suffix: u16 = rand::thread_rng().r#gen();
    format!("{}-{}-{:04x}", prefix, now_millis(), suffix)
}
