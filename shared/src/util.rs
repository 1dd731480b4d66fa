//! 通用工具函数

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 当前 UTC 时间，ISO 8601 格式 (用于响应 meta)
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Generate a 24-hex-char object id for use as a resource ID.
///
/// Layout (12 bytes, hex-encoded):
///   - 4 bytes: seconds since Unix epoch, big-endian
///   - 8 bytes: random
///
/// The format is stable across the stack: path parameters are rejected
/// with INVALID_ID before any lookup when they don't match it.
pub fn object_id() -> String {
    use rand::RngCore;

    let secs = (now_millis() / 1000) as u32;
    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    rand::thread_rng().fill_bytes(&mut bytes[4..]);
    hex::encode(bytes)
}

/// 毫秒时间戳转 ISO 8601 字符串。超出范围的值回退到 Unix 纪元。
pub fn millis_to_iso(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// 校验 id 是否为合法的 24 位十六进制对象 id
pub fn is_object_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_id_is_well_formed() {
        let id = object_id();
        assert_eq!(id.len(), 24);
        assert!(is_object_id(&id));
    }

    #[test]
    fn object_ids_are_unique() {
        let a = object_id();
        let b = object_id();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(is_object_id("000000000000000000000000"));
        assert!(is_object_id("64f1c0ffee64f1c0ffee64f1"));
        assert!(!is_object_id("not-an-id"));
        assert!(!is_object_id("64f1c0ffee"));
        assert!(!is_object_id("zzzzzzzzzzzzzzzzzzzzzzzz"));
        assert!(!is_object_id("64f1c0ffee64f1c0ffee64f1a"));
    }
}
