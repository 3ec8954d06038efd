//! Time and id helpers shared by the record store and the API

/// Current UTC timestamp in Unix millis (`created_at` / `updated_at` columns)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 record id.
///
/// Layout (53 bits, stays inside JavaScript's Number.MAX_SAFE_INTEGER so the
/// admin frontend can hold ids as plain numbers):
///   - 41 bits: milliseconds since 2024-01-01 UTC
///   - 12 bits: random
///
/// Ids from a later millisecond compare greater, so the rule store can use
/// them as a last-resort creation-order key.
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let ts = (now_millis() - EPOCH_MS) & 0x1FF_FFFF_FFFF;
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000);
    (ts << 12) | rand_bits
}
