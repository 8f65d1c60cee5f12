//! Redis error mapping to StoreError.

use boxoffice_core::store::StoreError;

/// Maps Redis errors to StoreError.
pub fn map_redis_error(err: redis::RedisError) -> StoreError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        StoreError::ConnectionFailed(err.to_string())
    } else {
        StoreError::OperationFailed(err.to_string())
    }
}
