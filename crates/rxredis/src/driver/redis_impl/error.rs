//! Redis error mapping to CommandError.

use rxredis_core::CommandError;

/// Maps Redis errors to CommandError.
pub fn map_redis_error(err: redis::RedisError) -> CommandError {
    if err.is_connection_refusal()
        || err.is_timeout()
        || err.is_connection_dropped()
        || err.is_io_error()
    {
        CommandError::ConnectionFailed(err.to_string())
    } else {
        CommandError::ExecutionFailed(err.to_string())
    }
}
