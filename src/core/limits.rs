/*!
 * Limits and Constants
 *
 * Centralized location for the tunables of both memory primitives.
 * Values here are the defaults; `ArenaConfig` and `PoolConfig` may override
 * the ones marked [CONFIG].
 */

// =============================================================================
// ARENA ALLOCATOR
// =============================================================================

/// Minimum chunk requested from the system allocator (1024 units, 16KB)
/// [PERF] Amortizes system allocator overhead across many small requests
/// [CONFIG] `ArenaConfig::min_chunk_units`
pub const MIN_CHUNK_UNITS: usize = 1024;

/// Address of the sentinel base header
/// Always the lowest address in the arena, size 0, never handed out
pub const BASE_ADDRESS: usize = 0;

// =============================================================================
// POOLED LIST
// =============================================================================

/// Slots per pool when no capacity is given (4096)
/// [CONFIG] `PoolConfig::capacity`
pub const DEFAULT_POOL_CAPACITY: usize = 4096;

/// Floor for pool capacity
/// A pool smaller than this cannot both hold a value and keep a boundary slot
pub const MIN_POOL_CAPACITY: usize = 2;

// =============================================================================
// MONITORING
// =============================================================================

/// Operation spans slower than this log a warning (100ms)
pub const SLOW_OPERATION_MS: u128 = 100;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Overrides `ArenaConfig::min_chunk_units`
pub const ENV_MIN_CHUNK_UNITS: &str = "MEMARENA_MIN_CHUNK_UNITS";

/// Overrides `ArenaConfig::max_units`
pub const ENV_MAX_UNITS: &str = "MEMARENA_MAX_UNITS";

/// Overrides `PoolConfig::capacity`
pub const ENV_POOL_CAPACITY: &str = "MEMARENA_POOL_CAPACITY";

/// Switches tracing output to JSON when set to `1` or `true`
pub const ENV_TRACE_JSON: &str = "MEMARENA_TRACE_JSON";
