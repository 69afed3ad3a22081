/*!
 * Monitoring
 * Tracing setup for binaries and benchmarks
 */

mod tracer;

pub use tracer::{init_tracing, span_operation, OperationSpan};
