//! Stage tracing hooks.
//!
//! Only the `tracing` facade is used here. Subscribers (fmt, OpenTelemetry)
//! are installed by the binary layer.

#[cfg(feature = "tracing")]
pub fn emit_stage(op: &str, index: usize, rows_in: usize, rows_out: usize) {
    let span = tracing::debug_span!("stage", op, index);
    let _entered = span.enter();
    tracing::debug!(rows_in, rows_out, "stage complete");
}

#[cfg(not(feature = "tracing"))]
pub fn emit_stage(_op: &str, _index: usize, _rows_in: usize, _rows_out: usize) { /* no-op */
}
