/// Liveness probe
///
/// Returns 200 `ok` whenever the process can answer, regardless of readiness
pub async fn health_handler() -> &'static str {
    "ok"
}
