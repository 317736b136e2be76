/// Destination for generated telemetry payloads. Implementations decide how
/// a payload reaches the deployed event source.
pub trait RecordSink {
    fn push(&self, partition_key: &str, payload: &[u8]) -> Result<(), String>;
}
