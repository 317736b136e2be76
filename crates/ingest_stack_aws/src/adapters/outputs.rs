/// Read-only view of a deployed stack's outputs.
pub trait StackOutputsSource {
    /// Returns the value of one output key, or `None` when the stack exists
    /// but never declared that output.
    fn output_value(&self, key: &str) -> Result<Option<String>, String>;
}
