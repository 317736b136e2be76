pub mod outputs;
pub mod sink;
