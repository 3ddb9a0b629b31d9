pub mod forward_result;
pub mod log_payload;

pub use forward_result::ForwardResult;
pub use log_payload::{LogPayload, is_truthy};
