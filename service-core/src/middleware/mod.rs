pub mod request_id;
pub mod tracing;

pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use self::tracing::RequestSpan;
