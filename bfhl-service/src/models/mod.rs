//! Request, response and number types.

pub mod envelope;
pub mod numeric;
pub mod operand;
pub mod operation;

pub use envelope::{Envelope, Payload};
pub use numeric::Numeric;
pub use operand::Operand;
pub use operation::Operation;
