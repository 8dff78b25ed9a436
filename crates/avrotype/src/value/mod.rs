pub mod value;

pub use value::{RecordValue, Value};
