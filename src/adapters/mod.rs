// Adapters layer: concrete engines behind the `Engine` port.

pub mod native;
pub mod null;

pub use native::NativeEngine;
pub use null::NullEngine;
