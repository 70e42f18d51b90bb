// Domain layer: the engine capability and its typed values. No knowledge of
// how an engine is loaded.

pub mod model;
pub mod ports;
