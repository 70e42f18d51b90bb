//! Symbol visibility annotations.
//!
//! The annotation set is fixed at compile time: targets whose object format
//! supports default/hidden visibility (`cfg(symbol_visibility)`, set by the
//! build script) get two real annotations, every other target gets two empty
//! ones so generated declarations stay valid.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation(&'static str);

impl Annotation {
    pub const EMPTY: Annotation = Annotation("");

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compiler attribute text for C declarations, or an empty string.
    pub fn attribute(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("__attribute__ ((visibility (\"{}\")))", self.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotations {
    /// Exported from the shared object.
    pub public: Annotation,
    /// Internal to the shared object.
    pub local: Annotation,
}

#[cfg(symbol_visibility)]
pub const ANNOTATIONS: Annotations = Annotations {
    public: Annotation("default"),
    local: Annotation("hidden"),
};

#[cfg(not(symbol_visibility))]
pub const ANNOTATIONS: Annotations = Annotations {
    public: Annotation::EMPTY,
    local: Annotation::EMPTY,
};

pub const fn supported() -> bool {
    cfg!(symbol_visibility)
}
