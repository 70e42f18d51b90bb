//! C header for the exported engine ABI.

use crate::visibility::{Annotations, ANNOTATIONS};

const GUARD: &str = "PYE_H_INCLUDED";

const DECLARATIONS: [&str; 4] = [
    "int pye_init_factory(const char *dir);",
    "void pye_new_document(int id);",
    "void pye_set_option(int option, int value);",
    "int pye_get_option(void);",
];

/// Renders the header for this build's visibility annotations.
pub fn render_header() -> String {
    render_with(&ANNOTATIONS)
}

pub fn render_with(annotations: &Annotations) -> String {
    let public = annotations.public.attribute();
    let local = annotations.local.attribute();

    let mut out = String::new();
    out.push_str("/* Generated by pye. Do not edit. */\n\n");
    out.push_str(&format!("#ifndef {GUARD}\n#define {GUARD}\n\n"));
    out.push_str(&define_line("PYE_PUBLIC", &public));
    out.push_str(&define_line("PYE_LOCAL", &local));
    out.push_str("\n#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");
    for decl in DECLARATIONS {
        out.push_str("PYE_PUBLIC ");
        out.push_str(decl);
        out.push('\n');
    }
    out.push_str("\n#ifdef __cplusplus\n}\n#endif\n\n");
    out.push_str(&format!("#endif /* {GUARD} */\n"));
    out
}

fn define_line(name: &str, attribute: &str) -> String {
    if attribute.is_empty() {
        format!("#define {name}\n")
    } else {
        format!("#define {name} {attribute}\n")
    }
}
