//! Root `index.ts` re-exporting every module file.

use std::path::Path;

use super::output::OutputBuffer;
use super::ts_types::{json_string, module_alias};
use super::import_specifier;

/// Words that cannot be used as an `export * as <name>` binding.
const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield",
];

/// Namespace name a module is exported under.
pub fn export_name(module: &str) -> String {
    let alias = module_alias(module);
    if RESERVED.contains(&alias.as_str()) {
        format!("_{}", alias)
    } else {
        alias
    }
}

/// Generates the index. `modules` must already be sorted by module name.
pub fn generate_index<'a>(modules: impl IntoIterator<Item = &'a str>, module_dir: &Path) -> OutputBuffer {
    let mut buffer = OutputBuffer::default();
    for module in modules {
        let target = module_dir.join(module_alias(module));
        buffer.body.push_str(&format!(
            "export * as {} from {};\n",
            export_name(module),
            json_string(&import_specifier(Path::new(""), &target))
        ));
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_module_names_are_prefixed() {
        assert_eq!(export_name("default"), "_default");
        assert_eq!(export_name("std"), "std");
        assert_eq!(export_name("std::enc"), "std_enc");
    }

    #[test]
    fn index_lists_modules_in_given_order() {
        let buffer = generate_index(["cal", "default", "std"], Path::new("modules"));
        assert_eq!(
            buffer.body,
            concat!(
                "export * as cal from \"./modules/cal\";\n",
                "export * as _default from \"./modules/default\";\n",
                "export * as std from \"./modules/std\";\n",
            )
        );
    }
}
