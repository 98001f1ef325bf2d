//! TypeScript code generation from an introspection snapshot.
//!
//! Produces, relative to the output directory:
//! - `<module_dir>/<module>.ts` per schema module (enums, interfaces, type handles)
//! - `__spec__.ts` with the flattened spec of every object type
//! - `index.ts` re-exporting each module file
//!
//! Types are visited in dependency order, so everything a declaration extends
//! has been emitted before it.

mod index;
mod modules;
pub mod output;
mod spec_table;
pub mod ts_types;

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::GeneratorConfig;
use crate::diagnostic::CodegenError;
use crate::graph;
use crate::introspect::{split_name, IntrospectedType, Snapshot};

pub use index::export_name;
pub use modules::ModuleOutput;
pub use output::{GeneratedCode, ImportSet, OutputBuffer};
pub use spec_table::SpecTable;
pub use ts_types::{EmitContext, TypeProjector};

/// Path of the spec table, relative to the output directory.
pub const SPEC_FILE: &str = "__spec__.ts";
/// Path of the index, relative to the output directory.
pub const INDEX_FILE: &str = "index.ts";

/// Import specifiers shared by every generated file.
#[derive(Debug, Clone)]
pub struct ImportPaths {
    pub reflection_from_modules: String,
    pub reflection_from_root: String,
    pub spec_from_modules: String,
}

impl ImportPaths {
    pub fn new(config: &GeneratorConfig) -> Self {
        let spec = Path::new(SPEC_FILE).with_extension("");
        Self {
            reflection_from_modules: import_specifier(&config.module_dir, &config.runtime_path),
            reflection_from_root: import_specifier(Path::new(""), &config.runtime_path),
            spec_from_modules: import_specifier(&config.module_dir, &spec),
        }
    }
}

/// Relative ES module specifier from a file in `from_dir` to `target`
/// (both relative to the output directory).
pub fn import_specifier(from_dir: &Path, target: &Path) -> String {
    let relative = pathdiff::diff_paths(target, from_dir).unwrap_or_else(|| target.to_path_buf());
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

    if joined == ".." || joined.starts_with("../") {
        joined
    } else {
        format!("./{}", joined)
    }
}

/// Path of a module's declaration file, relative to the output directory.
pub fn module_file(module_dir: &Path, module: &str) -> String {
    let file = module_dir.join(format!("{}.ts", ts_types::module_alias(module)));
    file.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Generates the full output tree for a snapshot.
///
/// Nothing is written here; a failure leaves no partial output behind.
pub fn generate(snapshot: &Snapshot, config: &GeneratorConfig) -> Result<GeneratedCode, CodegenError> {
    let ordered = graph::sort_types(snapshot)?;
    let projector = TypeProjector::new(snapshot, &config.client_module);
    let paths = ImportPaths::new(config);

    let mut modules: BTreeMap<String, ModuleOutput> = BTreeMap::new();
    let mut spec = SpecTable::new(&paths.reflection_from_root);

    for ty in ordered {
        match ty {
            IntrospectedType::Scalar(scalar) if scalar.is_enum() => {
                let module = module_of(&scalar.name)?;
                modules.entry(module.to_string()).or_default().emit_enum(scalar)?;
            }
            IntrospectedType::Object(object) => {
                spec.add_object(object, snapshot)?;

                // Unions and intersections are only ever referenced inline.
                if object.is_compound() {
                    continue;
                }

                let module = module_of(&object.name)?;
                let output = modules.entry(module.to_string()).or_default();
                output.emit_interface(object, module, &projector, &paths)?;
                output.emit_type_handle(object, &paths)?;
            }
            _ => {}
        }
    }

    let mut files = BTreeMap::new();
    tracing::debug!(entries = spec.len(), "built spec table");
    files.insert(SPEC_FILE.to_string(), spec.finish());

    modules.retain(|_, output| !output.is_empty());
    files.insert(
        INDEX_FILE.to_string(),
        index::generate_index(modules.keys().map(String::as_str), &config.module_dir),
    );

    for (module, output) in modules {
        tracing::debug!(module = %module, imports = output.imports.len(), "emitted module");
        files.insert(module_file(&config.module_dir, &module), output.into_buffer());
    }

    Ok(GeneratedCode { files })
}

fn module_of(name: &str) -> Result<&str, CodegenError> {
    split_name(name)
        .map(|(module, _)| module)
        .ok_or_else(|| CodegenError::MalformedTypeName {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use crate::introspect::{ObjectType, Pointer, PointerCardinality, PointerKind, ScalarType, TypeId};

    fn scalar(id: &str, name: &str) -> ScalarType {
        ScalarType {
            id: TypeId::from(id),
            name: name.to_string(),
            is_abstract: false,
            bases: vec![],
            ancestors: vec![],
            enum_values: vec![],
            material_id: None,
        }
    }

    fn object(id: &str, name: &str, bases: &[&str]) -> ObjectType {
        ObjectType {
            id: TypeId::from(id),
            name: name.to_string(),
            is_abstract: false,
            bases: bases.iter().map(|b| TypeId::from(*b)).collect(),
            ancestors: bases.iter().map(|b| TypeId::from(*b)).collect(),
            union_of: vec![],
            intersection_of: vec![],
            pointers: vec![],
        }
    }

    fn property(name: &str, target: &str) -> Pointer {
        Pointer {
            name: name.to_string(),
            kind: PointerKind::Property,
            cardinality: PointerCardinality::One,
            required: true,
            expr: None,
            target_id: TypeId::from(target),
            pointers: vec![],
        }
    }

    #[test]
    fn import_specifiers() {
        assert_eq!(import_specifier(Path::new("modules"), Path::new("__spec__")), "../__spec__");
        assert_eq!(
            import_specifier(Path::new("modules"), Path::new("../reflection")),
            "../../reflection"
        );
        assert_eq!(import_specifier(Path::new(""), Path::new("../reflection")), "../reflection");
        assert_eq!(import_specifier(Path::new(""), Path::new("modules/std")), "./modules/std");
        assert_eq!(module_file(Path::new("modules"), "std::enc"), "modules/std_enc.ts");
    }

    #[test]
    fn union_ignores_own_pointers_and_bases() {
        let mut union = object("u", "default::A | default::B", &["obj"]);
        union.union_of = vec![TypeId::from("a"), TypeId::from("b")];
        union.pointers = vec![property("ignored", "str")];

        let mut holder = object("h", "default::Holder", &[]);
        holder.pointers = vec![Pointer {
            kind: PointerKind::Link,
            ..property("either", "u")
        }];

        let snapshot = Snapshot::new(vec![
            IntrospectedType::Scalar(scalar("str", "std::str")),
            IntrospectedType::Object(object("obj", "std::BaseObject", &[])),
            IntrospectedType::Object(object("a", "default::A", &["obj"])),
            IntrospectedType::Object(object("b", "default::B", &["obj"])),
            IntrospectedType::Object(union),
            IntrospectedType::Object(holder),
        ])
        .unwrap();

        let generated = generate(&snapshot, &GeneratorConfig::default()).unwrap();
        let default = generated.get("modules/default.ts").unwrap().render();

        assert!(default.contains("  either: reflection.LinkDesc<A | B, reflection.Cardinality.One>;\n"));
        assert!(!default.contains("ignored"));
        assert!(!default.contains("export interface A | B"));
        assert!(!default.contains("objectType<A | B>"));
    }

    #[test]
    fn empty_modules_are_not_exported() {
        let snapshot = Snapshot::new(vec![
            IntrospectedType::Scalar(scalar("str", "std::str")),
            IntrospectedType::Object(object("u", "default::User", &[])),
        ])
        .unwrap();

        let config = GeneratorConfig {
            module_dir: PathBuf::from("modules"),
            ..GeneratorConfig::default()
        };
        let generated = generate(&snapshot, &config).unwrap();

        assert!(generated.get("modules/std.ts").is_none());
        assert!(generated.get("modules/default.ts").is_some());
        assert_eq!(
            generated.get(INDEX_FILE).unwrap().body,
            "export * as _default from \"./modules/default\";\n"
        );
    }

    #[test]
    fn enums_precede_interfaces() {
        let mut status = scalar("status", "default::Status");
        status.enum_values = vec!["Open".to_string(), "Closed".to_string()];
        let mut ticket = object("t", "default::Ticket", &[]);
        ticket.pointers = vec![property("status", "status")];

        // Ticket comes first in the snapshot; the enum still leads the file.
        let snapshot = Snapshot::new(vec![
            IntrospectedType::Object(ticket),
            IntrospectedType::Scalar(status),
        ])
        .unwrap();

        let generated = generate(&snapshot, &GeneratorConfig::default()).unwrap();
        let body = &generated.get("modules/default.ts").unwrap().body;
        let enum_pos = body.find("export enum Status").unwrap();
        let iface_pos = body.find("export interface Ticket").unwrap();
        assert!(enum_pos < iface_pos);
        assert!(body.contains("status: reflection.PropertyDesc<Status, reflection.Cardinality.One>;"));
    }

    #[test]
    fn malformed_object_name_aborts() {
        let snapshot = Snapshot::new(vec![IntrospectedType::Object(object("x", "Orphan", &[]))]).unwrap();
        let err = generate(&snapshot, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, CodegenError::MalformedTypeName { .. }));
    }
}
