//! Per-module declaration files.
//!
//! Each schema module gets one TypeScript file holding, in order:
//! - enum declarations for its enum scalars
//! - an interface per (non-compound) object type
//! - a runtime type handle per interface, bound to the spec table

use std::collections::HashSet;

use crate::diagnostic::CodegenError;
use crate::introspect::{split_name, ObjectType, ScalarType};
use super::output::{ImportSet, OutputBuffer};
use super::ts_types::{json_string, property_key, to_ident, EmitContext, TypeProjector};
use super::ImportPaths;

/// Declarations collected for one schema module.
#[derive(Debug, Default)]
pub struct ModuleOutput {
    pub imports: ImportSet,
    enums: String,
    interfaces: String,
    handles: String,
}

impl ModuleOutput {
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.interfaces.is_empty() && self.handles.is_empty()
    }

    /// Emits `export enum Name { ... }` for an enum scalar.
    pub fn emit_enum(&mut self, scalar: &ScalarType) -> Result<(), CodegenError> {
        let local = local_name(&scalar.name)?;

        self.enums.push_str(&format!("export enum {} {{\n", local));
        let mut taken = HashSet::with_capacity(scalar.enum_values.len());
        for value in &scalar.enum_values {
            let member = unique_member(to_ident(value), &mut taken);
            self.enums
                .push_str(&format!("  {} = {},\n", member, json_string(value)));
        }
        self.enums.push_str("}\n\n");
        Ok(())
    }

    /// Emits the interface for an object type declared in `module`.
    pub fn emit_interface(
        &mut self,
        object: &ObjectType,
        module: &str,
        projector: &TypeProjector<'_>,
        paths: &ImportPaths,
    ) -> Result<(), CodegenError> {
        let local = local_name(&object.name)?;
        self.imports.add(format!(
            "import * as reflection from {};",
            json_string(&paths.reflection_from_modules)
        ));

        let mut ctx = EmitContext::new(module, &mut self.imports);

        let mut bases = Vec::with_capacity(object.bases.len());
        for base in &object.bases {
            bases.push(projector.project_id(base, &object.name, &mut ctx)?);
        }

        let mut fields = Vec::with_capacity(object.pointers.len());
        for ptr in &object.pointers {
            let referrer = format!("{}.{}", object.name, ptr.name);
            let target = projector.project_id(&ptr.target_id, &referrer, &mut ctx)?;
            let descriptor = if ptr.is_link() { "LinkDesc" } else { "PropertyDesc" };
            let readonly = if ptr.is_computed() { "readonly " } else { "" };
            fields.push(format!(
                "  {}{}: reflection.{}<{}, reflection.Cardinality.{}>;\n",
                readonly,
                property_key(&ptr.name),
                descriptor,
                target,
                ptr.cardinality()
            ));
        }

        if bases.is_empty() {
            self.interfaces.push_str(&format!("export interface {} {{\n", local));
        } else {
            self.interfaces.push_str(&format!(
                "export interface {} extends {} {{\n",
                local,
                bases.join(", ")
            ));
        }
        for field in fields {
            self.interfaces.push_str(&field);
        }
        self.interfaces.push_str("}\n\n");
        Ok(())
    }

    /// Emits the runtime handle binding an interface to its spec entry.
    pub fn emit_type_handle(&mut self, object: &ObjectType, paths: &ImportPaths) -> Result<(), CodegenError> {
        let local = local_name(&object.name)?;
        self.imports.add(format!(
            "import {{spec as __spec__}} from {};",
            json_string(&paths.spec_from_modules)
        ));

        self.handles.push_str(&format!(
            "export const {} = reflection.objectType<{}>(__spec__, {});\n",
            local,
            local,
            json_string(&object.name)
        ));
        Ok(())
    }

    /// Assembles the file: enums, then interfaces, then handles.
    pub fn into_buffer(self) -> OutputBuffer {
        let mut body = String::new();
        body.push_str(&self.enums);
        body.push_str(&self.interfaces);
        body.push_str(&self.handles);

        OutputBuffer {
            imports: self.imports,
            body,
        }
    }
}

/// Distinct values can slug to the same identifier (`a b`, `a-b`); later ones
/// get the first free `_2`, `_3`, ... suffix.
fn unique_member(ident: String, taken: &mut HashSet<String>) -> String {
    let mut member = ident.clone();
    let mut n = 2;
    while taken.contains(&member) {
        member = format!("{}_{}", ident, n);
        n += 1;
    }
    taken.insert(member.clone());
    member
}

fn local_name(name: &str) -> Result<&str, CodegenError> {
    split_name(name)
        .map(|(_, local)| local)
        .ok_or_else(|| CodegenError::MalformedTypeName {
            name: name.to_string(),
        })
}
