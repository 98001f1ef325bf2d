//! TypeScript type projection of introspected types.

use crate::diagnostic::CodegenError;
use crate::introspect::{split_name, IntrospectedType, ObjectType, ScalarType, Snapshot, TupleType, TypeId};
use super::output::ImportSet;

/// Per-module emission state threaded through projection.
///
/// Projection of a type that lives in another module registers an import
/// here; the module being emitted decides whether a name is local.
pub struct EmitContext<'a> {
    pub module: &'a str,
    pub imports: &'a mut ImportSet,
}

impl<'a> EmitContext<'a> {
    pub fn new(module: &'a str, imports: &'a mut ImportSet) -> Self {
        Self { module, imports }
    }
}

/// TypeScript rendering of a built-in scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsScalar {
    /// A TypeScript primitive or global (`number`, `Date`, ...).
    Primitive(&'static str),
    /// A wrapper class exported by the client package.
    Wrapper(&'static str),
    /// No faithful TypeScript representation.
    Unknown,
}

/// Maps a built-in scalar name to its TypeScript counterpart.
pub fn builtin_scalar(name: &str) -> TsScalar {
    match name {
        "std::int16" | "std::int32" | "std::int64" | "std::float32" | "std::float64" => {
            TsScalar::Primitive("number")
        }
        "std::str" | "std::uuid" | "std::json" => TsScalar::Primitive("string"),
        "std::bool" => TsScalar::Primitive("boolean"),
        "std::bigint" => TsScalar::Primitive("bigint"),
        "std::datetime" => TsScalar::Primitive("Date"),
        "std::duration" => TsScalar::Wrapper("Duration"),
        "cal::local_date" => TsScalar::Wrapper("LocalDate"),
        "cal::local_time" => TsScalar::Wrapper("LocalTime"),
        "cal::local_datetime" => TsScalar::Wrapper("LocalDateTime"),
        // std::decimal and std::bytes included
        _ => TsScalar::Unknown,
    }
}

/// Projects introspected types to TypeScript type expressions.
pub struct TypeProjector<'a> {
    snapshot: &'a Snapshot,
    client_module: &'a str,
}

impl<'a> TypeProjector<'a> {
    pub fn new(snapshot: &'a Snapshot, client_module: &'a str) -> Self {
        Self {
            snapshot,
            client_module,
        }
    }

    /// Returns the TypeScript type for `ty` as seen from `ctx.module`.
    pub fn project(&self, ty: &IntrospectedType, ctx: &mut EmitContext<'_>) -> Result<String, CodegenError> {
        self.project_at(ty, ctx, 0)
    }

    /// Resolves `id` and projects it. `referrer` is reported if the id is unknown.
    pub fn project_id(
        &self,
        id: &TypeId,
        referrer: &str,
        ctx: &mut EmitContext<'_>,
    ) -> Result<String, CodegenError> {
        let ty = self.snapshot.resolve(id, referrer)?;
        self.project_at(ty, ctx, 0)
    }

    fn project_at(
        &self,
        ty: &IntrospectedType,
        ctx: &mut EmitContext<'_>,
        depth: usize,
    ) -> Result<String, CodegenError> {
        match ty {
            IntrospectedType::Scalar(scalar) => self.project_scalar(scalar, ctx, depth),
            IntrospectedType::Array(array) => {
                let element = self.snapshot.resolve(&array.element_id, &array.name)?;
                let inner = self.project_at(element, ctx, depth + 1)?;
                Ok(format!("{}[]", inner))
            }
            IntrospectedType::Tuple(tuple) => self.project_tuple(tuple, ctx),
            IntrospectedType::Object(object) => self.project_object(object, ctx, depth),
        }
    }

    fn project_scalar(
        &self,
        scalar: &ScalarType,
        ctx: &mut EmitContext<'_>,
        depth: usize,
    ) -> Result<String, CodegenError> {
        if scalar.is_enum() {
            return named_reference(&scalar.name, ctx);
        }

        if let Some(material_id) = &scalar.material_id {
            let material = self.snapshot.resolve(material_id, &scalar.name)?;
            return self.project_at(material, ctx, depth);
        }

        Ok(match builtin_scalar(&scalar.name) {
            TsScalar::Primitive(ts) => ts.to_string(),
            TsScalar::Wrapper(class) => {
                ctx.imports.add(format!(
                    "import type * as edgedb from {};",
                    json_string(self.client_module)
                ));
                format!("edgedb.{}", class)
            }
            TsScalar::Unknown => "unknown".to_string(),
        })
    }

    fn project_tuple(&self, tuple: &TupleType, ctx: &mut EmitContext<'_>) -> Result<String, CodegenError> {
        if tuple.elements.is_empty() {
            return Ok("[]".to_string());
        }

        let mut items = Vec::with_capacity(tuple.elements.len());
        for element in &tuple.elements {
            let target = self.snapshot.resolve(&element.target_id, &tuple.name)?;
            let ts = self.project_at(target, ctx, 0)?;
            if tuple.is_named() {
                items.push(format!("{}: {}", property_key(&element.name), ts));
            } else {
                items.push(ts);
            }
        }

        if tuple.is_named() {
            Ok(format!("{{{}}}", items.join(", ")))
        } else {
            Ok(format!("[{}]", items.join(", ")))
        }
    }

    fn project_object(
        &self,
        object: &ObjectType,
        ctx: &mut EmitContext<'_>,
        depth: usize,
    ) -> Result<String, CodegenError> {
        let (members, op) = if !object.union_of.is_empty() {
            (&object.union_of, " | ")
        } else if !object.intersection_of.is_empty() {
            (&object.intersection_of, " & ")
        } else {
            return named_reference(&object.name, ctx);
        };

        let mut parts = Vec::with_capacity(members.len());
        for id in members {
            let member = self.snapshot.resolve(id, &object.name)?;
            parts.push(self.project_at(member, ctx, depth + 1)?);
        }

        let combined = parts.join(op);
        if depth > 0 {
            Ok(format!("({})", combined))
        } else {
            Ok(combined)
        }
    }
}

/// References a declared type: bare when local, module-qualified otherwise.
pub fn named_reference(name: &str, ctx: &mut EmitContext<'_>) -> Result<String, CodegenError> {
    let (module, local) = split_name(name).ok_or_else(|| CodegenError::MalformedTypeName {
        name: name.to_string(),
    })?;

    if module == ctx.module {
        return Ok(local.to_string());
    }

    let alias = module_alias(module);
    ctx.imports.add(format!(
        "import type * as {alias}Types from \"./{alias}\";"
    ));
    Ok(format!("{}Types.{}", alias, local))
}

/// Identifier-safe alias for a module, also used as its file stem.
pub fn module_alias(module: &str) -> String {
    module.replace("::", "_")
}

/// Converts an arbitrary string to an identifier (used for enum member names).
pub fn to_ident(value: &str) -> String {
    let mut ident = String::with_capacity(value.len());
    let mut in_gap = false;
    for c in value.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            ident.push(c);
            in_gap = false;
        } else if !in_gap {
            ident.push('_');
            in_gap = true;
        }
    }

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Object key as written in a TypeScript type literal.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        json_string(name)
    }
}

/// Double-quoted, escaped string literal (valid in both JSON and TypeScript).
pub fn json_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
