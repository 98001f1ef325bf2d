//! Flattened type specification table (`__spec__.ts`).
//!
//! The runtime needs, for every object type, its ancestry and the shape of its
//! own pointers without walking the introspection data again. Names are
//! resolved from ids here, so the table is self-contained.

use crate::diagnostic::CodegenError;
use crate::introspect::{ObjectType, Pointer, Snapshot};
use super::output::OutputBuffer;
use super::ts_types::json_string;

pub struct SpecTable {
    buffer: OutputBuffer,
    entries: usize,
}

impl SpecTable {
    /// Starts an empty table importing the reflection runtime from `reflection_import`.
    pub fn new(reflection_import: &str) -> Self {
        let mut buffer = OutputBuffer::default();
        buffer.imports.add(format!(
            "import * as reflection from {};",
            json_string(reflection_import)
        ));
        buffer
            .body
            .push_str("export const spec: reflection.TypesSpec = new reflection.StrictMap();\n");

        Self { buffer, entries: 0 }
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Appends the entry for one object type.
    pub fn add_object(&mut self, object: &ObjectType, snapshot: &Snapshot) -> Result<(), CodegenError> {
        let bases = snapshot.names_of(&object.bases, &object.name)?;
        let ancestors = snapshot.names_of(&object.ancestors, &object.name)?;

        let mut properties = Vec::new();
        let mut links = Vec::new();
        for ptr in &object.pointers {
            if ptr.is_link() {
                links.push(link_entry(object, ptr, snapshot)?);
            } else {
                properties.push(format!("    {},\n", property_entry(ptr)));
            }
        }

        let body = &mut self.buffer.body;
        body.push_str(&format!("\nspec.set({}, {{\n", json_string(&object.name)));
        body.push_str(&format!("  name: {},\n", json_string(&object.name)));
        body.push_str(&format!("  bases: {},\n", json_list(&bases)));
        body.push_str(&format!("  ancestors: {},\n", json_list(&ancestors)));
        push_list(body, "properties", &properties);
        push_list(body, "links", &links);
        body.push_str("});\n");

        self.entries += 1;
        Ok(())
    }

    pub fn finish(self) -> OutputBuffer {
        self.buffer
    }
}

fn property_entry(ptr: &Pointer) -> String {
    format!(
        "{{name: {}, cardinality: reflection.Cardinality.{}}}",
        json_string(&ptr.name),
        ptr.cardinality()
    )
}

fn link_entry(object: &ObjectType, ptr: &Pointer, snapshot: &Snapshot) -> Result<String, CodegenError> {
    let referrer = format!("{}.{}", object.name, ptr.name);
    let target = snapshot.resolve(&ptr.target_id, &referrer)?;

    let link_props: Vec<String> = ptr
        .link_properties()
        .map(|prop| format!("      {},\n", property_entry(prop)))
        .collect();

    let properties = if link_props.is_empty() {
        "[]".to_string()
    } else {
        format!("[\n{}    ]", link_props.concat())
    };

    Ok(format!(
        "    {{name: {}, cardinality: reflection.Cardinality.{}, target: {}, properties: {}}},\n",
        json_string(&ptr.name),
        ptr.cardinality(),
        json_string(target.name()),
        properties
    ))
}

fn push_list(body: &mut String, key: &str, items: &[String]) {
    if items.is_empty() {
        body.push_str(&format!("  {}: [],\n", key));
    } else {
        body.push_str(&format!("  {}: [\n", key));
        for item in items {
            body.push_str(item);
        }
        body.push_str("  ],\n");
    }
}

fn json_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| json_string(s)).collect();
    format!("[{}]", quoted.join(", "))
}
