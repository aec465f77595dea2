use super::property::{FlatProperty, PropertyType};
use super::refs::DefinitionResolver;
use serde_json::{Map, Value};
use tracing::debug;

/// Settings for a [`Flattener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Number of path levels emitted. `1` keeps only top-level properties; objects on
    /// the last level are emitted without their children.
    pub max_depth: usize,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self { max_depth: 32 }
    }
}

/// Walks a JSON Schema into a flat, depth-first list of [`FlatProperty`] records.
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    options: FlattenOptions,
}

#[derive(Debug, Clone, Default)]
pub struct FlattenerBuilder {
    options: FlattenOptions,
}

impl FlattenerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Flattener {
        Flattener {
            options: self.options,
        }
    }
}

impl Flattener {
    pub fn builder() -> FlattenerBuilder {
        FlattenerBuilder::new()
    }

    pub fn options(&self) -> &FlattenOptions {
        &self.options
    }

    /// Flattens `schema`. Never fails: broken references become `null` typed entries.
    pub fn flatten(&self, schema: &Value) -> Vec<FlatProperty> {
        let resolver = DefinitionResolver::new(schema);
        let root = match schema.get("$ref").and_then(Value::as_str) {
            Some(pointer) if schema.get("properties").is_none() => {
                match resolver.resolve(pointer) {
                    Some(definition) => definition,
                    None => {
                        debug!(pointer, "Root schema reference does not resolve");
                        return Vec::new();
                    }
                }
            }
            _ => schema,
        };

        let Some(properties) = root.get("properties").and_then(Value::as_object) else {
            return Vec::new();
        };

        let mut walk = Walk {
            resolver,
            max_depth: self.options.max_depth,
            active_refs: Vec::new(),
            output: Vec::new(),
        };
        walk.properties(properties, &[]);
        walk.output
    }
}

/// Flattens `schema` with the default options.
pub fn get_property_list_from(schema: &Value) -> Vec<FlatProperty> {
    Flattener::default().flatten(schema)
}

struct Walk<'a> {
    resolver: DefinitionResolver<'a>,
    max_depth: usize,
    /// References currently being expanded, used to cut cycles.
    active_refs: Vec<&'a str>,
    output: Vec<FlatProperty>,
}

impl<'a> Walk<'a> {
    fn properties(&mut self, properties: &'a Map<String, Value>, path: &[String]) {
        for (key, node) in properties {
            self.property(key, node, path);
        }
    }

    fn property(&mut self, key: &str, node: &'a Value, path: &[String]) {
        let pointer = node.get("$ref").and_then(Value::as_str);
        let resolved = match pointer {
            Some(pointer) => match self.resolver.resolve(pointer) {
                Some(definition) => definition,
                None => {
                    debug!(key, pointer, "Dangling schema reference");
                    self.output.push(FlatProperty {
                        key: key.to_string(),
                        path: path.to_vec(),
                        property_type: Some(PropertyType::Null),
                        description: Some(format!("the definition {} doesn't exist", pointer)),
                        ..FlatProperty::default()
                    });
                    return;
                }
            },
            None => node,
        };

        let property = self.describe(key, path, node, resolved);
        let is_object = property.property_type == Some(PropertyType::Object);
        self.output.push(property);

        if !is_object {
            return;
        }
        let Some(children) = resolved.get("properties").and_then(Value::as_object) else {
            return;
        };
        if path.len() + 1 >= self.max_depth {
            debug!(key, depth = path.len() + 1, "Maximum schema depth reached");
            return;
        }
        if let Some(pointer) = pointer {
            if self.active_refs.contains(&pointer) {
                debug!(key, pointer, "Cyclic schema reference, not descending");
                return;
            }
            self.active_refs.push(pointer);
        }

        let mut child_path = path.to_vec();
        child_path.push(key.to_string());
        self.properties(children, &child_path);

        if pointer.is_some() {
            self.active_refs.pop();
        }
    }

    /// Builds the record for one property. Annotations on the referring node win over
    /// those of the referenced definition.
    fn describe(&self, key: &str, path: &[String], node: &Value, resolved: &Value) -> FlatProperty {
        let annotation = |name: &str| {
            node.get(name)
                .or_else(|| resolved.get(name))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        let property_type = PropertyType::of_schema(resolved);
        let array_type = if property_type == Some(PropertyType::Array) {
            self.item_type(resolved)
        } else {
            None
        };

        FlatProperty {
            key: key.to_string(),
            path: path.to_vec(),
            title: annotation("title"),
            description: annotation("description"),
            property_type,
            array_type,
            read_only: node
                .get("readOnly")
                .or_else(|| resolved.get("readOnly"))
                .and_then(Value::as_bool),
            examples: node
                .get("examples")
                .or_else(|| resolved.get("examples"))
                .and_then(Value::as_array)
                .cloned(),
        }
    }

    fn item_type(&self, array: &Value) -> Option<PropertyType> {
        let items = match array.get("items")? {
            Value::Array(tuple) => tuple.first()?,
            items => items,
        };
        match items.get("$ref").and_then(Value::as_str) {
            Some(pointer) => PropertyType::of_schema(self.resolver.resolve(pointer)?),
            None => PropertyType::of_schema(items),
        }
    }
}
