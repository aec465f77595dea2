use serde_json::Value;

/// Local pointer prefixes and the root container each one indexes into.
const LOCAL_POINTERS: [(&str, &str); 2] = [
    ("#/definitions/", "definitions"),
    ("#/$defs/", "$defs"),
];

/// Resolves `$ref` pointers against the definitions of one root schema.
///
/// Only pointers into the root document's `definitions` or `$defs` maps resolve.
/// Anything else, such as `/schemas/address`, is reported as missing.
#[derive(Debug, Clone, Copy)]
pub struct DefinitionResolver<'a> {
    root: &'a Value,
}

impl<'a> DefinitionResolver<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    pub fn resolve(&self, pointer: &str) -> Option<&'a Value> {
        let root = self.root;
        LOCAL_POINTERS.iter().find_map(|(prefix, container)| {
            let name = pointer.strip_prefix(prefix)?;
            root.get(*container)?.get(name)
        })
    }
}
