//! Ordered field declarations and the pattern library rules consult.

use crate::rule::RuleChain;
use fieldcheck_patterns::PatternLibrary;
use std::collections::HashMap;
use std::sync::Arc;

/// A declared field: name, display alias and its rule chain.
#[derive(Debug, Clone)]
pub struct FieldDef {
    name: String,
    alias: String,
    chain: RuleChain,
}

impl FieldDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn chain(&self) -> &RuleChain {
        &self.chain
    }
}

/// Fields in declaration order, each with one rule chain.
///
/// Declaring the same name twice hands back the chain already registered,
/// so rules added through either handle land in the same chain and the
/// field keeps its first position and alias.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldDef>,
    index: HashMap<String, usize>,
    patterns: Option<Arc<PatternLibrary>>,
}

impl Schema {
    /// An empty schema using the global pattern library.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty schema whose rules consult `patterns`.
    pub fn with_patterns(patterns: impl Into<Arc<PatternLibrary>>) -> Self {
        Self {
            patterns: Some(patterns.into()),
            ..Self::default()
        }
    }

    /// Replace the pattern library used by this schema.
    pub fn set_patterns(&mut self, patterns: impl Into<Arc<PatternLibrary>>) {
        self.patterns = Some(patterns.into());
    }

    /// The pattern library rules consult.
    pub fn patterns(&self) -> &PatternLibrary {
        self.patterns
            .as_deref()
            .unwrap_or_else(|| PatternLibrary::global())
    }

    /// Declare a field, or return the chain of the field already declared
    /// under `name`. The alias of a re-declared field is left unchanged.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        alias: impl Into<String>,
    ) -> &mut RuleChain {
        let name = name.into();
        let position = match self.index.get(&name) {
            Some(&position) => position,
            None => {
                let position = self.fields.len();
                tracing::trace!(field = %name, position, "Declared field");
                self.index.insert(name.clone(), position);
                self.fields.push(FieldDef {
                    name,
                    alias: alias.into(),
                    chain: RuleChain::new(),
                });
                position
            }
        };
        &mut self.fields[position].chain
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleKind;

    #[test]
    fn fields_keep_declaration_order() {
        let mut schema = Schema::new();
        schema.add_field("b", "");
        schema.add_field("a", "");
        schema.add_field("c", "");

        let names: Vec<_> = schema.fields().iter().map(FieldDef::name).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(schema.len(), 3);
        assert!(schema.contains("a"));
        assert!(!schema.contains("z"));
    }

    #[test]
    fn redeclaring_extends_the_same_chain() {
        let mut schema = Schema::new();
        schema.add_field("x", "First").required("");
        schema.add_field("y", "");
        schema.add_field("x", "Second").alpha("");

        assert_eq!(schema.len(), 2);
        let x = schema.field("x").unwrap();
        assert_eq!(x.alias(), "First");
        let kinds: Vec<_> = x.chain().iter().map(|i| i.kind().clone()).collect();
        assert_eq!(kinds, [RuleKind::Required, RuleKind::Alpha]);
        assert_eq!(schema.fields()[0].name(), "x");
    }

    #[test]
    fn uses_global_patterns_by_default() {
        let schema = Schema::new();
        assert!(std::ptr::eq(schema.patterns(), PatternLibrary::global()));

        let custom = PatternLibrary::empty().with_pattern("alpha", "^a+$").unwrap();
        let schema = Schema::with_patterns(custom);
        assert_eq!(schema.patterns().len(), 1);
    }
}
