use crate::runtime::value::Value;
use std::collections::HashMap;

/// Single flat variable table shared by the whole program and by every
/// function body. There are no nested scopes.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient read: an unbound name evaluates to its own text.
    pub fn get(&self, name: &str) -> Value {
        self.lookup(name)
            .cloned()
            .unwrap_or_else(|| Value::text(name))
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_reads_return_the_name() {
        let env = Environment::new();
        assert_eq!(env.get("desconocida"), Value::text("desconocida"));
        assert!(env.lookup("desconocida").is_none());
    }

    #[test]
    fn set_overwrites() {
        let mut env = Environment::new();
        env.set("x", Value::Number(1.0));
        env.set("x", Value::text("uno"));
        assert_eq!(env.get("x"), Value::text("uno"));
        assert_eq!(env.len(), 1);
        assert!(env.contains("x"));
        env.clear();
        assert!(env.is_empty());
    }
}
