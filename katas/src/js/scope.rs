//! Lexical environments for `var`, `let` and `const`.
//!
//! `var` bindings live in the function frame no matter which block declares
//! them; `let` and `const` disappear when their block ends.

use std::collections::HashMap;

use catalog::{Completion, ErrorKind, Thrown, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Mutable,
    Constant,
}

#[derive(Debug, Default)]
struct Frame {
    bindings: HashMap<String, (Binding, Value)>,
}

/// A function body: one function frame plus the stack of open blocks.
#[derive(Debug)]
pub struct Env {
    frames: Vec<Frame>,
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl Env {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    /// Run `body` inside a nested `{ ... }` block.
    pub fn block<R>(&mut self, body: impl FnOnce(&mut Env) -> R) -> R {
        self.frames.push(Frame::default());
        let result = body(self);
        self.frames.pop();
        result
    }

    pub fn declare_var(&mut self, name: &str, value: impl Into<Value>) {
        if let Some(function_frame) = self.frames.first_mut() {
            function_frame
                .bindings
                .insert(name.to_string(), (Binding::Mutable, value.into()));
        }
    }

    pub fn declare_let(&mut self, name: &str, value: impl Into<Value>) {
        self.declare_lexical(name, Binding::Mutable, value.into());
    }

    pub fn declare_const(&mut self, name: &str, value: impl Into<Value>) {
        self.declare_lexical(name, Binding::Constant, value.into());
    }

    /// Read a binding; `ReferenceError` when no enclosing frame has it.
    pub fn lookup(&self, name: &str) -> Completion {
        self.find(name)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| not_defined(name))
    }

    /// `name = value`; `TypeError` for constants.
    pub fn assign(&mut self, name: &str, value: impl Into<Value>) -> Result<(), Thrown> {
        let slot = self
            .frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.bindings.get_mut(name))
            .ok_or_else(|| not_defined(name))?;
        if slot.0 == Binding::Constant {
            return Err(Thrown::type_error("Assignment to constant variable."));
        }
        slot.1 = value.into();
        Ok(())
    }

    fn declare_lexical(&mut self, name: &str, binding: Binding, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.bindings.insert(name.to_string(), (binding, value));
        }
    }

    fn find(&self, name: &str) -> Option<&(Binding, Value)> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.bindings.get(name))
    }
}

fn not_defined(name: &str) -> Thrown {
    Thrown::error(ErrorKind::ReferenceError, format!("{name} is not defined"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_escapes_blocks_and_let_does_not() {
        let mut env = Env::new();
        env.block(|env| {
            env.declare_var("varX", true);
            env.declare_let("letX", true);
            assert!(env.lookup("letX").is_ok());
        });
        assert!(matches!(env.lookup("varX"), Ok(Value::Bool(true))));
        let err = env.lookup("letX").expect_err("out of scope");
        assert_eq!(err.to_string(), "ReferenceError: letX is not defined");
    }

    #[test]
    fn inner_let_shadows_outer() {
        let mut env = Env::new();
        env.declare_let("x", 1);
        env.block(|env| {
            env.declare_let("x", 2);
            assert!(matches!(env.lookup("x"), Ok(Value::Number(n)) if n == 2.0));
        });
        assert!(matches!(env.lookup("x"), Ok(Value::Number(n)) if n == 1.0));
    }

    #[test]
    fn constants_reject_assignment() {
        let mut env = Env::new();
        env.declare_const("constNum", 0);
        let err = env.assign("constNum", 1).expect_err("const");
        assert_eq!(err.kind(), Some(ErrorKind::TypeError));
        env.declare_let("n", 0);
        env.assign("n", 1).expect("let is mutable");
        assert!(env.assign("missing", 1).is_err());
    }
}
