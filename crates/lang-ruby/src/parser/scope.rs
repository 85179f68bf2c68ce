use std::collections::HashSet;

struct Frame {
    locals: HashSet<String>,
    /// Blocks see the locals of the frame they were opened in.
    sees_outer: bool,
}

/// Local-variable frames, used to tell `foo` the variable from `foo` the call.
pub struct LocalScopes {
    frames: Vec<Frame>,
}

impl LocalScopes {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame {
                locals: HashSet::new(),
                sees_outer: false,
            }],
        }
    }

    /// `def`, `class`, `module` and `class << x` start from nothing.
    pub fn push_opaque(&mut self) {
        self.push(false);
    }

    /// Blocks and lambdas.
    pub fn push_block(&mut self) {
        self.push(true);
    }

    fn push(&mut self, sees_outer: bool) {
        self.frames.push(Frame {
            locals: HashSet::new(),
            sees_outer,
        });
    }

    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn declare(&mut self, name: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.locals.insert(name.to_string());
        }
    }

    pub fn is_local(&self, name: &str) -> bool {
        for frame in self.frames.iter().rev() {
            if frame.locals.contains(name) {
                return true;
            }
            if !frame.sees_outer {
                return false;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_see_outer_locals_but_defs_do_not() {
        let mut scopes = LocalScopes::new();
        scopes.declare("x");
        scopes.push_block();
        assert!(scopes.is_local("x"));
        scopes.declare("y");
        scopes.push_opaque();
        assert!(!scopes.is_local("x"));
        assert!(!scopes.is_local("y"));
        scopes.pop();
        scopes.pop();
        assert!(!scopes.is_local("y"));
        assert!(scopes.is_local("x"));
    }
}
