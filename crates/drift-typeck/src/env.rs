//! Binding environment with scope stack and narrowing overrides.
//!
//! The environment maps variable names to their declared static types. It
//! uses a scope stack (Vec of frames) so that entering a lexical region
//! (function body, conditional branch) pushes a frame and leaving pops it;
//! lookups search from the innermost frame outward.
//!
//! Each frame additionally carries the narrowing overrides created by
//! type-discriminating guards inside that region. An override shadows the
//! declared type for lookups while its frame is live, is discarded when
//! the frame pops, and is invalidated immediately when the binding is
//! reassigned. A binding carries at most one override per frame; the
//! innermost override wins.

use rowan::TextRange;
use rustc_hash::FxHashMap;

use crate::check::check_assignable;
use crate::error::{CheckOrigin, TypeError};
use crate::subtype::ClassHierarchy;
use crate::ty::Ty;

#[derive(Default)]
struct Frame {
    /// Declared types of bindings introduced in this frame.
    bindings: FxHashMap<String, Ty>,
    /// Narrowing overrides active while this frame is live. The named
    /// binding may live in an outer frame.
    narrowed: FxHashMap<String, Ty>,
}

/// A type environment: a stack of scope frames.
pub struct TypeEnv {
    /// Index 0 is the outermost (global) frame.
    frames: Vec<Frame>,
}

impl TypeEnv {
    /// Create a new environment with one empty global frame.
    pub fn new() -> Self {
        TypeEnv {
            frames: vec![Frame::default()],
        }
    }

    /// Push a new empty frame (entering a function body or branch region).
    pub fn push_scope(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Pop the innermost frame, discarding its bindings and any narrowing
    /// overrides it holds.
    ///
    /// # Panics
    ///
    /// Panics if called when only the global frame remains.
    pub fn pop_scope(&mut self) {
        assert!(self.frames.len() > 1, "cannot pop the global scope");
        self.frames.pop();
    }

    /// Declare a binding with the given static type in the current frame.
    pub fn declare(&mut self, name: impl Into<String>, ty: Ty) {
        self.frames
            .last_mut()
            .expect("frame stack should never be empty")
            .bindings
            .insert(name.into(), ty);
    }

    /// Reassign a binding: check the new value's type against the declared
    /// type, and on success invalidate every narrowing override for the
    /// name. Assigning to an undeclared name is an error.
    pub fn assign(
        &mut self,
        name: &str,
        actual: &Ty,
        origin: CheckOrigin,
        classes: &dyn ClassHierarchy,
    ) -> Result<(), TypeError> {
        let declared = match self.declared_ty(name) {
            Some(ty) => ty.clone(),
            None => {
                return Err(TypeError::UnboundVariable {
                    name: name.to_string(),
                    span: origin
                        .span()
                        .unwrap_or_else(|| TextRange::new(0.into(), 0.into())),
                });
            }
        };
        check_assignable(&declared, actual, origin, classes)?;
        for frame in &mut self.frames {
            frame.narrowed.remove(name);
        }
        Ok(())
    }

    /// The effective type of a binding: the innermost narrowing override
    /// if one is live, the declared type otherwise.
    pub fn ty_of(&self, name: &str) -> Option<&Ty> {
        for frame in self.frames.iter().rev() {
            if let Some(ty) = frame.narrowed.get(name) {
                return Some(ty);
            }
            if let Some(ty) = frame.bindings.get(name) {
                return Some(ty);
            }
        }
        None
    }

    /// The declared type of a binding, ignoring narrowing overrides.
    pub fn declared_ty(&self, name: &str) -> Option<&Ty> {
        for frame in self.frames.iter().rev() {
            if let Some(ty) = frame.bindings.get(name) {
                return Some(ty);
            }
        }
        None
    }

    /// Record a narrowing override for a binding in the current frame.
    /// Returns `false` (and records nothing) if the name has no declared
    /// binding in any frame.
    pub fn set_narrowed(&mut self, name: &str, ty: Ty) -> bool {
        if self.declared_ty(name).is_none() {
            return false;
        }
        self.frames
            .last_mut()
            .expect("frame stack should never be empty")
            .narrowed
            .insert(name.to_string(), ty);
        true
    }

    /// Number of frames on the stack.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl Default for TypeEnv {
    fn default() -> Self {
        Self::new()
    }
}
