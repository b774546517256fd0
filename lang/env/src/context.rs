use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;

use p4st_ast::{Exp, Id, Pid, Region, Spec, Typ};
use p4st_values::{Value, Vid};

use crate::builtins::Builtins;
use crate::error::EngineError;
use crate::trace::{DependencyEdge, PhantomHit};

const DEFAULT_RECURSION_BOUND: u32 = 4096;

/// Lexically scoped bindings plus everything an evaluation needs to carry
/// along: the immutable global definitions, the append-only value graph,
/// the phantom log, and the recursion/deadline bookkeeping.
///
/// A `Context` is owned exclusively by one evaluation; execution is
/// single-threaded and strictly sequential, so a `Context` is never shared
/// across concurrent evaluations.
pub struct Context {
    scopes: Vec<HashMap<Id, (Typ, Value)>>,
    spec: Rc<Spec>,
    builtins: Builtins,
    phantom_log: Vec<PhantomHit>,
    guard_path: Vec<Exp>,
    value_graph: Vec<DependencyEdge>,
    recursion_depth: u32,
    recursion_bound: u32,
    deadline: Option<Instant>,
}

impl Context {
    pub fn new(spec: Rc<Spec>) -> Self {
        Context {
            scopes: vec![HashMap::new()],
            spec,
            builtins: Builtins::with_defaults(),
            phantom_log: Vec::new(),
            guard_path: Vec::new(),
            value_graph: Vec::new(),
            recursion_depth: 0,
            recursion_bound: DEFAULT_RECURSION_BOUND,
            deadline: None,
        }
    }

    pub fn with_builtins(mut self, builtins: Builtins) -> Self {
        self.builtins = builtins;
        self
    }

    pub fn with_recursion_bound(mut self, bound: u32) -> Self {
        self.recursion_bound = bound;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn spec(&self) -> &Spec {
        &self.spec
    }

    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    /// Depth of the scope stack, for the "scope discipline" property: it
    /// must equal its entry-time value after any evaluation, successful or
    /// failed.
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn phantom_log(&self) -> &[PhantomHit] {
        &self.phantom_log
    }

    pub fn value_graph(&self) -> &[DependencyEdge] {
        &self.value_graph
    }

    /// Binds `id` in the innermost scope.
    pub fn bind(&mut self, id: Id, typ: Typ, val: Value) {
        self.scopes
            .last_mut()
            .expect("a Context always has at least one scope")
            .insert(id, (typ, val));
    }

    /// Looks up `id` from the innermost scope outward.
    pub fn lookup(&self, id: &str, region: &Region) -> Result<(&Typ, &Value), EngineError> {
        for scope in self.scopes.iter().rev() {
            if let Some((typ, val)) = scope.get(id) {
                return Ok((typ, val));
            }
        }
        Err(EngineError::Unbound { id: Id::new(id), region: region.clone() })
    }

    /// Pushes a fresh scope, runs `f`, then pops it — on every path,
    /// including an `Err` result.
    pub fn with_scope<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Context) -> R,
    {
        self.scopes.push(HashMap::new());
        let result = f(self);
        self.scopes.pop();
        result
    }

    /// Pushes `guard` onto the enclosing-conditions path recorded against
    /// any phantom hit while `f` runs, then pops it.
    pub fn with_guard<F, R>(&mut self, guard: Exp, f: F) -> R
    where
        F: FnOnce(&mut Context) -> R,
    {
        self.guard_path.push(guard);
        let result = f(self);
        self.guard_path.pop();
        result
    }

    /// Bounds recursive `Call`/`RuleI` evaluation. Returns `StackOverflow`
    /// without calling `f` once the configured bound is reached; otherwise
    /// increments depth for the duration of `f` and always decrements
    /// afterward.
    pub fn with_call<F, R>(&mut self, region: &Region, f: F) -> Result<R, EngineError>
    where
        F: FnOnce(&mut Context) -> R,
    {
        if self.recursion_depth >= self.recursion_bound {
            return Err(EngineError::StackOverflow { bound: self.recursion_bound, region: region.clone() });
        }
        self.recursion_depth += 1;
        let result = f(self);
        self.recursion_depth -= 1;
        Ok(result)
    }

    pub fn record_phantom(&mut self, pid: Pid) {
        self.phantom_log.push(PhantomHit { pid, context_path: self.guard_path.clone() });
    }

    /// Registers `v` in the value graph with the `vid`s it depends on.
    pub fn register_value(&mut self, v: &Value, depends_on: Vec<Vid>) {
        self.value_graph.push(DependencyEdge { vid: v.vid(), depends_on });
    }

    /// Builds a value and registers it with this context's value graph in
    /// one step, the only sanctioned way to mint a new `Value`.
    pub fn make_value(
        &mut self,
        kind: p4st_values::ValueKind,
        typ: Typ,
        depends_on: Vec<Vid>,
    ) -> Value {
        let v = Value::new(kind, typ);
        self.register_value(&v, depends_on);
        v
    }

    pub fn check_deadline(&self, region: &Region) -> Result<(), EngineError> {
        match self.deadline {
            Some(d) if Instant::now() > d => Err(EngineError::Deadline { region: region.clone() }),
            _ => Ok(()),
        }
    }
}
