use std::rc::Rc;
use std::time::{Duration, Instant};

use p4st_ast::{Def, Spec};
use p4st_env::{Builtins, Context, DependencyEdge, EngineError, PhantomHit};
use p4st_eval::{Flow, InstrHost};
use p4st_interp::Interpreter;
use p4st_values::Value;

use crate::error::DriverError;
use crate::json::json_to_value;

/// The output of `Engine::run_relation`: the caller-side bindings the
/// relation produced, plus the phantom log and dependency graph the
/// `Context` accumulated during that run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub bindings: Vec<(String, Value)>,
    pub phantom_log: Vec<PhantomHit>,
    pub dependency_graph: Vec<DependencyEdge>,
}

/// Holds one loaded `Spec` and runs relations/functions against it.
/// Deliberately narrow: there is no multi-file dependency graph to cache,
/// since the IL this engine loads is a single already-elaborated JSON
/// document.
pub struct Engine {
    spec: Rc<Spec>,
    builtins: Builtins,
    recursion_bound: Option<u32>,
    deadline: Option<Duration>,
}

impl Engine {
    /// Parses `json` as a serialized `Spec` and builds an
    /// engine ready to run its relations and functions.
    pub fn load_spec_json(json: &str) -> Result<Self, DriverError> {
        let spec: Spec = serde_json::from_str(json).map_err(DriverError::SpecParse)?;
        Ok(Engine { spec: Rc::new(spec), builtins: Builtins::with_defaults(), recursion_bound: None, deadline: None })
    }

    pub fn with_recursion_bound(mut self, bound: u32) -> Self {
        self.recursion_bound = Some(bound);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(timeout);
        self
    }

    pub fn spec(&self) -> &Spec {
        &self.spec
    }

    /// The names, kinds and arities of every top-level definition, for the
    /// `inspect` CLI subcommand.
    pub fn describe_defs(&self) -> Vec<(String, &'static str, usize)> {
        self.spec
            .defs
            .iter()
            .map(|d| match d {
                Def::TypD(t) => (t.id.as_str().to_string(), "type", 0),
                Def::RelD(r) => (r.id.as_str().to_string(), "relation", r.args.len()),
                Def::DecD(f) => (f.id.as_str().to_string(), "function", f.params.len()),
            })
            .collect()
    }

    fn fresh_context(&self) -> Context {
        let mut ctx = Context::new(self.spec.clone()).with_builtins(self.builtins.clone());
        if let Some(bound) = self.recursion_bound {
            ctx = ctx.with_recursion_bound(bound);
        }
        if let Some(timeout) = self.deadline {
            ctx = ctx.with_deadline(Instant::now() + timeout);
        }
        ctx
    }

    /// Runs relation `id` against `inputs` (one JSON value per declared
    /// input slot, in slot order) and reports the output bindings plus the
    /// trace data the run accumulated.
    pub fn run_relation(&self, id: &str, inputs: &[serde_json::Value]) -> Result<RunOutcome, DriverError> {
        let reld = self.spec.find_rel(id).ok_or_else(|| match self.spec.find(id) {
            Some(_) => DriverError::NotARelation { id: id.to_string() },
            None => DriverError::UnboundDef { id: id.to_string() },
        })?;

        if inputs.len() != reld.input_indices.len() {
            return Err(DriverError::ArityMismatch {
                id: id.to_string(),
                expected: reld.input_indices.len(),
                actual: inputs.len(),
            });
        }

        let mut ctx = self.fresh_context();
        for (slot, json) in reld.input_indices.iter().zip(inputs) {
            let arg_exp = &reld.args[*slot];
            let value = json_to_value(&self.spec, json, arg_exp.typ())?;
            if let p4st_ast::Exp::VarE { id, .. } = arg_exp {
                ctx.bind(id.clone(), arg_exp.typ().clone(), value);
            } else {
                return Err(DriverError::InputShape {
                    message: format!("relation `{id}`'s input slot {slot} is not a plain variable"),
                });
            }
        }

        let call_args: Vec<p4st_ast::Exp> = reld.args.clone();
        let call_exp = p4st_ast::Exp::CaseE {
            mixop: reld.mixop.clone(),
            args: call_args,
            typ: p4st_ast::Typ::BoolT,
            region: reld.region.clone(),
        };
        let not_exp = p4st_ast::NotExp { negated: false, exp: call_exp };

        let bindings = p4st_interp::eval_rule(&mut ctx, id, &not_exp, &Interpreter, &reld.region)?;

        Ok(RunOutcome {
            bindings: bindings.into_iter().map(|(k, v)| (k.as_str().to_string(), v)).collect(),
            phantom_log: ctx.phantom_log().to_vec(),
            dependency_graph: ctx.value_graph().to_vec(),
        })
    }

    /// Calls deterministic function `id` against `args` (positional JSON
    /// values matching its declared parameter types) and returns its
    /// result.
    pub fn call_function(&self, id: &str, args: &[serde_json::Value]) -> Result<Value, DriverError> {
        let decd = self.spec.find_dec(id).ok_or_else(|| match self.spec.find(id) {
            Some(_) => DriverError::NotAFunction { id: id.to_string() },
            None => DriverError::UnboundDef { id: id.to_string() },
        })?;

        if args.len() != decd.params.len() {
            return Err(DriverError::ArityMismatch { id: id.to_string(), expected: decd.params.len(), actual: args.len() });
        }

        let mut ctx = self.fresh_context();
        for (param, json) in decd.params.iter().zip(args) {
            let value = json_to_value(&self.spec, json, &param.typ)?;
            ctx.bind(param.id.clone(), param.typ.clone(), value);
        }

        match Interpreter.exec(&mut ctx, &decd.instrs)? {
            Flow::Completed(mut vals) if vals.len() == 1 => Ok(vals.pop().unwrap()),
            Flow::Completed(vals) => {
                Err(DriverError::ArityMismatch { id: id.to_string(), expected: 1, actual: vals.len() })
            }
            Flow::Fallthrough => Err(DriverError::Engine(EngineError::RelFailed {
                rel_id: p4st_ast::Id::new(id),
                region: decd.region.clone(),
            })),
        }
    }
}
