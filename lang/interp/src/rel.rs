//! Relation invocation: matching input/output argument
//! slots, which are written as `Exp` rather than `Pattern` so that an input
//! slot can itself be a destructuring shape (see `p4st_ast::RelD`'s doc
//! comment). `match_exp_as_pattern` walks an `Exp` the way
//! `p4st_matcher::match_pattern` walks a `Pattern`, treating `VarE` as a
//! binder and every other constructor shape as a structural requirement.

use p4st_ast::{Exp, Id, Lit, NotExp, Region};
use p4st_env::{Context, EngineError};
use p4st_eval::{Eval, Flow, InstrHost};
use p4st_values::{Value, ValueKind};

pub type Bindings = Vec<(Id, Value)>;

#[derive(Debug, Clone, PartialEq)]
pub enum ExpMatchOutcome {
    Matched(Bindings),
    NoMatch,
}

/// Matches a value-level `Exp` template (an input/output argument slot of a
/// `RelD`, or of a `RuleI` call) against a concrete `Value`. `VarE` binds
/// the whole value; literals and mixfix/tuple/list/opt shapes recurse
/// structurally, mirroring `p4st_matcher::match_pattern` one level up in
/// the grammar.
pub fn match_exp_as_pattern(exp: &Exp, value: &Value) -> ExpMatchOutcome {
    match exp {
        Exp::VarE { id, .. } => ExpMatchOutcome::Matched(vec![(id.clone(), value.clone())]),
        Exp::LitE { lit, .. } => {
            if lit_matches(lit, value) {
                ExpMatchOutcome::Matched(vec![])
            } else {
                ExpMatchOutcome::NoMatch
            }
        }
        Exp::CaseE { mixop, args, .. } => match value.kind() {
            ValueKind::CaseV(m, vals) if m == mixop && vals.len() == args.len() => {
                match_all(args, vals)
            }
            _ => ExpMatchOutcome::NoMatch,
        },
        Exp::TupleE { elems, .. } => match value.kind() {
            ValueKind::TupleV(vals) if vals.len() == elems.len() => match_all(elems, vals),
            _ => ExpMatchOutcome::NoMatch,
        },
        Exp::ListE { elems, .. } => match value.kind() {
            ValueKind::ListV(vals) if vals.len() == elems.len() => match_all(elems, vals),
            _ => ExpMatchOutcome::NoMatch,
        },
        Exp::OptE { inner, .. } => match (inner, value.kind()) {
            (Some(e), ValueKind::OptV(Some(v))) => match_exp_as_pattern(e, v),
            (None, ValueKind::OptV(None)) => ExpMatchOutcome::Matched(vec![]),
            _ => ExpMatchOutcome::NoMatch,
        },
        // Any other expression shape is a computed value, not a
        // destructuring template; the caller is expected to have written a
        // `VarE` or one of the structural shapes above for every
        // input/output slot it wants bindings from.
        _ => ExpMatchOutcome::NoMatch,
    }
}

fn match_all(exps: &[Exp], values: &[Value]) -> ExpMatchOutcome {
    let mut bindings = Vec::new();
    for (e, v) in exps.iter().zip(values.iter()) {
        match match_exp_as_pattern(e, v) {
            ExpMatchOutcome::Matched(mut bs) => bindings.append(&mut bs),
            ExpMatchOutcome::NoMatch => return ExpMatchOutcome::NoMatch,
        }
    }
    ExpMatchOutcome::Matched(bindings)
}

fn lit_matches(lit: &Lit, value: &Value) -> bool {
    match lit {
        Lit::BoolL(b) => value.as_bool().map(|v| v == *b).unwrap_or(false),
        Lit::NumL(n) => value.as_num().map(|v| v == n).unwrap_or(false),
        Lit::TextL(s) => value.as_text().map(|v| v == s).unwrap_or(false),
    }
}

fn call_args(exp: &Exp) -> Result<&[Exp], EngineError> {
    match exp {
        Exp::CaseE { args, .. } => Ok(args),
        other => Err(EngineError::kind_mismatch(
            other.region().clone(),
            p4st_values::ValueError::KindMismatch { expected: "mixfix relation call", actual: "other expression" },
        )),
    }
}

/// The callee-side outcome of running a relation's body once: either it
/// produced a `ResultI` whose arity matched the declared output positions,
/// or it fell through (no `ResultI` is failure, not a default value).
enum BodyOutcome {
    Produced(Vec<(usize, Value)>),
    Failed,
}

fn run_rel_body(
    ctx: &mut Context,
    rel_id: &str,
    call: &NotExp,
    host: &dyn InstrHost,
    region: &Region,
) -> Result<BodyOutcome, EngineError> {
    let reld = ctx
        .spec()
        .find_rel(rel_id)
        .cloned()
        .ok_or_else(|| EngineError::Unbound { id: Id::new(rel_id), region: region.clone() })?;

    let caller_args = call_args(&call.exp)?;

    ctx.with_call(region, |ctx| {
        ctx.with_scope(|ctx| -> Result<BodyOutcome, EngineError> {
            // Step 2: bind the callee's own input-position formals against
            // the values the caller supplies.
            for &i in &reld.input_indices {
                let caller_value = caller_args[i].eval(ctx, host)?;
                match match_exp_as_pattern(&reld.args[i], &caller_value) {
                    ExpMatchOutcome::Matched(bindings) => {
                        for (id, v) in bindings {
                            ctx.bind(id, caller_value.typ().clone(), v);
                        }
                    }
                    ExpMatchOutcome::NoMatch => {
                        return Err(EngineError::LetMismatch { region: region.clone() })
                    }
                }
            }

            // Step 3: run the relation body.
            match host.exec(ctx, &reld.instrs)? {
                Flow::Completed(vals) => {
                    let outputs = reld.output_indices();
                    if vals.len() != outputs.len() {
                        return Ok(BodyOutcome::Failed);
                    }
                    Ok(BodyOutcome::Produced(outputs.into_iter().zip(vals).collect()))
                }
                Flow::Fallthrough => Ok(BodyOutcome::Failed),
            }
        })
    })?
}

/// Invokes relation `rel_id`. `call` supplies, per mixop
/// slot, the caller-side expression: evaluated for input slots (in the
/// caller's current scope) to produce the value fed to the callee, and
/// used as a binding template for output slots once the callee produces a
/// `ResultI`. A positive call (`call.negated == false`) whose relation
/// falls through is `RelFailed`; a negated call succeeds (with no
/// bindings) exactly when the relation fails, and is itself `RelFailed`
/// when the relation unexpectedly succeeds.
pub fn eval_rule(
    ctx: &mut Context,
    rel_id: &str,
    call: &NotExp,
    host: &dyn InstrHost,
    region: &Region,
) -> Result<Bindings, EngineError> {
    ctx.check_deadline(region)?;

    let outcome = run_rel_body(ctx, rel_id, call, host, region)?;
    let caller_args = call_args(&call.exp)?;

    match (call.negated, outcome) {
        (false, BodyOutcome::Failed) => {
            Err(EngineError::RelFailed { rel_id: Id::new(rel_id), region: region.clone() })
        }
        (false, BodyOutcome::Produced(produced)) => {
            let mut bindings = Vec::new();
            for (out_idx, value) in produced {
                match match_exp_as_pattern(&caller_args[out_idx], &value) {
                    ExpMatchOutcome::Matched(mut bs) => bindings.append(&mut bs),
                    ExpMatchOutcome::NoMatch => {
                        return Err(EngineError::LetMismatch { region: region.clone() })
                    }
                }
            }
            Ok(bindings)
        }
        (true, BodyOutcome::Failed) => Ok(Vec::new()),
        (true, BodyOutcome::Produced(_)) => {
            Err(EngineError::RelFailed { rel_id: Id::new(rel_id), region: region.clone() })
        }
    }
}
