//! The instruction-list executor: `IfI`, `CaseI`,
//! `OtherwiseI`, `LetI`, `RuleI`, `ResultI`, `ReturnI`.

use p4st_ast::{Exp, Id, Instr, Iter, IterExp, NotExp, Pattern, Region, Typ};
use p4st_env::{Context, EngineError};
use p4st_eval::{Eval, Flow, InstrHost};
use p4st_matcher::{match_pattern, MatchOutcome};
use p4st_values::Value;

use crate::guard::eval_guard;
use crate::rel::{eval_rule, Bindings};

/// The `p4st_eval::InstrHost` implementation: evaluating a `CallE` or a
/// `CallE`-driven relation needs to run the callee's instruction list,
/// which is this crate's job. Zero-sized; all state lives on `Context`.
pub struct Interpreter;

impl InstrHost for Interpreter {
    fn exec(&self, ctx: &mut Context, instrs: &[Instr]) -> Result<Flow, EngineError> {
        exec_instrs(ctx, instrs, self)
    }
}

/// Runs an instruction list to completion or fallthrough.
pub fn exec_instrs(ctx: &mut Context, instrs: &[Instr], host: &dyn InstrHost) -> Result<Flow, EngineError> {
    for instr in instrs {
        match exec_instr(ctx, instr, host)? {
            Flow::Completed(vals) => return Ok(Flow::Completed(vals)),
            Flow::Fallthrough => continue,
        }
    }
    Ok(Flow::Fallthrough)
}

fn exec_instr(ctx: &mut Context, instr: &Instr, host: &dyn InstrHost) -> Result<Flow, EngineError> {
    match instr {
        Instr::IfI { cond, iters, body, phantom, region } => {
            ctx.check_deadline(region)?;
            let holds = eval_forall(ctx, host, iters, cond, region)?;
            if holds {
                ctx.with_guard(cond.clone(), |ctx| exec_instrs(ctx, body, host))
            } else {
                if let Some(p) = phantom {
                    ctx.record_phantom(p.pid);
                }
                Ok(Flow::Fallthrough)
            }
        }
        Instr::CaseI { scrutinee, cases, phantom, region } => {
            ctx.check_deadline(region)?;
            let scrut = scrutinee.eval(ctx, host)?;
            for case in cases {
                if let Some(bindings) = eval_guard(&case.guard, &scrut, ctx, host)? {
                    return ctx.with_scope(|ctx| {
                        for (id, v) in bindings {
                            ctx.bind(id, v.typ().clone(), v);
                        }
                        exec_instrs(ctx, &case.body, host)
                    });
                }
            }
            if let Some(p) = phantom {
                ctx.record_phantom(p.pid);
            }
            Ok(Flow::Fallthrough)
        }
        // `OtherwiseI` is, by IL construction, only ever the sole
        // instruction of a `CaseI`'s last case; its guard
        // always holds by the time it is reached, so executing it reduces
        // to running its inner instruction.
        Instr::OtherwiseI { inner, .. } => exec_instr(ctx, inner, host),
        Instr::LetI { lhs, rhs, iters, region } => {
            if iters.is_empty() {
                let rhs_val = rhs.eval(ctx, host)?;
                match match_pattern(ctx, lhs, &rhs_val) {
                    MatchOutcome::Matched(bindings) => {
                        for (id, v) in bindings {
                            ctx.bind(id, v.typ().clone(), v);
                        }
                        Ok(Flow::Fallthrough)
                    }
                    MatchOutcome::NoMatch => Err(EngineError::LetMismatch { region: region.clone() }),
                }
            } else {
                let var_ids = pattern_vars(lhs);
                let bindings = eval_iterated(
                    ctx,
                    host,
                    iters,
                    region,
                    &var_ids,
                    rhs.typ().clone(),
                    &mut |ctx, host| {
                        let rhs_val = rhs.eval(ctx, host)?;
                        match match_pattern(ctx, lhs, &rhs_val) {
                            MatchOutcome::Matched(bs) => Ok(bs),
                            MatchOutcome::NoMatch => Err(EngineError::LetMismatch { region: region.clone() }),
                        }
                    },
                )?;
                for (id, v) in bindings {
                    ctx.bind(id, v.typ().clone(), v);
                }
                Ok(Flow::Fallthrough)
            }
        }
        Instr::RuleI { rel_id, call, iters, region } => {
            if iters.is_empty() {
                eval_rule(ctx, rel_id.as_str(), call, host, region)?
                    .into_iter()
                    .for_each(|(id, v)| ctx.bind(id, v.typ().clone(), v));
                Ok(Flow::Fallthrough)
            } else {
                let var_ids = exp_call_output_vars(call);
                let bindings = eval_iterated(
                    ctx,
                    host,
                    iters,
                    region,
                    &var_ids,
                    Typ::BoolT,
                    &mut |ctx, host| eval_rule(ctx, rel_id.as_str(), call, host, region),
                )?;
                for (id, v) in bindings {
                    ctx.bind(id, v.typ().clone(), v);
                }
                Ok(Flow::Fallthrough)
            }
        }
        Instr::ResultI { exps, .. } => {
            let mut vals = Vec::with_capacity(exps.len());
            for e in exps {
                vals.push(e.eval(ctx, host)?);
            }
            Ok(Flow::Completed(vals))
        }
        Instr::ReturnI { exp, .. } => Ok(Flow::Completed(vec![exp.eval(ctx, host)?])),
    }
}

/// Identifiers a pattern binds, in traversal order; used to know which
/// variable names a zero-iteration `LetI`/`RuleI` must still bind (to
/// empty lifted containers) even though its body never ran.
fn pattern_vars(pattern: &Pattern) -> Vec<Id> {
    let mut out = Vec::new();
    collect_pattern_vars(pattern, &mut out);
    out
}

fn collect_pattern_vars(pattern: &Pattern, out: &mut Vec<Id>) {
    match pattern {
        Pattern::WildP { .. } | Pattern::LitP { .. } => {}
        Pattern::VarP { id, .. } => out.push(id.clone()),
        Pattern::CaseP { subpatterns, .. } | Pattern::TupleP { subpatterns, .. } => {
            for p in subpatterns {
                collect_pattern_vars(p, out);
            }
        }
        Pattern::ListP { prefix, rest, suffix, .. } => {
            for p in prefix {
                collect_pattern_vars(p, out);
            }
            if let Some(r) = rest {
                collect_pattern_vars(r, out);
            }
            for p in suffix {
                collect_pattern_vars(p, out);
            }
        }
    }
}

/// The identifiers a `RuleI` call's output-position expressions bind, for
/// the same zero-iteration bookkeeping as `pattern_vars`.
fn exp_call_output_vars(call: &NotExp) -> Vec<Id> {
    let mut out = Vec::new();
    if let Exp::CaseE { args, .. } = &call.exp {
        for a in args {
            collect_exp_vars(a, &mut out);
        }
    }
    out
}

fn collect_exp_vars(exp: &Exp, out: &mut Vec<Id>) {
    match exp {
        Exp::VarE { id, .. } => out.push(id.clone()),
        Exp::CaseE { args, .. } | Exp::TupleE { elems: args, .. } | Exp::ListE { elems: args, .. } => {
            for a in args {
                collect_exp_vars(a, out);
            }
        }
        Exp::OptE { inner: Some(e), .. } => collect_exp_vars(e, out),
        _ => {}
    }
}

/// Evaluates `cond` under the forall quantification `iters` introduces
/// (`PathCond::ForallC`): nested `List`-kind groups are zipped
/// per group and combined by conjunction across rows (`Opt` runs its
/// single row or is vacuously satisfied when absent). An empty `iters`
/// list is the non-iterated base case: evaluate `cond` directly.
fn eval_forall(
    ctx: &mut Context,
    host: &dyn InstrHost,
    iters: &[IterExp],
    cond: &Exp,
    region: &Region,
) -> Result<bool, EngineError> {
    match iters.split_first() {
        None => cond.eval(ctx, host).and_then(|v| v.as_bool().map_err(|e| EngineError::kind_mismatch(region.clone(), e))),
        Some((head, rest)) => {
            let rows = gather_rows(ctx, host, head, region)?;
            for row in rows {
                let ok = ctx.with_scope(|ctx| {
                    for (id, v) in &row {
                        ctx.bind(id.clone(), v.typ().clone(), v.clone());
                    }
                    eval_forall(ctx, host, rest, cond, region)
                })?;
                if !ok {
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }
}

/// Materializes the concrete per-row bindings a single `IterExp` group
/// produces: for `List`, one row per index of the common-length binders
/// (`IterLengthMismatch` if they disagree); for `Opt`, zero rows if any
/// binder is `None`, one row if all are `Some`.
fn gather_rows(
    ctx: &mut Context,
    host: &dyn InstrHost,
    group: &IterExp,
    region: &Region,
) -> Result<Vec<Bindings>, EngineError> {
    match group.iter {
        Iter::List => {
            let mut lists = Vec::with_capacity(group.binders.len());
            for (id, lifted) in &group.binders {
                let v = lifted.eval(ctx, host)?;
                let elems = v.as_list().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?.to_vec();
                lists.push((id.clone(), elems));
            }
            let len = lists.first().map(|(_, e)| e.len()).unwrap_or(0);
            if lists.iter().any(|(_, e)| e.len() != len) {
                return Err(EngineError::IterLengthMismatch { region: region.clone() });
            }
            Ok((0..len).map(|i| lists.iter().map(|(id, e)| (id.clone(), e[i].clone())).collect()).collect())
        }
        Iter::Opt => {
            let mut row = Vec::with_capacity(group.binders.len());
            for (id, lifted) in &group.binders {
                let v = lifted.eval(ctx, host)?;
                match v.as_opt().map_err(|e| EngineError::kind_mismatch(region.clone(), e))? {
                    Some(inner) => row.push((id.clone(), inner.clone())),
                    None => return Ok(Vec::new()),
                }
            }
            Ok(vec![row])
        }
    }
}

/// Runs `leaf` once per combination of the (possibly nested) `iters`
/// groups, collecting its `Bindings` per row and re-lifting them into
/// `ListV`/`OptV`-wrapped values keyed by `var_ids`, in traversal order
/// (bindings from an iteration are introduced as lifted values).
/// `fallback_typ` supplies the element type when zero rows ran
/// (the pattern/output template still names its variables; there is simply
/// no value to derive their type from).
fn eval_iterated(
    ctx: &mut Context,
    host: &dyn InstrHost,
    iters: &[IterExp],
    region: &Region,
    var_ids: &[Id],
    fallback_typ: Typ,
    leaf: &mut dyn FnMut(&mut Context, &dyn InstrHost) -> Result<Bindings, EngineError>,
) -> Result<Bindings, EngineError> {
    let rows = collect_leaf_bindings(ctx, host, iters, region, leaf)?;
    let outer_iter = iters.last().map(|g| g.iter).unwrap_or(Iter::List);

    if rows.is_empty() {
        return Ok(var_ids
            .iter()
            .map(|id| match outer_iter {
                Iter::List => (id.clone(), Value::list(vec![], Typ::list(fallback_typ.clone()))),
                Iter::Opt => (id.clone(), Value::opt(None, Typ::opt(fallback_typ.clone()))),
            })
            .collect());
    }

    let mut result = Vec::with_capacity(var_ids.len());
    for id in var_ids {
        let per_row: Vec<Value> = rows
            .iter()
            .filter_map(|row| row.iter().find(|(rid, _)| rid == id).map(|(_, v)| v.clone()))
            .collect();
        let lifted = match outer_iter {
            Iter::List => {
                let elem_typ = per_row.first().map(|v| v.typ().clone()).unwrap_or_else(|| fallback_typ.clone());
                Value::list(per_row, Typ::list(elem_typ))
            }
            Iter::Opt => {
                let inner = per_row.into_iter().next();
                let elem_typ = inner.as_ref().map(|v| v.typ().clone()).unwrap_or_else(|| fallback_typ.clone());
                Value::opt(inner, Typ::opt(elem_typ))
            }
        };
        result.push((id.clone(), lifted));
    }
    Ok(result)
}

fn collect_leaf_bindings(
    ctx: &mut Context,
    host: &dyn InstrHost,
    iters: &[IterExp],
    region: &Region,
    leaf: &mut dyn FnMut(&mut Context, &dyn InstrHost) -> Result<Bindings, EngineError>,
) -> Result<Vec<Bindings>, EngineError> {
    match iters.split_first() {
        None => Ok(vec![leaf(ctx, host)?]),
        Some((head, rest)) => {
            let rows = gather_rows(ctx, host, head, region)?;
            let mut out = Vec::with_capacity(rows.len());
            for row in rows {
                let nested = ctx.with_scope(|ctx| {
                    for (id, v) in &row {
                        ctx.bind(id.clone(), v.typ().clone(), v.clone());
                    }
                    collect_leaf_bindings(ctx, host, rest, region, leaf)
                })?;
                out.extend(nested);
            }
            Ok(out)
        }
    }
}
