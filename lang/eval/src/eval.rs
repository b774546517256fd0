use p4st_ast::{BinOp, Exp, Iter, Lit, NumKind, OpTyp, Typ};
use p4st_env::{Context, EngineError};
use p4st_matcher::{match_pattern, MatchOutcome};
use p4st_values::{Value, ValueError, ValueKind};

use crate::host::{Flow, InstrHost};
use crate::ops::{apply_bin_bool, apply_bin_bool_lhs, apply_bin_num, apply_cmp, apply_un};

/// Evaluates a pure expression against a context, dispatching on the
/// `Exp` variant. `host` runs a callee's instruction list for
/// `CallE`/relation-backed iteration — see [`InstrHost`].
pub trait Eval {
    fn eval(&self, ctx: &mut Context, host: &dyn InstrHost) -> Result<Value, EngineError>;
}

impl Eval for Exp {
    fn eval(&self, ctx: &mut Context, host: &dyn InstrHost) -> Result<Value, EngineError> {
        log::trace!("eval {self:?}");
        match self {
            Exp::VarE { id, region, .. } => {
                let (_, v) = ctx.lookup(id.as_str(), region)?;
                Ok(v.clone())
            }
            Exp::LitE { lit, typ, .. } => Ok(ctx.make_value(lit_kind(lit), typ.clone(), vec![])),
            Exp::UnE { op, op_typ, exp, typ, region } => {
                let v = exp.eval(ctx, host)?;
                let (b, n) = apply_un(*op, *op_typ, &v, region)?;
                let kind = match n {
                    Some(n) => ValueKind::NumV(n),
                    None => ValueKind::BoolV(b),
                };
                Ok(ctx.make_value(kind, typ.clone(), vec![v.vid()]))
            }
            Exp::BinE { op, op_typ, lhs, rhs, typ, region } => {
                eval_bin(*op, *op_typ, lhs, rhs, typ, region, ctx, host)
            }
            Exp::CmpE { op, op_typ, lhs, rhs, typ, region } => {
                let lv = lhs.eval(ctx, host)?;
                let rv = rhs.eval(ctx, host)?;
                let b = apply_cmp(*op, *op_typ, &lv, &rv, region)?;
                Ok(ctx.make_value(ValueKind::BoolV(b), typ.clone(), vec![lv.vid(), rv.vid()]))
            }
            Exp::CaseE { mixop, args, typ, .. } => {
                let (vals, deps) = eval_all(args, ctx, host)?;
                Ok(ctx.make_value(ValueKind::CaseV(mixop.clone(), vals), typ.clone(), deps))
            }
            Exp::TupleE { elems, typ, .. } => {
                let (vals, deps) = eval_all(elems, ctx, host)?;
                Ok(ctx.make_value(ValueKind::TupleV(vals), typ.clone(), deps))
            }
            Exp::ListE { elems, typ, .. } => {
                let (vals, deps) = eval_all(elems, ctx, host)?;
                Ok(ctx.make_value(ValueKind::ListV(vals), typ.clone(), deps))
            }
            Exp::OptE { inner, typ, .. } => match inner {
                Some(e) => {
                    let v = e.eval(ctx, host)?;
                    let dep = v.vid();
                    Ok(ctx.make_value(ValueKind::OptV(Some(v)), typ.clone(), vec![dep]))
                }
                None => Ok(ctx.make_value(ValueKind::OptV(None), typ.clone(), vec![])),
            },
            Exp::DotE { base, field, region, .. } => {
                let b = base.eval(ctx, host)?;
                let v = b
                    .as_struct_field(field.as_str())
                    .map_err(|e| EngineError::kind_mismatch(region.clone(), e))?
                    .clone();
                Ok(v)
            }
            Exp::IdxE { base, index, region, .. } => {
                let b = base.eval(ctx, host)?;
                let elems = b.as_tuple().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?;
                elems
                    .get(*index)
                    .cloned()
                    .ok_or_else(|| EngineError::kind_mismatch(region.clone(), ValueError::KindMismatch { expected: "in-range tuple index", actual: "out-of-range index" }))
            }
            Exp::HeadE { base, region, .. } => {
                let b = base.eval(ctx, host)?;
                let elems = b.as_list().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?;
                elems.first().cloned().ok_or_else(|| EngineError::EmptyList { region: region.clone() })
            }
            Exp::TailE { base, typ, region } => {
                let b = base.eval(ctx, host)?;
                let elems = b.as_list().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?;
                if elems.is_empty() {
                    return Err(EngineError::EmptyList { region: region.clone() });
                }
                let tail: Vec<Value> = elems[1..].to_vec();
                let deps: Vec<_> = tail.iter().map(|v| v.vid()).collect();
                Ok(ctx.make_value(ValueKind::ListV(tail), typ.clone(), deps))
            }
            Exp::LenE { base, typ, .. } => {
                let b = base.eval(ctx, host)?;
                let len = b.as_list().map(|l| l.len()).or_else(|_| b.as_tuple().map(|t| t.len()))
                    .map_err(|e| EngineError::kind_mismatch(base.region().clone(), e))?;
                let dep = b.vid();
                Ok(ctx.make_value(ValueKind::NumV(p4st_ast::Num::nat(num_bigint::BigInt::from(len))), typ.clone(), vec![dep]))
            }
            Exp::MemE { elem, list, typ, region } => {
                let ev = elem.eval(ctx, host)?;
                let lv = list.eval(ctx, host)?;
                let elems = lv.as_list().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?;
                let found = elems.iter().any(|v| v == &ev);
                Ok(ctx.make_value(ValueKind::BoolV(found), typ.clone(), vec![ev.vid(), lv.vid()]))
            }
            Exp::CatE { lhs, rhs, typ, region } => {
                let lv = lhs.eval(ctx, host)?;
                let rv = rhs.eval(ctx, host)?;
                let mut elems = lv.as_list().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?.to_vec();
                let rest = rv.as_list().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?;
                elems.extend_from_slice(rest);
                let deps = vec![lv.vid(), rv.vid()];
                Ok(ctx.make_value(ValueKind::ListV(elems), typ.clone(), deps))
            }
            Exp::IterE { exp, iter_exp, typ, region } => eval_iter(exp, iter_exp, typ, region, ctx, host),
            Exp::CallE { id, args, typ, region } => eval_call(id, args, typ, region, ctx, host),
            Exp::CaseMatchE { scrutinee, arms, region, .. } => {
                let scrut = scrutinee.eval(ctx, host)?;
                for (pattern, body) in arms {
                    match match_pattern(ctx, pattern, &scrut) {
                        MatchOutcome::Matched(bindings) => {
                            return ctx.with_scope(|inner| {
                                for (id, v) in bindings {
                                    inner.bind(id, scrut.typ().clone(), v);
                                }
                                body.eval(inner, host)
                            });
                        }
                        MatchOutcome::NoMatch => continue,
                    }
                }
                Err(EngineError::LetMismatch { region: region.clone() })
            }
        }
    }
}

fn lit_kind(lit: &Lit) -> ValueKind {
    match lit {
        Lit::BoolL(b) => ValueKind::BoolV(*b),
        Lit::NumL(n) => ValueKind::NumV(n.clone()),
        Lit::TextL(s) => ValueKind::TextV(s.clone()),
    }
}

fn eval_all(exps: &[Exp], ctx: &mut Context, host: &dyn InstrHost) -> Result<(Vec<Value>, Vec<p4st_values::Vid>), EngineError> {
    let mut vals = Vec::with_capacity(exps.len());
    for e in exps {
        vals.push(e.eval(ctx, host)?);
    }
    let deps = vals.iter().map(|v| v.vid()).collect();
    Ok((vals, deps))
}

fn eval_bin(
    op: BinOp,
    op_typ: OpTyp,
    lhs: &Exp,
    rhs: &Exp,
    typ: &Typ,
    region: &p4st_ast::Region,
    ctx: &mut Context,
    host: &dyn InstrHost,
) -> Result<Value, EngineError> {
    if matches!(op_typ, OpTyp::Bool) {
        let lv = lhs.eval(ctx, host)?;
        let lb = lv.as_bool().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?;
        if let Some(short) = apply_bin_bool_lhs(op, lb) {
            return Ok(ctx.make_value(ValueKind::BoolV(short), typ.clone(), vec![lv.vid()]));
        }
        let rv = rhs.eval(ctx, host)?;
        let rb = rv.as_bool().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?;
        let b = apply_bin_bool(op, lb, rb, region)?;
        return Ok(ctx.make_value(ValueKind::BoolV(b), typ.clone(), vec![lv.vid(), rv.vid()]));
    }
    let lv = lhs.eval(ctx, host)?;
    let rv = rhs.eval(ctx, host)?;
    let kind = match op_typ {
        OpTyp::Num(k) => k,
        _ => NumKind::Nat,
    };
    let ln = lv.as_num().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?;
    let rn = rv.as_num().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?;
    let result = apply_bin_num(op, kind, ln, rn, region)?;
    Ok(ctx.make_value(ValueKind::NumV(result), typ.clone(), vec![lv.vid(), rv.vid()]))
}

fn eval_iter(
    exp: &Exp,
    iter_exp: &p4st_ast::IterExp,
    typ: &Typ,
    region: &p4st_ast::Region,
    ctx: &mut Context,
    host: &dyn InstrHost,
) -> Result<Value, EngineError> {
    match iter_exp.iter {
        Iter::Opt => {
            let mut all_some = true;
            let mut inner_vals = Vec::with_capacity(iter_exp.binders.len());
            for (id, lifted) in &iter_exp.binders {
                let lv = lifted.eval(ctx, host)?;
                match lv.as_opt().map_err(|e| EngineError::kind_mismatch(region.clone(), e))? {
                    Some(v) => inner_vals.push((id.clone(), v.clone())),
                    None => {
                        all_some = false;
                        break;
                    }
                }
            }
            if !all_some {
                return Ok(ctx.make_value(ValueKind::OptV(None), typ.clone(), vec![]));
            }
            let result = ctx.with_scope(|inner| {
                for (id, v) in &inner_vals {
                    inner.bind(id.clone(), v.typ().clone(), v.clone());
                }
                exp.eval(inner, host)
            })?;
            let dep = result.vid();
            Ok(ctx.make_value(ValueKind::OptV(Some(result)), typ.clone(), vec![dep]))
        }
        Iter::List => {
            let mut lists = Vec::with_capacity(iter_exp.binders.len());
            for (id, lifted) in &iter_exp.binders {
                let lv = lifted.eval(ctx, host)?;
                let elems = lv.as_list().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?.to_vec();
                lists.push((id.clone(), elems));
            }
            let len = match lists.first() {
                Some((_, elems)) => elems.len(),
                None => 0,
            };
            if lists.iter().any(|(_, elems)| elems.len() != len) {
                return Err(EngineError::IterLengthMismatch { region: region.clone() });
            }
            let mut results = Vec::with_capacity(len);
            for i in 0..len {
                let r = ctx.with_scope(|inner| {
                    for (id, elems) in &lists {
                        inner.bind(id.clone(), elems[i].typ().clone(), elems[i].clone());
                    }
                    exp.eval(inner, host)
                })?;
                results.push(r);
            }
            let deps = results.iter().map(|v| v.vid()).collect();
            Ok(ctx.make_value(ValueKind::ListV(results), typ.clone(), deps))
        }
    }
}


fn eval_call(
    id: &p4st_ast::Id,
    args: &[Exp],
    typ: &Typ,
    region: &p4st_ast::Region,
    ctx: &mut Context,
    host: &dyn InstrHost,
) -> Result<Value, EngineError> {
    let (arg_vals, deps) = eval_all(args, ctx, host)?;

    if ctx.builtins().contains(id.as_str()) {
        let result = ctx.builtins().call(id.as_str(), &arg_vals)?;
        return Ok(ctx.make_value(result.kind().clone(), typ.clone(), deps));
    }

    let dec = ctx
        .spec()
        .find_dec(id.as_str())
        .cloned()
        .ok_or_else(|| EngineError::Unbound { id: id.clone(), region: region.clone() })?;

    ctx.with_call(region, |ctx| {
        ctx.with_scope(|ctx| {
            for (param, val) in dec.params.iter().zip(arg_vals.iter()) {
                ctx.bind(param.id.clone(), param.typ.clone(), val.clone());
            }
            match host.exec(ctx, &dec.instrs)? {
                Flow::Completed(mut vals) if vals.len() == 1 => Ok(vals.remove(0)),
                Flow::Completed(_) => Err(EngineError::RelFailed { rel_id: id.clone(), region: region.clone() }),
                Flow::Fallthrough => Err(EngineError::RelFailed { rel_id: id.clone(), region: region.clone() }),
            }
        })
    })?
}
