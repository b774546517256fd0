use p4st_ast::{Guard, Typ};
use p4st_env::{Context, EngineError};
use p4st_eval::{Eval, InstrHost};
use p4st_matcher::{match_pattern, Bindings, MatchOutcome};
use p4st_values::{Value, ValueKind};

/// Checks whether `scrutinee`'s dynamic tag agrees with `typ`. `CaseV`/
/// `StructV` are checked nominally against `typ`'s declared type id, a
/// deliberate simplification of full structural subtyping — see
/// `DESIGN.md`.
fn is_subtype(scrutinee: &Value, typ: &Typ) -> bool {
    match (scrutinee.kind(), typ) {
        (ValueKind::BoolV(_), Typ::BoolT) => true,
        (ValueKind::NumV(_), Typ::NumT { .. }) => true,
        (ValueKind::TextV(_), Typ::TextT) => true,
        (ValueKind::ListV(_), Typ::ListT { .. }) => true,
        (ValueKind::TupleV(_), Typ::TupleT { .. }) => true,
        (ValueKind::OptV(_), Typ::OptT { .. }) => true,
        (ValueKind::CaseV(..), Typ::VarT { id, .. }) | (ValueKind::StructV(_), Typ::VarT { id, .. }) => {
            matches!(scrutinee.typ(), Typ::VarT { id: dyn_id, .. } if dyn_id == id)
        }
        _ => false,
    }
}

/// Evaluates one `Case` guard against the scrutinee. Returns the bindings
/// the guard introduces when it holds, or `None` when it does not. Kind
/// disagreements between the guard and the scrutinee's dynamic tag are
/// real runtime errors (the elaborator is assumed to have prevented them),
/// propagated rather than treated as a silent `None`.
pub fn eval_guard(
    guard: &Guard,
    scrutinee: &Value,
    ctx: &mut Context,
    host: &dyn InstrHost,
) -> Result<Option<Bindings>, EngineError> {
    match guard {
        Guard::BoolG(expected) => {
            let region = p4st_ast::Region::synthetic();
            let b = scrutinee.as_bool().map_err(|e| EngineError::kind_mismatch(region, e))?;
            Ok((b == *expected).then(Vec::new))
        }
        Guard::CmpG { op, op_typ, exp } => {
            let rhs = exp.eval(ctx, host)?;
            let holds = p4st_eval::compare_values(*op, *op_typ, scrutinee, &rhs, exp.region())?;
            Ok(holds.then(Vec::new))
        }
        Guard::SubG(typ) => Ok(is_subtype(scrutinee, typ).then(Vec::new)),
        Guard::MatchG(pattern) => match match_pattern(ctx, pattern, scrutinee) {
            MatchOutcome::Matched(bindings) => Ok(Some(bindings)),
            MatchOutcome::NoMatch => Ok(None),
        },
        Guard::MemG(exp) => {
            let list = exp.eval(ctx, host)?;
            let elems = list.as_list().map_err(|e| EngineError::kind_mismatch(exp.region().clone(), e))?;
            Ok(elems.iter().any(|v| v == scrutinee).then(Vec::new))
        }
    }
}
