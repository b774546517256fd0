//! Structural matching of values against IL patterns.
//!
//! The matcher is total: patterns are finite trees, so structural
//! recursion always terminates, and every case below returns `NoMatch`
//! rather than propagating an error for a shape disagreement.

use p4st_ast::{Id, Lit, Pattern, Typ};
use p4st_env::Context;
use p4st_values::{Value, ValueKind};

/// The bindings a successful match introduces, in pattern-traversal order.
pub type Bindings = Vec<(Id, Value)>;

#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Matched(Bindings),
    NoMatch,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }
}

/// Matches `value` against `pattern`, returning the bindings produced or
/// `NoMatch`. `ctx` is used only to register any new value this match
/// constructs (the middle slice of a `ListP` with a `rest` binder).
pub fn match_pattern(ctx: &mut Context, pattern: &Pattern, value: &Value) -> MatchOutcome {
    match pattern {
        Pattern::WildP { .. } => MatchOutcome::Matched(Vec::new()),
        Pattern::VarP { id, .. } => MatchOutcome::Matched(vec![(id.clone(), value.clone())]),
        Pattern::LitP { lit, .. } => {
            if lit_matches(lit, value) {
                MatchOutcome::Matched(Vec::new())
            } else {
                MatchOutcome::NoMatch
            }
        }
        Pattern::CaseP { mixop, subpatterns, .. } => match value.kind() {
            ValueKind::CaseV(m, args) if m == mixop && args.len() == subpatterns.len() => {
                match_all(ctx, subpatterns, args)
            }
            _ => MatchOutcome::NoMatch,
        },
        Pattern::TupleP { subpatterns, .. } => match value.kind() {
            ValueKind::TupleV(elems) if elems.len() == subpatterns.len() => {
                match_all(ctx, subpatterns, elems)
            }
            _ => MatchOutcome::NoMatch,
        },
        Pattern::ListP { prefix, rest, suffix, .. } => match value.kind() {
            ValueKind::ListV(elems) => match_list(ctx, prefix, rest.as_deref(), suffix, elems, value.typ()),
            _ => MatchOutcome::NoMatch,
        },
    }
}

fn match_all(ctx: &mut Context, patterns: &[Pattern], values: &[Value]) -> MatchOutcome {
    let mut bindings = Vec::new();
    for (p, v) in patterns.iter().zip(values.iter()) {
        match match_pattern(ctx, p, v) {
            MatchOutcome::Matched(mut bs) => bindings.append(&mut bs),
            MatchOutcome::NoMatch => return MatchOutcome::NoMatch,
        }
    }
    MatchOutcome::Matched(bindings)
}

fn match_list(
    ctx: &mut Context,
    prefix: &[Pattern],
    rest: Option<&Pattern>,
    suffix: &[Pattern],
    elems: &[Value],
    list_typ: &Typ,
) -> MatchOutcome {
    let min_len = prefix.len() + suffix.len();
    if elems.len() < min_len {
        return MatchOutcome::NoMatch;
    }
    let (prefix_elems, rem) = elems.split_at(prefix.len());
    let (middle_elems, suffix_elems) = rem.split_at(rem.len() - suffix.len());

    let mut bindings = match match_all(ctx, prefix, prefix_elems) {
        MatchOutcome::Matched(bs) => bs,
        MatchOutcome::NoMatch => return MatchOutcome::NoMatch,
    };
    match match_all(ctx, suffix, suffix_elems) {
        MatchOutcome::Matched(mut bs) => bindings.append(&mut bs),
        MatchOutcome::NoMatch => return MatchOutcome::NoMatch,
    }

    if let Some(rest_pattern) = rest {
        let middle = ctx.make_value(
            ValueKind::ListV(middle_elems.to_vec()),
            list_typ.clone(),
            middle_elems.iter().map(|v| v.vid()).collect(),
        );
        match match_pattern(ctx, rest_pattern, &middle) {
            MatchOutcome::Matched(mut bs) => bindings.append(&mut bs),
            MatchOutcome::NoMatch => return MatchOutcome::NoMatch,
        }
    }

    MatchOutcome::Matched(bindings)
}

fn lit_matches(lit: &Lit, value: &Value) -> bool {
    match lit {
        Lit::BoolL(b) => value.as_bool().map(|v| v == *b).unwrap_or(false),
        Lit::NumL(n) => value.as_num().map(|v| v == n).unwrap_or(false),
        Lit::TextL(s) => value.as_text().map(|v| v == s).unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use p4st_ast::{MixOp, Num, NumKind, Spec};
    use std::rc::Rc;

    fn fresh_ctx() -> Context {
        Context::new(Rc::new(Spec::default()))
    }

    #[test]
    fn wildcard_matches_anything_without_binding() {
        let mut ctx = fresh_ctx();
        let outcome = match_pattern(&mut ctx, &Pattern::wild(), &Value::boolean(true));
        assert_eq!(outcome, MatchOutcome::Matched(vec![]));
    }

    #[test]
    fn variable_binds_the_full_value() {
        let mut ctx = fresh_ctx();
        let v = Value::boolean(true);
        let outcome = match_pattern(&mut ctx, &Pattern::var("x"), &v);
        assert_eq!(outcome, MatchOutcome::Matched(vec![(Id::new("x"), v)]));
    }

    #[test]
    fn literal_pattern_requires_structural_equality() {
        let mut ctx = fresh_ctx();
        let lit = Lit::NumL(Num::nat(BigInt::from(3)));
        let matching = Value::num(Num::nat(BigInt::from(3)), Typ::NumT { num_kind: NumKind::Nat });
        let other = Value::num(Num::nat(BigInt::from(4)), Typ::NumT { num_kind: NumKind::Nat });
        assert!(match_pattern(&mut ctx, &Pattern::LitP { lit: lit.clone(), region: None }, &matching).is_match());
        assert!(!match_pattern(&mut ctx, &Pattern::LitP { lit, region: None }, &other).is_match());
    }

    #[test]
    fn case_pattern_requires_matching_mixop_and_arity() {
        let mut ctx = fresh_ctx();
        let mixop = MixOp::atom("Some");
        let typ = Typ::var("Option", vec![]);
        let value = Value::case(mixop.clone(), vec![Value::boolean(true)], typ.clone());
        let pattern = Pattern::CaseP {
            mixop: mixop.clone(),
            subpatterns: vec![Pattern::var("x")],
            region: None,
        };
        let outcome = match_pattern(&mut ctx, &pattern, &value);
        assert_eq!(outcome, MatchOutcome::Matched(vec![(Id::new("x"), Value::boolean(true))]));

        let wrong_mixop = Pattern::CaseP { mixop: MixOp::atom("None"), subpatterns: vec![], region: None };
        assert!(!match_pattern(&mut ctx, &wrong_mixop, &value).is_match());
    }

    #[test]
    fn list_pattern_binds_middle_slice_to_rest() {
        let mut ctx = fresh_ctx();
        let elem_typ = Typ::BoolT;
        let elems = vec![Value::boolean(true), Value::boolean(false), Value::boolean(true), Value::boolean(true)];
        let list = Value::list(elems.clone(), Typ::list(elem_typ));
        let pattern = Pattern::ListP {
            prefix: vec![Pattern::var("a")],
            rest: Some(Box::new(Pattern::var("mid"))),
            suffix: vec![Pattern::var("b")],
            region: None,
        };
        match match_pattern(&mut ctx, &pattern, &list) {
            MatchOutcome::Matched(bindings) => {
                assert_eq!(bindings[0], (Id::new("a"), elems[0].clone()));
                assert_eq!(bindings[1], (Id::new("b"), elems[3].clone()));
                let (_, mid_val) = &bindings[2];
                assert_eq!(mid_val.as_list().unwrap(), &elems[1..3]);
            }
            MatchOutcome::NoMatch => panic!("expected a match"),
        }
    }

    #[test]
    fn list_pattern_fails_when_shorter_than_prefix_and_suffix() {
        let mut ctx = fresh_ctx();
        let list = Value::list(vec![Value::boolean(true)], Typ::list(Typ::BoolT));
        let pattern = Pattern::ListP {
            prefix: vec![Pattern::var("a")],
            rest: None,
            suffix: vec![Pattern::var("b")],
            region: None,
        };
        assert!(!match_pattern(&mut ctx, &pattern, &list).is_match());
    }
}
