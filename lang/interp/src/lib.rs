//! The IL instruction interpreter and relation evaluator.
//!
//! This crate closes the mutually recursive `Exp -> Instr -> Exp` loop:
//! `p4st-eval` evaluates expressions against the [`p4st_eval::InstrHost`]
//! trait for anything that must run an instruction list (`CallE`); this
//! crate implements that trait over the actual `Instr` executor, and in
//! turn calls back into `p4st-eval::Eval` for every `Exp` it meets.

mod guard;
mod instr;
mod rel;

pub use guard::eval_guard;
pub use instr::{exec_instrs, Interpreter};
pub use rel::{eval_rule, match_exp_as_pattern};

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use num_bigint::BigInt;
    use p4st_ast::*;
    use p4st_env::{Context, EngineError};
    use p4st_eval::Flow;
    use p4st_values::Value;

    use super::*;

    fn region() -> Region {
        Region::synthetic()
    }

    fn nat_typ() -> Typ {
        Typ::NumT { num_kind: NumKind::Nat }
    }

    fn nat_lit(n: i64) -> Exp {
        Exp::LitE { lit: Lit::NumL(Num::nat(BigInt::from(n))), typ: nat_typ(), region: region() }
    }

    fn bool_lit(b: bool) -> Exp {
        Exp::LitE { lit: Lit::BoolL(b), typ: Typ::BoolT, region: region() }
    }

    fn fresh_ctx() -> Context {
        Context::new(Rc::new(Spec::default()))
    }

    /// An `IfI(false, ..., phantom=Some(7))` inside a relation logs phantom 7
    /// and the relation reports `RelFailed`.
    #[test]
    fn false_if_with_phantom_logs_it_and_relation_fails() {
        let mut ctx = fresh_ctx();
        let phantom = Phantom { pid: Pid(7), conds: vec![PathCond::PlainC { exp: bool_lit(false) }] };
        let instrs = vec![Instr::IfI {
            cond: bool_lit(false),
            iters: vec![],
            body: vec![Instr::ResultI { exps: vec![nat_lit(1)], region: region() }],
            phantom: Some(phantom),
            region: region(),
        }];
        let interp = Interpreter;
        let flow = exec_instrs(&mut ctx, &instrs, &interp).unwrap();
        assert_eq!(flow, Flow::Fallthrough);
        assert_eq!(ctx.phantom_log().len(), 1);
        assert_eq!(ctx.phantom_log()[0].pid, Pid(7));
    }

    /// `LetI(CaseP("Some", [x]), OptV(None))` fails with `LetMismatch`.
    #[test]
    fn let_pattern_mismatch_is_an_error() {
        let mut ctx = fresh_ctx();
        let opt_typ = Typ::opt(Typ::BoolT);
        let none_exp = Exp::OptE { inner: None, typ: opt_typ.clone(), region: region() };
        let pattern = Pattern::CaseP {
            mixop: MixOp::atom("Some"),
            subpatterns: vec![Pattern::var("x")],
            region: None,
        };
        let instrs = vec![Instr::LetI { lhs: pattern, rhs: none_exp, iters: vec![], region: region() }];
        let interp = Interpreter;
        let err = exec_instrs(&mut ctx, &instrs, &interp).unwrap_err();
        assert!(matches!(err, EngineError::LetMismatch { .. }));
    }

    /// When an earlier `MatchG` case fails and a later one succeeds, no
    /// phantom is logged for the intervening case.
    #[test]
    fn case_phantom_not_logged_when_a_later_case_matches() {
        let mut ctx = fresh_ctx();
        let scrutinee = nat_lit(2);
        let phantom = Phantom { pid: Pid(1), conds: vec![] };
        let cases = vec![
            Case {
                guard: Guard::MatchG(Pattern::LitP { lit: Lit::NumL(Num::nat(BigInt::from(1))), region: None }),
                body: vec![Instr::ResultI { exps: vec![nat_lit(100)], region: region() }],
            },
            Case {
                guard: Guard::MatchG(Pattern::var("x")),
                body: vec![Instr::ResultI { exps: vec![nat_lit(200)], region: region() }],
            },
        ];
        let instrs =
            vec![Instr::CaseI { scrutinee, cases, phantom: Some(phantom), region: region() }];
        let interp = Interpreter;
        let flow = exec_instrs(&mut ctx, &instrs, &interp).unwrap();
        assert_eq!(flow, Flow::Completed(vec![Value::num(Num::nat(BigInt::from(200)), nat_typ())]));
        assert!(ctx.phantom_log().is_empty());
    }

    /// A `CaseI` with no matching case and no `OtherwiseI` records its
    /// phantom and falls through.
    #[test]
    fn case_with_no_match_and_no_otherwise_falls_through_and_logs_phantom() {
        let mut ctx = fresh_ctx();
        let scrutinee = nat_lit(9);
        let cases = vec![Case {
            guard: Guard::MatchG(Pattern::LitP { lit: Lit::NumL(Num::nat(BigInt::from(1))), region: None }),
            body: vec![Instr::ResultI { exps: vec![nat_lit(1)], region: region() }],
        }];
        let phantom = Phantom { pid: Pid(42), conds: vec![] };
        let instrs =
            vec![Instr::CaseI { scrutinee, cases, phantom: Some(phantom), region: region() }];
        let interp = Interpreter;
        let flow = exec_instrs(&mut ctx, &instrs, &interp).unwrap();
        assert_eq!(flow, Flow::Fallthrough);
        assert_eq!(ctx.phantom_log()[0].pid, Pid(42));
    }

    /// A relation whose body never reaches `ResultI` reports `RelFailed`
    /// to its caller.
    #[test]
    fn relation_without_result_instr_fails() {
        let rel = RelD {
            id: Id::new("Never"),
            mixop: MixOp::new(vec!["", "~>", ""].iter().map(|s| s.to_string()).collect()),
            input_indices: vec![0],
            args: vec![
                Exp::VarE { id: Id::new("x"), typ: nat_typ(), region: region() },
                Exp::VarE { id: Id::new("y"), typ: nat_typ(), region: region() },
            ],
            instrs: vec![Instr::IfI {
                cond: bool_lit(false),
                iters: vec![],
                body: vec![Instr::ResultI { exps: vec![nat_lit(1)], region: region() }],
                phantom: None,
                region: region(),
            }],
            region: region(),
        };
        let spec = Spec::new(vec![Def::RelD(rel)]);
        let mut ctx = Context::new(Rc::new(spec));
        let call_exp = Exp::CaseE {
            mixop: MixOp::new(vec!["", "~>", ""].iter().map(|s| s.to_string()).collect()),
            args: vec![nat_lit(1), Exp::VarE { id: Id::new("out"), typ: nat_typ(), region: region() }],
            typ: Typ::BoolT,
            region: region(),
        };
        let interp = Interpreter;
        let err = eval_rule(&mut ctx, "Never", &NotExp { negated: false, exp: call_exp }, &interp, &region())
            .unwrap_err();
        assert!(matches!(err, EngineError::RelFailed { .. }));
    }
}
