//! The SL intermediate language: mixfix values, patterns, inductive
//! relations and deterministic functions.
//!
//! This crate only defines the grammar (§6 of the language this engine
//! interprets) and its JSON serialization; evaluation lives in
//! `p4st-values`, `p4st-env`, `p4st-matcher`, `p4st-eval` and
//! `p4st-interp`.

pub mod def;
pub mod exp;
pub mod ident;
pub mod instr;
pub mod lit;
pub mod mixop;
pub mod num;
pub mod pattern;
pub mod phantom;
pub mod region;
pub mod typ;

pub use def::{Def, DecD, RelD, Spec, TypD};
pub use exp::{BinOp, CmpOp, Exp, IterExp, OpTyp, UnOp};
pub use ident::Id;
pub use instr::{Case, Guard, Instr, NotExp};
pub use lit::Lit;
pub use mixop::MixOp;
pub use num::{Num, NumKind};
pub use pattern::Pattern;
pub use phantom::{PathCond, Phantom, Pid};
pub use region::{Position, Region};
pub use typ::{DefTyp, Iter, Param, TParam, Typ};
