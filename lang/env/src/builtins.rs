use std::collections::HashMap;
use std::rc::Rc;

use num_traits::Zero;
use p4st_ast::{NumKind, Typ};
use p4st_values::Value;

use crate::error::EngineError;

type BuiltinFn = Rc<dyn Fn(&[Value]) -> Result<Value, EngineError>>;

/// The registry of built-in functions the evaluator can `Call`. Built-ins
/// are specified only by their external behavior; the interpreter core
/// depends on this registry rather than on concrete arithmetic, so a
/// driver can extend or replace it without touching `p4st-eval`.
#[derive(Clone)]
pub struct Builtins {
    fns: HashMap<String, BuiltinFn>,
}

impl Builtins {
    pub fn empty() -> Self {
        Builtins { fns: HashMap::new() }
    }

    /// The minimal arithmetic builtins any spec is expected to be able to call.
    pub fn with_defaults() -> Self {
        let mut b = Builtins::empty();
        b.register("$sum", builtin_sum);
        b.register("$min", builtin_min);
        b.register("$max", builtin_max);
        b
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&[Value]) -> Result<Value, EngineError> + 'static,
    ) {
        self.fns.insert(name.into(), Rc::new(f));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fns.contains_key(name)
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, EngineError> {
        match self.fns.get(name) {
            Some(f) => f(args),
            None => Err(EngineError::BuiltinError {
                name: name.to_string(),
                message: "no such builtin".to_string(),
            }),
        }
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Builtins::with_defaults()
    }
}

fn nat_list_args(name: &str, args: &[Value]) -> Result<Vec<num_bigint::BigInt>, EngineError> {
    let list = args
        .first()
        .ok_or_else(|| EngineError::BuiltinError { name: name.to_string(), message: "expected one list argument".to_string() })?
        .as_list()
        .map_err(|e| EngineError::BuiltinError { name: name.to_string(), message: e.to_string() })?;
    list.iter()
        .map(|v| v.as_num().map(|n| n.value().clone()).map_err(|e| EngineError::BuiltinError { name: name.to_string(), message: e.to_string() }))
        .collect()
}

fn builtin_sum(args: &[Value]) -> Result<Value, EngineError> {
    let nums = nat_list_args("$sum", args)?;
    let total = nums.into_iter().fold(num_bigint::BigInt::zero(), |acc, n| acc + n);
    Ok(Value::num(p4st_ast::Num::nat(total), Typ::NumT { num_kind: NumKind::Nat }))
}

fn builtin_min(args: &[Value]) -> Result<Value, EngineError> {
    let nums = nat_list_args("$min", args)?;
    let min = nums
        .into_iter()
        .min()
        .ok_or_else(|| EngineError::BuiltinError { name: "$min".to_string(), message: "min of empty list".to_string() })?;
    Ok(Value::num(p4st_ast::Num::nat(min), Typ::NumT { num_kind: NumKind::Nat }))
}

fn builtin_max(args: &[Value]) -> Result<Value, EngineError> {
    let nums = nat_list_args("$max", args)?;
    let max = nums
        .into_iter()
        .max()
        .ok_or_else(|| EngineError::BuiltinError { name: "$max".to_string(), message: "max of empty list".to_string() })?;
    Ok(Value::num(p4st_ast::Num::nat(max), Typ::NumT { num_kind: NumKind::Nat }))
}
