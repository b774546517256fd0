//! Conversion between CLI-facing JSON and runtime `Value`s. `Value` itself
//! carries no `serde` impls — unlike the IL grammar, a value
//! is untagged data whose shape is only known via its declared `Typ` — so
//! decoding walks the expected `Typ` alongside the JSON tree, and a `VarT`
//! slot additionally needs the `Spec` to resolve what kind of type it names.

use num_bigint::BigInt;
use p4st_ast::{DefTyp, Id, MixOp, Num, NumKind, Spec, Typ};
use p4st_values::{Value, ValueKind};

use crate::error::DriverError;

/// Decodes a JSON value into a runtime `Value` of the expected `typ`.
pub fn json_to_value(spec: &Spec, json: &serde_json::Value, typ: &Typ) -> Result<Value, DriverError> {
    match typ {
        Typ::BoolT => {
            let b = json.as_bool().ok_or_else(|| shape_err("expected a JSON boolean"))?;
            Ok(Value::boolean(b))
        }
        Typ::NumT { num_kind } => {
            let n = parse_bigint(json)?;
            Ok(Value::num(Num::new(*num_kind, n), typ.clone()))
        }
        Typ::TextT => {
            let s = json.as_str().ok_or_else(|| shape_err("expected a JSON string"))?;
            Ok(Value::text(s, Typ::TextT))
        }
        Typ::ListT { elem } => {
            let arr = json.as_array().ok_or_else(|| shape_err("expected a JSON array"))?;
            let elems =
                arr.iter().map(|e| json_to_value(spec, e, elem)).collect::<Result<Vec<_>, _>>()?;
            Ok(Value::list(elems, typ.clone()))
        }
        Typ::TupleT { elems: elem_typs } => {
            let arr = json.as_array().ok_or_else(|| shape_err("expected a JSON array"))?;
            if arr.len() != elem_typs.len() {
                return Err(shape_err(&format!(
                    "tuple expects {} elements, got {}",
                    elem_typs.len(),
                    arr.len()
                )));
            }
            let elems = arr
                .iter()
                .zip(elem_typs)
                .map(|(e, t)| json_to_value(spec, e, t))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::tuple(elems, typ.clone()))
        }
        Typ::OptT { elem } => {
            if json.is_null() {
                Ok(Value::opt(None, typ.clone()))
            } else {
                Ok(Value::opt(Some(json_to_value(spec, json, elem)?), typ.clone()))
            }
        }
        Typ::VarT { id, .. } => json_to_var_value(spec, json, id, typ),
        Typ::IterT { .. } => Err(DriverError::UnsupportedInputType { typ: format!("{typ:?}") }),
    }
}

fn json_to_var_value(spec: &Spec, json: &serde_json::Value, id: &Id, typ: &Typ) -> Result<Value, DriverError> {
    let deftyp = &spec
        .find_typ(id.as_str())
        .ok_or_else(|| DriverError::UnknownType { id: id.as_str().to_string() })?
        .deftyp;
    match deftyp {
        DefTyp::AliasT { typ: aliased } => json_to_value(spec, json, aliased),
        DefTyp::StructT { fields } => {
            let obj = json.as_object().ok_or_else(|| shape_err("expected a JSON object"))?;
            let mut out = Vec::with_capacity(fields.len());
            for (field_id, field_typ) in fields {
                let field_json = obj
                    .get(field_id.as_str())
                    .ok_or_else(|| shape_err(&format!("missing field `{field_id}`")))?;
                out.push((field_id.clone(), json_to_value(spec, field_json, field_typ)?));
            }
            Ok(Value::strct(out, typ.clone()))
        }
        DefTyp::VariantT { variants } => {
            let obj = json.as_object().ok_or_else(|| shape_err("expected a JSON object with `mixop`/`args`"))?;
            let mixop_json =
                obj.get("mixop").ok_or_else(|| shape_err("variant value needs a `mixop` field"))?;
            let mixop: MixOp =
                serde_json::from_value(mixop_json.clone()).map_err(DriverError::SpecParse)?;
            let arg_typs = variants
                .iter()
                .find(|(m, _)| m == &mixop)
                .map(|(_, args)| args)
                .ok_or_else(|| shape_err(&format!("`{mixop}` is not a variant of `{id}`")))?;
            let args_json = obj
                .get("args")
                .and_then(|v| v.as_array())
                .ok_or_else(|| shape_err("variant value needs an `args` array"))?;
            if args_json.len() != arg_typs.len() {
                return Err(shape_err(&format!(
                    "`{mixop}` expects {} argument(s), got {}",
                    arg_typs.len(),
                    args_json.len()
                )));
            }
            let args = args_json
                .iter()
                .zip(arg_typs)
                .map(|(a, t)| json_to_value(spec, a, t))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::case(mixop, args, typ.clone()))
        }
    }
}

fn parse_bigint(json: &serde_json::Value) -> Result<BigInt, DriverError> {
    if let Some(s) = json.as_str() {
        return s.parse::<BigInt>().map_err(|e| shape_err(&format!("invalid integer `{s}`: {e}")));
    }
    if let Some(n) = json.as_i64() {
        return Ok(BigInt::from(n));
    }
    if let Some(n) = json.as_u64() {
        return Ok(BigInt::from(n));
    }
    Err(shape_err("expected a JSON integer or a decimal string"))
}

fn shape_err(message: &str) -> DriverError {
    DriverError::InputShape { message: message.to_string() }
}

/// Encodes a runtime `Value` back into JSON for CLI/driver output.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value.kind() {
        ValueKind::BoolV(b) => serde_json::Value::Bool(*b),
        ValueKind::NumV(n) => serde_json::Value::String(n.value().to_string()),
        ValueKind::TextV(s) => serde_json::Value::String(s.clone()),
        ValueKind::ListV(vs) | ValueKind::TupleV(vs) => {
            serde_json::Value::Array(vs.iter().map(value_to_json).collect())
        }
        ValueKind::OptV(v) => v.as_ref().map(value_to_json).unwrap_or(serde_json::Value::Null),
        ValueKind::CaseV(mixop, args) => serde_json::json!({
            "mixop": mixop,
            "args": args.iter().map(value_to_json).collect::<Vec<_>>(),
        }),
        ValueKind::StructV(fields) => {
            let mut obj = serde_json::Map::new();
            for (id, v) in fields {
                obj.insert(id.as_str().to_string(), value_to_json(v));
            }
            serde_json::Value::Object(obj)
        }
        ValueKind::FuncV(id) => serde_json::Value::String(id.as_str().to_string()),
    }
}
