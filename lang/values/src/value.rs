use std::fmt;
use std::rc::Rc;

use p4st_ast::{Id, MixOp, Num, Typ};

use crate::error::ValueError;
use crate::vid::{fresh_vid, Vid};

/// The identity note carried by every value: a stable `Vid` plus the IL
/// type the elaborator assigned it. Two values with equal payload may
/// differ in their note; the note never participates in equality.
#[derive(Debug, Clone)]
pub struct ValueNote {
    pub vid: Vid,
    pub typ: Typ,
}

/// The payload of a value: a tagged sum over every runtime shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    BoolV(bool),
    NumV(Num),
    TextV(String),
    ListV(Vec<Value>),
    TupleV(Vec<Value>),
    OptV(Option<Value>),
    /// Constructor application: the mixfix operator plus its arguments.
    CaseV(MixOp, Vec<Value>),
    /// A record, atom-keyed, insertion order preserved.
    StructV(Vec<(Id, Value)>),
    /// A reified reference to a function or relation.
    FuncV(Id),
}

impl ValueKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ValueKind::BoolV(_) => "bool",
            ValueKind::NumV(_) => "num",
            ValueKind::TextV(_) => "text",
            ValueKind::ListV(_) => "list",
            ValueKind::TupleV(_) => "tuple",
            ValueKind::OptV(_) => "opt",
            ValueKind::CaseV(..) => "case",
            ValueKind::StructV(_) => "struct",
            ValueKind::FuncV(_) => "func",
        }
    }
}

#[derive(Debug, Clone)]
struct ValueData {
    note: ValueNote,
    kind: ValueKind,
}

/// A runtime value. Cheaply clonable (`Rc`); equality and hashing compare
/// payload only, ignoring the identity note (`vid`, `typ`) and any region
/// information nested within it.
#[derive(Debug, Clone)]
pub struct Value(Rc<ValueData>);

impl Value {
    /// The single factory for runtime values, assigning a fresh `vid`.
    /// Callers that also maintain a value graph (`p4st-env`'s `Context`)
    /// are expected to register the returned value immediately.
    pub fn new(kind: ValueKind, typ: Typ) -> Self {
        Value(Rc::new(ValueData { note: ValueNote { vid: fresh_vid(), typ }, kind }))
    }

    pub fn vid(&self) -> Vid {
        self.0.note.vid
    }

    pub fn typ(&self) -> &Typ {
        &self.0.note.typ
    }

    pub fn note(&self) -> &ValueNote {
        &self.0.note
    }

    pub fn kind(&self) -> &ValueKind {
        &self.0.kind
    }

    pub fn boolean(b: bool) -> Self {
        Value::new(ValueKind::BoolV(b), Typ::BoolT)
    }

    pub fn num(n: Num, typ: Typ) -> Self {
        Value::new(ValueKind::NumV(n), typ)
    }

    pub fn text(s: impl Into<String>, typ: Typ) -> Self {
        Value::new(ValueKind::TextV(s.into()), typ)
    }

    pub fn list(elems: Vec<Value>, typ: Typ) -> Self {
        Value::new(ValueKind::ListV(elems), typ)
    }

    pub fn tuple(elems: Vec<Value>, typ: Typ) -> Self {
        Value::new(ValueKind::TupleV(elems), typ)
    }

    pub fn opt(inner: Option<Value>, typ: Typ) -> Self {
        Value::new(ValueKind::OptV(inner), typ)
    }

    pub fn case(mixop: MixOp, args: Vec<Value>, typ: Typ) -> Self {
        Value::new(ValueKind::CaseV(mixop, args), typ)
    }

    pub fn strct(fields: Vec<(Id, Value)>, typ: Typ) -> Self {
        Value::new(ValueKind::StructV(fields), typ)
    }

    pub fn func(id: Id, typ: Typ) -> Self {
        Value::new(ValueKind::FuncV(id), typ)
    }

    pub fn as_bool(&self) -> Result<bool, ValueError> {
        match self.kind() {
            ValueKind::BoolV(b) => Ok(*b),
            other => Err(ValueError::KindMismatch { expected: "bool", actual: other.kind_name() }),
        }
    }

    pub fn as_num(&self) -> Result<&Num, ValueError> {
        match self.kind() {
            ValueKind::NumV(n) => Ok(n),
            other => Err(ValueError::KindMismatch { expected: "num", actual: other.kind_name() }),
        }
    }

    pub fn as_text(&self) -> Result<&str, ValueError> {
        match self.kind() {
            ValueKind::TextV(s) => Ok(s.as_str()),
            other => Err(ValueError::KindMismatch { expected: "text", actual: other.kind_name() }),
        }
    }

    pub fn as_list(&self) -> Result<&[Value], ValueError> {
        match self.kind() {
            ValueKind::ListV(vs) => Ok(vs),
            other => Err(ValueError::KindMismatch { expected: "list", actual: other.kind_name() }),
        }
    }

    pub fn as_tuple(&self) -> Result<&[Value], ValueError> {
        match self.kind() {
            ValueKind::TupleV(vs) => Ok(vs),
            other => Err(ValueError::KindMismatch { expected: "tuple", actual: other.kind_name() }),
        }
    }

    pub fn as_opt(&self) -> Result<Option<&Value>, ValueError> {
        match self.kind() {
            ValueKind::OptV(v) => Ok(v.as_ref()),
            other => Err(ValueError::KindMismatch { expected: "opt", actual: other.kind_name() }),
        }
    }

    /// Accesses a case value, requiring `mixop` to match the dynamic tag.
    pub fn as_case(&self, expected: &MixOp) -> Result<&[Value], ValueError> {
        match self.kind() {
            ValueKind::CaseV(m, args) if m == expected => Ok(args),
            ValueKind::CaseV(m, _) => {
                Err(ValueError::CaseMismatch { expected: expected.to_string(), actual: m.to_string() })
            }
            other => Err(ValueError::KindMismatch { expected: "case", actual: other.kind_name() }),
        }
    }

    /// Accesses a case value without checking its tag.
    pub fn as_case_any(&self) -> Result<(&MixOp, &[Value]), ValueError> {
        match self.kind() {
            ValueKind::CaseV(m, args) => Ok((m, args)),
            other => Err(ValueError::KindMismatch { expected: "case", actual: other.kind_name() }),
        }
    }

    pub fn as_struct_field(&self, atom: &str) -> Result<&Value, ValueError> {
        match self.kind() {
            ValueKind::StructV(fields) => fields
                .iter()
                .find(|(id, _)| id.as_str() == atom)
                .map(|(_, v)| v)
                .ok_or_else(|| ValueError::MissingField { field: atom.to_string() }),
            other => Err(ValueError::KindMismatch { expected: "struct", actual: other.kind_name() }),
        }
    }

    pub fn as_func(&self) -> Result<&Id, ValueError> {
        match self.kind() {
            ValueKind::FuncV(id) => Ok(id),
            other => Err(ValueError::KindMismatch { expected: "func", actual: other.kind_name() }),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind == other.0.kind
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ValueKind::BoolV(b) => write!(f, "{b}"),
            ValueKind::NumV(n) => write!(f, "{n}"),
            ValueKind::TextV(s) => write!(f, "{s:?}"),
            ValueKind::ListV(vs) => {
                write!(f, "[")?;
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            ValueKind::TupleV(vs) => {
                write!(f, "(")?;
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, ")")
            }
            ValueKind::OptV(Some(v)) => write!(f, "Some({v})"),
            ValueKind::OptV(None) => write!(f, "None"),
            ValueKind::CaseV(mixop, args) => {
                write!(f, "{mixop}(")?;
                for (i, v) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, ")")
            }
            ValueKind::StructV(fields) => {
                write!(f, "{{")?;
                for (i, (id, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{id} = {v}")?;
                }
                write!(f, "}}")
            }
            ValueKind::FuncV(id) => write!(f, "&{id}"),
        }
    }
}
