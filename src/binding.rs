//! Host bindings and the builtin table
//!
//! A [`Bindings`] table is what the compiler resolves identifiers
//! against. Compilation freezes the referenced cells and callables into
//! the emitted bytecode; the table itself may be dropped afterwards.

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

/// Highest arity a callable binding may declare.
pub const MAX_ARITY: u8 = 7;

/// A pure host function of up to [`MAX_ARITY`] arguments.
pub type HostFn = dyn Fn(&[f64]) -> f64;

/// A host closure: invoked with its opaque context first, then the
/// arguments.
pub type HostClosure = dyn Fn(&dyn Any, &[f64]) -> f64;

/// A named entry visible to the compiler.
#[derive(Clone)]
pub struct Binding {
    pub(crate) name: String,
    pub(crate) target: Target,
}

/// What a binding points at. Call targets carry their declared arity.
#[derive(Clone)]
pub(crate) enum Target {
    Value(Rc<Cell<f64>>),
    Function { arity: u8, fun: Rc<HostFn> },
    Closure { arity: u8, fun: Rc<HostClosure>, ctx: Rc<dyn Any> },
}

/// The host's binding table. Entries shadow builtins of the same name;
/// duplicate names resolve to the first entry.
#[derive(Default)]
pub struct Bindings {
    entries: Vec<Binding>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings::default()
    }

    /// Bind `name` to a host-owned value cell. The cell is read on
    /// every evaluation, so later writes through the host's clone are
    /// visible to already-compiled programs.
    pub fn value(&mut self, name: &str, cell: Rc<Cell<f64>>) -> &mut Self {
        self.entries.push(Binding {
            name: name.to_string(),
            target: Target::Value(cell),
        });
        self
    }

    /// Bind `name` to a constant value.
    pub fn constant(&mut self, name: &str, value: f64) -> &mut Self {
        self.value(name, Rc::new(Cell::new(value)))
    }

    /// Bind a pure function of exactly `arity` arguments. The evaluator
    /// passes the arguments as a slice of length `arity`, first
    /// argument first.
    ///
    /// # Panics
    /// Panics if `arity` exceeds [`MAX_ARITY`].
    pub fn function<F>(&mut self, name: &str, arity: u8, fun: F) -> &mut Self
    where
        F: Fn(&[f64]) -> f64 + 'static,
    {
        assert!(arity <= MAX_ARITY, "arity {arity} exceeds {MAX_ARITY}");
        self.entries.push(Binding {
            name: name.to_string(),
            target: Target::Function {
                arity,
                fun: Rc::new(fun),
            },
        });
        self
    }

    /// Bind a closure of exactly `arity` arguments. `ctx` is forwarded
    /// verbatim as the callable's first parameter on every invocation.
    ///
    /// # Panics
    /// Panics if `arity` exceeds [`MAX_ARITY`].
    pub fn closure<F>(&mut self, name: &str, arity: u8, ctx: Rc<dyn Any>, fun: F) -> &mut Self
    where
        F: Fn(&dyn Any, &[f64]) -> f64 + 'static,
    {
        assert!(arity <= MAX_ARITY, "arity {arity} exceeds {MAX_ARITY}");
        self.entries.push(Binding {
            name: name.to_string(),
            target: Target::Closure {
                arity,
                fun: Rc::new(fun),
                ctx,
            },
        });
        self
    }

    /// Host table first, builtin table second; exact name match, first
    /// match wins.
    pub(crate) fn resolve(&self, name: &str) -> Option<Binding> {
        self.entries
            .iter()
            .find(|b| b.name == name)
            .cloned()
            .or_else(|| builtin(name))
    }
}

/// Builtins available to every program unless shadowed by a host
/// binding of the same name.
fn builtin(name: &str) -> Option<Binding> {
    let target = match name {
        "e" => Target::Value(Rc::new(Cell::new(std::f64::consts::E))),
        "pi" => Target::Value(Rc::new(Cell::new(std::f64::consts::PI))),
        "abs" => Target::Function {
            arity: 1,
            fun: Rc::new(|args: &[f64]| args[0].abs()),
        },
        "sqrt" => Target::Function {
            arity: 1,
            fun: Rc::new(|args: &[f64]| args[0].sqrt()),
        },
        _ => return None,
    };
    Some(Binding {
        name: name.to_string(),
        target,
    })
}
