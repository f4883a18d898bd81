use super::Func;
use crate::Expr;
use crate::error::MathError;
use crate::number::Number;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Definition of a mathematical function including its evaluation, differentiation
/// and integration logic
#[derive(Clone)]
pub(crate) struct FunctionDefinition {
    pub func: Func,

    /// Canonical name of the function (e.g., "sin", "ln")
    pub name: &'static str,

    /// Numerical evaluation with domain checks
    pub eval: fn(Number) -> Result<Number, MathError>,

    /// Outer derivative `f'(u)`
    pub derivative: fn(&Expr) -> Expr,

    /// Antiderivative `F(u)` in the operand itself
    pub antiderivative: fn(&Expr) -> Expr,
}

struct Tables {
    by_func: FxHashMap<Func, FunctionDefinition>,
    by_name: FxHashMap<&'static str, Func>,
}

/// Static registry storing all function definitions
static REGISTRY: OnceLock<Tables> = OnceLock::new();

/// Initialize the registry with all function definitions
fn init_registry() -> Tables {
    let defs = super::definitions::all_definitions();
    let mut by_func = FxHashMap::default();
    let mut by_name = FxHashMap::default();
    by_func.reserve(defs.len());
    by_name.reserve(defs.len());

    for def in defs {
        by_name.insert(def.name, def.func);
        by_func.insert(def.func, def);
    }

    Tables { by_func, by_name }
}

/// Central registry for getting function definitions
pub(crate) struct Registry;

impl Registry {
    /// Get a function definition - O(1) HashMap lookup
    pub(crate) fn get(func: Func) -> &'static FunctionDefinition {
        let tables = REGISTRY.get_or_init(init_registry);
        match tables.by_func.get(&func) {
            Some(def) => def,
            // every variant is listed in all_definitions
            None => unreachable!("no definition registered for {:?}", func),
        }
    }

    pub(crate) fn by_name(name: &str) -> Option<Func> {
        REGISTRY.get_or_init(init_registry).by_name.get(name).copied()
    }
}
