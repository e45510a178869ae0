//! Function values passed to higher-order operations (`transform`, folds,
//! `chain`, `find_if`).

use crate::dispatch::Dispatcher;
use crate::errors::Error;
use crate::values::Value;
use alloc::rc::Rc;
use core::fmt;

/// Signature of a callable value.
///
/// Functions receive the dispatcher so they can call back into generic
/// operations (`d.plus(x, y)`) without capturing it.
pub type NativeFn<'a> = dyn Fn(&Dispatcher<'a>, &[Value<'a>]) -> Result<Value<'a>, Error> + 'a;

/// A reference-counted callable. Cloning shares the underlying closure.
#[derive(Clone)]
pub struct Function<'a> {
    func: Rc<NativeFn<'a>>,
}

impl<'a> Function<'a> {
    pub fn new(
        func: impl Fn(&Dispatcher<'a>, &[Value<'a>]) -> Result<Value<'a>, Error> + 'a,
    ) -> Self {
        Self {
            func: Rc::new(func),
        }
    }

    pub fn call(&self, d: &Dispatcher<'a>, args: &[Value<'a>]) -> Result<Value<'a>, Error> {
        (self.func)(d, args)
    }
}

// Functions have reference identity: two values are equal only if they share
// the same closure.
impl PartialEq for Function<'_> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Function<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function@{:p}", Rc::as_ptr(&self.func) as *const ())
    }
}
