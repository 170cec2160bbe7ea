use std::cell::RefCell;
use std::rc::Rc;

/// Cloneable handle to a value. Every write asks the recomposer for another
/// pass.
#[derive(Clone)]
pub struct Signal<T: 'static>(Rc<RefCell<T>>);

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().clone()
    }
    pub fn set(&self, v: T) {
        *self.0.borrow_mut() = v;
        crate::runtime::request_recompose();
    }
    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.borrow_mut());
        crate::runtime::request_recompose();
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Signal").field(&self.0.borrow()).finish()
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
