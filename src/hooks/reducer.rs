//! Reducer-style state transitions.
//!
//! A [`Reducer`] is a pure function from the current state and an action to
//! the next state. A [`Store`] owns the state and applies dispatched actions
//! through the reducer, one at a time.

/// Pure state transition function.
pub trait Reducer {
    /// The state shape.
    type State;
    /// The actions understood by this reducer.
    type Action;

    /// Computes the next state. Must not mutate anything outside its return value.
    fn reduce(&self, state: &Self::State, action: Self::Action) -> Self::State;
}

/// Owns a state value and applies actions through a reducer.
///
/// # Example
///
/// ```rust
/// use hooklab::hooks::{Reducer, Store};
///
/// struct Counter;
///
/// enum CounterAction {
///     Increment,
///     Reset,
/// }
///
/// impl Reducer for Counter {
///     type State = i64;
///     type Action = CounterAction;
///
///     fn reduce(&self, state: &i64, action: CounterAction) -> i64 {
///         match action {
///             CounterAction::Increment => state + 1,
///             CounterAction::Reset => 0,
///         }
///     }
/// }
///
/// let mut store = Store::new(Counter, 0);
/// store.dispatch(CounterAction::Increment);
/// store.dispatch(CounterAction::Increment);
/// assert_eq!(*store.state(), 2);
/// store.dispatch(CounterAction::Reset);
/// assert_eq!(*store.state(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Store<R: Reducer> {
    reducer: R,
    state: R::State,
}

impl<R: Reducer> Store<R> {
    /// Creates a store holding `initial`.
    pub fn new(reducer: R, initial: R::State) -> Self {
        Self {
            reducer,
            state: initial,
        }
    }

    /// Applies `action` and returns the new state.
    pub fn dispatch(&mut self, action: R::Action) -> &R::State {
        self.state = self.reducer.reduce(&self.state, action);
        &self.state
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &R::State {
        &self.state
    }

    /// The reducer applied on each dispatch.
    pub fn reducer(&self) -> &R {
        &self.reducer
    }

    /// Consumes the store, returning its state.
    #[must_use]
    pub fn into_state(self) -> R::State {
        self.state
    }
}

impl<R> Default for Store<R>
where
    R: Reducer + Default,
    R::State: Default,
{
    fn default() -> Self {
        Self::new(R::default(), R::State::default())
    }
}
