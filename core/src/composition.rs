//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on one field of a larger state
//!
//! Together they split a single `(state, action)` transition across the
//! sub-maps of a state tree and recombine the results into one record.
//!
//! # Examples
//!
//! ```
//! use normandy_core::composition::{combine_reducers, scope_reducer};
//! use normandy_core::{effect::Effect, reducer::Reducer, SmallVec};
//! use std::collections::HashMap;
//!
//! #[derive(Clone, Debug, Default)]
//! struct ConsoleState {
//!     names: HashMap<u64, String>,
//!     seen: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum ConsoleAction {
//!     Named { id: u64, name: String },
//!     Ping,
//! }
//!
//! struct NamesReducer;
//! struct SeenReducer;
//!
//! impl Reducer for NamesReducer {
//!     type State = HashMap<u64, String>;
//!     type Action = ConsoleAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Self::State, action: ConsoleAction, _env: &()) -> SmallVec<[Effect<ConsoleAction>; 4]> {
//!         if let ConsoleAction::Named { id, name } = action {
//!             state.insert(id, name);
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! impl Reducer for SeenReducer {
//!     type State = u32;
//!     type Action = ConsoleAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut u32, _action: ConsoleAction, _env: &()) -> SmallVec<[Effect<ConsoleAction>; 4]> {
//!         *state += 1;
//!         SmallVec::new()
//!     }
//! }
//!
//! let combined = combine_reducers(vec![
//!     Box::new(scope_reducer(NamesReducer, |s: &mut ConsoleState| &mut s.names)),
//!     Box::new(scope_reducer(SeenReducer, |s: &mut ConsoleState| &mut s.seen)),
//! ]);
//!
//! let mut state = ConsoleState::default();
//! let _ = combined.reduce(&mut state, ConsoleAction::Named { id: 1, name: "a".into() }, &());
//! let _ = combined.reduce(&mut state, ConsoleAction::Ping, &());
//! assert_eq!(state.names.len(), 1);
//! assert_eq!(state.seen, 2);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// A boxed reducer over a fixed state, action and environment.
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence on a clone of the action, and all effects
/// are collected and concatenated in order.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type
/// - `E`: The environment type
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    /// Number of reducers in the combination
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Returns `true` if no reducers were combined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> std::fmt::Debug for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Scopes a reducer to operate on one field of a larger state.
///
/// The `lens` borrows the child state mutably out of the parent, so the child
/// reducer updates it in place. Nothing is cloned: a child reducer that
/// ignores an action leaves the field exactly as it was.
///
/// # Type Parameters
///
/// - `S`: The parent state type
/// - `SubS`: The child state type (a field of `S`)
/// - `A`: The action type
/// - `E`: The environment type
pub fn scope_reducer<S, SubS, A, E, R>(reducer: R, lens: fn(&mut S) -> &mut SubS) -> ScopedReducer<S, SubS, A, E, R>
where
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer {
        reducer,
        lens,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, E, R>
where
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    reducer: R,
    lens: fn(&mut S) -> &mut SubS,
    _phantom: std::marker::PhantomData<fn() -> (A, E)>,
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, A, E, R>
where
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.reducer.reduce((self.lens)(state), action, env)
    }
}
