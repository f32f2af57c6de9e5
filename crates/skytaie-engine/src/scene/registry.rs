use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, MutexGuard};

use super::{Shape2D, Sprite2D};

/// Both renderable sequences, in draw order.
///
/// Later entries draw on top of earlier ones. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryState {
    pub shapes: Vec<Shape2D>,
    pub sprites: Vec<Sprite2D>,
}

impl RegistryState {
    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len() + self.sprites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.sprites.is_empty()
    }

    /// Display names for list views, one per entry, in draw order.
    pub fn listing(&self) -> RegistryListing {
        RegistryListing {
            revision: 0,
            shapes: (0..self.shapes.len()).map(|i| format!("Shape2D #{i}")).collect(),
            sprites: (0..self.sprites.len()).map(|i| format!("Sprite2D #{i}")).collect(),
        }
    }
}

/// Entry names handed to a [`RegistryObserver`].
///
/// `revision` grows by one with every notifying change, so a receiver can drop a listing
/// that arrives after a newer one.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RegistryListing {
    pub revision: u64,
    pub shapes: Vec<String>,
    pub sprites: Vec<String>,
}

/// Receives a fresh listing after every register/unregister/replace call.
///
/// Called on whichever thread performed the change, after the registry lock is released.
/// Concurrent changes may deliver out of order; compare [`RegistryListing::revision`].
pub trait RegistryObserver: Send + Sync {
    fn registry_changed(&self, listing: &RegistryListing);
}

struct Shared {
    state: Mutex<RegistryState>,
    observer: Mutex<Option<Arc<dyn RegistryObserver>>>,
    revision: AtomicU64,
}

/// Shared handle to the shape and sprite sequences.
///
/// Cloning is cheap and every clone sees the same registry. Each mutation and each
/// snapshot holds one lock for its whole duration, so readers never see a half-applied
/// change.
#[derive(Clone)]
pub struct Registry {
    shared: Arc<Shared>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(RegistryState::default()),
                observer: Mutex::new(None),
                revision: AtomicU64::new(0),
            }),
        }
    }

    /// Installs the list-refresh observer, replacing any previous one.
    pub fn set_observer(&self, observer: Arc<dyn RegistryObserver>) {
        *self.shared.observer.lock() = Some(observer);
    }

    pub fn clear_observer(&self) {
        *self.shared.observer.lock() = None;
    }

    pub fn register_shape(&self, shape: Shape2D) {
        self.mutate(|s| s.shapes.push(shape));
    }

    /// Removes the first entry equal to `shape`. Returns `false` when none matched.
    pub fn unregister_shape(&self, shape: &Shape2D) -> bool {
        self.mutate(|s| remove_first(&mut s.shapes, shape))
    }

    pub fn register_sprite(&self, sprite: Sprite2D) {
        self.mutate(|s| s.sprites.push(sprite));
    }

    /// Removes the first entry equal to `sprite`. Returns `false` when none matched.
    pub fn unregister_sprite(&self, sprite: &Sprite2D) -> bool {
        self.mutate(|s| remove_first(&mut s.sprites, sprite))
    }

    /// Swaps in new sequences wholesale.
    pub fn replace(&self, shapes: Vec<Shape2D>, sprites: Vec<Sprite2D>) {
        self.restore(Some(shapes), Some(sprites));
    }

    /// Replaces whichever sequences are given, in one step; `None` keeps the current one.
    pub fn restore(&self, shapes: Option<Vec<Shape2D>>, sprites: Option<Vec<Sprite2D>>) {
        self.mutate(|s| {
            if let Some(shapes) = shapes {
                s.shapes = shapes;
            }
            if let Some(sprites) = sprites {
                s.sprites = sprites;
            }
        });
    }

    /// Runs `f` with exclusive access to both sequences.
    ///
    /// Intended for per-frame edits such as moving entries. The observer is not notified.
    ///
    /// The lock is not re-entrant: `f` must not call back into any handle of this
    /// registry (`len`, `snapshot`, `register_*`, ...), or the calling thread deadlocks.
    pub fn edit<R>(&self, f: impl FnOnce(&mut RegistryState) -> R) -> R {
        f(&mut self.lock())
    }

    /// Consistent copy of both sequences.
    pub fn snapshot(&self) -> RegistryState {
        self.lock().clone()
    }

    pub fn shapes(&self) -> Vec<Shape2D> {
        self.lock().shapes.clone()
    }

    pub fn sprites(&self) -> Vec<Sprite2D> {
        self.lock().sprites.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.shared.state.lock()
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut RegistryState) -> R) -> R {
        let observer = self.shared.observer.lock().clone();

        let (out, listing) = {
            let mut state = self.lock();
            let out = f(&mut state);
            // Bumped under the state lock so revision order matches mutation order.
            let revision = self.shared.revision.fetch_add(1, Ordering::Relaxed) + 1;
            let listing = observer.as_ref().map(|_| RegistryListing {
                revision,
                ..state.listing()
            });
            (out, listing)
        };

        if let (Some(observer), Some(listing)) = (observer, listing) {
            observer.registry_changed(&listing);
        }

        out
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Registry")
            .field("shapes", &state.shapes.len())
            .field("sprites", &state.sprites.len())
            .finish()
    }
}

fn remove_first<T: PartialEq>(items: &mut Vec<T>, needle: &T) -> bool {
    match items.iter().position(|it| it == needle) {
        Some(i) => {
            items.remove(i);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::coords::Vec2;

    fn shape(x: f32) -> Shape2D {
        Shape2D::new(Vec2::new(x, 0.0), Vec2::new(1.0, 1.0))
    }

    fn sprite(x: f32) -> Sprite2D {
        Sprite2D::new(Vec2::new(x, 0.0), Vec2::new(2.0, 2.0))
    }

    #[test]
    fn register_appends_in_order() {
        let reg = Registry::new();
        reg.register_shape(shape(1.0));
        reg.register_shape(shape(2.0));
        reg.register_sprite(sprite(3.0));

        assert_eq!(reg.shapes(), vec![shape(1.0), shape(2.0)]);
        assert_eq!(reg.sprites(), vec![sprite(3.0)]);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn unregister_removes_first_match_only() {
        let reg = Registry::new();
        reg.register_shape(shape(1.0));
        reg.register_shape(shape(2.0));
        reg.register_shape(shape(1.0));

        assert!(reg.unregister_shape(&shape(1.0)));
        assert_eq!(reg.shapes(), vec![shape(2.0), shape(1.0)]);
    }

    #[test]
    fn unregister_absent_is_noop() {
        let reg = Registry::new();
        reg.register_sprite(sprite(1.0));

        assert!(!reg.unregister_sprite(&sprite(9.0)));
        assert!(!reg.unregister_shape(&shape(1.0)));
        assert_eq!(reg.sprites(), vec![sprite(1.0)]);
    }

    #[test]
    fn replay_matches_model() {
        // Small LCG so the sequence is deterministic without pulling in an RNG crate.
        let mut seed: u32 = 0x2545_f491;
        let mut next = move || {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            seed >> 16
        };

        for _ in 0..20 {
            let reg = Registry::new();
            let mut model_shapes: Vec<Shape2D> = Vec::new();
            let mut model_sprites: Vec<Sprite2D> = Vec::new();

            for _ in 0..200 {
                let v = (next() % 6) as f32;
                match next() % 4 {
                    0 => {
                        reg.register_shape(shape(v));
                        model_shapes.push(shape(v));
                    }
                    1 => {
                        reg.unregister_shape(&shape(v));
                        if let Some(i) = model_shapes.iter().position(|s| *s == shape(v)) {
                            model_shapes.remove(i);
                        }
                    }
                    2 => {
                        reg.register_sprite(sprite(v));
                        model_sprites.push(sprite(v));
                    }
                    _ => {
                        reg.unregister_sprite(&sprite(v));
                        if let Some(i) = model_sprites.iter().position(|s| *s == sprite(v)) {
                            model_sprites.remove(i);
                        }
                    }
                }
            }

            let snap = reg.snapshot();
            assert_eq!(snap.shapes, model_shapes);
            assert_eq!(snap.sprites, model_sprites);
        }
    }

    struct Counting {
        calls: AtomicUsize,
        last: Mutex<RegistryListing>,
    }

    impl RegistryObserver for Counting {
        fn registry_changed(&self, listing: &RegistryListing) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock() = listing.clone();
        }
    }

    #[test]
    fn observer_runs_on_every_register_and_unregister() {
        let reg = Registry::new();
        let obs = Arc::new(Counting {
            calls: AtomicUsize::new(0),
            last: Mutex::new(RegistryListing::default()),
        });
        reg.set_observer(obs.clone());

        reg.register_shape(shape(1.0));
        reg.register_sprite(sprite(1.0));
        reg.unregister_shape(&shape(42.0));
        reg.edit(|s| s.shapes[0].position.x = 5.0);

        assert_eq!(obs.calls.load(Ordering::SeqCst), 3);
        let last = obs.last.lock().clone();
        assert_eq!(last.shapes, vec!["Shape2D #0".to_string()]);
        assert_eq!(last.sprites, vec!["Sprite2D #0".to_string()]);
    }

    #[test]
    fn observer_may_read_the_registry() {
        struct Reader(Registry, AtomicUsize);
        impl RegistryObserver for Reader {
            fn registry_changed(&self, _: &RegistryListing) {
                self.1.store(self.0.len(), Ordering::SeqCst);
            }
        }

        let reg = Registry::new();
        let obs = Arc::new(Reader(reg.clone(), AtomicUsize::new(0)));
        reg.set_observer(obs.clone());
        reg.register_shape(shape(1.0));
        reg.register_shape(shape(2.0));

        assert_eq!(obs.1.load(Ordering::SeqCst), 2);
        reg.clear_observer();
    }

    #[test]
    fn clones_share_state_across_threads() {
        let reg = Registry::new();
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let reg = reg.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        reg.register_shape(shape((t * 100 + i) as f32));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(reg.shapes().len(), 400);
    }

    #[test]
    fn survives_a_panicking_edit() {
        let reg = Registry::new();
        reg.register_shape(shape(1.0));

        let r = reg.clone();
        let res = std::thread::spawn(move || r.edit(|_| panic!("boom"))).join();
        assert!(res.is_err());

        reg.register_shape(shape(2.0));
        assert_eq!(reg.shapes().len(), 2);
    }

    #[test]
    fn listing_revisions_follow_mutation_order() {
        struct Latest(Mutex<RegistryListing>);
        impl RegistryObserver for Latest {
            fn registry_changed(&self, listing: &RegistryListing) {
                let mut last = self.0.lock();
                if listing.revision > last.revision {
                    *last = listing.clone();
                }
            }
        }

        let reg = Registry::new();
        let obs = Arc::new(Latest(Mutex::new(RegistryListing::default())));
        reg.set_observer(obs.clone());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let reg = reg.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        reg.register_shape(shape((t * 50 + i) as f32));
                        if i % 3 == 0 {
                            reg.unregister_shape(&shape((t * 50 + i) as f32));
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        // 200 registers plus 68 unregisters, each stamped once.
        let last = obs.0.lock().clone();
        assert_eq!(last.revision, 268);
        assert_eq!(last.shapes.len(), reg.shapes().len());
        reg.clear_observer();
    }
}
