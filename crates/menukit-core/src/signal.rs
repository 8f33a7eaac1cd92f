//! Bubbling signal protocol between components and their ancestors.
//!
//! A component never talks to its siblings. It wraps a [`Signal`] in an
//! [`Envelope`] naming itself as origin and hands it upward. Each ancestor
//! on the way either ignores the kind (not registered), consumes it, or
//! handles it and lets it keep bubbling. The ancestor that owns a group
//! answers exclusivity signals by broadcasting a [`Directive`] to every
//! member except the origin.
//!
//! Delivery is synchronous and depth-first: the emitter has already updated
//! its own state when the envelope leaves it, and siblings update only when
//! the directive reaches them.
//!
//! # Examples
//!
//! ```
//! use menukit_core::signal::{bubble, Envelope, Listener, Signal, SignalKind, SignalLog};
//! use menukit_core::WidgetId;
//!
//! let mut root: SignalLog<u32> = SignalLog::only(&[SignalKind::MenuCollapse]);
//!
//! let origin = WidgetId::new(3);
//! {
//!     let chain: &mut [&mut dyn Listener<u32>] = &mut [&mut root];
//!     let leftover = bubble(chain, Envelope::new(origin, Signal::MenuCollapse));
//!     assert!(leftover.is_none());
//!
//!     // Nobody listens for `Expand`, so it falls off the top of the chain.
//!     let leftover = bubble(chain, Envelope::new(origin, Signal::Expand));
//!     assert!(leftover.is_some());
//! }
//! assert_eq!(root.received().len(), 1);
//! ```

use crate::widget::WidgetId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Discriminant of a [`Signal`], used for listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// Component finished initialization
    Inited,
    /// Component attached to the tree
    Attached,
    /// Component detached from the tree
    Detached,
    /// Submenu opened
    Expand,
    /// Submenu closed
    Collapse,
    /// Close every open ancestor menu
    MenuCollapse,
    /// A radio item became checked
    RadioChecked,
    /// An option item became selected
    OptionSelected,
}

impl SignalKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Inited,
        Self::Attached,
        Self::Detached,
        Self::Expand,
        Self::Collapse,
        Self::MenuCollapse,
        Self::RadioChecked,
        Self::OptionSelected,
    ];

    /// Lifecycle kinds are informational and never answered.
    #[must_use]
    pub const fn is_lifecycle(self) -> bool {
        matches!(self, Self::Inited | Self::Attached | Self::Detached)
    }
}

/// A protocol message sent from a component towards its ancestors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal<V> {
    /// Component finished initialization
    Inited,
    /// Component attached to the tree
    Attached,
    /// Component detached from the tree
    Detached,
    /// Submenu opened
    Expand,
    /// Submenu closed
    Collapse,
    /// Close every open ancestor menu
    MenuCollapse,
    /// A radio item became checked
    RadioChecked {
        /// Value now checked in the group
        value: V,
    },
    /// An option item became selected
    OptionSelected {
        /// Value of the selected option
        value: Option<V>,
    },
}

impl<V> Signal<V> {
    /// Kind of this signal.
    #[must_use]
    pub const fn kind(&self) -> SignalKind {
        match self {
            Self::Inited => SignalKind::Inited,
            Self::Attached => SignalKind::Attached,
            Self::Detached => SignalKind::Detached,
            Self::Expand => SignalKind::Expand,
            Self::Collapse => SignalKind::Collapse,
            Self::MenuCollapse => SignalKind::MenuCollapse,
            Self::RadioChecked { .. } => SignalKind::RadioChecked,
            Self::OptionSelected { .. } => SignalKind::OptionSelected,
        }
    }
}

/// A signal in flight, tagged with the component that emitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<V> {
    /// Emitting component
    pub origin: WidgetId,
    /// Payload
    pub signal: Signal<V>,
}

impl<V> Envelope<V> {
    /// Wrap a signal.
    #[must_use]
    pub const fn new(origin: WidgetId, signal: Signal<V>) -> Self {
        Self { origin, signal }
    }

    /// Kind of the wrapped signal.
    #[must_use]
    pub const fn kind(&self) -> SignalKind {
        self.signal.kind()
    }
}

/// What an ancestor did with a signal it registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Stop here
    Consumed,
    /// Handled, but keep bubbling to the next ancestor
    Bubble,
}

/// An ancestor that registers for some signal kinds.
pub trait Listener<V> {
    /// Whether this listener registered for `kind`.
    fn listens_to(&self, kind: SignalKind) -> bool;

    /// Handle an envelope of a registered kind.
    fn on_signal(&mut self, envelope: &Envelope<V>) -> Delivery;
}

/// Offer an envelope to a single ancestor.
///
/// Returns the envelope back when it should continue upward: either the
/// listener did not register for its kind, or it asked to keep bubbling.
pub fn deliver<V, L>(listener: &mut L, envelope: Envelope<V>) -> Option<Envelope<V>>
where
    L: Listener<V> + ?Sized,
{
    let kind = envelope.kind();
    if !listener.listens_to(kind) {
        return Some(envelope);
    }
    match listener.on_signal(&envelope) {
        Delivery::Consumed => {
            log::trace!("{kind:?} from {} consumed", envelope.origin);
            None
        }
        Delivery::Bubble => Some(envelope),
    }
}

/// Send an envelope up an ancestor chain ordered nearest first.
///
/// The returned envelope, if any, reached the top without being consumed.
/// Callers drop it: an unheard signal is not an error.
pub fn bubble<V>(
    chain: &mut [&mut dyn Listener<V>],
    envelope: Envelope<V>,
) -> Option<Envelope<V>> {
    let mut pending = envelope;
    for listener in chain.iter_mut() {
        pending = deliver(&mut **listener, pending)?;
    }
    log::trace!("{:?} from {} left the chain unheard", pending.kind(), pending.origin);
    Some(pending)
}

/// Corrective instruction a group authority sends to group members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<V> {
    /// The group's radio value is now `value`; replace your checked value.
    SyncRadio {
        /// Newly checked value
        value: V,
    },
    /// The group's checkbox set was replaced; adopt the new snapshot.
    SyncChecked {
        /// Shared set snapshot
        checked: Arc<Vec<V>>,
    },
    /// Another option was selected; clear your selected flag.
    Deselect {
        /// Value of the option that was selected
        value: Option<V>,
    },
}

/// A group member that accepts directives.
pub trait Receiver<V> {
    /// Identity compared against the origin of the triggering signal.
    fn receiver_id(&self) -> WidgetId;

    /// Apply a directive to local state.
    fn receive(&mut self, directive: &Directive<V>);
}

/// Fan a directive out to every member except `origin`.
///
/// Returns how many members received it.
pub fn broadcast<'a, V, R, I>(members: I, origin: WidgetId, directive: &Directive<V>) -> usize
where
    R: Receiver<V> + 'a,
    I: IntoIterator<Item = &'a mut R>,
{
    let mut count = 0;
    for member in members {
        if member.receiver_id() == origin {
            continue;
        }
        member.receive(directive);
        count += 1;
    }
    count
}

/// A listener that records what it hears.
///
/// Hosts put one at the top of a chain to observe signals that escaped
/// every menu (`Expand`, `Collapse`, a root `MenuCollapse`).
#[derive(Debug, Clone)]
pub struct SignalLog<V> {
    kinds: Vec<SignalKind>,
    delivery: Delivery,
    received: Vec<Envelope<V>>,
}

impl<V: Clone> SignalLog<V> {
    /// Record every kind and consume it.
    #[must_use]
    pub fn all() -> Self {
        Self::only(&SignalKind::ALL)
    }

    /// Record and consume only the given kinds.
    #[must_use]
    pub fn only(kinds: &[SignalKind]) -> Self {
        Self {
            kinds: kinds.to_vec(),
            delivery: Delivery::Consumed,
            received: Vec::new(),
        }
    }

    /// Record without consuming, so signals keep bubbling.
    #[must_use]
    pub const fn passthrough(mut self) -> Self {
        self.delivery = Delivery::Bubble;
        self
    }

    /// Envelopes received so far, oldest first.
    #[must_use]
    pub fn received(&self) -> &[Envelope<V>] {
        &self.received
    }

    /// Kinds received so far, oldest first.
    #[must_use]
    pub fn kinds(&self) -> Vec<SignalKind> {
        self.received.iter().map(Envelope::kind).collect()
    }

    /// Forget everything recorded.
    pub fn clear(&mut self) {
        self.received.clear();
    }
}

impl<V: Clone> Listener<V> for SignalLog<V> {
    fn listens_to(&self, kind: SignalKind) -> bool {
        self.kinds.contains(&kind)
    }

    fn on_signal(&mut self, envelope: &Envelope<V>) -> Delivery {
        self.received.push(envelope.clone());
        self.delivery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Member {
        id: WidgetId,
        last: Option<Directive<u32>>,
    }

    impl Receiver<u32> for Member {
        fn receiver_id(&self) -> WidgetId {
            self.id
        }

        fn receive(&mut self, directive: &Directive<u32>) {
            self.last = Some(directive.clone());
        }
    }

    // =========================================================================
    // Signal Tests
    // =========================================================================

    #[test]
    fn test_signal_kind_mapping() {
        assert_eq!(Signal::<u32>::Inited.kind(), SignalKind::Inited);
        assert_eq!(Signal::<u32>::MenuCollapse.kind(), SignalKind::MenuCollapse);
        assert_eq!(
            Signal::RadioChecked { value: 1 }.kind(),
            SignalKind::RadioChecked
        );
        assert_eq!(
            Signal::<u32>::OptionSelected { value: None }.kind(),
            SignalKind::OptionSelected
        );
    }

    #[test]
    fn test_lifecycle_kinds() {
        let lifecycle: Vec<_> = SignalKind::ALL
            .into_iter()
            .filter(|k| k.is_lifecycle())
            .collect();
        assert_eq!(
            lifecycle,
            vec![SignalKind::Inited, SignalKind::Attached, SignalKind::Detached]
        );
    }

    #[test]
    fn test_envelope_serializes() {
        let env = Envelope::new(WidgetId::new(9), Signal::RadioChecked { value: 4u32 });
        let json = serde_json::to_string(&env).unwrap();
        let back: Envelope<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, env);
    }

    // =========================================================================
    // Delivery Tests
    // =========================================================================

    #[test]
    fn test_deliver_skips_unregistered_kind() {
        let mut log: SignalLog<u32> = SignalLog::only(&[SignalKind::Expand]);
        let env = Envelope::new(WidgetId::new(1), Signal::Collapse);
        assert!(deliver(&mut log, env).is_some());
        assert!(log.received().is_empty());
    }

    #[test]
    fn test_bubble_stops_at_nearest_listener() {
        let mut near: SignalLog<u32> = SignalLog::only(&[SignalKind::RadioChecked]);
        let mut far: SignalLog<u32> = SignalLog::all();
        let env = Envelope::new(WidgetId::new(1), Signal::RadioChecked { value: 2 });

        let chain: &mut [&mut dyn Listener<u32>] = &mut [&mut near, &mut far];
        let leftover = bubble(chain, env);

        assert!(leftover.is_none());
        assert_eq!(near.kinds(), vec![SignalKind::RadioChecked]);
        assert!(far.received().is_empty());
    }

    #[test]
    fn test_bubble_passes_unregistered_to_far_ancestor() {
        let mut near: SignalLog<u32> = SignalLog::only(&[SignalKind::RadioChecked]);
        let mut far: SignalLog<u32> = SignalLog::all();
        let env = Envelope::new(WidgetId::new(1), Signal::Expand);

        let chain: &mut [&mut dyn Listener<u32>] = &mut [&mut near, &mut far];
        assert!(bubble(chain, env).is_none());
        assert!(near.received().is_empty());
        assert_eq!(far.kinds(), vec![SignalKind::Expand]);
    }

    #[test]
    fn test_bubble_passthrough_reaches_every_listener() {
        let mut near: SignalLog<u32> = SignalLog::all().passthrough();
        let mut far: SignalLog<u32> = SignalLog::all().passthrough();
        let env = Envelope::new(WidgetId::new(1), Signal::MenuCollapse);

        let chain: &mut [&mut dyn Listener<u32>] = &mut [&mut near, &mut far];
        let leftover = bubble(chain, env);

        assert!(leftover.is_some());
        assert_eq!(near.received().len(), 1);
        assert_eq!(far.received().len(), 1);
    }

    #[test]
    fn test_bubble_empty_chain_drops_silently() {
        let env = Envelope::new(WidgetId::new(1), Signal::<u32>::Detached);
        let chain: &mut [&mut dyn Listener<u32>] = &mut [];
        let leftover = bubble(chain, env.clone());
        assert_eq!(leftover, Some(env));
    }

    #[test]
    fn test_signal_log_clear() {
        let mut log: SignalLog<u32> = SignalLog::all();
        let _ = deliver(&mut log, Envelope::new(WidgetId::new(1), Signal::Inited));
        assert_eq!(log.received().len(), 1);
        log.clear();
        assert!(log.received().is_empty());
    }

    // =========================================================================
    // Broadcast Tests
    // =========================================================================

    #[test]
    fn test_broadcast_skips_origin() {
        let mut members: Vec<Member> = (1..=3)
            .map(|i| Member {
                id: WidgetId::new(i),
                last: None,
            })
            .collect();

        let directive = Directive::SyncRadio { value: 2 };
        let count = broadcast(members.iter_mut(), WidgetId::new(2), &directive);

        assert_eq!(count, 2);
        assert_eq!(members[0].last, Some(directive.clone()));
        assert!(members[1].last.is_none());
        assert_eq!(members[2].last, Some(directive));
    }

    #[test]
    fn test_broadcast_empty_group() {
        let mut members: Vec<Member> = Vec::new();
        let count = broadcast(
            members.iter_mut(),
            WidgetId::new(1),
            &Directive::Deselect { value: Some(1) },
        );
        assert_eq!(count, 0);
    }
}
