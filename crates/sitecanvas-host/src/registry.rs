use std::collections::HashMap;

use sitecanvas_transport::{FrameElement, Size};
use sitecanvas_wire::Origin;

use crate::config::SizePolicy;

/// Prefix of host-assigned identifiers for frames that declared none.
pub const ASSIGNED_ID_PREFIX: &str = "site-canvas-";

/// Everything the host tracks about one embedded frame.
///
/// Created at registration, size mutated on every honored `setSize`,
/// removed only by explicit unregistration or session teardown. The
/// trusted origin is fixed for the record's whole lifetime.
pub struct FrameRecord<E> {
    id: String,
    element: E,
    size: Size,
    origin: Origin,
}

impl<E: FrameElement> FrameRecord<E> {
    pub(crate) fn new(id: String, element: E, size: Size, origin: Origin) -> Self {
        Self {
            id,
            element,
            size,
            origin,
        }
    }

    /// The frame's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The embedded element handle.
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Last-known element size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The trusted origin pinned at registration.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Apply a requested size under the deployment policy.
    ///
    /// An axis changes only if its policy flag permits it and the
    /// requested value differs from the stored one — no redundant style
    /// writes.
    pub(crate) fn apply_size(&mut self, policy: SizePolicy, requested: Size) {
        if policy.allow_width && requested.width != self.size.width {
            self.element.set_style_width(requested.width);
            self.size.width = requested.width;
        }
        if policy.allow_height && requested.height != self.size.height {
            self.element.set_style_height(requested.height);
            self.size.height = requested.height;
        }
    }
}

/// Identifier-keyed registry of embedded frames.
///
/// Explicitly owned by the host session (never process-global); every
/// dispatched message must resolve its identifier here or be rejected.
pub struct FrameRegistry<E> {
    entries: HashMap<String, FrameRecord<E>>,
    registered: u64,
}

impl<E: FrameElement> FrameRegistry<E> {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            registered: 0,
        }
    }

    /// Next identifier for a frame that declared none: `site-canvas-N`,
    /// where N counts registrations so far plus one.
    pub fn assign_id(&self) -> String {
        format!("{ASSIGNED_ID_PREFIX}{}", self.registered + 1)
    }

    /// Store a record, returning any record it replaced.
    pub(crate) fn insert(&mut self, record: FrameRecord<E>) -> Option<FrameRecord<E>> {
        self.registered += 1;
        self.entries.insert(record.id.clone(), record)
    }

    /// Look up a record by identifier.
    pub fn get(&self, id: &str) -> Option<&FrameRecord<E>> {
        self.entries.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut FrameRecord<E>> {
        self.entries.get_mut(id)
    }

    /// Remove a record by identifier.
    pub(crate) fn remove(&mut self, id: &str) -> Option<FrameRecord<E>> {
        self.entries.remove(id)
    }

    /// Iterate over all records, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &FrameRecord<E>> {
        self.entries.values()
    }

    /// Number of registered frames.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no frames are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: FrameElement> Default for FrameRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use sitecanvas_transport::{LoopbackContext, LoopbackFrameElement};

    use super::*;

    fn element(declared_id: Option<&str>) -> (LoopbackContext, LoopbackFrameElement) {
        let ctx = LoopbackContext::new("https://frame.example");
        let el = LoopbackFrameElement::new(
            &ctx,
            "https://host.example",
            declared_id,
            Some("https://frame.example/embed"),
            Size::new(640, 480),
        );
        (ctx, el)
    }

    fn record(id: &str, el: LoopbackFrameElement) -> FrameRecord<LoopbackFrameElement> {
        FrameRecord::new(
            id.to_string(),
            el,
            Size::new(640, 480),
            Origin::Exact("https://frame.example".to_string()),
        )
    }

    #[test]
    fn assigned_ids_are_sequential() {
        let mut registry = FrameRegistry::new();
        assert_eq!(registry.assign_id(), "site-canvas-1");

        let (_ctx, el) = element(None);
        registry.insert(record("site-canvas-1", el));
        assert_eq!(registry.assign_id(), "site-canvas-2");
    }

    #[test]
    fn declared_registrations_still_advance_the_counter() {
        let mut registry = FrameRegistry::new();
        let (_ctx, el) = element(Some("player"));
        registry.insert(record("player", el));

        assert_eq!(registry.assign_id(), "site-canvas-2");
    }

    #[test]
    fn insert_returns_replaced_record() {
        let mut registry = FrameRegistry::new();
        let (_ctx, first) = element(Some("player"));
        let (_ctx2, second) = element(Some("player"));

        assert!(registry.insert(record("player", first)).is_none());
        assert!(registry.insert(record("player", second)).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn apply_size_honors_policy_per_axis() {
        let (_ctx, el) = element(None);
        let mut rec = record("f", el.clone());

        rec.apply_size(SizePolicy::default(), Size::new(500, 300));
        assert!(el.width_writes().is_empty());
        assert_eq!(el.height_writes(), vec![300]);
        assert_eq!(rec.size(), Size::new(640, 300));
    }

    #[test]
    fn apply_size_skips_redundant_writes() {
        let (_ctx, el) = element(None);
        let mut rec = record("f", el.clone());

        rec.apply_size(SizePolicy::default(), Size::new(640, 300));
        rec.apply_size(SizePolicy::default(), Size::new(640, 300));
        assert_eq!(el.height_writes(), vec![300]);
    }

    #[test]
    fn remove_then_lookup_misses() {
        let mut registry = FrameRegistry::new();
        let (_ctx, el) = element(Some("player"));
        registry.insert(record("player", el));

        assert!(registry.remove("player").is_some());
        assert!(registry.get("player").is_none());
        assert!(registry.is_empty());
    }
}
