//! Theme-change propagation.
//!
//! The browser binding forwards three kinds of triggers here: root attribute
//! mutations, cross-tab storage events and the in-page `theme-changed` event.
//! Triggers only mark the hub dirty; [`ThemeHub::flush`] re-reads the theme
//! once, so a burst of triggers within one frame costs one recompute.

use log::debug;

use crate::resolve::{PaletteRequest, ResolvedPalette, ThemeSnapshot, ThemeSource};

/// Root attributes whose mutation may change the theme.
pub const WATCHED_ATTRIBUTES: [&str; 2] = ["data-theme", "style"];

/// Storage keys written by the theming layer.
pub const WATCHED_STORAGE_KEYS: [&str; 2] = ["theme", "theme-colors"];

/// Custom DOM event dispatched by the theming layer after applying a theme.
pub const THEME_CHANGED_EVENT: &str = "theme-changed";

/// Something that may have changed the theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeTrigger {
    /// An attribute on the document root changed.
    Attribute(String),
    /// A storage event; `None` means storage was cleared.
    Storage(Option<String>),
    /// The in-page theme-changed event fired.
    ThemeChanged,
}

impl ThemeTrigger {
    pub fn is_relevant(&self) -> bool {
        match self {
            ThemeTrigger::Attribute(name) => WATCHED_ATTRIBUTES.contains(&name.as_str()),
            ThemeTrigger::Storage(Some(key)) => WATCHED_STORAGE_KEYS.contains(&key.as_str()),
            ThemeTrigger::Storage(None) => true,
            ThemeTrigger::ThemeChanged => true,
        }
    }
}

/// Handle returned by [`ThemeHub::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    request: PaletteRequest,
    callback: Box<dyn FnMut(&ResolvedPalette)>,
}

/// Current theme plus the visuals listening to it.
pub struct ThemeHub {
    snapshot: ThemeSnapshot,
    subscribers: Vec<Subscriber>,
    next_id: u64,
    dirty: bool,
}

impl ThemeHub {
    pub fn new(snapshot: ThemeSnapshot) -> Self {
        Self {
            snapshot,
            subscribers: Vec::new(),
            next_id: 0,
            dirty: false,
        }
    }

    pub fn from_source(source: &impl ThemeSource) -> Self {
        Self::new(ThemeSnapshot::capture(source))
    }

    pub fn snapshot(&self) -> &ThemeSnapshot {
        &self.snapshot
    }

    /// Palette for `request` against the current snapshot.
    pub fn palette(&self, request: &PaletteRequest) -> ResolvedPalette {
        self.snapshot.palette(request)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Register a visual. The callback runs immediately with the current
    /// palette and again after every effective theme change.
    pub fn subscribe(
        &mut self,
        request: PaletteRequest,
        callback: impl FnMut(&ResolvedPalette) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let mut callback: Box<dyn FnMut(&ResolvedPalette)> = Box::new(callback);
        callback(&self.snapshot.palette(&request));
        self.subscribers.push(Subscriber {
            id,
            request,
            callback,
        });
        id
    }

    /// Remove a subscriber. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Record a trigger. Returns whether it marked the hub dirty.
    pub fn notify(&mut self, trigger: &ThemeTrigger) -> bool {
        if trigger.is_relevant() {
            self.dirty = true;
        }
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Recompute if a relevant trigger arrived since the last flush.
    /// Returns whether subscribers were notified.
    pub fn flush(&mut self, source: &impl ThemeSource) -> bool {
        if !self.dirty {
            return false;
        }
        self.refresh(source)
    }

    /// Re-read the theme unconditionally. Subscribers are notified only when
    /// the snapshot actually changed.
    pub fn refresh(&mut self, source: &impl ThemeSource) -> bool {
        self.dirty = false;
        let next = ThemeSnapshot::capture(source);
        if next == self.snapshot {
            return false;
        }
        debug!(
            "theme changed (dark: {} -> {}), notifying {} visuals",
            self.snapshot.is_dark(),
            next.is_dark(),
            self.subscribers.len()
        );
        self.snapshot = next;
        self.publish();
        true
    }

    fn publish(&mut self) {
        let snapshot = &self.snapshot;
        for sub in &mut self.subscribers {
            let palette = snapshot.palette(&sub.request);
            (sub.callback)(&palette);
        }
    }
}

impl Default for ThemeHub {
    fn default() -> Self {
        Self::new(ThemeSnapshot::default())
    }
}
